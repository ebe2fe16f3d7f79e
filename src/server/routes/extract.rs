use crate::error::NoteError;
use crate::note::Note;
use mapnotes_schema::StoreNoteForm;

/// Turns raw form fields into a [`Note`].
///
/// - `followup` is `true` only for a case-insensitive `"true"`; absent or any
///   other value is `false`.
/// - `comment`, `map_context`, `latitude`, `longitude` are required.
/// - `email` is kept verbatim when present, including an empty value.
pub(crate) fn note_from_form(
    form: StoreNoteForm,
    login: Option<String>,
) -> Result<Note, NoteError> {
    let latitude = parse_coordinate("latitude", form.latitude.as_deref())?;
    let longitude = parse_coordinate("longitude", form.longitude.as_deref())?;
    let comment = required("comment", form.comment)?;
    let map_context = required("map_context", form.map_context)?;

    let mut note = Note::new(
        parse_follow_up(form.followup.as_deref()),
        comment,
        map_context,
        latitude,
        longitude,
    );
    if let Some(email) = form.email {
        note = note.with_email(email);
    }
    if let Some(login) = login {
        note = note.with_login(login);
    }
    Ok(note)
}

fn parse_follow_up(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

fn required(field: &'static str, value: Option<String>) -> Result<String, NoteError> {
    value.ok_or(NoteError::Validation {
        field,
        reason: "missing required field".to_string(),
    })
}

fn parse_coordinate(field: &'static str, raw: Option<&str>) -> Result<f64, NoteError> {
    let raw = raw.ok_or(NoteError::Validation {
        field,
        reason: "missing required field".to_string(),
    })?;

    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| NoteError::Validation {
            field,
            reason: format!("`{raw}` is not a number ({e})"),
        })?;

    if !value.is_finite() {
        return Err(NoteError::Validation {
            field,
            reason: format!("`{raw}` is not a finite number"),
        });
    }
    Ok(value)
}
