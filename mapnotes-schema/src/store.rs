use serde::{Deserialize, Serialize};

/// Raw form fields of `POST /note/backend/{id}`.
///
/// Every field is kept as an optional string; typing and required-field
/// checks happen server-side so that each failure maps to a precise message.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreNoteForm {
    #[serde(default)]
    pub followup: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub map_context: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

impl StoreNoteForm {
    /// Builds the form from decoded `key=value` pairs. A repeated field keeps
    /// its first value; unknown fields are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "followup" => &mut form.followup,
                "email" => &mut form.email,
                "comment" => &mut form.comment,
                "map_context" => &mut form.map_context,
                "latitude" => &mut form.latitude,
                "longitude" => &mut form.longitude,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        form
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StoreResponse {
    pub success: bool,
    pub msg: String,
}

impl StoreResponse {
    pub fn stored() -> Self {
        Self {
            success: true,
            msg: "Note stored".to_string(),
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: msg.into(),
        }
    }
}
