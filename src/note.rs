/// One user-submitted geolocated annotation.
///
/// Built once per inbound submission and never mutated afterwards; the
/// optional fields can only be attached while the value is still being
/// assembled (`with_email`, `with_login`).
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    follow_up: bool,
    email: Option<String>,
    comment: String,
    map_context: String,
    login: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl Note {
    pub fn new(
        follow_up: bool,
        comment: impl Into<String>,
        map_context: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            follow_up,
            email: None,
            comment: comment.into(),
            map_context: map_context.into(),
            login: None,
            latitude,
            longitude,
        }
    }

    /// Reporter e-mail. An empty string is kept as-is: it is a deliberate
    /// user input, not absence.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Reporter login, only ever taken from the trusted upstream identity header.
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn follow_up(&self) -> bool {
        self.follow_up
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Serialized mapfishapp map context captured when the note was created.
    pub fn map_context(&self) -> &str {
        &self.map_context
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}
