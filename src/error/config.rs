use thiserror::Error as ThisError;

/// Startup-time configuration faults. Any of these aborts process initialization.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("missing required configuration key `{key}`")]
    MissingKey { key: String },

    #[error("`{key}` must be a positive integer SRID, got `{value}`")]
    InvalidSrid { key: String, value: String },

    #[error("`{key}` is not a valid table name (`{value}`): {reason}")]
    InvalidTable {
        key: String,
        value: String,
        reason: String,
    },

    #[error("`{key}` is not a usable PostgreSQL connection URL: {reason}")]
    InvalidConnectionUrl { key: String, reason: String },

    #[error("`identity.login_header` is not a valid HTTP header name: `{value}`")]
    InvalidLoginHeader { value: String },

    #[error("failed to extract configuration: {0}")]
    Figment(#[from] figment::Error),
}
