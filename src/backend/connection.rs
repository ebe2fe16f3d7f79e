use sqlx::postgres::PgConnectOptions;
use std::{fmt, str::FromStr};
use url::Url;

const JDBC_PREFIX: &str = "jdbc:";
const REDACTED: &str = "***";

/// Backend connection string, accepted in the JDBC form used by the
/// geOrchestra datadir (`jdbc:postgresql://host:5432/db?user=..&password=..`)
/// or as a plain `postgres://` URL.
#[derive(Clone)]
pub struct ConnectionUrl {
    options: PgConnectOptions,
    redacted: String,
}

impl ConnectionUrl {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let normalized = trimmed.strip_prefix(JDBC_PREFIX).unwrap_or(trimmed);

        let url = Url::parse(normalized).map_err(|e| e.to_string())?;
        if !matches!(url.scheme(), "postgresql" | "postgres") {
            return Err(format!("unsupported scheme `{}`", url.scheme()));
        }

        let options = PgConnectOptions::from_str(url.as_str()).map_err(|e| e.to_string())?;

        Ok(Self {
            options,
            redacted: redact(url),
        })
    }

    pub fn connect_options(&self) -> &PgConnectOptions {
        &self.options
    }

    /// URL with every password replaced, safe for logs.
    pub fn redacted(&self) -> &str {
        &self.redacted
    }
}

fn redact(mut url: Url) -> String {
    if url.password().is_some() {
        let _ = url.set_password(Some(REDACTED));
    }

    if url.query().is_some() {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k.eq_ignore_ascii_case("password") {
                    REDACTED.to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), v)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

impl fmt::Debug for ConnectionUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionUrl").field(&self.redacted).finish()
    }
}
