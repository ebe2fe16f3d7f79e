use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-backend connection pool settings. Every backend gets its own pool
/// built from the same values.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    /// TOML: `pool.max_connections`. Default: `8`.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Bounded wait for a free connection before a store fails.
    /// TOML: `pool.acquire_timeout_secs`. Default: `30`.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Ping connections when they are borrowed.
    /// TOML: `pool.test_before_acquire`. Default: `true`.
    #[serde(default = "default_true")]
    pub test_before_acquire: bool,
}

impl PoolConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            test_before_acquire: true,
        }
    }
}

/// Trusted identity propagated by the fronting security proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Request header carrying the authenticated login.
    /// TOML: `identity.login_header`. Default: `sec-username`.
    #[serde(default = "default_login_header")]
    pub login_header: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            login_header: default_login_header(),
        }
    }
}

fn default_max_connections() -> u32 {
    8
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_login_header() -> String {
    "sec-username".to_string()
}
