use std::time::Duration;

/// Environment variable holding the server address (`host:port`).
pub const ADDR_ENV: &str = "VALKEY_ADDR";

const DEFAULT_USERNAME: &str = "default";
const DEFAULT_CLIENT_NAME: &str = "app";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Everything the probe needs to know before it opens a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Server endpoint, taken verbatim from `VALKEY_ADDR`.
    pub addr: String,
    /// ACL user the session authenticates as.
    pub username: String,
    /// Label registered with `CLIENT SETNAME`.
    pub client_name: String,
    /// Pause between two `TIME` queries.
    pub poll_interval: Duration,
}

impl ProbeConfig {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            username: DEFAULT_USERNAME.into(),
            client_name: DEFAULT_CLIENT_NAME.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Reads `VALKEY_ADDR`. An unset variable leaves the address empty,
    /// which is reported when the connection is attempted.
    pub fn from_env() -> Self {
        Self::new(std::env::var(ADDR_ENV).unwrap_or_default())
    }

    /// Connection URL handed to `redis::Client::open`.
    ///
    /// A plain `host:port` gets the `redis://` scheme and the configured
    /// username; anything that already names a scheme is passed through.
    pub fn connection_url(&self) -> String {
        if self.addr.contains("://") {
            return self.addr.clone();
        }
        format!("redis://{}@{}/", self.username, self.addr)
    }
}
