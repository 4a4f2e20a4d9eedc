use redis::aio::MultiplexedConnection;
use redis::RedisResult;
use tracing::{debug, info};

use crate::config::ProbeConfig;
use crate::error::ProbeError;

/// The two requests the probe sends upstream.
///
/// `ValkeyConnection` is the real implementation; tests script their own.
#[allow(async_fn_in_trait)]
pub trait ValkeyCommands {
    /// `PING`, no payload.
    async fn ping(&mut self) -> RedisResult<()>;

    /// `TIME`, returned as the raw string elements of the reply array.
    async fn time(&mut self) -> RedisResult<Vec<String>>;
}

/// The single session to the server, owned by the probe.
///
/// Dropping it closes the underlying TCP connection.
pub struct ValkeyConnection {
    conn: MultiplexedConnection,
}

/// Opens the session and registers the client name.
///
/// No reconnect logic: any failure here is reported as
/// [`ProbeError::Connect`] and the caller gives up.
pub async fn connect(config: &ProbeConfig) -> Result<ValkeyConnection, ProbeError> {
    let connect_err = |source| ProbeError::Connect {
        addr: config.addr.clone(),
        source,
    };

    let client = redis::Client::open(config.connection_url()).map_err(connect_err)?;
    let mut conn = client
        .get_multiplexed_async_connection()
        .await
        .map_err(connect_err)?;

    let _: () = redis::cmd("CLIENT")
        .arg("SETNAME")
        .arg(&config.client_name)
        .query_async(&mut conn)
        .await
        .map_err(connect_err)?;

    debug!(valkey_addr = %config.addr, client_name = %config.client_name, "valkey session opened");
    Ok(ValkeyConnection { conn })
}

impl ValkeyCommands for ValkeyConnection {
    async fn ping(&mut self) -> RedisResult<()> {
        redis::cmd("PING").query_async(&mut self.conn).await
    }

    async fn time(&mut self) -> RedisResult<Vec<String>> {
        redis::cmd("TIME").query_async(&mut self.conn).await
    }
}

impl Drop for ValkeyConnection {
    fn drop(&mut self) {
        info!("valkey client closed successfully.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn unreachable_endpoint_is_a_connection_error() {
        // grab a free port, then release it so nothing listens there
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .unwrap()
            .to_string();

        let cfg = ProbeConfig::new(addr.clone());
        let err = connect(&cfg).await.err().expect("connect should fail");
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert!(err.to_string().contains(&addr));
    }

    #[tokio::test]
    async fn empty_address_is_a_connection_error() {
        let cfg = ProbeConfig::new("");
        let err = connect(&cfg).await.err().expect("connect should fail");
        assert!(matches!(err, ProbeError::Connect { .. }));
    }
}
