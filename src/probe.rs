use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::ProbeError;
use crate::server_time::ServerTime;
use crate::valkey_client::ValkeyCommands;

// ─── Probe ───────────────────────────────────────────────────────

/// Liveness check followed by an endless `TIME` poll.
///
/// Owns the connection handle for its whole life; the handle goes away
/// exactly once, when the probe is dropped.
pub struct Probe<C> {
    conn: C,
    interval: Duration,
    last: Option<ServerTime>,
}

impl<C: ValkeyCommands> Probe<C> {
    pub fn new(conn: C, interval: Duration) -> Self {
        Self {
            conn,
            interval,
            last: None,
        }
    }

    /// Handshake, then poll until an error or until `shutdown` resolves.
    ///
    /// `shutdown` is raced against the whole exchange, so it also ends a
    /// request the server never answers. A failed handshake returns before
    /// the first `TIME` is sent.
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) -> Result<(), ProbeError> {
        tokio::select! {
            res = self.ping_then_poll() => res,
            _ = shutdown => {
                info!("shutdown requested, leaving poll loop");
                Ok(())
            }
        }
    }

    async fn ping_then_poll(&mut self) -> Result<(), ProbeError> {
        self.handshake().await?;
        self.poll().await
    }

    pub async fn handshake(&mut self) -> Result<(), ProbeError> {
        self.conn.ping().await.map_err(ProbeError::Handshake)?;
        info!("Ping succeeded.");
        Ok(())
    }

    /// One `TIME` round-trip, decoded.
    pub async fn sample(&mut self) -> Result<ServerTime, ProbeError> {
        let reply = self.conn.time().await.map_err(ProbeError::Query)?;
        let now = ServerTime::from_reply(&reply)?;

        if let Some(prev) = self.last.filter(|prev| now < *prev) {
            warn!(previous = %prev, current = %now, "valkey server clock went backwards");
        }
        self.last = Some(now);

        Ok(now)
    }

    /// Sample, log, sleep, repeat. Only returns on error.
    pub async fn poll(&mut self) -> Result<(), ProbeError> {
        loop {
            let now = self.sample().await?;
            info!(
                time = %now,
                unix_micros = now.as_datetime().timestamp_micros(),
                "Current valkey server time"
            );

            tokio::time::sleep(self.interval).await;
        }
    }
}
