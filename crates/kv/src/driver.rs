//! Redis driver
//!
//! Wraps one synchronous `redis::Connection`. Liveness is validated with
//! `PING`. Redis commands autocommit, so `commit` and `rollback` are no-ops
//! and the generic transaction scope is inert on this backend.

use crate::config::KvConfig;
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisError};
use tenax_client::Driver;

/// [`Driver`] implementation over the synchronous `redis` connection
pub struct RedisDriver {
    config: KvConfig,
    client: redis::Client,
}

impl RedisDriver {
    /// Create a driver for the given endpoint
    pub fn new(config: KvConfig) -> Result<Self, RedisError> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
            redis: RedisConnectionInfo {
                db: config.db,
                username: config.username.clone(),
                password: config.password.clone(),
                ..RedisConnectionInfo::default()
            },
        };
        let client = redis::Client::open(info)?;
        Ok(RedisDriver { config, client })
    }

    /// The endpoint configuration
    pub fn config(&self) -> &KvConfig {
        &self.config
    }
}

impl Driver for RedisDriver {
    type Conn = redis::Connection;
    type Error = RedisError;

    fn open(&self) -> Result<redis::Connection, RedisError> {
        let conn = self
            .client
            .get_connection_with_timeout(self.config.connect_timeout)?;
        conn.set_read_timeout(self.config.read_timeout)?;
        conn.set_write_timeout(self.config.write_timeout)?;
        Ok(conn)
    }

    fn ping(&self, conn: &mut redis::Connection) -> Result<(), RedisError> {
        redis::cmd("PING").query::<String>(conn).map(|_| ())
    }

    fn commit(&self, _conn: &mut redis::Connection) -> Result<(), RedisError> {
        Ok(())
    }

    fn rollback(&self, _conn: &mut redis::Connection) -> Result<(), RedisError> {
        Ok(())
    }

    fn close(&self, conn: redis::Connection) -> Result<(), RedisError> {
        // Dropping the connection closes the socket.
        drop(conn);
        Ok(())
    }
}
