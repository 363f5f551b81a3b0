//! Redis-style operation facades
//!
//! Every method desugars to exactly one retried unit of work through
//! [`Client::execute`]; there is no resilience logic and no handle access
//! in this file beyond that call. Return types strip down to plain Rust
//! values; driver errors are converted at the client boundary.

use crate::config::KvConfig;
use crate::driver::RedisDriver;
use redis::{ConnectionLike, RedisError};
use std::collections::HashMap;
use tenax_client::{Client, Driver};
use tenax_core::{ClientOptions, Error, Result};
use tracing::warn;

/// Resilient client for the key-value backend
///
/// Generic over the [`Driver`] so any transport that speaks the Redis
/// protocol can sit underneath; [`connect`](KvClient::connect) binds the
/// default TCP driver.
pub struct KvClient<D: Driver = RedisDriver> {
    inner: Client<D>,
}

impl KvClient {
    /// Connect to the configured endpoint
    pub fn connect(config: KvConfig) -> Result<Self> {
        let options = config.options.clone();
        let driver = RedisDriver::new(config).map_err(Error::connection)?;
        Self::with_driver(driver, options)
    }
}

impl<D> KvClient<D>
where
    D: Driver<Error = RedisError>,
    D::Conn: ConnectionLike,
{
    /// Build a client over a custom driver
    pub fn with_driver(driver: D, options: ClientOptions) -> Result<Self> {
        let inner = Client::connect(driver, options)?;
        Ok(KvClient { inner })
    }

    // -------------------------------------------------------------------
    // Keys
    // -------------------------------------------------------------------

    /// Whether `key` exists
    pub fn exists(&self, key: &str) -> Result<bool> {
        self.inner.execute(&format!("EXISTS {key}"), |conn| {
            redis::cmd("EXISTS").arg(key).query(conn)
        })
    }

    /// Delete `key`; `true` when it existed
    pub fn del(&self, key: &str) -> Result<bool> {
        self.inner.execute(&format!("DEL {key}"), |conn| {
            redis::cmd("DEL").arg(key).query(conn)
        })
    }

    /// Set a time-to-live on `key`; `true` when the key exists
    pub fn expire(&self, key: &str, seconds: i64) -> Result<bool> {
        self.inner.execute(&format!("EXPIRE {key}"), |conn| {
            redis::cmd("EXPIRE").arg(key).arg(seconds).query(conn)
        })
    }

    /// Remaining time-to-live in seconds (-1 without TTL, -2 without key)
    pub fn ttl(&self, key: &str) -> Result<i64> {
        self.inner.execute(&format!("TTL {key}"), |conn| {
            redis::cmd("TTL").arg(key).query(conn)
        })
    }

    /// Keys matching a glob pattern
    ///
    /// `KEYS` walks the whole keyspace; reserve it for diagnostics.
    pub fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        self.inner.execute(&format!("KEYS {pattern}"), |conn| {
            redis::cmd("KEYS").arg(pattern).query(conn)
        })
    }

    /// Type of the value at `key` ("string", "hash", ..., "none")
    pub fn type_of(&self, key: &str) -> Result<String> {
        self.inner.execute(&format!("TYPE {key}"), |conn| {
            redis::cmd("TYPE").arg(key).query(conn)
        })
    }

    // -------------------------------------------------------------------
    // Strings
    // -------------------------------------------------------------------

    /// Value at `key`, if present
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.execute(&format!("GET {key}"), |conn| {
            redis::cmd("GET").arg(key).query(conn)
        })
    }

    /// Set `key` to `value`, optionally expiring after `expire_secs`
    pub fn set(&self, key: &str, value: &str, expire_secs: Option<u64>) -> Result<()> {
        self.inner.execute(&format!("SET {key}"), |conn| {
            let mut cmd = redis::cmd("SET");
            cmd.arg(key).arg(value);
            if let Some(seconds) = expire_secs {
                cmd.arg("EX").arg(seconds);
            }
            cmd.query(conn)
        })
    }

    /// Increment the integer at `key` by 1, creating it at 0
    pub fn incr(&self, key: &str) -> Result<i64> {
        self.inner.execute(&format!("INCR {key}"), |conn| {
            redis::cmd("INCR").arg(key).query(conn)
        })
    }

    /// Decrement the integer at `key` by 1, creating it at 0
    pub fn decr(&self, key: &str) -> Result<i64> {
        self.inner.execute(&format!("DECR {key}"), |conn| {
            redis::cmd("DECR").arg(key).query(conn)
        })
    }

    // -------------------------------------------------------------------
    // Hashes
    // -------------------------------------------------------------------

    /// Value of `field` in the hash at `key`
    pub fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        self.inner.execute(&format!("HGET {key} {field}"), |conn| {
            redis::cmd("HGET").arg(key).arg(field).query(conn)
        })
    }

    /// Every field and value of the hash at `key`
    pub fn hget_all(&self, key: &str) -> Result<HashMap<String, String>> {
        self.inner.execute(&format!("HGETALL {key}"), |conn| {
            redis::cmd("HGETALL").arg(key).query(conn)
        })
    }

    /// Set `field` in the hash at `key`; `true` when the field was new
    pub fn hset(&self, key: &str, field: &str, value: &str) -> Result<bool> {
        self.inner.execute(&format!("HSET {key} {field}"), |conn| {
            redis::cmd("HSET").arg(key).arg(field).arg(value).query(conn)
        })
    }

    /// Delete `field` from the hash at `key`; `true` when it existed
    pub fn hdel(&self, key: &str, field: &str) -> Result<bool> {
        self.inner.execute(&format!("HDEL {key} {field}"), |conn| {
            redis::cmd("HDEL").arg(key).arg(field).query(conn)
        })
    }

    /// Field names of the hash at `key`
    pub fn hkeys(&self, key: &str) -> Result<Vec<String>> {
        self.inner.execute(&format!("HKEYS {key}"), |conn| {
            redis::cmd("HKEYS").arg(key).query(conn)
        })
    }

    /// Values of the hash at `key`
    pub fn hvals(&self, key: &str) -> Result<Vec<String>> {
        self.inner.execute(&format!("HVALS {key}"), |conn| {
            redis::cmd("HVALS").arg(key).query(conn)
        })
    }

    /// Whether `field` exists in the hash at `key`
    pub fn hexists(&self, key: &str, field: &str) -> Result<bool> {
        self.inner.execute(&format!("HEXISTS {key} {field}"), |conn| {
            redis::cmd("HEXISTS").arg(key).arg(field).query(conn)
        })
    }

    // -------------------------------------------------------------------
    // Lists
    // -------------------------------------------------------------------

    /// Push `value` at the head of the list; returns the new length
    pub fn lpush(&self, key: &str, value: &str) -> Result<i64> {
        self.inner.execute(&format!("LPUSH {key}"), |conn| {
            redis::cmd("LPUSH").arg(key).arg(value).query(conn)
        })
    }

    /// Push `value` at the tail of the list; returns the new length
    pub fn rpush(&self, key: &str, value: &str) -> Result<i64> {
        self.inner.execute(&format!("RPUSH {key}"), |conn| {
            redis::cmd("RPUSH").arg(key).arg(value).query(conn)
        })
    }

    /// Pop from the head of the list
    pub fn lpop(&self, key: &str) -> Result<Option<String>> {
        self.inner.execute(&format!("LPOP {key}"), |conn| {
            redis::cmd("LPOP").arg(key).query(conn)
        })
    }

    /// Pop from the tail of the list
    pub fn rpop(&self, key: &str) -> Result<Option<String>> {
        self.inner.execute(&format!("RPOP {key}"), |conn| {
            redis::cmd("RPOP").arg(key).query(conn)
        })
    }

    /// Elements between `start` and `stop` inclusive (negative from the end)
    pub fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        self.inner.execute(&format!("LRANGE {key}"), |conn| {
            redis::cmd("LRANGE").arg(key).arg(start).arg(stop).query(conn)
        })
    }

    /// Length of the list at `key`
    pub fn llen(&self, key: &str) -> Result<i64> {
        self.inner.execute(&format!("LLEN {key}"), |conn| {
            redis::cmd("LLEN").arg(key).query(conn)
        })
    }

    // -------------------------------------------------------------------
    // Sets
    // -------------------------------------------------------------------

    /// Add `member` to the set; `true` when it was not already present
    pub fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        self.inner.execute(&format!("SADD {key}"), |conn| {
            redis::cmd("SADD").arg(key).arg(member).query(conn)
        })
    }

    /// Remove `member` from the set; `true` when it was present
    pub fn srem(&self, key: &str, member: &str) -> Result<bool> {
        self.inner.execute(&format!("SREM {key}"), |conn| {
            redis::cmd("SREM").arg(key).arg(member).query(conn)
        })
    }

    /// All members of the set at `key`
    pub fn smembers(&self, key: &str) -> Result<Vec<String>> {
        self.inner.execute(&format!("SMEMBERS {key}"), |conn| {
            redis::cmd("SMEMBERS").arg(key).query(conn)
        })
    }

    /// Whether `member` is in the set at `key`
    pub fn sismember(&self, key: &str, member: &str) -> Result<bool> {
        self.inner.execute(&format!("SISMEMBER {key}"), |conn| {
            redis::cmd("SISMEMBER").arg(key).arg(member).query(conn)
        })
    }

    /// Cardinality of the set at `key`
    pub fn scard(&self, key: &str) -> Result<i64> {
        self.inner.execute(&format!("SCARD {key}"), |conn| {
            redis::cmd("SCARD").arg(key).query(conn)
        })
    }

    // -------------------------------------------------------------------
    // Sorted sets
    // -------------------------------------------------------------------

    /// Add `(member, score)` entries; returns how many were newly added
    pub fn zadd(&self, key: &str, entries: &[(&str, f64)]) -> Result<i64> {
        if entries.is_empty() {
            return Err(Error::InvalidArgument(
                "zadd requires at least one (member, score) entry".to_string(),
            ));
        }
        self.inner.execute(&format!("ZADD {key}"), |conn| {
            let mut cmd = redis::cmd("ZADD");
            cmd.arg(key);
            for (member, score) in entries {
                cmd.arg(*score).arg(*member);
            }
            cmd.query(conn)
        })
    }

    /// Remove `member`; `true` when it was present
    pub fn zrem(&self, key: &str, member: &str) -> Result<bool> {
        self.inner.execute(&format!("ZREM {key}"), |conn| {
            redis::cmd("ZREM").arg(key).arg(member).query(conn)
        })
    }

    /// Members between ranks `start` and `stop` inclusive, by ascending score
    pub fn zrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        self.inner.execute(&format!("ZRANGE {key}"), |conn| {
            redis::cmd("ZRANGE").arg(key).arg(start).arg(stop).query(conn)
        })
    }

    /// Like [`zrange`](KvClient::zrange), with each member's score
    pub fn zrange_with_scores(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(String, f64)>> {
        self.inner.execute(&format!("ZRANGE {key}"), |conn| {
            redis::cmd("ZRANGE")
                .arg(key)
                .arg(start)
                .arg(stop)
                .arg("WITHSCORES")
                .query(conn)
        })
    }

    /// Ascending rank of `member`, if present
    pub fn zrank(&self, key: &str, member: &str) -> Result<Option<i64>> {
        self.inner.execute(&format!("ZRANK {key}"), |conn| {
            redis::cmd("ZRANK").arg(key).arg(member).query(conn)
        })
    }

    /// Cardinality of the sorted set at `key`
    pub fn zcard(&self, key: &str) -> Result<i64> {
        self.inner.execute(&format!("ZCARD {key}"), |conn| {
            redis::cmd("ZCARD").arg(key).query(conn)
        })
    }

    // -------------------------------------------------------------------
    // Escape hatch and maintenance
    // -------------------------------------------------------------------

    /// Run an arbitrary command, first argument being the command name
    ///
    /// Deliberately returns the raw [`redis::Value`]: re-encoding an
    /// arbitrary reply would only shadow the driver's type. Errors still
    /// surface as ordinary Tenax errors.
    pub fn raw_command(&self, args: &[&str]) -> Result<redis::Value> {
        let (command, rest) = args.split_first().ok_or_else(|| {
            Error::InvalidArgument("raw command requires a command name".to_string())
        })?;
        self.inner.execute(&args.join(" "), |conn| {
            let mut cmd = redis::cmd(command);
            for arg in rest {
                cmd.arg(*arg);
            }
            cmd.query(conn)
        })
    }

    /// Remove every key of the selected logical database
    pub fn flush_db(&self) -> Result<()> {
        warn!(target: "tenax::client", "flushing the selected logical database");
        self.inner
            .execute("FLUSHDB", |conn| redis::cmd("FLUSHDB").query(conn))
    }

    /// Remove every key of every logical database
    pub fn flush_all(&self) -> Result<()> {
        warn!(target: "tenax::client", "flushing every logical database");
        self.inner
            .execute("FLUSHALL", |conn| redis::cmd("FLUSHALL").query(conn))
    }

    /// Tear down the connection; safe to call any number of times
    pub fn close(&self) {
        self.inner.close();
    }

    /// Whether a handle is currently open
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }
}
