//! Scripted connection for exercising the facades without a server
//!
//! Replies are queued ahead of time and consumed one per issued command, so
//! a test can script an exact exchange and assert how many commands reached
//! the wire.

use redis::{ConnectionLike, ErrorKind, RedisError, RedisResult, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tenax_client::Driver;

/// Connection that answers every command from a queue of canned replies
pub struct ScriptedConn {
    replies: Arc<Mutex<VecDeque<Value>>>,
    issued: Arc<AtomicU32>,
}

impl ConnectionLike for ScriptedConn {
    fn req_packed_command(&mut self, _cmd: &[u8]) -> RedisResult<Value> {
        self.issued.fetch_add(1, Ordering::SeqCst);
        match self.replies.lock().unwrap().pop_front() {
            Some(value) => Ok(value),
            None => Err(RedisError::from((
                ErrorKind::IoError,
                "reply script exhausted",
            ))),
        }
    }

    fn req_packed_commands(
        &mut self,
        _cmd: &[u8],
        _offset: usize,
        count: usize,
    ) -> RedisResult<Vec<Value>> {
        (0..count).map(|_| self.req_packed_command(&[])).collect()
    }

    fn get_db(&self) -> i64 {
        0
    }

    fn check_connection(&mut self) -> bool {
        true
    }

    fn is_open(&self) -> bool {
        true
    }
}

/// Driver handing out [`ScriptedConn`]s that share one reply queue
pub struct ScriptedDriver {
    replies: Arc<Mutex<VecDeque<Value>>>,
    issued: Arc<AtomicU32>,
}

impl ScriptedDriver {
    pub fn with_replies(replies: Vec<Value>) -> Self {
        ScriptedDriver {
            replies: Arc::new(Mutex::new(replies.into())),
            issued: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Shared count of commands that reached a connection
    pub fn issued(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.issued)
    }
}

impl Driver for ScriptedDriver {
    type Conn = ScriptedConn;
    type Error = RedisError;

    fn open(&self) -> Result<ScriptedConn, RedisError> {
        Ok(ScriptedConn {
            replies: Arc::clone(&self.replies),
            issued: Arc::clone(&self.issued),
        })
    }

    fn ping(&self, _conn: &mut ScriptedConn) -> Result<(), RedisError> {
        Ok(())
    }

    fn commit(&self, _conn: &mut ScriptedConn) -> Result<(), RedisError> {
        Ok(())
    }

    fn rollback(&self, _conn: &mut ScriptedConn) -> Result<(), RedisError> {
        Ok(())
    }

    fn close(&self, conn: ScriptedConn) -> Result<(), RedisError> {
        drop(conn);
        Ok(())
    }
}
