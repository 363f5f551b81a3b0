//! Driver seam for physical connection handles
//!
//! A [`Driver`] knows how to open, validate, and tear down the transport for
//! one backend. It is the only place driver-native error types exist; the
//! client converts them at its boundary and callers never see them.

/// Backend transport for a [`Client`](crate::Client)
///
/// Implementations hold the endpoint configuration (address, credentials,
/// transport timeouts) and hand out live connection handles on demand.
/// Operations themselves are closures over `&mut Self::Conn` passed to
/// [`Client::execute`](crate::Client::execute).
///
/// `commit` and `rollback` act on whatever transactional state the handle
/// carries; backends without transactions implement them as no-ops.
pub trait Driver {
    /// The live transport handle
    type Conn;

    /// Driver-native failure type; converted at the client boundary
    type Error: std::error::Error + Send + Sync + 'static;

    /// Establish a fresh connection using the configured endpoint
    fn open(&self) -> Result<Self::Conn, Self::Error>;

    /// Validate that the handle is still live
    fn ping(&self, conn: &mut Self::Conn) -> Result<(), Self::Error>;

    /// Commit any transactional state on the handle
    fn commit(&self, conn: &mut Self::Conn) -> Result<(), Self::Error>;

    /// Discard any transactional state on the handle
    fn rollback(&self, conn: &mut Self::Conn) -> Result<(), Self::Error>;

    /// Tear down the handle
    ///
    /// Callers always wrap this quietly: a close failure is logged and
    /// discarded, never propagated.
    fn close(&self, conn: Self::Conn) -> Result<(), Self::Error>;
}
