//! Port availability probe port (interface).

/// Port for checking whether a TCP port can be bound.
///
/// Implementations must release any socket they open before returning,
/// so a `true` result leaves the port free for the caller.
pub trait PortProbePort: Send + Sync {
    /// Returns true if a listener could be bound to `port`.
    fn is_available(&self, port: u16) -> impl std::future::Future<Output = bool> + Send;
}
