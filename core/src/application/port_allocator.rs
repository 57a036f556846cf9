//! Random free-port allocation.

use tracing::debug;

use crate::domain::PortRange;
use crate::error::{Error, Result};
use crate::ports::PortProbePort;

/// Picks random ports from a range until one can be bound.
///
/// Uses the `PortProbePort` trait for the availability check,
/// allowing different implementations to be injected.
pub struct PortAllocator<P: PortProbePort> {
    probe: P,
    range: PortRange,
    max_attempts: u32,
}

impl<P: PortProbePort> PortAllocator<P> {
    /// Create an allocator probing at most `max_attempts` candidates.
    pub fn new(probe: P, range: PortRange, max_attempts: u32) -> Self {
        Self {
            probe,
            range,
            max_attempts,
        }
    }

    /// Find a free port.
    ///
    /// Each attempt draws a fresh random candidate; a candidate may repeat.
    /// The probe releases its socket before this returns, so the port is free
    /// at the moment of allocation (though nothing reserves it afterwards).
    pub async fn allocate(&self) -> Result<u16> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.range.random_candidate();

            if self.probe.is_available(candidate).await {
                debug!(port = candidate, attempt = attempt, "Allocated port");
                return Ok(candidate);
            }

            debug!(port = candidate, attempt = attempt, "Port in use, retrying");
        }

        Err(Error::PortExhausted {
            attempts: self.max_attempts,
            min: self.range.min,
            max: self.range.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::TcpProbe;
    use crate::application::mocks::MockProbe;

    #[tokio::test]
    async fn test_allocates_first_free_candidate() {
        let probe = MockProbe::busy_for(3);
        let allocator = PortAllocator::new(probe.clone(), PortRange::default(), 20);

        let port = allocator.allocate().await.unwrap();
        assert!(PortRange::default().contains(port));
        assert_eq!(probe.probed().len(), 4);
        assert_eq!(*probe.probed().last().unwrap(), port);
    }

    #[tokio::test]
    async fn test_exhaustion_after_max_attempts() {
        let probe = MockProbe::busy_for(u32::MAX);
        let allocator = PortAllocator::new(probe.clone(), PortRange::new(40000, 40100).unwrap(), 20);

        let err = allocator.allocate().await.unwrap_err();
        match err {
            Error::PortExhausted { attempts, min, max } => {
                assert_eq!(attempts, 20);
                assert_eq!(min, 40000);
                assert_eq!(max, 40100);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(probe.probed().len(), 20);
        assert!(probe.probed().iter().all(|p| (40000..=40100).contains(p)));
    }

    #[tokio::test]
    async fn test_allocated_port_is_bindable() {
        let allocator = PortAllocator::new(TcpProbe::all_interfaces(), PortRange::default(), 20);

        for _ in 0..5 {
            let port = allocator.allocate().await.unwrap();
            assert!(port >= 10000);
            let listener = std::net::TcpListener::bind(("0.0.0.0", port));
            assert!(listener.is_ok(), "port {port} should be free right after allocation");
        }
    }

    #[tokio::test]
    async fn test_occupied_single_port_range_exhausts() {
        let listener = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let range = PortRange::new(port, port).unwrap();
        let allocator = PortAllocator::new(TcpProbe::all_interfaces(), range, 3);

        assert!(matches!(
            allocator.allocate().await,
            Err(Error::PortExhausted { attempts: 3, .. })
        ));
    }
}
