//! Reverse DNS lookups pinned to a dedicated nameserver

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::TokioResolver;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Error type for reverse DNS operations
#[derive(Debug, thiserror::Error)]
pub enum PtrLookupError {
    /// DNS resolution failed (timeout, transport failure, NXDOMAIN)
    #[error("DNS resolution failed: {0}")]
    Resolution(String),

    /// The server answered but returned no PTR records
    #[error("no PTR records found")]
    NoRecords,
}

/// Reverse-lookup capability
///
/// The worker pool depends on this trait rather than a concrete resolver so
/// tests can drive the pipeline with stubs.
#[async_trait]
pub trait PtrLookup: Send + Sync {
    /// Resolve `addr` to its PTR hostnames, in server-returned order.
    ///
    /// A successful result is never empty; a response carrying zero names is
    /// reported as [`PtrLookupError::NoRecords`].
    async fn lookup_ptr(&self, addr: IpAddr) -> Result<Vec<String>, PtrLookupError>;
}

/// Reverse resolver bound to a single nameserver endpoint
///
/// Every query is forced through the configured nameserver regardless of the
/// system resolver configuration. Each call issues exactly one request: no
/// retries, and response caching is disabled so repeated sweeps always hit the
/// wire.
#[derive(Debug)]
pub struct PtrResolver {
    resolver: TokioResolver,
}

impl PtrResolver {
    /// Create a resolver pinned to `nameserver` with a per-attempt `timeout`.
    pub fn new(nameserver: SocketAddr, timeout: Duration) -> Self {
        let servers =
            NameServerConfigGroup::from_ips_clear(&[nameserver.ip()], nameserver.port(), true);
        let config = ResolverConfig::from_parts(None, vec![], servers);

        let mut builder =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
        let opts = builder.options_mut();
        opts.timeout = timeout;
        // A failed lookup is reported, not retried.
        opts.attempts = 0;
        opts.cache_size = 0;

        Self {
            resolver: builder.build(),
        }
    }
}

#[async_trait]
impl PtrLookup for PtrResolver {
    async fn lookup_ptr(&self, addr: IpAddr) -> Result<Vec<String>, PtrLookupError> {
        let lookup = self
            .resolver
            .reverse_lookup(addr)
            .await
            .map_err(|e| PtrLookupError::Resolution(e.to_string()))?;

        let names: Vec<String> = lookup
            .iter()
            .map(|ptr| trim_root_dot(ptr.to_string()))
            .collect();

        if names.is_empty() {
            return Err(PtrLookupError::NoRecords);
        }
        Ok(names)
    }
}

/// PTR names come back fully qualified; drop the trailing root dot.
fn trim_root_dot(mut name: String) -> String {
    if name.ends_with('.') {
        name.pop();
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Instant;

    #[test]
    fn trims_the_root_dot() {
        assert_eq!(trim_root_dot("host.example.".to_string()), "host.example");
        assert_eq!(trim_root_dot("host.example".to_string()), "host.example");
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            PtrLookupError::NoRecords.to_string(),
            "no PTR records found"
        );
        let err = PtrLookupError::Resolution("request timed out".to_string());
        assert!(err.to_string().contains("request timed out"));
    }

    #[tokio::test]
    async fn unreachable_nameserver_errors_promptly() {
        // Bind a local socket that never answers, so the lookup runs into the
        // configured timeout rather than a live server.
        let silent = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let nameserver = silent.local_addr().unwrap();
        let resolver = PtrResolver::new(nameserver, Duration::from_millis(200));

        let started = Instant::now();
        let result = resolver
            .lookup_ptr(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)))
            .await;

        assert!(matches!(result, Err(PtrLookupError::Resolution(_))));
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "lookup must not block past its timeout"
        );
    }
}
