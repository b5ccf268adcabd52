//! Virtual-host routing: a hostname lookup with wildcard fallback per
//! listener (spec §3 `ServiceHost`, §4.6 step 4), built on
//! [`httpd_domainmap`].

use std::sync::Arc;

use httpd_domainmap::{Domain, DomainMap, ParseError as DomainParseError};

use crate::{config::VirtualHostConfig, event::Handler};

/// One configured virtual host: its routable hostnames, the handler
/// invoked for them, and the per-host configuration passed through to the
/// handler as `user_state` (spec §3 `ServiceHost`)
pub struct ServiceHost {
	/// Hostnames this host answers to, exactly as configured (may include
	/// a wildcard label)
	pub hostnames: Vec<String>,
	/// The handler invoked for requests matching one of `hostnames`
	pub handler: Arc<dyn Handler>,
	/// The resolved per-host configuration
	pub config: VirtualHostConfig,
}

/// A hostname-keyed lookup table for the hosts bound to one listener,
/// built from the listener-reduction planner's output (spec §4.1 step 4,
/// §4.6 step 4: "exact hostname hit... otherwise a wildcard default...
/// otherwise 404")
pub struct VirtualHostRouter {
	hosts: DomainMap<Arc<ServiceHost>>,
}

impl VirtualHostRouter {
	/// Build a router from the given hosts. Returns an error if two hosts
	/// declare the same hostname (the caller — the listener-reduction
	/// planner — should have already rejected this; see
	/// [`crate::transport::plan_listeners`]).
	///
	/// # Errors
	/// Returns the offending hostname's [`DomainParseError`] if a hostname
	/// fails to parse as a domain reference identifier.
	pub fn build(hosts: Vec<ServiceHost>) -> Result<Self, DomainParseError> {
		let mut map = DomainMap::with_capacity(hosts.len());

		for host in hosts {
			let host = Arc::new(host);
			for hostname in &host.hostnames {
				let domain = Domain::presented(hostname)?;
				map.set(domain, Arc::clone(&host));
			}
		}

		Ok(Self { hosts: map })
	}

	/// Look up the host for a request's `Host` header value: an exact
	/// match wins over a wildcard match, falling back to `None` (the
	/// caller responds `404`, spec §4.6 step 4)
	#[must_use]
	pub fn lookup(&self, hostname: &str) -> Option<Arc<ServiceHost>> {
		let reference = Domain::reference(hostname).ok()?;
		self.hosts.get(&reference).cloned()
	}

	/// Number of distinct hostnames routed by this router
	#[must_use]
	pub fn len(&self) -> usize {
		self.hosts.len()
	}

	/// Whether this router has no routable hostnames
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.hosts.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::HttpEvent;

	struct StubHandler;

	#[async_trait::async_trait]
	impl Handler for StubHandler {
		async fn handle(&self, _event: &mut HttpEvent) {}
	}

	fn host(names: &[&str]) -> ServiceHost {
		ServiceHost {
			hostnames: names.iter().map(|s| (*s).to_string()).collect(),
			handler: Arc::new(StubHandler),
			config: VirtualHostConfig::default(),
		}
	}

	#[test]
	fn exact_match_wins_over_wildcard() {
		let router = VirtualHostRouter::build(vec![
			host(&["*.example.com"]),
			host(&["foo.example.com"]),
		])
		.unwrap();

		let exact = router.lookup("foo.example.com").unwrap();
		assert_eq!(exact.hostnames, vec!["foo.example.com".to_string()]);

		let wildcard = router.lookup("bar.example.com").unwrap();
		assert_eq!(wildcard.hostnames, vec!["*.example.com".to_string()]);
	}

	#[test]
	fn unknown_hostname_returns_none() {
		let router = VirtualHostRouter::build(vec![host(&["example.com"])]).unwrap();
		assert!(router.lookup("unknown.test").is_none());
	}
}
