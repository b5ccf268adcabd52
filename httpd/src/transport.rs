//! Transport providers and the listener-reduction planner (spec §4.1,
//! §4.2). Grounded directly on the teacher's `Listener`/`Acceptor`
//! pattern: a socket2-configured `TcpListener` handed to an async accept
//! loop, wrapped by a TLS layer when the interface terminates TLS.

use std::{
	collections::HashMap,
	io::Error as IoError,
	net::{IpAddr, Ipv6Addr, SocketAddr},
	os::raw::c_int,
	sync::Arc,
};

use socket2::{Domain, Protocol as SocketProtocol, Socket, Type};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::{
	rustls::{server::danger::ClientCertVerifier, ServerConfig},
	TlsAcceptor,
};
use tracing::{debug, warn};

use crate::{
	certs::CertificateResolver, config::PartialInterface, error::ListenerPlanError,
	vhost::ServiceHost,
};

/// Incoming-connection backlog size for every listening socket, matching
/// the teacher's `LISTENER_TCP_BACKLOG_SIZE`
const LISTENER_TCP_BACKLOG_SIZE: c_int = 1024;

/// A concrete `(address, port, tls?)` tuple (spec §3 `TransportInterface`).
/// Hash/equality is derived from every field so that identical interface
/// declarations from different virtual hosts collapse to the same key in
/// the listener-reduction planner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransportInterface {
	/// Listen address; `None` means all interfaces
	pub address: Option<IpAddr>,
	/// Listen port
	pub port: u16,
	/// Whether this interface terminates TLS
	pub ssl: bool,
	/// Path to the PEM certificate chain, required when `ssl` is set
	pub cert: Option<String>,
	/// Path to the PEM private key, required when `ssl` is set
	pub key: Option<String>,
	/// Require and validate a client certificate
	pub client_cert_required: bool,
	/// Path to the PEM file of CA certificates trusted to sign client
	/// certificates, required when `client_cert_required` is set
	pub client_ca: Option<String>,
	/// Prefer the platform's native cipher suite list over rustls's
	/// defaults
	pub use_os_ciphers: bool,
	/// Set `TCP_NODELAY` on accepted sockets; forced off with a warning
	/// when `ssl` is set, since it has no benefit on an encrypted stream
	/// (spec §4.2)
	pub tcp_nodelay: Option<bool>,
}

impl From<PartialInterface> for TransportInterface {
	fn from(p: PartialInterface) -> Self {
		Self {
			address: p.address,
			port: p.port.unwrap_or(if p.ssl.unwrap_or(false) { 443 } else { 80 }),
			ssl: p.ssl.unwrap_or(false),
			cert: p.cert,
			key: p.key,
			client_cert_required: p.client_cert_required.unwrap_or(false),
			client_ca: p.client_ca,
			use_os_ciphers: p.use_os_ciphers.unwrap_or(false),
			tcp_nodelay: p.tcp_nodelay,
		}
	}
}

/// Scheduling mode chosen at listener construction (spec §4.2, §5):
/// `Inline` runs connection continuations on the accepting thread;
/// `ThreadPool` hands each connection to the ambient multi-thread runtime.
/// TLS mandates `ThreadPool` because rustls dispatches reads on the
/// ambient scheduler and would deadlock inline (spec §4.2, §9).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchedulingMode {
	/// Run continuations on the accepting thread
	Inline,
	/// Hand continuations to the runtime's thread pool (default,
	/// mandatory with TLS)
	#[default]
	ThreadPool,
}

impl SchedulingMode {
	/// Resolve the mode actually used for an interface: TLS mandates
	/// `ThreadPool` regardless of what was requested (spec §4.2, §5: "the
	/// TLS stream dispatches reads on the ambient scheduler and would
	/// deadlock otherwise")
	#[must_use]
	pub const fn effective(self, ssl: bool) -> Self {
		if ssl {
			Self::ThreadPool
		} else {
			self
		}
	}
}

/// One interface's hosts, grouped by the listener-reduction planner (spec
/// §3 `HttpTransportMapping`, §4.1)
pub struct HttpTransportMapping {
	/// The interface this mapping binds to
	pub interface: TransportInterface,
	/// The hosts reachable on `interface`
	pub hosts: Vec<Arc<ServiceHost>>,
}

/// Group `hosts` by the interfaces their virtual-host config declares,
/// failing if two hosts sharing an interface declare the same hostname
/// (spec §4.1).
///
/// # Errors
/// Returns [`ListenerPlanError`] listing every duplicated hostname found
/// on a shared interface.
pub fn plan_listeners(
	hosts: Vec<Arc<ServiceHost>>,
) -> Result<Vec<HttpTransportMapping>, ListenerPlanError> {
	let mut by_interface: HashMap<TransportInterface, Vec<Arc<ServiceHost>>> = HashMap::new();

	for host in hosts {
		for interface in &host.config.interfaces {
			by_interface
				.entry(interface.clone())
				.or_default()
				.push(Arc::clone(&host));
		}
	}

	let mut collisions = Vec::new();
	for group in by_interface.values() {
		let mut seen = std::collections::HashSet::new();
		for host in group {
			for hostname in &host.hostnames {
				if !seen.insert(hostname.clone()) {
					collisions.push(hostname.clone());
				}
			}
		}
	}

	if !collisions.is_empty() {
		return Err(ListenerPlanError {
			hostnames: collisions,
		});
	}

	Ok(by_interface
		.into_iter()
		.map(|(interface, hosts)| HttpTransportMapping { interface, hosts })
		.collect())
}

/// Whether a handshake failure on a TLS listener is an "invalid TLS
/// frame" (the peer sent non-TLS bytes) vs. any other handshake failure
/// (spec §4.2: the former is logged at debug and the accept loop
/// continues; the latter propagates to the caller).
fn is_invalid_tls_frame(err: &IoError) -> bool {
	err.kind() == std::io::ErrorKind::InvalidData
		&& err
			.get_ref()
			.is_some_and(|inner| inner.to_string().contains("CorruptMessage") || inner.to_string().contains("invalid"))
}

/// Bind a `TcpListener` on `addr`/`port` with the socket options the
/// teacher applies at bind time (spec §4.2: `SO_REUSEADDR`, buffer sizes,
/// `TCP_NODELAY`).
///
/// # Errors
/// Returns any error from the underlying `socket2`/`tokio` calls.
pub fn bind(
	address: Option<IpAddr>,
	port: u16,
	reuse_address: bool,
	reuse_port: bool,
	tx_buffer: u32,
	rx_buffer: u32,
	tcp_nodelay: bool,
) -> Result<(TcpListener, SocketAddr), IoError> {
	let socket_addr: SocketAddr =
		(address.unwrap_or(IpAddr::V6(Ipv6Addr::UNSPECIFIED)), port).into();

	let socket = Socket::new(
		Domain::for_address(socket_addr),
		Type::STREAM,
		Some(SocketProtocol::TCP),
	)?;

	socket.set_reuse_address(reuse_address)?;
	#[cfg(unix)]
	if reuse_port {
		socket.set_reuse_port(true)?;
	}
	#[cfg(not(unix))]
	let _ = reuse_port;

	if socket_addr.is_ipv6() {
		socket.set_only_v6(address.is_some())?;
	}

	socket.set_nonblocking(true)?;
	socket.set_nodelay(tcp_nodelay)?;
	socket.set_send_buffer_size(tx_buffer as usize)?;
	socket.set_recv_buffer_size(rx_buffer as usize)?;

	socket.bind(&socket_addr.into())?;
	socket.listen(LISTENER_TCP_BACKLOG_SIZE)?;

	let listener = TcpListener::from_std(socket.into())?;
	Ok((listener, socket_addr))
}

/// Accept one connection from a plain TCP listener
///
/// # Errors
/// Returns the underlying accept error
pub async fn accept_plain(listener: &TcpListener) -> Result<(TcpStream, SocketAddr), IoError> {
	listener.accept().await
}

/// Build a rustls `TlsAcceptor` that always resolves to `resolver`'s
/// certificate, regardless of the client's SNI (spec §4.2: "the
/// certificate selection callback always returns the interface's
/// certificate (no SNI)"). When `client_verifier` is `Some`, the
/// handshake requires and validates a client certificate against it
/// (spec §4.2: "no policy errors when client certs are required");
/// otherwise client auth is not requested at all.
#[must_use]
pub fn build_tls_acceptor(
	resolver: Arc<CertificateResolver>,
	client_verifier: Option<Arc<dyn ClientCertVerifier>>,
) -> TlsAcceptor {
	let builder = ServerConfig::builder();
	let mut server_config = match client_verifier {
		Some(verifier) => builder.with_client_cert_verifier(verifier),
		None => builder.with_no_client_auth(),
	}
	.with_cert_resolver(resolver);
	server_config.alpn_protocols = vec![b"http/1.1".to_vec()];

	TlsAcceptor::from(Arc::new(server_config))
}

/// Outcome of a TLS handshake attempt, distinguishing the two error
/// classes spec §4.2 requires different handling for
pub enum TlsAcceptOutcome {
	/// The handshake succeeded
	Accepted(tokio_rustls::server::TlsStream<TcpStream>),
	/// The peer sent non-TLS bytes: log at debug, keep accepting
	InvalidFrame,
	/// Any other handshake failure: propagate
	Failed(IoError),
}

/// Perform a TLS handshake on `stream`, classifying the failure mode per
/// spec §4.2
pub async fn accept_tls(acceptor: &TlsAcceptor, stream: TcpStream) -> TlsAcceptOutcome {
	match acceptor.accept(stream).await {
		Ok(tls) => TlsAcceptOutcome::Accepted(tls),
		Err(err) if is_invalid_tls_frame(&err) => {
			debug!(?err, "invalid TLS frame during handshake, continuing accept loop");
			TlsAcceptOutcome::InvalidFrame
		}
		Err(err) => {
			warn!(?err, "TLS handshake failed");
			TlsAcceptOutcome::Failed(err)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn host_with_interface(name: &str, interface: TransportInterface) -> Arc<ServiceHost> {
		use crate::{config::VirtualHostConfig, event::HttpEvent};

		struct StubHandler;
		#[async_trait::async_trait]
		impl crate::event::Handler for StubHandler {
			async fn handle(&self, _event: &mut HttpEvent) {}
		}

		Arc::new(ServiceHost {
			hostnames: vec![name.to_string()],
			handler: Arc::new(StubHandler),
			config: VirtualHostConfig {
				interfaces: vec![interface],
				..VirtualHostConfig::default()
			},
		})
	}

	fn interface(port: u16) -> TransportInterface {
		TransportInterface {
			address: None,
			port,
			ssl: false,
			cert: None,
			key: None,
			client_cert_required: false,
			client_ca: None,
			use_os_ciphers: false,
			tcp_nodelay: None,
		}
	}

	#[test]
	fn distinct_interfaces_collapse_into_separate_mappings() {
		let hosts = vec![
			host_with_interface("a.example.com", interface(80)),
			host_with_interface("b.example.com", interface(443)),
		];

		let plan = plan_listeners(hosts).unwrap();
		assert_eq!(plan.len(), 2);
	}

	#[test]
	fn shared_interface_groups_hosts() {
		let hosts = vec![
			host_with_interface("a.example.com", interface(80)),
			host_with_interface("b.example.com", interface(80)),
		];

		let plan = plan_listeners(hosts).unwrap();
		assert_eq!(plan.len(), 1);
		assert_eq!(plan[0].hosts.len(), 2);
	}

	#[test]
	fn hostname_collision_on_shared_interface_fails() {
		let hosts = vec![
			host_with_interface("dup.example.com", interface(80)),
			host_with_interface("dup.example.com", interface(80)),
		];

		let err = plan_listeners(hosts).unwrap_err();
		assert_eq!(err.hostnames, vec!["dup.example.com".to_string()]);
	}
}
