//! The top-level server: builds the virtual-host router and the
//! listener-reduction plan from configuration, then runs one accept loop
//! per distinct interface (spec §2, §4.1, §4.2, §5).

use std::sync::{
	atomic::{AtomicUsize, Ordering},
	Arc,
};

use tokio::{net::TcpStream, spawn, sync::watch};
use tracing::{debug, error, info, warn};

use crate::{
	buffers::BufferPool,
	certs::{build_client_verifier, get_certkey, CertificateResolver},
	config::{Config, VirtualHostConfig},
	context::ContextPool,
	dispatch::handle_connection,
	event::Handler,
	transport::{
		self, plan_listeners, HttpTransportMapping, SchedulingMode, TlsAcceptOutcome,
		TransportInterface,
	},
	vhost::{ServiceHost, VirtualHostRouter},
};

/// The open-connection counter shared across every listener (spec §5:
/// "the open-connection counter is an atomic integer")
#[derive(Default)]
pub struct OpenConnections(AtomicUsize);

impl OpenConnections {
	/// Current number of open connections across all listeners
	#[must_use]
	pub fn load(&self) -> usize {
		self.0.load(Ordering::Acquire)
	}

	fn increment(&self) {
		self.0.fetch_add(1, Ordering::AcqRel);
	}

	fn decrement(&self) {
		self.0.fetch_sub(1, Ordering::AcqRel);
	}
}

/// A configured virtual host plus the handler it routes to, before the
/// listener-reduction planner has grouped it by interface (the input to
/// [`Server::build`])
pub struct HostDeclaration {
	/// Hostnames this host answers to
	pub hostnames: Vec<String>,
	/// The handler invoked for matching requests
	pub handler: Arc<dyn Handler>,
	/// The per-host configuration, including its interfaces
	pub config: VirtualHostConfig,
}

/// Error returned by [`Server::build`] or [`Server::run`]
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// The listener-reduction planner rejected the configuration
	#[error(transparent)]
	Plan(#[from] crate::error::ListenerPlanError),
	/// A virtual-host router failed to build (duplicate/invalid hostname)
	#[error(transparent)]
	Domain(#[from] httpd_domainmap::ParseError),
	/// A TLS interface's certificate or key could not be loaded
	#[error(transparent)]
	Cert(#[from] crate::certs::CertKeyError),
	/// Binding a listening socket failed
	#[error("failed to bind a listening socket: {0}")]
	Bind(#[source] std::io::Error),
}

/// The assembled server: one router and one transport mapping per
/// distinct interface, ready to [`run`](Server::run)
pub struct Server {
	config: Arc<Config>,
	mappings: Vec<HttpTransportMapping>,
	context_pool: Arc<ContextPool>,
	buffer_pool: Arc<BufferPool>,
	open_connections: Arc<OpenConnections>,
}

impl Server {
	/// Build a server from configuration and the declared virtual hosts:
	/// runs the listener-reduction planner (spec §4.1) and constructs the
	/// shared context pool and buffer pool.
	///
	/// # Errors
	/// Returns [`ServerError::Plan`] on a hostname collision on a shared
	/// interface.
	pub fn build(config: Config, hosts: Vec<HostDeclaration>) -> Result<Self, ServerError> {
		let hosts: Vec<Arc<ServiceHost>> = hosts
			.into_iter()
			.map(|h| {
				Arc::new(ServiceHost {
					hostnames: h.hostnames,
					handler: h.handler,
					config: h.config,
				})
			})
			.collect();

		let mappings = plan_listeners(hosts)?;
		let buffer_pool = Arc::new(BufferPool::new(4096));
		let context_pool = Arc::new(ContextPool::new(config.tcp().max_connections as usize));

		Ok(Self {
			config: Arc::new(config),
			mappings,
			context_pool,
			buffer_pool,
			open_connections: Arc::new(OpenConnections::default()),
		})
	}

	/// Run every listener until `stop` fires. Each listener runs its own
	/// accept loop task; this function returns once all of them have
	/// exited (spec §5: "a server-wide stop signal is registered with the
	/// listener on start").
	///
	/// # Errors
	/// Returns [`ServerError`] if a router fails to build, a certificate
	/// can't be loaded, or a socket can't be bound.
	pub async fn run(
		&self,
		mut stop: watch::Receiver<bool>,
		scheduling_mode: SchedulingMode,
	) -> Result<(), ServerError> {
		let mut handles = Vec::new();

		for mapping in &self.mappings {
			let router = Arc::new(VirtualHostRouter::build(
				mapping
					.hosts
					.iter()
					.map(|h| ServiceHost {
						hostnames: h.hostnames.clone(),
						handler: Arc::clone(&h.handler),
						config: h.config.clone(),
					})
					.collect(),
			)?);

			let interface = mapping.interface.clone();
			let http_config = Arc::new(self.config.http().clone());
			let tcp_config = *self.config.tcp();
			let context_pool = Arc::clone(&self.context_pool);
			let buffer_pool = Arc::clone(&self.buffer_pool);
			let open_connections = Arc::clone(&self.open_connections);
			let mut stop_rx = stop.clone();

			let tls_acceptor = if interface.ssl {
				let cert_path = interface.cert.clone().ok_or_else(|| {
					ServerError::Bind(std::io::Error::new(
						std::io::ErrorKind::InvalidInput,
						"TLS interface missing a certificate path",
					))
				})?;
				let key_path = interface.key.clone().ok_or_else(|| {
					ServerError::Bind(std::io::Error::new(
						std::io::ErrorKind::InvalidInput,
						"TLS interface missing a private key path",
					))
				})?;
				let certkey = get_certkey(cert_path, key_path)?;
				let resolver = Arc::new(CertificateResolver::new(Some(Arc::new(certkey))));

				let client_verifier = if interface.client_cert_required {
					let ca_path = interface.client_ca.clone().ok_or_else(|| {
						ServerError::Bind(std::io::Error::new(
							std::io::ErrorKind::InvalidInput,
							"TLS interface requires client certs but has no client_ca path",
						))
					})?;
					Some(build_client_verifier(ca_path)?)
				} else {
					None
				};

				Some(transport::build_tls_acceptor(resolver, client_verifier))
			} else {
				None
			};

			let tcp_nodelay = match interface.tcp_nodelay {
				Some(v) => v,
				None if interface.ssl => {
					warn!("TCP_NODELAY has no benefit on an encrypted stream, disabling it");
					false
				}
				None => true,
			};

			let (listener, socket_addr) = transport::bind(
				interface.address,
				interface.port,
				tcp_config.reuse_address,
				tcp_config.reuse_port,
				tcp_config.tx_buffer,
				tcp_config.rx_buffer,
				tcp_nodelay,
			)
			.map_err(ServerError::Bind)?;

			let mode = scheduling_mode.effective(interface.ssl);
			info!("listening on {socket_addr} (tls={}, scheduling={mode:?})", interface.ssl);

			let handle = spawn(async move {
				loop {
					tokio::select! {
						biased;

						changed = stop_rx.changed() => {
							if changed.is_err() || *stop_rx.borrow() {
								debug!("stop signal received, closing listener on {socket_addr}");
								break;
							}
						}
						accepted = listener.accept() => {
							match accepted {
								Ok((stream, remote_addr)) => match mode {
									SchedulingMode::ThreadPool => spawn_connection(
										stream,
										socket_addr,
										remote_addr,
										tls_acceptor.clone(),
										Arc::clone(&router),
										Arc::clone(&http_config),
										Arc::clone(&context_pool),
										Arc::clone(&buffer_pool),
										Arc::clone(&open_connections),
									),
									SchedulingMode::Inline => run_connection_inline(
										stream,
										socket_addr,
										remote_addr,
										tls_acceptor.clone(),
										Arc::clone(&router),
										Arc::clone(&http_config),
										Arc::clone(&context_pool),
										Arc::clone(&buffer_pool),
										Arc::clone(&open_connections),
									)
									.await,
								},
								Err(err) => {
									warn!(?err, "error accepting TCP connection on {socket_addr}");
								}
							}
						}
					}
				}
			});

			handles.push(handle);
		}

		let _ = stop.changed().await;

		for handle in handles {
			if let Err(err) = handle.await {
				error!(?err, "listener task panicked");
			}
		}

		Ok(())
	}
}

#[allow(clippy::too_many_arguments)]
fn spawn_connection(
	stream: TcpStream,
	local_addr: std::net::SocketAddr,
	remote_addr: std::net::SocketAddr,
	tls_acceptor: Option<tokio_rustls::TlsAcceptor>,
	router: Arc<VirtualHostRouter>,
	http_config: Arc<crate::config::HttpConfig>,
	context_pool: Arc<ContextPool>,
	buffer_pool: Arc<BufferPool>,
	open_connections: Arc<OpenConnections>,
) {
	open_connections.increment();

	spawn(async move {
		match tls_acceptor {
			None => {
				handle_connection(
					stream,
					local_addr,
					remote_addr,
					false,
					router,
					http_config,
					context_pool,
					buffer_pool,
					Arc::clone(&open_connections),
				)
				.await;
			}
			Some(acceptor) => match transport::accept_tls(&acceptor, stream).await {
				TlsAcceptOutcome::Accepted(tls_stream) => {
					handle_connection(
						tls_stream,
						local_addr,
						remote_addr,
						true,
						router,
						http_config,
						context_pool,
						buffer_pool,
						Arc::clone(&open_connections),
					)
					.await;
				}
				TlsAcceptOutcome::InvalidFrame | TlsAcceptOutcome::Failed(_) => {}
			},
		}

		open_connections.decrement();
	});
}

/// Run one connection to completion on the accepting task itself, rather
/// than handing it to the runtime's thread pool (spec §4.2, §5 "inline"
/// scheduling mode: "one task = one OS thread until it yields"). This
/// blocks the listener's accept loop for the duration of the connection.
#[allow(clippy::too_many_arguments)]
async fn run_connection_inline(
	stream: TcpStream,
	local_addr: std::net::SocketAddr,
	remote_addr: std::net::SocketAddr,
	tls_acceptor: Option<tokio_rustls::TlsAcceptor>,
	router: Arc<VirtualHostRouter>,
	http_config: Arc<crate::config::HttpConfig>,
	context_pool: Arc<ContextPool>,
	buffer_pool: Arc<BufferPool>,
	open_connections: Arc<OpenConnections>,
) {
	open_connections.increment();

	match tls_acceptor {
		None => {
			handle_connection(
				stream,
				local_addr,
				remote_addr,
				false,
				router,
				http_config,
				context_pool,
				buffer_pool,
				Arc::clone(&open_connections),
			)
			.await;
		}
		Some(acceptor) => {
			if let TlsAcceptOutcome::Accepted(tls_stream) = transport::accept_tls(&acceptor, stream).await {
				handle_connection(
					tls_stream,
					local_addr,
					remote_addr,
					true,
					router,
					http_config,
					context_pool,
					buffer_pool,
					Arc::clone(&open_connections),
				)
				.await;
			}
		}
	}

	open_connections.decrement();
}
