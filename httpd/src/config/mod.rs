//! Engine configuration handling.
//!
//! Configuration is parsed into [`Partial`]s (one per source: environment,
//! config file, command line), which are then merged, later ones winning,
//! into one immutable [`Config`] for the lifetime of the server (see spec
//! §6 for the logical configuration object this mirrors).

mod partial;

use std::{net::IpAddr, time::Duration};

pub use partial::{
	IntoPartialError, Partial, PartialCompression, PartialHttp, PartialInterface, PartialTcp,
	PartialVirtualHost,
};
use serde::{Deserialize, Serialize};
use strum::{Display as EnumDisplay, EnumString};
use tracing::Level;

use crate::transport::TransportInterface;

/// Minimum level of logs to be collected/displayed
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, EnumDisplay,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogLevel {
	/// Log everything, including very verbose debug/trace info
	Trace,
	/// Log most things, including more verbose debug info
	Debug,
	/// Recommended log level: general information, warnings, and errors
	#[default]
	Info,
	/// Log only warnings and errors
	Warn,
	/// Log only critical errors
	Error,
}

impl From<LogLevel> for Level {
	fn from(log_level: LogLevel) -> Self {
		match log_level {
			LogLevel::Trace => Self::TRACE,
			LogLevel::Debug => Self::DEBUG,
			LogLevel::Info => Self::INFO,
			LogLevel::Warn => Self::WARN,
			LogLevel::Error => Self::ERROR,
		}
	}
}

/// Resolved, immutable TCP configuration, merged from [`PartialTcp`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TcpConfig {
	/// `SO_KEEPALIVE` idle time
	pub keepalive: Duration,
	/// `SO_KEEPALIVE` probe interval
	pub keepalive_interval: Duration,
	/// Maximum number of bytes read from the socket in one read call
	pub max_recv_size: u32,
	/// Maximum number of concurrently open connections, across all listeners
	pub max_connections: u32,
	/// `listen()` backlog size
	pub backlog: u32,
	/// Send buffer size (`SO_SNDBUF`)
	pub tx_buffer: u32,
	/// Receive buffer size (`SO_RCVBUF`)
	pub rx_buffer: u32,
	/// Enable `SO_REUSEADDR`
	pub reuse_address: bool,
	/// Enable `SO_REUSEPORT` (platform-permitting)
	pub reuse_port: bool,
}

impl Default for TcpConfig {
	fn default() -> Self {
		Self {
			keepalive: Duration::from_secs(7200),
			keepalive_interval: Duration::from_secs(75),
			max_recv_size: 64 * 1024,
			max_connections: 5000,
			backlog: 1024,
			tx_buffer: 64 * 1024,
			rx_buffer: 64 * 1024,
			reuse_address: true,
			reuse_port: false,
		}
	}
}

/// Resolved, immutable response compression configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressionConfig {
	/// Whether response compression is engaged at all
	pub enabled: bool,
	/// Maximum response length eligible for compression
	pub max_size: u64,
	/// Minimum response length eligible for compression
	pub min_size: u64,
}

impl Default for CompressionConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			max_size: 8 * 1024 * 1024,
			min_size: 256,
		}
	}
}

/// Resolved, immutable HTTP/1.1 parsing and response pipeline configuration,
/// merged from [`PartialHttp`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HttpConfig {
	/// Maximum accepted request entity body size
	pub max_entity_size: u64,
	/// Size, in bytes, of the pinned request header parse buffer
	pub header_buf_size: u32,
	/// Maximum number of request headers accepted per request
	pub max_request_header_count: u32,
	/// Maximum number of concurrently open connections
	pub max_connections: u32,
	/// Size, in bytes, of the response header accumulator buffer
	pub response_header_buf_size: u32,
	/// Keepalive window; `Duration::ZERO` disables keepalive
	pub keepalive: Duration,
	/// Read timeout while actively parsing/reading a request
	pub recv_timeout: Duration,
	/// Write timeout while writing a response
	pub send_timeout: Duration,
	/// Size, in bytes, of the form-data buffer
	pub multipart_max_buf_size: u32,
	/// Maximum accepted `multipart/form-data` request size
	pub multipart_max_size: u64,
	/// Response compression configuration
	pub compression: CompressionConfig,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			max_entity_size: 50 * 1024 * 1024,
			header_buf_size: 8 * 1024,
			max_request_header_count: 64,
			max_connections: 5000,
			response_header_buf_size: 8 * 1024,
			keepalive: Duration::from_secs(120),
			recv_timeout: Duration::from_secs(10),
			send_timeout: Duration::from_secs(10),
			multipart_max_buf_size: 8 * 1024,
			multipart_max_size: 10 * 1024 * 1024,
			compression: CompressionConfig::default(),
		}
	}
}

/// Resolved virtual-host configuration: hostnames, the interfaces it binds
/// to, and the application-level policy the core hands to the handler
/// verbatim as `user_state` (see spec §3 `ServiceHost`)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VirtualHostConfig {
	/// Hostnames this host answers to
	pub hostnames: Vec<String>,
	/// Interfaces this virtual host is reachable on
	pub interfaces: Vec<TransportInterface>,
	/// Downstream proxies trusted to set forwarding headers
	pub trusted_downstreams: Vec<IpAddr>,
	/// Client IP allowlist
	pub whitelist: Vec<IpAddr>,
	/// Client IP blocklist
	pub blacklist: Vec<IpAddr>,
	/// File extensions denied regardless of routing
	pub deny_extensions: Vec<String>,
	/// Default file names tried for directory-style requests
	pub default_files: Vec<String>,
	/// Whether permissive CORS headers are added to responses
	pub cors: bool,
	/// Status code to error-page file path overrides
	pub error_files: Vec<(u16, String)>,
	/// Default `Cache-Control` duration, in seconds
	pub cache_default_sec: u32,
	/// Soft per-request execution time budget
	pub max_execution_time: Duration,
}

impl From<PartialVirtualHost> for VirtualHostConfig {
	fn from(p: PartialVirtualHost) -> Self {
		Self {
			hostnames: p.hostnames.unwrap_or_default(),
			interfaces: p
				.interfaces
				.unwrap_or_default()
				.into_iter()
				.map(TransportInterface::from)
				.collect(),
			trusted_downstreams: p.trusted_downstreams.unwrap_or_default(),
			whitelist: p.whitelist.unwrap_or_default(),
			blacklist: p.blacklist.unwrap_or_default(),
			deny_extensions: p.deny_extensions.unwrap_or_default(),
			default_files: p.default_files.unwrap_or_default(),
			cors: p.cors.unwrap_or(false),
			error_files: p.error_files.unwrap_or_default(),
			cache_default_sec: p.cache_default_sec.unwrap_or(0),
			max_execution_time: Duration::from_millis(p.max_execution_time_ms.unwrap_or(30_000)),
		}
	}
}

/// The engine's fully-resolved, immutable-after-construction configuration.
/// Built once at startup by merging a sequence of [`Partial`]s, later ones
/// overriding earlier ones, matching the precedence documented in spec §6:
/// environment, then config file, then command-line flags.
#[derive(Clone, Debug, Default)]
pub struct Config {
	log_level: LogLevel,
	tcp: TcpConfig,
	http: HttpConfig,
	virtual_hosts: Vec<VirtualHostConfig>,
}

impl Config {
	/// Merge a sequence of [`Partial`]s into a new [`Config`], in the order
	/// given (later entries override earlier ones). `virtual_hosts` is an
	/// exception: if set anywhere, the **last** `Some` entirely replaces the
	/// list, matching how the other fields behave.
	#[must_use]
	pub fn merge(partials: impl IntoIterator<Item = Partial>) -> Self {
		let mut config = Self::default();

		for partial in partials {
			if let Some(log_level) = partial.log_level {
				config.log_level = log_level;
			}

			if let Some(tcp) = partial.tcp {
				config.tcp.apply(tcp);
			}

			if let Some(http) = partial.http {
				config.http.apply(http);
			}

			if let Some(virtual_hosts) = partial.virtual_hosts {
				config.virtual_hosts = virtual_hosts.into_iter().map(Into::into).collect();
			}
		}

		config
	}

	/// The configured minimum log level
	#[must_use]
	pub const fn log_level(&self) -> LogLevel {
		self.log_level
	}

	/// The resolved TCP configuration
	#[must_use]
	pub const fn tcp(&self) -> &TcpConfig {
		&self.tcp
	}

	/// The resolved HTTP configuration
	#[must_use]
	pub const fn http(&self) -> &HttpConfig {
		&self.http
	}

	/// The configured virtual hosts
	#[must_use]
	pub fn virtual_hosts(&self) -> &[VirtualHostConfig] {
		&self.virtual_hosts
	}
}

impl TcpConfig {
	fn apply(&mut self, p: PartialTcp) {
		if let Some(v) = p.keepalive_sec {
			self.keepalive = Duration::from_secs(v.into());
		}
		if let Some(v) = p.keepalive_interval_sec {
			self.keepalive_interval = Duration::from_secs(v.into());
		}
		if let Some(v) = p.max_recv_size {
			self.max_recv_size = v;
		}
		if let Some(v) = p.max_connections {
			self.max_connections = v;
		}
		if let Some(v) = p.backlog {
			self.backlog = v;
		}
		if let Some(v) = p.tx_buffer {
			self.tx_buffer = v;
		}
		if let Some(v) = p.rx_buffer {
			self.rx_buffer = v;
		}
		if let Some(v) = p.reuse_address {
			self.reuse_address = v;
		}
		if let Some(v) = p.reuse_port {
			self.reuse_port = v;
		}
	}
}

impl HttpConfig {
	fn apply(&mut self, p: PartialHttp) {
		if let Some(v) = p.max_entity_size {
			self.max_entity_size = v;
		}
		if let Some(v) = p.header_buf_size {
			self.header_buf_size = v;
		}
		if let Some(v) = p.max_request_header_count {
			self.max_request_header_count = v;
		}
		if let Some(v) = p.max_connections {
			self.max_connections = v;
		}
		if let Some(v) = p.response_header_buf_size {
			self.response_header_buf_size = v;
		}
		if let Some(v) = p.keepalive_ms {
			self.keepalive = Duration::from_millis(v);
		}
		if let Some(v) = p.recv_timeout_ms {
			self.recv_timeout = Duration::from_millis(v);
		}
		if let Some(v) = p.send_timeout_ms {
			self.send_timeout = Duration::from_millis(v);
		}
		if let Some(v) = p.multipart_max_buf_size {
			self.multipart_max_buf_size = v;
		}
		if let Some(v) = p.multipart_max_size {
			self.multipart_max_size = v;
		}
		if let Some(c) = p.compression {
			if let Some(v) = c.enabled {
				self.compression.enabled = v;
			}
			if let Some(v) = c.max_size {
				self.compression.max_size = v;
			}
			if let Some(v) = c.min_size {
				self.compression.min_size = v;
			}
		}
	}
}
