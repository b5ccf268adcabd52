//! Configuration as seen by the user: every field optional, so that a config
//! file, an environment variable set, and command-line flags can each
//! specify only what they override.

use std::{env, ffi::OsStr, fs, io::Error as IoError, net::IpAddr, path::Path};

use basic_toml::Error as TomlError;
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

use super::LogLevel;

/// The error returned by fallible conversions into a [`Partial`]
#[derive(Debug, Error)]
pub enum IntoPartialError {
	/// Failed to parse from toml
	#[error("failed to parse from toml")]
	Toml(#[from] TomlError),
	/// Failed to parse from json
	#[error("failed to parse from json")]
	Json(#[from] JsonError),
	/// Failed to read config file
	#[error("failed to read config file")]
	Io(#[from] IoError),
	/// File extension unknown, could not determine format
	#[error("file extension unknown, could not determine format")]
	UnknownExtension,
}

/// Engine configuration as provided by one configuration source (a file, the
/// environment, or the command line). All fields are optional so that
/// several `Partial`s can be layered, each overriding only what it sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Partial {
	/// Minimum level of logs to be collected/displayed
	pub log_level: Option<LogLevel>,
	/// TCP-layer socket options, shared by every listener
	pub tcp: Option<PartialTcp>,
	/// HTTP/1.1 parsing and response pipeline options
	pub http: Option<PartialHttp>,
	/// Virtual hosts, each bound to one or more interfaces
	pub virtual_hosts: Option<Vec<PartialVirtualHost>>,
}

/// TCP socket options applied at bind time, see spec §6 `tcp` object
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialTcp {
	/// `SO_KEEPALIVE` idle time in seconds
	pub keepalive_sec: Option<u32>,
	/// `SO_KEEPALIVE` probe interval in seconds
	pub keepalive_interval_sec: Option<u32>,
	/// Maximum number of bytes read from the socket in one read call
	pub max_recv_size: Option<u32>,
	/// Maximum number of concurrently open connections, across all listeners
	pub max_connections: Option<u32>,
	/// `listen()` backlog size
	pub backlog: Option<u32>,
	/// Send buffer size (`SO_SNDBUF`)
	pub tx_buffer: Option<u32>,
	/// Receive buffer size (`SO_RCVBUF`)
	pub rx_buffer: Option<u32>,
	/// Enable `SO_REUSEADDR`
	pub reuse_address: Option<bool>,
	/// Enable `SO_REUSEPORT` (platform-permitting)
	pub reuse_port: Option<bool>,
}

/// HTTP/1.1 parsing and response pipeline options, see spec §6 `http` object
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialHttp {
	/// Default HTTP version assumed for malformed/partial request lines
	pub default_version: Option<String>,
	/// Maximum accepted request entity body size
	pub max_entity_size: Option<u64>,
	/// Size, in bytes, of the pinned request header parse buffer
	pub header_buf_size: Option<u32>,
	/// Maximum number of request headers accepted per request
	pub max_request_header_count: Option<u32>,
	/// Maximum number of concurrently open connections
	pub max_connections: Option<u32>,
	/// Size, in bytes, of the response header accumulator buffer
	pub response_header_buf_size: Option<u32>,
	/// Keepalive window, in milliseconds; `0` disables keepalive
	pub keepalive_ms: Option<u64>,
	/// Read timeout while actively parsing/reading a request, in milliseconds
	pub recv_timeout_ms: Option<u64>,
	/// Write timeout while writing a response, in milliseconds
	pub send_timeout_ms: Option<u64>,
	/// Size, in bytes, of the form-data buffer
	pub multipart_max_buf_size: Option<u32>,
	/// Maximum accepted `multipart/form-data` request size
	pub multipart_max_size: Option<u64>,
	/// Response compression configuration
	pub compression: Option<PartialCompression>,
}

/// Response compression configuration, see spec §4.6
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialCompression {
	/// Whether response compression is engaged at all
	pub enabled: Option<bool>,
	/// Maximum response length eligible for compression
	pub max_size: Option<u64>,
	/// Minimum response length eligible for compression
	pub min_size: Option<u64>,
}

/// One virtual host: a set of hostnames routed to a handler, bound to a set
/// of interfaces, plus the application-level policy passed through to the
/// handler as its `user_state` (see spec §3 `ServiceHost`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialVirtualHost {
	/// Hostnames (possibly with a leading wildcard label) this host answers
	/// to, e.g. `example.com` or `*.example.com`
	pub hostnames: Option<Vec<String>>,
	/// Interfaces this virtual host is reachable on
	pub interfaces: Option<Vec<PartialInterface>>,
	/// Downstream proxies trusted to set forwarding headers
	pub trusted_downstreams: Option<Vec<IpAddr>>,
	/// Client IP allowlist
	pub whitelist: Option<Vec<IpAddr>>,
	/// Client IP blocklist
	pub blacklist: Option<Vec<IpAddr>>,
	/// File extensions denied regardless of routing
	pub deny_extensions: Option<Vec<String>>,
	/// Default file names tried for directory-style requests
	pub default_files: Option<Vec<String>>,
	/// Whether permissive CORS headers are added to responses
	pub cors: Option<bool>,
	/// Status code to error-page file path overrides
	pub error_files: Option<Vec<(u16, String)>>,
	/// Default `Cache-Control` duration, in seconds
	pub cache_default_sec: Option<u32>,
	/// Soft per-request execution time budget, in milliseconds
	pub max_execution_time_ms: Option<u64>,
}

/// A single `(address, port, tls?)` interface, see spec §3 `TransportInterface`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialInterface {
	/// Listen address; `None` means all interfaces
	pub address: Option<IpAddr>,
	/// Listen port
	pub port: Option<u16>,
	/// Whether this interface terminates TLS
	pub ssl: Option<bool>,
	/// Path to the PEM certificate chain, required when `ssl` is set
	pub cert: Option<String>,
	/// Path to the PEM private key, required when `ssl` is set
	pub key: Option<String>,
	/// Require and validate a client certificate
	pub client_cert_required: Option<bool>,
	/// Path to the PEM file of CA certificates trusted to sign client
	/// certificates, required when `client_cert_required` is set
	pub client_ca: Option<String>,
	/// Prefer the platform's native cipher suite list over rustls's defaults
	pub use_os_ciphers: Option<bool>,
	/// Set `TCP_NODELAY` on accepted sockets
	pub tcp_nodelay: Option<bool>,
}

impl Partial {
	/// Parse a [`Partial`] from a [toml](https://toml.io/en/) string
	///
	/// # Errors
	/// Returns an error if deserialization fails.
	pub fn from_toml(toml: &str) -> Result<Self, IntoPartialError> {
		Ok(basic_toml::from_str(toml)?)
	}

	/// Parse a [`Partial`] from a [json](https://json.org/) string
	///
	/// # Errors
	/// Returns an error if deserialization fails.
	pub fn from_json(json: &str) -> Result<Self, IntoPartialError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Read and parse a configuration file into a [`Partial`]. The format is
	/// determined from the file extension (`.toml`, `.json`).
	///
	/// # IO
	/// This function performs synchronous (blocking) file IO.
	///
	/// # Errors
	/// Returns an error if the file can't be read, its extension is unknown,
	/// or its contents can't be parsed in the format its extension implies.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, IntoPartialError> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path)?;

		match path.extension().and_then(OsStr::to_str) {
			Some("toml") => Self::from_toml(&contents),
			Some("json") => Self::from_json(&contents),
			_ => Err(IntoPartialError::UnknownExtension),
		}
	}

	/// Build a [`Partial`] from `HTTPD_`-prefixed environment variables
	/// (currently only `HTTPD_LOG_LEVEL`; the rest of the configuration
	/// object is structured and is better suited to a file)
	#[must_use]
	pub fn from_env_vars() -> Self {
		Self {
			log_level: env::var("HTTPD_LOG_LEVEL")
				.ok()
				.and_then(|s| s.parse().ok()),
			..Self::default()
		}
	}
}
