//! The error taxonomy of the engine (spec §7): parser rejections carry an
//! HTTP status, transport failures are unwrapped one level and never
//! retried, and internal invariant violations are fatal to the connection
//! but not to the process.

use thiserror::Error;
use tokio::io::Error as IoError;

/// A status code produced by the parser (spec §4.5). `0` never appears as a
/// value of this type — it is represented by `Ok(())` at the call site.
/// Values `>= 1000` mean "abort the socket without attempting a response";
/// anything else is a standard HTTP status that should be written back to
/// the client before closing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
	/// The status to report, or an internal sentinel `>= 1000`
	pub status: u16,
}

impl ParseError {
	/// The sentinel separating "respond with this HTTP status" from
	/// "abort the socket, no response is possible"
	pub const SOCKET_ABORT_THRESHOLD: u16 = 1000;

	/// Construct a parse error that should produce the given HTTP status
	#[must_use]
	pub const fn status(status: u16) -> Self {
		Self { status }
	}

	/// Construct a parse error that means "abort the socket, no response"
	#[must_use]
	pub const fn socket_abort() -> Self {
		Self {
			status: Self::SOCKET_ABORT_THRESHOLD,
		}
	}

	/// Whether this error means the socket must be aborted without a
	/// response, rather than answered with an HTTP status
	#[must_use]
	pub const fn is_socket_abort(&self) -> bool {
		self.status >= Self::SOCKET_ABORT_THRESHOLD
	}
}

impl std::fmt::Display for ParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.is_socket_abort() {
			write!(f, "socket-level abort during parsing")
		} else {
			write!(f, "parse error, status {}", self.status)
		}
	}
}

impl std::error::Error for ParseError {}

/// A failure of the underlying byte stream (spec §7 class 4): reads/writes
/// that fail are unwrapped one level and never retried within the same
/// connection.
#[derive(Debug, Error)]
pub enum TransportError {
	/// The remote end closed the connection, or a read/write syscall failed
	#[error("transport io failure")]
	Io(#[from] IoError),
	/// A read did not complete within the configured timeout
	#[error("failed to receive transport data within a timeout period, connection closed")]
	Timeout,
}

/// Returned by the listener-reduction planner (spec §4.1) when two virtual
/// hosts sharing one interface declare the same hostname
#[derive(Debug, Error)]
#[error("hostname collision on a shared interface: {hostnames:?}")]
pub struct ListenerPlanError {
	/// The offending hostnames
	pub hostnames: Vec<String>,
}

/// Covers handler-originated termination (spec §4.6 step 8) and internal
/// invariant violations (spec §7 class 6)
#[derive(Debug, Error)]
pub enum DispatchError {
	/// The handler requested the connection be torn down, optionally with a
	/// status code to report before closing
	#[error("handler requested connection termination (status {status:?})")]
	Terminate {
		/// The status to respond with, if any; `None` clears all response
		/// headers and closes silently
		status: Option<u16>,
	},
	/// An internal invariant was violated; the connection is abandoned
	#[error("internal invariant violated: {0}")]
	Invariant(String),
}
