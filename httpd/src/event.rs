//! The handler contract (spec §6 "Handler contract", §3 lifetimes):
//! `HttpEvent` borrows the context for the duration of one request and
//! must be cleared before the context returns to the pool.

use std::net::SocketAddr;

use crate::{
	request::HttpRequest,
	response::{HttpResponse, ResponseBody},
};

/// A user-supplied request handler, routed to by virtual-host name (spec
/// §1, §6). Implementations must not retain the [`HttpEvent`] past
/// `handle` returning (spec §9 "Lifetime of HttpEvent").
#[async_trait::async_trait]
pub trait Handler: Send + Sync {
	/// Handle one parsed request, writing a response through `event`
	async fn handle(&self, event: &mut HttpEvent);
}

/// Connection-level information exposed to the handler read-only (spec §3
/// transport context fields)
#[derive(Clone, Copy, Debug)]
pub struct ConnectionInfo {
	/// The local interface's address this connection was accepted on
	pub local_addr: SocketAddr,
	/// The connecting peer's address
	pub remote_addr: SocketAddr,
	/// Whether this connection is TLS-terminated
	pub is_tls: bool,
}

/// Signal a handler can raise to end the connection immediately (spec
/// §4.6 step 8): optionally with a status to report, otherwise clearing
/// all response headers and closing silently.
#[derive(Clone, Copy, Debug)]
pub struct Terminate {
	/// The status to respond with, if any
	pub status: Option<u16>,
}

/// A requested protocol upgrade (spec §4.6 step 7
/// `DangerousChangeProtocol`, §4.7 `AlternateProtocol`): responds `101`
/// and stashes a marker so the driver knows to hand the raw stream to an
/// upgrade continuation after the context is released.
pub struct AlternateProtocolRequest {
	/// Free-form label identifying which upgrade was requested, e.g.
	/// `"websocket"`
	pub protocol: String,
}

/// The event passed to a [`Handler`]: connection info, the parsed
/// request, and write access to exactly one response-closing operation
/// (spec §3 `HttpEvent`, §4.6 step 7). All handles are cleared when the
/// event is dropped or [`HttpEvent::clear`] is called, enforcing that the
/// handler does not retain state past `handle` returning.
pub struct HttpEvent<'a> {
	/// Connection-level info, read-only
	pub connection: ConnectionInfo,
	/// The parsed request
	pub request: &'a HttpRequest,
	/// The response under construction
	pub response: &'a mut HttpResponse,
	body: &'a mut ResponseBody,
	/// Set when the handler calls [`HttpEvent::terminate`]
	pub terminate: Option<Terminate>,
	/// Set when the handler calls [`HttpEvent::change_protocol`]
	pub alternate_protocol: Option<AlternateProtocolRequest>,
	/// Cleared by the pipeline once it observes the compression flag; set
	/// via [`HttpEvent::disable_compression`]
	pub compression_disabled: bool,
}

impl<'a> HttpEvent<'a> {
	/// Build a new event borrowing the given request/response/body for
	/// the duration of one request
	pub fn new(
		connection: ConnectionInfo,
		request: &'a HttpRequest,
		response: &'a mut HttpResponse,
		body: &'a mut ResponseBody,
	) -> Self {
		Self {
			connection,
			request,
			response,
			body,
			terminate: None,
			alternate_protocol: None,
			compression_disabled: false,
		}
	}

	/// Respond with a status and no body. Setting a body more than once is
	/// an error (spec §4.6 step 7, §4.7).
	///
	/// # Errors
	/// Returns [`crate::response::BodyAlreadySetError`] if a body was
	/// already assigned.
	pub fn respond_status(
		&mut self,
		status: u16,
	) -> Result<(), crate::response::BodyAlreadySetError> {
		self.assign_body(status, ResponseBody::Unset)
	}

	/// Respond with a status, content type, and an in-memory body
	///
	/// # Errors
	/// Returns [`crate::response::BodyAlreadySetError`] if a body was
	/// already assigned.
	pub fn respond_memory(
		&mut self,
		status: u16,
		content_type: impl Into<String>,
		bytes: Vec<u8>,
	) -> Result<(), crate::response::BodyAlreadySetError> {
		self.response.add_header("Content-Type", content_type);
		self.assign_body(status, ResponseBody::Memory(bytes))
	}

	/// Respond with a status, content type, and a chunked body supplied as
	/// a sequence of already-available chunks
	///
	/// # Errors
	/// Returns [`crate::response::BodyAlreadySetError`] if a body was
	/// already assigned.
	pub fn respond_chunked(
		&mut self,
		status: u16,
		content_type: impl Into<String>,
		chunks: Vec<Vec<u8>>,
	) -> Result<(), crate::response::BodyAlreadySetError> {
		self.response.add_header("Content-Type", content_type);
		self.assign_body(status, ResponseBody::Chunked(chunks))
	}

	fn assign_body(
		&mut self,
		status: u16,
		body: ResponseBody,
	) -> Result<(), crate::response::BodyAlreadySetError> {
		if !matches!(*self.body, ResponseBody::Unset) {
			return Err(crate::response::BodyAlreadySetError);
		}
		self.response.status = status;
		*self.body = body;
		Ok(())
	}

	/// Disable response compression for this request only
	pub fn disable_compression(&mut self) {
		self.compression_disabled = true;
	}

	/// Request the connection be torn down after this request (spec §4.6
	/// step 8)
	pub fn terminate(&mut self, status: Option<u16>) {
		self.terminate = Some(Terminate { status });
	}

	/// Request a protocol upgrade (spec §4.6 step 7). The driver responds
	/// `101` and, after the context is released, hands the raw stream to
	/// the caller-supplied continuation.
	pub fn change_protocol(&mut self, protocol: impl Into<String>) {
		self.alternate_protocol = Some(AlternateProtocolRequest {
			protocol: protocol.into(),
		});
	}

	/// Clear all handles, enforcing that the handler does not retain
	/// state past `handle` returning (spec §9 "Lifetime of HttpEvent")
	pub fn clear(&mut self) {
		self.terminate = None;
		self.alternate_protocol = None;
	}
}

impl Drop for HttpEvent<'_> {
	fn drop(&mut self) {
		self.clear();
	}
}
