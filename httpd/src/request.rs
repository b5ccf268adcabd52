//! The parsed request view (spec §3 `HttpRequest`): mutable per-request
//! state populated by the parser, read-only once handed to the handler.

use std::{collections::HashMap, net::SocketAddr};

use strum::{Display as EnumDisplay, EnumString};

/// HTTP method, matched as an exact literal against the supported set
/// (spec §4.5 phase 1); anything else is rejected with `405`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, EnumDisplay)]
pub enum Method {
	/// `GET`
	Get,
	/// `HEAD`
	Head,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
	/// `CONNECT`
	Connect,
	/// `OPTIONS`
	Options,
	/// `TRACE`
	Trace,
	/// `PATCH`
	Patch,
}

impl Method {
	/// Methods for which a non-zero `Content-Length` is a parse error
	/// (spec §4.5 phase 3)
	#[must_use]
	pub const fn forbids_entity_body(self) -> bool {
		matches!(self, Self::Get | Self::Head | Self::Trace)
	}
}

/// The HTTP version named in the request line (spec §4.5 phase 1)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Version {
	/// `HTTP/1.0`
	Http10,
	/// `HTTP/1.1`
	Http11,
}

impl Version {
	/// Keepalive is provisionally enabled iff the version is `HTTP/1.1`
	#[must_use]
	pub const fn default_keepalive(self) -> bool {
		matches!(self, Self::Http11)
	}
}

/// A parsed `Range` header (spec §4.5 phase 2 dispatch table, §8 round-trip)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpRange {
	/// `bytes=A-B`
	FullRange(u64, u64),
	/// `bytes=-B`, the last `B` bytes
	FromEnd(u64),
	/// `bytes=A-`, from `A` to the end
	FromStart(u64),
}

/// The outcome of parsing a `Content-Type` header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentType {
	/// The media type, e.g. `text/plain` or `multipart/form-data`
	pub media_type: String,
	/// The `charset` parameter, if present
	pub charset: Option<String>,
	/// The `boundary` parameter, used for `multipart/form-data`
	pub boundary: Option<String>,
}

impl ContentType {
	/// Whether this is a `multipart/form-data` body. The parser only uses
	/// this to size-cap the body (§4.5 phase 3); splitting it into parts
	/// is not implemented, so handlers that need individual form fields
	/// or uploaded files must parse `HttpRequest::body` themselves.
	#[must_use]
	pub fn is_multipart(&self) -> bool {
		self.media_type.eq_ignore_ascii_case("multipart/form-data")
	}
}

/// Per-request mutable state populated across the parser's three phases
/// (spec §3 `RequestState`). Cleared entirely in `EndRequest` (see
/// [`RequestState::reset`]).
#[derive(Clone, Debug, Default)]
pub struct RequestState {
	/// The request method
	pub method: Option<Method>,
	/// The HTTP version
	pub version: Option<Version>,
	/// The reconstructed absolute URI
	pub uri: Option<String>,
	/// The request path, everything up to `?`
	pub path: Option<String>,
	/// The query string, everything after `?`
	pub query: Option<String>,
	/// Whether the connection should be kept alive after this response
	pub keepalive: bool,
	/// Parsed `Content-Type`
	pub content_type: Option<ContentType>,
	/// Parsed `Content-Length`
	pub content_length: Option<u64>,
	/// The `Host` header value, with port split off if present
	pub host: Option<String>,
	/// The port parsed from `Host`, if present
	pub host_port: Option<u16>,
	/// Parsed `Range`
	pub range: Option<HttpRange>,
	/// Set iff `Expect: 100-continue` was sent
	pub expect_continue: bool,
	/// Parsed `Referer`, if valid
	pub referer: Option<String>,
	/// Parsed `Origin`, if valid
	pub origin: Option<String>,
	/// Trimmed `User-Agent`
	pub user_agent: Option<String>,
	/// The connecting peer's address
	pub remote_addr: Option<SocketAddr>,
	/// Whether the request carries an entity body to read
	pub has_body: bool,
}

impl RequestState {
	/// Clear all per-request state, as done in `EndRequest` (spec §3, §8:
	/// "after EndRequest, every per-request collection is empty and every
	/// per-request flag is zero")
	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

/// A parsed HTTP/1.1 request, owned by a pooled [`HttpContext`](crate::context::HttpContext)
/// and valid only between `BeginRequest` and `EndRequest`
#[derive(Clone, Debug, Default)]
pub struct HttpRequest {
	/// Mutable state populated by the parser
	pub state: RequestState,
	/// Headers not recognized by the parser's dispatch table, preserved
	/// verbatim in insertion order
	pub headers: Vec<(String, String)>,
	/// Cookies parsed from the `Cookie` header, first occurrence wins on
	/// duplicate names (spec §4.5 phase 2, §9 open question)
	pub cookies: HashMap<String, String>,
	/// `Accept` header, split on `,` and trimmed
	pub accept: Vec<String>,
	/// `Accept-Language` header, split on `,` and trimmed
	pub accept_language: Vec<String>,
	/// Raw entity body bytes, populated by [`crate::dispatch`] before the
	/// handler runs
	pub body: Vec<u8>,
}

impl HttpRequest {
	/// Clear all per-request fields, delegating to [`RequestState::reset`]
	/// for the scalar state and clearing every collection
	pub fn reset(&mut self) {
		self.state.reset();
		self.headers.clear();
		self.cookies.clear();
		self.accept.clear();
		self.accept_language.clear();
		self.body.clear();
	}

	/// Look up a header not recognized by the parser's dispatch table,
	/// case-insensitively
	#[must_use]
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}
}
