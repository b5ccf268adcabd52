//! The HTTP/1.1 parser (spec §4.5): three phases, each able to short
//! circuit with a [`ParseError`] carrying the response status (or, at
//! `>= 1000`, a socket-level abort).

use tokio::io::AsyncRead;

use crate::{
	config::HttpConfig,
	error::ParseError,
	reader::{LineRead, TransportReader},
	request::{ContentType, HttpRange, Method, RequestState, Version},
};

const SUPPORTED_METHODS: &[(&str, Method)] = &[
	("GET", Method::Get),
	("HEAD", Method::Head),
	("POST", Method::Post),
	("PUT", Method::Put),
	("DELETE", Method::Delete),
	("CONNECT", Method::Connect),
	("OPTIONS", Method::Options),
	("TRACE", Method::Trace),
	("PATCH", Method::Patch),
];

fn trim_crlf(bytes: &[u8]) -> &[u8] {
	let mut s = bytes;
	while s.last() == Some(&b'\r') || s.last() == Some(&b'\n') {
		s = &s[..s.len() - 1];
	}
	s
}

/// Outcome of phase 1 for the target token: either an absolute URI, or an
/// origin-form path + query to be combined with `Host` later (spec §4.5
/// phase 1)
enum ParsedTarget {
	Absolute(String),
	Origin { path: String, query: Option<String> },
}

fn parse_target(target: &str) -> Option<ParsedTarget> {
	if target.contains("://") {
		Some(ParsedTarget::Absolute(target.to_string()))
	} else if let Some(rest) = target.strip_prefix('/') {
		let full = format!("/{rest}");
		let (path, query) = match full.split_once('?') {
			Some((p, q)) => (p.to_string(), Some(q.to_string())),
			None => (full, None),
		};
		Some(ParsedTarget::Origin { path, query })
	} else {
		None
	}
}

/// Phase 1 — parse the request line into `state`. Returns `Ok(())` on
/// success or `Ok(Some(status))`... actually returns `Err` carrying the
/// status per the spec's "0 = continue, status otherwise" contract.
fn parse_request_line(line: &[u8], is_tls: bool, state: &mut RequestState) -> Result<(), ParseError> {
	let line = trim_crlf(line);
	let line = std::str::from_utf8(line).map_err(|_| ParseError::status(400))?;

	let mut parts = line.splitn(3, ' ');
	let method_token = parts.next().ok_or_else(|| ParseError::status(400))?;
	let target = parts.next().ok_or_else(|| ParseError::status(400))?;
	let version_token = parts.next().ok_or_else(|| ParseError::status(400))?;

	let method = SUPPORTED_METHODS
		.iter()
		.find(|(name, _)| *name == method_token)
		.map(|(_, m)| *m)
		.ok_or_else(|| ParseError::status(405))?;

	let version = match version_token {
		"HTTP/1.1" => Version::Http11,
		"HTTP/1.0" => Version::Http10,
		_ => return Err(ParseError::status(505)),
	};

	let parsed_target = parse_target(target).ok_or_else(|| ParseError::status(400))?;

	state.method = Some(method);
	state.version = Some(version);
	state.keepalive = version.default_keepalive();

	match parsed_target {
		ParsedTarget::Absolute(uri) => state.uri = Some(uri),
		ParsedTarget::Origin { path, query } => {
			state.path = Some(path);
			state.query = query;
			let _ = is_tls;
		}
	}

	Ok(())
}

fn parse_content_type(value: &str) -> ContentType {
	let mut parts = value.split(';').map(str::trim);
	let media_type = parts.next().unwrap_or_default().to_string();
	let mut charset = None;
	let mut boundary = None;

	for param in parts {
		if let Some(v) = param.strip_prefix("charset=") {
			charset = Some(v.trim_matches('"').to_string());
		} else if let Some(v) = param.strip_prefix("boundary=") {
			boundary = Some(v.trim_matches('"').to_string());
		}
	}

	ContentType {
		media_type,
		charset,
		boundary,
	}
}

/// Extract the host component (without port, lowercased) from an
/// absolute-form request-target's authority, e.g. `http://Example.com:8080/x`
/// -> `example.com`. Returns `None` if `uri` has no `scheme://` prefix.
fn uri_authority_host(uri: &str) -> Option<String> {
	let after_scheme = uri.split_once("://")?.1;
	let authority_end = after_scheme.find(['/', '?', '#']).unwrap_or(after_scheme.len());
	let authority = &after_scheme[..authority_end];
	let authority = authority.rsplit_once('@').map_or(authority, |(_, h)| h);

	let host = if let Some(rest) = authority.strip_prefix('[') {
		rest.split_once(']').map_or(authority, |(h, _)| h)
	} else {
		match authority.rsplit_once(':') {
			Some((h, p)) if !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()) => h,
			_ => authority,
		}
	};

	Some(host.to_ascii_lowercase())
}

fn parse_range(value: &str) -> Option<HttpRange> {
	let spec = value.strip_prefix("bytes=")?;
	let (start, end) = spec.split_once('-')?;

	if start.is_empty() {
		let b: u64 = end.parse().ok()?;
		Some(HttpRange::FromEnd(b))
	} else if end.is_empty() {
		let a: u64 = start.parse().ok()?;
		Some(HttpRange::FromStart(a))
	} else {
		let a: u64 = start.parse().ok()?;
		let b: u64 = end.parse().ok()?;
		if a > b {
			None
		} else {
			Some(HttpRange::FullRange(a, b))
		}
	}
}

/// Phase 2 result: whether the known-length prefix already sitting past
/// the header terminator should be routed into the entity body (phase 3
/// reads it via [`TransportReader::take_prefix`])
struct HeaderOutcome {
	transfer_encoding_chunked: bool,
}

#[allow(clippy::too_many_lines)]
fn dispatch_header(
	name: &str,
	value: &str,
	state: &mut RequestState,
	headers: &mut Vec<(String, String)>,
	cookies: &mut std::collections::HashMap<String, String>,
	accept: &mut Vec<String>,
	accept_language: &mut Vec<String>,
	outcome: &mut HeaderOutcome,
) -> Result<(), ParseError> {
	match name.to_ascii_lowercase().as_str() {
		"connection" => {
			if value.to_ascii_lowercase().contains("close") {
				state.keepalive = false;
			}
			headers.push((name.to_string(), value.to_string()));
		}
		"content-type" => {
			let ct = parse_content_type(value);
			if ct.media_type.is_empty() {
				return Err(ParseError::status(415));
			}
			state.content_type = Some(ct);
		}
		"content-length" => {
			if state.content_length.is_some() {
				return Err(ParseError::status(400));
			}
			let len: u64 = value.trim().parse().map_err(|_| ParseError::status(400))?;
			state.content_length = Some(len);
		}
		"host" => {
			let (host, port) = match value.rsplit_once(':') {
				Some((h, p)) if p.chars().all(|c| c.is_ascii_digit()) && !p.is_empty() => {
					(h.to_string(), p.parse().ok())
				}
				_ => (value.to_string(), None),
			};

			if let Some(uri) = &state.uri {
				if uri_authority_host(uri).is_some_and(|uri_host| uri_host != host.to_ascii_lowercase()) {
					return Err(ParseError::status(400));
				}
			}

			state.host = Some(host);
			state.host_port = port;
		}
		"cookie" => {
			for pair in value.split("; ") {
				if let Some((k, v)) = pair.split_once('=') {
					cookies.entry(k.to_string()).or_insert_with(|| v.to_string());
				}
			}
		}
		"accept" => {
			accept.extend(value.split(',').map(|s| s.trim().to_string()));
		}
		"accept-language" => {
			accept_language.extend(value.split(',').map(|s| s.trim().to_string()));
		}
		"referer" => {
			if value.contains("://") {
				state.referer = Some(value.to_string());
			}
		}
		"range" => {
			if state.method == Some(Method::Get) {
				state.range = parse_range(value);
			}
		}
		"user-agent" => {
			state.user_agent = Some(value.trim().to_string());
		}
		"origin" => {
			if value.contains("://") {
				state.origin = Some(value.to_string());
			}
		}
		"expect" => {
			state.expect_continue = value.eq_ignore_ascii_case("100-continue");
		}
		"transfer-encoding" => {
			if value.eq_ignore_ascii_case("chunked") {
				outcome.transfer_encoding_chunked = true;
			}
			headers.push((name.to_string(), value.to_string()));
		}
		_ => headers.push((name.to_string(), value.to_string())),
	}

	Ok(())
}

/// Run all three parser phases against `reader`, populating `request`.
/// Returns `Ok(())` on success (status `0`, "continue"); `Err` carries the
/// status to respond with, or a socket-level abort (spec §4.5).
///
/// # Errors
/// See [`ParseError`].
pub async fn parse<S: AsyncRead + Unpin>(
	reader: &mut TransportReader<S>,
	state: &mut RequestState,
	headers: &mut Vec<(String, String)>,
	cookies: &mut std::collections::HashMap<String, String>,
	accept: &mut Vec<String>,
	accept_language: &mut Vec<String>,
	config: &HttpConfig,
	is_tls: bool,
) -> Result<Option<Vec<u8>>, ParseError> {
	// Phase 1: request line.
	let line = match reader.read_line().await.map_err(|_| ParseError::socket_abort())? {
		LineRead::Line(line) => line,
		LineRead::Closed => return Err(ParseError::socket_abort()),
		LineRead::TooLong => return Err(ParseError::status(431)),
	};

	parse_request_line(&line, is_tls, state)?;

	// Phase 2: headers.
	let mut outcome = HeaderOutcome {
		transfer_encoding_chunked: false,
	};
	let mut header_count = 0u32;

	loop {
		let line = match reader.read_line().await.map_err(|_| ParseError::socket_abort())? {
			LineRead::Line(line) => line,
			LineRead::Closed => return Err(ParseError::socket_abort()),
			LineRead::TooLong => return Err(ParseError::status(431)),
		};

		if line.is_empty() {
			break;
		}

		if line.first().is_some_and(u8::is_ascii_whitespace) {
			continue;
		}

		header_count += 1;
		if header_count > config.max_request_header_count {
			return Err(ParseError::status(431));
		}

		let Some(colon) = line.iter().position(|&b| b == b':') else {
			return Err(ParseError::status(400));
		};

		let name = std::str::from_utf8(trim_crlf(&line[..colon]))
			.map_err(|_| ParseError::status(400))?
			.trim()
			.to_string();
		let value = std::str::from_utf8(trim_crlf(&line[colon + 1..]))
			.map_err(|_| ParseError::status(400))?
			.trim()
			.to_string();

		dispatch_header(
			&name,
			&value,
			state,
			headers,
			cookies,
			accept,
			accept_language,
			&mut outcome,
		)?;
	}

	let version = state.version.ok_or_else(|| ParseError::status(400))?;

	if version == Version::Http11 && state.host.is_none() {
		return Err(ParseError::status(400));
	}

	// Reconstruct the final URI.
	if state.uri.is_none() {
		let scheme = if is_tls { "https" } else { "http" };
		let host = state.host.clone().ok_or_else(|| ParseError::status(400))?;
		let path = state.path.clone().ok_or_else(|| ParseError::status(400))?;

		if host.is_empty() || path.is_empty() {
			return Err(ParseError::status(400));
		}

		let mut uri = format!("{scheme}://{host}{path}");
		if let Some(q) = &state.query {
			uri.push('?');
			uri.push_str(q);
		}
		state.uri = Some(uri);
	}

	// Phase 3: entity-body preparation.
	let method = state.method.expect("method set in phase 1");

	if let Some(ct) = &state.content_type {
		if ct.is_multipart() {
			if let Some(len) = state.content_length {
				if len > config.multipart_max_size {
					return Err(ParseError::status(413));
				}
			}
		}
	}

	if method.forbids_entity_body() && state.content_length.is_some_and(|l| l > 0) {
		return Err(ParseError::status(400));
	}

	if outcome.transfer_encoding_chunked {
		if version != Version::Http11 {
			return Err(ParseError::status(400));
		}
		if state.content_length.is_some() {
			return Err(ParseError::status(400));
		}
		// Chunked request reception is unimplemented in this version
		// (spec §4.5 phase 3, §9 open question).
		return Err(ParseError::status(501));
	}

	if let Some(len) = state.content_length {
		if len > config.max_entity_size {
			return Err(ParseError::status(413));
		}
		if len > 0 {
			state.has_body = true;
			let prefix_len = usize::try_from(len).unwrap_or(usize::MAX);
			let prefix = reader.take_prefix(prefix_len);
			return Ok(Some(prefix));
		}
	}

	Ok(None)
}
