//! The response pipeline: header accumulation, chunked/length-delimited
//! body writing, and the compression hand-off (spec §3 `HttpResponse`,
//! `ResponseBody`; §4.6).

use std::{
	io,
	pin::Pin,
	task::{Context, Poll},
};

use async_compression::tokio::write::{BrotliEncoder, GzipEncoder, ZstdEncoder};
use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{config::CompressionConfig, error::TransportError};

/// A single-assignment body (spec §3 `ResponseBody`): either no body, an
/// in-memory buffer of known length, or a sequence of already-available
/// chunks written with chunked transfer-encoding framing. Assigning twice
/// is an error (spec §4.6 step 7, §4.7).
pub enum ResponseBody {
	/// No body has been assigned; forces `Content-Length: 0` if the
	/// response is sent this way
	Unset,
	/// A body of known length, read from memory
	Memory(Vec<u8>),
	/// A body of unknown length, written as chunks as it becomes available
	Chunked(Vec<Vec<u8>>),
}

impl Default for ResponseBody {
	fn default() -> Self {
		Self::Unset
	}
}

/// Error returned when a [`ResponseBody`] or status is assigned more than
/// once (spec §4.7: "second transition is an error")
#[derive(Debug, thiserror::Error)]
#[error("response body already assigned")]
pub struct BodyAlreadySetError;

/// The content types response compression is allowed to engage for (spec
/// §4.6: "the chosen content-type is compressible")
fn is_compressible(content_type: &str) -> bool {
	let ct = content_type.split(';').next().unwrap_or(content_type).trim();
	ct.starts_with("text/")
		|| matches!(
			ct,
			"application/json"
				| "application/javascript"
				| "application/xml"
				| "image/svg+xml"
		)
}

/// Which compression codec the response pipeline negotiated with the
/// client's `Accept-Encoding`, in the order §4.6 prefers them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
	/// `Content-Encoding: gzip`
	Gzip,
	/// `Content-Encoding: br`
	Brotli,
	/// `Content-Encoding: zstd`
	Zstd,
}

impl Encoding {
	/// Pick the best encoding this engine supports from a client's
	/// `Accept-Encoding` header value
	#[must_use]
	pub fn negotiate(accept_encoding: &str) -> Option<Self> {
		let lower = accept_encoding.to_ascii_lowercase();
		if lower.contains("br") {
			Some(Self::Brotli)
		} else if lower.contains("zstd") {
			Some(Self::Zstd)
		} else if lower.contains("gzip") {
			Some(Self::Gzip)
		} else {
			None
		}
	}

	/// The `Content-Encoding` token for this codec
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Gzip => "gzip",
			Self::Brotli => "br",
			Self::Zstd => "zstd",
		}
	}
}

/// Decide whether a response of `content_type` and `len` bytes should be
/// compressed under `config`, given whether the caller disabled compression
/// for this request (spec §4.6: "the context's per-request 'disable
/// compression' flag is clear")
#[must_use]
pub fn should_compress(config: &CompressionConfig, disabled: bool, content_type: &str, len: u64) -> bool {
	config.enabled
		&& !disabled
		&& is_compressible(content_type)
		&& len >= config.min_size
		&& len <= config.max_size
}

/// An `AsyncWrite` view onto a pinned [`BytesMut`] scratch buffer, letting
/// `async-compression`'s encoders write into the connection's reused
/// compressor buffer instead of a freshly allocated one per call.
struct ScratchWriter<'a>(&'a mut BytesMut);

impl AsyncWrite for ScratchWriter<'_> {
	fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
		self.get_mut().0.extend_from_slice(buf);
		Poll::Ready(Ok(buf.len()))
	}

	fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
		Poll::Ready(Ok(()))
	}

	fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
		Poll::Ready(Ok(()))
	}
}

/// Compress `body` with `encoding`, driven through `async-compression`'s
/// encoders writing into `scratch` — the context's pinned compressor
/// buffer (spec §4.3), reused across requests instead of allocating a
/// fresh output buffer per call. `scratch` is cleared first and holds the
/// compressed bytes on return (spec §4.6: "the compressor is released at
/// EndRequest" — here that's simply dropping the encoder; `scratch`
/// itself is freed by [`crate::buffers::ContextLockedBufferManager::release`]).
///
/// # Errors
/// Returns [`TransportError::Io`] if the in-memory encoder fails, which can
/// only happen from an allocation failure.
pub async fn compress(
	encoding: Encoding,
	body: &[u8],
	scratch: &mut BytesMut,
) -> Result<Vec<u8>, TransportError> {
	scratch.clear();

	match encoding {
		Encoding::Gzip => {
			let mut enc = GzipEncoder::new(ScratchWriter(scratch));
			enc.write_all(body).await?;
			enc.shutdown().await?;
		}
		Encoding::Brotli => {
			let mut enc = BrotliEncoder::new(ScratchWriter(scratch));
			enc.write_all(body).await?;
			enc.shutdown().await?;
		}
		Encoding::Zstd => {
			let mut enc = ZstdEncoder::new(ScratchWriter(scratch));
			enc.write_all(body).await?;
			enc.shutdown().await?;
		}
	}

	Ok(scratch.to_vec())
}

/// The outbound response: status, headers, and cookies (spec §3
/// `HttpResponse`). Once headers are flushed they are immutable for the
/// remainder of the exchange.
#[derive(Debug, Default)]
pub struct HttpResponse {
	/// The status code to send
	pub status: u16,
	/// Response headers in insertion order
	pub headers: Vec<(String, String)>,
	/// `Set-Cookie` values, one per cookie
	pub cookies: Vec<String>,
	headers_flushed: bool,
}

impl HttpResponse {
	/// Append a header. No-op (silently dropped) once headers have been
	/// flushed.
	pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
		if self.headers_flushed {
			return;
		}
		self.headers.push((name.into(), value.into()));
	}

	/// Add a `Set-Cookie` value
	pub fn add_cookie(&mut self, cookie: impl Into<String>) {
		if self.headers_flushed {
			return;
		}
		self.cookies.push(cookie.into());
	}

	/// Render the status line and headers into the given accumulator
	/// buffer, then mark headers as flushed
	pub fn write_head(&mut self, version: &str, accumulator: &mut Vec<u8>) {
		accumulator.clear();
		accumulator.extend_from_slice(
			format!(
				"{version} {} {}\r\n",
				self.status,
				reason_phrase(self.status)
			)
			.as_bytes(),
		);

		for (name, value) in &self.headers {
			accumulator.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
		}

		for cookie in &self.cookies {
			accumulator.extend_from_slice(format!("Set-Cookie: {cookie}\r\n").as_bytes());
		}

		accumulator.extend_from_slice(b"\r\n");
		self.headers_flushed = true;
	}

	/// Clear every response header, as happens when a handler's
	/// termination signal carries no status (spec §4.6 step 8)
	pub fn clear_headers(&mut self) {
		self.headers.clear();
		self.cookies.clear();
	}

	/// Reset to the default, unsent state (per-request reset in
	/// `EndRequest`)
	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

/// Write `body` to `writer`, length-delimited (the `Content-Length` header
/// must already have been written by the caller)
///
/// # Errors
/// Returns [`TransportError::Io`] if the write fails.
pub async fn write_length_delimited<W: AsyncWrite + Unpin>(
	writer: &mut W,
	body: &[u8],
) -> Result<(), TransportError> {
	writer.write_all(body).await?;
	Ok(())
}

/// Write `chunks` using HTTP/1.1 chunked transfer-coding framing: `hex
/// CRLF data CRLF`, terminated by `0 CRLF CRLF` (spec §6 wire protocol)
///
/// # Errors
/// Returns [`TransportError::Io`] if the write fails.
pub async fn write_chunked<W: AsyncWrite + Unpin>(
	writer: &mut W,
	chunks: &[Vec<u8>],
) -> Result<(), TransportError> {
	for chunk in chunks {
		if chunk.is_empty() {
			continue;
		}
		writer.write_all(format!("{:x}\r\n", chunk.len()).as_bytes()).await?;
		writer.write_all(chunk).await?;
		writer.write_all(b"\r\n").await?;
	}
	writer.write_all(b"0\r\n\r\n").await?;
	Ok(())
}

/// The standard reason phrase for a status code this engine produces
/// itself; unrecognized codes fall back to `"Unknown"`
#[must_use]
pub const fn reason_phrase(status: u16) -> &'static str {
	match status {
		100 => "Continue",
		101 => "Switching Protocols",
		200 => "OK",
		204 => "No Content",
		206 => "Partial Content",
		301 => "Moved Permanently",
		302 => "Found",
		304 => "Not Modified",
		400 => "Bad Request",
		403 => "Forbidden",
		404 => "Not Found",
		405 => "Method Not Allowed",
		408 => "Request Timeout",
		413 => "Payload Too Large",
		415 => "Unsupported Media Type",
		417 => "Expectation Failed",
		431 => "Request Header Fields Too Large",
		500 => "Internal Server Error",
		501 => "Not Implemented",
		503 => "Service Unavailable",
		505 => "HTTP Version Not Supported",
		_ => "Unknown",
	}
}
