//! The transport reader: a zero-copy sliding window over a single pinned
//! binary buffer, used by the parser for line-oriented reads (spec §3
//! `TransportReader`, §4.4 pre-buffer + synchronous parse).

use std::time::Duration;

use tokio::{
	io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
	time::timeout,
};

use crate::error::TransportError;

/// A sliding window over a fixed binary buffer. `window_start` and
/// `window_end` bound the region of `buffer` holding unconsumed bytes read
/// from `stream` but not yet handed to the parser.
///
/// Outcome of [`TransportReader::read_line`], distinguishing a clean
/// remote close from a line that overran the parse buffer without a
/// terminator (spec §8).
#[derive(Debug, PartialEq, Eq)]
pub enum LineRead {
	/// A full line, terminator stripped
	Line(Vec<u8>),
	/// The remote end closed the connection before a full line arrived
	Closed,
	/// The buffer filled up without finding a line terminator
	TooLong,
}

/// Invariant: `0 <= window_start <= window_end <= buffer.len()`.
pub struct TransportReader<S> {
	stream: S,
	buffer: Vec<u8>,
	window_start: usize,
	window_end: usize,
	read_timeout: Option<Duration>,
	write_timeout: Option<Duration>,
}

impl<S> TransportReader<S>
where
	S: AsyncRead + Unpin,
{
	/// Build a reader over `stream` with a buffer of `capacity` bytes
	#[must_use]
	pub fn new(stream: S, capacity: usize) -> Self {
		Self {
			stream,
			buffer: vec![0; capacity],
			window_start: 0,
			window_end: 0,
			read_timeout: None,
			write_timeout: None,
		}
	}

	/// Set the timeout applied to the next and subsequent
	/// [`fill_buffer`](Self::fill_buffer) calls (spec §5: "read timeouts
	/// are set to a short active-connection window during parsing/writing,
	/// and to the keepalive window between requests"). `None` disables
	/// the timeout.
	pub fn set_read_timeout(&mut self, timeout: Option<Duration>) {
		self.read_timeout = timeout;
	}

	/// Set the timeout applied to the next and subsequent
	/// [`write_through`](Self::write_through) calls. `None` disables the
	/// timeout.
	pub fn set_write_timeout(&mut self, timeout: Option<Duration>) {
		self.write_timeout = timeout;
	}

	/// Number of unconsumed bytes currently sitting in the window
	#[must_use]
	pub const fn available(&self) -> usize {
		self.window_end - self.window_start
	}

	/// The unconsumed bytes, as a slice into the pinned buffer
	#[must_use]
	pub fn window(&self) -> &[u8] {
		&self.buffer[self.window_start..self.window_end]
	}

	/// Total capacity of the underlying buffer
	#[must_use]
	pub fn capacity(&self) -> usize {
		self.buffer.len()
	}

	/// Move `window_start` forward by `n` bytes, consuming them
	///
	/// # Panics
	/// Panics if `n` would move `window_start` past `window_end`.
	pub fn advance(&mut self, n: usize) {
		assert!(
			self.window_start + n <= self.window_end,
			"advance past window_end"
		);
		self.window_start += n;
	}

	/// Read into `[window_end..capacity)`, advancing `window_end` by the
	/// number of bytes read. Returns `0` if the buffer has no remaining
	/// space (the caller should [`compact`](Self::compact) first) or if the
	/// remote end closed the connection.
	///
	/// # Errors
	/// Returns [`TransportError::Io`] if the underlying read fails, or
	/// [`TransportError::Timeout`] if [`set_read_timeout`](Self::set_read_timeout)
	/// has been set and the read does not complete in time.
	pub async fn fill_buffer(&mut self) -> Result<usize, TransportError> {
		if self.window_end >= self.buffer.len() {
			return Ok(0);
		}

		let read_fut = self.stream.read(&mut self.buffer[self.window_end..]);
		let n = match self.read_timeout {
			Some(d) => timeout(d, read_fut).await.map_err(|_| TransportError::Timeout)??,
			None => read_fut.await?,
		};
		self.window_end += n;
		Ok(n)
	}

	/// Move `[window_start..window_end)` to the front of the buffer and
	/// reset `window_start` to `0`, reclaiming space for another
	/// [`fill_buffer`](Self::fill_buffer) call
	pub fn compact_buffer_window(&mut self) {
		if self.window_start == 0 {
			return;
		}

		self.buffer.copy_within(self.window_start..self.window_end, 0);
		self.window_end -= self.window_start;
		self.window_start = 0;
	}

	/// Read one CRLF- or LF-terminated line from the window, filling the
	/// buffer as needed (spec §8: a line that exactly fills the parse
	/// buffer without a terminator is a parse failure, distinct from the
	/// remote end closing the connection).
	///
	/// # Errors
	/// Returns [`TransportError::Io`] if the underlying read fails.
	pub async fn read_line(&mut self) -> Result<LineRead, TransportError> {
		loop {
			if let Some(pos) = self.window().iter().position(|&b| b == b'\n') {
				let mut line = self.window()[..pos].to_vec();
				if line.last() == Some(&b'\r') {
					line.pop();
				}
				self.advance(pos + 1);
				return Ok(LineRead::Line(line));
			}

			if self.window_end >= self.buffer.len() {
				self.compact_buffer_window();
				if self.window_end >= self.buffer.len() {
					// The line is longer than the buffer: distinct from a
					// closed connection, the caller should treat this as a
					// parse failure (431), not a socket abort.
					return Ok(LineRead::TooLong);
				}
			}

			if self.fill_buffer().await? == 0 {
				return Ok(LineRead::Closed);
			}
		}
	}

	/// Consume and return up to `len` unconsumed bytes from the window
	/// without any further transport reads; used to seed the entity-body
	/// init-data buffer with bytes that arrived alongside the headers
	/// (spec §4.5 phase 3)
	pub fn take_prefix(&mut self, len: usize) -> Vec<u8> {
		let n = len.min(self.available());
		let prefix = self.window()[..n].to_vec();
		self.advance(n);
		prefix
	}

	/// Read the full entity body given `prefix` (bytes already sitting in
	/// the window past the header terminator, see
	/// [`TransportReader::take_prefix`]) and the request's
	/// `Content-Length`, pulling any remaining bytes from the transport
	/// (spec §4.6 step 6: "Initialize the request body (may read/buffer)")
	///
	/// # Errors
	/// Returns [`TransportError::Io`] if the underlying read fails.
	pub async fn read_body(&mut self, prefix: Vec<u8>, total_len: u64) -> Result<Vec<u8>, TransportError> {
		let total_len = usize::try_from(total_len).unwrap_or(usize::MAX);
		let mut body = prefix;

		while body.len() < total_len {
			if self.available() == 0 {
				self.compact_buffer_window();
				if self.fill_buffer().await? == 0 {
					break;
				}
			}

			let take = (total_len - body.len()).min(self.available());
			body.extend_from_slice(&self.window()[..take]);
			self.advance(take);
		}

		Ok(body)
	}

	/// Regain access to the underlying stream, e.g. for an alternate
	/// protocol upgrade
	pub fn into_inner(self) -> S {
		self.stream
	}
}

impl<S> TransportReader<S>
where
	S: AsyncWrite + Unpin,
{
	/// Write directly to the wrapped stream, bypassing the read-side
	/// window entirely. Used by the response pipeline, which writes on
	/// the same stream this reader reads from.
	///
	/// # Errors
	/// Returns [`TransportError::Io`] if the underlying write fails, or
	/// [`TransportError::Timeout`] if
	/// [`set_write_timeout`](Self::set_write_timeout) has been set and the
	/// write does not complete in time.
	pub async fn write_through(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
		let write_fut = self.stream.write_all(bytes);
		match self.write_timeout {
			Some(d) => timeout(d, write_fut).await.map_err(|_| TransportError::Timeout)??,
			None => write_fut.await?,
		}
		Ok(())
	}
}
