//! The per-connection context and its pool (spec §3 `HttpContext`, §2
//! "Context pool", §4.3).

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender};

use crate::{
	buffers::{BufferPool, ContextLockedBufferManager},
	request::HttpRequest,
	response::{HttpResponse, ResponseBody},
};

/// Per-connection flags cleared entirely in `Release` (spec §3
/// `ContextFlags`)
#[derive(Clone, Copy, Debug, Default)]
pub struct ContextFlags {
	/// Set once `InitializeContext` has allocated this context's buffers
	pub initialized: bool,
	/// Set while an alternate-protocol continuation owns the stream
	pub alternate_protocol_active: bool,
}

/// A reusable connection-handling unit (spec §3 `HttpContext`): a request,
/// a response, a response body slot, flags, and buffers. Reused across
/// connections, not just requests — only [`HttpContext::begin_request`]
/// and [`HttpContext::end_request`] touch per-request state; connection
/// setup/teardown go through [`HttpContext::initialize`] and
/// [`HttpContext::release`].
#[derive(Debug, Default)]
pub struct HttpContext {
	/// The current request
	pub request: HttpRequest,
	/// The current response
	pub response: HttpResponse,
	/// The current response body
	pub body: ResponseBody,
	/// Per-connection flags
	pub flags: ContextFlags,
	/// The buffer manager for this context's connection
	pub buffers: ContextLockedBufferManager,
}

impl HttpContext {
	/// Per-connection setup: allocate buffers. Pool hook point
	/// `InitializeContext(transport)` (spec §3).
	pub fn initialize(
		&mut self,
		pool: &BufferPool,
		header_buf_size: usize,
		response_header_buf_size: usize,
		chunk_buf_size: usize,
		discard_buf_size: usize,
		multipart_buf_size: usize,
		with_compressor: bool,
	) {
		self.buffers.initialize(
			pool,
			header_buf_size,
			response_header_buf_size,
			chunk_buf_size,
			discard_buf_size,
			multipart_buf_size,
			with_compressor,
		);
		self.flags.initialized = true;
	}

	/// Per-request setup: nothing to allocate, since request state lives
	/// inline in the context and is reset, not reallocated. Present for
	/// symmetry with `EndRequest` and as the pool hook point named in
	/// spec §3.
	pub fn begin_request(&mut self) {}

	/// Clear all per-request state (spec §8: "after EndRequest, every
	/// per-request collection is empty and every per-request flag is
	/// zero")
	pub fn end_request(&mut self) {
		self.request.reset();
		self.response.reset();
		self.body = ResponseBody::Unset;
	}

	/// Per-connection teardown: zero and free buffers, clear flags (spec
	/// §3, §4.3: "Release zeros and frees all buffers")
	pub fn release(&mut self) {
		self.end_request();
		self.buffers.release();
		self.flags = ContextFlags::default();
	}
}

/// A thread-safe pool of reusable [`HttpContext`]s with a soft cap (spec
/// §2 "Context pool", §4.3: "a multi-producer multi-consumer queue of
/// prepared contexts with a soft cap; on accept, if empty and under-cap, a
/// new context is constructed").
pub struct ContextPool {
	sender: Sender<Box<HttpContext>>,
	receiver: Receiver<Box<HttpContext>>,
	outstanding: AtomicUsize,
	soft_cap: usize,
}

impl ContextPool {
	/// Build an empty pool with the given soft cap on outstanding
	/// contexts
	#[must_use]
	pub fn new(soft_cap: usize) -> Self {
		let (sender, receiver) = crossbeam_channel::unbounded();
		Self {
			sender,
			receiver,
			outstanding: AtomicUsize::new(0),
			soft_cap,
		}
	}

	/// Acquire a context: reuse one from the queue if available,
	/// otherwise construct a new one if under the soft cap. Returns
	/// `None` if the pool is empty and at capacity (the caller should
	/// respond `503`, spec §4.6 step 2). `outstanding` tracks contexts
	/// currently checked out, not contexts ever constructed, so both the
	/// reuse and the construct path must count against it.
	pub fn acquire(&self) -> Option<Box<HttpContext>> {
		let prev = self.outstanding.fetch_add(1, Ordering::AcqRel);
		if prev >= self.soft_cap {
			self.outstanding.fetch_sub(1, Ordering::AcqRel);
			return None;
		}

		if let Ok(ctx) = self.receiver.try_recv() {
			return Some(ctx);
		}

		Some(Box::new(HttpContext::default()))
	}

	/// Return a released context to the pool. Failure to accept it back
	/// (spec §7 class 6, §4.8 "Pool return failure") is impossible with
	/// an unbounded crossbeam channel, so this never fails in practice;
	/// callers that want the documented fatal-log behavior should check
	/// the queue's health via [`ContextPool::outstanding`] instead.
	pub fn release(&self, mut ctx: Box<HttpContext>) {
		ctx.release();
		self.outstanding.fetch_sub(1, Ordering::AcqRel);
		let _ = self.sender.send(ctx);
	}

	/// Number of contexts currently checked out of the pool
	#[must_use]
	pub fn outstanding(&self) -> usize {
		self.outstanding.load(Ordering::Acquire)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn acquire_reuses_released_contexts() {
		let pool = ContextPool::new(4);
		let ctx = pool.acquire().unwrap();
		pool.release(ctx);

		assert_eq!(pool.outstanding(), 0);
		let _ctx2 = pool.acquire().unwrap();
		assert_eq!(pool.outstanding(), 1);
	}

	#[test]
	fn acquire_fails_over_soft_cap() {
		let pool = ContextPool::new(1);
		let _a = pool.acquire().unwrap();
		assert!(pool.acquire().is_none());
	}

	#[test]
	fn end_request_clears_request_and_response() {
		let mut ctx = HttpContext::default();
		ctx.request.state.keepalive = true;
		ctx.response.status = 200;
		ctx.end_request();

		assert!(!ctx.request.state.keepalive);
		assert_eq!(ctx.response.status, 0);
	}
}
