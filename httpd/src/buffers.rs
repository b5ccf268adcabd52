//! The memory pool and the per-connection buffer manager (spec §3 `Buffers
//! (ContextLockedBufferManager)`, §4.3).
//!
//! Unlike the source this specification distills, this implementation has
//! no unsafe code and does not expose raw pointers: each buffer region is
//! an owned, heap-allocated [`bytes::BytesMut`]. Rust's allocator already
//! gives every `BytesMut` a stable address for its lifetime, so "pinning"
//! here means simply not reallocating a region while a connection holds
//! it, which owning the region achieves for free.

use bytes::BytesMut;

/// Page-sized, fixed-capacity buffer elements handed out by the pool
/// (spec §2 "Buffer pool"). Allocation is unmanaged in the sense that the
/// pool does not track individual elements after handing them out — the
/// [`ContextLockedBufferManager`] that owns them frees them by dropping.
#[derive(Clone, Copy, Debug)]
pub struct BufferPool {
	page_size: usize,
}

impl BufferPool {
	/// Build a pool that hands out buffers in multiples of `page_size`
	/// bytes
	#[must_use]
	pub const fn new(page_size: usize) -> Self {
		Self { page_size }
	}

	/// Round `requested` up to a whole number of pages and allocate a
	/// zeroed buffer of that size
	#[must_use]
	pub fn allocate(&self, requested: usize) -> BytesMut {
		let pages = requested.div_ceil(self.page_size).max(1);
		BytesMut::zeroed(pages * self.page_size)
	}
}

/// The five logical buffer regions a connection holds for its lifetime
/// (spec §3, §4.3): request header parse (split binary/char), response
/// header accumulator, chunk accumulator, discard buffer, form-data
/// buffer, and an optional compressor buffer.
///
/// Allocation is deferred to [`ContextLockedBufferManager::initialize`]
/// (spec §4.3: "if the handler throws during construction of its own
/// state, the pool must not leak a pinned buffer" — here, simply: nothing
/// is allocated until `initialize` is called, and everything is freed by
/// [`ContextLockedBufferManager::release`]).
#[derive(Debug, Default)]
pub struct ContextLockedBufferManager {
	/// The binary half of the split request header parse buffer
	pub request_header_bin: Option<BytesMut>,
	/// The character-window half of the split request header parse
	/// buffer, contiguous with `request_header_bin` conceptually but kept
	/// as a separate owned region here since Rust has no aliased-view
	/// primitive that stays within `forbid(unsafe_code)`
	pub request_header_char: Option<BytesMut>,
	/// The response header accumulator
	pub response_header: Option<BytesMut>,
	/// The chunked-encoding accumulator
	pub chunk: Option<BytesMut>,
	/// The entity-body discard buffer (spec §4.6 step 10)
	pub discard: Option<BytesMut>,
	/// The `multipart/form-data` buffer
	pub form_data: Option<BytesMut>,
	/// The compressor's scratch buffer, allocated only when the server's
	/// configured compression set is non-empty (spec §4.3: "never
	/// allocate a compressor that will never be used")
	pub compressor: Option<BytesMut>,
}

impl ContextLockedBufferManager {
	/// Allocate every region from `pool`, sized per the given
	/// configuration. `with_compressor` gates whether the compressor
	/// scratch buffer is allocated at all.
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
		let bin_size = header_buf_size / 2;
		self.request_header_bin = Some(pool.allocate(bin_size));
		self.request_header_char = Some(pool.allocate(header_buf_size - bin_size));
		self.response_header = Some(pool.allocate(response_header_buf_size));
		self.chunk = Some(pool.allocate(chunk_buf_size));
		self.discard = Some(pool.allocate(discard_buf_size));
		self.form_data = Some(pool.allocate(multipart_buf_size));
		self.compressor = with_compressor.then(|| pool.allocate(chunk_buf_size));
	}

	/// Whether every region required for a connection to run has been
	/// allocated
	#[must_use]
	pub const fn is_initialized(&self) -> bool {
		self.request_header_bin.is_some() && self.response_header.is_some()
	}

	/// Zero and free every region, returning the manager to its
	/// uninitialized state (spec §4.3: "`Release` zeros and frees all
	/// buffers")
	pub fn release(&mut self) {
		for buf in [
			&mut self.request_header_bin,
			&mut self.request_header_char,
			&mut self.response_header,
			&mut self.chunk,
			&mut self.discard,
			&mut self.form_data,
			&mut self.compressor,
		] {
			if let Some(b) = buf {
				b.iter_mut().for_each(|byte| *byte = 0);
			}
			*buf = None;
		}
	}
}
