//! The connection lifecycle loop and per-request driver (spec §4.4, §4.6,
//! §4.7): wires the pre-buffer read, the synchronous parser, virtual-host
//! lookup, the handler, and the response pipeline together, and decides
//! whether the connection survives for another request.

use std::{net::SocketAddr, sync::Arc};

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, trace};

use crate::{
	buffers::BufferPool,
	config::HttpConfig,
	context::{ContextPool, HttpContext},
	error::TransportError,
	event::{ConnectionInfo, HttpEvent},
	parser,
	reader::TransportReader,
	response::{self, should_compress, Encoding, ResponseBody},
	server::OpenConnections,
	vhost::VirtualHostRouter,
};

/// Drive one accepted connection to completion: the keepalive loop
/// described in spec §4.7, ending in `Closed` (this function returning)
/// or after handing the stream off to an alternate-protocol continuation.
#[allow(clippy::too_many_arguments)]
pub async fn handle_connection<S>(
	stream: S,
	local_addr: SocketAddr,
	remote_addr: SocketAddr,
	is_tls: bool,
	router: Arc<VirtualHostRouter>,
	http_config: Arc<HttpConfig>,
	context_pool: Arc<ContextPool>,
	buffer_pool: Arc<BufferPool>,
	open_connections: Arc<OpenConnections>,
) where
	S: AsyncRead + AsyncWrite + Unpin,
{
	let Some(mut ctx) = context_pool.acquire() else {
		debug!("context pool exhausted, refusing connection from {remote_addr}");
		return;
	};

	ctx.initialize(
		&buffer_pool,
		http_config.header_buf_size as usize,
		http_config.response_header_buf_size as usize,
		http_config.header_buf_size as usize,
		http_config.header_buf_size as usize,
		http_config.multipart_max_buf_size as usize,
		http_config.compression.enabled,
	);

	let mut reader = TransportReader::new(stream, http_config.header_buf_size as usize);
	let connection_info = ConnectionInfo {
		local_addr,
		remote_addr,
		is_tls,
	};

	loop {
		ctx.begin_request();

		// Pre-buffer: one async read before the synchronous parse (spec
		// §4.4, §5). This is the idle wait between requests, so it is
		// timed against the keepalive window rather than recv_timeout;
		// `Duration::ZERO` disables keepalive and so also disables this
		// timeout (no idle window to bound).
		reader.set_read_timeout((!http_config.keepalive.is_zero()).then_some(http_config.keepalive));

		// If it returns 0 bytes the remote end closed cleanly.
		match reader.fill_buffer().await {
			Ok(0) if reader.available() == 0 => break,
			Ok(_) => {}
			Err(err) => {
				debug!(?err, "transport read failed before parsing, closing connection");
				break;
			}
		}

		reader.set_read_timeout(Some(http_config.recv_timeout));

		let outcome = run_one_request(
			&mut ctx,
			&mut reader,
			&http_config,
			&router,
			connection_info,
			&open_connections,
		)
		.await;

		match outcome {
			RequestOutcome::Keepalive => continue,
			RequestOutcome::Closed => break,
			RequestOutcome::AlternateProtocol => {
				trace!("connection handed off to alternate protocol");
				break;
			}
		}
	}

	context_pool.release(ctx);
}

enum RequestOutcome {
	Keepalive,
	Closed,
	AlternateProtocol,
}

async fn run_one_request<S>(
	ctx: &mut HttpContext,
	reader: &mut TransportReader<S>,
	http_config: &HttpConfig,
	router: &VirtualHostRouter,
	connection_info: ConnectionInfo,
	open_connections: &OpenConnections,
) -> RequestOutcome
where
	S: AsyncRead + AsyncWrite + Unpin,
{
	let parse_result = parser::parse(
		reader,
		&mut ctx.request.state,
		&mut ctx.request.headers,
		&mut ctx.request.cookies,
		&mut ctx.request.accept,
		&mut ctx.request.accept_language,
		http_config,
		connection_info.is_tls,
	)
	.await;

	// Step 1: a parser status short-circuits straight to a response.
	let prefix = match parse_result {
		Ok(prefix) => prefix,
		Err(err) => {
			if err.is_socket_abort() {
				return RequestOutcome::Closed;
			}

			let status = if ctx.request.state.expect_continue {
				417
			} else {
				err.status
			};

			return respond_and_close(ctx, reader, http_config, status).await;
		}
	};

	// Step 2: version and connection-count caps.
	if open_connections.load() > http_config.max_connections as usize {
		return respond_and_close(ctx, reader, http_config, 503).await;
	}

	// Step 3: keepalive headers.
	let keepalive = ctx.request.state.keepalive && http_config.keepalive.as_millis() > 0;
	if keepalive {
		ctx.response.add_header("Connection", "keep-alive");
		ctx.response.add_header(
			"Keep-Alive",
			format!("timeout={}", http_config.keepalive.as_secs()),
		);
	} else {
		ctx.response.add_header("Connection", "close");
	}

	// Step 4: virtual-host lookup.
	let host = ctx
		.request
		.state
		.host
		.clone()
		.and_then(|h| router.lookup(&h));

	let Some(host) = host else {
		return respond_and_close(ctx, reader, http_config, 404).await;
	};

	// Step 5: interim 100-continue, before the handler runs.
	if ctx.request.state.expect_continue {
		reader.set_write_timeout(Some(http_config.send_timeout));
		if let Err(err) = write_interim_100(reader).await {
			debug!(?err, "failed writing 100 Continue, closing connection");
			return RequestOutcome::Closed;
		}
	}

	// Step 6: buffer the entity body, if any, before invoking the handler.
	if let Some(len) = ctx.request.state.content_length {
		if len > 0 {
			match reader.read_body(prefix.unwrap_or_default(), len).await {
				Ok(body) => ctx.request.body = body,
				Err(err) => {
					debug!(?err, "failed reading request body, closing connection");
					return RequestOutcome::Closed;
				}
			}
		}
	}

	// Step 7: invoke the handler.
	let mut event = HttpEvent::new(connection_info, &ctx.request, &mut ctx.response, &mut ctx.body);
	host.handler.handle(&mut event).await;

	let terminate = event.terminate;
	let alternate_protocol = event.alternate_protocol.is_some();
	let compression_disabled = event.compression_disabled;
	drop(event);

	// Step 8: handler termination signal forces close, with or without a
	// status.
	if let Some(signal) = terminate {
		if let Some(status) = signal.status {
			ctx.response.status = status;
		} else {
			ctx.response.clear_headers();
		}
		ctx.response.add_header("Connection", "close");
		let _ = write_response(ctx, reader, http_config, compression_disabled).await;
		return RequestOutcome::Closed;
	}

	// Step 11: write the response. (Step 10, draining unread body bytes,
	// is unnecessary here: the entity body is fully buffered in step 6
	// before the handler runs, so there are never unconsumed transport
	// bytes left over to desync the next request.)
	if write_response(ctx, reader, http_config, compression_disabled)
		.await
		.is_err()
	{
		return RequestOutcome::Closed;
	}

	if alternate_protocol {
		return RequestOutcome::AlternateProtocol;
	}

	if keepalive {
		RequestOutcome::Keepalive
	} else {
		RequestOutcome::Closed
	}
}

async fn respond_and_close<S>(
	ctx: &mut HttpContext,
	reader: &mut TransportReader<S>,
	http_config: &HttpConfig,
	status: u16,
) -> RequestOutcome
where
	S: AsyncRead + AsyncWrite + Unpin,
{
	ctx.response.status = status;
	ctx.response.add_header("Connection", "close");
	let _ = write_response(ctx, reader, http_config, true).await;
	RequestOutcome::Closed
}

async fn write_interim_100<S: AsyncWrite + Unpin>(
	reader: &mut TransportReader<S>,
) -> Result<(), TransportError> {
	write_raw(reader, b"HTTP/1.1 100 Continue\r\n\r\n").await
}

async fn write_raw<S: AsyncWrite + Unpin>(
	reader: &mut TransportReader<S>,
	bytes: &[u8],
) -> Result<(), TransportError> {
	// `TransportReader` only exposes read-side operations; writes go
	// straight to the stream it wraps via a short-lived borrow.
	reader.write_through(bytes).await
}

async fn write_response<S>(
	ctx: &mut HttpContext,
	reader: &mut TransportReader<S>,
	http_config: &HttpConfig,
	compression_disabled: bool,
) -> Result<(), TransportError>
where
	S: AsyncWrite + Unpin,
{
	reader.set_write_timeout(Some(http_config.send_timeout));

	let version = if ctx.request.state.version == Some(crate::request::Version::Http10) {
		"HTTP/1.0"
	} else {
		"HTTP/1.1"
	};

	let mut body_bytes: Option<Vec<u8>> = None;
	let mut chunks: Option<Vec<Vec<u8>>> = None;

	match std::mem::take(&mut ctx.body) {
		ResponseBody::Unset => {
			ctx.response.add_header("Content-Length", "0");
		}
		ResponseBody::Memory(bytes) => {
			let content_type = ctx
				.response
				.headers
				.iter()
				.find(|(k, _)| k.eq_ignore_ascii_case("Content-Type"))
				.map_or_else(String::new, |(_, v)| v.clone());

			let encoding = ctx
				.request
				.header("Accept-Encoding")
				.and_then(Encoding::negotiate);

			if let Some(encoding) = encoding {
				if should_compress(
					&http_config.compression,
					compression_disabled,
					&content_type,
					bytes.len() as u64,
				) {
					if let Some(scratch) = ctx.buffers.compressor.as_mut() {
						if let Ok(compressed) = response::compress(encoding, &bytes, scratch).await {
							ctx.response.add_header("Content-Encoding", encoding.as_str());
							ctx.response.add_header("Content-Length", compressed.len().to_string());
							body_bytes = Some(compressed);
						}
					}
				}
			}

			if body_bytes.is_none() {
				ctx.response.add_header("Content-Length", bytes.len().to_string());
				body_bytes = Some(bytes);
			}
		}
		ResponseBody::Chunked(c) => {
			ctx.response.add_header("Transfer-Encoding", "chunked");
			chunks = Some(c);
		}
	}

	let mut head = Vec::new();
	ctx.response.write_head(version, &mut head);
	reader.write_through(&head).await?;

	if let Some(bytes) = body_bytes {
		reader.write_through(&bytes).await?;
	} else if let Some(chunks) = chunks {
		let mut framed = Vec::new();
		for chunk in &chunks {
			if chunk.is_empty() {
				continue;
			}
			framed.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
			framed.extend_from_slice(chunk);
			framed.extend_from_slice(b"\r\n");
		}
		framed.extend_from_slice(b"0\r\n\r\n");
		reader.write_through(&framed).await?;
	}

	Ok(())
}
