#![forbid(unsafe_code)]
#![warn(
	clippy::pedantic,
	clippy::cargo,
	clippy::nursery,
	missing_docs,
	rustdoc::missing_crate_level_docs
)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::module_name_repetitions)]
#![expect(
	clippy::use_self,
	reason = "false-positives in `#[derive(Serialize)]`-generated code"
)]

//! A custom HTTP/1.1 server engine: connection lifecycle, a hand-rolled
//! wire parser, virtual-host routing, listener reduction, and TLS
//! termination with per-interface certificate selection.
//!
//! The engine owns the connection up to one seam: a [`Handler`], supplied
//! by the crate's consumer, is invoked once per parsed request and writes
//! a response through an [`HttpEvent`]. Everything else — buffer pooling,
//! keepalive, chunked/compressed responses, and which listener a request
//! arrived on — is this crate's concern.
//!
//! [`Handler`]: event::Handler
//! [`HttpEvent`]: event::HttpEvent

pub mod buffers;
pub mod certs;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod server;
pub mod transport;
pub mod util;
pub mod vhost;
