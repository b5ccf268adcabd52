//! # httpd server
//!
//! The reference binary for the `httpd` engine. It loads configuration,
//! builds a runtime, and runs the server until interrupted. Application
//! routing is out of scope for the engine itself (spec §1), so this
//! binary wires up a minimal demo [`Handler`] for every configured
//! hostname; real consumers of the library supply their own.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use clap::Parser;
use httpd::{
	config::{Config, Partial, PartialTcp, VirtualHostConfig},
	event::{Handler, HttpEvent},
	server::{HostDeclaration, Server},
	transport::SchedulingMode,
	util::SERVER_NAME,
};
use tokio::{runtime::Builder, sync::watch};
use tracing::{debug, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command-line flags controlling startup behaviour; configuration
/// values live in the config file/environment instead (spec §6)
#[derive(Parser, Debug)]
#[command(name = "httpd", version, about = "A custom HTTP/1.1 server engine")]
struct Cli {
	/// Configuration file path (toml, json)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Number of worker threads in the async runtime, default: number of CPUs
	#[arg(short, long)]
	threads: Option<usize>,

	/// Enable SO_REUSEADDR on every listening socket
	#[arg(long)]
	reuse_address: bool,

	/// Enable SO_REUSEPORT on every listening socket (platform-permitting)
	#[arg(long)]
	reuse_port: bool,

	/// Disable both reuse options, overriding configuration
	#[arg(long, conflicts_with_all = ["reuse_address", "reuse_port"])]
	no_reuse_socket: bool,

	/// Run connection continuations on the accepting thread instead of the
	/// runtime's thread pool (ignored for interfaces terminating TLS)
	#[arg(long)]
	inline_scheduler: bool,

	/// Additionally log raw transport bytes at trace level
	#[arg(long)]
	log_transport: bool,
}

/// A minimal demonstration handler: answers every request with a short
/// plain-text status line. Real deployments supply their own [`Handler`].
struct DemoHandler;

#[async_trait]
impl Handler for DemoHandler {
	async fn handle(&self, event: &mut HttpEvent) {
		let body = format!(
			"{SERVER_NAME} is running\nhost: {}\npath: {}\n",
			event.request.state.host.as_deref().unwrap_or("-"),
			event.request.state.path.as_deref().unwrap_or("-"),
		);

		let _ = event.respond_memory(200, "text/plain; charset=utf-8", body.into_bytes());
	}
}

fn main() -> Result<(), anyhow::Error> {
	// Temporary subscriber to collect and show logs while parsing arguments
	// and configuration, replaced by a permanent one once the configured
	// log level is known.
	let temporary_subscriber = FmtSubscriber::builder()
		.with_max_level(if cfg!(debug_assertions) {
			Level::DEBUG
		} else {
			Level::INFO
		})
		.finish();
	let subscriber_guard = tracing::subscriber::set_default(temporary_subscriber);

	info!(server = SERVER_NAME, "starting httpd");

	let cli = Cli::parse();

	let mut partials = vec![Partial::from_env_vars()];

	if let Some(path) = &cli.config {
		partials.push(Partial::from_file(path)?);
	}

	let (reuse_address, reuse_port) = if cli.no_reuse_socket {
		(Some(false), Some(false))
	} else {
		(cli.reuse_address.then_some(true), cli.reuse_port.then_some(true))
	};

	partials.push(Partial {
		tcp: Some(PartialTcp {
			reuse_address,
			reuse_port,
			..PartialTcp::default()
		}),
		..Partial::default()
	});

	let config = Config::merge(partials);
	debug!(?config, "merged server configuration");

	// Permanent subscriber, filtered by the configured log level. `RUST_LOG`
	// still takes precedence when set, matching `EnvFilter`'s usual
	// semantics.
	let level: Level = config.log_level().into();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
	let (non_blocking, _tracing_appender_guard) = tracing_appender::non_blocking(std::io::stdout());
	let permanent_subscriber = FmtSubscriber::builder()
		.with_max_level(Level::TRACE)
		.with_env_filter(env_filter)
		.with_writer(non_blocking)
		.finish();

	drop(subscriber_guard);
	tracing::subscriber::set_global_default(permanent_subscriber)
		.expect("setting global tracing subscriber failed");

	if cli.log_transport {
		debug!("raw transport logging requested (trace level)");
	}

	let mut runtime_builder = Builder::new_multi_thread();
	runtime_builder.enable_all();
	if let Some(threads) = cli.threads {
		runtime_builder.worker_threads(threads);
	}
	let runtime = runtime_builder.build().expect("async runtime initialization");

	let demo_handler: Arc<dyn Handler> = Arc::new(DemoHandler);
	let hosts: Vec<HostDeclaration> = if config.virtual_hosts().is_empty() {
		vec![HostDeclaration {
			hostnames: vec!["localhost".to_string()],
			handler: Arc::clone(&demo_handler),
			config: VirtualHostConfig::default(),
		}]
	} else {
		config
			.virtual_hosts()
			.iter()
			.map(|vhost| HostDeclaration {
				hostnames: vhost.hostnames.clone(),
				handler: Arc::clone(&demo_handler),
				config: vhost.clone(),
			})
			.collect()
	};

	let server = Server::build(config, hosts)?;

	let scheduling_mode = if cli.inline_scheduler {
		SchedulingMode::Inline
	} else {
		SchedulingMode::ThreadPool
	};

	let (stop_tx, stop_rx) = watch::channel(false);

	runtime.block_on(async move {
		let run = server.run(stop_rx, scheduling_mode);
		tokio::pin!(run);

		tokio::select! {
			result = &mut run => result,
			_ = tokio::signal::ctrl_c() => {
				info!("received interrupt, shutting down");
				let _ = stop_tx.send(true);
				run.await
			}
		}
	})?;

	Ok(())
}
