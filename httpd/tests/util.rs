//! Shared helpers for end-to-end tests: spawn the compiled reference binary
//! against a fixture configuration file and tear it down on drop.

use std::{
	process::{Child, Command},
	thread,
	time::Duration,
};

/// Kills the wrapped server process when dropped, so a test failing midway
/// doesn't leak a listening process behind it.
#[must_use]
pub struct ServerHandle(Child);

impl Drop for ServerHandle {
	fn drop(&mut self) {
		let _ = self.0.kill();
		let _ = self.0.wait();
	}
}

/// Start the reference binary with the given fixture config file and wait
/// for it to have had time to bind its listeners.
#[allow(dead_code)] // not every test file uses every helper
pub fn start_server(config_fixture: &str) -> ServerHandle {
	let mut cmd = Command::new(env!("CARGO_BIN_EXE_server"));
	cmd.arg("-c").arg(concat_fixture(config_fixture));

	let child = cmd.spawn().expect("failed to start server binary");
	thread::sleep(Duration::from_millis(250));

	ServerHandle(child)
}

fn concat_fixture(name: &str) -> String {
	format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}
