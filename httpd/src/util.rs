//! Miscellaneous statics shared across the engine.

/// A string representation of this crate's version. In debug builds, this
/// is in the form of `[full semver crate version]+debug`. In release
/// builds this gets shortened to `MAJOR.MINOR`.
pub const VERSION: &str = if cfg!(debug_assertions) {
	concat!(env!("CARGO_PKG_VERSION"), "+debug")
} else {
	concat!(
		env!("CARGO_PKG_VERSION_MAJOR"),
		".",
		env!("CARGO_PKG_VERSION_MINOR")
	)
};

/// The name of the HTTP(S) server implemented by this crate, for use in
/// logs and by consumers that want to send it as a `Server` header
/// themselves. The engine does not add response headers on a handler's
/// behalf.
pub const SERVER_NAME: &str = if cfg!(debug_assertions) {
	concat!("httpd/", env!("CARGO_PKG_VERSION"), "+debug")
} else {
	concat!(
		"httpd/",
		env!("CARGO_PKG_VERSION_MAJOR"),
		".",
		env!("CARGO_PKG_VERSION_MINOR")
	)
};
