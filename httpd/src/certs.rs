//! Per-interface TLS certificate handling (spec §4.2: "the certificate
//! selection callback always returns the interface's certificate (no
//! SNI)").

use std::{
	fmt::{Debug, Formatter, Result as FmtResult},
	fs,
	io::Error as IoError,
	path::Path,
	sync::Arc,
};

use parking_lot::RwLock;
use tokio_rustls::rustls::{
	crypto::ring::sign,
	pki_types::{CertificateDer, PrivateKeyDer},
	server::{ClientHello, ResolvesServerCert, WebPkiClientVerifier},
	sign::{CertifiedKey, SignError},
	RootCertStore,
};

/// The error returned by [`get_certkey`]
#[derive(Debug, thiserror::Error)]
pub enum CertKeyError {
	/// The certificate or key file could not be read
	#[error("the certificate or key file could not be read")]
	Read(#[from] IoError),
	/// The private key file does not contain a valid private key
	#[error("the private key file does not contain a valid private key")]
	NoKey,
	/// The private key is invalid or unsupported
	#[error("the private key is invalid or unsupported")]
	InvalidKey(#[from] SignError),
	/// The client CA file contains no usable certificates
	#[error("the client CA file contains no usable certificates")]
	NoClientCa,
	/// The client certificate verifier could not be built from the trusted
	/// CA roots
	#[error("failed to build a client certificate verifier")]
	ClientVerifier(#[from] tokio_rustls::rustls::server::VerifierBuilderError),
}

/// Read a [`CertifiedKey`] from PEM-encoded certificate chain and private
/// key files.
///
/// # IO
/// This function performs synchronous (blocking) file IO.
///
/// # Errors
/// Returns an error if the files can't be read, or their contents can't be
/// parsed as a certificate chain and a PKCS#8 private key.
pub fn get_certkey(
	cert_path: impl AsRef<Path>,
	key_path: impl AsRef<Path>,
) -> Result<CertifiedKey, CertKeyError> {
	let certs = fs::read(&cert_path)?;
	let key = fs::read(&key_path)?;

	let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut &certs[..])
		.collect::<Result<_, _>>()?;
	let key: PrivateKeyDer<'static> = rustls_pemfile::pkcs8_private_keys(&mut &key[..])
		.next()
		.ok_or(CertKeyError::NoKey)?
		.map(PrivateKeyDer::Pkcs8)?;

	Ok(CertifiedKey::new(certs, sign::any_supported_type(&key)?))
}

/// Build a client-certificate verifier that requires and validates a
/// client certificate signed by one of the CAs in `ca_path` (spec §4.2:
/// "no policy errors when client certs are required").
///
/// # IO
/// This function performs synchronous (blocking) file IO.
///
/// # Errors
/// Returns an error if the CA file can't be read or parsed, or rustls
/// rejects the resulting root store.
pub fn build_client_verifier(
	ca_path: impl AsRef<Path>,
) -> Result<Arc<dyn tokio_rustls::rustls::server::danger::ClientCertVerifier>, CertKeyError> {
	let ca_pem = fs::read(ca_path)?;
	let ca_certs: Vec<CertificateDer<'static>> =
		rustls_pemfile::certs(&mut &ca_pem[..]).collect::<Result<_, _>>()?;

	let mut roots = RootCertStore::empty();
	for cert in ca_certs {
		roots.add(cert).map_err(|_| CertKeyError::NoClientCa)?;
	}
	if roots.is_empty() {
		return Err(CertKeyError::NoClientCa);
	}

	Ok(WebPkiClientVerifier::builder(Arc::new(roots)).build()?)
}

/// A [`ResolvesServerCert`] for one transport interface, resolving the
/// same certificate for every handshake regardless of SNI (spec §4.2).
/// Updatable on the fly; when the current certificate is `None` the
/// handshake is aborted by rustls.
pub struct CertificateResolver {
	current: RwLock<Option<Arc<CertifiedKey>>>,
}

impl CertificateResolver {
	/// Build a resolver that always returns `certkey`
	#[must_use]
	pub const fn new(certkey: Option<Arc<CertifiedKey>>) -> Self {
		Self {
			current: RwLock::new(certkey),
		}
	}

	/// Get the current certified key
	pub fn get(&self) -> Option<Arc<CertifiedKey>> {
		self.current.read().clone()
	}

	/// Replace the stored certified key. Future handshakes resolve to the
	/// new value immediately.
	pub fn update(&self, certkey: Option<Arc<CertifiedKey>>) {
		*self.current.write() = certkey;
	}
}

impl ResolvesServerCert for CertificateResolver {
	fn resolve(&self, _client_hello: ClientHello) -> Option<Arc<CertifiedKey>> {
		// No SNI-based selection: every client gets this interface's
		// single certificate (spec §4.2).
		self.get()
	}
}

impl Debug for CertificateResolver {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.debug_struct("CertificateResolver")
			.field("current", &"Arc<[REDACTED]>")
			.finish()
	}
}
