//! TLS client configuration backed by the platform trust store.

use log::{debug, warn};
use once_cell::sync::OnceCell;
use rustls::crypto::ring::default_provider;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
use std::io;
use std::net::TcpStream;
use std::sync::Arc;

pub(crate) type TlsStream = StreamOwned<ClientConnection, TcpStream>;

static CLIENT_CONFIG: OnceCell<Arc<ClientConfig>> = OnceCell::new();

fn client_config() -> io::Result<Arc<ClientConfig>> {
    CLIENT_CONFIG
        .get_or_try_init(|| {
            let native = rustls_native_certs::load_native_certs();
            for err in &native.errors {
                warn!("Skipping unreadable system certificate source: {err}");
            }
            let mut roots = RootCertStore::empty();
            let (added, ignored) = roots.add_parsable_certificates(native.certs);
            debug!("Loaded {added} system root certificates ({ignored} ignored)");

            let provider = Arc::new(default_provider());
            let config = ClientConfig::builder_with_provider(provider)
                .with_safe_default_protocol_versions()
                .map_err(io::Error::other)?
                .with_root_certificates(roots)
                .with_no_client_auth();
            Ok(Arc::new(config))
        })
        .map(Arc::clone)
}

/// Wrap an open TCP connection in a TLS session for `host`. The handshake
/// runs lazily on the first read or write.
pub(crate) fn connect(tcp: TcpStream, host: &str) -> io::Result<TlsStream> {
    let server_name = ServerName::try_from(host.to_owned())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let connection = ClientConnection::new(client_config()?, server_name).map_err(io::Error::other)?;
    Ok(StreamOwned::new(connection, tcp))
}
