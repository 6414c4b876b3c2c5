//! Accept loop mounting a [`FakeServer`] on an already bound listener.

use crate::server::handler::FakeServer;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ServerBuilder;
use std::error::Error as StdError;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};

/// Pause after a failed accept, so a persistent error such as `EMFILE` does
/// not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Serve `server` on `listener` until `shutdown` resolves.
///
/// Each accepted connection is handled on its own task, speaking HTTP/1 or
/// HTTP/2 depending on what the client sends. Accept and connection errors
/// are logged and never stop the loop.
pub async fn serve<F>(listener: TcpListener, server: FakeServer, shutdown: F)
where
    F: Future<Output = ()>,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(
            "Serving {} endpoint(s) on http://{}",
            server.matcher().endpoints().len(),
            addr
        );
    }

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((tcp_stream, remote_address)) => {
                        let server = server.clone();
                        tokio::spawn(async move {
                            if let Err(err) = serve_connection(tcp_stream, server).await {
                                tracing::debug!("Connection from {} failed: {}", remote_address, err);
                            }
                        });
                    }
                    Err(err) => accept_failed(err).await,
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutting down fake server");
                break;
            }
        }
    }
}

async fn accept_failed(err: io::Error) {
    tracing::error!("TCP error: {:?}", err);
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}

async fn serve_connection(
    tcp_stream: TcpStream,
    server: FakeServer,
) -> Result<(), Box<dyn StdError + Send + Sync>> {
    let builder = ServerBuilder::new(TokioExecutor::new());
    builder
        .serve_connection(TokioIo::new(tcp_stream), server)
        .await
}
