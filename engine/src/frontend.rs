use std::{io, sync::Arc};

use log::{info, warn};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    task,
};

use crate::{
    Registry,
    protocol::{self, Request, Response},
};

/// Accept loop of the newline-delimited JSON front end.
///
/// Runs until the listener fails; callers decide how to stop it (the binary
/// races it against ctrl-c).
pub async fn serve(listener: TcpListener, registry: Arc<Registry>) -> io::Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        info!("client connected from {addr}");

        let registry = registry.clone();
        tokio::spawn(async move {
            if let Err(e) = serve_connection(stream, registry).await {
                warn!("connection from {addr} ended with io error: {e}");
            }
        });
    }
}

/// Serves one connection: one JSON request per line, one JSON response per
/// line. Training is CPU-bound, so every request runs under
/// `spawn_blocking` to keep the reactor responsive.
async fn serve_connection(stream: TcpStream, registry: Arc<Registry>) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let registry = registry.clone();
                task::spawn_blocking(move || protocol::handle(&registry, request))
                    .await
                    .unwrap_or_else(|e| Response::Error {
                        error: format!("request task failed: {e}"),
                    })
            }
            Err(e) => Response::Error {
                error: format!("invalid request: {e}"),
            },
        };

        let mut payload = serde_json::to_string(&response).map_err(io::Error::other)?;
        payload.push('\n');
        write_half.write_all(payload.as_bytes()).await?;
    }

    Ok(())
}
