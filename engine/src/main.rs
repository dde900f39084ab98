use std::{env, io, sync::Arc};

use log::info;
use tokio::{net::TcpListener, signal};

use engine::{Registry, frontend};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "5000";

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let addr = format!(
        "{}:{}",
        env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
        env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string()),
    );

    let registry = Arc::new(Registry::with_sample_data());
    let listener = TcpListener::bind(&addr).await?;
    info!("listening at {addr}");

    tokio::select! {
        ret = frontend::serve(listener, registry) => {
            ret?;
        }
        _ = signal::ctrl_c() => {
            info!("received SIGTERM, shutting down");
        }
    }

    Ok(())
}
