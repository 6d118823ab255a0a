// ABOUTME: Example SMSC accepting binds on a TCP port and checking credentials
// ABOUTME: Runs one ServerConnector per accepted socket in its own task

use argh::FromArgs;
use smpp_bind::{Connector, ServerConfig, ServerConnector};
use std::error::Error;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Accept SMPP binds from clients with a fixed system id and password
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// address to listen on (default: 127.0.0.1:2775)
    #[argh(option, short = 'l')]
    listen: Option<String>,

    /// our own system id, sent in bind responses (default: SMSC)
    #[argh(option)]
    name: Option<String>,

    /// system id clients must bind with
    #[argh(option)]
    system_id: String,

    /// password clients must bind with
    #[argh(option)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::TRACE
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let listen = cli_args
        .listen
        .unwrap_or_else(|| "127.0.0.1:2775".to_owned());
    let expected_id = cli_args.system_id;
    let expected_password = cli_args.password;

    let config = ServerConfig::new(cli_args.name.unwrap_or_else(|| "SMSC".to_owned()))
        .with_user_check(move |system_id: &str, password: &str, peer: SocketAddr| {
            info!(system_id, %peer, "checking credentials");
            system_id == expected_id && password == expected_password
        });

    let listener = TcpListener::bind(&listen).await?;
    info!(%listen, "accepting binds");

    loop {
        let (stream, peer) = listener.accept().await?;
        let config = config.clone();

        tokio::spawn(async move {
            let mut connector = match ServerConnector::from_tcp(stream, config) {
                Ok(connector) => connector,
                Err(err) => {
                    error!(%peer, error = %err, "could not read peer address");
                    return;
                }
            };

            match connector.connect().await {
                Ok(connection) => {
                    info!(
                        %peer,
                        system_id = connection.system_id().unwrap_or_default(),
                        binding_type = ?connection.binding_type(),
                        "session bound"
                    );
                    // no session runtime here: unbind by hanging up
                    let _ = connection.close().await;
                }
                Err(err) => error!(%peer, error = %err, "bind failed"),
            }
        });
    }
}
