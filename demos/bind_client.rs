// ABOUTME: Example application binding to an SMSC as transmitter, receiver or transceiver
// ABOUTME: Prints the SMSC's system id on success and the bind error otherwise

use argh::FromArgs;
use smpp_bind::{
    AddressRange, Auth, ClientConnector, ClientOptions, ConnectError, Connector, TcpDialer,
};
use std::error::Error;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Bind to an SMSC and report the outcome
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the system id
    #[argh(option)]
    system_id: Option<String>,

    /// the password
    #[argh(option)]
    password: Option<String>,

    /// the system type (default: empty)
    #[argh(option)]
    system_type: Option<String>,

    /// the hostname of IP address of the SMSC (default: localhost)
    #[argh(option)]
    host: Option<String>,

    /// the port to use when connecting to the SMSC (default: 2775)
    #[argh(option, short = 'p')]
    port: Option<u16>,

    /// binding type: tx, rx or trx (default: tx)
    #[argh(option, short = 'b')]
    bind: Option<String>,

    /// address range for rx/trx binds
    #[argh(option, short = 'r')]
    range: Option<String>,

    /// seconds to wait for the bind response (default: 10)
    #[argh(option, short = 't')]
    timeout: Option<u64>,
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

    let host = cli_args.host.unwrap_or_else(|| "localhost".to_owned());
    let port = cli_args.port.unwrap_or(2775);
    let auth = Auth::new(
        format!("{host}:{port}"),
        cli_args.system_id.unwrap_or_default(),
        cli_args.password.unwrap_or_default(),
    )
    .with_system_type(cli_args.system_type.unwrap_or_default());

    let mut options = ClientOptions::default();
    if let Some(range) = cli_args.range {
        options = options.with_address_range(AddressRange::new(range));
    }
    if let Some(secs) = cli_args.timeout {
        options = options.with_handshake_timeout(Duration::from_secs(secs));
    }

    let result = match cli_args.bind.as_deref().unwrap_or("tx") {
        "tx" => {
            let timeout = options.handshake_timeout;
            let mut connector =
                ClientConnector::transmitter(TcpDialer, auth).with_handshake_timeout(timeout);
            connector.connect().await
        }
        "rx" => ClientConnector::receiver(TcpDialer, auth, options).connect().await,
        "trx" => {
            ClientConnector::transceiver(TcpDialer, auth, options)
                .connect()
                .await
        }
        other => return Err(format!("unknown binding type '{other}', use tx, rx or trx").into()),
    };

    match result {
        Ok(connection) => {
            println!(
                "Bound as {:?} to {}",
                connection.binding_type(),
                connection.system_id().unwrap_or_default()
            );
            connection.close().await?;
            Ok(())
        }
        Err(ConnectError::Bind(err)) => {
            eprintln!("SMSC rejected bind: {err}");
            std::process::exit(2);
        }
        Err(err) => Err(err.into()),
    }
}
