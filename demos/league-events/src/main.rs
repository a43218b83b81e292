//! Tails JSON API events from a running League of Legends client.
//!
//! The League client hosts a WAMP-like WebSocket endpoint on loopback,
//! protected by basic auth (`riot:<password>`) and a self-signed
//! certificate. Port and password normally come from its lock file; this
//! demo takes them from the environment to stay platform-agnostic:
//!
//! ```text
//! LCU_PORT=52345 LCU_TOKEN=<password> cargo run -p league-events
//! ```

use wampline::prelude::*;

// The League client does not speak the basic profile; it assigns its own
// message codes.
code_enum! {
    pub enum LeagueCode {
        Subscribe = 5,
        Unsubscribe = 6,
        Event = 8,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("LCU_PORT")?;
    let token = std::env::var("LCU_TOKEN")?;

    let mut client: TypedSubscriberClient<LeagueCode> = TypedSubscriberClient::new()?;
    client.use_options(move |options| {
        // Self-signed loopback certificate.
        options.accept_invalid_certs(true);
        options.basic_auth("riot", token.clone());
    });

    client.connect(&format!("wss://127.0.0.1:{port}/")).await?;
    client.subscribe("OnJsonApiEvent").await?;
    tracing::info!(%port, "subscribed to OnJsonApiEvent");

    loop {
        match client.receive().await {
            Ok(event) => match event.code() {
                EnumCode::Known(LeagueCode::Event) => {
                    tracing::info!(payload = ?event.elements(), "event");
                }
                code => {
                    tracing::debug!(?code, payload = ?event.elements(), "non-event frame");
                }
            },
            Err(SessionError::Transport(TransportError::Closed)) => {
                tracing::info!("client closed the connection");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
