#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use clap::Parser;
use fcm_courier::config::Config;
use fcm_courier::domain::{DeliveryStatus, NotificationRequest};
use fcm_courier::telemetry;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(version, about = "Send a push notification to every device of a user", long_about = None)]
struct Cli {
    /// User whose devices receive the notification
    #[arg(long)]
    user_id: Uuid,

    /// Notification title
    #[arg(long)]
    title: String,

    /// Notification body
    #[arg(long)]
    body: String,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli { user_id, title, body, config } = Cli::parse();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;
    let request = NotificationRequest::new(user_id, title, body);

    let result = async {
        let dispatcher = fcm_courier::build_dispatcher(&config).await?;
        let outcomes = dispatcher.dispatch_request(&request).await?;

        for outcome in &outcomes {
            match &outcome.status {
                DeliveryStatus::Delivered { message_id } => {
                    tracing::info!(device_id = %outcome.device.id, message_id = ?message_id, "delivered");
                }
                DeliveryStatus::Failed(e) => {
                    tracing::warn!(device_id = %outcome.device.id, error = %e, "failed");
                }
            }
        }
        tracing::info!(devices = outcomes.len(), "done");
        Ok::<(), anyhow::Error>(())
    }
    .instrument(tracing::info_span!("send_notification", user_id = %user_id))
    .await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Dispatch failed");
    }

    telemetry_guard.shutdown();
    result
}
