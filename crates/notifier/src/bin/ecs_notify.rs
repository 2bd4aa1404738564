use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ecs_events::{Destination, InboundEvent, LogEnricher, NotificationEngine};
use mock_sources::Fixtures;
use notifier::{
    Delivery, Dispatcher, NotifierConfig, PlainTextResolver, SlackWebhookDelivery, StdoutPublisher,
};
use slack_webhook::{WebhookClient, WebhookConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ecs-notify")]
#[command(about = "Format an ECS EventBridge event and deliver it to Slack or Amazon Q")]
struct Args {
    /// EventBridge event JSON file
    #[arg(long)]
    event: PathBuf,

    /// Destination format: slack or amazon-q
    #[arg(long, default_value = "slack", value_parser = parse_destination)]
    destination: Destination,

    /// JSON fixtures with task definitions and log streams for log enrichment
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Print the payload instead of delivering it
    #[arg(long)]
    dry_run: bool,
}

fn parse_destination(value: &str) -> Result<Destination, String> {
    Destination::parse(value).ok_or_else(|| format!("unknown destination `{}` (expected slack or amazon-q)", value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = NotifierConfig::from_env()?;

    let event_data = fs::read_to_string(&args.event)?;
    let event: InboundEvent = serde_json::from_str(&event_data)?;

    let mut engine = NotificationEngine::new(config.engine.clone());
    if let Some(path) = args.fixtures.as_ref() {
        let (definitions, logs) = Fixtures::load(path)?.into_sources();
        engine = engine.with_enricher(LogEnricher::new(Arc::new(definitions), Arc::new(logs)));
    }

    let delivery: Arc<dyn Delivery> = match (args.destination, args.dry_run) {
        (Destination::Slack, false) => {
            let url = config.webhook_url(&PlainTextResolver).await?;
            let client = WebhookClient::new(WebhookConfig::new(url).with_timeout(config.webhook_timeout))?;
            Arc::new(SlackWebhookDelivery::new(client))
        }
        (destination, _) => Arc::new(StdoutPublisher::new(destination)),
    };
    info!(target = delivery.name(), destination = args.destination.as_str(), "Dispatching event");

    let dispatcher = Dispatcher::new(engine, delivery);
    let outcome = dispatcher.dispatch(&event).await?;
    println!("{}", outcome.to_status_json());

    Ok(())
}
