use anyhow::Context;
use std::io;
use weather_pipeline::{
    config::Config, connector::kafka::KafkaSubscriber, consumer::monitor, shutdown,
};

#[macro_use]
extern crate log;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = Config::default();
    let mut shutdown = shutdown::on_ctrl_c();

    let subscriber = KafkaSubscriber::new(&cfg.kafka).context("Failed to create consumer")?;
    info!("listening on {}", subscriber.topic());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let rendered = monitor(
        &cfg.forecast.location,
        subscriber.payloads(),
        &mut shutdown,
        &mut out,
    )
    .await
    .context("Failed to write to terminal")?;

    debug!("consumer stopped after {} readings", rendered);
    Ok(())
}
