use anyhow::Context;
use std::time::Duration;
use weather_pipeline::{
    config::Config,
    connector::{
        http::ForecastClient,
        kafka::{KafkaPublisher, TopicAdmin},
    },
    producer,
    shutdown,
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

    // kafka is usually started alongside, give it a moment.
    tokio::select! {
        _ = shutdown.recv() => return Ok(()),
        _ = tokio::time::sleep(cfg.startup_delay) => {}
    }

    let admin = TopicAdmin::new(&cfg.kafka).context("Failed to create admin client")?;
    match admin.ensure_topic(&cfg.kafka.topic).await {
        Ok(status) => info!("topic {}: {:?}", cfg.kafka.topic, status),
        Err(e) => warn!("Error creating topic: {}", e),
    }
    drop(admin);

    let publisher = KafkaPublisher::new(&cfg.kafka).context("Failed to create producer")?;
    let source = ForecastClient::new(cfg.forecast.clone()).context("Failed to create http client")?;
    info!(
        "polling weather for {} every {:?}, publishing to {}",
        cfg.forecast.location, cfg.poll_interval, cfg.kafka.topic
    );

    let res = producer::run(&source, &publisher, cfg.poll_interval, &mut shutdown).await;

    if let Err(e) = publisher.flush(Duration::from_secs(5)) {
        warn!("failed to flush producer: {}", e);
    }

    let published = res.context("Failed to send message")?;
    info!("producer stopped after {} readings", published);
    Ok(())
}
