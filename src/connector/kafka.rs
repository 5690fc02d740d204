use crate::config::KafkaConfig;
use crate::error::types::{Error, Result};
use crate::models::reading::WeatherReading;
use crate::producer::ReadingSink;
use async_trait::async_trait;
use futures::stream::{LocalBoxStream, StreamExt};
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication, TopicResult};
use rdkafka::client::DefaultClientContext;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::RDKafkaErrorCode;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::{ClientConfig, Message, Offset, TopicPartitionList};
use std::time::Duration;

/// The topic carries exactly one partition, everything is read from and written to it.
pub const PARTITION: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStatus {
    Created,
    AlreadyExists,
}

/// Classifies outcome of topic creation. Topic that already exists is fine.
pub fn check_topic_result(result: TopicResult) -> Result<TopicStatus> {
    match result {
        Ok(_) => Ok(TopicStatus::Created),
        Err((_, RDKafkaErrorCode::TopicAlreadyExists)) => Ok(TopicStatus::AlreadyExists),
        Err((topic, code)) => Err(Error::new_broker(
            "ensure_topic",
            format!("Error creating topic {}", topic).as_str(),
            code.to_string().as_str(),
        )),
    }
}

/// Admin connection, used once at startup to prepare the topic.
pub struct TopicAdmin {
    admin: AdminClient<DefaultClientContext>,
}

impl TopicAdmin {
    pub fn new(cfg: &KafkaConfig) -> Result<Self> {
        let admin: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", &cfg.brokers)
            .create()?;
        Ok(Self { admin })
    }

    /// Makes sure `topic` exists with a single partition and replication factor one.
    pub async fn ensure_topic(&self, topic: &str) -> Result<TopicStatus> {
        let new_topic = NewTopic::new(topic, 1, TopicReplication::Fixed(1));
        let results = self
            .admin
            .create_topics(&[new_topic], &AdminOptions::new())
            .await?;

        match results.into_iter().next() {
            Some(result) => check_topic_result(result),
            None => Err(Error::new_broker(
                "ensure_topic",
                "broker returned no result for topic creation",
                topic,
            )),
        }
    }
}

/// Wrapper for kafka producer. Every send waits for the delivery report.
pub struct KafkaPublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaPublisher {
    pub fn new(cfg: &KafkaConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &cfg.brokers)
            .set("acks", "1")
            .set("message.send.max.retries", cfg.send_retries.to_string())
            .set("retry.backoff.ms", cfg.retry_backoff.as_millis().to_string())
            .set("message.timeout.ms", cfg.message_timeout.as_millis().to_string())
            .create()?;

        Ok(Self {
            producer,
            topic: cfg.topic.clone(),
        })
    }

    /// Sends already serialized payload and waits until broker acknowledges it.
    pub async fn send(&self, payload: &str) -> Result<()> {
        let record: FutureRecord<(), str> = FutureRecord::to(&self.topic).payload(payload);

        self.producer
            .send(record, Duration::from_secs(0))
            .await
            .map(|delivery| debug!("delivered to {}: {:?}", self.topic, delivery))
            .map_err(|(e, _)| {
                Error::new_broker(
                    "KafkaPublisher::send",
                    "Failed to send message",
                    e.to_string().as_str(),
                )
            })
    }

    /// Waits for in flight messages, called once before the process goes away.
    pub fn flush(&self, timeout: Duration) -> Result<()> {
        Ok(self.producer.flush(timeout)?)
    }
}

#[async_trait]
impl ReadingSink for KafkaPublisher {
    async fn publish(&self, reading: &WeatherReading) -> Result<()> {
        let payload = reading.to_json()?;
        self.send(&payload).await
    }
}

/// Read cursor over the only partition of the topic, starting at the newest offset.
pub struct KafkaSubscriber {
    consumer: StreamConsumer,
    topic: String,
}

impl KafkaSubscriber {
    pub fn new(cfg: &KafkaConfig) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("group.id", &cfg.group_id)
            .set("bootstrap.servers", &cfg.brokers)
            .set("enable.partition.eof", "false")
            .set("enable.auto.commit", "false")
            .set("session.timeout.ms", "6000")
            .set("partition.assignment.strategy", "roundrobin")
            .create()?;

        let mut assignment = TopicPartitionList::new();
        assignment.add_partition_offset(&cfg.topic, PARTITION, Offset::End)?;
        consumer.assign(&assignment)?;
        debug!("consumer assigned to {}[{}] at newest offset", cfg.topic, PARTITION);

        Ok(Self {
            consumer,
            topic: cfg.topic.clone(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Stream of raw message payloads. Kafka errors are logged and skipped.
    pub fn payloads(&self) -> LocalBoxStream<'_, Vec<u8>> {
        self.consumer
            .stream()
            .filter_map(|msg| async move {
                match msg {
                    Err(e) => {
                        warn!("Kafka error: {}", e);
                        None
                    }
                    Ok(m) => {
                        debug!(
                            "received message: topic: {}, partition: {}, offset: {}",
                            m.topic(),
                            m.partition(),
                            m.offset()
                        );
                        Some(m.payload().unwrap_or(&[]).to_vec())
                    }
                }
            })
            .boxed_local()
    }
}

impl Drop for KafkaSubscriber {
    fn drop(&mut self) {
        if let Err(e) = self.consumer.unassign() {
            warn!("failed to release assignment of {}: {}", self.topic, e);
        }
        debug!("consumer for {} closed", self.topic);
    }
}
