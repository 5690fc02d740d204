pub mod config;
pub mod connector;
pub mod consumer;
pub mod error;
pub mod models;
pub mod producer;
pub mod render;
pub mod shutdown;

#[macro_use]
extern crate log;
