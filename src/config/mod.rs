//! Configuration management

pub mod config;

pub use config::Config;
