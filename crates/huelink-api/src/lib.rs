// huelink-api: Async Rust client for the Philips Hue bridge local REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::HueClient;
pub use error::Error;
