// grayscope-api: Async Rust client for the Graylog REST API (search + system inputs)

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::GraylogClient;
pub use error::Error;
pub use models::{Input, RawMessage, SearchResponse};
pub use transport::{TlsMode, TransportConfig};
