pub mod args;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod report;
pub mod utils;
pub mod xml;

pub use args::Args;
pub use client::{StatsClient, StatsSummary};
pub use config::{ClientConfig, DEFAULT_BASE_URL, VERSION};
pub use error::StatsError;
pub use fetch::{HttpTransport, StatsRequest, Transport};
pub use xml::{Field, Link, Node, Section};
