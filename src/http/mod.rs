mod client;

pub use client::{build_client, RateLimitedClient};
