// Brave Search API client: endpoint encoding, rate limiting, request issuing

pub mod client;
pub mod endpoint;
pub mod error;
pub mod limiter;
pub mod types;

pub use client::{BraveApi, FetchedImage, SearchApi};
pub use endpoint::Endpoint;
pub use error::{ApiError, Result};
pub use limiter::{RateLimiter, RateLimits};
