//! Generative model access
//!
//! - `client`: the `GenerativeModel` seam and its HTTP implementation
//! - `invoker`: primary/secondary fallback chain
//! - `types`: tier descriptors and wire shapes

pub mod client;
pub mod invoker;
pub mod types;

#[cfg(test)]
pub(crate) mod stub;

// Re-export key types for convenience
pub use client::{ApiKey, GeminiClient, GenerativeModel, DEFAULT_API_BASE};
pub use invoker::ModelInvoker;
pub use types::{Generation, ImageAttachment, ModelTier};
