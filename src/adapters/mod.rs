// Adapters layer: concrete implementations for external systems.

pub mod anthropic;

pub use anthropic::{AnthropicClient, AnthropicSettings};
