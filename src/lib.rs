pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use adapters::{AnthropicClient, AnthropicSettings};
pub use config::credentials::{CredentialChain, CredentialProvider, Credentials};
pub use core::{etl::BatchEngine, pipeline::OutreachPipeline};
pub use domain::model::{BatchSummary, CompanyRecord, CompanyResult, QueryResponse};
pub use utils::error::{OutreachError, Result};
