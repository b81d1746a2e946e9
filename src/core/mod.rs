pub mod client;
pub mod etl;
pub mod format;
pub mod input;
pub mod pipeline;
pub mod prompts;
pub mod workflow;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{
    BatchSummary, CompanyRecord, CompanyResult, QueryRecord, QueryResponse, WriteReport,
};
pub use crate::domain::ports::{ConfigProvider, LanguageModel, Pipeline, Storage};
pub use crate::utils::error::Result;
