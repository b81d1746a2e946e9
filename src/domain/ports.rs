use crate::domain::model::{CompanyRecord, CompanyResult, WriteReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn results_dir(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn max_tokens(&self) -> u32;
    /// Documented "search before prompting" switch. Currently a no-op.
    fn search_first(&self) -> bool;
    fn persist_responses(&self) -> bool;
    fn max_records(&self) -> Option<usize>;
}

/// Single-turn text completion backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<CompanyRecord>>;
    async fn transform(&self, records: Vec<CompanyRecord>) -> Result<Vec<CompanyResult>>;
    async fn load(&self, results: Vec<CompanyResult>) -> Result<WriteReport>;
}
