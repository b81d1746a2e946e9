use crate::core::client::QueryClient;
use crate::core::input;
use crate::core::workflow::{CompanyWorkflow, WorkflowOptions};
use crate::core::writer::ResultWriter;
use crate::core::{
    CompanyRecord, CompanyResult, ConfigProvider, LanguageModel, Pipeline, Storage, WriteReport,
};
use crate::utils::error::Result;
use chrono::Local;

/// Reads companies, runs the three-step workflow for each one in order and
/// writes the result tables.
pub struct OutreachPipeline<L: LanguageModel, S: Storage + Clone, C: ConfigProvider> {
    client: QueryClient<L, S>,
    storage: S,
    config: C,
    batch_timestamp: String,
}

impl<L: LanguageModel, S: Storage + Clone, C: ConfigProvider> OutreachPipeline<L, S, C> {
    /// The batch timestamp used in output file names is fixed here.
    pub fn new(model: L, storage: S, config: C) -> Self {
        let batch_timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::with_timestamp(model, storage, config, batch_timestamp)
    }

    pub fn with_timestamp(model: L, storage: S, config: C, batch_timestamp: String) -> Self {
        Self {
            client: QueryClient::new(model, storage.clone()),
            storage,
            config,
            batch_timestamp,
        }
    }

    fn workflow_options(&self) -> WorkflowOptions {
        WorkflowOptions {
            search_first: self.config.search_first(),
            persist_responses: self.config.persist_responses(),
        }
    }
}

#[async_trait::async_trait]
impl<L: LanguageModel, S: Storage + Clone, C: ConfigProvider> Pipeline
    for OutreachPipeline<L, S, C>
{
    async fn extract(&self) -> Result<Vec<CompanyRecord>> {
        tracing::debug!("Reading companies from: {}", self.config.input_path());
        let mut companies = input::read_companies(self.config.input_path())?;

        if let Some(max) = self.config.max_records() {
            if companies.len() > max {
                tracing::info!("Limiting batch to the first {} of {} companies", max, companies.len());
                companies.truncate(max);
            }
        }

        Ok(companies)
    }

    async fn transform(&self, records: Vec<CompanyRecord>) -> Result<Vec<CompanyResult>> {
        let workflow = CompanyWorkflow::new(&self.client, self.workflow_options());
        let total = records.len();
        let mut results = Vec::with_capacity(total);

        // 逐筆處理，輸出順序與輸入一致
        for (index, record) in records.iter().enumerate() {
            tracing::info!("[{}/{}] {}", index + 1, total, record.name);
            results.push(workflow.process(record).await);
        }

        Ok(results)
    }

    async fn load(&self, results: Vec<CompanyResult>) -> Result<WriteReport> {
        let writer = ResultWriter::new(self.storage.clone(), self.batch_timestamp.clone());
        let mut report = writer.write_all(&results).await;

        let base = self.config.results_dir().trim_end_matches('/');
        for path in report.written.iter_mut() {
            *path = format!("{}/{}", base, path);
        }
        for (path, _) in report.failures.iter_mut() {
            *path = format!("{}/{}", base, path);
        }

        Ok(report)
    }
}
