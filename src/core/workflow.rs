use crate::core::client::QueryClient;
use crate::core::format::enforce_format;
use crate::core::prompts;
use crate::core::{CompanyRecord, CompanyResult, LanguageModel, Storage};
use crate::utils::error::Result;

pub const ADDRESS_VERIFICATION_DIR: &str = "address_verification";
pub const TECHNOLOGY_RESEARCH_DIR: &str = "technology_research";
pub const CXO_LETTER_DIR: &str = "cxo_letter";

#[derive(Debug, Clone, Copy)]
pub struct WorkflowOptions {
    /// Passed to the address and research queries. Currently a no-op.
    pub search_first: bool,
    pub persist_responses: bool,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            search_first: true,
            persist_responses: true,
        }
    }
}

/// Address check → technology research → letter draft, for one company.
pub struct CompanyWorkflow<'a, L: LanguageModel, S: Storage> {
    client: &'a QueryClient<L, S>,
    options: WorkflowOptions,
}

impl<'a, L: LanguageModel, S: Storage> CompanyWorkflow<'a, L, S> {
    pub fn new(client: &'a QueryClient<L, S>, options: WorkflowOptions) -> Self {
        Self { client, options }
    }

    /// Never fails: the first error stops the remaining steps and is stored
    /// in `CompanyResult::error` next to whatever was already filled in.
    pub async fn process(&self, record: &CompanyRecord) -> CompanyResult {
        let mut result = CompanyResult::new(record.clone());

        tracing::info!("===== Processing {} =====", record.name);

        if let Err(e) = self.run_steps(record, &mut result).await {
            tracing::error!("❌ {} failed: {}", record.name, e);
            result.error = Some(e.to_string());
            return result;
        }

        tracing::info!("✅ {} done", record.name);
        result
    }

    async fn run_steps(&self, record: &CompanyRecord, result: &mut CompanyResult) -> Result<()> {
        tracing::info!("1. Checking address...");
        let answer = self
            .client
            .query(
                &prompts::address_check(&record.name, &record.address),
                self.options.search_first,
                self.options.persist_responses,
                Some(ADDRESS_VERIFICATION_DIR),
            )
            .await?;
        let verification = enforce_format(
            self.client,
            &answer.generated_text,
            prompts::ADDRESS_FORMAT_INSTRUCTION,
        )
        .await?;
        tracing::info!("Address verification: {}", verification);
        result.address_verification = Some(verification);

        tracing::info!("2. Researching technology initiatives...");
        let research = self
            .client
            .query(
                &prompts::technology_research(&record.name, &record.address),
                self.options.search_first,
                self.options.persist_responses,
                Some(TECHNOLOGY_RESEARCH_DIR),
            )
            .await?;
        result.technology_research = Some(research.generated_text);

        // 調查結果不做任何檢查，直接交給下一步
        tracing::info!("3. Drafting CXO letter...");
        let research_text = result.technology_research.as_deref().unwrap_or_default();
        let draft = self
            .client
            .query(
                &prompts::letter_draft(&record.name, &record.address, research_text),
                false,
                self.options.persist_responses,
                Some(CXO_LETTER_DIR),
            )
            .await?;
        let letter = enforce_format(
            self.client,
            &draft.generated_text,
            prompts::LETTER_FORMAT_INSTRUCTION,
        )
        .await?;
        result.cxo_letter = Some(letter);

        Ok(())
    }
}
