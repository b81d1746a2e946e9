#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
    pub const DEFAULT_API_BASE_URL: &str = "https://api.anthropic.com";

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "cxo-outreach")]
    #[command(about = "Verify company addresses, research technology initiatives and draft CXO letters")]
    pub struct CliConfig {
        /// Tab-separated input: name, address, [representative], [title]
        #[arg(long, default_value = "testinput.tsv")]
        pub input: String,

        #[arg(long, default_value = "results")]
        pub results_dir: String,

        /// Script-style credential file (CLAUDE_API_KEY / PERPLEXITY_API_KEY)
        #[arg(long, default_value = "config.toml")]
        pub script_config: String,

        /// JSON credential file (claude_api_key / perplexity_api_key)
        #[arg(long, default_value = "api_keys.json")]
        pub json_config: String,

        #[arg(long, default_value = DEFAULT_API_BASE_URL)]
        pub api_base_url: String,

        #[arg(long, default_value = DEFAULT_MODEL)]
        pub model: String,

        #[arg(long, default_value_t = 2000)]
        pub max_tokens: u32,

        /// Search the web before prompting. Not implemented yet; accepted and ignored.
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        pub search_first: bool,

        /// Save every prompt/response pair as JSON under the results directory
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        pub persist_responses: bool,

        /// Process at most this many companies
        #[arg(long)]
        pub max_records: Option<usize>,

        /// Parse input and resolve credentials without calling the API
        #[arg(long)]
        pub dry_run: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log elapsed time and memory per phase")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            &self.input
        }

        fn results_dir(&self) -> &str {
            &self.results_dir
        }

        fn api_base_url(&self) -> &str {
            &self.api_base_url
        }

        fn model(&self) -> &str {
            &self.model
        }

        fn max_tokens(&self) -> u32 {
            self.max_tokens
        }

        fn search_first(&self) -> bool {
            self.search_first
        }

        fn persist_responses(&self) -> bool {
            self.persist_responses
        }

        fn max_records(&self) -> Option<usize> {
            self.max_records
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("input", &self.input)?;
            validation::validate_results_dir("results_dir", &self.results_dir)?;
            validation::validate_path("script_config", &self.script_config)?;
            validation::validate_path("json_config", &self.json_config)?;
            validation::validate_distinct_paths(
                "json_config",
                &self.json_config,
                "script_config",
                &self.script_config,
            )?;
            validation::validate_distinct_paths("results_dir", &self.results_dir, "input", &self.input)?;
            validation::validate_url("api_base_url", &self.api_base_url)?;
            validation::validate_non_empty_string("model", &self.model)?;
            validation::validate_range("max_tokens", self.max_tokens, 1, 8192)?;
            if let Some(max_records) = self.max_records {
                validation::validate_positive_number("max_records", max_records, 1)?;
            }
            Ok(())
        }
    }

}

#[cfg(feature = "cli")]
pub use cli_config::{CliConfig, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
