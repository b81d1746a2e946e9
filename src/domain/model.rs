use serde::{Deserialize, Serialize};

/// One company row from the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub representative_name: String,
    #[serde(default)]
    pub representative_title: String,
}

impl CompanyRecord {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            representative_name: String::new(),
            representative_title: String::new(),
        }
    }

    pub fn with_representative(
        mut self,
        name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        self.representative_name = name.into();
        self.representative_title = title.into();
        self
    }
}

/// Outcome of the three-step workflow for one company.
///
/// Either `error` is set (and the content fields hold whatever was filled
/// before the failure) or all three content fields are populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyResult {
    pub record: CompanyRecord,
    pub address_verification: Option<String>,
    pub technology_research: Option<String>,
    pub cxo_letter: Option<String>,
    pub error: Option<String>,
}

impl CompanyResult {
    pub fn new(record: CompanyRecord) -> Self {
        Self {
            record,
            address_verification: None,
            technology_research: None,
            cxo_letter: None,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Text returned by one language-model call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub generated_text: String,
    /// Always `None` until a real search integration exists.
    pub search_results: Option<serde_json::Value>,
}

/// Document persisted per call when raw-response persistence is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    pub generated_text: String,
    pub search_results: Option<serde_json::Value>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Paths of output files that were written.
    pub written: Vec<String>,
    /// `(file, error message)` for each output that failed.
    pub failures: Vec<(String, String)>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub report: WriteReport,
}
