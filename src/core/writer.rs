use crate::core::{CompanyResult, Storage, WriteReport};
use crate::utils::error::{OutreachError, Result};

/// The output tables, one TSV file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    AddressVerification,
    TechnologyResearch,
    CxoLetter,
    /// Only written when at least one company failed.
    Errors,
}

impl OutputKind {
    pub const PRIMARY: [OutputKind; 3] = [
        OutputKind::AddressVerification,
        OutputKind::TechnologyResearch,
        OutputKind::CxoLetter,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            OutputKind::AddressVerification => "address_verification",
            OutputKind::TechnologyResearch => "technology_research",
            OutputKind::CxoLetter => "cxo_letter",
            OutputKind::Errors => "errors",
        }
    }

    pub fn file_name(&self, timestamp: &str) -> String {
        format!("{}_{}.tsv", self.slug(), timestamp)
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            OutputKind::AddressVerification => &["企業名", "住所", "住所確認結果(Yes/No)"],
            OutputKind::TechnologyResearch => &["企業名", "調査結果"],
            OutputKind::CxoLetter => &["企業名", "CXOレター"],
            OutputKind::Errors => &["企業名", "エラー"],
        }
    }

    /// Missing values become empty cells.
    pub fn row<'a>(&self, result: &'a CompanyResult) -> Vec<&'a str> {
        let name = result.record.name.as_str();
        match self {
            OutputKind::AddressVerification => vec![
                name,
                result.record.address.as_str(),
                result.address_verification.as_deref().unwrap_or_default(),
            ],
            OutputKind::TechnologyResearch => vec![
                name,
                result.technology_research.as_deref().unwrap_or_default(),
            ],
            OutputKind::CxoLetter => vec![name, result.cxo_letter.as_deref().unwrap_or_default()],
            OutputKind::Errors => vec![name, result.error.as_deref().unwrap_or_default()],
        }
    }
}

/// Serializes one output table. Cells containing tabs, quotes or newlines are
/// quoted so a TSV reader gets the original text back.
pub fn render_tsv(kind: OutputKind, results: &[CompanyResult]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(Vec::new());

    writer.write_record(kind.header())?;
    for result in results.iter().filter(|r| kind != OutputKind::Errors || !r.is_success()) {
        writer.write_record(kind.row(result))?;
    }

    writer
        .into_inner()
        .map_err(|e| OutreachError::IoError(e.into_error()))
}

pub struct ResultWriter<S: Storage> {
    storage: S,
    timestamp: String,
}

impl<S: Storage> ResultWriter<S> {
    pub fn new(storage: S, timestamp: String) -> Self {
        Self { storage, timestamp }
    }

    /// Writes every table independently; one failure does not stop the rest.
    pub async fn write_all(&self, results: &[CompanyResult]) -> WriteReport {
        let mut report = WriteReport::default();

        let mut kinds = OutputKind::PRIMARY.to_vec();
        if results.iter().any(|r| !r.is_success()) {
            kinds.push(OutputKind::Errors);
        }

        for kind in kinds {
            let file_name = kind.file_name(&self.timestamp);
            match self.write_one(kind, &file_name, results).await {
                Ok(()) => {
                    tracing::info!("💾 Saved {} results to {}", kind.slug(), file_name);
                    report.written.push(file_name);
                }
                Err(e) => {
                    tracing::error!("❌ Failed to write {}: {}", file_name, e);
                    report.failures.push((file_name, e.to_string()));
                }
            }
        }

        report
    }

    async fn write_one(
        &self,
        kind: OutputKind,
        file_name: &str,
        results: &[CompanyResult],
    ) -> Result<()> {
        let data = render_tsv(kind, results)?;
        self.storage.write_file(file_name, &data).await
    }
}
