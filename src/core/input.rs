use crate::core::CompanyRecord;
use crate::utils::error::{OutreachError, Result};
use std::path::Path;

/// Reads the company list. A missing or unreadable file is an error.
pub fn read_companies<P: AsRef<Path>>(path: P) -> Result<Vec<CompanyRecord>> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| OutreachError::InputFileError {
        path: path.display().to_string(),
        source,
    })?;
    parse_companies(&data)
}

/// Parses tab-separated rows of `name, address, [representative], [title]`.
///
/// Empty cells at either end of a line do not count as fields, so rows with
/// fewer than two real fields (blank lines included) are skipped with a
/// warning. Only the first whitespace-delimited token of the title column is
/// kept.
pub fn parse_companies(data: &[u8]) -> Result<Vec<CompanyRecord>> {
    // csv 讀取時會直接略過空白行，這裡先補上警告
    warn_blank_lines(data);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(data);

    let mut companies = Vec::new();
    for row in reader.records() {
        let row = row?;
        let fields = line_fields(&row);

        if fields.len() < 2 {
            tracing::warn!("⚠️ Skipping malformed line: {:?}", fields.join("\t"));
            continue;
        }

        let representative_name = fields.get(2).copied().unwrap_or_default();
        let raw_title = fields.get(3).copied().unwrap_or_default();
        let representative_title = raw_title.split_whitespace().next().unwrap_or_default();
        if representative_title != raw_title {
            tracing::debug!(
                "Title '{}' shortened to '{}' for {}",
                raw_title,
                representative_title,
                fields[0]
            );
        }

        companies.push(
            CompanyRecord::new(fields[0], fields[1])
                .with_representative(representative_name, representative_title),
        );
    }

    Ok(companies)
}

/// Trimmed cells with the empty ones at both ends of the line removed.
fn line_fields(row: &csv::StringRecord) -> Vec<&str> {
    let fields: Vec<&str> = row.iter().map(str::trim).collect();
    let start = fields
        .iter()
        .position(|f| !f.is_empty())
        .unwrap_or(fields.len());
    let end = fields
        .iter()
        .rposition(|f| !f.is_empty())
        .map_or(start, |last| last + 1);
    fields[start..end].to_vec()
}

fn warn_blank_lines(data: &[u8]) {
    let lines: Vec<&[u8]> = data.split(|&b| b == b'\n').collect();
    // 結尾換行後的空字串不算一行
    let count = if data.ends_with(b"\n") || data.is_empty() {
        lines.len() - 1
    } else {
        lines.len()
    };

    for (index, line) in lines.iter().take(count).enumerate() {
        if line.iter().all(|&b| b == b'\r') {
            tracing::warn!("⚠️ Skipping malformed line {}: \"\"", index + 1);
        }
    }
}
