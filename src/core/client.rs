use crate::core::{LanguageModel, QueryRecord, QueryResponse, Storage};
use crate::utils::error::Result;
use chrono::Local;
use std::sync::atomic::{AtomicU64, Ordering};

/// Wraps a [`LanguageModel`] with the search-first switch and optional
/// persistence of every prompt/response pair.
pub struct QueryClient<L: LanguageModel, S: Storage> {
    model: L,
    storage: S,
    sequence: AtomicU64,
}

impl<L: LanguageModel, S: Storage> QueryClient<L, S> {
    pub fn new(model: L, storage: S) -> Self {
        Self {
            model,
            storage,
            sequence: AtomicU64::new(0),
        }
    }

    /// Sends `text` as a single-turn prompt.
    ///
    /// `search_first` is accepted but not implemented: no search happens and
    /// `search_results` is always `None`. When `persist` is set and an
    /// `output_location` is given, the exchange is saved as JSON under that
    /// location; a failed save is logged and does not fail the query.
    pub async fn query(
        &self,
        text: &str,
        search_first: bool,
        persist: bool,
        output_location: Option<&str>,
    ) -> Result<QueryResponse> {
        tracing::debug!("Query: {}", text);

        if search_first {
            tracing::debug!("Search step requested but not implemented, skipping");
        }

        let generated_text = self.model.complete(text).await?;
        tracing::debug!("Response: {}...", preview(&generated_text, 100));

        let response = QueryResponse {
            generated_text,
            search_results: None,
        };

        if let (true, Some(location)) = (persist, output_location) {
            if let Err(e) = self.save_result(text, &response, location).await {
                tracing::warn!("⚠️ Failed to save query result under {}: {}", location, e);
            }
        }

        Ok(response)
    }

    async fn save_result(
        &self,
        query: &str,
        response: &QueryResponse,
        location: &str,
    ) -> Result<String> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let path = format!(
            "{}/result_{}_{:04}.json",
            location.trim_end_matches('/'),
            timestamp,
            seq
        );

        let record = QueryRecord {
            query: query.to_string(),
            generated_text: response.generated_text.clone(),
            search_results: response.search_results.clone(),
            timestamp,
        };
        let data = serde_json::to_vec_pretty(&record)?;
        self.storage.write_file(&path, &data).await?;

        tracing::debug!("Saved query result: {}", path);
        Ok(path)
    }
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
