use crate::core::client::QueryClient;
use crate::core::prompts;
use crate::core::{LanguageModel, Storage};
use crate::utils::error::Result;

/// Asks the model to restate `text` according to `instruction`.
///
/// Best effort only: the reply is trimmed but never checked against the
/// instruction, so callers must not assume it conforms. Never searches and
/// never persists.
pub async fn enforce_format<L: LanguageModel, S: Storage>(
    client: &QueryClient<L, S>,
    text: &str,
    instruction: &str,
) -> Result<String> {
    let prompt = prompts::format_compliance(text, instruction);
    let response = client.query(&prompt, false, false, None).await?;
    Ok(response.generated_text.trim().to_string())
}
