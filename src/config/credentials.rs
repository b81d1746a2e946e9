//! API credential resolution.
//!
//! Credentials come from the first provider in an ordered chain that yields
//! both keys: a script-style TOML file, then a JSON file, then environment
//! variables. Presence is the only check; nothing is sent over the network.

use crate::utils::error::{OutreachError, Result};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const LLM_KEY_VAR: &str = "CLAUDE_API_KEY";
pub const SEARCH_KEY_VAR: &str = "PERPLEXITY_API_KEY";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub llm_api_key: String,
    /// Reserved for the search step, which is not wired up yet.
    pub search_api_key: String,
}

impl Credentials {
    /// Returns `Some` only when both values are usable.
    pub fn from_parts(llm_api_key: Option<String>, search_api_key: Option<String>) -> Option<Self> {
        let llm_api_key = usable(llm_api_key)?;
        let search_api_key = usable(search_api_key)?;
        Some(Self {
            llm_api_key,
            search_api_key,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("llm_api_key", &"<redacted>")
            .field("search_api_key", &"<redacted>")
            .finish()
    }
}

/// Blank values and unresolved `${VAR}` placeholders count as absent.
fn usable(value: Option<String>) -> Option<String> {
    let value = value?.trim().to_string();
    if value.is_empty() || (value.starts_with("${") && value.ends_with('}')) {
        None
    } else {
        Some(value)
    }
}

pub trait CredentialProvider: Send + Sync {
    fn name(&self) -> String;

    /// `Ok(None)` means this source has nothing to offer; `Err` means the
    /// source exists but could not be read.
    fn try_load(&self) -> Result<Option<Credentials>>;
}

/// TOML file exposing `CLAUDE_API_KEY` and `PERPLEXITY_API_KEY` as top-level values.
pub struct ScriptFileProvider {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ScriptCredentials {
    #[serde(rename = "CLAUDE_API_KEY")]
    claude_api_key: Option<String>,
    #[serde(rename = "PERPLEXITY_API_KEY")]
    perplexity_api_key: Option<String>,
}

impl ScriptFileProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 從 TOML 字串解析憑證
    pub fn parse(content: &str) -> Result<Option<Credentials>> {
        let processed_content = substitute_env_vars(content)?;

        let parsed: ScriptCredentials =
            toml::from_str(&processed_content).map_err(|e| OutreachError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        Ok(Credentials::from_parts(
            parsed.claude_api_key,
            parsed.perplexity_api_key,
        ))
    }
}

impl CredentialProvider for ScriptFileProvider {
    fn name(&self) -> String {
        format!("script config '{}'", self.path.display())
    }

    fn try_load(&self) -> Result<Option<Credentials>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        std::fs::read_to_string(&self.path)
            .map_err(OutreachError::from)
            .and_then(|content| Self::parse(&content))
            .map_err(|e| source_error(self.name(), e))
    }
}

/// 替換環境變數 (例如 ${API_KEY})；未設定的變數保留原樣
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OutreachError::ConfigError {
        message: format!("invalid placeholder pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

fn source_error(provider: String, cause: impl fmt::Display) -> OutreachError {
    OutreachError::CredentialSourceError {
        provider,
        message: cause.to_string(),
    }
}

/// JSON file with `claude_api_key` and `perplexity_api_key` keys.
pub struct JsonFileProvider {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct JsonCredentials {
    claude_api_key: Option<String>,
    perplexity_api_key: Option<String>,
}

impl JsonFileProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CredentialProvider for JsonFileProvider {
    fn name(&self) -> String {
        format!("JSON config '{}'", self.path.display())
    }

    fn try_load(&self) -> Result<Option<Credentials>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| source_error(self.name(), e))?;
        let parsed: JsonCredentials =
            serde_json::from_str(&content).map_err(|e| source_error(self.name(), e))?;
        Ok(Credentials::from_parts(
            parsed.claude_api_key,
            parsed.perplexity_api_key,
        ))
    }
}

pub struct EnvProvider {
    llm_var: String,
    search_var: String,
}

impl EnvProvider {
    pub fn new() -> Self {
        Self::with_vars(LLM_KEY_VAR, SEARCH_KEY_VAR)
    }

    pub fn with_vars(llm_var: &str, search_var: &str) -> Self {
        Self {
            llm_var: llm_var.to_string(),
            search_var: search_var.to_string(),
        }
    }
}

impl Default for EnvProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for EnvProvider {
    fn name(&self) -> String {
        format!("environment ({}, {})", self.llm_var, self.search_var)
    }

    fn try_load(&self) -> Result<Option<Credentials>> {
        Ok(Credentials::from_parts(
            std::env::var(&self.llm_var).ok(),
            std::env::var(&self.search_var).ok(),
        ))
    }
}

/// Ordered list of providers; the first one that yields credentials wins.
pub struct CredentialChain {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialChain {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    /// Script file, then JSON file, then environment variables.
    pub fn standard<P: AsRef<Path>, Q: AsRef<Path>>(script_path: P, json_path: Q) -> Self {
        Self::new(vec![
            Box::new(ScriptFileProvider::new(script_path)),
            Box::new(JsonFileProvider::new(json_path)),
            Box::new(EnvProvider::new()),
        ])
    }

    /// Returns the credentials and the name of the provider that supplied them.
    pub fn resolve(&self) -> Result<(Credentials, String)> {
        let mut tried = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let name = provider.name();
            match provider.try_load() {
                Ok(Some(credentials)) => {
                    tracing::info!("🔑 Loaded API credentials from {}", name);
                    return Ok((credentials, name));
                }
                Ok(None) => {
                    tracing::debug!("No usable credentials in {}", name);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Failed to load credentials from {}: {}", name, e);
                }
            }
            tried.push(name);
        }

        Err(OutreachError::MissingCredentialsError { tried })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    struct FixedProvider(Option<Credentials>);

    impl CredentialProvider for FixedProvider {
        fn name(&self) -> String {
            "fixed".to_string()
        }

        fn try_load(&self) -> Result<Option<Credentials>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenProvider;

    impl CredentialProvider for BrokenProvider {
        fn name(&self) -> String {
            "broken".to_string()
        }

        fn try_load(&self) -> Result<Option<Credentials>> {
            Err(source_error(self.name(), "unreadable"))
        }
    }

    fn creds(llm: &str, search: &str) -> Credentials {
        Credentials::from_parts(Some(llm.to_string()), Some(search.to_string())).unwrap()
    }

    #[test]
    fn test_from_parts_requires_both_keys() {
        assert!(Credentials::from_parts(Some("a".into()), Some("b".into())).is_some());
        assert!(Credentials::from_parts(Some("a".into()), None).is_none());
        assert!(Credentials::from_parts(Some("  ".into()), Some("b".into())).is_none());
        assert!(Credentials::from_parts(Some("${UNSET}".into()), Some("b".into())).is_none());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let rendered = format!("{:?}", creds("sk-secret", "pplx-secret"));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_script_file_parsing() {
        let content = r#"
CLAUDE_API_KEY = "sk-ant-123"
PERPLEXITY_API_KEY = "pplx-456"
"#;
        let loaded = ScriptFileProvider::parse(content).unwrap().unwrap();
        assert_eq!(loaded.llm_api_key, "sk-ant-123");
        assert_eq!(loaded.search_api_key, "pplx-456");
    }

    #[test]
    fn test_script_file_env_substitution() {
        std::env::set_var("CXO_TEST_SCRIPT_LLM_KEY", "sk-from-env");

        let content = r#"
CLAUDE_API_KEY = "${CXO_TEST_SCRIPT_LLM_KEY}"
PERPLEXITY_API_KEY = "pplx-456"
"#;
        let loaded = ScriptFileProvider::parse(content).unwrap().unwrap();
        assert_eq!(loaded.llm_api_key, "sk-from-env");

        std::env::remove_var("CXO_TEST_SCRIPT_LLM_KEY");
    }

    #[test]
    fn test_script_file_missing_key_is_absent() {
        let content = r#"CLAUDE_API_KEY = "sk-ant-123""#;
        assert!(ScriptFileProvider::parse(content).unwrap().is_none());
    }

    #[test]
    fn test_script_file_invalid_toml_is_error() {
        assert!(ScriptFileProvider::parse("CLAUDE_API_KEY = ").is_err());
    }

    #[test]
    fn test_missing_files_yield_absent() {
        let temp_dir = TempDir::new().unwrap();
        let script = ScriptFileProvider::new(temp_dir.path().join("config.toml"));
        let json = JsonFileProvider::new(temp_dir.path().join("api_keys.json"));

        assert!(script.try_load().unwrap().is_none());
        assert!(json.try_load().unwrap().is_none());
    }

    #[test]
    fn test_unparsable_files_report_their_source() {
        let temp_dir = TempDir::new().unwrap();
        let script_path = temp_dir.path().join("config.toml");
        let json_path = temp_dir.path().join("api_keys.json");
        std::fs::write(&script_path, "CLAUDE_API_KEY = ").unwrap();
        std::fs::write(&json_path, "{not json").unwrap();

        match ScriptFileProvider::new(&script_path).try_load() {
            Err(OutreachError::CredentialSourceError { provider, message }) => {
                assert!(provider.contains("config.toml"));
                assert!(message.contains("TOML parsing error"));
            }
            other => panic!("expected CredentialSourceError, got {:?}", other),
        }
        match JsonFileProvider::new(&json_path).try_load() {
            Err(err @ OutreachError::CredentialSourceError { .. }) => {
                assert!(err.to_string().contains("api_keys.json"));
            }
            other => panic!("expected CredentialSourceError, got {:?}", other),
        }
    }

    #[test]
    fn test_json_file_provider() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{"claude_api_key": "sk-json", "perplexity_api_key": "pplx-json"}"#)
            .unwrap();

        let loaded = JsonFileProvider::new(temp_file.path())
            .try_load()
            .unwrap()
            .unwrap();
        assert_eq!(loaded.llm_api_key, "sk-json");
        assert_eq!(loaded.search_api_key, "pplx-json");
    }

    #[test]
    fn test_env_provider() {
        std::env::set_var("CXO_TEST_ENV_LLM", "sk-env");
        std::env::set_var("CXO_TEST_ENV_SEARCH", "pplx-env");

        let provider = EnvProvider::with_vars("CXO_TEST_ENV_LLM", "CXO_TEST_ENV_SEARCH");
        let loaded = provider.try_load().unwrap().unwrap();
        assert_eq!(loaded.llm_api_key, "sk-env");

        std::env::remove_var("CXO_TEST_ENV_SEARCH");
        assert!(provider.try_load().unwrap().is_none());

        std::env::remove_var("CXO_TEST_ENV_LLM");
    }

    #[test]
    fn test_chain_first_match_wins() {
        let chain = CredentialChain::new(vec![
            Box::new(FixedProvider(None)),
            Box::new(FixedProvider(Some(creds("first", "s1")))),
            Box::new(FixedProvider(Some(creds("second", "s2")))),
        ]);

        let (loaded, _) = chain.resolve().unwrap();
        assert_eq!(loaded.llm_api_key, "first");
    }

    #[test]
    fn test_chain_skips_broken_provider() {
        let chain = CredentialChain::new(vec![
            Box::new(BrokenProvider),
            Box::new(FixedProvider(Some(creds("fallback", "s")))),
        ]);

        let (loaded, _) = chain.resolve().unwrap();
        assert_eq!(loaded.llm_api_key, "fallback");
    }

    #[test]
    fn test_chain_without_credentials_fails() {
        let chain = CredentialChain::new(vec![
            Box::new(FixedProvider(None)),
            Box::new(BrokenProvider),
        ]);

        match chain.resolve() {
            Err(OutreachError::MissingCredentialsError { tried }) => {
                assert_eq!(tried, vec!["fixed".to_string(), "broken".to_string()]);
            }
            other => panic!("expected MissingCredentialsError, got {:?}", other),
        }
    }

    #[test]
    fn test_standard_chain_prefers_script_over_json() {
        let temp_dir = TempDir::new().unwrap();
        let script_path = temp_dir.path().join("config.toml");
        let json_path = temp_dir.path().join("api_keys.json");

        std::fs::write(
            &script_path,
            "CLAUDE_API_KEY = \"sk-script\"\nPERPLEXITY_API_KEY = \"pplx-script\"\n",
        )
        .unwrap();
        std::fs::write(
            &json_path,
            r#"{"claude_api_key": "sk-json", "perplexity_api_key": "pplx-json"}"#,
        )
        .unwrap();

        let (loaded, source) = CredentialChain::standard(&script_path, &json_path)
            .resolve()
            .unwrap();
        assert_eq!(loaded.llm_api_key, "sk-script");
        assert!(source.starts_with("script config"));

        std::fs::write(&script_path, "CLAUDE_API_KEY = \"sk-script\"\n").unwrap();
        let (loaded, source) = CredentialChain::standard(&script_path, &json_path)
            .resolve()
            .unwrap();
        assert_eq!(loaded.llm_api_key, "sk-json");
        assert!(source.starts_with("JSON config"));
    }
}
