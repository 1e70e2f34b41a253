//! Language-model credential lookup over an ordered list of sources.
//!
//! [`CredentialChain`] fixes the order: secret store file, process environment, local dotenv file.
//! Absence is a valid state: enrichment simply falls back to the raw summary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One place a credential may live.
pub trait CredentialSource: Send + Sync {
    /// Short label for diagnostics ("secrets", "env", "dotenv").
    fn name(&self) -> &'static str;

    fn lookup(&self, key: &str) -> Option<String>;
}

/// A credential value and the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub value: String,
    pub source: &'static str,
}

impl ResolvedCredential {
    /// First 10 characters followed by "...", for logs and diagnostics.
    pub fn masked(&self) -> String {
        mask(&self.value)
    }
}

pub fn mask(value: &str) -> String {
    let prefix: String = value.chars().take(10).collect();
    format!("{}...", prefix)
}

/// Return the first non-blank value for `key`, trying `sources` in order.
pub fn resolve_credential(
    sources: &[&dyn CredentialSource],
    key: &str,
) -> Option<ResolvedCredential> {
    sources.iter().find_map(|src| {
        let value = src.lookup(key)?;
        let value = value.trim();
        if value.is_empty() {
            debug!(source = src.name(), "credential source has blank value");
            return None;
        }
        debug!(source = src.name(), "credential found");
        Some(ResolvedCredential {
            value: value.to_string(),
            source: src.name(),
        })
    })
}

/// The three credential tiers in lookup order.
pub struct CredentialChain {
    secrets: SecretsFileSource,
    env: EnvSource,
    dotenv: DotenvFileSource,
}

impl CredentialChain {
    pub fn new(secrets_path: impl AsRef<Path>, env_file: impl AsRef<Path>) -> Self {
        Self {
            secrets: SecretsFileSource::new(secrets_path),
            env: EnvSource,
            dotenv: DotenvFileSource::new(env_file),
        }
    }

    pub fn resolve(&self, key: &str) -> Option<ResolvedCredential> {
        resolve_credential(&[&self.secrets, &self.env, &self.dotenv], key)
    }
}

/// TOML secret store, e.g. `OPENAI_API_KEY = "sk-..."`. Missing file means no value.
pub struct SecretsFileSource {
    path: PathBuf,
}

impl SecretsFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CredentialSource for SecretsFileSource {
    fn name(&self) -> &'static str {
        "secrets"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        if !self.path.is_file() {
            return None;
        }
        let file = config::File::new(&self.path.to_string_lossy(), config::FileFormat::Toml)
            .required(false);
        let table = config::Config::builder()
            .add_source(file)
            .build()
            .and_then(|c| c.try_deserialize::<HashMap<String, config::Value>>())
            .map_err(|e| debug!(path = %self.path.display(), error = %e, "secrets file unreadable"))
            .ok()?;
        // Key case is not preserved by every config version.
        table
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.into_string().ok())
    }
}

/// Process environment.
pub struct EnvSource;

impl CredentialSource for EnvSource {
    fn name(&self) -> &'static str {
        "env"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Dotenv file read directly, without exporting anything into the process environment.
pub struct DotenvFileSource {
    path: PathBuf,
}

impl DotenvFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CredentialSource for DotenvFileSource {
    fn name(&self) -> &'static str {
        "dotenv"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let iter = dotenv::from_path_iter(&self.path).ok()?;
        iter.filter_map(Result::ok)
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Static(&'static str, HashMap<&'static str, &'static str>);

    impl Static {
        fn with(name: &'static str, key: &'static str, value: &'static str) -> Self {
            Self(name, HashMap::from([(key, value)]))
        }

        fn empty(name: &'static str) -> Self {
            Self(name, HashMap::new())
        }
    }

    impl CredentialSource for Static {
        fn name(&self) -> &'static str {
            self.0
        }

        fn lookup(&self, key: &str) -> Option<String> {
            self.1.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn first_source_wins() {
        let a = Static::with("secrets", "K", "from-secrets");
        let b = Static::with("env", "K", "from-env");
        let got = resolve_credential(&[&a, &b], "K").unwrap();
        assert_eq!(got.value, "from-secrets");
        assert_eq!(got.source, "secrets");
    }

    #[test]
    fn blank_values_are_skipped() {
        let a = Static::with("secrets", "K", "   ");
        let b = Static::empty("env");
        let c = Static::with("dotenv", "K", " sk-file ");
        let got = resolve_credential(&[&a, &b, &c], "K").unwrap();
        assert_eq!(got.value, "sk-file");
        assert_eq!(got.source, "dotenv");
    }

    #[test]
    fn all_empty_is_none() {
        let a = Static::empty("secrets");
        let b = Static::empty("env");
        let c = Static::empty("dotenv");
        assert!(resolve_credential(&[&a, &b, &c], "K").is_none());
    }

    #[test]
    fn mask_keeps_ten_chars() {
        assert_eq!(mask("sk-abcdefghijklmnop"), "sk-abcdefg...");
        assert_eq!(mask("short"), "short...");
    }

    #[test]
    fn secrets_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, "OPENAI_API_KEY = \"sk-secret\"\n").unwrap();

        let src = SecretsFileSource::new(&path);
        assert_eq!(src.lookup("OPENAI_API_KEY").as_deref(), Some("sk-secret"));
        assert!(src.lookup("OTHER").is_none());
    }

    #[test]
    fn missing_files_yield_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(
            SecretsFileSource::new(dir.path().join("nope.toml"))
                .lookup("OPENAI_API_KEY")
                .is_none()
        );
        assert!(
            DotenvFileSource::new(dir.path().join(".env"))
                .lookup("OPENAI_API_KEY")
                .is_none()
        );
    }

    #[test]
    fn dotenv_file_is_read_without_exporting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "OTHER=1\nWIKI_ENRICH_TEST_DOTENV_KEY=sk-dotenv\n").unwrap();

        let src = DotenvFileSource::new(&path);
        assert_eq!(
            src.lookup("WIKI_ENRICH_TEST_DOTENV_KEY").as_deref(),
            Some("sk-dotenv")
        );
        assert!(std::env::var("WIKI_ENRICH_TEST_DOTENV_KEY").is_err());
    }

    fn chain_files(dir: &Path, secrets: &str, dotenv: &str) -> CredentialChain {
        let secrets_path = dir.join("secrets.toml");
        let env_path = dir.join(".env");
        std::fs::write(&secrets_path, secrets).unwrap();
        std::fs::write(&env_path, dotenv).unwrap();
        CredentialChain::new(secrets_path, env_path)
    }

    #[test]
    fn chain_prefers_secrets_over_env() {
        const KEY: &str = "WIKI_ENRICH_TEST_CHAIN_KEY_SECRETS";
        let dir = tempfile::tempdir().unwrap();
        let chain = chain_files(
            dir.path(),
            &format!("{KEY} = \"sk-secrets\"\n"),
            &format!("{KEY}=sk-dotenv\n"),
        );
        unsafe { std::env::set_var(KEY, "sk-env") };

        let got = chain.resolve(KEY).unwrap();

        assert_eq!(got.value, "sk-secrets");
        assert_eq!(got.source, "secrets");
    }

    #[test]
    fn chain_prefers_env_over_dotenv() {
        const KEY: &str = "WIKI_ENRICH_TEST_CHAIN_KEY_ENV";
        let dir = tempfile::tempdir().unwrap();
        let chain = chain_files(dir.path(), "OTHER = \"x\"\n", &format!("{KEY}=sk-dotenv\n"));
        unsafe { std::env::set_var(KEY, "sk-env") };

        let got = chain.resolve(KEY).unwrap();

        assert_eq!(got.value, "sk-env");
        assert_eq!(got.source, "env");
    }

    #[test]
    fn chain_falls_back_to_dotenv() {
        const KEY: &str = "WIKI_ENRICH_TEST_CHAIN_KEY_DOTENV";
        let dir = tempfile::tempdir().unwrap();
        let chain = chain_files(dir.path(), "OTHER = \"x\"\n", &format!("{KEY}=sk-dotenv\n"));

        let got = chain.resolve(KEY).unwrap();

        assert_eq!(got.value, "sk-dotenv");
        assert_eq!(got.source, "dotenv");
        assert!(chain.resolve("WIKI_ENRICH_TEST_CHAIN_KEY_ABSENT").is_none());
    }

    #[test]
    fn env_source_reads_process_env() {
        assert!(EnvSource.lookup("WIKI_ENRICH_TEST_UNSET_VAR_8F3A").is_none());
        assert!(EnvSource.lookup("PATH").is_some());
    }
}
