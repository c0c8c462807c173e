use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

pub use api_hugo_engine::context::{DEFAULT_URI_ROOT, DEFAULT_VARIABLE_TABLE_THRESHOLD};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Debug output, including skipped packages.
    Verbose,
    #[default]
    Info,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlineKind {
    #[default]
    Crlf,
    Lf,
    Os,
}

/// One prefix or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackagePrefixes {
    One(String),
    Many(Vec<String>),
}

impl PackagePrefixes {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            PackagePrefixes::One(prefix) => vec![prefix.clone()],
            PackagePrefixes::Many(prefixes) => prefixes.clone(),
        }
    }
}

/// Contents of `api-documenter.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumenterConfig {
    pub uri_root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_packages_starting_with: Option<PackagePrefixes>,
    pub log_level: LogLevel,
    pub output_file_name_suffix: String,
    pub newline_kind: NewlineKind,
    pub variable_table_threshold: usize,
}

impl Default for DocumenterConfig {
    fn default() -> Self {
        Self {
            uri_root: DEFAULT_URI_ROOT.to_string(),
            only_packages_starting_with: None,
            log_level: LogLevel::default(),
            output_file_name_suffix: String::new(),
            newline_kind: NewlineKind::default(),
            variable_table_threshold: DEFAULT_VARIABLE_TABLE_THRESHOLD,
        }
    }
}

impl DocumenterConfig {
    pub const FILENAME: &'static str = "api-documenter.toml";

    /// Loads a config file. A missing file is `Ok(None)`.
    ///
    /// `~` and `$VAR` in the path are expanded first.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let config_path =
            Self::expand_path(config_path).unwrap_or_else(|| config_path.to_path_buf());
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: DocumenterConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Loads `api-documenter.toml` from `dir`, if there is one.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(dir.as_ref().join(Self::FILENAME))
    }

    pub fn package_prefixes(&self) -> Vec<String> {
        self.only_packages_starting_with
            .as_ref()
            .map(PackagePrefixes::to_vec)
            .unwrap_or_default()
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_keys_missing() {
        let config: DocumenterConfig = toml::from_str("").unwrap();

        assert_eq!(config, DocumenterConfig::default());
        assert_eq!(config.uri_root, "/docs/apis/");
        assert_eq!(config.variable_table_threshold, 10);
        assert_eq!(config.newline_kind, NewlineKind::Crlf);
        assert!(config.package_prefixes().is_empty());
    }

    #[test]
    fn test_defaults_match_render_options() {
        let config = DocumenterConfig::default();
        let options = api_hugo_engine::RenderOptions::default();

        assert_eq!(config.uri_root, options.uri_root);
        assert_eq!(config.variable_table_threshold, options.variable_table_threshold);
        assert_eq!(config.output_file_name_suffix, options.output_file_name_suffix);
    }

    #[rstest]
    #[case(r#"only_packages_starting_with = "@scope/""#, vec!["@scope/"])]
    #[case(
        r#"only_packages_starting_with = ["@scope/", "@other/"]"#,
        vec!["@scope/", "@other/"]
    )]
    fn test_prefixes_accept_string_or_list(#[case] toml_str: &str, #[case] expected: Vec<&str>) {
        let config: DocumenterConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.package_prefixes(), expected);
    }

    #[rstest]
    #[case("error", LogLevel::Error)]
    #[case("verbose", LogLevel::Verbose)]
    fn test_log_level_names(#[case] name: &str, #[case] expected: LogLevel) {
        let config: DocumenterConfig =
            toml::from_str(&format!("log_level = \"{name}\"")).unwrap();

        assert_eq!(config.log_level, expected);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = DocumenterConfig::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join(DocumenterConfig::FILENAME);
        let test_config = DocumenterConfig {
            uri_root: "/api/".into(),
            only_packages_starting_with: Some(PackagePrefixes::One("@scope/".into())),
            newline_kind: NewlineKind::Lf,
            ..DocumenterConfig::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded = DocumenterConfig::load_from_dir(temp_dir.path())
            .unwrap()
            .unwrap();

        assert_eq!(loaded, test_config);
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join(DocumenterConfig::FILENAME);
        std::fs::write(&config_file, "newline_kind = \"mac\"").unwrap();

        let error = DocumenterConfig::load_from_path(&config_file).unwrap_err();

        assert!(matches!(error, ConfigError::ConfigParseError { .. }));
        assert!(error.to_string().contains(DocumenterConfig::FILENAME));
    }

    #[test]
    fn test_config_path_with_env_var() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(DocumenterConfig::FILENAME),
            "uri_root = \"/env/\"",
        )
        .unwrap();
        unsafe {
            env::set_var("API_HUGO_TEST_CONFIG_DIR", temp_dir.path());
        }

        let loaded =
            DocumenterConfig::load_from_path("$API_HUGO_TEST_CONFIG_DIR/api-documenter.toml")
                .unwrap()
                .unwrap();

        assert_eq!(loaded.uri_root, "/env/");

        unsafe {
            env::remove_var("API_HUGO_TEST_CONFIG_DIR");
        }
    }
}
