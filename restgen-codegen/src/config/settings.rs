//! Configuration settings for restgen-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation.
///
/// All directories are stored relative to `project_root`; the `*_path`
/// accessors resolve them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Root of the target TypeScript project
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Directory for generated `.gen.ts` files
    #[serde(default = "default_gen_dir")]
    pub gen_dir: PathBuf,

    /// Directory for per-table model class files
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Directory holding the project's service class sources
    #[serde(default = "default_services_dir")]
    pub services_dir: PathBuf,

    /// Directory for the generated API test harness
    #[serde(default = "default_test_dir")]
    pub test_dir: PathBuf,

    /// Directory holding the YAML configuration tree
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Directory for exported API documents
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Environment name; `config/{env}.yaml` overrides `config/base.yaml`
    #[serde(default = "default_env")]
    pub env: String,

    /// Prefix shared by the project's tables, stripped from generated names
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,

    /// MySQL connection URL; when absent the models stage is skipped
    #[serde(default)]
    pub database_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_project_root() -> PathBuf {
    PathBuf::from(defaults::PROJECT_ROOT)
}
fn default_gen_dir() -> PathBuf {
    PathBuf::from(defaults::GEN_DIR)
}
fn default_models_dir() -> PathBuf {
    PathBuf::from(defaults::MODELS_DIR)
}
fn default_services_dir() -> PathBuf {
    PathBuf::from(defaults::SERVICES_DIR)
}
fn default_test_dir() -> PathBuf {
    PathBuf::from(defaults::TEST_DIR)
}
fn default_config_dir() -> PathBuf {
    PathBuf::from(defaults::CONFIG_DIR)
}
fn default_docs_dir() -> PathBuf {
    PathBuf::from(defaults::DOCS_DIR)
}
fn default_env() -> String {
    defaults::ENV.to_string()
}
fn default_table_prefix() -> String {
    defaults::TABLE_PREFIX.to_string()
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            gen_dir: default_gen_dir(),
            models_dir: default_models_dir(),
            services_dir: default_services_dir(),
            test_dir: default_test_dir(),
            config_dir: default_config_dir(),
            docs_dir: default_docs_dir(),
            env: default_env(),
            table_prefix: default_table_prefix(),
            database_url: None,
            log_level: None,
        }
    }
}

impl GenConfig {
    /// Create a default config rooted at the given project directory.
    pub fn default_with_root(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables).
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("restgen").required(false));
        }

        // Override with environment variables (RESTGEN_*)
        builder = builder.add_source(Environment::with_prefix("RESTGEN").separator("__"));

        let config: GenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.project_root.exists() {
            return Err(CodegenError::ValidationError(format!(
                "Project root not found: {}",
                self.project_root.display()
            )));
        }

        if self.env.is_empty() {
            return Err(CodegenError::ValidationError("env is required".into()));
        }

        if let Some(url) = &self.database_url {
            if !url.starts_with("mysql://") {
                return Err(CodegenError::ValidationError(format!(
                    "database_url must be a mysql:// URL, got: {url}"
                )));
            }
        }

        Ok(())
    }

    /// Resolved directory for generated `.gen.ts` files.
    pub fn gen_path(&self) -> PathBuf {
        self.project_root.join(&self.gen_dir)
    }

    /// Resolved directory for model class files.
    pub fn models_path(&self) -> PathBuf {
        self.project_root.join(&self.models_dir)
    }

    /// Resolved directory of service class sources.
    pub fn services_path(&self) -> PathBuf {
        self.project_root.join(&self.services_dir)
    }

    /// Resolved directory of the generated test harness.
    pub fn test_path(&self) -> PathBuf {
        self.project_root.join(&self.test_dir)
    }

    /// Resolved directory of the YAML configuration tree.
    pub fn config_path(&self) -> PathBuf {
        self.project_root.join(&self.config_dir)
    }

    /// Resolved directory for exported API documents.
    pub fn docs_path(&self) -> PathBuf {
        self.project_root.join(&self.docs_dir)
    }
}
