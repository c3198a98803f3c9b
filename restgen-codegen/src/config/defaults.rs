//! Default configuration values - single source of truth

/// Default project root (current directory)
pub const PROJECT_ROOT: &str = ".";

/// Default directory for generated `.gen.ts` files, relative to the root
pub const GEN_DIR: &str = "src/global/gen";

/// Default directory for model class files, relative to the root
pub const MODELS_DIR: &str = "src/models";

/// Default directory holding service class sources, relative to the root
pub const SERVICES_DIR: &str = "src/services";

/// Default directory for the generated API test harness, relative to the root
pub const TEST_DIR: &str = "test/api";

/// Default directory holding the YAML configuration tree, relative to the root
pub const CONFIG_DIR: &str = "config";

/// Default directory for exported API documents, relative to the root
pub const DOCS_DIR: &str = "docs";

/// Default environment name, selects `{env}.yaml` overrides
pub const ENV: &str = "dev";

/// Default table-name prefix (no filtering)
pub const TABLE_PREFIX: &str = "";
