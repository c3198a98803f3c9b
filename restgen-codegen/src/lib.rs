//! restgen-codegen: turn a restgen registry into TypeScript project files
//!
//! The generators read a [`restgen::Registry`] (and optionally live MySQL
//! metadata) and write the files a restgen-flavored web project expects:
//!
//! - `errors.gen.ts`, `types.gen.ts`, `config.gen.ts` under the gen dir
//! - `params.gen.ts`, `schemas.gen.ts`, `responses.gen.ts` interfaces
//! - `models.gen.ts` plus starter model classes from database tables
//! - `services/index.ts` and the `core.gen.ts` container classes
//! - the typed test client `test/api/api.gen.ts` and starter suites
//! - `docs/postman.json`
//!
//! Output goes through a prettier-compatible formatter, and files meant to
//! be edited by hand are only written when absent, so re-running generation
//! is always safe.
//!
//! # Usage
//!
//! ```rust,ignore
//! use restgen_codegen::{generate, GenConfig, MySqlMetadataSource};
//!
//! #[tokio::main]
//! async fn main() -> restgen_codegen::Result<()> {
//!     let registry = bootstrap_registry()?;
//!     let config = GenConfig::load(None)?;
//!     let source = MySqlMetadataSource::new("mysql://root@127.0.0.1/app")?;
//!     generate(&registry, &config, Some(&source)).await?;
//!     source.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod generators;
pub mod naming;
pub mod type_map;
pub mod writer;

use restgen::Registry;
use tracing::info;

use crate::db::MetadataSource;
use crate::generators::FragmentBundle;
use crate::writer::Artifact;

pub use config::GenConfig;
pub use db::MySqlMetadataSource;
pub use error::{CodegenError, Result};
pub use writer::Writer;

/// Run every generation stage against the project described by `config`.
///
/// Stages run in dependency order; each writes its artifacts before the next
/// starts. Without a metadata source the model stage is skipped and the core
/// container gets an empty model section. A missing `config/base.yaml` or
/// services directory likewise skips only that stage.
pub async fn generate(
    registry: &Registry,
    config: &GenConfig,
    source: Option<&dyn MetadataSource>,
) -> Result<()> {
    config.validate()?;
    let writer = Writer::new(&config.project_root);
    let gen_dir = config.gen_path();

    info!("generating error classes ({} declared)", registry.errors().len());
    writer.write(&Artifact::replace(
        gen_dir.join("errors.gen.ts"),
        generators::errors::generate(registry),
    ))?;

    info!("generating type table ({} types)", registry.types().len());
    writer.write(&Artifact::replace(
        gen_dir.join("types.gen.ts"),
        generators::types::generate(registry),
    ))?;

    let config_dir = config.config_path();
    if config_dir.join("base.yaml").exists() {
        info!("generating config interfaces from {}", config_dir.display());
        let loaded = generators::config::load_config_tree(&config_dir, &config.env)?;
        writer.write(&Artifact::replace(
            gen_dir.join("config.gen.ts"),
            generators::config::generate(&loaded),
        ))?;
    } else {
        info!("no config/base.yaml, skipping config interfaces");
    }

    info!("generating interfaces for {} endpoints", registry.endpoint_count());
    writer.write(&Artifact::replace(
        gen_dir.join("params.gen.ts"),
        generators::params::generate(registry),
    ))?;
    writer.write(&Artifact::replace(
        gen_dir.join("schemas.gen.ts"),
        generators::schemas::generate(registry),
    ))?;
    writer.write(&Artifact::replace(
        gen_dir.join("responses.gen.ts"),
        generators::responses::generate(registry),
    ))?;

    let models_bundle = match source {
        Some(source) => {
            info!("generating models from database metadata");
            let output = generators::models::generate(source, &config.table_prefix).await?;
            let models_dir = config.models_path();
            writer.write(&Artifact::replace(gen_dir.join("models.gen.ts"), output.models_gen))?;
            writer.write(&Artifact::replace(models_dir.join("index.ts"), output.index))?;
            for (table, content) in output.files {
                writer.write(&Artifact::keep_existing(
                    models_dir.join(format!("{table}.m.ts")),
                    content,
                ))?;
            }
            output.bundle
        }
        None => {
            info!("no database source, skipping models");
            FragmentBundle::empty()
        }
    };

    let services_dir = config.services_path();
    let services_bundle = if services_dir.is_dir() {
        info!("scanning services in {}", services_dir.display());
        let scan = generators::service::scan(&services_dir)?;
        writer.write(&Artifact::replace(services_dir.join("index.ts"), scan.index))?;
        scan.bundle
    } else {
        info!("no services directory, skipping service scan");
        FragmentBundle::empty()
    };

    info!("generating core container");
    writer.write(&Artifact::replace(
        gen_dir.join("core.gen.ts"),
        generators::core::generate(&models_bundle, &services_bundle),
    ))?;

    info!("generating test client");
    writer.write(&Artifact::replace(
        config.test_path().join("api.gen.ts"),
        generators::harness::generate_client(registry),
    ))?;

    info!("generating postman collection");
    let collection = generators::postman::generate(registry);
    writer.write(&Artifact::replace(
        config.docs_path().join("postman.json"),
        serde_json::to_string(&collection)?,
    ))?;

    info!("generation complete");
    Ok(())
}

/// Write a starter mocha suite for one endpoint group to
/// `test/api/test-{group}.ts`.
///
/// By default an existing suite is left alone; pass `overwrite` to replace
/// it. Returns whether the file was written.
pub fn write_group_suite(
    registry: &Registry,
    config: &GenConfig,
    group: &str,
    overwrite: bool,
) -> Result<bool> {
    let content = generators::harness::generate_group_suite(registry, group)?;
    let path = config.test_path().join(format!("test-{group}.ts"));
    let artifact = if overwrite {
        Artifact::replace(path, content)
    } else {
        Artifact::keep_existing(path, content)
    };
    let writer = Writer::new(&config.project_root);
    writer.write(&artifact)
}
