//! Demo embedding of restgen
//!
//! Registers the API surface of a small note-keeping service, then runs the
//! full generation pipeline against a TypeScript project root. Run from a
//! project directory with no arguments, or point it somewhere else:
//!
//! ```text
//! notes-api --root ../notes-web --database-url mysql://root@127.0.0.1/notes
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use restgen::{ApiInfo, Endpoint, ErrorDescriptor, FieldSpec, Method, Registry, Schema};
use restgen_codegen::db::MetadataSource;
use restgen_codegen::{generate, write_group_suite, GenConfig, MySqlMetadataSource};

#[derive(Parser)]
#[command(name = "notes-api")]
#[command(about = "Generate the TypeScript artifacts for the demo notes API")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target project root (overrides config)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// MySQL connection URL (overrides config)
    #[arg(short, long)]
    database_url: Option<String>,

    /// Write a starter test suite for this endpoint group (repeatable)
    #[arg(short, long)]
    group: Vec<String>,

    /// Overwrite existing starter test suites
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = GenConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(root) = cli.root {
        config.project_root = root;
    }
    if let Some(url) = cli.database_url {
        config.database_url = Some(url);
    }

    config.validate()?;

    let registry = bootstrap_registry()?;
    info!(
        "registry ready: {} endpoints, {} errors",
        registry.endpoint_count(),
        registry.errors().len()
    );

    let source = match config.database_url.as_deref() {
        Some(url) => Some(MySqlMetadataSource::new(url)?),
        None => {
            info!("no database_url configured, model generation will be skipped");
            None
        }
    };

    generate(&registry, &config, source.as_ref().map(|s| s as &dyn MetadataSource)).await?;

    for group in &cli.group {
        if write_group_suite(&registry, &config, group, cli.force)? {
            info!("wrote starter suite for group {}", group);
        } else {
            info!("suite for group {} already exists, skipped", group);
        }
    }

    if let Some(source) = source {
        source.disconnect().await?;
    }

    info!("generation finished for {}", config.project_root.display());
    Ok(())
}

/// Declare the demo API: types, errors, schemas and endpoints of a small
/// note-keeping service with user accounts.
fn bootstrap_registry() -> restgen::Result<Registry> {
    let mut registry = Registry::with_info(ApiInfo {
        title: "Notes API".to_string(),
        description: "Note keeping demo service".to_string(),
        host: "http://127.0.0.1:3001".to_string(),
        base_path: "/api".to_string(),
    });

    registry.register_type("UuidString", "string", "UUID v4 identifier");

    registry.group("note", "Note management");
    registry.group("user", "User accounts");

    registry.register_error(ErrorDescriptor::new(
        "NOT_FOUND_ERROR",
        -1001,
        "Resource not found",
    ))?;
    registry.register_error(
        ErrorDescriptor::new("VALIDATION_ERROR", -1002, "Invalid input").show(true),
    )?;
    registry.register_error(
        ErrorDescriptor::new("DUPLICATE_ERROR", -1003, "Already exists").show(true),
    )?;
    registry.register_error(
        ErrorDescriptor::new("AUTH_ERROR", -1004, "Authentication required").log(true),
    )?;

    registry.register_schema(
        "Tag",
        Schema::new()
            .field("id", FieldSpec::new("Integer").required())
            .field("name", FieldSpec::new("String").comment("Tag name").required()),
    );
    registry.register_schema(
        "Note",
        Schema::new()
            .field("id", FieldSpec::new("Integer").comment("Note id").required())
            .field("uuid", FieldSpec::new("UuidString").required())
            .field("title", FieldSpec::new("String").required())
            .field("content", FieldSpec::new("NullableString"))
            .field(
                "state",
                FieldSpec::new("ENUM")
                    .comment("Workflow state")
                    .params(json!(["draft", "published"])),
            )
            .field("tags", FieldSpec::new("Tag[]").comment("Attached tags")),
    );

    registry.register(Endpoint::builder(Method::Get, "/base/index").title("API index").build())?;

    registry.register(
        Endpoint::builder(Method::Post, "/note/create")
            .title("Create note")
            .group("note")
            .body("title", FieldSpec::new("TrimString").comment("Note title"))
            .body("content", FieldSpec::new("String"))
            .body(
                "state",
                FieldSpec::new("ENUM").params(json!(["draft", "published"])),
            )
            .required(["title"])
            .response_schema("Note")
            .build(),
    )?;
    registry.register(
        Endpoint::builder(Method::Get, "/note/:id")
            .title("Get note")
            .group("note")
            .param("id", FieldSpec::new("Integer").comment("Note id"))
            .response_schema("Note")
            .build(),
    )?;
    registry.register(
        Endpoint::builder(Method::Get, "/note/list")
            .title("List notes")
            .group("note")
            .query("page", FieldSpec::new("Integer").comment("1-based page number"))
            .query("size", FieldSpec::new("Integer"))
            .response_schema("Note[]")
            .build(),
    )?;
    registry.register(
        Endpoint::builder(Method::Post, "/note/:id/update")
            .title("Update note")
            .group("note")
            .param("id", FieldSpec::new("Integer"))
            .body("title", FieldSpec::new("TrimString"))
            .body("content", FieldSpec::new("String"))
            .response_schema("Note")
            .build(),
    )?;
    registry.register(
        Endpoint::builder(Method::Post, "/note/:id/delete")
            .title("Delete note")
            .group("note")
            .param("id", FieldSpec::new("Integer"))
            .build(),
    )?;

    registry.register(
        Endpoint::builder(Method::Post, "/user/login")
            .title("Log in")
            .group("user")
            .body("email", FieldSpec::new("Email").comment("Account email"))
            .body("password", FieldSpec::new("String"))
            .required(["email", "password"])
            .response_fields(
                Schema::new()
                    .field("token", FieldSpec::new("String").comment("Session token").required())
                    .field("expires", FieldSpec::new("Integer").comment("Unix expiry time")),
            )
            .build(),
    )?;
    registry.register(
        Endpoint::builder(Method::Get, "/user/profile")
            .title("Current user profile")
            .group("user")
            .response_fields(
                Schema::new()
                    .field("email", FieldSpec::new("Email").required())
                    .field("name", FieldSpec::new("String")),
            )
            .build(),
    )?;

    Ok(registry)
}
