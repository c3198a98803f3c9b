//! End-to-end tests for the generation pipeline
//!
//! These drive `restgen_codegen::generate` against a temporary TypeScript
//! project: a registry built in code, an in-memory metadata source standing
//! in for MySQL, and a tempdir project root. Assertions read the emitted
//! files back and check the shapes the target project compiles against.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use restgen::{ApiInfo, Endpoint, ErrorDescriptor, FieldSpec, Method, Registry, Schema};
use restgen_codegen::db::{ColumnInfo, MetadataSource};
use restgen_codegen::{generate, write_group_suite, GenConfig, Result};
use tempfile::TempDir;

// ============ Fixtures ============

/// In-memory stand-in for `SHOW TABLES` / `SHOW FULL COLUMNS`.
struct FakeDb {
    tables: Vec<(&'static str, &'static str, Vec<ColumnInfo>)>,
}

#[async_trait]
impl MetadataSource for FakeDb {
    async fn table_names(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .tables
            .iter()
            .map(|(name, _, _)| name.to_string())
            .filter(|name| name.starts_with(prefix))
            .collect())
    }

    async fn table_comment(&self, table: &str) -> Result<Option<String>> {
        Ok(self
            .tables
            .iter()
            .find(|(name, _, _)| *name == table)
            .map(|(_, comment, _)| comment.to_string()))
    }

    async fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        Ok(self
            .tables
            .iter()
            .find(|(name, _, _)| *name == table)
            .map(|(_, _, columns)| columns.clone())
            .unwrap_or_default())
    }
}

fn notes_db() -> FakeDb {
    FakeDb {
        tables: vec![
            (
                "app_note",
                "Note",
                vec![
                    ColumnInfo::new("id", "bigint(20) unsigned").primary(),
                    ColumnInfo::new("title", "varchar(128)").comment("Note title"),
                    ColumnInfo::new("content", "text").nullable(),
                    ColumnInfo::new("state", "enum('draft','published')").comment("Publish state"),
                    ColumnInfo::new("created_at", "timestamp"),
                    ColumnInfo::new("updated_at", "timestamp").nullable(),
                ],
            ),
            (
                "app_tag",
                "Tag",
                vec![
                    ColumnInfo::new("id", "int(11) unsigned").primary(),
                    ColumnInfo::new("name", "varchar(64)").comment("Tag name"),
                ],
            ),
        ],
    }
}

fn empty_db() -> FakeDb {
    FakeDb { tables: Vec::new() }
}

fn notes_registry() -> Registry {
    let mut registry = Registry::with_info(ApiInfo {
        title: "Notes API".to_string(),
        description: "Demo note keeping service".to_string(),
        host: "http://127.0.0.1:3001".to_string(),
        base_path: "/api".to_string(),
    });

    registry.group("note", "Note management");

    registry
        .register_error(ErrorDescriptor::new("NOT_FOUND_ERROR", -1001, "Resource not found"))
        .unwrap();
    registry
        .register_error(ErrorDescriptor::new("VALIDATION_ERROR", -1002, "Invalid input").log(true))
        .unwrap();

    registry.register_schema(
        "Note",
        Schema::new()
            .field("id", FieldSpec::new("Integer").comment("Note id").required())
            .field("title", FieldSpec::new("String").required())
            .field("content", FieldSpec::new("NullableString")),
    );

    registry
        .register(Endpoint::builder(Method::Get, "/base/index").title("API index").build())
        .unwrap();
    registry
        .register(
            Endpoint::builder(Method::Post, "/note/create")
                .title("Create note")
                .group("note")
                .body("title", FieldSpec::new("String").comment("Note title"))
                .body("content", FieldSpec::new("String"))
                .required(["title"])
                .response_schema("Note")
                .build(),
        )
        .unwrap();
    registry
        .register(
            Endpoint::builder(Method::Get, "/note/:id")
                .title("Get note")
                .group("note")
                .param("id", FieldSpec::new("Integer").comment("Note id"))
                .response_schema("Note")
                .build(),
        )
        .unwrap();
    registry
        .register(
            Endpoint::builder(Method::Get, "/note/list")
                .title("List notes")
                .group("note")
                .query("page", FieldSpec::new("Integer"))
                .response_schema("Note[]")
                .build(),
        )
        .unwrap();
    registry
}

const BASE_YAML: &str = "\
# Runtime environment switches
server:
  host: 127.0.0.1
  port: 3001 # listen port
db:
  url: mysql://root@127.0.0.1/app
features:
  - notes
  - tags
";

const DEV_YAML: &str = "\
server:
  port: 3100
";

const NOTE_SERVICE: &str = "\
/**
 * @file note service
 */

import { BaseService } from \"../core\";

/**
 * Note operations
 */
export class NoteService extends BaseService {
  async list() {
    return [];
  }
}
";

/// Lay out the hand-written parts of the target project: the YAML config
/// tree and one service class.
fn scaffold_project(root: &Path) {
    fs::create_dir_all(root.join("config")).unwrap();
    fs::write(root.join("config").join("base.yaml"), BASE_YAML).unwrap();
    fs::write(root.join("config").join("dev.yaml"), DEV_YAML).unwrap();
    fs::create_dir_all(root.join("src").join("services")).unwrap();
    fs::write(root.join("src").join("services").join("note.ts"), NOTE_SERVICE).unwrap();
}

async fn run_full(root: &Path) -> GenConfig {
    scaffold_project(root);
    let mut config = GenConfig::default_with_root(root);
    config.table_prefix = "app_".to_string();
    let db = notes_db();
    generate(&notes_registry(), &config, Some(&db)).await.unwrap();
    config
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn exists(root: &Path, rel: &str) -> bool {
    root.join(rel).exists()
}

// ============ Full pipeline ============

#[tokio::test]
async fn test_pipeline_writes_every_artifact() {
    let dir = TempDir::new().unwrap();
    run_full(dir.path()).await;

    for rel in [
        "src/global/gen/errors.gen.ts",
        "src/global/gen/types.gen.ts",
        "src/global/gen/config.gen.ts",
        "src/global/gen/params.gen.ts",
        "src/global/gen/schemas.gen.ts",
        "src/global/gen/responses.gen.ts",
        "src/global/gen/models.gen.ts",
        "src/global/gen/core.gen.ts",
        "src/models/index.ts",
        "src/models/note.m.ts",
        "src/models/tag.m.ts",
        "src/services/index.ts",
        "test/api/api.gen.ts",
        "docs/postman.json",
    ] {
        assert!(exists(dir.path(), rel), "missing artifact: {rel}");
    }
}

#[tokio::test]
async fn test_rerun_preserves_hand_edited_files() {
    let dir = TempDir::new().unwrap();
    let config = run_full(dir.path()).await;

    // Hand-edit a starter model class, clobber a generated file
    let model_path = dir.path().join("src").join("models").join("note.m.ts");
    fs::write(&model_path, "// hand edited\n").unwrap();
    let client_path = dir.path().join("test").join("api").join("api.gen.ts");
    fs::write(&client_path, "// stale\n").unwrap();

    let db = notes_db();
    generate(&notes_registry(), &config, Some(&db)).await.unwrap();

    assert_eq!(fs::read_to_string(&model_path).unwrap(), "// hand edited\n");
    let client = fs::read_to_string(&client_path).unwrap();
    assert!(client.contains("export default class APITest<T> extends TestAgent<T> {"));
}

#[tokio::test]
async fn test_generate_without_database_or_services() {
    let dir = TempDir::new().unwrap();
    let config = GenConfig::default_with_root(dir.path());
    generate(&notes_registry(), &config, None).await.unwrap();

    assert!(exists(dir.path(), "src/global/gen/errors.gen.ts"));
    assert!(exists(dir.path(), "src/global/gen/params.gen.ts"));
    assert!(exists(dir.path(), "test/api/api.gen.ts"));
    assert!(exists(dir.path(), "docs/postman.json"));

    // Skipped stages leave no files behind
    assert!(!exists(dir.path(), "src/global/gen/models.gen.ts"));
    assert!(!exists(dir.path(), "src/global/gen/config.gen.ts"));
    assert!(!exists(dir.path(), "src/services/index.ts"));

    // The core container still renders, with empty sections
    let core = read(dir.path(), "src/global/gen/core.gen.ts");
    assert!(core.contains("export class Service extends CoreGen<BaseService> {"));
    assert!(core.contains("export class Model extends CoreGen<BaseModel> {"));
    assert!(!core.contains("../../services"));
    assert!(!core.contains("../../models"));
}

#[tokio::test]
async fn test_empty_database_yields_placeholder_models() {
    let dir = TempDir::new().unwrap();
    let config = GenConfig::default_with_root(dir.path());
    let db = empty_db();
    generate(&notes_registry(), &config, Some(&db)).await.unwrap();

    assert!(read(dir.path(), "src/global/gen/models.gen.ts").contains("export default {};"));
    assert!(read(dir.path(), "src/models/index.ts").contains("export default {};"));
}

// ============ Generated interfaces ============

#[tokio::test]
async fn test_params_follow_endpoint_declarations() {
    let dir = TempDir::new().unwrap();
    run_full(dir.path()).await;
    let code = read(dir.path(), "src/global/gen/params.gen.ts");

    assert!(code.contains("export interface IParamsGetBaseIndex {"));
    assert!(code.contains("export interface IParamsPostNoteCreate {"));
    assert!(code.contains("/** Note title */"));
    assert!(code.contains("title: string;"));
    assert!(code.contains("content?: string;"));
    // Path parameter, not listed as required
    assert!(code.contains("export interface IParamsGetNoteId {"));
    assert!(code.contains("id?: number;"));
    assert!(code.contains("page?: number;"));
}

#[tokio::test]
async fn test_responses_reference_schemas() {
    let dir = TempDir::new().unwrap();
    run_full(dir.path()).await;
    let code = read(dir.path(), "src/global/gen/responses.gen.ts");

    assert!(code.contains("import { ISchemaNote } from \"./schemas.gen\";"));
    assert!(code.contains("export type IResponseGetBaseIndex = any;"));
    assert!(code.contains("export type IResponsePostNoteCreate = ISchemaNote;"));
    assert!(code.contains("export type IResponseGetNoteList = ISchemaNote[];"));
}

#[tokio::test]
async fn test_schemas_errors_and_types_catalogs() {
    let dir = TempDir::new().unwrap();
    run_full(dir.path()).await;

    let schemas = read(dir.path(), "src/global/gen/schemas.gen.ts");
    assert!(schemas.contains("export interface ISchemaNote {"));
    assert!(schemas.contains("/** Note id */"));
    assert!(schemas.contains("id: number;"));
    assert!(schemas.contains("content: string;"));

    let errors = read(dir.path(), "src/global/gen/errors.gen.ts");
    assert!(errors.contains("export interface IError {"));
    assert!(errors.contains("export class NotFoundError extends Error implements IError {"));
    assert!(errors.contains("public code = -1001;"));
    assert!(errors.contains("export class ValidationError extends Error implements IError {"));

    let types = read(dir.path(), "src/global/gen/types.gen.ts");
    assert!(types.contains("export const TYPES = {"));
    assert!(types.contains("String: \"String\","));
    assert!(types.contains("NullableInteger: \"NullableInteger\","));
}

#[tokio::test]
async fn test_config_interfaces_merge_env_overrides() {
    let dir = TempDir::new().unwrap();
    run_full(dir.path()).await;
    let code = read(dir.path(), "src/global/gen/config.gen.ts");

    assert!(code.contains("export interface IConfig {"));
    assert!(code.contains("[key: string]: any;"));
    assert!(code.contains("/** Runtime environment switches */"));
    assert!(code.contains("server: IServer;"));
    assert!(code.contains("db: IDb;"));
    assert!(code.contains("features: string[];"));
    // Injected by the loader
    assert!(code.contains("env: string;"));
    assert!(code.contains("ispro: boolean;"));

    assert!(code.contains("export interface IServer {"));
    assert!(code.contains("/** listen port */"));
    assert!(code.contains("port: number;"));
    assert!(code.contains("host: string;"));
    assert!(code.contains("url: string;"));
}

// ============ Models ============

#[tokio::test]
async fn test_models_generated_from_metadata() {
    let dir = TempDir::new().unwrap();
    run_full(dir.path()).await;
    let code = read(dir.path(), "src/global/gen/models.gen.ts");

    assert!(code.contains("export interface IModelsNote {"));
    assert!(code.contains("/** Note title */"));
    assert!(code.contains("title: string;"));
    assert!(code.contains("content?: string;"));
    assert!(code.contains("created_at: Date;"));
    assert!(code.contains("updated_at?: Date;"));

    // Audit columns stay out of the query schema
    assert!(code.contains("title: { type: \"String\", comment: \"Note title\" },"));
    assert!(code.contains(
        "state: { type: \"ENUM\", comment: \"Publish state\", params: [\"draft\", \"published\"] },"
    ));
    assert!(!code.contains("created_at: { type:"));

    assert!(code.contains(
        "export const noteFields = [\"id\", \"title\", \"content\", \"state\", \"created_at\", \"updated_at\"];"
    ));
    assert!(code.contains("export const noteTable = \"note\";"));
    assert!(code.contains("export const ModelNames = [\"note\", \"tag\"];"));
    assert!(code.contains("export type ModelName = \"noteModel\" | \"tagModel\";"));

    let index = read(dir.path(), "src/models/index.ts");
    assert!(index.contains("export * from \"./note.m\";"));
    assert!(index.contains("export * from \"./tag.m\";"));

    let class_file = read(dir.path(), "src/models/note.m.ts");
    assert!(class_file.contains("@file note model Note"));
    assert!(class_file
        .contains("import { IModelsNote, noteTable, noteFields } from \"../global/gen/models.gen\";"));
    assert!(class_file.contains("export class NoteModel extends Base<IModelsNote> {"));
    assert!(class_file.contains("Object.assign({ fields: noteFields }, options)"));
    assert!(!class_file.contains("primaryKey"));
}

#[tokio::test]
async fn test_core_container_wires_models_and_services() {
    let dir = TempDir::new().unwrap();
    run_full(dir.path()).await;
    let code = read(dir.path(), "src/global/gen/core.gen.ts");

    assert!(code.contains("import { BaseService, BaseModel, CoreGen } from \"../../core\";"));
    assert!(code.contains("import { NoteService } from \"../../services\";"));
    assert!(code.contains("const NOTESERVICE_M_SYM = Symbol(\"NoteService\");"));
    assert!(code.contains("/** Note operations */"));

    assert!(code.contains("import { NoteModel, TagModel } from \"../../models\";"));
    assert!(code.contains("const NOTE_M_SYM = Symbol(\"NOTE\");"));
    assert!(code.contains("return this.getCache(NOTE_M_SYM, NoteModel);"));
    assert!(code.contains("return this.getCache(TAG_M_SYM, TagModel);"));

    let index = read(dir.path(), "src/services/index.ts");
    assert!(index.contains("export * from \"./note\";"));
}

// ============ Test harness ============

#[tokio::test]
async fn test_client_methods_per_endpoint() {
    let dir = TempDir::new().unwrap();
    run_full(dir.path()).await;
    let code = read(dir.path(), "test/api/api.gen.ts");

    assert!(code.contains("import TestAgent from \"../agent\";"));
    assert!(code.contains("export default class APITest<T> extends TestAgent<T> {"));

    // Four wrappers per endpoint
    assert!(code.contains("getBaseIndexRaw(input?: IParamsGetBaseIndex, example?: string) {"));
    assert!(code.contains("getBaseIndexOk(input?: IParamsGetBaseIndex, example?: string) {"));
    assert!(code.contains("getBaseIndexErr(input?: IParamsGetBaseIndex, example?: string) {"));
    assert!(code.contains("async getBaseIndexVerify(input?: IParamsGetBaseIndex, example?: string) {"));

    // Path parameters become template substitutions
    assert!(code.contains("return this.get(`/api/note/${input!.id}`, input, example, [\"id\"]);"));
    assert!(code.contains("return this.post(`/api/note/create`, input, example, []);"));
    assert!(code.contains("const opt = this.api.api.$apis.get(\"GET_/note/:id\")!.options;"));
}

#[tokio::test]
async fn test_group_suite_written_once() {
    let dir = TempDir::new().unwrap();
    let config = run_full(dir.path()).await;
    let registry = notes_registry();

    assert!(write_group_suite(&registry, &config, "note", false).unwrap());
    let path = dir.path().join("test").join("api").join("test-note.ts");
    let code = fs::read_to_string(&path).unwrap();
    assert!(code.contains("import { assert } from \"chai\";"));
    assert!(code.contains("describe('API - note', () => {"));
    assert!(code.contains("it('Create note', async () => {"));
    assert!(code.contains(".input({ content: share.content, title: share.title })"));
    assert!(code.contains(".input({ page: share.page })"));
    assert!(code.contains(".takeExample('List notes')"));

    // A second run keeps the existing suite
    fs::write(&path, "// customized\n").unwrap();
    assert!(!write_group_suite(&registry, &config, "note", false).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "// customized\n");

    // Overwrite mode replaces it again
    assert!(write_group_suite(&registry, &config, "note", true).unwrap());
    assert!(fs::read_to_string(&path).unwrap().contains("describe('API - note'"));

    // Unknown groups are an error, nothing is written
    assert!(write_group_suite(&registry, &config, "payments", false).is_err());
    assert!(!exists(dir.path(), "test/api/test-payments.ts"));
}

#[tokio::test]
async fn test_postman_collection_structure() {
    let dir = TempDir::new().unwrap();
    run_full(dir.path()).await;
    let raw = read(dir.path(), "docs/postman.json");
    let collection: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(collection["info"]["name"], "Notes API");
    assert_eq!(collection["variables"][0]["key"], "HOST");
    assert_eq!(collection["variables"][0]["value"], "http://127.0.0.1:3001/api");

    let folders = collection["item"].as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["name"], "Note management");
    let requests = folders[0]["item"].as_array().unwrap();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0]["name"], "Get note");
    assert_eq!(requests[0]["request"]["url"], "{{HOST}}/note/:id");
    assert_eq!(requests[0]["request"]["method"], "GET");

    // Ungrouped endpoints stay out of the collection
    assert!(!raw.contains("/base/index"));
}

// ============ Formatting ============

#[tokio::test]
async fn test_formatter_honors_project_prettierrc() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".prettierrc"), r#"{"tabWidth": 4}"#).unwrap();
    let config = GenConfig::default_with_root(dir.path());
    generate(&notes_registry(), &config, None).await.unwrap();

    let errors = read(dir.path(), "src/global/gen/errors.gen.ts");
    assert!(errors.contains("\n    public code = -1001;"));

    let dir2 = TempDir::new().unwrap();
    let config2 = GenConfig::default_with_root(dir2.path());
    generate(&notes_registry(), &config2, None).await.unwrap();
    let errors2 = read(dir2.path(), "src/global/gen/errors.gen.ts");
    assert!(errors2.contains("\n  public code = -1001;"));
}
