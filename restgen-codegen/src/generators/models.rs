//! Database model emission.
//!
//! From table metadata this stage produces four artifact kinds:
//!
//! - `models.gen.ts`: per-table interface, schema object, field list and
//!   table-name constant, always regenerated
//! - `models/{table}.m.ts`: a starter model class per table, written once
//!   and left alone afterwards
//! - `models/index.ts`: barrel export, always regenerated
//! - a [`FragmentBundle`] of imports, cache symbols and getters consumed by
//!   the core container stage

use tracing::warn;

use super::{file_header, quote, string_array, FragmentBundle};
use crate::db::{ColumnInfo, MetadataSource};
use crate::error::Result;
use crate::naming::{cache_symbol, first_upper_case, underscore_to_camel_case};
use crate::type_map::{interface_type, map_column};

/// Audit columns kept out of the schema object. They still appear in the
/// interface and the field list; the runtime maintains them itself and must
/// not accept them as input.
const SKIP_COLUMNS: &[&str] = &["created_at", "updated_at"];

/// Everything the models stage produced
pub struct ModelsOutput {
    /// `models.gen.ts` content
    pub models_gen: String,
    /// `models/index.ts` content
    pub index: String,
    /// `(table, content)` pairs for `models/{table}.m.ts`
    pub files: Vec<(String, String)>,
    /// Fragments for the core container
    pub bundle: FragmentBundle,
}

#[derive(Default)]
struct Accumulator {
    blocks: Vec<String>,
    index_lines: Vec<String>,
    model_names: Vec<String>,
    model_classes: Vec<String>,
    files: Vec<(String, String)>,
    symbols: Vec<String>,
    getters: Vec<String>,
}

/// Introspect every table starting with `prefix` and render the model
/// artifacts. Tables are processed in the order the database lists them.
pub async fn generate(source: &dyn MetadataSource, prefix: &str) -> Result<ModelsOutput> {
    let mut acc = Accumulator::default();
    for full_name in source.table_names(prefix).await? {
        let table = full_name.strip_prefix(prefix).unwrap_or(&full_name);
        generate_table(source, &full_name, table, &mut acc).await?;
    }

    let mut gen_lines = vec![file_header("models")];
    gen_lines.extend(acc.blocks);
    if acc.model_names.is_empty() {
        gen_lines.push("export default {};".to_string());
    } else {
        let names: Vec<String> = acc.model_names.iter().map(|n| quote(n)).collect();
        gen_lines.push(format!("\nexport const ModelNames = [{}];", names.join(", ")));
        let variants: Vec<String> = acc
            .model_names
            .iter()
            .map(|n| quote(&format!("{n}Model")))
            .collect();
        gen_lines.push(format!("export type ModelName = {};", variants.join(" | ")));
    }

    let mut index_lines = vec![file_header("models export")];
    if acc.index_lines.is_empty() {
        index_lines.push("export default {};".to_string());
    } else {
        index_lines.extend(acc.index_lines);
    }

    let import = if acc.model_classes.is_empty() {
        String::new()
    } else {
        format!(
            "import {{ {} }} from \"../../models\";",
            acc.model_classes.join(", ")
        )
    };

    Ok(ModelsOutput {
        models_gen: gen_lines.join("\n"),
        index: index_lines.join("\n"),
        files: acc.files,
        bundle: FragmentBundle {
            import,
            symbols: acc.symbols,
            getters: acc.getters,
        },
    })
}

async fn generate_table(
    source: &dyn MetadataSource,
    full_name: &str,
    table: &str,
    acc: &mut Accumulator,
) -> Result<()> {
    let comment = match source.table_comment(full_name).await? {
        Some(comment) => comment,
        None => {
            warn!("no status row for table {}, comment left empty", full_name);
            String::new()
        }
    };
    let columns = source.columns(full_name).await?;
    let converted = convert_columns(full_name, &columns);

    let camel = underscore_to_camel_case(table);
    let pascal = first_upper_case(&camel);
    let class = format!("{pascal}Model");
    let symbol = cache_symbol(&camel);

    let mut block = String::new();
    block.push_str(&format!("\n/** {comment} */\n"));
    block.push_str(&format!("export interface IModels{pascal} {{\n"));
    for line in &converted.interface_lines {
        block.push_str(line);
        block.push('\n');
    }
    block.push_str("}\n\n");
    block.push_str(&format!("/** {comment} Schema */\n"));
    block.push_str(&format!(
        "export const {camel}Schema = {};\n\n",
        schema_literal(&converted.schema_entries)
    ));
    block.push_str(&format!("/** {comment} Fields */\n"));
    block.push_str(&format!(
        "export const {camel}Fields = {};\n\n",
        string_array(&converted.fields)
    ));
    block.push_str(&format!("/** {comment} Table */\n"));
    block.push_str(&format!("export const {camel}Table = {};\n", quote(table)));
    acc.blocks.push(block);

    acc.index_lines.push(format!("export * from \"./{table}.m\";"));
    acc.files.push((table.to_string(), model_class_file(&camel, &pascal, &comment, &converted)));
    acc.model_names.push(camel.clone());
    acc.model_classes.push(class.clone());
    acc.symbols.push(format!(
        "const {symbol} = Symbol({});",
        quote(&camel.to_uppercase())
    ));
    acc.getters.push(format!(
        "\n/** {comment} */\nget {camel}() {{\nreturn this.getCache({symbol}, {class});\n}}"
    ));
    Ok(())
}

struct ConvertedColumns {
    schema_entries: Vec<SchemaEntry>,
    fields: Vec<String>,
    interface_lines: Vec<String>,
    primary_key: Option<String>,
}

struct SchemaEntry {
    field: String,
    type_key: &'static str,
    comment: String,
    params: Option<Vec<String>>,
}

fn convert_columns(table: &str, columns: &[ColumnInfo]) -> ConvertedColumns {
    let mut converted = ConvertedColumns {
        schema_entries: Vec::new(),
        fields: Vec::new(),
        interface_lines: Vec::new(),
        primary_key: None,
    };
    for column in columns {
        converted.fields.push(column.field.clone());
        if column.primary && column.field != "id" {
            converted.primary_key = Some(column.field.clone());
        }
        if !column.comment.is_empty() {
            converted.interface_lines.push(format!("/** {} */", column.comment));
        }
        let marker = if column.nullable { "?" } else { "" };
        converted.interface_lines.push(format!(
            "{}{}: {};",
            column.field,
            marker,
            interface_type(&column.column_type)
        ));
        if SKIP_COLUMNS.contains(&column.field.as_str()) {
            continue;
        }
        let (type_key, params) = map_column(&column.column_type, column.nullable).or_any(table, &column.field);
        converted.schema_entries.push(SchemaEntry {
            field: column.field.clone(),
            type_key,
            comment: column.comment.clone(),
            params,
        });
    }
    converted
}

fn schema_literal(entries: &[SchemaEntry]) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::from("{\n");
    for entry in entries {
        out.push_str(&format!(
            "{}: {{ type: {}, comment: {}",
            entry.field,
            quote(entry.type_key),
            quote(&entry.comment)
        ));
        if let Some(params) = &entry.params {
            out.push_str(&format!(", params: {}", string_array(params)));
        }
        out.push_str(" },\n");
    }
    out.push('}');
    out
}

fn model_class_file(
    camel: &str,
    pascal: &str,
    comment: &str,
    converted: &ConvertedColumns,
) -> String {
    let options = match &converted.primary_key {
        Some(key) => format!("{{ fields: {camel}Fields, primaryKey: {} }}", quote(key)),
        None => format!("{{ fields: {camel}Fields }}"),
    };
    let mut code = String::new();
    code.push_str(&format!("/**\n * @file {camel} model {comment}\n */\n\n"));
    code.push_str(&format!(
        "import {{ IModels{pascal}, {camel}Table, {camel}Fields }} from \"../global/gen/models.gen\";\n"
    ));
    code.push_str("import Base from \"./base\";\n");
    code.push_str("import { Context } from \"../web\";\n\n");
    code.push_str(&format!("export class {pascal}Model extends Base<IModels{pascal}> {{\n"));
    code.push_str("constructor(ctx: Context, options = {}) {\n");
    code.push_str(&format!("const opt = Object.assign({options}, options);\n"));
    code.push_str(&format!("super(ctx, {camel}Table, opt);\n"));
    code.push_str("}\n");
    code.push_str("}\n");
    code
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;

    use super::{generate, ModelsOutput};
    use crate::db::{ColumnInfo, MetadataSource};
    use crate::error::Result;

    struct FakeSource {
        tables: Vec<String>,
        comments: BTreeMap<String, String>,
        columns: BTreeMap<String, Vec<ColumnInfo>>,
    }

    #[async_trait]
    impl MetadataSource for FakeSource {
        async fn table_names(&self, prefix: &str) -> Result<Vec<String>> {
            Ok(self
                .tables
                .iter()
                .filter(|t| t.starts_with(prefix))
                .cloned()
                .collect())
        }

        async fn table_comment(&self, table: &str) -> Result<Option<String>> {
            Ok(self.comments.get(table).cloned())
        }

        async fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
            Ok(self.columns.get(table).cloned().unwrap_or_default())
        }
    }

    fn note_columns() -> Vec<ColumnInfo> {
        vec![
            ColumnInfo::new("id", "int(11) unsigned").primary(),
            ColumnInfo::new("title", "varchar(255)").comment("Note title"),
            ColumnInfo::new("body", "text").nullable(),
            ColumnInfo::new("state", "enum('todo','done')").comment("Workflow state"),
            ColumnInfo::new("created_at", "timestamp"),
            ColumnInfo::new("updated_at", "timestamp").nullable(),
        ]
    }

    fn fake_source() -> FakeSource {
        let mut comments = BTreeMap::new();
        comments.insert("app_user_note".to_string(), "User note".to_string());
        let mut columns = BTreeMap::new();
        columns.insert("app_user_note".to_string(), note_columns());
        FakeSource {
            tables: vec!["app_user_note".to_string()],
            comments,
            columns,
        }
    }

    async fn run(source: &FakeSource, prefix: &str) -> ModelsOutput {
        generate(source, prefix).await.unwrap()
    }

    #[tokio::test]
    async fn prefix_is_stripped_from_logical_names() {
        let output = run(&fake_source(), "app_").await;
        assert!(output.models_gen.contains("export interface IModelsUserNote {"));
        assert!(output.models_gen.contains("export const userNoteTable = \"user_note\";"));
        assert!(output.index.contains("export * from \"./user_note.m\";"));
        assert_eq!(output.files[0].0, "user_note");
    }

    #[tokio::test]
    async fn interface_keeps_audit_columns_but_schema_skips_them() {
        let output = run(&fake_source(), "app_").await;
        assert!(output.models_gen.contains("created_at: Date;"));
        assert!(output.models_gen.contains("updated_at?: Date;"));
        assert!(!output.models_gen.contains("created_at: {"));
        assert!(!output.models_gen.contains("updated_at: {"));
        assert!(output
            .models_gen
            .contains("userNoteFields = [\"id\", \"title\", \"body\", \"state\", \"created_at\", \"updated_at\"];"));
    }

    #[tokio::test]
    async fn schema_object_carries_types_comments_and_enum_params() {
        let output = run(&fake_source(), "app_").await;
        assert!(output
            .models_gen
            .contains("id: { type: \"Integer\", comment: \"\" },"));
        assert!(output
            .models_gen
            .contains("title: { type: \"String\", comment: \"Note title\" },"));
        assert!(output
            .models_gen
            .contains("body: { type: \"NullableString\", comment: \"\" },"));
        assert!(output.models_gen.contains(
            "state: { type: \"ENUM\", comment: \"Workflow state\", params: [\"todo\", \"done\"] },"
        ));
    }

    #[tokio::test]
    async fn model_class_file_references_generated_constants() {
        let output = run(&fake_source(), "app_").await;
        let (_, file) = &output.files[0];
        assert!(file.contains("@file userNote model User note"));
        assert!(file.contains(
            "import { IModelsUserNote, userNoteTable, userNoteFields } from \"../global/gen/models.gen\";"
        ));
        assert!(file.contains("export class UserNoteModel extends Base<IModelsUserNote> {"));
        assert!(file.contains("const opt = Object.assign({ fields: userNoteFields }, options);"));
        assert!(file.contains("super(ctx, userNoteTable, opt);"));
    }

    #[tokio::test]
    async fn non_id_primary_key_lands_in_model_options() {
        let mut source = fake_source();
        source.columns.insert(
            "app_user_note".to_string(),
            vec![
                ColumnInfo::new("uuid", "varchar(36)").primary(),
                ColumnInfo::new("title", "varchar(255)"),
            ],
        );
        let output = run(&source, "app_").await;
        let (_, file) = &output.files[0];
        assert!(file.contains("{ fields: userNoteFields, primaryKey: \"uuid\" }"));
    }

    #[tokio::test]
    async fn bundle_wires_the_core_container() {
        let output = run(&fake_source(), "app_").await;
        let bundle = &output.bundle;
        assert_eq!(bundle.import, "import { UserNoteModel } from \"../../models\";");
        assert_eq!(bundle.symbols, vec!["const USERNOTE_M_SYM = Symbol(\"USERNOTE\");"]);
        assert!(bundle.getters[0].contains("/** User note */"));
        assert!(bundle.getters[0].contains("get userNote() {"));
        assert!(bundle.getters[0].contains("return this.getCache(USERNOTE_M_SYM, UserNoteModel);"));
    }

    #[tokio::test]
    async fn model_name_union_lists_every_table() {
        let mut source = fake_source();
        source.tables.push("app_tag".to_string());
        source
            .columns
            .insert("app_tag".to_string(), vec![ColumnInfo::new("id", "int(11)").primary()]);
        source.comments.insert("app_tag".to_string(), "Tag".to_string());
        let output = run(&source, "app_").await;
        assert!(output
            .models_gen
            .contains("export const ModelNames = [\"userNote\", \"tag\"];"));
        assert!(output
            .models_gen
            .contains("export type ModelName = \"userNoteModel\" | \"tagModel\";"));
    }

    #[tokio::test]
    async fn missing_comment_row_warns_and_degrades() {
        let mut source = fake_source();
        source.comments.clear();
        let output = run(&source, "app_").await;
        assert!(output.models_gen.contains("/**  */"));
    }

    #[tokio::test]
    async fn no_tables_yields_placeholder_exports() {
        let source = FakeSource {
            tables: Vec::new(),
            comments: BTreeMap::new(),
            columns: BTreeMap::new(),
        };
        let output = run(&source, "").await;
        assert!(output.models_gen.contains("export default {};"));
        assert!(output.index.contains("export default {};"));
        assert!(output.files.is_empty());
        assert!(output.bundle.import.is_empty());
        assert!(output.bundle.symbols.is_empty());
    }
}
