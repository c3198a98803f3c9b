//! MySQL column type to registry-type mapping

use tracing::warn;

/// Outcome of classifying a column's SQL type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedType {
    /// A registered type key, with the allowed literals for ENUM columns
    Known {
        key: &'static str,
        params: Option<Vec<String>>,
    },
    /// The SQL type matched no rule
    Unknown,
}

impl MappedType {
    fn known(key: &'static str) -> Self {
        MappedType::Known { key, params: None }
    }

    /// Resolve to a type key, degrading `Unknown` to `"Any"`. The degradation
    /// is logged with the column it happened on so incomplete mapping rules
    /// are visible in the generation output.
    pub fn or_any(self, table: &str, field: &str) -> (&'static str, Option<Vec<String>>) {
        match self {
            MappedType::Known { key, params } => (key, params),
            MappedType::Unknown => {
                warn!("unmapped column type on {}.{}, falling back to Any", table, field);
                ("Any", None)
            }
        }
    }
}

/// Classify a SQL type string into a registry type key for the query schema.
///
/// Matching follows substring rules in a fixed order, so `varchar(255)` hits
/// the `char` rule and `bigint unsigned` hits the `int` rule. `decimal`,
/// `enum` and `date`/`datetime` ignore nullability.
pub fn map_column(sql_type: &str, nullable: bool) -> MappedType {
    if sql_type.contains("char") {
        return MappedType::known(if nullable { "NullableString" } else { "String" });
    }
    if sql_type.contains("int") {
        return MappedType::known(if nullable { "NullableInteger" } else { "Integer" });
    }
    if sql_type.contains("decimal") {
        return MappedType::known("Float");
    }
    if sql_type == "timestamp" {
        return MappedType::known(if nullable { "NullableInteger" } else { "Integer" });
    }
    if sql_type.contains("enum") {
        return MappedType::Known {
            key: "ENUM",
            params: Some(enum_literals(sql_type)),
        };
    }
    if sql_type == "tinytext" || sql_type == "mediumtext" || sql_type == "text" {
        return MappedType::known(if nullable { "NullableString" } else { "String" });
    }
    if sql_type == "date" || sql_type == "datetime" {
        return MappedType::known("Date");
    }
    MappedType::Unknown
}

/// TypeScript type for the row-shape interface. Looser than [`map_column`]:
/// `datetime` and the sized text types intentionally fall through to `any`,
/// matching what the runtime row decoder hands back for them.
pub fn interface_type(sql_type: &str) -> &'static str {
    if sql_type.contains("char") || sql_type.contains("enum") || sql_type == "text" {
        return "string";
    }
    if sql_type.contains("int") {
        return "number";
    }
    if sql_type == "timestamp" || sql_type == "date" {
        return "Date";
    }
    "any"
}

/// Literals of an `enum('a','b')` column type, in declaration order.
fn enum_literals(sql_type: &str) -> Vec<String> {
    sql_type
        .trim_start_matches("enum(")
        .trim_end_matches(')')
        .split(',')
        .map(|part| part.trim().trim_matches('\'').to_string())
        .collect()
}
