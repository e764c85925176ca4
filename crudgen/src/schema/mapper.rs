//! Schema-to-template-variable mapping
//!
//! Partitions a table's columns into the structures the model template
//! consumes: editable fields, i18n candidates, UI field hints, validation
//! rules, labels and the raw property types.

use serde::Serialize;

use super::{ColumnType, TableSchema};
use crate::naming::NamingHelpers;

/// UI field hint for the admin form of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldHint {
    /// Single line text input
    #[serde(rename = "text")]
    Text,
    /// Multi line text area
    #[serde(rename = "textarea")]
    Textarea,
    /// Integer input
    #[serde(rename = "number")]
    Number,
    /// Decimal input
    #[serde(rename = "decimal")]
    Decimal,
    /// On/off toggle
    #[serde(rename = "toggleStatus")]
    ToggleStatus,
}

impl FieldHint {
    /// Hint for a column type, `None` when the type has no form input
    #[must_use]
    pub const fn for_type(column_type: ColumnType) -> Option<Self> {
        match column_type {
            ColumnType::String => Some(Self::Text),
            ColumnType::Text => Some(Self::Textarea),
            ColumnType::Integer | ColumnType::BigInt | ColumnType::SmallInt => Some(Self::Number),
            ColumnType::Decimal => Some(Self::Decimal),
            ColumnType::Boolean => Some(Self::ToggleStatus),
            _ => None,
        }
    }

    /// Name used by the admin UI
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Decimal => "decimal",
            Self::ToggleStatus => "toggleStatus",
        }
    }
}

/// Field hint of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintEntry {
    /// Column name
    pub name: String,
    /// Form input type
    pub hint: FieldHint,
}

/// Declared type of one column, primary keys included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyEntry {
    /// Column name
    pub name: String,
    /// Abstract column type
    pub column_type: ColumnType,
}

/// Human label of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    /// Column name
    pub name: String,
    /// Label shown in forms and lists
    pub label: String,
}

/// One validation rule applied to a group of attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Attributes the rule applies to
    pub attributes: Vec<String>,
    /// Validator name (`required`, `integer`, `string`, ...)
    pub validator: &'static str,
    /// Maximum length for `string` rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Template variables derived from a table schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaMapping {
    /// Non-key columns, in table order
    pub fields: Vec<String>,
    /// Non-key string columns (i18n candidates)
    pub text_fields: Vec<String>,
    /// Form hints for non-key columns with a known input type
    pub field_hints: Vec<HintEntry>,
    /// Every column with its abstract type
    pub properties: Vec<PropertyEntry>,
    /// Validation rules for non-key columns
    pub rules: Vec<Rule>,
    /// Labels for every column
    pub labels: Vec<LabelEntry>,
}

impl SchemaMapping {
    /// Map a table schema to template variables
    #[must_use]
    pub fn from_schema(schema: &TableSchema) -> Self {
        let mut mapping = Self::default();

        for column in &schema.columns {
            mapping.properties.push(PropertyEntry {
                name: column.name.clone(),
                column_type: column.column_type,
            });
            mapping.labels.push(LabelEntry {
                name: column.name.clone(),
                label: NamingHelpers::humanize(&column.name),
            });

            if column.is_primary_key {
                continue;
            }

            mapping.fields.push(column.name.clone());

            if column.column_type.is_string_like() {
                mapping.text_fields.push(column.name.clone());
            }

            if let Some(hint) = FieldHint::for_type(column.column_type) {
                mapping.field_hints.push(HintEntry {
                    name: column.name.clone(),
                    hint,
                });
            }
        }

        mapping.rules = build_rules(schema);
        mapping
    }

    /// Hint of a single field
    #[must_use]
    pub fn hint_for(&self, field: &str) -> Option<FieldHint> {
        self.field_hints
            .iter()
            .find(|entry| entry.name == field)
            .map(|entry| entry.hint)
    }
}

/// Group non-key columns into validation rules
fn build_rules(schema: &TableSchema) -> Vec<Rule> {
    let mut required = Vec::new();
    let mut integer = Vec::new();
    let mut number = Vec::new();
    let mut boolean = Vec::new();
    let mut safe = Vec::new();
    // (max length, attributes), in first-seen order
    let mut strings: Vec<(Option<u32>, Vec<String>)> = Vec::new();

    for column in schema.columns.iter().filter(|c| !c.is_primary_key) {
        if !column.allow_null {
            required.push(column.name.clone());
        }

        match column.column_type {
            t if t.is_integer() => integer.push(column.name.clone()),
            ColumnType::Decimal | ColumnType::Float | ColumnType::Double => {
                number.push(column.name.clone());
            }
            ColumnType::Boolean => boolean.push(column.name.clone()),
            ColumnType::String => {
                if let Some((_, attrs)) = strings.iter_mut().find(|(max, _)| *max == column.size) {
                    attrs.push(column.name.clone());
                } else {
                    strings.push((column.size, vec![column.name.clone()]));
                }
            }
            _ => safe.push(column.name.clone()),
        }
    }

    let mut rules = Vec::new();
    let mut push = |attributes: Vec<String>, validator: &'static str, max: Option<u32>| {
        if !attributes.is_empty() {
            rules.push(Rule {
                attributes,
                validator,
                max,
            });
        }
    };

    push(required, "required", None);
    push(integer, "integer", None);
    push(number, "number", None);
    push(boolean, "boolean", None);
    for (max, attributes) in strings {
        push(attributes, "string", max);
    }
    push(safe, "safe", None);

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;
    use std::collections::BTreeMap;

    fn nav_item() -> TableSchema {
        TableSchema::new(
            "cms_navitem",
            vec![
                Column::new("id", ColumnType::Integer).primary_key(),
                Column::new("title", ColumnType::String),
                Column::new("body", ColumnType::Text),
                Column::new("active", ColumnType::Boolean),
            ],
        )
    }

    #[test]
    fn test_partition_columns() {
        let mapping = SchemaMapping::from_schema(&nav_item());

        assert_eq!(mapping.fields, vec!["title", "body", "active"]);
        assert_eq!(mapping.text_fields, vec!["title"]);

        let hints: BTreeMap<_, _> = mapping
            .field_hints
            .iter()
            .map(|e| (e.name.as_str(), e.hint.as_str()))
            .collect();
        let expected: BTreeMap<_, _> = [
            ("title", "text"),
            ("body", "textarea"),
            ("active", "toggleStatus"),
        ]
        .into_iter()
        .collect();
        assert_eq!(hints, expected);
    }

    #[test]
    fn test_primary_key_only_in_properties() {
        let mapping = SchemaMapping::from_schema(&nav_item());

        assert_eq!(mapping.properties.len(), 4);
        assert_eq!(mapping.properties[0].name, "id");
        assert_eq!(mapping.properties[0].column_type, ColumnType::Integer);
        assert!(mapping.hint_for("id").is_none());
        assert!(!mapping.fields.contains(&"id".to_string()));
    }

    #[test]
    fn test_number_hints() {
        let schema = TableSchema::new(
            "stats",
            vec![
                Column::new("a", ColumnType::Integer),
                Column::new("b", ColumnType::BigInt),
                Column::new("c", ColumnType::SmallInt),
                Column::new("d", ColumnType::Decimal),
                Column::new("e", ColumnType::Date),
            ],
        );
        let mapping = SchemaMapping::from_schema(&schema);

        assert_eq!(mapping.hint_for("a"), Some(FieldHint::Number));
        assert_eq!(mapping.hint_for("b"), Some(FieldHint::Number));
        assert_eq!(mapping.hint_for("c"), Some(FieldHint::Number));
        assert_eq!(mapping.hint_for("d"), Some(FieldHint::Decimal));
        assert_eq!(mapping.hint_for("e"), None);
        assert_eq!(mapping.fields.len(), 5);
    }

    #[test]
    fn test_rules() {
        let schema = TableSchema::new(
            "album",
            vec![
                Column::new("id", ColumnType::Integer).primary_key(),
                Column::new("title", ColumnType::String).with_size(120),
                Column::new("slug", ColumnType::String).with_size(120),
                Column::new("code", ColumnType::String).nullable(),
                Column::new("sort", ColumnType::Integer).nullable(),
                Column::new("price", ColumnType::Decimal),
                Column::new("visible", ColumnType::Boolean),
                Column::new("body", ColumnType::Text).nullable(),
            ],
        );
        let rules = SchemaMapping::from_schema(&schema).rules;

        assert_eq!(rules[0].validator, "required");
        assert_eq!(rules[0].attributes, vec!["title", "slug", "price", "visible"]);
        assert_eq!(rules[1].validator, "integer");
        assert_eq!(rules[1].attributes, vec!["sort"]);
        assert_eq!(rules[2].validator, "number");
        assert_eq!(rules[3].validator, "boolean");
        assert_eq!(rules[4].validator, "string");
        assert_eq!(rules[4].attributes, vec!["title", "slug"]);
        assert_eq!(rules[4].max, Some(120));
        assert_eq!(rules[5].validator, "string");
        assert_eq!(rules[5].attributes, vec!["code"]);
        assert_eq!(rules[5].max, None);
        assert_eq!(rules[6].validator, "safe");
        assert_eq!(rules[6].attributes, vec!["body"]);
        assert_eq!(rules.len(), 7);
    }

    #[test]
    fn test_labels_cover_all_columns() {
        let mapping = SchemaMapping::from_schema(&nav_item());
        let labels: Vec<_> = mapping.labels.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["ID", "Title", "Body", "Active"]);
    }
}
