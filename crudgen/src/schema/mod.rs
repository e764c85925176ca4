//! Database table schemas
//!
//! [`SchemaCatalog`] is a snapshot of every table in the connected database,
//! fetched once by [`introspect`] and passed down to the interactive flow and
//! the generator. [`mapper`] turns one table's columns into template
//! variables.

pub mod introspect;
pub mod mapper;

pub use mapper::{FieldHint, SchemaMapping};

use serde::Serialize;
use std::collections::BTreeMap;

/// Abstract column type, independent of the database dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Short character data (`VARCHAR`, `CHAR`)
    String,
    /// Long character data (`TEXT`)
    Text,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    BigInt,
    /// 16-bit or smaller integer
    SmallInt,
    /// Fixed-point number
    Decimal,
    /// Boolean
    Boolean,
    /// Single precision float
    Float,
    /// Double precision float
    Double,
    /// Date without time
    Date,
    /// Date and time without zone
    DateTime,
    /// Timestamp
    Timestamp,
    /// Time of day
    Time,
    /// Binary data
    Binary,
    /// JSON document
    Json,
    /// Anything not covered above
    Other,
}

impl ColumnType {
    /// Map a declared SQL type (`VARCHAR(255)`, `character varying`, ...) to an abstract type
    #[must_use]
    pub fn from_sql(declared: &str) -> Self {
        let lowered = declared.trim().to_lowercase();
        if lowered.starts_with("tinyint(1)") {
            return Self::Boolean;
        }

        let base = lowered
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
            .trim_end_matches(" unsigned");

        match base {
            "varchar" | "character varying" | "char" | "character" | "nvarchar" | "nchar"
            | "varchar2" | "string" | "uuid" | "enum" | "citext" => Self::String,
            "text" | "tinytext" | "mediumtext" | "longtext" | "clob" => Self::Text,
            "integer" | "int" | "int4" | "mediumint" | "serial" => Self::Integer,
            "bigint" | "int8" | "bigserial" => Self::BigInt,
            "smallint" | "int2" | "tinyint" | "smallserial" => Self::SmallInt,
            "decimal" | "numeric" | "money" => Self::Decimal,
            "boolean" | "bool" | "bit" => Self::Boolean,
            "real" | "float" | "float4" => Self::Float,
            "double" | "double precision" | "float8" => Self::Double,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "blob" | "bytea" | "binary" | "varbinary" => Self::Binary,
            "json" | "jsonb" => Self::Json,
            other if other.starts_with("timestamp") => Self::Timestamp,
            other if other.starts_with("time") => Self::Time,
            _ => Self::Other,
        }
    }

    /// Lower-case name used in templates
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::SmallInt => "smallint",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::Double => "double",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Time => "time",
            Self::Binary => "binary",
            Self::Json => "json",
            Self::Other => "other",
        }
    }

    /// Whether values of this type are short strings, the i18n candidates
    #[must_use]
    pub const fn is_string_like(self) -> bool {
        matches!(self, Self::String)
    }

    /// Whether this is one of the integer types
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer | Self::BigInt | Self::SmallInt)
    }
}

/// A table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Abstract type
    pub column_type: ColumnType,
    /// Whether the column is part of the primary key
    pub is_primary_key: bool,
    /// Whether NULL is allowed
    pub allow_null: bool,
    /// Declared character length, when known
    pub size: Option<u32>,
}

impl Column {
    /// Create a non-null, non-key column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            is_primary_key: false,
            allow_null: false,
            size: None,
        }
    }

    /// Build a column from a declared SQL type, extracting its length
    pub fn from_declared(name: impl Into<String>, declared: &str) -> Self {
        let column_type = ColumnType::from_sql(declared);
        let size = if column_type.is_string_like() {
            declared_size(declared)
        } else {
            None
        };
        Self {
            size,
            ..Self::new(name, column_type)
        }
    }

    /// Mark the column as primary key
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark the column as nullable
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Set the declared length
    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// Parse `255` out of `varchar(255)`
fn declared_size(declared: &str) -> Option<u32> {
    let open = declared.find('(')?;
    let close = declared[open..].find(')')? + open;
    declared[open + 1..close].split(',').next()?.trim().parse().ok()
}

/// Columns of one table, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Create a table schema
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Names of the primary-key columns
    #[must_use]
    pub fn primary_keys(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Snapshot of every table in the database, keyed by name
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    tables: BTreeMap<String, TableSchema>,
}

impl SchemaCatalog {
    /// Build a catalog from table schemas
    #[must_use]
    pub fn new(tables: Vec<TableSchema>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    /// Whether `name` is a table of the database
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table schema by name
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// All table names, sorted
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the database has no tables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
