//! MySQL Workbench model types for mwbkit.
//!
//! A Workbench document is a self-describing tree of `value` and `link`
//! nodes. This crate turns that tree into a typed [`Document`] graph:
//!
//! - [`tree`] is the node API the deserializer reads from,
//! - [`registry`] maps struct-names to entity kinds and records ids,
//! - [`load`] is the structural deserializer itself,
//! - [`resolve`] optionally turns raw `link` ids into borrowed entities,
//! - [`data`] is the boundary for the seed rows embedded next to the model.
//!
//! References between entities (index column → column, foreign key → table)
//! stay as raw ids. Look them up through the owning [`Table`] or a
//! [`Resolver`].

use std::fmt;

mod error;
pub use error::{LoadError, SourceLine};

mod fields;

pub mod data;
pub mod load;
pub mod registry;
pub mod resolve;
pub mod tree;
pub mod value;

pub use data::{DataTable, SeedData, SeedSource, SeedValue};
pub use load::{deserialize, load};
pub use registry::{Entity, EntityKind, IdRegistry, Opaque, Registration};
pub use resolve::{EntityRef, Resolved, Resolver};
pub use tree::{Element, Node};
pub use value::Value;

/// Workbench's marker for an unset length, precision or scale.
pub const UNSPECIFIED: i64 = -1;

/// The root of a loaded Workbench document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Physical models, in document order.
    pub physical_models: Vec<Model>,
    /// Every object id seen while loading.
    pub ids: IdRegistry,
}

impl Document {
    /// Check the shape mwbkit can convert: one model, one catalog, one schema.
    pub fn check_cardinality(&self) -> Result<(), LoadError> {
        if self.physical_models.len() != 1 {
            return Err(LoadError::Cardinality {
                what: "physical model",
                found: self.physical_models.len(),
            });
        }
        let catalog = self.physical_models[0]
            .catalog
            .as_ref()
            .ok_or(LoadError::MissingCatalog)?;
        if catalog.schemata.len() != 1 {
            return Err(LoadError::Cardinality {
                what: "schema",
                found: catalog.schemata.len(),
            });
        }
        Ok(())
    }

    /// The single schema of the first model, if there is one.
    pub fn schema(&self) -> Option<&Schema> {
        self.physical_models
            .first()?
            .catalog
            .as_ref()?
            .schemata
            .first()
    }

    /// Tables of [`Document::schema`], or nothing.
    pub fn tables(&self) -> &[Table] {
        self.schema().map(|s| s.tables.as_slice()).unwrap_or(&[])
    }

    /// Find a table by its object id.
    pub fn find_table(&self, id: &str) -> Option<&Table> {
        self.tables().iter().find(|t| t.id == id)
    }
}

/// `workbench.physical.Model`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub id: String,
    pub name: String,
    pub catalog: Option<Catalog>,
}

/// `db.mysql.Catalog`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub id: String,
    pub name: String,
    pub schemata: Vec<Schema>,
}

/// `db.mysql.Schema`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub id: String,
    pub name: String,
    pub tables: Vec<Table>,
    pub default_character_set_name: String,
    pub default_collation_name: String,
}

/// A table (`db.mysql.Table`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub comment: String,
    /// Columns in definition order.
    pub columns: Vec<Column>,
    /// Indices in definition order.
    pub indices: Vec<Index>,
    pub foreign_keys: Vec<ForeignKey>,
    /// Id of the primary index, as written in the `primaryKey` link.
    pub primary_key: Option<String>,
    /// Raw `AUTO_INCREMENT` table option; usually empty.
    pub next_auto_inc: String,
    pub default_character_set_name: String,
    pub default_collation_name: String,
}

impl Table {
    /// Find a column by object id.
    pub fn column_by_id(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Find a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Single-column indices whose only column is `column`.
    pub fn single_indices<'a>(&'a self, column: &'a Column) -> impl Iterator<Item = &'a Index> {
        self.indices.iter().filter(move |index| {
            index.is_single_column() && index.columns[0].referenced_column == column.id
        })
    }

    /// Indices spanning more than one column (or none).
    pub fn multi_column_indices(&self) -> impl Iterator<Item = &Index> {
        self.indices.iter().filter(|index| !index.is_single_column())
    }

    /// The starting auto-increment value, when the table declares one.
    pub fn next_auto_increment(&self) -> Option<i64> {
        self.next_auto_inc.trim().parse().ok()
    }
}

/// A column (`db.mysql.Column`).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: String,
    pub name: String,
    pub comment: String,
    /// Namespaced type token, e.g. `com.mysql.rdbms.mysql.datatype.varchar`.
    pub simple_type: String,
    pub auto_increment: bool,
    pub character_set_name: String,
    pub collation_name: String,
    /// Raw parameter text, e.g. `('small','medium','large')` for enums.
    pub datatype_explicit_params: String,
    /// Generation expression of a generated column.
    pub expression: String,
    pub generated: bool,
    /// `VIRTUAL` or `STORED`.
    pub generated_storage: String,
    pub default_value: String,
    pub default_value_is_null: bool,
    /// Type flags such as `UNSIGNED` or `ZEROFILL`.
    pub flags: Vec<String>,
    pub is_not_null: bool,
    pub length: i64,
    pub precision: i64,
    pub scale: i64,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            comment: String::new(),
            simple_type: String::new(),
            auto_increment: false,
            character_set_name: String::new(),
            collation_name: String::new(),
            datatype_explicit_params: String::new(),
            expression: String::new(),
            generated: false,
            generated_storage: String::new(),
            default_value: String::new(),
            default_value_is_null: false,
            flags: Vec::new(),
            is_not_null: false,
            length: UNSPECIFIED,
            precision: UNSPECIFIED,
            scale: UNSPECIFIED,
        }
    }
}

impl Column {
    /// The MySQL type name: the last dot-separated segment of the type token.
    pub fn mysql_type(&self) -> &str {
        self.simple_type.rsplit('.').next().unwrap_or_default()
    }

    pub fn is_unsigned(&self) -> bool {
        self.flags.iter().any(|f| f.eq_ignore_ascii_case("UNSIGNED"))
    }

    pub fn is_nullable(&self) -> bool {
        !self.is_not_null
    }

    /// The declared default, unless it is empty or explicitly `NULL`.
    pub fn default_expr(&self) -> Option<&str> {
        if self.default_value.is_empty() || self.default_value_is_null {
            None
        } else {
            Some(&self.default_value)
        }
    }

    /// Literals of an `ENUM`/`SET` column.
    ///
    /// Each literal is the text strictly between a pair of single quotes in
    /// [`Column::datatype_explicit_params`].
    pub fn enum_values(&self) -> Vec<String> {
        let mut values = Vec::new();
        let mut rest = self.datatype_explicit_params.as_str();
        while let Some(open) = rest.find('\'') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('\'') else {
                break;
            };
            values.push(after[..close].to_string());
            rest = &after[close + 1..];
        }
        values
    }
}

/// Index categories Workbench knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Primary,
    Index,
    Unique,
    Spatial,
    Fulltext,
}

impl IndexKind {
    /// Parse a Workbench `indexType` token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "PRIMARY" => Some(IndexKind::Primary),
            "INDEX" => Some(IndexKind::Index),
            "UNIQUE" => Some(IndexKind::Unique),
            "SPATIAL" => Some(IndexKind::Spatial),
            "FULLTEXT" => Some(IndexKind::Fulltext),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Primary => "PRIMARY",
            IndexKind::Index => "INDEX",
            IndexKind::Unique => "UNIQUE",
            IndexKind::Spatial => "SPATIAL",
            IndexKind::Fulltext => "FULLTEXT",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An index (`db.mysql.Index`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    pub id: String,
    pub name: String,
    pub comment: String,
    pub columns: Vec<IndexColumn>,
    /// Raw category token; see [`Index::kind`].
    pub index_type: String,
    pub is_primary: bool,
    pub unique: bool,
}

impl Index {
    pub fn is_single_column(&self) -> bool {
        self.columns.len() == 1
    }

    /// The parsed category, or `None` for a token Workbench never writes.
    pub fn kind(&self) -> Option<IndexKind> {
        IndexKind::parse(&self.index_type)
    }
}

/// One column of an index (`db.mysql.IndexColumn`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexColumn {
    pub id: String,
    /// Id of the referenced [`Column`] in the same table.
    pub referenced_column: String,
    pub descend: bool,
}

/// A foreign key (`db.mysql.ForeignKey`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForeignKey {
    pub id: String,
    pub name: String,
    pub comment: String,
    /// Id of the referenced table.
    pub referenced_table: String,
    /// Ids of the local columns.
    pub columns: Vec<String>,
    /// Ids of the referenced columns.
    pub referenced_columns: Vec<String>,
    /// Id of the backing index.
    pub index: Option<String>,
    pub update_rule: String,
    pub delete_rule: String,
}

impl ForeignKey {
    pub fn is_single(&self) -> bool {
        self.columns.len() == 1 && self.referenced_columns.len() == 1
    }
}
