use std::collections::BTreeMap;

use mwbkit_php::Literal;
use mwbkit_schema::IndexKind;

/// A chained column modifier. Declaration order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierKind {
    AutoIncrement,
    From,
    Nullable,
    Default,
    Primary,
    Index,
    Unique,
    Fulltext,
    SpatialIndex,
    StoredAs,
    VirtualAs,
    Charset,
    Collation,
    Comment,
    Change,
}

impl ModifierKind {
    pub const ALL: [ModifierKind; 15] = [
        ModifierKind::AutoIncrement,
        ModifierKind::From,
        ModifierKind::Nullable,
        ModifierKind::Default,
        ModifierKind::Primary,
        ModifierKind::Index,
        ModifierKind::Unique,
        ModifierKind::Fulltext,
        ModifierKind::SpatialIndex,
        ModifierKind::StoredAs,
        ModifierKind::VirtualAs,
        ModifierKind::Charset,
        ModifierKind::Collation,
        ModifierKind::Comment,
        ModifierKind::Change,
    ];

    /// The Laravel method this modifier calls.
    pub fn method(&self) -> &'static str {
        match self {
            ModifierKind::AutoIncrement => "autoIncrement",
            ModifierKind::From => "from",
            ModifierKind::Nullable => "nullable",
            ModifierKind::Default => "default",
            ModifierKind::Primary => "primary",
            ModifierKind::Index => "index",
            ModifierKind::Unique => "unique",
            ModifierKind::Fulltext => "fulltext",
            ModifierKind::SpatialIndex => "spatialIndex",
            ModifierKind::StoredAs => "storedAs",
            ModifierKind::VirtualAs => "virtualAs",
            ModifierKind::Charset => "charset",
            ModifierKind::Collation => "collation",
            ModifierKind::Comment => "comment",
            ModifierKind::Change => "change",
        }
    }

    /// The per-column modifier for an index category.
    pub fn for_index(kind: IndexKind) -> Self {
        match kind {
            IndexKind::Primary => ModifierKind::Primary,
            IndexKind::Index => ModifierKind::Index,
            IndexKind::Unique => ModifierKind::Unique,
            IndexKind::Spatial => ModifierKind::SpatialIndex,
            IndexKind::Fulltext => ModifierKind::Fulltext,
        }
    }
}

/// A lowered column: `$table->method(args)` plus its modifier chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub method: String,
    pub args: Vec<Literal>,
    modifiers: BTreeMap<ModifierKind, Vec<Literal>>,
}

impl ColumnDescriptor {
    pub fn new(method: impl Into<String>, args: Vec<Literal>) -> Self {
        Self {
            method: method.into(),
            args,
            modifiers: BTreeMap::new(),
        }
    }

    /// Set a modifier, replacing earlier arguments of the same kind.
    pub fn set_modifier(&mut self, kind: ModifierKind, args: Vec<Literal>) -> &mut Self {
        self.modifiers.insert(kind, args);
        self
    }

    pub fn remove_modifier(&mut self, kind: ModifierKind) -> Option<Vec<Literal>> {
        self.modifiers.remove(&kind)
    }

    pub fn modifier(&self, kind: ModifierKind) -> Option<&[Literal]> {
        self.modifiers.get(&kind).map(Vec::as_slice)
    }

    pub fn has_modifier(&self, kind: ModifierKind) -> bool {
        self.modifiers.contains_key(&kind)
    }

    /// Modifiers in emission order.
    pub fn modifiers(&self) -> impl Iterator<Item = (ModifierKind, &[Literal])> {
        self.modifiers
            .iter()
            .map(|(kind, args)| (*kind, args.as_slice()))
    }

    /// Whether the base method already declares an auto-incrementing
    /// primary key.
    pub fn is_incrementing_key(&self) -> bool {
        self.method == "id" || self.method == "increments" || self.method.ends_with("Increments")
    }
}

/// A lowered multi-column index: `$table->method([columns]);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub method: &'static str,
    /// Column names, in index order.
    pub columns: Vec<String>,
}
