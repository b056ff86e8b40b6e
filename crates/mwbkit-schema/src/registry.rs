//! Struct-name → entity mapping, and the id registry filled while loading.

use indexmap::IndexMap;
use tracing::debug;

use crate::{Catalog, Column, ForeignKey, Index, IndexColumn, Model, Schema, Table};

/// Entity kinds the deserializer knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Model,
    Catalog,
    Schema,
    Table,
    Column,
    Index,
    IndexColumn,
    ForeignKey,
}

/// The closed struct-name table. Anything not listed here loads as [`Opaque`].
pub const STRUCT_NAMES: &[(&str, EntityKind)] = &[
    ("workbench.physical.Model", EntityKind::Model),
    ("db.mysql.Catalog", EntityKind::Catalog),
    ("db.mysql.Schema", EntityKind::Schema),
    ("db.mysql.Table", EntityKind::Table),
    ("db.mysql.Column", EntityKind::Column),
    ("db.mysql.Index", EntityKind::Index),
    ("db.mysql.IndexColumn", EntityKind::IndexColumn),
    ("db.mysql.ForeignKey", EntityKind::ForeignKey),
];

impl EntityKind {
    /// Look up a struct-name.
    pub fn from_struct_name(struct_name: &str) -> Option<Self> {
        STRUCT_NAMES
            .iter()
            .find(|(name, _)| *name == struct_name)
            .map(|(_, kind)| *kind)
    }

    pub fn struct_name(&self) -> &'static str {
        STRUCT_NAMES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }
}

/// A decoded `object` node.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Model(Model),
    Catalog(Catalog),
    Schema(Schema),
    Table(Table),
    Column(Column),
    Index(Index),
    IndexColumn(IndexColumn),
    ForeignKey(ForeignKey),
    Opaque(Opaque),
}

impl Entity {
    /// The kind, or `None` for opaque records.
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Entity::Model(_) => Some(EntityKind::Model),
            Entity::Catalog(_) => Some(EntityKind::Catalog),
            Entity::Schema(_) => Some(EntityKind::Schema),
            Entity::Table(_) => Some(EntityKind::Table),
            Entity::Column(_) => Some(EntityKind::Column),
            Entity::Index(_) => Some(EntityKind::Index),
            Entity::IndexColumn(_) => Some(EntityKind::IndexColumn),
            Entity::ForeignKey(_) => Some(EntityKind::ForeignKey),
            Entity::Opaque(_) => None,
        }
    }
}

/// Placeholder for an object whose struct-name is not in [`STRUCT_NAMES`].
///
/// Its members are not decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Opaque {
    pub struct_name: String,
    pub id: Option<String>,
}

/// Extract one concrete entity type from an [`Entity`].
pub(crate) trait FromEntity: Sized {
    fn from_entity(entity: Entity) -> Option<Self>;
}

macro_rules! impl_from_entity {
    ($($variant:ident),* $(,)?) => {
        $(
            impl FromEntity for $variant {
                fn from_entity(entity: Entity) -> Option<Self> {
                    match entity {
                        Entity::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_entity!(
    Model,
    Catalog,
    Schema,
    Table,
    Column,
    Index,
    IndexColumn,
    ForeignKey,
    Opaque
);

/// What was registered under an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// `struct-name` of the object node, empty for the document root.
    pub struct_name: String,
    pub line: Option<u32>,
}

impl Registration {
    pub fn kind(&self) -> Option<EntityKind> {
        EntityKind::from_struct_name(&self.struct_name)
    }
}

/// Ids of every object node seen during one load, in document order.
///
/// Registration is write-once: the first object carrying an id keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdRegistry {
    entries: IndexMap<String, Registration>,
}

impl IdRegistry {
    /// Register `id`. Returns `false` if it was already taken.
    pub fn register(&mut self, id: &str, registration: Registration) -> bool {
        if let Some(existing) = self.entries.get(id) {
            debug!(
                id,
                kept = %existing.struct_name,
                ignored = %registration.struct_name,
                "duplicate object id"
            );
            return false;
        }
        self.entries.insert(id.to_string(), registration);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Registration> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Registration)> {
        self.entries.iter().map(|(id, reg)| (id.as_str(), reg))
    }
}
