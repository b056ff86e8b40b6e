//! Optional second phase: look up the objects behind raw `link` ids.
//!
//! Loading leaves every reference as a string id. A [`Resolver`] indexes a
//! loaded [`Document`] once and hands out borrows into it, so a foreign key
//! and the table it points at never own each other.

use indexmap::IndexMap;

use crate::{Catalog, Column, Document, ForeignKey, Index, IndexColumn, Model, Schema, Table};

/// A borrowed entity of a loaded document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    Model(&'a Model),
    Catalog(&'a Catalog),
    Schema(&'a Schema),
    Table(&'a Table),
    Column(&'a Column),
    Index(&'a Index),
    IndexColumn(&'a IndexColumn),
    ForeignKey(&'a ForeignKey),
}

/// Outcome of resolving an id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Entity(EntityRef<'a>),
    /// Nothing in the document carries this id; the raw id is handed back.
    Unresolved(&'a str),
}

/// Id → entity index over one document.
#[derive(Debug, Clone, Default)]
pub struct Resolver<'a> {
    index: IndexMap<&'a str, EntityRef<'a>>,
}

impl<'a> Resolver<'a> {
    pub fn new(document: &'a Document) -> Self {
        let mut resolver = Self::default();
        for model in &document.physical_models {
            resolver.insert(&model.id, EntityRef::Model(model));
            let Some(catalog) = &model.catalog else {
                continue;
            };
            resolver.insert(&catalog.id, EntityRef::Catalog(catalog));
            for schema in &catalog.schemata {
                resolver.insert(&schema.id, EntityRef::Schema(schema));
                for table in &schema.tables {
                    resolver.index_table(table);
                }
            }
        }
        resolver
    }

    fn index_table(&mut self, table: &'a Table) {
        self.insert(&table.id, EntityRef::Table(table));
        for column in &table.columns {
            self.insert(&column.id, EntityRef::Column(column));
        }
        for index in &table.indices {
            self.insert(&index.id, EntityRef::Index(index));
            for index_column in &index.columns {
                self.insert(&index_column.id, EntityRef::IndexColumn(index_column));
            }
        }
        for fk in &table.foreign_keys {
            self.insert(&fk.id, EntityRef::ForeignKey(fk));
        }
    }

    fn insert(&mut self, id: &'a str, entity: EntityRef<'a>) {
        if !id.is_empty() {
            self.index.entry(id).or_insert(entity);
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<EntityRef<'a>> {
        self.index.get(id).copied()
    }

    /// The entity behind `id`, or the id itself when nothing matches.
    pub fn resolve(&self, id: &'a str) -> Resolved<'a> {
        match self.get(id) {
            Some(entity) => Resolved::Entity(entity),
            None => Resolved::Unresolved(id),
        }
    }

    pub fn table(&self, id: &str) -> Option<&'a Table> {
        match self.get(id)? {
            EntityRef::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn column(&self, id: &str) -> Option<&'a Column> {
        match self.get(id)? {
            EntityRef::Column(column) => Some(column),
            _ => None,
        }
    }

    /// The table a foreign key points at.
    pub fn referenced_table(&self, fk: &ForeignKey) -> Option<&'a Table> {
        self.table(&fk.referenced_table)
    }

    /// Referenced columns of a foreign key, skipping ids that do not resolve.
    pub fn referenced_columns(&self, fk: &ForeignKey) -> Vec<&'a Column> {
        fk.referenced_columns
            .iter()
            .filter_map(|id| self.column(id))
            .collect()
    }
}
