//! Per-entity field tables: which member keys an entity accepts, and how a
//! decoded [`Value`] lands in the matching field.
//!
//! Keys missing from a table are dropped by the loader.

use crate::value::Value;
use crate::{Catalog, Column, Document, ForeignKey, Index, IndexColumn, Model, Schema, Table};

/// Assigns a decoded value. Returns `false` when the value has the wrong shape
/// for the field, which leaves the field untouched.
pub(crate) type Setter<T> = fn(&mut T, Value) -> bool;

pub(crate) trait Fields: Default + 'static {
    const FIELDS: &'static [(&'static str, Setter<Self>)];

    /// Called with the object's `id` attribute. Entities without an id field
    /// ignore it.
    fn set_id(&mut self, _id: &str) {}

    fn setter(key: &str) -> Option<Setter<Self>> {
        Self::FIELDS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, setter)| *setter)
    }
}

fn put<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

impl Fields for Document {
    const FIELDS: &'static [(&'static str, Setter<Self>)] =
        &[("physicalModels", |d, v| put(&mut d.physical_models, v.into_entities()))];
}

impl Fields for Model {
    const FIELDS: &'static [(&'static str, Setter<Self>)] = &[
        ("name", |m, v| put(&mut m.name, v.into_string())),
        ("catalog", |m, v| put(&mut m.catalog, v.into_entity().map(Some))),
    ];

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl Fields for Catalog {
    const FIELDS: &'static [(&'static str, Setter<Self>)] = &[
        ("name", |c, v| put(&mut c.name, v.into_string())),
        ("schemata", |c, v| put(&mut c.schemata, v.into_entities())),
    ];

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl Fields for Schema {
    const FIELDS: &'static [(&'static str, Setter<Self>)] = &[
        ("name", |s, v| put(&mut s.name, v.into_string())),
        ("tables", |s, v| put(&mut s.tables, v.into_entities())),
        ("defaultCharacterSetName", |s, v| {
            put(&mut s.default_character_set_name, v.into_string())
        }),
        ("defaultCollationName", |s, v| {
            put(&mut s.default_collation_name, v.into_string())
        }),
    ];

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl Fields for Table {
    const FIELDS: &'static [(&'static str, Setter<Self>)] = &[
        ("name", |t, v| put(&mut t.name, v.into_string())),
        ("comment", |t, v| put(&mut t.comment, v.into_string())),
        ("columns", |t, v| put(&mut t.columns, v.into_entities())),
        ("indices", |t, v| put(&mut t.indices, v.into_entities())),
        ("foreignKeys", |t, v| put(&mut t.foreign_keys, v.into_entities())),
        ("primaryKey", |t, v| put(&mut t.primary_key, v.into_string().map(Some))),
        ("nextAutoInc", |t, v| put(&mut t.next_auto_inc, v.into_string())),
        ("defaultCharacterSetName", |t, v| {
            put(&mut t.default_character_set_name, v.into_string())
        }),
        ("defaultCollationName", |t, v| {
            put(&mut t.default_collation_name, v.into_string())
        }),
    ];

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl Fields for Column {
    const FIELDS: &'static [(&'static str, Setter<Self>)] = &[
        ("name", |c, v| put(&mut c.name, v.into_string())),
        ("comment", |c, v| put(&mut c.comment, v.into_string())),
        ("simpleType", |c, v| put(&mut c.simple_type, v.into_string())),
        ("autoIncrement", |c, v| put(&mut c.auto_increment, v.into_bool())),
        ("characterSetName", |c, v| {
            put(&mut c.character_set_name, v.into_string())
        }),
        ("collationName", |c, v| put(&mut c.collation_name, v.into_string())),
        ("datatypeExplicitParams", |c, v| {
            put(&mut c.datatype_explicit_params, v.into_string())
        }),
        ("expression", |c, v| put(&mut c.expression, v.into_string())),
        ("generated", |c, v| put(&mut c.generated, v.into_bool())),
        ("generatedStorage", |c, v| {
            put(&mut c.generated_storage, v.into_string())
        }),
        ("defaultValue", |c, v| put(&mut c.default_value, v.into_string())),
        ("defaultValueIsNull", |c, v| {
            put(&mut c.default_value_is_null, v.into_bool())
        }),
        ("flags", |c, v| put(&mut c.flags, v.into_strings())),
        ("isNotNull", |c, v| put(&mut c.is_not_null, v.into_bool())),
        ("length", |c, v| put(&mut c.length, v.into_int())),
        ("precision", |c, v| put(&mut c.precision, v.into_int())),
        ("scale", |c, v| put(&mut c.scale, v.into_int())),
    ];

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl Fields for Index {
    const FIELDS: &'static [(&'static str, Setter<Self>)] = &[
        ("name", |i, v| put(&mut i.name, v.into_string())),
        ("comment", |i, v| put(&mut i.comment, v.into_string())),
        ("columns", |i, v| put(&mut i.columns, v.into_entities())),
        ("indexType", |i, v| put(&mut i.index_type, v.into_string())),
        ("isPrimary", |i, v| put(&mut i.is_primary, v.into_bool())),
        ("unique", |i, v| put(&mut i.unique, v.into_bool())),
    ];

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl Fields for IndexColumn {
    const FIELDS: &'static [(&'static str, Setter<Self>)] = &[
        ("referencedColumn", |c, v| {
            put(&mut c.referenced_column, v.into_string())
        }),
        ("descend", |c, v| put(&mut c.descend, v.into_bool())),
    ];

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl Fields for ForeignKey {
    const FIELDS: &'static [(&'static str, Setter<Self>)] = &[
        ("name", |f, v| put(&mut f.name, v.into_string())),
        ("comment", |f, v| put(&mut f.comment, v.into_string())),
        ("referencedTable", |f, v| {
            put(&mut f.referenced_table, v.into_string())
        }),
        ("columns", |f, v| put(&mut f.columns, v.into_strings())),
        ("referencedColumns", |f, v| {
            put(&mut f.referenced_columns, v.into_strings())
        }),
        ("index", |f, v| put(&mut f.index, v.into_string().map(Some))),
        ("updateRule", |f, v| put(&mut f.update_rule, v.into_string())),
        ("deleteRule", |f, v| put(&mut f.delete_rule, v.into_string())),
    ];

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}
