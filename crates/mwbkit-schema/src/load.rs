//! The structural deserializer.
//!
//! Walks a value tree and builds a [`Document`]:
//!
//! - `value type="list"` becomes an ordered [`Value::List`] of its `value`
//!   and `link` children,
//! - `value type="object"` is built as the entity its `struct-name` maps to,
//!   or an [`Opaque`] record when the name is unknown,
//! - `link` keeps the referenced id as a raw string,
//! - any other `value` is a scalar holding its text.
//!
//! Object members are matched by their `key` attribute against the entity's
//! field table; unknown keys are dropped. Objects carrying an `id` are
//! recorded in the document's [`IdRegistry`].

use tracing::{debug, trace};

use crate::fields::Fields;
use crate::registry::{Entity, EntityKind, IdRegistry, Opaque, Registration};
use crate::tree::Node;
use crate::value::Value;
use crate::{Document, LoadError, SourceLine};

/// Deserialize `root` and check that it holds exactly one model, catalog and
/// schema.
pub fn load<N: Node>(root: &N) -> Result<Document, LoadError> {
    let document = deserialize(root)?;
    document.check_cardinality()?;
    Ok(document)
}

/// Deserialize `root` without checking model cardinality.
///
/// `root` is either the `<data>` element or any ancestor of it; the single
/// `value` entry below `<data>` is mapped onto the [`Document`].
pub fn deserialize<N: Node>(root: &N) -> Result<Document, LoadError> {
    let mut entries = Vec::new();
    collect_entries(root, &mut entries);

    let [entry] = entries.as_slice() else {
        return Err(LoadError::EntryCount {
            found: entries.len(),
            line: SourceLine(data_line(root)),
        });
    };

    let mut loader = Loader::default();
    let mut document = Document::default();
    loader.map_object(*entry, &mut document)?;
    document.ids = loader.ids;

    debug!(
        models = document.physical_models.len(),
        ids = document.ids.len(),
        "deserialized document"
    );
    Ok(document)
}

/// `value` children of every `data` element in the tree.
fn collect_entries<'a, N: Node>(node: &'a N, entries: &mut Vec<&'a N>) {
    if node.name() == "data" {
        entries.extend(node.children().filter(|child| child.name() == "value"));
    }
    for child in node.children() {
        collect_entries(child, entries);
    }
}

fn data_line<N: Node>(node: &N) -> Option<u32> {
    if node.name() == "data" {
        return node.line();
    }
    node.children().find_map(data_line)
}

#[derive(Default)]
struct Loader {
    ids: IdRegistry,
}

impl Loader {
    fn decode<N: Node>(&mut self, node: &N) -> Result<Option<Value>, LoadError> {
        match node.name() {
            "value" => {
                let value = match node.required_attr("type")? {
                    "list" => Value::List(self.decode_list(node)?),
                    "object" => Value::Object(self.decode_object(node)?),
                    _ => Value::Scalar(node.text()),
                };
                Ok(Some(value))
            }
            "link" => Ok(Some(Value::Link(node.text()))),
            other => {
                trace!(element = other, line = ?node.line(), "skipping element");
                Ok(None)
            }
        }
    }

    fn decode_list<N: Node>(&mut self, node: &N) -> Result<Vec<Value>, LoadError> {
        let mut items = Vec::new();
        for child in node.children() {
            if !matches!(child.name(), "value" | "link") {
                trace!(element = child.name(), line = ?child.line(), "skipping list item");
                continue;
            }
            if let Some(item) = self.decode(child)? {
                items.push(item);
            }
        }
        Ok(items)
    }

    fn decode_object<N: Node>(&mut self, node: &N) -> Result<Entity, LoadError> {
        let struct_name = node.required_attr("struct-name")?;
        let Some(kind) = EntityKind::from_struct_name(struct_name) else {
            debug!(struct_name, line = ?node.line(), "unknown struct-name, keeping opaque record");
            let id = node.attr("id").map(str::to_string);
            if let Some(id) = &id {
                self.register(id, node);
            }
            return Ok(Entity::Opaque(Opaque {
                struct_name: struct_name.to_string(),
                id,
            }));
        };

        Ok(match kind {
            EntityKind::Model => Entity::Model(self.build(node)?),
            EntityKind::Catalog => Entity::Catalog(self.build(node)?),
            EntityKind::Schema => Entity::Schema(self.build(node)?),
            EntityKind::Table => Entity::Table(self.build(node)?),
            EntityKind::Column => Entity::Column(self.build(node)?),
            EntityKind::Index => Entity::Index(self.build(node)?),
            EntityKind::IndexColumn => Entity::IndexColumn(self.build(node)?),
            EntityKind::ForeignKey => Entity::ForeignKey(self.build(node)?),
        })
    }

    fn build<T: Fields, N: Node>(&mut self, node: &N) -> Result<T, LoadError> {
        let mut target = T::default();
        self.map_object(node, &mut target)?;
        Ok(target)
    }

    fn map_object<T: Fields, N: Node>(&mut self, node: &N, target: &mut T) -> Result<(), LoadError> {
        for child in node.children() {
            let key = child.required_attr("key")?;
            let Some(setter) = T::setter(key) else {
                trace!(key, line = ?child.line(), "dropping unknown key");
                continue;
            };
            if let Some(value) = self.decode(child)? {
                if !setter(target, value) {
                    debug!(key, line = ?child.line(), "value has the wrong shape, keeping default");
                }
            }
        }

        if let Some(id) = node.attr("id") {
            self.register(id, node);
            target.set_id(id);
        }
        Ok(())
    }

    fn register<N: Node>(&mut self, id: &str, node: &N) {
        self.ids.register(
            id,
            Registration {
                struct_name: node.attr("struct-name").unwrap_or_default().to_string(),
                line: node.line(),
            },
        );
    }
}
