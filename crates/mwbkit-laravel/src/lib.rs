//! Laravel migration generation for mwbkit.
//!
//! Translation happens in two steps. [`translate_column`] and
//! [`translate_index`] lower Workbench entities into descriptors (a builder
//! method, its arguments, and an ordered modifier chain), then [`Migration`]
//! writes descriptors out as schema builder statements.

mod error;
pub use error::TranslateError;

mod descriptor;
pub use descriptor::{ColumnDescriptor, IndexDescriptor, ModifierKind};

pub mod types;

mod translate;
pub use translate::{index_method, translate_column, translate_index};

mod migration;
pub use migration::{
    Migration, created_tables, dropped_tables, render_index, render_table, renamed_tables,
};

#[cfg(test)]
mod tests;
