//! Generate Laravel migrations from MySQL Workbench models.
//!
//! ```no_run
//! use mwbkit::{Config, Element};
//!
//! # fn tree() -> Element { unimplemented!() }
//! let document = mwbkit::load(&tree())?;
//! for table in mwbkit::generate(&document, &Config::default())? {
//!     println!("{}", table.code);
//! }
//! # Ok::<(), mwbkit::Error>(())
//! ```

use tracing::{debug, info};

pub mod config;
pub use config::{Config, ConfigError};

mod error;
pub use error::{Error, Result};

pub use mwbkit_laravel::{
    self as laravel, Migration, created_tables, dropped_tables, renamed_tables,
};
pub use mwbkit_php::{self as php, PhpWriter};
pub use mwbkit_schema::{self as schema, Document, Element, Node, Table};

/// Migration code for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTable {
    pub name: String,
    /// The `Schema::create(...)` block.
    pub code: String,
    /// Each multi-column index statement on its own, as also written at the
    /// end of `code`.
    pub indices: Vec<String>,
}

/// Deserialize a Workbench value tree and check it holds exactly one model,
/// catalog and schema.
pub fn load<N: Node>(root: &N) -> Result<Document> {
    Ok(mwbkit_schema::load(root)?)
}

/// Generate code for every table of `document` selected by `config`.
pub fn generate(document: &Document, config: &Config) -> Result<Vec<GeneratedTable>> {
    generate_tables(document.tables(), config)
}

/// Generate code for the given tables, in order, skipping those `config`
/// filters out.
pub fn generate_tables<'a>(
    tables: impl IntoIterator<Item = &'a Table>,
    config: &Config,
) -> Result<Vec<GeneratedTable>> {
    let mut generated = Vec::new();
    for table in tables {
        if !config.selects(&table.name) {
            debug!(table = %table.name, "table filtered out by config");
            continue;
        }

        let code = mwbkit_laravel::render_table(table, config.indent_width)?;
        let indices = table
            .multi_column_indices()
            .map(|index| mwbkit_laravel::render_index(table, index))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            table = %table.name,
            columns = table.columns.len(),
            indices = indices.len(),
            "generated table"
        );
        generated.push(GeneratedTable {
            name: table.name.clone(),
            code,
            indices,
        });
    }
    Ok(generated)
}
