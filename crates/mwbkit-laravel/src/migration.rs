//! Schema builder statements for whole tables.

use mwbkit_php::{EmitError, Literal, PhpWriter, SingleQuoted};
use mwbkit_schema::{Column, Document, Index, Table};

use crate::{
    ColumnDescriptor, IndexDescriptor, ModifierKind, TranslateError, translate_column,
    translate_index,
};

/// Accumulates migration statements.
///
/// Each operation translates first and writes afterwards, so a failing
/// table or column leaves the output untouched.
#[derive(Debug, Clone, Default)]
pub struct Migration {
    writer: PhpWriter,
}

impl Migration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(indent_width: usize) -> Self {
        Self {
            writer: PhpWriter::with_indent_width(indent_width),
        }
    }

    /// `Schema::create(...)` with every column, then every multi-column
    /// index.
    pub fn create_table(&mut self, table: &Table) -> Result<&mut Self, TranslateError> {
        let columns = table
            .columns
            .iter()
            .map(|column| translate_column(table, column))
            .collect::<Result<Vec<_>, _>>()?;
        let indices = table
            .multi_column_indices()
            .map(|index| translate_index(table, index))
            .collect::<Result<Vec<_>, _>>()?;

        let open = format!(
            "Schema::create({}, function (Blueprint $table) {{",
            SingleQuoted(&table.name)
        );
        self.writer.newline();
        self.writer.block(&open, "});", |w| {
            for column in &columns {
                write_column(w, column)?;
            }
            for index in &indices {
                write_index(w, index)?;
            }
            Ok::<_, EmitError>(())
        })?;
        Ok(self)
    }

    /// `Schema::drop(...)`
    pub fn drop_table(&mut self, table: &Table) -> &mut Self {
        let statement = format!("Schema::drop({});", SingleQuoted(&table.name));
        self.writer.newline().write(&statement);
        self
    }

    /// A single column statement.
    pub fn add_column(&mut self, table: &Table, column: &Column) -> Result<&mut Self, TranslateError> {
        let desc = translate_column(table, column)?;
        write_column(&mut self.writer, &desc)?;
        Ok(self)
    }

    /// A column statement marked as a modification of an existing column.
    pub fn change_column(
        &mut self,
        table: &Table,
        column: &Column,
    ) -> Result<&mut Self, TranslateError> {
        let mut desc = translate_column(table, column)?;
        desc.set_modifier(ModifierKind::Change, vec![]);
        write_column(&mut self.writer, &desc)?;
        Ok(self)
    }

    /// A table-level index statement.
    pub fn add_index(&mut self, table: &Table, index: &Index) -> Result<&mut Self, TranslateError> {
        let desc = translate_index(table, index)?;
        write_index(&mut self.writer, &desc)?;
        Ok(self)
    }

    pub fn contents(&self) -> &str {
        self.writer.contents()
    }

    pub fn into_contents(self) -> String {
        self.writer.into_contents()
    }
}

fn write_column(w: &mut PhpWriter, desc: &ColumnDescriptor) -> Result<(), EmitError> {
    w.newline().write("$table").call(&desc.method, &desc.args)?;
    w.indent();
    for (kind, args) in desc.modifiers() {
        if let Err(e) = w.newline().call(kind.method(), args) {
            w.dedent();
            return Err(e);
        }
    }
    w.write(";").dedent();
    Ok(())
}

fn write_index(w: &mut PhpWriter, desc: &IndexDescriptor) -> Result<(), EmitError> {
    let columns = desc
        .columns
        .iter()
        .map(|name| Literal::from(name.as_str()))
        .collect();
    w.newline()
        .write("$table")
        .call(desc.method, &[Literal::List(columns)])?
        .write(";");
    Ok(())
}

/// The create-table code for `table`, without a leading line break.
pub fn render_table(table: &Table, indent_width: usize) -> Result<String, TranslateError> {
    let mut migration = Migration::with_indent_width(indent_width);
    migration.create_table(table)?;
    Ok(migration.into_contents().trim_start_matches('\n').to_string())
}

/// The statement for one table-level index of `table`, without a leading
/// line break.
pub fn render_index(table: &Table, index: &Index) -> Result<String, TranslateError> {
    let mut migration = Migration::new();
    migration.add_index(table, index)?;
    Ok(migration.into_contents().trim_start_matches('\n').to_string())
}

/// Tables of `new` that `prev` does not know about, in document order.
///
/// Tables are matched by object id, so a renamed table is not "created".
/// With no previous document every table is new.
pub fn created_tables<'a>(new: &'a Document, prev: Option<&Document>) -> Vec<&'a Table> {
    let Some(prev) = prev else {
        return new.tables().iter().collect();
    };
    new.tables()
        .iter()
        .filter(|table| !prev.ids.contains(&table.id) && prev.find_table(&table.id).is_none())
        .collect()
}

/// Tables of `prev` that `new` no longer has, in `prev`'s document order.
pub fn dropped_tables<'a>(new: &Document, prev: Option<&'a Document>) -> Vec<&'a Table> {
    match prev {
        Some(prev) => created_tables(prev, Some(new)),
        None => Vec::new(),
    }
}

/// Tables of `new` whose object id is in `prev` under a different name.
pub fn renamed_tables<'a>(new: &'a Document, prev: Option<&Document>) -> Vec<&'a Table> {
    let Some(prev) = prev else {
        return Vec::new();
    };
    new.tables()
        .iter()
        .filter(|table| {
            prev.find_table(&table.id)
                .is_some_and(|old| old.name != table.name)
        })
        .collect()
}
