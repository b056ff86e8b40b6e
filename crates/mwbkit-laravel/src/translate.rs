//! Lowering of Workbench columns and indices into Laravel descriptors.

use mwbkit_php::Literal;
use mwbkit_schema::{Column, Index, IndexKind, Table};
use tracing::{debug, trace};

use crate::types::{IntSize, TypeFamily, classify, ucfirst};
use crate::{ColumnDescriptor, IndexDescriptor, ModifierKind, TranslateError};

/// Laravel's own defaults for the decimal family.
const DEFAULT_TOTAL: i64 = 8;
const DEFAULT_SCALE: i64 = 2;
/// MySQL's defaults for a bare `DECIMAL`.
const MYSQL_DECIMAL_TOTAL: i64 = 10;
const MYSQL_DECIMAL_SCALE: i64 = 0;
const DEFAULT_STRING_LENGTH: i64 = 255;
const UUID_LENGTH: i64 = 36;

/// Lower one column of `table`.
///
/// The table supplies what a column alone does not know: its single-column
/// indices, the starting auto-increment value, and the default character set
/// and collation.
pub fn translate_column(table: &Table, column: &Column) -> Result<ColumnDescriptor, TranslateError> {
    let mut desc = base_descriptor(column)?;

    if column.auto_increment {
        if let Some(start) = table.next_auto_increment() {
            desc.set_modifier(ModifierKind::From, vec![Literal::Int(start)]);
        }
    }
    if column.is_nullable() {
        desc.set_modifier(ModifierKind::Nullable, vec![]);
    }
    if let Some(default) = column.default_expr() {
        desc.set_modifier(ModifierKind::Default, vec![Literal::raw(default)]);
    }

    for index in table.single_indices(column) {
        let kind = index_kind(index)?;
        if kind == IndexKind::Primary && desc.is_incrementing_key() {
            debug!(
                table = %table.name,
                column = %column.name,
                method = %desc.method,
                "column is already an incrementing key, skipping primary modifier"
            );
            continue;
        }
        let args = if kind == IndexKind::Primary || index.name.is_empty() {
            vec![]
        } else {
            vec![Literal::from(index.name.as_str())]
        };
        desc.set_modifier(ModifierKind::for_index(kind), args);
    }

    if column.generated && !column.expression.is_empty() {
        let kind = if column.generated_storage.eq_ignore_ascii_case("STORED") {
            ModifierKind::StoredAs
        } else {
            ModifierKind::VirtualAs
        };
        desc.set_modifier(kind, vec![Literal::from(column.expression.as_str())]);
    }
    if !column.character_set_name.is_empty()
        && column.character_set_name != table.default_character_set_name
    {
        desc.set_modifier(
            ModifierKind::Charset,
            vec![Literal::from(column.character_set_name.as_str())],
        );
    }
    if !column.collation_name.is_empty() && column.collation_name != table.default_collation_name {
        desc.set_modifier(
            ModifierKind::Collation,
            vec![Literal::from(column.collation_name.as_str())],
        );
    }
    if !column.comment.is_empty() {
        desc.set_modifier(
            ModifierKind::Comment,
            vec![Literal::from(column.comment.as_str())],
        );
    }

    trace!(column = %column.name, method = %desc.method, "translated column");
    Ok(desc)
}

/// Lower a multi-column index of `table`.
///
/// Index columns whose ids do not resolve to a column of `table` are
/// skipped.
pub fn translate_index(table: &Table, index: &Index) -> Result<IndexDescriptor, TranslateError> {
    let kind = index_kind(index)?;
    let mut columns = Vec::with_capacity(index.columns.len());
    for index_column in &index.columns {
        match table.column_by_id(&index_column.referenced_column) {
            Some(column) => columns.push(column.name.clone()),
            None => debug!(
                table = %table.name,
                index = %index.name,
                column_id = %index_column.referenced_column,
                "index column does not resolve, skipping"
            ),
        }
    }
    Ok(IndexDescriptor {
        method: index_method(kind, true),
        columns,
    })
}

/// The Laravel method for an index category.
///
/// Table-level full-text indices use `fullText`; the column modifier is
/// `fulltext`.
pub fn index_method(kind: IndexKind, for_table: bool) -> &'static str {
    match kind {
        IndexKind::Fulltext if for_table => "fullText",
        _ => ModifierKind::for_index(kind).method(),
    }
}

fn index_kind(index: &Index) -> Result<IndexKind, TranslateError> {
    index.kind().ok_or_else(|| TranslateError::InvalidIndexType {
        index_type: index.index_type.clone(),
        index: index.name.clone(),
    })
}

fn base_descriptor(column: &Column) -> Result<ColumnDescriptor, TranslateError> {
    let mysql_type = column.mysql_type();
    let Some(family) = classify(mysql_type) else {
        return Err(TranslateError::UnsupportedType {
            type_name: mysql_type.to_string(),
            column: column.name.clone(),
        });
    };

    let name = Literal::from(column.name.as_str());
    Ok(match family {
        TypeFamily::Integer(size) => integer(size, column),
        TypeFamily::Decimal(method) => decimal(method, column),
        TypeFamily::String(method) => string(mysql_type, method, column),
        TypeFamily::Time(method) => match time_precision(column) {
            0 => ColumnDescriptor::new(method, vec![name]),
            precision => ColumnDescriptor::new(method, vec![name, Literal::Int(precision)]),
        },
        TypeFamily::Enumerated(method) => {
            let values = column
                .enum_values()
                .into_iter()
                .map(Literal::String)
                .collect();
            ColumnDescriptor::new(method, vec![name, Literal::List(values)])
        }
        TypeFamily::Residual(method) => ColumnDescriptor::new(method, vec![name]),
    })
}

fn integer(size: IntSize, column: &Column) -> ColumnDescriptor {
    let unsigned = column.is_unsigned();
    let method = match (unsigned, column.auto_increment) {
        (true, true) => size.increments_method(),
        (true, false) => size.unsigned_method(),
        (false, _) => size.signed_method(),
    };

    let mut args = vec![Literal::from(column.name.as_str())];
    let method = if method == "bigIncrements" {
        if column.name == "id" {
            args.clear();
        }
        "id".to_string()
    } else if method == "unsignedBigInteger" && column.name.ends_with("_id") {
        "foreignId".to_string()
    } else {
        method
    };

    let mut desc = ColumnDescriptor::new(method, args);
    if column.auto_increment && !unsigned {
        desc.set_modifier(ModifierKind::AutoIncrement, vec![]);
    }
    desc
}

fn decimal(method: &str, column: &Column) -> ColumnDescriptor {
    // A bare DECIMAL means MySQL's 10/0, which Laravel's 8/2 would change.
    let (unset_total, unset_scale) = if method == "decimal" {
        (MYSQL_DECIMAL_TOTAL, MYSQL_DECIMAL_SCALE)
    } else {
        (DEFAULT_TOTAL, DEFAULT_SCALE)
    };
    let method = if column.is_unsigned() {
        format!("unsigned{}", ucfirst(method))
    } else {
        method.to_string()
    };
    let total = if column.precision < 0 {
        unset_total
    } else {
        column.precision
    };
    let scale = if column.scale < 0 {
        unset_scale
    } else {
        column.scale
    };

    let name = Literal::from(column.name.as_str());
    let args = match (total, scale) {
        (DEFAULT_TOTAL, DEFAULT_SCALE) => vec![name],
        (total, DEFAULT_SCALE) => vec![name, Literal::Int(total)],
        (total, scale) => vec![name, Literal::Int(total), Literal::Int(scale)],
    };
    ColumnDescriptor::new(method, args)
}

fn string(mysql_type: &str, method: &str, column: &Column) -> ColumnDescriptor {
    let name = Literal::from(column.name.as_str());
    if mysql_type == "char" && column.length == UUID_LENGTH {
        return ColumnDescriptor::new("uuid", vec![name]);
    }
    if column.length < 0 || column.length == DEFAULT_STRING_LENGTH {
        ColumnDescriptor::new(method, vec![name])
    } else {
        ColumnDescriptor::new(method, vec![name, Literal::Int(column.length)])
    }
}

/// Fractional-second digits. Workbench keeps them in `length` for the `*_f`
/// types.
fn time_precision(column: &Column) -> i64 {
    if column.precision > 0 {
        column.precision
    } else if column.length > 0 {
        column.length
    } else {
        0
    }
}
