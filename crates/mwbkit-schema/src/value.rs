//! Decoded values, before they are assigned to entity fields.

use crate::registry::{Entity, FromEntity};

/// A decoded `value` or `link` node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text of a scalar node (`string`, `int`, `real`, ...).
    Scalar(String),
    /// Children of a `list` node, in order.
    List(Vec<Value>),
    /// An `object` node.
    Object(Entity),
    /// The referenced id of a `link` node, unresolved.
    Link(String),
}

impl Value {
    /// Text of a scalar or the id of a link.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) | Value::Link(s) => Some(s),
            Value::List(_) | Value::Object(_) => None,
        }
    }

    pub(crate) fn into_string(self) -> Option<String> {
        match self {
            Value::Scalar(s) | Value::Link(s) => Some(s),
            Value::List(_) | Value::Object(_) => None,
        }
    }

    pub(crate) fn into_int(self) -> Option<i64> {
        let text = self.as_str()?.trim();
        text.parse::<i64>().ok().or_else(|| {
            // Workbench writes some integers as reals ("10.0").
            let real = text.parse::<f64>().ok()?;
            (real.fract() == 0.0).then_some(real as i64)
        })
    }

    pub(crate) fn into_bool(self) -> Option<bool> {
        self.into_int().map(|n| n != 0)
    }

    /// A list of scalars or links.
    pub(crate) fn into_strings(self) -> Option<Vec<String>> {
        match self {
            Value::List(items) => Some(items.into_iter().filter_map(Value::into_string).collect()),
            _ => None,
        }
    }

    pub(crate) fn into_entity<T: FromEntity>(self) -> Option<T> {
        match self {
            Value::Object(entity) => T::from_entity(entity),
            _ => None,
        }
    }

    /// A list of entities of one kind; other items are skipped.
    pub(crate) fn into_entities<T: FromEntity>(self) -> Option<Vec<T>> {
        match self {
            Value::List(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| item.into_entity::<T>())
                    .collect(),
            ),
            _ => None,
        }
    }
}
