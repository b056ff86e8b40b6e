//! PHP source emission.
//!
//! [`Literal`] is a PHP value that can be written into source code,
//! [`PhpWriter`] accumulates indented source text built from method calls.

use std::fmt;

use thiserror::Error;

mod writer;
pub use writer::*;

/// Errors raised while emitting PHP source.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot encode a {kind} literal as PHP source")]
    UnsupportedLiteral { kind: &'static str },
}

/// A value to write as a PHP literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Written double-quoted and escaped.
    String(String),
    /// Written as a bare decimal.
    Int(i64),
    /// Written as `[a, b]`, each element encoded in turn.
    List(Vec<Literal>),
    /// Source text written verbatim, e.g. a column default expression.
    Raw(String),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn raw(source: impl Into<String>) -> Self {
        Literal::Raw(source.into())
    }

    /// Name of the literal kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Int(_) => "integer",
            Literal::List(_) => "list",
            Literal::Raw(_) => "raw",
            Literal::Bool(_) => "boolean",
            Literal::Null => "null",
        }
    }

    /// Encode as PHP source.
    ///
    /// # Example
    /// ```
    /// use mwbkit_php::Literal;
    /// let list = Literal::List(vec!["a".into(), Literal::Int(2)]);
    /// assert_eq!(list.encode().unwrap(), r#"["a", 2]"#);
    /// ```
    pub fn encode(&self) -> Result<String, EmitError> {
        let mut out = String::new();
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Append the encoded literal to `out`. On error `out` may hold a partial
    /// encoding.
    pub fn encode_into(&self, out: &mut String) -> Result<(), EmitError> {
        match self {
            Literal::String(s) => out.push_str(&escape_string(s)),
            Literal::Int(n) => out.push_str(&n.to_string()),
            Literal::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.encode_into(out)?;
                }
                out.push(']');
            }
            Literal::Raw(source) => out.push_str(source),
            Literal::Bool(_) | Literal::Null => {
                return Err(EmitError::UnsupportedLiteral { kind: self.kind() });
            }
        }
        Ok(())
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Int(n)
    }
}

impl From<Vec<Literal>> for Literal {
    fn from(items: Vec<Literal>) -> Self {
        Literal::List(items)
    }
}

/// A PHP double-quoted string wrapper.
///
/// Display writes the value escaped and quoted with double quotes. Control
/// characters use their short escape where PHP has one, otherwise a 3-digit
/// octal escape.
///
/// # Example
/// ```
/// use mwbkit_php::DoubleQuoted;
/// assert_eq!(format!("{}", DoubleQuoted("name")), "\"name\"");
/// assert_eq!(format!("{}", DoubleQuoted("$x")), "\"\\$x\"");
/// assert_eq!(format!("{}", DoubleQuoted("a\u{1}")), "\"a\\001\"");
/// ```
pub struct DoubleQuoted<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> fmt::Display for DoubleQuoted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.0.as_ref().chars() {
            match c {
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                '\t' => write!(f, "\\t")?,
                '\x0B' => write!(f, "\\v")?,
                '\x0C' => write!(f, "\\f")?,
                '"' | '\\' | '$' | '{' | '}' => write!(f, "\\{c}")?,
                c if (c as u32) < 0x20 => write!(f, "\\{:03o}", c as u32)?,
                c => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")
    }
}

/// A PHP single-quoted string wrapper.
///
/// Only `\` and `'` need escaping inside single quotes.
///
/// # Example
/// ```
/// use mwbkit_php::SingleQuoted;
/// assert_eq!(format!("{}", SingleQuoted("users")), "'users'");
/// assert_eq!(format!("{}", SingleQuoted("it's")), "'it\\'s'");
/// ```
pub struct SingleQuoted<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> fmt::Display for SingleQuoted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'")?;
        for c in self.0.as_ref().chars() {
            if c == '\'' || c == '\\' {
                write!(f, "\\")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "'")
    }
}

/// Escape and double-quote a string for PHP.
pub fn escape_string(s: &str) -> String {
    format!("{}", DoubleQuoted(s))
}
