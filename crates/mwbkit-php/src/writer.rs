//! Indented PHP source accumulation.

use crate::{EmitError, Literal};

/// Accumulates PHP source text with a current indentation depth.
///
/// Nothing is written implicitly: [`PhpWriter::newline`] starts a line at the
/// current depth, and [`PhpWriter::call`] appends `->method(args)` to
/// whatever precedes it.
#[derive(Debug, Clone)]
pub struct PhpWriter {
    buf: String,
    depth: usize,
    indent_width: usize,
}

impl PhpWriter {
    /// Spaces per indentation level unless configured otherwise.
    pub const DEFAULT_INDENT_WIDTH: usize = 4;

    pub fn new() -> Self {
        Self::with_indent_width(Self::DEFAULT_INDENT_WIDTH)
    }

    pub fn with_indent_width(indent_width: usize) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            indent_width,
        }
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    /// Leave one indentation level. Dedenting at depth zero is a no-op.
    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Append text verbatim.
    pub fn write(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Start a new line at the current depth.
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        let width = self.depth * self.indent_width;
        self.buf.extend(std::iter::repeat_n(' ', width));
        self
    }

    /// Append `->method(args)` with each argument encoded as a literal.
    ///
    /// All arguments are encoded before anything is written, so a failed
    /// call leaves the buffer untouched.
    pub fn call(&mut self, method: &str, args: &[Literal]) -> Result<&mut Self, EmitError> {
        let encoded = args
            .iter()
            .map(Literal::encode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.call_raw(method, encoded.as_slice()))
    }

    /// Append `->method(args)` with arguments written verbatim.
    pub fn call_raw(&mut self, method: &str, args: &[impl AsRef<str>]) -> &mut Self {
        self.buf.push_str("->");
        self.buf.push_str(method);
        self.buf.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push_str(arg.as_ref());
        }
        self.buf.push(')');
        self
    }

    /// Write `open`, run `body` one level deeper, then write `close` on its
    /// own line at the starting depth.
    pub fn block<E>(
        &mut self,
        open: &str,
        close: &str,
        body: impl FnOnce(&mut Self) -> Result<(), E>,
    ) -> Result<(), E> {
        self.write(open);
        self.indent();
        let result = body(self);
        self.dedent();
        result?;
        self.newline().write(close);
        Ok(())
    }

    pub fn contents(&self) -> &str {
        &self.buf
    }

    pub fn into_contents(self) -> String {
        self.buf
    }

    /// Drop the accumulated text and reset the depth.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.depth = 0;
    }
}

impl Default for PhpWriter {
    fn default() -> Self {
        Self::new()
    }
}
