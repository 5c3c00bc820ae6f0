use std::io::{self, Write};

use crate::config::MarkerStyle;

/// Writes delimited file blocks using one marker style.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerFormatter {
    style: MarkerStyle,
}

impl MarkerFormatter {
    pub fn new(style: MarkerStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    pub fn begin_line(&self, name: &str) -> String {
        let (open, close) = self.style.delimiters();
        format!("{} Begin {} {}", open, name, close)
    }

    pub fn end_line(&self, name: &str) -> String {
        let (open, close) = self.style.delimiters();
        format!("{} End {} {}", open, name, close)
    }

    /// True when `content` holds its own end-marker line, which would cut the
    /// block short when the dump is read back.
    pub fn embeds_end_marker(&self, name: &str, content: &str) -> bool {
        let terminator = format!("\n{}\n", self.end_line(name));
        let framed = format!("{}{}", content, terminator);
        framed.find(&terminator) != Some(content.len())
    }

    /// Writes one block. `content` is emitted byte for byte.
    pub fn write_block(&self, output: &mut dyn Write, name: &str, content: &str) -> io::Result<()> {
        writeln!(output)?;
        writeln!(output, "{}", self.begin_line(name))?;
        output.write_all(content.as_bytes())?;
        writeln!(output)?;
        writeln!(output, "{}", self.end_line(name))?;
        Ok(())
    }
}
