use crate::domain::ExportError;
use crate::symtab::{Symbol, SymbolTable};
use serde::Serialize;
use std::io::Write;

/// Output format for a symbol report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `0xADDRESS name` line per symbol
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Everything known about one extraction, ready for rendering.
#[derive(Debug, Serialize)]
pub struct SymbolReport<'a> {
    pub source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<&'a str>,
    /// `false` when the table is a prefix kept after a failure.
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub count: usize,
    pub symbols: &'a [Symbol],
}

impl<'a> SymbolReport<'a> {
    #[must_use]
    pub fn new(source: &'a str, section: Option<&'a str>, table: &'a SymbolTable) -> Self {
        Self {
            source,
            section,
            complete: true,
            error: None,
            count: table.len(),
            symbols: table.as_slice(),
        }
    }

    /// Mark the report as a partial result of a failed extraction.
    #[must_use]
    pub fn partial(mut self, error: impl ToString) -> Self {
        self.complete = false;
        self.error = Some(error.to_string());
        self
    }

    /// Render the report.
    ///
    /// # Errors
    /// Returns an error if writing or serialization fails.
    pub fn write<W: Write>(&self, format: OutputFormat, mut out: W) -> Result<(), ExportError> {
        match format {
            OutputFormat::Text => self.write_text(&mut out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, self)?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn write_text<W: Write>(&self, out: &mut W) -> Result<(), ExportError> {
        for symbol in self.symbols {
            write!(out, "0x{:016x} {}", symbol.address, symbol.name)?;
            if let Some(meta) = symbol.meta_address {
                write!(out, " (metadata says 0x{meta:016x})")?;
            }
            writeln!(out)?;
        }
        if let Some(ref error) = self.error {
            writeln!(out, "# incomplete: {error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SymbolTable {
        let mut init = Symbol::new("main.init", 0x1010);
        init.meta_address = Some(0x1014);
        SymbolTable::from(vec![Symbol::new("main.main", 0x1000), init])
    }

    #[test]
    fn test_text_output() {
        let table = table();
        let mut out = Vec::new();
        SymbolReport::new("app", None, &table).write(OutputFormat::Text, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "0x0000000000001000 main.main");
        assert_eq!(lines[1], "0x0000000000001010 main.init (metadata says 0x0000000000001014)");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_partial_text_output_notes_error() {
        let table = table();
        let mut out = Vec::new();
        SymbolReport::new("app", None, &table)
            .partial("truncated")
            .write(OutputFormat::Text, &mut out)
            .unwrap();

        assert!(String::from_utf8(out).unwrap().ends_with("# incomplete: truncated\n"));
    }

    #[test]
    fn test_json_output() {
        let table = table();
        let mut out = Vec::new();
        SymbolReport::new("app", Some(".gopclntab"), &table)
            .write(OutputFormat::Json, &mut out)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["source"], "app");
        assert_eq!(parsed["section"], ".gopclntab");
        assert_eq!(parsed["complete"], true);
        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["symbols"][0]["name"], "main.main");
        assert_eq!(parsed["symbols"][0]["address"], 0x1000);
        assert!(parsed["symbols"][0].get("meta_address").is_none());
        assert_eq!(parsed["symbols"][1]["meta_address"], 0x1014);
        assert!(parsed.get("error").is_none());
    }
}
