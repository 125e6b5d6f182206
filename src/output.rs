//! Rendering command results as tables, plain text or JSON.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;

/// Writes command output in the selected format.
///
/// Data goes to `out`; errors, warnings and notes go to `err` in every
/// format, so JSON on stdout stays parseable.
pub struct View<W: Write = io::Stdout, E: Write = io::Stderr> {
    format: OutputFormat,
    out: W,
    err: E,
}

impl View {
    pub fn stdout(format: OutputFormat) -> Self {
        View::new(format, io::stdout())
    }
}

impl<W: Write> View<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        View::with_streams(format, out, io::stderr())
    }
}

impl<W: Write, E: Write> View<W, E> {
    pub fn with_streams(format: OutputFormat, out: W, err: E) -> Self {
        View { format, out, err }
    }

    /// Render rows under `headers`, or `json` in JSON mode.
    pub fn render<T: Serialize + ?Sized>(
        &mut self,
        headers: &[&str],
        rows: Vec<Vec<String>>,
        json: &T,
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(json),
            OutputFormat::Plain => {
                for row in rows {
                    writeln!(self.out, "{}", row.join("\t"))?;
                }
                Ok(())
            }
            OutputFormat::Table => {
                if rows.is_empty() {
                    return writeln!(self.out, "No results found.");
                }
                let mut builder = Builder::default();
                builder.push_record(headers.iter().copied());
                for row in rows {
                    builder.push_record(row);
                }
                let table = builder.build().with(Style::rounded()).to_string();
                writeln!(self.out, "{table}")
            }
        }
    }

    /// Render a single record as `label: value` lines.
    pub fn render_record<T: Serialize + ?Sized>(
        &mut self,
        pairs: &[(&str, String)],
        json: &T,
    ) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(json);
        }
        let width = pairs.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in pairs {
            match self.format {
                OutputFormat::Plain => writeln!(self.out, "{label}\t{value}")?,
                _ => writeln!(
                    self.out,
                    "{}  {value}",
                    format!("{label:<width$}").bold()
                )?,
            }
        }
        Ok(())
    }

    /// Pretty-printed JSON.
    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        writeln!(self.out, "{text}")
    }

    /// Free-form text, printed as-is in every format except JSON.
    pub fn text(&mut self, text: &str) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        writeln!(self.out, "{text}")
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&serde_json::json!({ "message": message })),
            _ => writeln!(self.out, "{} {message}", "✓".green()),
        }
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        writeln!(self.out, "{message}")
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "{} {message}", "⚠".yellow())
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "{} {message}", "✗".red())
    }

    /// Unadorned diagnostic line on the error stream.
    pub fn note(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "{message}")
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    #[cfg(test)]
    pub(crate) fn into_streams(self) -> (W, E) {
        (self.out, self.err)
    }
}

/// Turn off ANSI colors for everything written through `colored`.
pub fn disable_color() {
    colored::control::set_override(false);
}

/// Truncate a string to `max` characters with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Shorten a Jira timestamp like `2024-01-15T10:30:00.000+0000` to its
/// date and minute.
pub fn short_time(timestamp: &str) -> String {
    match timestamp.split_once('T') {
        Some((date, time)) => format!("{date} {}", time.get(..5).unwrap_or(time)),
        None => timestamp.to_string(),
    }
}

/// An empty placeholder for missing values.
pub fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
