//! Plain-text rendering helpers shared by the commands.
//!
//! Format-only: commands decide what goes in a table or panel.

use serde::Serialize;
use std::io::Write;

use crate::error::CliError;

/// Longest free-text cell before truncation
pub const MAX_CELL_WIDTH: usize = 60;

/// Longest name shown next to an id; the id itself is never shortened
const MAX_NAME_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A fixed-column text table
#[derive(Debug)]
pub struct Table {
    columns: Vec<(&'static str, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&'static str, Align)]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Cells are written as given; callers shorten free text before adding it.
    pub fn add_row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(cells);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn write_to(&self, out: &mut dyn Write) -> std::io::Result<()> {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, (header, _))| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = self.columns.iter().map(|(h, _)| h.to_string()).collect();
        self.write_line(out, &header, &widths)?;
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(out, "{}", "-".repeat(total))?;
        for row in &self.rows {
            self.write_line(out, row, &widths)?;
        }
        Ok(())
    }

    fn write_line(
        &self,
        out: &mut dyn Write,
        cells: &[String],
        widths: &[usize],
    ) -> std::io::Result<()> {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.columns)
            .map(|((cell, width), (_, align))| pad(cell, *width, *align))
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())
    }
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.chars().count()));
    match align {
        Align::Left => format!("{}{}", cell, fill),
        Align::Right => format!("{}{}", fill, cell),
    }
}

/// Truncates a string to `max_chars` characters, adding "..." if needed.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// `name [id]`, or just the name when there is no id.
///
/// Long names are truncated, the id is always kept whole so it can be passed
/// to `vote` or `patterns --id`.
pub fn name_with_id(name: Option<&str>, id: Option<&str>) -> String {
    let name = truncate(name.unwrap_or("unnamed"), MAX_NAME_WIDTH);
    match id {
        Some(id) => format!("{} [{}]", name, id),
        None => name.to_string(),
    }
}

pub fn votes(up: u64, down: u64) -> String {
    format!("+{} / -{}", up, down)
}

pub fn score(value: f64) -> String {
    format!("{:.2}", value)
}

/// Source listing with a title bar and line numbers.
pub fn write_code_panel(
    out: &mut dyn Write,
    title: &str,
    language: Option<&str>,
    source: &str,
) -> std::io::Result<()> {
    let heading = match language {
        Some(lang) => format!("== {} ({}) ", title, lang),
        None => format!("== {} ", title),
    };
    let rule_len = heading.chars().count().max(40);
    writeln!(out, "{:=<width$}", heading, width = rule_len)?;

    let lines: Vec<&str> = source.lines().collect();
    let gutter = lines.len().to_string().len().max(3);
    for (idx, line) in lines.iter().enumerate() {
        writeln!(out, "{:>gutter$} | {}", idx + 1, line, gutter = gutter)?;
    }
    writeln!(out, "{}", "=".repeat(rule_len))?;
    writeln!(out)
}

/// Pretty-print any response as JSON followed by a newline.
pub fn write_json<T>(out: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", text)?;
    Ok(())
}
