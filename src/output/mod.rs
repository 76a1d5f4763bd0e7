//! Output formatters for analysis reports.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::core::Result;

/// Output format enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Markdown,
    Text,
    Csv,
}

impl Format {
    pub fn format_value<W: Write>(&self, value: &Value, writer: &mut W) -> Result<()> {
        match self {
            Format::Json => format_json(value, writer),
            Format::Markdown => format_markdown(value, writer),
            Format::Text => format_text(value, writer),
            Format::Csv => format_csv(value, writer),
        }
    }

    pub fn format<T: Serialize, W: Write>(&self, data: &T, writer: &mut W) -> Result<()> {
        let value = serde_json::to_value(data)?;
        self.format_value(&value, writer)
    }
}

fn format_json<W: Write>(value: &Value, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Scalars as bold key lines, row arrays as tables under a heading.
fn format_markdown<W: Write>(value: &Value, writer: &mut W) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Array(rows) => {
                        writeln!(writer, "# {}\n", format_key(key))?;
                        format_as_table(rows, writer)?;
                    }
                    _ => writeln!(writer, "**{}**: {}\n", format_key(key), format_scalar(val))?,
                }
            }
        }
        Value::Array(rows) => format_as_table(rows, writer)?,
        _ => writeln!(writer, "{}\n", format_scalar(value))?,
    }
    Ok(())
}

/// Scalars as `Key: value` lines, row arrays as indented aligned columns.
fn format_text<W: Write>(value: &Value, writer: &mut W) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Array(rows) => {
                        writeln!(writer, "{}:", format_key(key))?;
                        format_as_text_table(rows, writer, "  ")?;
                    }
                    _ => writeln!(writer, "{}: {}", format_key(key), format_scalar(val))?,
                }
            }
        }
        Value::Array(rows) => format_as_text_table(rows, writer, "")?,
        _ => writeln!(writer, "{}", format_scalar(value))?,
    }
    Ok(())
}

/// Every non-empty row array in `value` as CSV, separated by blank lines.
fn format_csv<W: Write>(value: &Value, writer: &mut W) -> Result<()> {
    let tables: Vec<&[Value]> = match value {
        Value::Array(arr) => vec![arr.as_slice()],
        Value::Object(map) => map
            .values()
            .filter_map(|v| match v {
                Value::Array(arr) if !arr.is_empty() => Some(arr.as_slice()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        writer.write_all(csv_table(table).as_bytes())?;
    }
    Ok(())
}

/// Render an array of flat objects as CSV; columns follow the first row.
pub fn csv_table(rows: &[Value]) -> String {
    let headers: Vec<&str> = match rows.first() {
        Some(Value::Object(first)) => first.keys().map(String::as_str).collect(),
        _ => return String::new(),
    };

    let mut output = headers
        .iter()
        .map(|h| escape_csv(h))
        .collect::<Vec<_>>()
        .join(",");
    output.push('\n');

    for row in rows {
        if let Value::Object(map) = row {
            let cells: Vec<String> = headers
                .iter()
                .map(|h| csv_cell(map.get(*h).unwrap_or(&Value::Null)))
                .collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }
    }
    output
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => escape_csv(s),
        other => escape_csv(&other.to_string()),
    }
}

/// Quote a cell containing a comma, quote or line break; double inner quotes.
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn format_key(key: &str) -> String {
    key.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 {
                    format!("{}", f as i64)
                } else {
                    format!("{:.2}", f)
                }
            } else {
                n.to_string()
            }
        }
        Value::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
        Value::Null => "N/A".to_string(),
        _ => value.to_string(),
    }
}

fn format_as_table<W: Write>(rows: &[Value], writer: &mut W) -> Result<()> {
    let headers: Vec<&str> = match rows.first() {
        Some(Value::Object(map)) => map.keys().map(String::as_str).collect(),
        _ => {
            writeln!(writer, "_No rows_\n")?;
            return Ok(());
        }
    };

    write!(writer, "|")?;
    for header in &headers {
        write!(writer, " {} |", format_key(header))?;
    }
    writeln!(writer)?;

    write!(writer, "|")?;
    for _ in &headers {
        write!(writer, " --- |")?;
    }
    writeln!(writer)?;

    for row in rows.iter().filter_map(Value::as_object) {
        write!(writer, "|")?;
        for header in &headers {
            let value = row.get(*header).unwrap_or(&Value::Null);
            write!(writer, " {} |", format_scalar(value))?;
        }
        writeln!(writer)?;
    }

    writeln!(writer)?;
    Ok(())
}

/// Rows as left-aligned columns; numbers are right-aligned.
fn format_as_text_table<W: Write>(arr: &[Value], writer: &mut W, prefix: &str) -> Result<()> {
    let headers: Vec<&str> = match arr.first() {
        Some(Value::Object(map)) => map.keys().map(String::as_str).collect(),
        _ => return Ok(()),
    };

    let cells: Vec<Vec<(String, bool)>> = arr
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|h| {
                    let value = map.get(*h).unwrap_or(&Value::Null);
                    (format_scalar(value), value.is_number())
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].0.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect();
    writeln!(writer, "{}{}", prefix, header_line.join("  ").trim_end())?;

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|((text, numeric), w)| {
                if *numeric {
                    format!("{text:>w$}")
                } else {
                    format!("{text:<w$}")
                }
            })
            .collect();
        writeln!(writer, "{}{}", prefix, line.join("  ").trim_end())?;
    }
    Ok(())
}
