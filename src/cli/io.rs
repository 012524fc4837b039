//! Output rendering for one-shot commands
//!
//! JSON output is indented. Table output turns the JSON shape into
//! aligned text columns:
//! - array of objects: one row per object, headers from the first object
//! - array of scalars: single `value` column
//! - object: `key` / `value` rows

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use super::args::OutputFormat;
use super::errors::CliResult;

/// Printed instead of an empty table
pub const EMPTY_RESULT: &str = "No results found.";

/// Render `data` to stdout in the requested format
pub fn write_output<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    let rendered = render(data, format)?;

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", rendered)?;
    stdout.flush()?;

    Ok(())
}

/// Render `data` as a string
pub fn render<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(data)?)),
    }
}

fn render_table(value: &Value) -> String {
    let (headers, rows): (Vec<String>, Vec<Vec<String>>) = match value {
        Value::Array(items) if items.is_empty() => return EMPTY_RESULT.to_string(),
        Value::Array(items) => match &items[0] {
            Value::Object(first) => {
                let headers: Vec<String> = first.keys().cloned().collect();
                let rows = items
                    .iter()
                    .map(|item| {
                        headers
                            .iter()
                            .map(|h| item.get(h).map(cell).unwrap_or_default())
                            .collect()
                    })
                    .collect();
                (headers, rows)
            }
            _ => (
                vec!["value".to_string()],
                items.iter().map(|item| vec![cell(item)]).collect(),
            ),
        },
        Value::Object(map) => (
            vec!["key".to_string(), "value".to_string()],
            map.iter().map(|(k, v)| vec![k.clone(), cell(v)]).collect(),
        ),
        other => return cell(other),
    };

    format_rows(&headers, &rows)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_rows(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.chars().count());
        }
    }

    let line = |values: &[String]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers));
    out.push(separator);
    out.extend(rows.iter().map(|row| line(row.as_slice())));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_from_rows() {
        let data = json!([
            {"id": 1, "name": "Ann"},
            {"id": 22, "name": null},
        ]);

        let out = render(&data, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id | name");
        assert_eq!(lines[1], "---+-----");
        assert_eq!(lines[2], "1  | Ann");
        assert_eq!(lines[3], "22 | NULL");
    }

    #[test]
    fn test_table_from_scalars_and_objects() {
        let out = render(&json!(["users", "orders"]), OutputFormat::Table).unwrap();
        assert_eq!(out, "value\n------\nusers\norders");

        let out = render(&json!({"id": "INTEGER"}), OutputFormat::Table).unwrap();
        assert_eq!(out.lines().nth(2), Some("id  | INTEGER"));
    }

    #[test]
    fn test_empty_result() {
        let out = render(&json!([]), OutputFormat::Table).unwrap();
        assert_eq!(out, EMPTY_RESULT);
    }

    #[test]
    fn test_json_is_indented() {
        let out = render(&json!({"a": 1}), OutputFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }
}
