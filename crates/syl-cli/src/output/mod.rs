use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let max_width = ui::prefs().term_width;

    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, max_width)),
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_table(&["key", "value"], &rows, max_width))
        }
        scalar => Ok(table::render_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            max_width,
        )),
    }
}

fn render_array_table(items: &[Value], max_width: Option<usize>) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, max_width);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, max_width)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items.iter().map(value_to_cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use syl_core::responses::{CleanupOutcome, SyncReport};

    use super::render;
    use crate::cli::OutputFormat;

    fn report() -> SyncReport {
        SyncReport {
            course_id: "py-101".into(),
            chapters: 2,
            subchapters: 5,
            questions: 3,
            ..SyncReport::default()
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&report(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["course_id"], "py-101");
        assert_eq!(parsed["chapters"], 2);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&report(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["questions"], 3);
    }

    #[test]
    fn report_renders_as_key_value_table() {
        let out = render(&report(), OutputFormat::Table).expect("table render should work");
        let first = out.lines().next().expect("header line");
        assert!(first.starts_with("key"));
        assert!(out.lines().any(|l| l.starts_with("course_id") && l.contains("py-101")));
        assert!(out.lines().any(|l| l.starts_with("completed_at") && l.ends_with('-')));
    }

    #[test]
    fn cleanup_outcomes_render_one_row_per_statement() {
        let outcomes = vec![
            CleanupOutcome {
                statement: "DELETE FROM roles WHERE user_id = ?1".into(),
                params: vec!["u1".into()],
                affected_rows: 2,
            },
            CleanupOutcome {
                statement: "DELETE FROM members WHERE user_id = ?1".into(),
                params: vec!["u1".into()],
                affected_rows: 1,
            },
        ];
        let out = render(&outcomes, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("statement") && lines[0].contains("affected_rows"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("roles") && lines[2].contains("u1"));
    }

    #[test]
    fn empty_list_has_placeholder() {
        let out = render(&Vec::<CleanupOutcome>::new(), OutputFormat::Table).unwrap();
        assert_eq!(out, "(no rows)");
    }
}
