use serde::Serialize;
use serde_json::{Map, Value};

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
    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };

    let rendered = match serde_json::to_value(value)? {
        Value::Array(items) => array_table(&items, options),
        Value::Object(map) => {
            let mut flat = Map::new();
            flatten_into(&mut flat, "", Value::Object(map));
            let rows = flat
                .into_iter()
                .map(|(key, value)| vec![key, cell(&value)])
                .collect::<Vec<_>>();
            table::render_rows(&["key", "value"], &rows, options)
        }
        scalar => table::render_rows(&["value"], &[vec![cell(&scalar)]], options),
    };
    Ok(rendered)
}

/// One row per item. Nested objects become dotted columns, sorted by path.
fn array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let flat_items = items
        .iter()
        .map(|item| {
            let mut flat = Map::new();
            flatten_into(&mut flat, "", item.clone());
            flat
        })
        .collect::<Vec<_>>();

    let mut headers = Vec::<String>::new();
    for flat in &flat_items {
        for key in flat.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers.sort();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = flat_items
        .iter()
        .map(|flat| {
            headers
                .iter()
                .map(|header| flat.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_rows(&header_refs, &rows, options)
}

fn flatten_into(out: &mut Map<String, Value>, prefix: &str, value: Value) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(out, &path, child);
            }
        }
        other if prefix.is_empty() => {
            out.insert(String::from("value"), other);
        }
        other => {
            out.insert(prefix.to_string(), other);
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(|item| !item.is_object() && !item.is_array()) => {
            items.iter().map(cell).collect::<Vec<_>>().join(", ")
        }
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
