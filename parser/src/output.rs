//! Output formatting for parsed records.

use sssu_session_core::ObjectRecord;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats parsed records in the requested output format.
pub fn format_records(records: &[ObjectRecord], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(records).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(records_to_table(records)),
    }
}

fn records_to_table(records: &[ObjectRecord]) -> String {
    let mut out = String::new();

    for (position, record) in records.iter().enumerate() {
        let name = record.attr("objectname").unwrap_or("(unnamed object)");
        out.push_str(&format!("object {}: {name}\n", position + 1));

        for (key, value) in &record.attributes {
            out.push_str(&format!("  {key:<32} {value}\n"));
        }
        for (collection, children) in &record.collections {
            out.push_str(&format!(
                "  {collection}: {} {}\n",
                children.len(),
                if children.len() == 1 { "entry" } else { "entries" }
            ));
        }
        out.push('\n');
    }

    if records.is_empty() {
        out.push_str("no objects\n");
    }
    out
}
