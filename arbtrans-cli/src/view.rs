use arbtrans::{Resource, Value};

const TRUNCATE_AT: usize = 50;

fn truncate(value: &str, full: bool) -> String {
    if full || value.chars().count() <= TRUNCATE_AT {
        value.to_string()
    } else {
        format!("{}...", value.chars().take(TRUNCATE_AT).collect::<String>())
    }
}

/// Render the entries of a resource, one block per entry.
pub fn render_view(resource: &Resource, full: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Locale: {}\n",
        resource.locale().unwrap_or("(not set)")
    ));
    out.push_str(&format!("Entries: {}\n", resource.len()));
    out.push_str(&format!(
        "Translatable: {}\n",
        resource.translatable().count()
    ));

    for (i, entry) in resource.entries.iter().enumerate() {
        out.push_str(&format!("\n  Entry {}: {}\n", i + 1, entry.key));
        match &entry.value {
            Value::Text(text) => {
                out.push_str(&format!("    Value: {}\n", truncate(text, full)));
            }
            Value::Metadata(meta) => {
                out.push_str(&format!(
                    "    Metadata: {}\n",
                    truncate(&meta.to_string(), full)
                ));
            }
        }
    }
    out
}

/// Print a view of one resource.
pub fn print_view(resource: &Resource, full: bool) {
    print!("{}", render_view(resource, full));
}
