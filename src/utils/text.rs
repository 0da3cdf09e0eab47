/// Display form of an internal field name: underscores become spaces and
/// each word gets a capital first letter. The underlying key is never
/// changed, only the label shown to the user.
pub fn humanize_field_name(name: &str) -> String {
    name.split('_')
        .map(capitalize_first)
        .collect::<Vec<String>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Minimal HTML escaping for text interpolated into the rendered pages.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
