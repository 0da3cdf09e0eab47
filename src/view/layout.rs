use crate::utils::text::escape_html;

const STYLE: &str = r#"
:root {
    --bg: #10141f;
    --card: #1b2233;
    --line: #2c3a55;
    --accent: #4f8cff;
    --text: #e8ecf4;
    --muted: #8a93a6;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Segoe UI', 'Helvetica Neue', sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
    padding: 24px;
}
.container { max-width: 1100px; margin: 0 auto; }
header { margin-bottom: 24px; }
header h1 { font-size: 1.4rem; }
header .subtitle { color: var(--muted); font-size: 0.9rem; margin-top: 4px; }
.panels { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
.panel {
    background: var(--card);
    border: 1px solid var(--line);
    border-radius: 10px;
    padding: 20px;
}
.panel h2 { font-size: 1rem; margin-bottom: 12px; color: var(--accent); }
.panel p { margin-bottom: 12px; }
.count { color: var(--muted); font-size: 0.85rem; }
.empty { color: var(--muted); font-style: italic; }
table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid var(--line); }
thead th { color: var(--muted); text-transform: uppercase; font-size: 0.75rem; }
tbody th { color: var(--muted); font-weight: 600; white-space: nowrap; }
label { display: block; color: var(--muted); font-size: 0.85rem; margin-bottom: 6px; }
input[type="text"] {
    width: 100%;
    background: var(--bg);
    border: 1px solid var(--line);
    border-radius: 8px;
    padding: 10px 12px;
    color: var(--text);
    margin-bottom: 14px;
}
input[type="text"]:focus { outline: none; border-color: var(--accent); }
button, .button {
    display: inline-block;
    background: var(--accent);
    color: #fff;
    border: none;
    border-radius: 8px;
    padding: 10px 24px;
    font-size: 0.95rem;
    font-weight: 600;
    cursor: pointer;
    text-decoration: none;
}
button:hover, .button:hover { opacity: 0.9; }
.nav { margin-top: 24px; }
footer { margin-top: 32px; color: var(--muted); font-size: 0.8rem; }
@media (max-width: 800px) { .panels { grid-template-columns: 1fr; } }
"#;

/// Shared page shell around every rendered page: doctype, head with the
/// inline stylesheet, application header and footer.
pub fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} · Invoice Lookup</title>
<style>{style}</style>
</head>
<body>
<div class="container">
<header>
<h1>Invoice Lookup</h1>
<p class="subtitle">{title}</p>
</header>
{body}
<footer>invoice-lookup · payment advice scanning and CRM matching</footer>
</div>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_shell_wraps_body_and_escapes_title() {
        let html = page_shell("A <Title>", "<p>hello</p>");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("A &lt;Title&gt; · Invoice Lookup"));
        assert!(html.contains("<p>hello</p>"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
