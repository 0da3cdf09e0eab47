use crate::core::{CrmRecord, ResultsPage};
use crate::utils::error::Result;
use crate::utils::text::{escape_html, humanize_field_name};
use crate::view::layout::page_shell;

/// Render the results page: extracted fields on the left, matching CRM
/// records on the right, and a link back to the entry point.
///
/// Pure and deterministic: same page model in, same HTML out. The only
/// failure mode is a CRM row missing one of its four attributes, and
/// every row is converted before any HTML is assembled so a bad row
/// never produces partial output.
pub fn results_page(page: &ResultsPage, index_href: &str) -> Result<String> {
    let records: Vec<CrmRecord> = page
        .rows
        .iter()
        .map(CrmRecord::from_row)
        .collect::<Result<_>>()?;

    let mut body = String::new();
    body.push_str("<div class=\"panels\">\n");

    body.push_str("<section class=\"panel\">\n<h2>LLM-Extracted Information</h2>\n");
    if page.extraction.is_empty() {
        body.push_str("<p class=\"empty\">No information was extracted from the document.</p>\n");
    } else {
        body.push_str("<table>\n<tbody>\n");
        for (key, value) in page.extraction.iter() {
            body.push_str(&format!(
                "<tr><th scope=\"row\">{}</th><td>{}</td></tr>\n",
                escape_html(&humanize_field_name(key)),
                escape_html(value)
            ));
        }
        body.push_str("</tbody>\n</table>\n");
    }
    body.push_str("</section>\n");

    body.push_str("<section class=\"panel\">\n<h2>CRM Search Results</h2>\n");
    // The count is taken from the converted rows at render time so it can
    // never drift from the number of rows actually shown.
    body.push_str(&format!(
        "<p class=\"count\">{} records found</p>\n",
        records.len()
    ));
    if records.is_empty() {
        body.push_str(&format!(
            "<p class=\"empty\">No matching records found in the CRM for invoice: {}</p>\n",
            escape_html(page.query.as_deref().unwrap_or("N/A"))
        ));
    } else {
        body.push_str(
            "<table>\n<thead>\n<tr><th>Company</th><th>Premises</th><th>Stage</th><th>Invoice #</th></tr>\n</thead>\n<tbody>\n",
        );
        for record in &records {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&record.company),
                escape_html(&record.premises),
                escape_html(&record.stage),
                escape_html(&record.invoice)
            ));
        }
        body.push_str("</tbody>\n</table>\n");
    }
    body.push_str("</section>\n</div>\n");

    body.push_str(&format!(
        "<p class=\"nav\"><a class=\"button\" href=\"{}\">Run Another</a></p>\n",
        escape_html(index_href)
    ));

    Ok(page_shell("Lookup Results", &body))
}

/// The entry page: a single form posting the document reference to the
/// lookup action.
pub fn index_page(run_href: &str) -> String {
    let body = format!(
        r#"<section class="panel">
<h2>Scan a Payment Advice</h2>
<p>Enter the reference of an uploaded document. The extraction service reads its fields and matching CRM opportunities are shown alongside.</p>
<form method="post" action="{}">
<label for="document">Document reference</label>
<input type="text" id="document" name="document" placeholder="uploads/advice-001.pdf" required>
<button type="submit">Run Lookup</button>
</form>
</section>
"#,
        escape_html(run_href)
    );
    page_shell("Scan Document", &body)
}
