use crate::core::engine::PipelineReport;
use crate::core::summary::{ResultRow, Summary};
use crate::core::synthesizer::{CountryCode, MAX_QUANTITY, MIN_QUANTITY};
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse}\
td,th{border:1px solid #ccc;padding:4px 8px}\
tr.valid{background:#d4edda}\
tr.invalid{background:#f8f9fa}\
td.error{color:#a00}";

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Full page: the form, plus a results section when a batch came back.
pub fn render_page(report: Option<&PipelineReport>) -> String {
    let selected = report.map(|r| r.country);
    let quantity = report.map(|r| r.generated.len()).unwrap_or(10);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Phone number generator</title>\n");
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<h1>Phone number generator</h1>\n");
    html.push_str(&render_form(selected, quantity));

    if let Some(summary) = report.and_then(|r| r.summary()) {
        html.push_str(&render_results(&summary));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(selected: Option<CountryCode>, quantity: usize) -> String {
    let mut html = String::from("<form method=\"post\" action=\"/\">\n");
    let _ = writeln!(
        html,
        "<label>Quantity <input type=\"number\" name=\"quantity\" min=\"{}\" max=\"{}\" value=\"{}\" required></label>",
        MIN_QUANTITY, MAX_QUANTITY, quantity
    );
    html.push_str("<label>Country <select name=\"country_code\">\n");
    for country in CountryCode::ALL {
        let marker = if Some(country) == selected { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{} ({})</option>",
            escape_html(country.prefix()),
            marker,
            country.country_name(),
            country.prefix()
        );
    }
    html.push_str("</select></label>\n<button type=\"submit\">Generate</button>\n</form>\n");
    html
}

fn render_results(summary: &Summary) -> String {
    let mut html = String::from("<section id=\"results\">\n<h2>Results</h2>\n");
    let _ = writeln!(
        html,
        "<p>Valid: {} / {} ({}%), errors: {}</p>",
        summary.valid_count,
        summary.valid_count + summary.invalid_count,
        summary.formatted_percentage(),
        summary.error_count
    );
    html.push_str("<table>\n<tr><th>Number</th><th>Country code</th><th>Type</th><th>Possible</th><th>Valid</th><th>Error</th></tr>\n");
    for row in &summary.rows {
        html.push_str(&render_row(row));
    }
    html.push_str("</table>\n</section>\n");
    html
}

fn render_row(row: &ResultRow) -> String {
    let class = if row.highlighted { "valid" } else { "invalid" };
    let error = row.error.as_deref().map(escape_html).unwrap_or_default();
    format!(
        "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"error\">{}</td></tr>\n",
        class,
        escape_html(&row.number),
        escape_html(&row.country_code),
        escape_html(&row.number_type),
        row.is_possible,
        row.is_valid,
        error
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BatchResult, Classification, NumberType, ValidationOutcome};

    fn report(batch: Option<BatchResult>) -> PipelineReport {
        PipelineReport {
            country: CountryCode::Ghana,
            generated: vec!["+233200000000".to_string(), "<b>".to_string()],
            batch,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href='x'>&\"</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&quot;&lt;/a&gt;");
    }

    #[test]
    fn test_form_only_page() {
        let html = render_page(None);
        assert!(html.contains("<form"));
        assert!(html.contains("value=\"+254\""));
        assert!(!html.contains("id=\"results\""));
    }

    #[test]
    fn test_missing_batch_renders_without_results() {
        let html = render_page(Some(&report(None)));
        assert!(html.contains("<form"));
        assert!(html.contains("value=\"+233\" selected"));
        assert!(!html.contains("id=\"results\""));
    }

    #[test]
    fn test_results_table_highlights_valid_rows() {
        let batch = BatchResult::from_outcomes(vec![
            ValidationOutcome::checked(
                "+233200000000",
                Classification {
                    country_code: "+233".to_string(),
                    number_type: NumberType::Mobile,
                    is_possible: true,
                    is_valid: true,
                },
            ),
            ValidationOutcome::failed("<b>", "bad"),
        ]);
        let html = render_page(Some(&report(Some(batch))));

        assert!(html.contains("id=\"results\""));
        assert!(html.contains("(100.00%)"));
        assert!(html.contains("<tr class=\"valid\"><td>+233200000000</td>"));
        assert!(html.contains("<tr class=\"invalid\"><td>&lt;b&gt;</td><td>N/A</td>"));
    }
}
