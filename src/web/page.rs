//! HTML rendering for the single-page UI

use crate::analysis::MIN_TRANSCRIPT_CHARS;
use crate::storage::LogRecord;

/// Everything the page shows for one request
#[derive(Debug, Default)]
pub struct PageView<'a> {
    /// Record written by the current submission
    pub result: Option<&'a LogRecord>,

    /// Inline error messages
    pub errors: Vec<String>,

    /// Transcript to keep in the textarea after a rejected submission
    pub draft: Option<&'a str>,

    /// Full log, oldest first
    pub records: &'a [LogRecord],
}

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem}\
textarea{width:100%;min-height:10rem}\
.error{color:#a00}\
.result{border:1px solid #ccc;padding:1rem;margin:1rem 0}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.4rem;vertical-align:top;text-align:left}";

pub fn render(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Call Transcript Analyzer</title>\n");
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n<h1>Call Transcript Analyzer</h1>\n");

    html.push_str(&format!(
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"transcript\">Transcript (at least {} characters)</label>\n\
         <textarea id=\"transcript\" name=\"transcript\">{}</textarea>\n\
         <button type=\"submit\">Analyze</button>\n</form>\n",
        MIN_TRANSCRIPT_CHARS,
        escape(view.draft.unwrap_or_default())
    ));

    for error in &view.errors {
        html.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    if let Some(record) = view.result {
        html.push_str(&format!(
            "<div class=\"result\">\n<h2>Result</h2>\n\
             <p><strong>Summary:</strong> {}</p>\n\
             <p><strong>Sentiment:</strong> <span class=\"sentiment\">{}</span></p>\n\
             <p><strong>Timestamp:</strong> {}</p>\n</div>\n",
            escape(&record.summary),
            record.sentiment,
            record.timestamp_string()
        ));
    }

    render_log(&mut html, view.records);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_log(html: &mut String, records: &[LogRecord]) {
    html.push_str("<h2>Analysis Log</h2>\n<p><a href=\"/download\">Download CSV</a></p>\n");

    if records.is_empty() {
        html.push_str("<p>No analyses yet.</p>\n");
        return;
    }

    html.push_str(
        "<table>\n<thead><tr><th>Timestamp</th><th>Transcript</th><th>Summary</th><th>Sentiment</th></tr></thead>\n<tbody>\n",
    );
    for record in records {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            record.timestamp_string(),
            escape(&record.transcript),
            escape(&record.summary),
            record.sentiment
        ));
    }
    html.push_str("</tbody>\n</table>\n");
}

/// Escape text for use in HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
