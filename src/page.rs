//! Server-rendered form and result page.

use std::fmt::Write;

use crate::locale::Locale;
use crate::types::AnalysisResult;

/// Everything the page template needs for one render.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub locale: Locale,
    pub input_url: &'a str,
    pub error: Option<&'a str>,
    pub result: Option<&'a AnalysisResult>,
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:52rem;margin:2rem auto;padding:0 1rem;color:#222}\
form{display:flex;gap:.5rem;margin-bottom:1.5rem}\
input[type=url],input[type=text]{flex:1;padding:.5rem}\
button{padding:.5rem 1rem}\
.error{background:#fde8e8;border:1px solid #f5a3a3;padding:.75rem;border-radius:4px}\
table{border-collapse:collapse;width:100%}\
th,td{text-align:left;padding:.4rem;border-bottom:1px solid #eee;vertical-align:top}\
th{width:14rem}\
.score{color:#666;font-size:.9em}";

pub fn render_page(view: &PageView) -> String {
    let s = view.locale.strings();
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{heading}</title>\n<style>{style}</style>\n</head>\n<body>\n<h1>{heading}</h1>\n",
        lang = view.locale.tag(),
        heading = escape_html_text(s.heading),
        style = STYLE,
    );

    let _ = write!(
        html,
        "<form method=\"post\" action=\"/analyze_form\">\n\
         <label for=\"url\">{label}</label>\n\
         <input type=\"text\" id=\"url\" name=\"url\" value=\"{value}\" placeholder=\"https://example.com\" required>\n\
         <input type=\"hidden\" name=\"lang\" value=\"{lang}\">\n\
         <button type=\"submit\">{submit}</button>\n</form>\n",
        label = escape_html_text(s.url_label),
        value = escape_html_attr(view.input_url),
        lang = view.locale.tag(),
        submit = escape_html_text(s.submit),
    );

    if let Some(error) = view.error {
        let _ = writeln!(
            html,
            "<div class=\"error\" role=\"alert\">{}</div>",
            escape_html_text(error)
        );
    }

    if let Some(result) = view.result {
        render_result(&mut html, result, view.locale);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_result(html: &mut String, result: &AnalysisResult, locale: Locale) {
    let s = locale.strings();
    let _ = writeln!(html, "<section id=\"result\">\n<h2>{}</h2>\n<table>", escape_html_text(s.result_heading));

    row(html, "URL", &escape_html_text(&result.url));
    row(
        html,
        s.title,
        &format!(
            "{} <span class=\"score\">{}</span>",
            optional_text(result.title.as_deref(), s.none),
            escape_html_text(&result.title_length_score.to_string())
        ),
    );
    row(
        html,
        s.meta_description,
        &format!(
            "{} <span class=\"score\">{}</span>",
            optional_text(result.meta_description.as_deref(), s.none),
            escape_html_text(&result.meta_description_length_score.to_string())
        ),
    );
    row(html, s.canonical, &optional_text(result.canonical_url.as_deref(), s.none));
    row(html, "&lt;h1&gt;", &list(&result.h1_tags, s.none));
    row(html, "&lt;h2&gt;", &list(&result.h2_tags, s.none));
    row(html, s.word_count, &result.word_count.to_string());
    row(html, s.images, &result.images_total.to_string());
    row(html, s.images_without_alt, &result.images_without_alt.to_string());
    html.push_str("</table>\n");

    let _ = writeln!(html, "<h3>{}</h3>", escape_html_text(s.suggestions));
    if result.basic_suggestions.is_empty() {
        let _ = writeln!(html, "<p>{}</p>", escape_html_text(s.no_suggestions));
    } else {
        html.push_str(&list(&result.basic_suggestions, s.none));
        html.push('\n');
    }
    html.push_str("</section>\n");
}

// `label` is trusted markup, `value` must already be escaped.
fn row(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(html, "<tr><th>{}</th><td>{}</td></tr>", label, value);
}

fn optional_text(value: Option<&str>, none: &str) -> String {
    match value {
        Some(v) => escape_html_text(v),
        None => format!("<em>{}</em>", escape_html_text(none)),
    }
}

fn list(items: &[String], none: &str) -> String {
    if items.is_empty() {
        return format!("<em>{}</em>", escape_html_text(none));
    }
    let mut out = String::from("<ul>");
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape_html_text(item));
    }
    out.push_str("</ul>");
    out
}

fn escape_html_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_html_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
