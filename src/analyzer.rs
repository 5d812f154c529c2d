//! On-page SEO analysis of raw HTML.
//!
//! `analyze` is total: html5ever (via `scraper`) recovers from any markup,
//! so broken or empty documents degrade to `None`/empty fields rather than
//! errors. Nothing is shared between calls.

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::locale::Locale;
use crate::types::{AnalysisResult, LengthScore};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Subtrees whose text never reaches a reader.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript"];

/// Pages with more `<h1>` elements than this get a suggestion to trim them.
pub const MAX_H1_COUNT: usize = 2;

/// Inclusive character-length window a piece of text should fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min_len: usize,
    pub max_len: usize,
}

impl LengthBounds {
    pub const fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }
}

pub const TITLE_BOUNDS: LengthBounds = LengthBounds::new(20, 60);
pub const META_DESCRIPTION_BOUNDS: LengthBounds = LengthBounds::new(50, 160);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringThresholds {
    pub title: LengthBounds,
    pub meta_description: LengthBounds,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            title: TITLE_BOUNDS,
            meta_description: META_DESCRIPTION_BOUNDS,
        }
    }
}

/// Heuristic advice, in the order it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    AddTitle,
    AddMetaDescription,
    AddH1,
    LimitH1,
    AddImageAlt,
}

impl Suggestion {
    pub fn message(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Suggestion::AddTitle, Locale::En) => "Add a <title> tag.",
            (Suggestion::AddMetaDescription, Locale::En) => "Add a meta description.",
            (Suggestion::AddH1, Locale::En) => "Use 1 main <h1> for the core topic.",
            (Suggestion::LimitH1, Locale::En) => "Reduce number of <h1> tags to 1–2.",
            (Suggestion::AddImageAlt, Locale::En) => "Add alt text to important images.",
            (Suggestion::AddTitle, Locale::ZhTw) => "請加入 <title> 標題標籤。",
            (Suggestion::AddMetaDescription, Locale::ZhTw) => "請加入 meta description（頁面描述）。",
            (Suggestion::AddH1, Locale::ZhTw) => "建議至少使用 1 個主要的 <h1> 來定義頁面主題。",
            (Suggestion::LimitH1, Locale::ZhTw) => "建議將 <h1> 標籤數量控制在 1～2 個之間。",
            (Suggestion::AddImageAlt, Locale::ZhTw) => "建議為重要圖片加入 alt 說明文字。",
        }
    }
}

/// Score `text` against `[min_len, max_len]`. Both ends are inclusive.
pub fn length_score(text: Option<&str>, min_len: usize, max_len: usize) -> LengthScore {
    let Some(text) = text else {
        return LengthScore::Missing;
    };
    let n = char_len(text);
    if n < min_len {
        LengthScore::TooShort(n)
    } else if n > max_len {
        LengthScore::TooLong(n)
    } else {
        LengthScore::Good(n)
    }
}

/// Analyze with the default thresholds and English suggestions.
pub fn analyze(url: &str, html: &str) -> AnalysisResult {
    analyze_with(url, html, &ScoringThresholds::default(), Locale::En)
}

pub fn analyze_with(
    url: &str,
    html: &str,
    thresholds: &ScoringThresholds,
    locale: Locale,
) -> AnalysisResult {
    let document = parse_html(html);

    let title = extract_title(&document);
    let meta_description = extract_meta_description(&document);
    let canonical_url = extract_canonical(&document);
    let h1_tags = extract_heading_texts(&document, "h1");
    let h2_tags = extract_heading_texts(&document, "h2");

    let text = extract_visible_text(&document);
    let word_count = count_words(&text);

    let (images_total, images_without_alt) = count_images(&document);

    let suggestions = collect_suggestions(
        title.is_some(),
        meta_description.as_deref().is_some_and(|d| !d.is_empty()),
        h1_tags.len(),
        images_without_alt,
    );
    let basic_suggestions = suggestions
        .into_iter()
        .map(|s| s.message(locale).to_string())
        .collect();

    AnalysisResult {
        url: url.to_string(),
        title_length: title.as_deref().map(char_len).unwrap_or(0),
        title_length_score: length_score(
            title.as_deref(),
            thresholds.title.min_len,
            thresholds.title.max_len,
        ),
        title,
        meta_description_length: meta_description.as_deref().map(char_len).unwrap_or(0),
        meta_description_length_score: length_score(
            meta_description.as_deref(),
            thresholds.meta_description.min_len,
            thresholds.meta_description.max_len,
        ),
        meta_description,
        canonical_url,
        h1_tags,
        h2_tags,
        word_count,
        images_total,
        images_without_alt,
        basic_suggestions,
    }
}

/// Parse as a browser with scripting disabled would, so `<noscript>`
/// content becomes real elements instead of one opaque text node.
pub fn parse_html(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    html5ever::driver::parse_document(Html::new_document(), opts).one(html)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First `<title>`, trimmed. A blank title counts as no title.
fn extract_title(document: &Html) -> Option<String> {
    select_all(document, "title")
        .first()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

/// `content` of the first `<meta name="description">`; empty if the attribute is missing.
fn extract_meta_description(document: &Html) -> Option<String> {
    select_all(document, "meta")
        .into_iter()
        .find(|el| el.value().attr("name") == Some("description"))
        .map(|el| el.value().attr("content").unwrap_or("").trim().to_string())
}

fn extract_canonical(document: &Html) -> Option<String> {
    select_all(document, "link")
        .into_iter()
        .find(|el| {
            el.value().attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
        })
        .map(|el| el.value().attr("href").unwrap_or("").trim().to_string())
}

fn extract_heading_texts(document: &Html, tag: &str) -> Vec<String> {
    select_all(document, tag).iter().map(element_text).collect()
}

/// Text a reader would see: everything outside script/style/noscript,
/// joined by spaces with whitespace runs collapsed.
pub fn extract_visible_text(document: &Html) -> String {
    let mut parts = Vec::new();
    collect_text(&document.root_element(), &mut parts);
    normalize_whitespace(&parts.join(" "))
}

fn collect_text(element: &ElementRef, parts: &mut Vec<String>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if INVISIBLE_TAGS.contains(&child_element.value().name()) {
                continue;
            }
            collect_text(&child_element, parts);
        } else if let Some(text_node) = child.value().as_text() {
            parts.push(text_node.text.to_string());
        }
    }
}

pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

pub fn count_words(text: &str) -> usize {
    WHITESPACE_RUN.split(text).filter(|w| !w.is_empty()).count()
}

/// Returns `(total, without_alt)`; blank alt text counts as missing.
fn count_images(document: &Html) -> (usize, usize) {
    let images = select_all(document, "img");
    let without_alt = images
        .iter()
        .filter(|img| {
            img.value()
                .attr("alt")
                .map_or(true, |alt| alt.trim().is_empty())
        })
        .count();
    (images.len(), without_alt)
}

fn collect_suggestions(
    has_title: bool,
    has_meta_description: bool,
    h1_count: usize,
    images_without_alt: usize,
) -> Vec<Suggestion> {
    let checks = [
        (!has_title, Suggestion::AddTitle),
        (!has_meta_description, Suggestion::AddMetaDescription),
        (h1_count == 0, Suggestion::AddH1),
        (h1_count > MAX_H1_COUNT, Suggestion::LimitH1),
        (images_without_alt > 0, Suggestion::AddImageAlt),
    ];
    checks
        .into_iter()
        .filter_map(|(triggered, suggestion)| triggered.then_some(suggestion))
        .collect()
}
