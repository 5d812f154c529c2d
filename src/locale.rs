//! User-facing wording for suggestions and the form page.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    ZhTw,
}

impl Locale {
    /// Parse a language tag such as `en-US` or `zh-Hant`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase().replace('_', "-");
        let primary = tag.split('-').next().unwrap_or_default();
        match primary {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::ZhTw),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhTw => "zh-TW",
        }
    }

    pub fn invalid_url_message(self) -> &'static str {
        match self {
            Locale::En => "Invalid URL format. Make sure it starts with http:// or https://",
            Locale::ZhTw => "網址格式不正確，請確認是否包含 http:// 或 https://",
        }
    }

    pub fn analysis_failed_message(self, detail: &str) -> String {
        match self {
            Locale::En => format!("Analysis failed: {}", detail),
            Locale::ZhTw => format!("分析失敗：{}", detail),
        }
    }

    pub(crate) fn strings(self) -> &'static PageStrings {
        match self {
            Locale::En => &EN_STRINGS,
            Locale::ZhTw => &ZH_TW_STRINGS,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Static chrome of the form page.
pub(crate) struct PageStrings {
    pub heading: &'static str,
    pub url_label: &'static str,
    pub submit: &'static str,
    pub result_heading: &'static str,
    pub title: &'static str,
    pub meta_description: &'static str,
    pub canonical: &'static str,
    pub word_count: &'static str,
    pub images: &'static str,
    pub images_without_alt: &'static str,
    pub suggestions: &'static str,
    pub no_suggestions: &'static str,
    pub none: &'static str,
}

static EN_STRINGS: PageStrings = PageStrings {
    heading: "SEO Page Analyzer",
    url_label: "Page URL",
    submit: "Analyze",
    result_heading: "Results",
    title: "Title",
    meta_description: "Meta description",
    canonical: "Canonical URL",
    word_count: "Word count",
    images: "Images",
    images_without_alt: "Images without alt",
    suggestions: "Suggestions",
    no_suggestions: "No suggestions. Looks good!",
    none: "(none)",
};

static ZH_TW_STRINGS: PageStrings = PageStrings {
    heading: "SEO 頁面分析",
    url_label: "網址",
    submit: "開始分析",
    result_heading: "分析結果",
    title: "標題",
    meta_description: "頁面描述",
    canonical: "Canonical 網址",
    word_count: "字數",
    images: "圖片數量",
    images_without_alt: "缺少 alt 的圖片",
    suggestions: "建議",
    no_suggestions: "沒有建議，看起來不錯！",
    none: "（無）",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Locale::from_tag("en"), Some(Locale::En));
        assert_eq!(Locale::from_tag("EN-us"), Some(Locale::En));
        assert_eq!(Locale::from_tag("zh-TW"), Some(Locale::ZhTw));
        assert_eq!(Locale::from_tag("zh_Hant"), Some(Locale::ZhTw));
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn test_tag_round_trips() {
        for locale in [Locale::En, Locale::ZhTw] {
            assert_eq!(Locale::from_tag(locale.tag()), Some(locale));
        }
    }

    #[test]
    fn test_failure_message_carries_detail() {
        assert_eq!(
            Locale::En.analysis_failed_message("boom"),
            "Analysis failed: boom"
        );
        assert!(Locale::ZhTw.analysis_failed_message("boom").ends_with("boom"));
    }
}
