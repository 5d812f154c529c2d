use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// On-page signals extracted from one fetched document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisResult {
    pub url: String,
    pub title: Option<String>,
    pub title_length: usize,
    pub title_length_score: LengthScore,

    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub meta_description_length_score: LengthScore,

    pub canonical_url: Option<String>,
    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,
    pub word_count: usize,
    pub images_total: usize,
    pub images_without_alt: usize,
    pub basic_suggestions: Vec<String>,
}

/// How a piece of text measures up against a length window.
///
/// Serialized as `missing`, `too_short (n)`, `too_long (n)` or `good (n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthScore {
    Missing,
    TooShort(usize),
    TooLong(usize),
    Good(usize),
}

impl LengthScore {
    pub fn is_missing(&self) -> bool {
        matches!(self, LengthScore::Missing)
    }
}

impl fmt::Display for LengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthScore::Missing => f.write_str("missing"),
            LengthScore::TooShort(n) => write!(f, "too_short ({})", n),
            LengthScore::TooLong(n) => write!(f, "too_long ({})", n),
            LengthScore::Good(n) => write!(f, "good ({})", n),
        }
    }
}

impl FromStr for LengthScore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "missing" {
            return Ok(LengthScore::Missing);
        }
        let (kind, rest) = s
            .split_once(' ')
            .ok_or_else(|| format!("unrecognized length score '{}'", s))?;
        let n = rest
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| format!("unrecognized length score '{}'", s))?;
        match kind {
            "too_short" => Ok(LengthScore::TooShort(n)),
            "too_long" => Ok(LengthScore::TooLong(n)),
            "good" => Ok(LengthScore::Good(n)),
            _ => Err(format!("unrecognized length score '{}'", s)),
        }
    }
}

impl Serialize for LengthScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LengthScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeForm {
    pub url: String,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
