use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));
static ALPHA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+").expect("valid regex"));

/// Terms that appear in nearly every title of this corpus.
pub const DOMAIN_STOPWORDS: &[&str] = &["covid", "coronavirus", "study", "using"];

/// Generic English filler words.
pub const ENGLISH_STOPWORDS: &[&str] = &["the", "and", "for", "with", "from", "this", "that"];

// ---------------------------------------------------------------------------
// Word counts
// ---------------------------------------------------------------------------

/// Number of maximal runs of word characters (Unicode letters, digits, `_`).
pub fn word_count(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

// ---------------------------------------------------------------------------
// Title tokenizer
// ---------------------------------------------------------------------------

/// Splits titles into lowercase alphabetic words, dropping stopwords and
/// words shorter than `min_len`.
#[derive(Debug, Clone)]
pub struct TitleTokenizer {
    stopwords: HashSet<String>,
    min_len: usize,
}

impl Default for TitleTokenizer {
    fn default() -> Self {
        Self::new(DOMAIN_STOPWORDS.iter().chain(ENGLISH_STOPWORDS), 3)
    }
}

impl TitleTokenizer {
    pub fn new<I, S>(stopwords: I, min_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            min_len,
        }
    }

    /// Tokens in order of appearance.  Digits and punctuation split words.
    pub fn tokenize<'a>(&'a self, title: &str) -> impl Iterator<Item = String> + 'a {
        let lowered = title.to_lowercase();
        ALPHA_RE
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect::<Vec<_>>()
            .into_iter()
            .filter(move |w| w.len() >= self.min_len && !self.stopwords.contains(w))
    }
}

// ---------------------------------------------------------------------------
// Publish dates
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y %b %d", "%d %B %Y", "%d %b %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a publish date in one of the common textual layouts.
///
/// Partial dates resolve to the first day of the period: `2020-03` is
/// 2020-03-01 and `2020` is 2020-01-01.  Returns `None` when nothing matches.
pub fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // Drop fractional seconds and zone suffixes before trying datetimes.
    let core = s.get(..19).unwrap_or(s);
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(core, fmt) {
            return Some(dt.date());
        }
    }

    if let Some((year, month)) = s.split_once('-') {
        if year.len() == 4 && (1..=2).contains(&month.len()) {
            return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1);
        }
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_word_character_runs() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("SARS-CoV-2 spreads, fast!"), 5);
        assert_eq!(word_count("snake_case stays one"), 3);
        assert_eq!(word_count("café über naïve"), 3);
    }

    #[test]
    fn title_tokens_skip_stopwords_and_short_words() {
        let tokenizer = TitleTokenizer::new(["the", "study", "covid"], 3);
        let tokens: Vec<String> = tokenizer.tokenize("COVID-19 Study of the Lungs").collect();
        assert_eq!(tokens, vec!["lungs"]);
    }

    #[test]
    fn default_tokenizer_uses_builtin_stopwords() {
        let tokenizer = TitleTokenizer::default();
        let tokens: Vec<String> = tokenizer
            .tokenize("Using masks and ventilation for coronavirus transmission")
            .collect();
        assert_eq!(tokens, vec!["masks", "ventilation", "transmission"]);
    }

    #[test]
    fn parses_common_date_layouts() {
        let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
        assert_eq!(parse_publish_date("2020-03-15"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_date("2020/03/15"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_date("03/15/2020"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_date("2020-03-15 08:30:00"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_date("2020-03-15T08:30:00.000Z"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_date("2020 Mar 15"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_date("15 March 2020"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_date("2020-03"), ymd(2020, 3, 1));
        assert_eq!(parse_publish_date(" 2020 "), ymd(2020, 1, 1));
    }

    #[test]
    fn unparseable_dates_are_none() {
        assert_eq!(parse_publish_date(""), None);
        assert_eq!(parse_publish_date("soon"), None);
        assert_eq!(parse_publish_date("2020-13-01"), None);
        assert_eq!(parse_publish_date("2020-13"), None);
        assert_eq!(parse_publish_date("20201"), None);
    }
}
