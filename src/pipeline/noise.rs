//! Noise classification.
//!
//! Flags lines that are structurally unlikely to be section headings:
//! running headers and footers, contact details, dates, letterhead stamps,
//! form-field labels and table column headers. Each rule is independent and
//! any single match disqualifies a line.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::model::Line;

use super::options::NoiseConfig;

/// Per-document occurrence counts of lowercased line texts.
#[derive(Debug, Clone, Default)]
pub struct TextFrequency {
    counts: HashMap<String, usize>,
}

impl TextFrequency {
    /// Count every line of the document.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut counts = HashMap::new();
        for line in lines {
            *counts.entry(line.key()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrences of `text` (case-insensitive).
    pub fn count(&self, text: &str) -> usize {
        self.counts.get(&text.to_lowercase()).copied().unwrap_or(0)
    }

    /// Number of distinct texts.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

/// Why a line was classified as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseReason {
    /// Fewer characters than the configured minimum
    TooShort,
    /// Recurs across the document (running header/footer)
    Repeated,
    /// Contains an email address
    Email,
    /// Contains a numeric date
    Date,
    /// Contains a postal code
    PostalCode,
    /// Contains a street-address keyword
    Address,
    /// Letter-spaced decorative text
    LetterSpaced,
    /// Degenerate repeated token (e.g. a form code label)
    RepeatedToken,
    /// Short all-uppercase line without digits
    UppercaseStamp,
    /// Boilerplate keyword
    Boilerplate,
    /// Table column header keyword
    ColumnHeader,
    /// Single uppercase token
    Acronym,
}

/// Pure noise predicate over lines.
pub struct NoiseClassifier {
    config: NoiseConfig,
    email_regex: Regex,
    date_regex: Regex,
    postal_regex: Regex,
    address_regex: Option<Regex>,
    letter_spaced_regex: Regex,
}

impl NoiseClassifier {
    /// Create a classifier with the given rules.
    pub fn new(config: NoiseConfig) -> Self {
        let address_regex = build_keyword_regex(&config.address_keywords);
        Self {
            email_regex: Regex::new(r"\S+@\S+\.\S+").expect("static regex"),
            date_regex: Regex::new(r"\b\d{1,2}[-/]\d{1,2}[-/]\d{2,4}\b").expect("static regex"),
            postal_regex: Regex::new(r"\b\d{5}(?:[-\s]\d{4})?\b").expect("static regex"),
            letter_spaced_regex: Regex::new(r"(?:\b\w(?:\s|[:;.])+){4,}").expect("static regex"),
            address_regex,
            config,
        }
    }

    /// Whether the line should never become a heading.
    pub fn is_noise(&self, line: &Line, frequency: &TextFrequency) -> bool {
        self.classify(line, frequency).is_some()
    }

    /// The first noise rule the line matches, if any.
    pub fn classify(&self, line: &Line, frequency: &TextFrequency) -> Option<NoiseReason> {
        let text = line.text.trim();
        let lowered = text.to_lowercase();
        let words: Vec<&str> = text.split_whitespace().collect();

        if text.chars().count() < self.config.min_chars {
            return Some(NoiseReason::TooShort);
        }
        if frequency.count(&lowered) > self.config.max_repeats {
            return Some(NoiseReason::Repeated);
        }
        if self.email_regex.is_match(text) {
            return Some(NoiseReason::Email);
        }
        if self.date_regex.is_match(text) {
            return Some(NoiseReason::Date);
        }
        if self.postal_regex.is_match(text) {
            return Some(NoiseReason::PostalCode);
        }
        if self
            .address_regex
            .as_ref()
            .is_some_and(|re| re.is_match(text))
        {
            return Some(NoiseReason::Address);
        }
        if self.letter_spaced_regex.is_match(text) {
            return Some(NoiseReason::LetterSpaced);
        }
        if has_repeated_token(&words) {
            return Some(NoiseReason::RepeatedToken);
        }
        if words.len() <= self.config.max_stamp_words
            && words
                .iter()
                .all(|w| is_uppercase(w) && !w.chars().any(|c| c.is_ascii_digit()))
        {
            return Some(NoiseReason::UppercaseStamp);
        }
        if contains_any(&lowered, &self.config.boilerplate_keywords) {
            return Some(NoiseReason::Boilerplate);
        }
        if contains_any(&lowered, &self.config.column_keywords) {
            return Some(NoiseReason::ColumnHeader);
        }
        if !text.contains(' ')
            && is_uppercase(text)
            && text.chars().count() <= self.config.max_acronym_chars
        {
            return Some(NoiseReason::Acronym);
        }

        None
    }
}

/// `(?i)\b(?:kw1|kw2...)` with a closing word boundary after keywords that
/// end in a word character.
fn build_keyword_regex(keywords: &[String]) -> Option<Regex> {
    if keywords.is_empty() {
        return None;
    }

    let alternatives: Vec<String> = keywords
        .iter()
        .map(|kw| {
            let escaped = regex::escape(kw);
            if kw.chars().last().is_some_and(|c| c.is_alphanumeric()) {
                format!(r"{}\b", escaped)
            } else {
                escaped
            }
        })
        .collect();

    let pattern = format!(r"(?i)\b(?:{})", alternatives.join("|"));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Ignoring address keywords: {}", e);
            None
        }
    }
}

/// A `label:` token used twice, or one token three times in a row.
fn has_repeated_token(words: &[&str]) -> bool {
    let mut labels = HashSet::new();
    for word in words {
        if word.chars().count() > 1 && word.ends_with(':') && !labels.insert(word.to_lowercase())
        {
            return true;
        }
    }

    words.windows(3).any(|w| {
        w[0].eq_ignore_ascii_case(w[1]) && w[1].eq_ignore_ascii_case(w[2])
    })
}

/// At least one cased character and no lowercase ones.
fn is_uppercase(s: &str) -> bool {
    s.chars().any(|c| c.is_uppercase()) && !s.chars().any(|c| c.is_lowercase())
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}
