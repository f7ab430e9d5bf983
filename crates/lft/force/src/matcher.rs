//! Scores free text against categorized keywords.
//!
//! A category's score is the fraction of its keywords present in the text,
//! so a category with many keywords is not favored over one with few.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use lft_types::{CategoryScores, RuleSet};

/// Lower-case `text` and split it into word tokens.
///
/// Anything that is not alphanumeric or an apostrophe separates tokens.
/// Case folding happens before splitting, since lower-casing can change
/// the characters of a word (`İ` becomes `i` plus a combining dot).
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Compiled form of one keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Pattern {
    Exact(String),
    Prefix(String),
    /// Consecutive words; with `last_prefix` the final word only needs to
    /// start the token (`good morn*`).
    Phrase { words: Vec<String>, last_prefix: bool },
}

impl Pattern {
    fn compile(keyword: &str) -> Option<Pattern> {
        let (stem, wildcard) = match keyword.strip_suffix('*') {
            Some(stem) => (stem, true),
            None => (keyword, false),
        };
        let mut parts = tokenize(stem);
        match parts.len() {
            0 => None,
            1 if wildcard => parts.pop().map(Pattern::Prefix),
            1 => parts.pop().map(Pattern::Exact),
            _ => Some(Pattern::Phrase {
                words: parts,
                last_prefix: wildcard,
            }),
        }
    }

    /// Mark matched token positions in `mask`; return whether anything matched.
    fn mark(&self, tokens: &[String], mask: &mut [bool]) -> bool {
        let mut hit = false;
        match self {
            Pattern::Exact(word) => {
                for (i, token) in tokens.iter().enumerate() {
                    if token == word {
                        mask[i] = true;
                        hit = true;
                    }
                }
            }
            Pattern::Prefix(prefix) => {
                for (i, token) in tokens.iter().enumerate() {
                    if token.starts_with(prefix.as_str()) {
                        mask[i] = true;
                        hit = true;
                    }
                }
            }
            Pattern::Phrase { words, last_prefix } => {
                if words.len() <= tokens.len() {
                    for start in 0..=tokens.len() - words.len() {
                        let window = &tokens[start..start + words.len()];
                        if phrase_matches(words, window, *last_prefix) {
                            mask[start..start + words.len()].fill(true);
                            hit = true;
                        }
                    }
                }
            }
        }
        hit
    }
}

fn phrase_matches(words: &[String], window: &[String], last_prefix: bool) -> bool {
    let last = words.len() - 1;
    words.iter().zip(window).enumerate().all(|(i, (word, token))| {
        if last_prefix && i == last {
            token.starts_with(word.as_str())
        } else {
            token == word
        }
    })
}

/// Detailed match outcome.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Fraction of each category's keywords found in the text.
    pub scores: CategoryScores,
    /// Keywords that matched, per category, in rule order.
    pub matched: BTreeMap<String, Vec<String>>,
    /// Number of tokens in the text.
    pub token_count: usize,
    /// Number of tokens covered by at least one keyword.
    pub matched_token_count: usize,
}

impl MatchReport {
    /// Fraction of tokens explained by the rules (0.0 for empty text).
    pub fn coverage(&self) -> f64 {
        if self.token_count == 0 {
            0.0
        } else {
            self.matched_token_count as f64 / self.token_count as f64
        }
    }

    /// Whether any category matched at all.
    pub fn has_matches(&self) -> bool {
        self.scores.values().any(|s| *s > 0.0)
    }
}

/// Stateless keyword matcher.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleMatcher;

impl RuleMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Per-category scores. Every category in `rules` gets an entry.
    pub fn match_text(&self, text: &str, rules: &RuleSet) -> CategoryScores {
        self.analyze(text, rules).scores
    }

    /// Scores plus matched keywords and token coverage.
    pub fn analyze(&self, text: &str, rules: &RuleSet) -> MatchReport {
        let tokens = tokenize(text);
        let mut covered = vec![false; tokens.len()];
        let mut report = MatchReport {
            token_count: tokens.len(),
            ..MatchReport::default()
        };

        for (category, keywords) in rules.iter() {
            let mut hits = Vec::new();
            let mut usable = 0usize;
            // keywords without any word characters can never match and do
            // not count toward the denominator
            for (keyword, pattern) in keywords
                .iter()
                .filter_map(|k| Pattern::compile(k).map(|p| (k, p)))
            {
                usable += 1;
                if pattern.mark(&tokens, &mut covered) {
                    hits.push(keyword.clone());
                }
            }

            let score = if usable == 0 {
                0.0
            } else {
                hits.len() as f64 / usable as f64
            };
            report.scores.insert(category.to_string(), score);
            if !hits.is_empty() {
                report.matched.insert(category.to_string(), hits);
            }
        }

        report.matched_token_count = covered.iter().filter(|c| **c).count();
        report
    }
}
