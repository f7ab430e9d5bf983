//! Categorized trigger rules and the weights attached to each category.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{LftError, LftResult};

// ── Rule Set ────────────────────────────────────────────────────────────

/// Mapping from category name to an ordered list of trigger keywords.
///
/// Categories iterate in lexicographic order, so every consumer sees the
/// same layout regardless of how the rules were assembled. Keywords are
/// lower-cased and de-duplicated on insertion, keeping first occurrence order.
///
/// Keyword forms:
/// - `hello` matches the token `hello`
/// - `creat*` matches any token starting with `creat`
/// - `how are` (contains whitespace) matches that phrase in the token stream
/// - `good morn*` matches the phrase with a prefix on its last word
///
/// Keywords without any letter or digit are dropped, since they can never
/// match a token.
///
/// A category may carry a context label. Contexts give a force its
/// direction: see `lft_force::direction`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    categories: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    contexts: BTreeMap<String, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_category<I, S>(mut self, category: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert(category, keywords);
        self
    }

    /// Insert or replace a category.
    pub fn insert<I, S>(&mut self, category: impl Into<String>, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword
                .as_ref()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            let wordy = keyword.chars().any(char::is_alphanumeric);
            if wordy && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }
        self.categories.insert(category.into(), normalized);
    }

    /// Builder-style [`set_context`](Self::set_context) for a category that
    /// may not exist yet; the label is kept once the category is inserted.
    pub fn with_context(mut self, category: impl Into<String>, context: impl Into<String>) -> Self {
        self.contexts.insert(category.into(), context.into().trim().to_lowercase());
        self
    }

    /// Attach a context label to an existing category.
    pub fn set_context(&mut self, category: &str, context: impl Into<String>) -> LftResult<()> {
        if !self.categories.contains_key(category) {
            return Err(LftError::InvalidParameter(format!(
                "unknown category '{}'",
                category
            )));
        }
        let context = context.into().trim().to_lowercase();
        if context.is_empty() {
            return Err(LftError::InvalidParameter(
                "context label must not be empty".to_string(),
            ));
        }
        self.contexts.insert(category.to_string(), context);
        Ok(())
    }

    /// Context label of `category`, if it has one.
    pub fn context(&self, category: &str) -> Option<&str> {
        self.contexts.get(category).map(String::as_str)
    }

    /// Remove a category and its context label.
    pub fn remove(&mut self, category: &str) -> Option<Vec<String>> {
        self.contexts.remove(category);
        self.categories.remove(category)
    }

    pub fn keywords(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Category names in lexicographic order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<S, K> FromIterator<(S, Vec<K>)> for RuleSet
where
    S: Into<String>,
    K: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (S, Vec<K>)>>(iter: T) -> Self {
        let mut rules = RuleSet::new();
        for (category, keywords) in iter {
            rules.insert(category, keywords);
        }
        rules
    }
}

impl From<HashMap<String, Vec<String>>> for RuleSet {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, Vec<String>>> for RuleSet {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        map.into_iter().collect()
    }
}

// ── Weights ─────────────────────────────────────────────────────────────

/// Per-category multipliers. Unknown categories weigh [`Weights::DEFAULT_WEIGHT`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    values: BTreeMap<String, f64>,
}

impl Weights {
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    /// Uniform weights (every category at the default).
    pub fn uniform() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str) -> f64 {
        self.values
            .get(category)
            .copied()
            .unwrap_or(Self::DEFAULT_WEIGHT)
    }

    /// Set a category weight. Weights must be finite and non-negative.
    pub fn set(&mut self, category: impl Into<String>, weight: f64) -> LftResult<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(LftError::InvalidParameter(format!(
                "weight must be finite and non-negative, got {}",
                weight
            )));
        }
        self.values.insert(category.into(), weight);
        Ok(())
    }

    /// Explicitly stored entries (categories at the implicit default are omitted).
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn is_uniform(&self) -> bool {
        self.values
            .values()
            .all(|w| (*w - Self::DEFAULT_WEIGHT).abs() < f64::EPSILON)
    }
}
