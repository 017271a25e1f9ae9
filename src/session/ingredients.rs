// ABOUTME: Ingredient token normalization, the ordered ingredient set, and input suggestions
// ABOUTME: Duplicates and empty input are rejected silently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use crate::constants::suggestions::{QUICK_ADD_COUNT, SUGGESTED_INGREDIENTS};

/// Normalize raw input into an ingredient token (trimmed, lower-cased)
///
/// Returns `None` for input that is empty after trimming.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let token = raw.trim().to_lowercase();
    (!token.is_empty()).then_some(token)
}

/// Duplicate-free ingredient tokens in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet {
    tokens: Vec<String>,
}

impl IngredientSet {
    /// Empty set
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Add `raw` after normalizing it
    ///
    /// Returns false when the input is empty or already present.
    pub fn add(&mut self, raw: &str) -> bool {
        match normalize(raw) {
            Some(token) if !self.tokens.contains(&token) => {
                self.tokens.push(token);
                true
            }
            _ => false,
        }
    }

    /// Remove the token matching `raw`; returns whether anything was removed
    pub fn remove(&mut self, raw: &str) -> bool {
        let Some(token) = normalize(raw) else {
            return false;
        };
        let before = self.tokens.len();
        self.tokens.retain(|existing| *existing != token);
        self.tokens.len() != before
    }

    /// Remove every token
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Whether the normalized form of `raw` is present
    #[must_use]
    pub fn contains(&self, raw: &str) -> bool {
        normalize(raw).is_some_and(|token| self.tokens.contains(&token))
    }

    /// Tokens in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Tokens as a slice, the shape search keys and requests use
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no ingredient is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Vocabulary entries containing `input`, excluding ingredients already added
///
/// Blank input yields no suggestions.
#[must_use]
pub fn suggestions(input: &str, current: &IngredientSet) -> Vec<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    SUGGESTED_INGREDIENTS
        .iter()
        .copied()
        .filter(|candidate| candidate.contains(needle.as_str()) && !current.contains(candidate))
        .collect()
}

/// Quick-add row, offered only while no ingredient is present
#[must_use]
pub fn quick_add(current: &IngredientSet) -> Vec<&'static str> {
    if !current.is_empty() {
        return Vec::new();
    }
    SUGGESTED_INGREDIENTS
        .iter()
        .copied()
        .take(QUICK_ADD_COUNT)
        .collect()
}
