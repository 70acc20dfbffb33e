//! Option filtering
//!
//! The default filter normalizes the query and every option's text the same
//! way (optional trim, lowercase and accent folding) and keeps the options
//! whose text contains the query, or starts with it for [`MatchFrom::Start`].
//! Matching preserves the original option order and `limit` is applied after
//! matching.
//!
//! ```rust
//! use blinc_autocomplete::filter::{filter_options, FilterConfig};
//! use blinc_autocomplete::option::OptionProjections;
//!
//! let options = vec!["Apple".to_string(), "Banana".to_string(), "Cherry".to_string()];
//! let matches = filter_options(&options, "an", &FilterConfig::default(), &OptionProjections::text());
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].option, "Banana");
//! assert_eq!(matches[0].original_index, Some(1));
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::option::OptionProjections;

/// Where in the option text the query may match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchFrom {
    /// Substring anywhere in the text
    #[default]
    Any,
    /// Prefix of the text
    Start,
}

/// Configuration of the default filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Compare case-insensitively
    pub ignore_case: bool,
    /// Fold diacritics before comparing ("é" matches "e")
    pub ignore_accents: bool,
    /// Substring or prefix matching
    pub match_from: MatchFrom,
    /// Trim surrounding whitespace before comparing
    pub trim: bool,
    /// Keep at most this many matches
    pub limit: Option<usize>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignore_case: true,
            ignore_accents: true,
            match_from: MatchFrom::Any,
            trim: false,
            limit: None,
        }
    }
}

impl FilterConfig {
    /// Set case sensitivity
    pub fn ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }

    /// Set accent folding
    pub fn ignore_accents(mut self, ignore: bool) -> Self {
        self.ignore_accents = ignore;
        self
    }

    /// Set prefix or substring matching
    pub fn match_from(mut self, match_from: MatchFrom) -> Self {
        self.match_from = match_from;
        self
    }

    /// Set whitespace trimming
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Limit the number of matches
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Normalize text the way both the query and candidates are compared
    pub fn normalize(&self, text: &str) -> String {
        let text = if self.trim { text.trim() } else { text };
        let text = if self.ignore_case {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        if self.ignore_accents {
            strip_diacritics(&text)
        } else {
            text
        }
    }

    /// Whether an already-normalized candidate matches an already-normalized query
    pub fn matches(&self, candidate: &str, query: &str) -> bool {
        match self.match_from {
            MatchFrom::Any => candidate.contains(query),
            MatchFrom::Start => candidate.starts_with(query),
        }
    }
}

/// Remove combining marks after canonical decomposition
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// An option that survived filtering
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredOption<T> {
    /// The option value
    pub option: T,
    /// Position in the caller's option list; `None` for options a custom
    /// filter produced that are not in the list
    pub original_index: Option<usize>,
}

/// What a custom filter gets to see
pub struct FilterState<'a, T> {
    /// Current query text
    pub input_value: &'a str,
    projections: &'a OptionProjections<T>,
}

impl<'a, T> FilterState<'a, T> {
    pub(crate) fn new(input_value: &'a str, projections: &'a OptionProjections<T>) -> Self {
        Self {
            input_value,
            projections,
        }
    }

    /// Label projection of the engine
    pub fn option_label(&self, option: &T) -> String {
        self.projections.label(option)
    }
}

/// Caller-supplied filter replacing the default one entirely
pub type CustomFilterFn<T> = Arc<dyn Fn(&[T], &FilterState<'_, T>) -> Vec<T> + Send + Sync>;

/// Filter `options` against `input_value` with the default predicate
pub fn filter_options<T: Clone>(
    options: &[T],
    input_value: &str,
    config: &FilterConfig,
    projections: &OptionProjections<T>,
) -> Vec<FilteredOption<T>> {
    filter_indexed(options.iter().enumerate(), input_value, config, projections)
}

/// Default filter over `(original_index, option)` pairs
pub(crate) fn filter_indexed<'a, T, I>(
    candidates: I,
    input_value: &str,
    config: &FilterConfig,
    projections: &OptionProjections<T>,
) -> Vec<FilteredOption<T>>
where
    T: Clone + 'a,
    I: IntoIterator<Item = (usize, &'a T)>,
{
    let query = config.normalize(input_value);
    let matches = candidates.into_iter().filter(|(_, option)| {
        let candidate = config.normalize(&projections.filter_text(option));
        config.matches(&candidate, &query)
    });
    let limit = config.limit.unwrap_or(usize::MAX);
    let filtered: Vec<FilteredOption<T>> = matches
        .take(limit)
        .map(|(index, option)| FilteredOption {
            option: option.clone(),
            original_index: Some(index),
        })
        .collect();

    tracing::trace!(query = %query, matches = filtered.len(), "filtered options");
    filtered
}

/// Run a custom filter and map its output back onto the option list
pub(crate) fn filter_custom<T: Clone>(
    filter: &CustomFilterFn<T>,
    candidates: &[T],
    all_options: &[T],
    input_value: &str,
    projections: &OptionProjections<T>,
) -> Vec<FilteredOption<T>> {
    let state = FilterState::new(input_value, projections);
    filter(candidates, &state)
        .into_iter()
        .map(|option| {
            let original_index = all_options
                .iter()
                .position(|candidate| projections.equals(candidate, &option));
            FilteredOption {
                option,
                original_index,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn labels(filtered: &[FilteredOption<String>]) -> Vec<&str> {
        filtered.iter().map(|f| f.option.as_str()).collect()
    }

    #[test]
    fn test_filter_substring() {
        let options = strings(&["Apple", "Banana", "Cherry"]);
        let p = OptionProjections::text();
        let filtered = filter_options(&options, "an", &FilterConfig::default(), &p);
        assert_eq!(labels(&filtered), vec!["Banana"]);
    }

    #[test]
    fn test_filter_empty_query_matches_all() {
        let options = strings(&["Apple", "Banana"]);
        let p = OptionProjections::text();
        let filtered = filter_options(&options, "", &FilterConfig::default(), &p);
        assert_eq!(labels(&filtered), vec!["Apple", "Banana"]);
        assert_eq!(filtered[1].original_index, Some(1));
    }

    #[test]
    fn test_filter_case_sensitivity() {
        let options = strings(&["Apple", "apricot"]);
        let p = OptionProjections::text();

        let insensitive = filter_options(&options, "AP", &FilterConfig::default(), &p);
        assert_eq!(insensitive.len(), 2);

        let sensitive = filter_options(&options, "Ap", &FilterConfig::default().ignore_case(false), &p);
        assert_eq!(labels(&sensitive), vec!["Apple"]);
    }

    #[test]
    fn test_filter_accents() {
        let options = strings(&["Crème brûlée", "Creme caramel"]);
        let p = OptionProjections::text();

        let folded = filter_options(&options, "creme", &FilterConfig::default(), &p);
        assert_eq!(folded.len(), 2);

        let strict = filter_options(&options, "crème", &FilterConfig::default().ignore_accents(false), &p);
        assert_eq!(labels(&strict), vec!["Crème brûlée"]);
    }

    #[test]
    fn test_filter_match_from_start() {
        let options = strings(&["Banana", "Ananas"]);
        let p = OptionProjections::text();
        let config = FilterConfig::default().match_from(MatchFrom::Start);
        let filtered = filter_options(&options, "an", &config, &p);
        assert_eq!(labels(&filtered), vec!["Ananas"]);
    }

    #[test]
    fn test_filter_trim() {
        let options = strings(&["Apple"]);
        let p = OptionProjections::text();
        assert!(filter_options(&options, " app ", &FilterConfig::default(), &p).is_empty());
        let trimmed = filter_options(&options, " app ", &FilterConfig::default().trim(true), &p);
        assert_eq!(trimmed.len(), 1);
    }

    #[test]
    fn test_filter_limit_applies_after_matching() {
        let options = strings(&["Xylophone", "Apple", "Apricot", "Avocado"]);
        let p = OptionProjections::text();
        let filtered = filter_options(&options, "a", &FilterConfig::default().limit(2), &p);
        assert_eq!(labels(&filtered), vec!["Apple", "Apricot"]);
        assert_eq!(filtered[0].original_index, Some(1));
    }

    #[test]
    fn test_filter_result_contains_exactly_matching_labels() {
        let options = strings(&["Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Éta"]);
        let p = OptionProjections::text();
        let config = FilterConfig::default();
        for query in ["a", "ta", "eta", "", "x", "ET"] {
            let filtered = filter_options(&options, query, &config, &p);
            let needle = config.normalize(query);
            for (index, option) in options.iter().enumerate() {
                let hit = config.normalize(option).contains(&needle);
                let kept = filtered.iter().any(|f| f.original_index == Some(index));
                assert_eq!(hit, kept, "query {:?} option {:?}", query, option);
            }
        }
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("Ångström"), "Angstrom");
        assert_eq!(strip_diacritics("naïve café"), "naive cafe");
    }

    #[test]
    fn test_custom_filter_maps_indices() {
        let options = strings(&["Apple", "Banana"]);
        let p = OptionProjections::text();
        let filter: CustomFilterFn<String> = Arc::new(|options: &[String], state: &FilterState<'_, String>| {
            let mut out: Vec<String> = options
                .iter()
                .filter(|o| state.option_label(o).ends_with('a'))
                .cloned()
                .collect();
            out.push(format!("Add \"{}\"", state.input_value));
            out
        });
        let filtered = filter_custom(&filter, &options, &options, "kiwi", &p);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].option, "Banana");
        assert_eq!(filtered[0].original_index, Some(1));
        assert_eq!(filtered[1].option, "Add \"kiwi\"");
        assert_eq!(filtered[1].original_index, None);
    }
}
