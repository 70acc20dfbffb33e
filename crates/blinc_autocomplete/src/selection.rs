//! Committed selection
//!
//! [`Value`] holds either a single optional option or a list of options.
//! Commits in multi-select mode toggle: an option already present (by the
//! equality projection) is removed, anything else is appended, so the list
//! never holds two equal entries.

use crate::navigation::Direction;
use crate::option::OptionProjections;

/// The committed value of an autocomplete
#[derive(Clone, Debug, PartialEq)]
pub enum Value<T> {
    /// Single-select value
    Single(Option<T>),
    /// Multi-select value
    Multiple(Vec<T>),
}

impl<T> Value<T> {
    /// Empty value for the given mode
    pub fn empty(multiple: bool) -> Self {
        if multiple {
            Value::Multiple(Vec::new())
        } else {
            Value::Single(None)
        }
    }

    /// Whether this is a multi-select value
    pub fn is_multiple(&self) -> bool {
        matches!(self, Value::Multiple(_))
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Number of selected entries
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// The single selected option (first entry in multi-select mode)
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Selected entries as a slice (zero or one entry in single-select mode)
    pub fn as_slice(&self) -> &[T] {
        match self {
            Value::Single(Some(option)) => std::slice::from_ref(option),
            Value::Single(None) => &[],
            Value::Multiple(options) => options,
        }
    }

    /// Whether `option` is selected, by the equality projection
    pub fn contains(&self, option: &T, projections: &OptionProjections<T>) -> bool {
        self.position(option, projections).is_some()
    }

    /// Index of `option` among the selected entries
    pub fn position(&self, option: &T, projections: &OptionProjections<T>) -> Option<usize> {
        self.as_slice()
            .iter()
            .position(|selected| projections.equals(option, selected))
    }

    /// Same entries in the same order, by the equality projection
    pub fn same_as(&self, other: &Value<T>, projections: &OptionProjections<T>) -> bool {
        self.is_multiple() == other.is_multiple()
            && self.len() == other.len()
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(|(a, b)| projections.equals(a, b))
    }
}

/// What a commit did to the value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommitKind {
    /// The option became (part of) the value
    Added,
    /// The option was already selected and got removed (multi-select toggle)
    Removed,
}

impl<T: Clone> Value<T> {
    /// Commit `option`: replace in single-select mode, toggle in multi-select mode
    pub fn commit(&self, option: T, projections: &OptionProjections<T>) -> (Value<T>, CommitKind) {
        match self {
            Value::Single(_) => (Value::Single(Some(option)), CommitKind::Added),
            Value::Multiple(options) => {
                let mut next = options.clone();
                match self.position(&option, projections) {
                    Some(index) => {
                        next.remove(index);
                        (Value::Multiple(next), CommitKind::Removed)
                    }
                    None => {
                        next.push(option);
                        (Value::Multiple(next), CommitKind::Added)
                    }
                }
            }
        }
    }

    /// Value with the entry at `index` removed
    pub fn without(&self, index: usize) -> Value<T> {
        match self {
            Value::Single(_) if index == 0 => Value::Single(None),
            Value::Single(option) => Value::Single(option.clone()),
            Value::Multiple(options) => {
                let mut next = options.clone();
                if index < next.len() {
                    next.remove(index);
                }
                Value::Multiple(next)
            }
        }
    }

    /// Value with the last entry removed
    pub fn without_last(&self) -> Value<T> {
        match self.len() {
            0 => self.clone(),
            len => self.without(len - 1),
        }
    }
}

/// Input text that represents `value` when the user is not editing
pub fn input_text_for<T>(value: &Value<T>, projections: &OptionProjections<T>) -> String {
    match value {
        Value::Single(Some(option)) => projections.label(option),
        Value::Single(None) | Value::Multiple(_) => String::new(),
    }
}

/// Next keyboard-focused tag, `None` meaning the text input
///
/// From the input only a move to the left enters the tags, and only while
/// the input is empty. Moving right past the last tag returns to the input;
/// moving left stops at the first tag. Without tags focus stays on the input.
pub fn next_tag(
    current: Option<usize>,
    tag_count: usize,
    input_empty: bool,
    direction: Direction,
) -> Option<usize> {
    if tag_count == 0 {
        return None;
    }
    match current {
        None => {
            if input_empty && direction == Direction::Previous && tag_count > 0 {
                Some(tag_count - 1)
            } else {
                None
            }
        }
        Some(index) => match direction {
            Direction::Previous => Some(index.saturating_sub(1).min(tag_count - 1)),
            Direction::Next if index + 1 >= tag_count => None,
            Direction::Next => Some(index + 1),
        },
    }
}

/// Focused tag after the tag at `removed` was deleted
///
/// Focus moves to the previous tag, or to the tag that slid into the first
/// slot. Only an empty value sends focus back to the input.
pub fn tag_after_removal(removed: usize, remaining: usize) -> Option<usize> {
    if remaining == 0 {
        None
    } else {
        Some(removed.saturating_sub(1).min(remaining - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> String {
        text.to_string()
    }

    #[test]
    fn test_value_single() {
        let p = OptionProjections::text();
        let value = Value::empty(false);
        assert!(value.is_empty());
        let (value, kind) = value.commit(s("Apple"), &p);
        assert_eq!(kind, CommitKind::Added);
        assert_eq!(value, Value::Single(Some(s("Apple"))));
        // Single-select never toggles off
        let (value, kind) = value.commit(s("Apple"), &p);
        assert_eq!(kind, CommitKind::Added);
        assert_eq!(value.first(), Some(&s("Apple")));
        assert_eq!(input_text_for(&value, &p), "Apple");
    }

    #[test]
    fn test_value_multiple_toggle() {
        let p = OptionProjections::text();
        let value = Value::Multiple(vec![s("A")]);
        let (value, kind) = value.commit(s("B"), &p);
        assert_eq!(kind, CommitKind::Added);
        assert_eq!(value, Value::Multiple(vec![s("A"), s("B")]));
        let (value, kind) = value.commit(s("A"), &p);
        assert_eq!(kind, CommitKind::Removed);
        assert_eq!(value, Value::Multiple(vec![s("B")]));
        assert_eq!(input_text_for(&value, &p), "");
    }

    #[test]
    fn test_toggle_sequences_never_duplicate() {
        let p = OptionProjections::text();
        let picks = ["a", "b", "a", "c", "c", "b", "a", "d", "a", "b", "b"];
        let mut value = Value::empty(true);
        for pick in picks {
            value = value.commit(s(pick), &p).0;
            let entries = value.as_slice();
            for (i, a) in entries.iter().enumerate() {
                for b in &entries[i + 1..] {
                    assert!(!p.equals(a, b), "duplicate {:?} in {:?}", a, entries);
                }
            }
        }
    }

    #[test]
    fn test_toggle_with_custom_equality() {
        let p = OptionProjections::new(
            |s: &String| s.clone(),
            |a: &String, b: &String| a.eq_ignore_ascii_case(b),
        );
        let value = Value::Multiple(vec![s("apple")]);
        let (value, kind) = value.commit(s("APPLE"), &p);
        assert_eq!(kind, CommitKind::Removed);
        assert!(value.is_empty());
    }

    #[test]
    fn test_without() {
        let value = Value::Multiple(vec![s("a"), s("b"), s("c")]);
        assert_eq!(value.without(1), Value::Multiple(vec![s("a"), s("c")]));
        assert_eq!(value.without(9), value);
        assert_eq!(value.without_last(), Value::Multiple(vec![s("a"), s("b")]));
        assert_eq!(Value::Single(Some(s("a"))).without(0), Value::Single(None));
        assert_eq!(Value::<String>::Multiple(vec![]).without_last(), Value::Multiple(vec![]));
    }

    #[test]
    fn test_same_as() {
        let p = OptionProjections::text();
        let a = Value::Multiple(vec![s("x"), s("y")]);
        assert!(a.same_as(&Value::Multiple(vec![s("x"), s("y")]), &p));
        assert!(!a.same_as(&Value::Multiple(vec![s("y"), s("x")]), &p));
        assert!(!Value::Single(None).same_as(&Value::<String>::Multiple(vec![]), &p));
    }

    #[test]
    fn test_next_tag() {
        use Direction::*;
        assert_eq!(next_tag(None, 3, true, Previous), Some(2));
        assert_eq!(next_tag(None, 3, false, Previous), None);
        assert_eq!(next_tag(None, 3, true, Next), None);
        assert_eq!(next_tag(None, 0, true, Previous), None);
        assert_eq!(next_tag(Some(2), 3, true, Previous), Some(1));
        assert_eq!(next_tag(Some(0), 3, true, Previous), Some(0));
        assert_eq!(next_tag(Some(1), 3, true, Next), Some(2));
        assert_eq!(next_tag(Some(2), 3, true, Next), None);
        assert_eq!(next_tag(Some(2), 0, true, Previous), None);
        assert_eq!(next_tag(Some(0), 0, true, Next), None);
    }

    #[test]
    fn test_tag_after_removal() {
        assert_eq!(tag_after_removal(2, 2), Some(1));
        assert_eq!(tag_after_removal(1, 2), Some(0));
        // The next tag slides into the first slot
        assert_eq!(tag_after_removal(0, 2), Some(0));
        assert_eq!(tag_after_removal(0, 0), None);
        assert_eq!(tag_after_removal(5, 1), Some(0));
    }
}
