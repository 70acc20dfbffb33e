//! Grouping of filtered options
//!
//! Grouping is a single pass partition: a new group starts whenever the key
//! changes. Nothing is sorted, so options sharing a key must already be
//! adjacent in the caller's list, otherwise the same key shows up as more
//! than one group.

use crate::filter::FilteredOption;

/// A contiguous run of filtered options sharing a group key
#[derive(Clone, Debug, PartialEq)]
pub struct OptionGroup<T> {
    /// Group key (also the default header text)
    pub key: String,
    /// Flat index of the first option of the group
    pub start_index: usize,
    /// Options of the group, in filtered order
    pub options: Vec<FilteredOption<T>>,
}

/// Partition `filtered` into runs of equal keys
pub fn group_options<T, F>(filtered: &[FilteredOption<T>], group_key: F) -> Vec<OptionGroup<T>>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    let mut groups: Vec<OptionGroup<T>> = Vec::new();
    for (index, entry) in filtered.iter().enumerate() {
        let key = group_key(&entry.option);
        match groups.last_mut() {
            Some(group) if group.key == key => group.options.push(entry.clone()),
            _ => groups.push(OptionGroup {
                key,
                start_index: index,
                options: vec![entry.clone()],
            }),
        }
    }
    groups
}

/// The visible option list, flat or grouped
#[derive(Clone, Debug, PartialEq)]
pub enum OptionList<T> {
    /// No grouping configured
    Flat(Vec<FilteredOption<T>>),
    /// Grouped by key
    Grouped(Vec<OptionGroup<T>>),
}

impl<T> Default for OptionList<T> {
    fn default() -> Self {
        OptionList::Flat(Vec::new())
    }
}

impl<T> OptionList<T> {
    /// Number of options across all groups
    pub fn len(&self) -> usize {
        match self {
            OptionList::Flat(options) => options.len(),
            OptionList::Grouped(groups) => groups.iter().map(|g| g.options.len()).sum(),
        }
    }

    /// Whether there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Option at a flat index
    pub fn get(&self, index: usize) -> Option<&FilteredOption<T>> {
        match self {
            OptionList::Flat(options) => options.get(index),
            OptionList::Grouped(groups) => groups
                .iter()
                .find(|g| index >= g.start_index && index < g.start_index + g.options.len())
                .and_then(|g| g.options.get(index - g.start_index)),
        }
    }

    /// All options in flat order
    pub fn iter(&self) -> Box<dyn Iterator<Item = &FilteredOption<T>> + '_> {
        match self {
            OptionList::Flat(options) => Box::new(options.iter()),
            OptionList::Grouped(groups) => Box::new(groups.iter().flat_map(|g| g.options.iter())),
        }
    }

    /// Groups, if grouping is active
    pub fn groups(&self) -> Option<&[OptionGroup<T>]> {
        match self {
            OptionList::Flat(_) => None,
            OptionList::Grouped(groups) => Some(groups),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered(items: &[&str]) -> Vec<FilteredOption<String>> {
        items
            .iter()
            .enumerate()
            .map(|(i, s)| FilteredOption {
                option: s.to_string(),
                original_index: Some(i),
            })
            .collect()
    }

    fn first_letter(s: &String) -> String {
        s.chars().next().map(String::from).unwrap_or_default()
    }

    /// Keys of the groups are pairwise distinct when the input is pre-sorted
    fn keys_are_unique<T>(groups: &[OptionGroup<T>]) -> bool {
        let mut seen = std::collections::HashSet::new();
        groups.iter().all(|g| seen.insert(g.key.clone()))
    }

    #[test]
    fn test_group_by_first_letter() {
        let groups = group_options(&filtered(&["Apple", "Avocado", "Banana"]), first_letter);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "A");
        assert_eq!(groups[0].start_index, 0);
        assert_eq!(groups[0].options.len(), 2);
        assert_eq!(groups[0].options[1].option, "Avocado");
        assert_eq!(groups[1].key, "B");
        assert_eq!(groups[1].start_index, 2);
        assert_eq!(groups[1].options[0].option, "Banana");
    }

    #[test]
    fn test_group_empty() {
        let groups = group_options(&filtered(&[]), first_letter);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_group_adjacency_precondition() {
        let sorted = group_options(&filtered(&["Apple", "Avocado", "Banana", "Blueberry"]), first_letter);
        assert!(keys_are_unique(&sorted));

        // Unsorted input repeats the header for "A"
        let unsorted = group_options(&filtered(&["Apple", "Banana", "Avocado"]), first_letter);
        assert_eq!(unsorted.len(), 3);
        assert!(!keys_are_unique(&unsorted));
    }

    #[test]
    fn test_option_list_flat_index() {
        let list = OptionList::Grouped(group_options(
            &filtered(&["Apple", "Avocado", "Banana", "Cherry"]),
            first_letter,
        ));
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(2).map(|f| f.option.as_str()), Some("Banana"));
        assert_eq!(list.get(3).map(|f| f.option.as_str()), Some("Cherry"));
        assert!(list.get(4).is_none());
        let order: Vec<_> = list.iter().map(|f| f.option.as_str()).collect();
        assert_eq!(order, vec!["Apple", "Avocado", "Banana", "Cherry"]);
        assert_eq!(list.groups().map(|g| g.len()), Some(3));
    }
}
