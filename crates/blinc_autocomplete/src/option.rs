//! Option projections
//!
//! The engine treats options as opaque values of a caller-defined type.
//! Everything it needs to know about an option (its label, whether it is
//! disabled, which group it belongs to, whether two options are the same)
//! comes from the projections stored here.

use std::fmt;
use std::sync::Arc;

/// Projects an option to a string (label, group key, filter text)
pub type TextFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Projects an option to a flag
pub type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Decides whether two options are the same entry
pub type EqualsFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Builds a synthetic option from free text (free-solo mode)
pub type FreeTextFn<T> = Arc<dyn Fn(&str) -> T + Send + Sync>;

/// The set of caller-supplied projections over option values
pub struct OptionProjections<T> {
    pub(crate) label: TextFn<T>,
    pub(crate) equals: EqualsFn<T>,
    pub(crate) disabled: Option<PredicateFn<T>>,
    pub(crate) group_by: Option<TextFn<T>>,
    pub(crate) stringify: Option<TextFn<T>>,
    pub(crate) free_text: Option<FreeTextFn<T>>,
}

impl<T> OptionProjections<T> {
    /// Create projections from the two mandatory ones
    pub fn new<L, E>(label: L, equals: E) -> Self
    where
        L: Fn(&T) -> String + Send + Sync + 'static,
        E: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            label: Arc::new(label),
            equals: Arc::new(equals),
            disabled: None,
            group_by: None,
            stringify: None,
            free_text: None,
        }
    }

    /// Display label of an option
    pub fn label(&self, option: &T) -> String {
        (self.label)(option)
    }

    /// Whether two options are the same entry
    pub fn equals(&self, a: &T, b: &T) -> bool {
        (self.equals)(a, b)
    }

    /// Whether the option is disabled (never disabled without a projection)
    pub fn is_disabled(&self, option: &T) -> bool {
        self.disabled.as_ref().is_some_and(|f| f(option))
    }

    /// Group key of an option, if grouping is active
    pub fn group_key(&self, option: &T) -> Option<String> {
        self.group_by.as_ref().map(|f| f(option))
    }

    /// Whether a group key projection is configured
    pub fn is_grouped(&self) -> bool {
        self.group_by.is_some()
    }

    /// Text matched by the default filter: `stringify` when set, else the label
    pub fn filter_text(&self, option: &T) -> String {
        match &self.stringify {
            Some(stringify) => stringify(option),
            None => self.label(option),
        }
    }

    /// Build a synthetic option from free text
    pub fn from_free_text(&self, text: &str) -> Option<T> {
        self.free_text.as_ref().map(|f| f(text))
    }
}

impl OptionProjections<String> {
    /// Projections for plain string options: identity label, string equality,
    /// and free text committed as-is
    pub fn text() -> Self {
        let mut projections = Self::new(|s: &String| s.clone(), |a: &String, b: &String| a == b);
        projections.free_text = Some(Arc::new(|s: &str| s.to_string()));
        projections
    }
}

impl<T> Clone for OptionProjections<T> {
    fn clone(&self) -> Self {
        Self {
            label: Arc::clone(&self.label),
            equals: Arc::clone(&self.equals),
            disabled: self.disabled.clone(),
            group_by: self.group_by.clone(),
            stringify: self.stringify.clone(),
            free_text: self.free_text.clone(),
        }
    }
}

impl<T> fmt::Debug for OptionProjections<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionProjections")
            .field("disabled", &self.disabled.is_some())
            .field("group_by", &self.group_by.is_some())
            .field("stringify", &self.stringify.is_some())
            .field("free_text", &self.free_text.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Fruit {
        name: &'static str,
        in_season: bool,
    }

    fn fruit_projections() -> OptionProjections<Fruit> {
        let mut p = OptionProjections::new(
            |f: &Fruit| f.name.to_string(),
            |a: &Fruit, b: &Fruit| a.name == b.name,
        );
        p.disabled = Some(Arc::new(|f: &Fruit| !f.in_season));
        p
    }

    #[test]
    fn test_projections_defaults() {
        let p = OptionProjections::new(|n: &u32| n.to_string(), |a: &u32, b: &u32| a == b);
        assert_eq!(p.label(&7), "7");
        assert!(!p.is_disabled(&7));
        assert_eq!(p.group_key(&7), None);
        assert!(!p.is_grouped());
        assert_eq!(p.from_free_text("7"), None);
    }

    #[test]
    fn test_projections_custom() {
        let p = fruit_projections();
        let kiwi = Fruit {
            name: "Kiwi",
            in_season: false,
        };
        assert!(p.is_disabled(&kiwi));
        assert!(p.equals(
            &kiwi,
            &Fruit {
                name: "Kiwi",
                in_season: true
            }
        ));
        assert_eq!(p.filter_text(&kiwi), "Kiwi");
    }

    #[test]
    fn test_stringify_overrides_filter_text() {
        let mut p = OptionProjections::text();
        p.stringify = Some(Arc::new(|s: &String| format!("{} fruit", s)));
        assert_eq!(p.label(&"Fig".to_string()), "Fig");
        assert_eq!(p.filter_text(&"Fig".to_string()), "Fig fruit");
    }

    #[test]
    fn test_text_projections_free_text() {
        let p = OptionProjections::text();
        assert_eq!(p.from_free_text("Xyz"), Some("Xyz".to_string()));
    }
}
