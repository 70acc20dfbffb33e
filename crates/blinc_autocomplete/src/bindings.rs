//! Binding descriptors for rendering layers
//!
//! Each region of the widget (root, label, input, indicators, tags, popup,
//! listbox, options) gets a pure function that reads the engine and returns
//! a plain descriptor: accessibility attributes, ids, display state, and the
//! [`Event`] values the renderer should dispatch from its handlers.
//!
//! Element ids derive from the instance id:
//!
//! | Element | Id |
//! |---|---|
//! | input | `{id}` |
//! | label | `{id}-label` |
//! | listbox | `{id}-popup` |
//! | option | `{id}-option-{index}` |
//!
//! ```rust
//! use blinc_autocomplete::{bindings, AutocompleteBuilder, Event, Key};
//!
//! let mut ac = AutocompleteBuilder::text(["Apple", "Banana"]).id("fruit").build().unwrap();
//! ac.dispatch(Event::Focus);
//! ac.dispatch(Event::key(Key::ArrowDown));
//!
//! let input = bindings::input(&ac);
//! assert!(input.aria_expanded);
//! assert_eq!(input.aria_activedescendant.as_deref(), Some("fruit-option-0"));
//! assert!(bindings::option(&ac, 0).unwrap().data_focus);
//! ```

use std::ops::Range;

use crate::engine::{Anchor, Autocomplete};
use crate::event::{Event, KeyboardEvent};

/// ARIA role of a region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Combobox,
    Listbox,
    Option,
    Presentation,
    Button,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Combobox => "combobox",
            Role::Listbox => "listbox",
            Role::Option => "option",
            Role::Presentation => "presentation",
            Role::Button => "button",
        }
    }
}

pub fn label_id(id: &str) -> String {
    format!("{id}-label")
}

pub fn popup_id(id: &str) -> String {
    format!("{id}-popup")
}

pub fn option_id(id: &str, index: usize) -> String {
    format!("{id}-option-{index}")
}

// ============================================================================
// Root and input
// ============================================================================

/// Container wrapping input, tags and indicators
#[derive(Clone, Debug, PartialEq)]
pub struct RootBindings {
    /// Listbox id while the listbox is shown
    pub aria_owns: Option<String>,
    pub focused: bool,
    pub on_click: Event,
}

impl RootBindings {
    /// Event for a mouse down inside the root
    pub fn mouse_down(&self, on_input: bool) -> Event {
        Event::RootMouseDown { on_input }
    }
}

/// `<label>` for the input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputLabelBindings {
    pub id: String,
    pub html_for: String,
}

/// The text input
#[derive(Clone, Debug, PartialEq)]
pub struct InputBindings {
    pub id: String,
    pub role: Role,
    /// Text to render, including any inline completion
    pub value: String,
    /// Untyped completion suffix to select, in char offsets
    pub selection: Option<Range<usize>>,
    pub aria_expanded: bool,
    pub aria_activedescendant: Option<String>,
    /// `"both"` with inline completion, `"list"` otherwise
    pub aria_autocomplete: &'static str,
    pub aria_controls: Option<String>,
    pub on_focus: Event,
    pub on_blur: Event,
    pub on_mouse_down: Event,
}

impl InputBindings {
    /// Event for a text change
    pub fn change(&self, text: impl Into<String>) -> Event {
        Event::InputChange(text.into())
    }

    /// Event for a key press
    pub fn key_down(&self, event: impl Into<KeyboardEvent>) -> Event {
        Event::KeyDown(event.into())
    }
}

fn listbox_shown<T: Clone + 'static>(ac: &Autocomplete<T>) -> bool {
    ac.is_open() && !ac.visible_options().is_empty()
}

pub fn root<T: Clone + 'static>(ac: &Autocomplete<T>) -> RootBindings {
    RootBindings {
        aria_owns: listbox_shown(ac).then(|| popup_id(ac.id())),
        focused: ac.is_focused(),
        on_click: Event::RootClick,
    }
}

pub fn input_label<T: Clone + 'static>(ac: &Autocomplete<T>) -> InputLabelBindings {
    InputLabelBindings {
        id: label_id(ac.id()),
        html_for: ac.id().to_string(),
    }
}

pub fn input<T: Clone + 'static>(ac: &Autocomplete<T>) -> InputBindings {
    let shown = listbox_shown(ac);
    InputBindings {
        id: ac.id().to_string(),
        role: Role::Combobox,
        value: ac.display_value().to_string(),
        selection: ac.completion().and_then(|c| c.selection.clone()),
        aria_expanded: shown,
        aria_activedescendant: ac
            .highlighted_index()
            .filter(|_| ac.is_open())
            .map(|index| option_id(ac.id(), index)),
        aria_autocomplete: if ac.flags().auto_complete { "both" } else { "list" },
        aria_controls: shown.then(|| popup_id(ac.id())),
        on_focus: Event::Focus,
        on_blur: Event::Blur,
        on_mouse_down: Event::InputMouseDown,
    }
}

// ============================================================================
// Indicators and tags
// ============================================================================

/// Clear affordance
#[derive(Clone, Debug, PartialEq)]
pub struct ClearIndicatorBindings {
    pub role: Role,
    pub title: &'static str,
    /// Shown only when there is something to clear
    pub visible: bool,
    pub on_click: Event,
}

/// Popup toggle affordance
#[derive(Clone, Debug, PartialEq)]
pub struct PopupIndicatorBindings {
    pub role: Role,
    pub open: bool,
    pub title: &'static str,
    pub on_click: Event,
}

/// A selected entry in multi-select mode
#[derive(Clone, Debug, PartialEq)]
pub struct TagBindings {
    pub label: String,
    pub data_tag_index: usize,
    pub focused: bool,
    pub on_delete: Event,
}

/// `None` when clearing is disabled
pub fn clear_indicator<T: Clone + 'static>(ac: &Autocomplete<T>) -> Option<ClearIndicatorBindings> {
    if ac.flags().disable_clearable {
        return None;
    }
    Some(ClearIndicatorBindings {
        role: Role::Button,
        title: "Clear",
        visible: ac.is_dirty(),
        on_click: Event::ClearClick,
    })
}

/// `None` in free-solo mode
pub fn popup_indicator<T: Clone + 'static>(ac: &Autocomplete<T>) -> Option<PopupIndicatorBindings> {
    if ac.flags().free_solo {
        return None;
    }
    let open = ac.is_open();
    Some(PopupIndicatorBindings {
        role: Role::Button,
        open,
        title: if open { "Close popup" } else { "Open popup" },
        on_click: Event::PopupIndicatorClick,
    })
}

pub fn tag<T: Clone + 'static>(ac: &Autocomplete<T>, index: usize) -> Option<TagBindings> {
    if !ac.flags().multiple {
        return None;
    }
    let option = ac.value().as_slice().get(index)?;
    Some(TagBindings {
        label: ac.projections().label(option),
        data_tag_index: index,
        focused: ac.focused_tag() == Some(index),
        on_delete: Event::TagDelete(index),
    })
}

/// Descriptors for every tag, in value order
pub fn tags<T: Clone + 'static>(ac: &Autocomplete<T>) -> Vec<TagBindings> {
    (0..ac.value().len()).filter_map(|index| tag(ac, index)).collect()
}

// ============================================================================
// Popup, listbox, options
// ============================================================================

/// What the popup shows below the loading row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopupContent {
    /// The listbox
    Listbox,
    /// Nothing matched
    NoOptions(String),
    /// Nothing besides the loading row
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PopupBindings {
    pub role: Role,
    pub anchor: Option<Anchor>,
    /// Popup width, taken from the anchor
    pub width: Option<f32>,
    /// Reposition whenever this changes
    pub revision: u64,
    /// Loading text, shown above any options while loading
    pub loading: Option<String>,
    pub content: PopupContent,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListboxBindings {
    pub id: String,
    pub role: Role,
    pub aria_labelledby: String,
    pub on_mouse_down: Event,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionBindings {
    pub id: String,
    pub role: Role,
    pub label: String,
    pub aria_selected: bool,
    pub aria_disabled: bool,
    /// Highlighted
    pub data_focus: bool,
    pub data_option_index: usize,
    /// `None` for disabled options
    pub on_mouse_over: Option<Event>,
    /// `None` for disabled options
    pub on_click: Option<Event>,
}

/// `None` while closed, or when there is nothing to show
pub fn popup<T: Clone + 'static>(ac: &Autocomplete<T>) -> Option<PopupBindings> {
    if !ac.is_open() {
        return None;
    }
    let flags = ac.flags();
    let loading = flags.loading.then(|| flags.loading_text.clone());
    let content = if !ac.visible_options().is_empty() {
        PopupContent::Listbox
    } else if !flags.loading && !flags.free_solo {
        PopupContent::NoOptions(flags.no_options_text.clone())
    } else {
        PopupContent::Empty
    };
    if loading.is_none() && content == PopupContent::Empty {
        return None;
    }
    Some(PopupBindings {
        role: Role::Presentation,
        anchor: ac.anchor(),
        width: ac.anchor().and_then(|anchor| anchor.width),
        revision: ac.revision(),
        loading,
        content,
    })
}

pub fn listbox<T: Clone + 'static>(ac: &Autocomplete<T>) -> ListboxBindings {
    ListboxBindings {
        id: popup_id(ac.id()),
        role: Role::Listbox,
        aria_labelledby: label_id(ac.id()),
        on_mouse_down: Event::ListboxMouseDown,
    }
}

/// Descriptor for the visible option at flat `index`
pub fn option<T: Clone + 'static>(ac: &Autocomplete<T>, index: usize) -> Option<OptionBindings> {
    let entry = ac.visible_options().get(index)?;
    let disabled = ac.projections().is_disabled(&entry.option);
    Some(OptionBindings {
        id: option_id(ac.id(), index),
        role: Role::Option,
        label: ac.projections().label(&entry.option),
        aria_selected: ac.is_selected(&entry.option),
        aria_disabled: disabled,
        data_focus: ac.highlighted_index() == Some(index),
        data_option_index: index,
        on_mouse_over: (!disabled).then_some(Event::OptionHover(index)),
        on_click: (!disabled).then_some(Event::OptionClick(index)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AutocompleteBuilder;
    use crate::event::Key;
    use crate::selection::Value;

    fn fruits() -> AutocompleteBuilder<String> {
        AutocompleteBuilder::text(["Apple", "Banana", "Cherry"]).id("fruit")
    }

    #[test]
    fn test_closed_bindings() {
        let ac = fruits().build().unwrap();
        let input = input(&ac);
        assert_eq!(input.role.as_str(), "combobox");
        assert!(!input.aria_expanded);
        assert_eq!(input.aria_controls, None);
        assert_eq!(input.aria_activedescendant, None);
        assert_eq!(input.aria_autocomplete, "list");
        assert_eq!(root(&ac).aria_owns, None);
        assert!(popup(&ac).is_none());
        assert!(option(&ac, 0).is_none());
    }

    #[test]
    fn test_ids() {
        let mut ac = fruits().build().unwrap();
        ac.dispatch(Event::Focus);
        assert_eq!(input_label(&ac).id, "fruit-label");
        assert_eq!(input_label(&ac).html_for, "fruit");
        let listbox = listbox(&ac);
        assert_eq!(listbox.id, "fruit-popup");
        assert_eq!(listbox.aria_labelledby, "fruit-label");
        assert_eq!(root(&ac).aria_owns.as_deref(), Some("fruit-popup"));
        assert_eq!(option(&ac, 2).unwrap().id, "fruit-option-2");
    }

    #[test]
    fn test_option_state() {
        let mut ac = fruits()
            .option_disabled(|o: &String| o == "Banana")
            .default_value(Value::Single(Some("Cherry".to_string())))
            .build()
            .unwrap();
        ac.dispatch(Event::Focus);
        ac.dispatch(Event::key(Key::ArrowDown));

        let apple = option(&ac, 0).unwrap();
        assert!(apple.data_focus);
        assert!(!apple.aria_selected);
        assert_eq!(apple.on_click, Some(Event::OptionClick(0)));

        let banana = option(&ac, 1).unwrap();
        assert!(banana.aria_disabled);
        assert_eq!(banana.on_mouse_over, None);
        assert_eq!(banana.on_click, None);

        let cherry = option(&ac, 2).unwrap();
        assert!(cherry.aria_selected);
        assert_eq!(cherry.role.as_str(), "option");
    }

    #[test]
    fn test_popup_content() {
        let mut ac = fruits().build().unwrap();
        ac.dispatch(Event::Focus);
        let shown = popup(&ac).unwrap();
        assert_eq!(shown.content, PopupContent::Listbox);
        assert_eq!(shown.role, Role::Presentation);
        assert_eq!(shown.loading, None);

        ac.dispatch(Event::input("zzz"));
        assert_eq!(
            popup(&ac).unwrap().content,
            PopupContent::NoOptions("No options".to_string())
        );

        ac.set_loading(true);
        let shown = popup(&ac).unwrap();
        assert_eq!(shown.loading.as_deref(), Some("Loading…"));
        assert_eq!(shown.content, PopupContent::Empty);
    }

    #[test]
    fn test_loading_shown_alongside_options() {
        let mut ac = AutocompleteBuilder::text(["A", "B"])
            .loading(true)
            .loading_text("Fetching…")
            .build()
            .unwrap();
        ac.dispatch(Event::Focus);
        let shown = popup(&ac).unwrap();
        assert_eq!(shown.loading.as_deref(), Some("Fetching…"));
        assert_eq!(shown.content, PopupContent::Listbox);

        ac.set_loading(false);
        assert_eq!(popup(&ac).unwrap().loading, None);
    }

    #[test]
    fn test_free_solo_loading_popup() {
        let mut ac = fruits().free_solo(true).loading(true).build().unwrap();
        ac.dispatch(Event::Focus);
        ac.dispatch(Event::input("zzz"));
        let shown = popup(&ac).unwrap();
        assert_eq!(shown.loading.as_deref(), Some("Loading…"));
        assert_eq!(shown.content, PopupContent::Empty);
    }

    #[test]
    fn test_free_solo_hides_empty_popup_and_indicator() {
        let mut ac = fruits().free_solo(true).build().unwrap();
        ac.dispatch(Event::Focus);
        ac.dispatch(Event::input("zzz"));
        assert!(popup(&ac).is_none());
        assert!(popup_indicator(&ac).is_none());
    }

    #[test]
    fn test_popup_tracks_anchor_and_revision() {
        let mut ac = fruits().build().unwrap();
        ac.dispatch(Event::Focus);
        let before = popup(&ac).unwrap().revision;
        ac.set_anchor(Some(Anchor { id: 3, width: Some(320.0) }));
        let after = popup(&ac).unwrap();
        assert!(after.revision > before);
        assert_eq!(after.width, Some(320.0));
    }

    #[test]
    fn test_indicators() {
        let mut ac = fruits().build().unwrap();
        let clear = clear_indicator(&ac).unwrap();
        assert!(!clear.visible);
        let indicator = popup_indicator(&ac).unwrap();
        assert_eq!(indicator.title, "Open popup");

        ac.dispatch(Event::Focus);
        ac.dispatch(Event::input("a"));
        assert!(clear_indicator(&ac).unwrap().visible);
        assert_eq!(popup_indicator(&ac).unwrap().title, "Close popup");

        let ac = fruits().disable_clearable(true).build().unwrap();
        assert!(clear_indicator(&ac).is_none());
    }

    #[test]
    fn test_tags() {
        let mut ac = fruits()
            .multiple(true)
            .default_value(Value::Multiple(vec!["Apple".to_string(), "Cherry".to_string()]))
            .build()
            .unwrap();
        ac.dispatch(Event::Focus);
        ac.dispatch(Event::key(Key::ArrowLeft));

        let tags = tags(&ac);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].label, "Cherry");
        assert!(tags[1].focused);
        assert!(!tags[0].focused);
        assert_eq!(tags[0].on_delete, Event::TagDelete(0));
        assert!(tag(&ac, 2).is_none());
    }

    #[test]
    fn test_inline_completion_bindings() {
        let mut ac = fruits().auto_complete(true).build().unwrap();
        ac.dispatch(Event::Focus);
        ac.dispatch(Event::input("b"));
        ac.dispatch(Event::key(Key::ArrowDown));
        let input = input(&ac);
        assert_eq!(input.aria_autocomplete, "both");
        assert_eq!(input.value, "Banana");
        assert_eq!(input.selection, Some(1..6));
    }
}
