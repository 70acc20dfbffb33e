//! Autocomplete engine
//!
//! [`Autocomplete`] composes the filter, grouping, navigation, selection and
//! popup machines into one state container driven by [`Autocomplete::dispatch`].
//! Each dispatched event runs to completion: handlers propose state changes,
//! the visible option list is recomputed, the highlight is reset or
//! re-validated, and the resulting notifications are returned and then
//! delivered to the registered callbacks.
//!
//! # Example
//!
//! ```rust
//! use blinc_autocomplete::{AutocompleteBuilder, Event, Key, Value};
//!
//! let mut ac = AutocompleteBuilder::text(["Apple", "Banana", "Cherry"])
//!     .build()
//!     .unwrap();
//!
//! ac.dispatch(Event::Focus);
//! ac.dispatch(Event::input("an"));
//! ac.dispatch(Event::key(Key::ArrowDown));
//! let response = ac.dispatch(Event::key(Key::Enter));
//!
//! assert_eq!(response.value_change(), Some(&Value::Single(Some("Banana".to_string()))));
//! assert_eq!(ac.input_value(), "Banana");
//! assert!(!ac.is_open());
//! ```

use std::ops::Range;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::AutocompleteFlags;
use crate::controlled::Controlled;
use crate::error::{AutocompleteError, Result};
use crate::event::{Event, Key, KeyboardEvent};
use crate::filter::{
    filter_custom, filter_indexed, CustomFilterFn, FilterConfig, FilterState, FilteredOption,
};
use crate::group::{group_options, OptionGroup, OptionList};
use crate::navigation::{self, Direction, HighlightReason, NavigationOptions, Step, PAGE_SIZE};
use crate::notification::{
    Callbacks, ChangeReason, FocusTarget, InputChangeReason, Notification, Response,
};
use crate::option::{EqualsFn, FreeTextFn, OptionProjections, PredicateFn, TextFn};
use crate::popup::{PopupState, PopupTrigger};
use crate::selection::{self, CommitKind, Value};

/// Opaque reference to the element the popup is anchored to
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Renderer-side element id
    pub id: u64,
    /// Anchor width, used to size the popup
    pub width: Option<f32>,
}

/// Inline completion shown in the input during keyboard navigation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineCompletion {
    /// Text to display in the input
    pub text: String,
    /// Untyped suffix to select, in char offsets
    pub selection: Option<Range<usize>>,
}

#[derive(Clone)]
struct Snapshot {
    open: bool,
    input: String,
}

// ============================================================================
// Engine
// ============================================================================

/// Headless autocomplete state machine
pub struct Autocomplete<T> {
    id: String,
    flags: AutocompleteFlags,
    filter: FilterConfig,
    custom_filter: Option<CustomFilterFn<T>>,
    projections: OptionProjections<T>,
    callbacks: Callbacks<T>,
    options: Vec<T>,
    value: Controlled<Value<T>>,
    input: Controlled<String>,
    popup: Controlled<PopupState>,
    focused: bool,
    focused_tag: Option<usize>,
    highlighted: Option<usize>,
    highlight_reason: HighlightReason,
    pristine: bool,
    completion: Option<InlineCompletion>,
    visible: OptionList<T>,
    anchor: Option<Anchor>,
    revision: u64,
}

impl<T: Clone + PartialEq + 'static> Autocomplete<T> {
    /// Start building an autocomplete over `options`
    pub fn builder(options: impl IntoIterator<Item = T>) -> AutocompleteBuilder<T> {
        AutocompleteBuilder::new(options)
    }
}

impl<T: Clone + 'static> Autocomplete<T> {
    // ------------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------------

    /// Instance id, the prefix of every generated element id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current configuration flags
    pub fn flags(&self) -> &AutocompleteFlags {
        &self.flags
    }

    /// Projections used to inspect options
    pub fn projections(&self) -> &OptionProjections<T> {
        &self.projections
    }

    /// All candidate options
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// The committed value
    pub fn value(&self) -> &Value<T> {
        self.value.get()
    }

    /// The text the user typed (or the reset text after a commit)
    pub fn input_value(&self) -> &str {
        self.input.get()
    }

    /// Text to render in the input, including an inline completion
    pub fn display_value(&self) -> &str {
        match &self.completion {
            Some(completion) => &completion.text,
            None => self.input.get(),
        }
    }

    /// Inline completion, if keyboard navigation produced one
    pub fn completion(&self) -> Option<&InlineCompletion> {
        self.completion.as_ref()
    }

    /// Whether the popup is shown
    pub fn is_open(&self) -> bool {
        self.popup.get().is_open()
    }

    /// Whether the input has focus
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Keyboard-focused tag, `None` when the input has focus
    pub fn focused_tag(&self) -> Option<usize> {
        self.focused_tag
    }

    /// Flat index of the highlighted option
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    /// What moved the highlight last
    pub fn highlight_reason(&self) -> HighlightReason {
        self.highlight_reason
    }

    /// The highlighted option
    pub fn highlighted_option(&self) -> Option<&T> {
        self.highlighted
            .and_then(|index| self.visible.get(index))
            .map(|entry| &entry.option)
    }

    /// Filtered options, flat or grouped; empty while the popup is closed
    pub fn visible_options(&self) -> &OptionList<T> {
        &self.visible
    }

    /// Filtered options in flat order
    pub fn filtered_options(&self) -> Vec<&FilteredOption<T>> {
        self.visible.iter().collect()
    }

    /// Option groups, `None` without a group key projection
    pub fn groups(&self) -> Option<&[OptionGroup<T>]> {
        self.visible.groups()
    }

    /// There is input text or a committed value
    pub fn is_dirty(&self) -> bool {
        !self.input.get().is_empty() || !self.value.get().is_empty()
    }

    /// Whether `option` is part of the value
    pub fn is_selected(&self, option: &T) -> bool {
        self.value.get().contains(option, &self.projections)
    }

    /// Whether the visible option at `index` can't be highlighted or committed
    pub fn is_disabled_at(&self, index: usize) -> bool {
        self.visible
            .get(index)
            .map_or(true, |entry| self.projections.is_disabled(&entry.option))
    }

    /// Element the popup is anchored to
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Bumped after every dispatched event and owner update
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the owner reports options are loading
    pub fn is_loading(&self) -> bool {
        self.flags.loading
    }

    // ------------------------------------------------------------------------
    // Owner-side updates
    //
    // These mirror values the owner holds and never fire callbacks.
    // ------------------------------------------------------------------------

    /// Replace the candidate options
    pub fn set_options(&mut self, options: Vec<T>) {
        let snapshot = self.snapshot();
        tracing::trace!("Options replaced: {} entries", options.len());
        self.options = options;
        self.settle_quietly(snapshot);
    }

    /// Re-supply the controlled value, or release control with `None`
    pub fn set_value(&mut self, value: Option<Value<T>>) -> Result<()> {
        if let Some(value) = &value {
            if value.is_multiple() != self.flags.multiple {
                return Err(AutocompleteError::ValueModeMismatch {
                    multiple: self.flags.multiple,
                });
            }
        }
        let snapshot = self.snapshot();
        let before = self.value.get().clone();
        self.value.sync(value);
        if !before.same_as(self.value.get(), &self.projections) {
            let text = selection::input_text_for(self.value.get(), &self.projections);
            self.input.propose(text);
            self.pristine = true;
            self.completion = None;
        }
        self.settle_quietly(snapshot);
        Ok(())
    }

    /// Re-supply the controlled input text, or release control with `None`
    pub fn set_input_value(&mut self, input: Option<String>) {
        let snapshot = self.snapshot();
        self.input.sync(input);
        if self.input.get() != &snapshot.input {
            self.completion = None;
        }
        self.settle_quietly(snapshot);
    }

    /// Re-supply the controlled open state, or release control with `None`
    pub fn set_open(&mut self, open: Option<bool>) {
        let snapshot = self.snapshot();
        self.popup.sync(open.map(PopupState::from));
        self.settle_quietly(snapshot);
    }

    /// Update the loading flag
    pub fn set_loading(&mut self, loading: bool) {
        self.flags.loading = loading;
        self.revision += 1;
    }

    /// Update the popup anchor
    pub fn set_anchor(&mut self, anchor: Option<Anchor>) {
        self.anchor = anchor;
        self.revision += 1;
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Process one event
    pub fn dispatch(&mut self, event: Event) -> Response<T> {
        tracing::trace!("Autocomplete {} event: {:?}", self.id, event);
        let snapshot = self.snapshot();
        let mut response = Response::default();

        match event {
            Event::Focus => self.handle_focus(&mut response),
            Event::Blur => self.handle_blur(&mut response),
            Event::InputChange(text) => self.handle_input_change(text, &mut response),
            Event::KeyDown(key) => {
                response.handled = self.handle_key_down(&key, &mut response);
            }
            Event::RootMouseDown { on_input } => {
                // Keep focus in the input
                response.handled = !on_input;
            }
            Event::RootClick => {
                if !self.focused {
                    response.push(Notification::FocusRequest(FocusTarget::Input));
                }
            }
            Event::InputMouseDown => {
                if self.input.get().is_empty() {
                    self.request_popup(PopupTrigger::InputMouseDown, &mut response);
                }
            }
            Event::ListboxMouseDown => response.handled = true,
            Event::OptionHover(index) => self.handle_option_hover(index, &mut response),
            Event::OptionClick(index) => {
                response.handled = self.handle_option_click(index, &mut response);
            }
            Event::ClearClick => {
                self.clear(&mut response);
                response.handled = true;
            }
            Event::PopupIndicatorClick => {
                self.request_popup(PopupTrigger::Toggle, &mut response);
                if !self.focused {
                    response.push(Notification::FocusRequest(FocusTarget::Input));
                }
                response.handled = true;
            }
            Event::TagDelete(index) => {
                response.handled = self.remove_tag(index, &mut response);
            }
        }

        self.settle(snapshot, &mut response);
        self.revision += 1;
        self.callbacks.deliver(&response.notifications);
        response
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            open: self.is_open(),
            input: self.input.get().clone(),
        }
    }

    /// Recompute the visible list and fix up the highlight
    fn settle(&mut self, before: Snapshot, response: &mut Response<T>) {
        self.refresh_options();

        // The owner may have shrunk the value under the focused tag
        if self
            .focused_tag
            .is_some_and(|tag| tag >= self.value.get().len())
        {
            self.focused_tag = None;
        }

        if !self.is_open() {
            self.completion = None;
            self.set_highlight(None, HighlightReason::Auto, response);
            return;
        }

        let mask = self.disabled_mask();
        if !before.open || self.input.get() != &before.input {
            let next =
                navigation::next_highlight(&mask, None, Step::Reset, self.navigation_options());
            self.set_highlight(next, HighlightReason::Auto, response);
        } else {
            let next = navigation::revalidate(&mask, self.highlighted);
            if next != self.highlighted {
                self.set_highlight(next, HighlightReason::Auto, response);
            }
        }
    }

    fn settle_quietly(&mut self, before: Snapshot) {
        let mut scratch = Response::default();
        self.settle(before, &mut scratch);
        self.revision += 1;
    }

    // ------------------------------------------------------------------------
    // Derived option list
    // ------------------------------------------------------------------------

    /// Query the filter runs with; empty while the input still shows the value
    fn filter_query(&self) -> &str {
        let input = self.input.get().as_str();
        if self.pristine {
            if let Value::Single(Some(selected)) = self.value.get() {
                if self.projections.label(selected) == input {
                    return "";
                }
            }
        }
        input
    }

    fn refresh_options(&mut self) {
        if !self.is_open() {
            self.visible = OptionList::default();
            return;
        }

        let visible = {
            let query = self.filter_query();
            let value = self.value.get();
            let exclude_selected = self.flags.filter_selected_options;
            let candidates = self
                .options
                .iter()
                .enumerate()
                .filter(|(_, option)| !(exclude_selected && value.contains(option, &self.projections)));

            let filtered = match &self.custom_filter {
                Some(filter) => {
                    let pool: Vec<T> = candidates.map(|(_, option)| option.clone()).collect();
                    filter_custom(filter, &pool, &self.options, query, &self.projections)
                }
                None => filter_indexed(candidates, query, &self.filter, &self.projections),
            };

            if self.projections.is_grouped() {
                OptionList::Grouped(group_options(&filtered, |option: &T| {
                    self.projections.group_key(option).unwrap_or_default()
                }))
            } else {
                OptionList::Flat(filtered)
            }
        };
        self.visible = visible;
    }

    fn disabled_mask(&self) -> Vec<bool> {
        self.visible
            .iter()
            .map(|entry| self.projections.is_disabled(&entry.option))
            .collect()
    }

    fn navigation_options(&self) -> NavigationOptions {
        NavigationOptions {
            auto_highlight: self.flags.auto_highlight,
            disable_list_wrap: self.flags.disable_list_wrap,
            include_input_in_list: self.flags.include_input_in_list,
        }
    }

    // ------------------------------------------------------------------------
    // Proposals
    // ------------------------------------------------------------------------

    fn set_highlight(&mut self, index: Option<usize>, reason: HighlightReason, response: &mut Response<T>) {
        if self.highlighted == index {
            self.highlight_reason = reason;
            return;
        }
        tracing::trace!("Highlight {:?} -> {:?} ({:?})", self.highlighted, index, reason);
        self.highlighted = index;
        self.highlight_reason = reason;
        let option = index
            .and_then(|i| self.visible.get(i))
            .map(|entry| entry.option.clone());
        response.push(Notification::HighlightChange { index, option, reason });
    }

    fn request_popup(&mut self, trigger: PopupTrigger, response: &mut Response<T>) {
        let Some(next) = self.popup.get().on_trigger(trigger) else {
            return;
        };
        tracing::debug!(
            "Autocomplete {} popup {} ({:?})",
            self.id,
            if next.is_open() { "open" } else { "close" },
            trigger
        );
        self.popup.propose(next);
        response.push(if next.is_open() {
            Notification::OpenRequested(trigger)
        } else {
            Notification::CloseRequested(trigger)
        });
    }

    fn set_input_text(&mut self, text: String, reason: InputChangeReason, response: &mut Response<T>) {
        self.completion = None;
        if self.input.get() == &text {
            return;
        }
        self.input.propose(text.clone());
        response.push(Notification::InputChange { value: text, reason });
    }

    fn propose_value(&mut self, next: Value<T>, reason: ChangeReason, response: &mut Response<T>) {
        if next.same_as(self.value.get(), &self.projections) {
            return;
        }
        tracing::debug!(
            "Autocomplete {} value change: {} entries ({:?}, controlled={})",
            self.id,
            next.len(),
            reason,
            self.value.is_controlled()
        );
        self.value.propose(next.clone());
        response.push(Notification::Change { value: next, reason });
    }

    /// Reset the input to represent `value`
    fn reset_input(&mut self, value: &Value<T>, response: &mut Response<T>) {
        let text = selection::input_text_for(value, &self.projections);
        self.set_input_text(text, InputChangeReason::Reset, response);
        self.pristine = true;
    }

    fn select_option(&mut self, option: T, created: bool, response: &mut Response<T>) {
        let (next, kind) = self.value.get().commit(option, &self.projections);
        let reason = match kind {
            CommitKind::Removed => ChangeReason::RemoveOption,
            CommitKind::Added if created => ChangeReason::CreateOption,
            CommitKind::Added => ChangeReason::SelectOption,
        };
        self.reset_input(&next, response);
        self.propose_value(next, reason, response);
        if !self.flags.disable_close_on_select {
            self.request_popup(PopupTrigger::Commit, response);
        }
    }

    /// The single value's label is what the input shows
    fn input_shows_value(&self) -> bool {
        match self.value.get() {
            Value::Single(Some(selected)) => self.projections.label(selected) == *self.input.get(),
            _ => false,
        }
    }

    fn commit_free_text(&mut self, response: &mut Response<T>) -> bool {
        if !self.flags.free_solo {
            return false;
        }
        let text = self.input.get().clone();
        if text.is_empty() || self.input_shows_value() {
            return false;
        }
        let Some(option) = self.projections.from_free_text(&text) else {
            return false;
        };
        tracing::debug!("Autocomplete {} free text commit: {:?}", self.id, text);
        self.select_option(option, true, response);
        true
    }

    fn clear(&mut self, response: &mut Response<T>) {
        tracing::debug!("Autocomplete {} cleared", self.id);
        self.set_input_text(String::new(), InputChangeReason::Clear, response);
        self.pristine = true;
        self.focused_tag = None;
        self.propose_value(Value::empty(self.flags.multiple), ChangeReason::Clear, response);
    }

    // ------------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------------

    fn handle_focus(&mut self, response: &mut Response<T>) {
        self.focused = true;
        if !self.flags.disable_open_on_focus {
            self.request_popup(PopupTrigger::Focus, response);
        }
    }

    fn handle_blur(&mut self, response: &mut Response<T>) {
        self.focused = false;
        self.focused_tag = None;
        self.completion = None;

        if self.flags.debug && !self.input.get().is_empty() {
            return;
        }

        let highlighted = if self.is_open() {
            self.highlighted_option().cloned()
        } else {
            None
        };
        let committed = self.flags.auto_select
            && match highlighted {
                Some(option) => self.commit_on_blur(option, response),
                None => self.commit_free_text(response),
            };

        if !committed && !self.flags.free_solo {
            let value = self.value.get().clone();
            self.reset_input(&value, response);
        }
        self.request_popup(PopupTrigger::Blur, response);
    }

    /// Auto-select on blur only ever adds to a multi-select value
    fn commit_on_blur(&mut self, option: T, response: &mut Response<T>) -> bool {
        if self.flags.multiple && self.is_selected(&option) {
            return false;
        }
        let (next, _) = self.value.get().commit(option, &self.projections);
        self.reset_input(&next, response);
        self.propose_value(next, ChangeReason::Blur, response);
        true
    }

    fn handle_input_change(&mut self, text: String, response: &mut Response<T>) {
        if *self.input.get() == text {
            return;
        }
        let emptied = text.is_empty();
        self.set_input_text(text, InputChangeReason::Input, response);
        self.pristine = false;
        self.focused_tag = None;

        if emptied && !self.flags.multiple && !self.flags.disable_clearable {
            self.propose_value(Value::Single(None), ChangeReason::Clear, response);
        }
        if self.focused {
            self.request_popup(PopupTrigger::InputChange, response);
        }
    }

    fn handle_key_down(&mut self, event: &KeyboardEvent, response: &mut Response<T>) -> bool {
        if event.composing {
            return false;
        }

        if let Some(tag) = self.focused_tag {
            match event.key {
                Key::ArrowLeft | Key::ArrowRight => {}
                Key::Backspace => {
                    self.remove_focused_tag(tag, response);
                    return true;
                }
                _ => {
                    self.focused_tag = None;
                    response.push(Notification::FocusRequest(FocusTarget::Input));
                }
            }
        }

        let page = PAGE_SIZE as isize;
        match event.key {
            Key::Home if self.is_open() => {
                self.navigate(Step::Start, response);
                true
            }
            Key::End if self.is_open() => {
                self.navigate(Step::End, response);
                true
            }
            Key::PageUp => self.navigate_or_open(Step::By(-page), response),
            Key::PageDown => self.navigate_or_open(Step::By(page), response),
            Key::ArrowUp => self.navigate_or_open(Step::By(-1), response),
            Key::ArrowDown => self.navigate_or_open(Step::By(1), response),
            Key::ArrowLeft => self.move_tag_focus(Direction::Previous, response),
            Key::ArrowRight => self.move_tag_focus(Direction::Next, response),
            Key::Enter => self.handle_enter(response),
            Key::Escape => self.handle_escape(response),
            Key::Backspace => self.handle_backspace(response),
            _ => false,
        }
    }

    fn navigate_or_open(&mut self, step: Step, response: &mut Response<T>) -> bool {
        if self.is_open() {
            self.navigate(step, response);
        } else {
            self.request_popup(PopupTrigger::Navigation, response);
        }
        true
    }

    fn navigate(&mut self, step: Step, response: &mut Response<T>) {
        let mask = self.disabled_mask();
        let next = navigation::next_highlight(&mask, self.highlighted, step, self.navigation_options());
        self.set_highlight(next, HighlightReason::Keyboard, response);
        if self.flags.auto_complete {
            self.update_completion();
        }
    }

    fn update_completion(&mut self) {
        self.completion = self.highlighted_option().map(|option| {
            let label = self.projections.label(option);
            let typed = self.input.get();
            let selection = (!typed.is_empty()
                && label.to_lowercase().starts_with(&typed.to_lowercase()))
            .then(|| typed.chars().count()..label.chars().count());
            InlineCompletion {
                text: label,
                selection,
            }
        });
    }

    fn handle_enter(&mut self, response: &mut Response<T>) -> bool {
        if self.is_open() {
            if let Some(option) = self.highlighted_option().cloned() {
                self.select_option(option, false, response);
                return true;
            }
        }
        self.commit_free_text(response)
    }

    fn handle_escape(&mut self, response: &mut Response<T>) -> bool {
        let open = self.is_open();
        if self.flags.clear_on_escape && (open || self.is_dirty()) {
            self.clear(response);
            self.request_popup(PopupTrigger::Escape, response);
            true
        } else if open {
            self.request_popup(PopupTrigger::Escape, response);
            true
        } else {
            false
        }
    }

    fn handle_backspace(&mut self, response: &mut Response<T>) -> bool {
        if !self.flags.multiple || !self.input.get().is_empty() || self.value.get().is_empty() {
            return false;
        }
        let next = self.value.get().without_last();
        self.propose_value(next, ChangeReason::RemoveOption, response);
        true
    }

    fn move_tag_focus(&mut self, direction: Direction, response: &mut Response<T>) -> bool {
        if !self.flags.multiple {
            return false;
        }
        let next = selection::next_tag(
            self.focused_tag,
            self.value.get().len(),
            self.input.get().is_empty(),
            direction,
        );
        if next == self.focused_tag {
            return false;
        }
        if next.is_some() {
            self.request_popup(PopupTrigger::TagFocus, response);
        }
        self.focused_tag = next;
        response.push(Notification::FocusRequest(
            next.map_or(FocusTarget::Input, FocusTarget::Tag),
        ));
        true
    }

    fn remove_focused_tag(&mut self, tag: usize, response: &mut Response<T>) {
        let next = self.value.get().without(tag);
        let remaining = next.len();
        self.propose_value(next, ChangeReason::RemoveOption, response);
        self.focused_tag = selection::tag_after_removal(tag, remaining);
        response.push(Notification::FocusRequest(
            self.focused_tag.map_or(FocusTarget::Input, FocusTarget::Tag),
        ));
    }

    fn remove_tag(&mut self, index: usize, response: &mut Response<T>) -> bool {
        if !self.flags.multiple || index >= self.value.get().len() {
            return false;
        }
        let next = self.value.get().without(index);
        self.propose_value(next, ChangeReason::RemoveOption, response);
        true
    }

    fn handle_option_hover(&mut self, index: usize, response: &mut Response<T>) {
        if !self.is_open() || self.is_disabled_at(index) {
            return;
        }
        self.set_highlight(Some(index), HighlightReason::Mouse, response);
    }

    fn handle_option_click(&mut self, index: usize, response: &mut Response<T>) -> bool {
        if !self.is_open() || self.is_disabled_at(index) {
            return false;
        }
        let Some(option) = self.visible.get(index).map(|entry| entry.option.clone()) else {
            return false;
        };
        self.select_option(option, false, response);
        true
    }
}

impl<T> std::fmt::Debug for Autocomplete<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autocomplete")
            .field("id", &self.id)
            .field("options", &self.options.len())
            .field("open", self.popup.get())
            .field("focused", &self.focused)
            .field("highlighted", &self.highlighted)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Autocomplete`]
///
/// ```rust
/// use blinc_autocomplete::{AutocompleteBuilder, Value};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Film {
///     title: &'static str,
///     year: u16,
/// }
///
/// let ac = AutocompleteBuilder::new(vec![
///     Film { title: "Alien", year: 1979 },
///     Film { title: "Heat", year: 1995 },
/// ])
/// .option_label(|film: &Film| film.title.to_string())
/// .option_disabled(|film: &Film| film.year < 1980)
/// .multiple(true)
/// .build()
/// .unwrap();
///
/// assert_eq!(ac.value(), &Value::Multiple(vec![]));
/// ```
pub struct AutocompleteBuilder<T> {
    options: Vec<T>,
    flags: AutocompleteFlags,
    filter: FilterConfig,
    custom_filter: Option<CustomFilterFn<T>>,
    label: Option<TextFn<T>>,
    equals: EqualsFn<T>,
    disabled: Option<PredicateFn<T>>,
    group_by: Option<TextFn<T>>,
    stringify: Option<TextFn<T>>,
    free_text: Option<FreeTextFn<T>>,
    id: Option<String>,
    default_value: Option<Value<T>>,
    value: Option<Value<T>>,
    input_value: Option<String>,
    open: Option<bool>,
    anchor: Option<Anchor>,
    callbacks: Callbacks<T>,
}

impl<T: Clone + PartialEq + 'static> AutocompleteBuilder<T> {
    /// Builder comparing options with `PartialEq`
    pub fn new(options: impl IntoIterator<Item = T>) -> Self {
        Self::with_equality(options, |a: &T, b: &T| a == b)
    }
}

impl AutocompleteBuilder<String> {
    /// Plain string options: identity label, free text commits the typed string
    pub fn text<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(options.into_iter().map(Into::into))
            .option_label(|option: &String| option.clone())
            .free_text(|text: &str| text.to_string())
    }
}

impl<T: Clone + 'static> AutocompleteBuilder<T> {
    /// Builder for options without `PartialEq`
    pub fn with_equality<E>(options: impl IntoIterator<Item = T>, equals: E) -> Self
    where
        E: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            options: options.into_iter().collect(),
            flags: AutocompleteFlags::default(),
            filter: FilterConfig::default(),
            custom_filter: None,
            label: None,
            equals: Arc::new(equals),
            disabled: None,
            group_by: None,
            stringify: None,
            free_text: None,
            id: None,
            default_value: None,
            value: None,
            input_value: None,
            open: None,
            anchor: None,
            callbacks: Callbacks::default(),
        }
    }

    /// Replace all flags at once
    pub fn flags(mut self, flags: AutocompleteFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Allow multiple values
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.flags.multiple = multiple;
        self
    }

    /// Accept arbitrary text as a value
    pub fn free_solo(mut self, free_solo: bool) -> Self {
        self.flags.free_solo = free_solo;
        self
    }

    pub fn auto_highlight(mut self, enabled: bool) -> Self {
        self.flags.auto_highlight = enabled;
        self
    }

    pub fn auto_select(mut self, enabled: bool) -> Self {
        self.flags.auto_select = enabled;
        self
    }

    pub fn auto_complete(mut self, enabled: bool) -> Self {
        self.flags.auto_complete = enabled;
        self
    }

    pub fn disable_clearable(mut self, disabled: bool) -> Self {
        self.flags.disable_clearable = disabled;
        self
    }

    pub fn disable_close_on_select(mut self, disabled: bool) -> Self {
        self.flags.disable_close_on_select = disabled;
        self
    }

    pub fn disable_list_wrap(mut self, disabled: bool) -> Self {
        self.flags.disable_list_wrap = disabled;
        self
    }

    pub fn disable_open_on_focus(mut self, disabled: bool) -> Self {
        self.flags.disable_open_on_focus = disabled;
        self
    }

    pub fn clear_on_escape(mut self, enabled: bool) -> Self {
        self.flags.clear_on_escape = enabled;
        self
    }

    pub fn filter_selected_options(mut self, enabled: bool) -> Self {
        self.flags.filter_selected_options = enabled;
        self
    }

    pub fn include_input_in_list(mut self, enabled: bool) -> Self {
        self.flags.include_input_in_list = enabled;
        self
    }

    /// Keep the popup open on blur while there is input text
    pub fn debug(mut self, enabled: bool) -> Self {
        self.flags.debug = enabled;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.flags.loading = loading;
        self
    }

    pub fn loading_text(mut self, text: impl Into<String>) -> Self {
        self.flags.loading_text = text.into();
        self
    }

    pub fn no_options_text(mut self, text: impl Into<String>) -> Self {
        self.flags.no_options_text = text.into();
        self
    }

    /// Label projection (required)
    pub fn option_label<F>(mut self, label: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.label = Some(Arc::new(label));
        self
    }

    pub fn option_disabled<F>(mut self, disabled: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Arc::new(disabled));
        self
    }

    /// Group key projection; options with equal keys must be adjacent
    pub fn group_by<F>(mut self, group_by: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.group_by = Some(Arc::new(group_by));
        self
    }

    /// Option identity
    pub fn equals<F>(mut self, equals: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.equals = Arc::new(equals);
        self
    }

    /// Text the default filter matches against, instead of the label
    pub fn stringify<F>(mut self, stringify: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.stringify = Some(Arc::new(stringify));
        self
    }

    /// Build an option from committed free text (required with `free_solo`)
    pub fn free_text<F>(mut self, free_text: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        self.free_text = Some(Arc::new(free_text));
        self
    }

    pub fn filter_config(mut self, config: FilterConfig) -> Self {
        self.filter = config;
        self
    }

    /// Replace the default filter entirely
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&[T], &FilterState<'_, T>) -> Vec<T> + Send + Sync + 'static,
    {
        self.custom_filter = Some(Arc::new(filter));
        self
    }

    /// Explicit id (otherwise `autocomplete-{uuid}`)
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Initial value of an uncontrolled engine
    pub fn default_value(mut self, value: Value<T>) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Controlled value
    pub fn value(mut self, value: Value<T>) -> Self {
        self.value = Some(value);
        self
    }

    /// Controlled input text
    pub fn input_value(mut self, input: impl Into<String>) -> Self {
        self.input_value = Some(input.into());
        self
    }

    /// Controlled open state
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value<T>, ChangeReason) + Send + Sync + 'static,
    {
        self.callbacks.on_change = Some(Arc::new(callback));
        self
    }

    pub fn on_input_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, InputChangeReason) + Send + Sync + 'static,
    {
        self.callbacks.on_input_change = Some(Arc::new(callback));
        self
    }

    pub fn on_open<F>(mut self, callback: F) -> Self
    where
        F: Fn(PopupTrigger) + Send + Sync + 'static,
    {
        self.callbacks.on_open = Some(Arc::new(callback));
        self
    }

    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn(PopupTrigger) + Send + Sync + 'static,
    {
        self.callbacks.on_close = Some(Arc::new(callback));
        self
    }

    pub fn on_highlight_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&T>, HighlightReason) + Send + Sync + 'static,
    {
        self.callbacks.on_highlight_change = Some(Arc::new(callback));
        self
    }

    /// Validate the configuration and create the engine
    pub fn build(self) -> Result<Autocomplete<T>> {
        let label = self
            .label
            .ok_or(AutocompleteError::MissingProjection("option_label"))?;
        if self.flags.free_solo && self.free_text.is_none() {
            return Err(AutocompleteError::MissingProjection("free_text"));
        }

        let multiple = self.flags.multiple;
        for value in [&self.default_value, &self.value].into_iter().flatten() {
            if value.is_multiple() != multiple {
                return Err(AutocompleteError::ValueModeMismatch { multiple });
            }
        }

        let projections = OptionProjections {
            label,
            equals: self.equals,
            disabled: self.disabled,
            group_by: self.group_by,
            stringify: self.stringify,
            free_text: self.free_text,
        };

        let value = Controlled::new(
            self.value,
            self.default_value.unwrap_or_else(|| Value::empty(multiple)),
            "value",
        );
        let initial_input = selection::input_text_for(value.get(), &projections);
        let input = Controlled::new(self.input_value, initial_input, "input_value");
        let popup = Controlled::new(self.open.map(PopupState::from), PopupState::Closed, "open");

        let id = self
            .id
            .unwrap_or_else(|| format!("autocomplete-{}", Uuid::new_v4().simple()));
        tracing::debug!(
            "Autocomplete {} created: {} options, multiple={}, free_solo={}",
            id,
            self.options.len(),
            multiple,
            self.flags.free_solo
        );

        let mut engine = Autocomplete {
            id,
            flags: self.flags,
            filter: self.filter,
            custom_filter: self.custom_filter,
            projections,
            callbacks: self.callbacks,
            options: self.options,
            value,
            input,
            popup,
            focused: false,
            focused_tag: None,
            highlighted: None,
            highlight_reason: HighlightReason::Auto,
            pristine: true,
            completion: None,
            visible: OptionList::default(),
            anchor: self.anchor,
            revision: 0,
        };
        let snapshot = Snapshot {
            open: false,
            input: engine.input.get().clone(),
        };
        let mut scratch = Response::default();
        engine.settle(snapshot, &mut scratch);
        Ok(engine)
    }
}
