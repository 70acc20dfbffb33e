//! Popup open/close state machine
//!
//! Transitions follow the same shape as Blinc's stateful elements: the
//! current state maps a trigger to `Some(next)` or `None` when the trigger
//! doesn't apply.
//!
//! ```rust
//! use blinc_autocomplete::popup::{PopupState, PopupTrigger};
//!
//! let state = PopupState::Closed;
//! assert_eq!(state.on_trigger(PopupTrigger::Focus), Some(PopupState::Open));
//! assert_eq!(state.on_trigger(PopupTrigger::Escape), None);
//! ```

/// Visibility of the suggestion popup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PopupState {
    /// Popup hidden
    #[default]
    Closed,
    /// Popup shown
    Open,
}

/// Things that can open or close the popup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PopupTrigger {
    /// The input received focus
    Focus,
    /// The input text changed while focused
    InputChange,
    /// Arrow or page key navigation
    Navigation,
    /// Mouse down on an empty input (toggles)
    InputMouseDown,
    /// The popup indicator was clicked
    Toggle,
    /// Escape key
    Escape,
    /// An option was committed
    Commit,
    /// The input lost focus
    Blur,
    /// Keyboard focus moved into the tags
    TagFocus,
}

impl PopupState {
    /// Whether the popup is shown
    pub fn is_open(&self) -> bool {
        matches!(self, PopupState::Open)
    }

    /// Transition for `trigger`, `None` if it doesn't change anything
    pub fn on_trigger(&self, trigger: PopupTrigger) -> Option<PopupState> {
        use PopupTrigger::*;
        match (self, trigger) {
            (PopupState::Closed, Focus | InputChange | Navigation | InputMouseDown | Toggle) => {
                Some(PopupState::Open)
            }
            (PopupState::Open, Escape | Commit | Blur | TagFocus | Toggle | InputMouseDown) => {
                Some(PopupState::Closed)
            }
            _ => None,
        }
    }
}

impl From<bool> for PopupState {
    fn from(open: bool) -> Self {
        if open {
            PopupState::Open
        } else {
            PopupState::Closed
        }
    }
}
