//! Blinc Autocomplete
//!
//! Headless interaction engine for combobox / autocomplete widgets. Given a
//! list of candidate options and a stream of input events it computes:
//!
//! - **Visible options**: filtered (case/accent folding, prefix or substring)
//!   and optionally grouped into contiguous runs
//! - **Highlight**: keyboard and pointer navigation over enabled options
//! - **Value**: single or multiple selection with toggle dedupe and free text
//! - **Popup state**: open/close transitions with the trigger that caused them
//!
//! State can be owned by the engine or mirrored from an external owner
//! (controlled mode). Every proposed change is reported as a
//! [`Notification`]; renderers read binding descriptors from [`bindings`] and
//! contain no decision logic.
//!
//! # Example
//!
//! ```rust
//! use blinc_autocomplete::prelude::*;
//!
//! let mut ac = AutocompleteBuilder::text(["Ant", "Bee", "Cat", "Dog"])
//!     .multiple(true)
//!     .build()
//!     .unwrap();
//!
//! ac.dispatch(Event::Focus);
//! ac.dispatch(Event::OptionClick(1));
//! ac.dispatch(Event::Focus);
//! ac.dispatch(Event::OptionClick(3));
//!
//! assert_eq!(ac.value().as_slice(), ["Bee".to_string(), "Dog".to_string()]);
//! assert_eq!(bindings::tags(&ac).len(), 2);
//! ```

pub mod bindings;
pub mod config;
pub mod controlled;
pub mod engine;
pub mod error;
pub mod event;
pub mod filter;
pub mod group;
pub mod navigation;
pub mod notification;
pub mod option;
pub mod popup;
pub mod selection;


pub use config::AutocompleteFlags;
pub use controlled::Controlled;
pub use engine::{Anchor, Autocomplete, AutocompleteBuilder, InlineCompletion};
pub use error::{AutocompleteError, Result};
pub use event::{Event, Key, KeyboardEvent, Modifiers};
pub use filter::{filter_options, FilterConfig, FilterState, FilteredOption, MatchFrom};
pub use group::{group_options, OptionGroup, OptionList};
pub use navigation::HighlightReason;
pub use notification::{
    ChangeReason, FocusTarget, InputChangeReason, Notification, Notifications, Response,
};
pub use option::OptionProjections;
pub use popup::{PopupState, PopupTrigger};
pub use selection::Value;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::bindings;
    pub use crate::config::AutocompleteFlags;
    pub use crate::engine::{Anchor, Autocomplete, AutocompleteBuilder};
    pub use crate::error::{AutocompleteError, Result};
    pub use crate::event::{Event, Key, KeyboardEvent};
    pub use crate::filter::{FilterConfig, MatchFrom};
    pub use crate::notification::{ChangeReason, InputChangeReason, Notification, Response};
    pub use crate::popup::PopupTrigger;
    pub use crate::selection::Value;
}
