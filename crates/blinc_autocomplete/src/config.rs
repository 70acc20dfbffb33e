//! Behaviour flags for an autocomplete instance
//!
//! Flags are plain data so hosts can keep them next to the rest of their
//! settings and deserialize them (JSON, TOML, ...). Keys use camelCase:
//!
//! ```rust
//! use blinc_autocomplete::AutocompleteFlags;
//!
//! let flags = AutocompleteFlags {
//!     multiple: true,
//!     filter_selected_options: true,
//!     ..Default::default()
//! };
//! assert!(!flags.free_solo);
//! ```

use serde::{Deserialize, Serialize};

/// Default text shown while `loading` is set
pub const DEFAULT_LOADING_TEXT: &str = "Loading…";

/// Default text shown when nothing matches
pub const DEFAULT_NO_OPTIONS_TEXT: &str = "No options";

/// Behaviour flags, all off by default
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutocompleteFlags {
    /// Multi-select mode (fixed for the lifetime of the instance)
    pub multiple: bool,
    /// Allow committing text that matches no option
    pub free_solo: bool,
    /// Highlight the first enabled option whenever the list resets
    pub auto_highlight: bool,
    /// Commit the highlighted option when the input loses focus
    pub auto_select: bool,
    /// Show the highlighted option's label inline in the input
    pub auto_complete: bool,
    /// Hide the clear affordance and keep the value when the input is emptied
    pub disable_clearable: bool,
    /// Keep the popup open after a commit
    pub disable_close_on_select: bool,
    /// Clamp keyboard navigation at the list ends instead of wrapping
    pub disable_list_wrap: bool,
    /// Don't open the popup when the input receives focus
    pub disable_open_on_focus: bool,
    /// Escape also clears the value and the input
    pub clear_on_escape: bool,
    /// Hide options that are already selected
    pub filter_selected_options: bool,
    /// The input itself is a navigation stop before the first option
    pub include_input_in_list: bool,
    /// Keep the popup open on blur while the input has text
    pub debug: bool,
    /// Options are being fetched by the host
    pub loading: bool,
    /// Text for the loading row
    pub loading_text: String,
    /// Text for the empty-result row
    pub no_options_text: String,
}

impl Default for AutocompleteFlags {
    fn default() -> Self {
        Self {
            multiple: false,
            free_solo: false,
            auto_highlight: false,
            auto_select: false,
            auto_complete: false,
            disable_clearable: false,
            disable_close_on_select: false,
            disable_list_wrap: false,
            disable_open_on_focus: false,
            clear_on_escape: false,
            filter_selected_options: false,
            include_input_in_list: false,
            debug: false,
            loading: false,
            loading_text: DEFAULT_LOADING_TEXT.to_string(),
            no_options_text: DEFAULT_NO_OPTIONS_TEXT.to_string(),
        }
    }
}
