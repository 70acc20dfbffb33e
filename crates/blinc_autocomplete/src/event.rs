//! Input events understood by the engine
//!
//! The rendering layer translates platform events into these values and
//! hands them to [`Autocomplete::dispatch`](crate::Autocomplete::dispatch).
//! Binding descriptors carry ready-made `Event` values for the handlers of
//! each region.

// ============================================================================
// Keyboard
// ============================================================================

/// Keys the engine reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Escape,
    Backspace,
    Tab,
    /// A printable character (text itself arrives via [`Event::InputChange`])
    Char(char),
    /// Anything else
    Other,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Key press delivered to the input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed
    pub key: Key,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
    /// An IME composition is in progress; the engine ignores such presses
    pub composing: bool,
}

impl KeyboardEvent {
    /// Plain key press without modifiers
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            composing: false,
        }
    }

    /// Attach modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the press as part of an IME composition
    pub fn composing(mut self) -> Self {
        self.composing = true;
        self
    }
}

impl From<Key> for KeyboardEvent {
    fn from(key: Key) -> Self {
        KeyboardEvent::new(key)
    }
}

// ============================================================================
// Events
// ============================================================================

/// Everything the engine can be told about
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The text input received focus
    Focus,
    /// The text input lost focus
    Blur,
    /// The text input's content changed
    InputChange(String),
    /// A key was pressed while the widget had focus
    KeyDown(KeyboardEvent),
    /// Mouse down anywhere in the root container
    RootMouseDown {
        /// The press landed on the text input itself
        on_input: bool,
    },
    /// Click anywhere in the root container
    RootClick,
    /// Mouse down on the text input
    InputMouseDown,
    /// Mouse down inside the listbox
    ListboxMouseDown,
    /// Pointer moved over the option at this flat index
    OptionHover(usize),
    /// Option at this flat index was clicked
    OptionClick(usize),
    /// The clear affordance was clicked
    ClearClick,
    /// The popup indicator was clicked
    PopupIndicatorClick,
    /// The delete affordance of the tag at this index was clicked
    TagDelete(usize),
}

impl Event {
    /// Key press shorthand
    pub fn key(key: Key) -> Self {
        Event::KeyDown(KeyboardEvent::new(key))
    }

    /// Text change shorthand
    pub fn input(text: impl Into<String>) -> Self {
        Event::InputChange(text.into())
    }
}
