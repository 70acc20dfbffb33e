//! Change notifications and dispatch responses
//!
//! Every state change the engine proposes is reported as a [`Notification`].
//! They are returned from `dispatch` in order and, after the event has been
//! fully processed, also delivered to the callbacks registered on the
//! builder. Callbacks receive data only and cannot reach back into the
//! engine while it is dispatching.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::navigation::HighlightReason;
use crate::popup::PopupTrigger;
use crate::selection::Value;

/// Why the value changed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeReason {
    /// An option was committed
    SelectOption,
    /// An option was removed (toggle, tag delete, backspace)
    RemoveOption,
    /// Free text was committed
    CreateOption,
    /// Auto-select on blur
    Blur,
    /// Clear affordance, Escape with clear-on-escape, or emptied input
    Clear,
}

/// Why the input text changed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputChangeReason {
    /// The user typed
    Input,
    /// The text was reset to represent the value
    Reset,
    /// The text was cleared
    Clear,
}

/// Where keyboard focus should go
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The text input
    Input,
    /// The tag at this index
    Tag(usize),
}

/// A proposed state change, or a request to the rendering layer
#[derive(Clone, Debug, PartialEq)]
pub enum Notification<T> {
    /// The value should become `value`
    Change {
        value: Value<T>,
        reason: ChangeReason,
    },
    /// The input text should become `value`
    InputChange {
        value: String,
        reason: InputChangeReason,
    },
    /// The popup asks to be opened
    OpenRequested(PopupTrigger),
    /// The popup asks to be closed
    CloseRequested(PopupTrigger),
    /// The highlighted option changed
    HighlightChange {
        index: Option<usize>,
        option: Option<T>,
        reason: HighlightReason,
    },
    /// Keyboard focus should move
    FocusRequest(FocusTarget),
}

/// Notifications produced by a single dispatch
pub type Notifications<T> = SmallVec<[Notification<T>; 4]>;

/// Result of dispatching one event
#[derive(Clone, Debug)]
pub struct Response<T> {
    /// The engine consumed the event (prevent default / stop propagation)
    pub handled: bool,
    /// State changes proposed while processing the event, in order
    pub notifications: Notifications<T>,
}

impl<T> Default for Response<T> {
    fn default() -> Self {
        Self {
            handled: false,
            notifications: SmallVec::new(),
        }
    }
}

impl<T> Response<T> {
    pub(crate) fn push(&mut self, notification: Notification<T>) {
        self.notifications.push(notification);
    }

    /// The last proposed value, if the value changed
    pub fn value_change(&self) -> Option<&Value<T>> {
        self.notifications.iter().rev().find_map(|n| match n {
            Notification::Change { value, .. } => Some(value),
            _ => None,
        })
    }

    /// The last proposed input text, if it changed
    pub fn input_change(&self) -> Option<&str> {
        self.notifications.iter().rev().find_map(|n| match n {
            Notification::InputChange { value, .. } => Some(value.as_str()),
            _ => None,
        })
    }

    /// Whether the popup asked to open
    pub fn requested_open(&self) -> bool {
        self.notifications
            .iter()
            .any(|n| matches!(n, Notification::OpenRequested(_)))
    }

    /// Whether the popup asked to close
    pub fn requested_close(&self) -> bool {
        self.notifications
            .iter()
            .any(|n| matches!(n, Notification::CloseRequested(_)))
    }

    /// Requested focus move, if any
    pub fn focus_request(&self) -> Option<FocusTarget> {
        self.notifications.iter().rev().find_map(|n| match n {
            Notification::FocusRequest(target) => Some(*target),
            _ => None,
        })
    }
}

/// Value change callback
pub type ChangeCallback<T> = Arc<dyn Fn(&Value<T>, ChangeReason) + Send + Sync>;

/// Input text change callback
pub type InputChangeCallback = Arc<dyn Fn(&str, InputChangeReason) + Send + Sync>;

/// Popup open/close request callback
pub type PopupCallback = Arc<dyn Fn(PopupTrigger) + Send + Sync>;

/// Highlight change callback
pub type HighlightCallback<T> = Arc<dyn Fn(Option<&T>, HighlightReason) + Send + Sync>;

/// Callbacks registered by the owner of the engine
pub struct Callbacks<T> {
    pub(crate) on_change: Option<ChangeCallback<T>>,
    pub(crate) on_input_change: Option<InputChangeCallback>,
    pub(crate) on_open: Option<PopupCallback>,
    pub(crate) on_close: Option<PopupCallback>,
    pub(crate) on_highlight_change: Option<HighlightCallback<T>>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_input_change: None,
            on_open: None,
            on_close: None,
            on_highlight_change: None,
        }
    }
}

impl<T> Clone for Callbacks<T> {
    fn clone(&self) -> Self {
        Self {
            on_change: self.on_change.clone(),
            on_input_change: self.on_input_change.clone(),
            on_open: self.on_open.clone(),
            on_close: self.on_close.clone(),
            on_highlight_change: self.on_highlight_change.clone(),
        }
    }
}

impl<T> fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_input_change", &self.on_input_change.is_some())
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_highlight_change", &self.on_highlight_change.is_some())
            .finish()
    }
}

impl<T> Callbacks<T> {
    /// Deliver notifications in order
    pub(crate) fn deliver(&self, notifications: &[Notification<T>]) {
        for notification in notifications {
            match notification {
                Notification::Change { value, reason } => {
                    if let Some(cb) = &self.on_change {
                        cb(value, *reason);
                    }
                }
                Notification::InputChange { value, reason } => {
                    if let Some(cb) = &self.on_input_change {
                        cb(value, *reason);
                    }
                }
                Notification::OpenRequested(trigger) => {
                    if let Some(cb) = &self.on_open {
                        cb(*trigger);
                    }
                }
                Notification::CloseRequested(trigger) => {
                    if let Some(cb) = &self.on_close {
                        cb(*trigger);
                    }
                }
                Notification::HighlightChange { option, reason, .. } => {
                    if let Some(cb) = &self.on_highlight_change {
                        cb(option.as_ref(), *reason);
                    }
                }
                Notification::FocusRequest(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_response_accessors() {
        let mut response: Response<String> = Response::default();
        assert!(response.value_change().is_none());
        response.push(Notification::InputChange {
            value: "Apple".to_string(),
            reason: InputChangeReason::Reset,
        });
        response.push(Notification::Change {
            value: Value::Single(Some("Apple".to_string())),
            reason: ChangeReason::SelectOption,
        });
        response.push(Notification::CloseRequested(PopupTrigger::Commit));
        assert_eq!(response.input_change(), Some("Apple"));
        assert_eq!(
            response.value_change(),
            Some(&Value::Single(Some("Apple".to_string())))
        );
        assert!(response.requested_close());
        assert!(!response.requested_open());
        assert_eq!(response.focus_request(), None);
    }

    #[test]
    fn test_callbacks_deliver_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut callbacks: Callbacks<String> = Callbacks::default();
        let change_log = log.clone();
        callbacks.on_change = Some(Arc::new(move |value: &Value<String>, reason: ChangeReason| {
            change_log
                .lock()
                .unwrap()
                .push(format!("change {:?} {:?}", value.first(), reason));
        }));
        let close_log = log.clone();
        callbacks.on_close = Some(Arc::new(move |trigger: PopupTrigger| {
            close_log.lock().unwrap().push(format!("close {:?}", trigger));
        }));

        callbacks.deliver(&[
            Notification::Change {
                value: Value::Single(Some("A".to_string())),
                reason: ChangeReason::SelectOption,
            },
            Notification::OpenRequested(PopupTrigger::Focus),
            Notification::CloseRequested(PopupTrigger::Commit),
        ]);

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                "change Some(\"A\") SelectOption".to_string(),
                "close Commit".to_string()
            ]
        );
    }
}
