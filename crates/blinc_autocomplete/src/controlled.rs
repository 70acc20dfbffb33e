//! Owned-or-mirrored value holder
//!
//! A [`Controlled`] either owns its value (uncontrolled) or mirrors a value
//! supplied by an external owner (controlled). The engine never branches on
//! this itself: it proposes the next value, reports the proposal as a
//! notification, and the holder decides whether the proposal takes effect.
//! A controlled holder only changes when the owner re-injects a value
//! through [`Controlled::sync`].

/// A value that is either internally owned or mirrored from outside
#[derive(Clone, Debug)]
pub struct Controlled<V> {
    owned: V,
    external: Option<V>,
    name: &'static str,
}

impl<V: Clone> Controlled<V> {
    /// Create a holder, controlled when `external` is `Some`
    pub fn new(external: Option<V>, default: V, name: &'static str) -> Self {
        Self {
            owned: default,
            external,
            name,
        }
    }

    /// Uncontrolled holder seeded with `default`
    pub fn uncontrolled(default: V, name: &'static str) -> Self {
        Self::new(None, default, name)
    }

    /// The value to render with
    pub fn get(&self) -> &V {
        self.external.as_ref().unwrap_or(&self.owned)
    }

    /// Whether an external owner controls the value
    pub fn is_controlled(&self) -> bool {
        self.external.is_some()
    }

    /// Propose the next value; returns whether it was applied
    pub fn propose(&mut self, next: V) -> bool {
        if self.external.is_some() {
            tracing::trace!(value = self.name, "proposal left to the controlling owner");
            false
        } else {
            self.owned = next;
            true
        }
    }

    /// Re-inject the external value, or release control with `None`
    ///
    /// Releasing control keeps the last mirrored value as the owned one.
    pub fn sync(&mut self, external: Option<V>) {
        match (self.external.take(), external) {
            (Some(_), Some(value)) => self.external = Some(value),
            (Some(previous), None) => {
                tracing::warn!(
                    value = self.name,
                    "switching from controlled to uncontrolled; keep one mode for the lifetime of the instance"
                );
                self.owned = previous;
            }
            (None, Some(value)) => {
                tracing::warn!(
                    value = self.name,
                    "switching from uncontrolled to controlled; keep one mode for the lifetime of the instance"
                );
                self.external = Some(value);
            }
            (None, None) => {}
        }
    }
}
