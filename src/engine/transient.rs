//! Call-scoped engine state.

/// A value that lives only for the duration of one top-level call.
///
/// The slot is empty between calls.  Engines fill it with
/// [`scoped`](Self::scoped), which empties it again on every exit path,
/// so no state leaks from one call into the next even when the call
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientSlot<T> {
    value: Option<T>,
}

impl<T> Default for TransientSlot<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> TransientSlot<T> {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Whether a call is in progress.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// The value of the call in progress.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Mutable access to the value of the call in progress.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Fills the slot of `owner` with `value`, runs `body`, then empties
    /// the slot and returns the body's result together with the final
    /// value.
    ///
    /// `slot` selects the slot inside `owner`, so `body` keeps full mutable
    /// access to the owner while it runs.
    pub fn scoped<O, R>(
        owner: &mut O,
        slot: fn(&mut O) -> &mut Self,
        value: T,
        body: impl FnOnce(&mut O) -> R,
    ) -> (R, Option<T>) {
        slot(owner).value = Some(value);
        let result = body(owner);
        let value = slot(owner).value.take();
        (result, value)
    }
}
