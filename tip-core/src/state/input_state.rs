//! Holder for the raw "cost of service" text.
//!
//! This is the single source of truth of the screen: the parsed cost and the
//! displayed tip are derived from it on every recomputation and never stored.

use std::fmt;

use tracing::trace;

/// Callback invoked with the new text after every [`InputState::set`].
pub type Listener = Box<dyn FnMut(&str)>;

/// Handle returned by [`InputState::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The text the user has typed, plus a change counter and listeners.
///
/// Any string is accepted, including the empty string. Every call to
/// [`set`](Self::set) bumps the [`revision`](Self::revision) and notifies all
/// subscribers synchronously, in subscription order, before returning. A
/// subscriber therefore always observes each edit before the next one.
///
/// # Example
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use tip_core::InputState;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut state = InputState::new();
///
/// let sink = Rc::clone(&seen);
/// state.subscribe(move |text: &str| sink.borrow_mut().push(text.to_string()));
///
/// state.set("1");
/// state.set("10");
///
/// assert_eq!(state.get(), "10");
/// assert_eq!(*seen.borrow(), vec!["1", "10"]);
/// ```
#[derive(Default)]
pub struct InputState {
    text: String,
    revision: u64,
    next_subscription: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl InputState {
    /// Creates an empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current text.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Replaces the text and notifies subscribers.
    ///
    /// The replacement is unconditional: no validation, no length limit and
    /// no check for an unchanged value.
    pub fn set(
        &mut self,
        text: impl Into<String>,
    ) {
        self.text = text.into();
        self.revision += 1;

        trace!(revision = self.revision, text = %self.text, "input state changed");

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.text);
        }
    }

    /// Number of times [`set`](Self::set) has been called.
    ///
    /// Pull-based consumers compare this against the revision they last
    /// rendered to decide whether a recomputation is due.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if the text was set after `revision` was observed.
    pub fn changed_since(
        &self,
        revision: u64,
    ) -> bool {
        self.revision != revision
    }

    /// Registers `listener` to be called after every change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&str) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(
        &mut self,
        id: SubscriptionId,
    ) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for InputState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("InputState")
            .field("text", &self.text)
            .field("revision", &self.revision)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
