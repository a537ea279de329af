use uuid::Uuid;

use crate::store::StoreEvent;
use crate::types::SequenceNumber;

/// The internal state for an Aggregate.
/// It contains:
/// - an id uniquely representing the aggregate,
/// - an incremental sequence number,
/// - a state defined by the user of this library.
#[derive(Debug, Clone)]
pub struct AggregateState<S> {
    id: Uuid,
    sequence_number: SequenceNumber,
    inner: S,
}

impl<S: Default> Default for AggregateState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Default> AggregateState<S> {
    /// Creates a new instance of an [`AggregateState`] with a new unique id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a new instance of an [`AggregateState`] with the given aggregate id.
    ///
    /// This should be used almost exclusively when loading by aggregate id yields nothing, and this becomes
    /// the brand new aggregate state for that id.
    #[must_use]
    pub fn with_id(id: impl Into<Uuid>) -> Self {
        Self::with_inner(id, S::default())
    }
}

impl<S> AggregateState<S> {
    /// Creates a new instance of an [`AggregateState`] wrapping an already built inner state.
    #[must_use]
    pub fn with_inner(id: impl Into<Uuid>, inner: S) -> Self {
        Self {
            id: id.into(),
            sequence_number: 0,
            inner,
        }
    }

    /// Consumes the aggregate state and generates a new one with the events applied to it,
    /// as dictated by `apply_event`.
    #[must_use]
    pub fn apply_store_events<T, F>(self, store_events: Vec<StoreEvent<T>>, apply_event: F) -> Self
    where
        F: Fn(S, T) -> S,
    {
        store_events.into_iter().fold(self, |mut state, store_event| {
            let sequence_number = store_event.sequence_number;
            state.inner = apply_event(state.inner, store_event.payload);
            state.sequence_number = sequence_number;
            state
        })
    }

    /// Applies freshly decided events, bumping the sequence number once per event.
    #[must_use]
    pub fn apply_events<T, F>(self, events: Vec<T>, apply_event: F) -> Self
    where
        F: Fn(S, T) -> S,
    {
        events.into_iter().fold(self, |mut state, event| {
            state.inner = apply_event(state.inner, event);
            state.sequence_number += 1;
            state
        })
    }

    /// Returns an Uuid representing the aggregate id.
    pub const fn id(&self) -> &Uuid {
        &self.id
    }

    /// Returns the internal sequence number incremented by 1.
    pub const fn next_sequence_number(&self) -> SequenceNumber {
        self.sequence_number + 1
    }

    /// Returns the internal sequence number.
    pub const fn sequence_number(&self) -> &SequenceNumber {
        &self.sequence_number
    }

    /// Returns the internal state.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Consumes self and extracts the internal state.
    pub fn into_inner(self) -> S {
        self.inner
    }
}
