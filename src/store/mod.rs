use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::state::AggregateState;
use crate::types::SequenceNumber;
use crate::Aggregate;

pub mod memory;

/// An EventStore is responsible for persisting events that an aggregate emits, and loading the events
/// that represent an aggregate's history.
pub trait EventStore<A>
where
    A: Aggregate,
{
    type Error: std::error::Error;

    /// Loads the events that an aggregate instance has emitted in the past, ordered by sequence number.
    fn by_aggregate_id(&self, aggregate_id: Uuid) -> Result<Vec<StoreEvent<A::Event>>, Self::Error>;

    /// Persists multiple events. This should be done atomically - either all the events are persisted
    /// correctly, or none are.
    ///
    /// The first event gets the aggregate state's next sequence number.
    fn persist(
        &mut self,
        aggregate_state: &AggregateState<A::State>,
        events: Vec<A::Event>,
    ) -> Result<Vec<StoreEvent<A::Event>>, Self::Error>;

    /// Delete all events from events store related to given `aggregate_id`.
    fn delete(&mut self, aggregate_id: Uuid) -> Result<(), Self::Error>;
}

/// A `StoreEvent` contains the payload (the original event) alongside the event's metadata.
#[derive(Debug, Clone)]
pub struct StoreEvent<Event> {
    /// Uniquely identifies an event among all events emitted from all aggregates.
    pub id: Uuid,
    /// The aggregate instance that emitted the event.
    pub aggregate_id: Uuid,
    /// The original, emitted, event.
    pub payload: Event,
    /// The timestamp of when the event is persisted.
    pub occurred_on: DateTime<Utc>,
    /// The sequence number of the event, within its specific aggregate instance.
    pub sequence_number: SequenceNumber,
}

impl<Event> StoreEvent<Event> {
    pub const fn sequence_number(&self) -> &SequenceNumber {
        &self.sequence_number
    }

    pub const fn payload(&self) -> &Event {
        &self.payload
    }
}
