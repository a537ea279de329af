use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::state::AggregateState;
use crate::store::{EventStore, StoreEvent};
use crate::types::SequenceNumber;
use crate::Aggregate;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sequence conflict on aggregate {aggregate_id}: expected {expected}, got {found}")]
    SequenceConflict {
        aggregate_id: Uuid,
        expected: SequenceNumber,
        found: SequenceNumber,
    },
}

/// Process-local [`EventStore`]. Events live as long as the store does.
pub struct InMemoryStore<A>
where
    A: Aggregate,
{
    events: HashMap<Uuid, Vec<StoreEvent<A::Event>>>,
}

impl<A> Default for InMemoryStore<A>
where
    A: Aggregate,
{
    fn default() -> Self {
        Self { events: HashMap::new() }
    }
}

impl<A> InMemoryStore<A>
where
    A: Aggregate,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn last_sequence_number(&self, aggregate_id: &Uuid) -> SequenceNumber {
        self.events
            .get(aggregate_id)
            .and_then(|events| events.last())
            .map_or(0, |event| event.sequence_number)
    }
}

impl<A> EventStore<A> for InMemoryStore<A>
where
    A: Aggregate,
{
    type Error = StoreError;

    fn by_aggregate_id(&self, aggregate_id: Uuid) -> Result<Vec<StoreEvent<A::Event>>, Self::Error> {
        Ok(self.events.get(&aggregate_id).cloned().unwrap_or_default())
    }

    fn persist(
        &mut self,
        aggregate_state: &AggregateState<A::State>,
        events: Vec<A::Event>,
    ) -> Result<Vec<StoreEvent<A::Event>>, Self::Error> {
        let aggregate_id = *aggregate_state.id();
        let expected = self.last_sequence_number(&aggregate_id) + 1;
        let found = aggregate_state.next_sequence_number();

        if expected != found {
            return Err(StoreError::SequenceConflict {
                aggregate_id,
                expected,
                found,
            });
        }

        let occurred_on: DateTime<Utc> = Utc::now();
        let store_events: Vec<StoreEvent<A::Event>> = events
            .into_iter()
            .zip(found..)
            .map(|(payload, sequence_number)| StoreEvent {
                id: Uuid::new_v4(),
                aggregate_id,
                payload,
                occurred_on,
                sequence_number,
            })
            .collect();

        self.events
            .entry(aggregate_id)
            .or_default()
            .extend(store_events.iter().cloned());

        Ok(store_events)
    }

    fn delete(&mut self, aggregate_id: Uuid) -> Result<(), Self::Error> {
        self.events.remove(&aggregate_id);
        Ok(())
    }
}
