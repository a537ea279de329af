use thiserror::Error;
use uuid::Uuid;

use crate::{Aggregate, AggregateState, EventHandler, EventStore, StoreEvent};

/// The AggregateManager is responsible for coupling the Aggregate with a Store, so that the events
/// can be persisted when handled, and the state can be reconstructed by loading and apply events sequentially.
///
/// The basic APIs are:
/// 1. handle_command
/// 2. load
/// 3. delete
pub struct AggregateManager<A, S>
where
    A: Aggregate,
    S: EventStore<A>,
{
    event_store: S,
    event_handlers: Vec<Box<dyn EventHandler<A>>>,
}

impl<A, S> AggregateManager<A, S>
where
    A: Aggregate,
    S: EventStore<A>,
{
    /// Creates a new instance of an [`AggregateManager`].
    pub fn new(event_store: S) -> Self {
        Self {
            event_store,
            event_handlers: vec![],
        }
    }

    /// Registers an event handler, run on every persisted event in registration order.
    pub fn add_event_handler(&mut self, event_handler: impl EventHandler<A> + 'static) {
        self.event_handlers.push(Box::new(event_handler));
    }

    /// Validates and handles the command onto the given state, and then passes the events to the store.
    ///
    /// Returns the aggregate state with the persisted events applied.
    #[tracing::instrument(skip_all, fields(aggregate = A::NAME, aggregate_id = %aggregate_state.id()), err)]
    pub fn handle_command(
        &mut self,
        aggregate_state: AggregateState<A::State>,
        command: A::Command,
    ) -> Result<AggregateState<A::State>, ManagerError<A::Error, S::Error>> {
        let events: Vec<A::Event> =
            A::handle_command(aggregate_state.inner(), command).map_err(ManagerError::Aggregate)?;

        let store_events: Vec<StoreEvent<A::Event>> = self
            .store_events(&aggregate_state, events)
            .map_err(ManagerError::Store)?;

        Ok(aggregate_state.apply_store_events(store_events, A::apply_event))
    }

    /// Persists events already decided against `aggregate_state`, then runs every event handler on them.
    ///
    /// Use this when the caller applies the events on its own copy of the state.
    pub fn store_events(
        &mut self,
        aggregate_state: &AggregateState<A::State>,
        events: Vec<A::Event>,
    ) -> Result<Vec<StoreEvent<A::Event>>, S::Error> {
        let store_events: Vec<StoreEvent<A::Event>> = self.event_store.persist(aggregate_state, events)?;

        for store_event in &store_events {
            for event_handler in &self.event_handlers {
                let span = tracing::debug_span!(
                    "event_handler",
                    event_id = %store_event.id,
                    aggregate_id = %store_event.aggregate_id,
                    event_handler = event_handler.name()
                );
                let _e = span.enter();

                event_handler.handle(store_event);
            }
        }

        Ok(store_events)
    }

    /// Loads an aggregate instance from the event store, by applying previously persisted events onto
    /// the aggregate state by order of their sequence number.
    pub fn load(&self, aggregate_id: impl Into<Uuid>) -> Result<Option<AggregateState<A::State>>, S::Error> {
        let aggregate_id: Uuid = aggregate_id.into();

        let store_events: Vec<StoreEvent<A::Event>> = self.event_store.by_aggregate_id(aggregate_id)?;

        Ok(if store_events.is_empty() {
            None
        } else {
            let aggregate_state = AggregateState::with_id(aggregate_id);
            Some(aggregate_state.apply_store_events(store_events, A::apply_event))
        })
    }

    /// `delete` removes the aggregate instance along with all its associated events, and then lets every
    /// event handler drop its read side.
    pub fn delete(&mut self, aggregate_id: impl Into<Uuid>) -> Result<(), S::Error> {
        let aggregate_id: Uuid = aggregate_id.into();
        self.event_store.delete(aggregate_id)?;

        for event_handler in &self.event_handlers {
            event_handler.delete(aggregate_id);
        }

        Ok(())
    }

    /// Returns the internal event store
    pub fn event_store(&self) -> &S {
        &self.event_store
    }
}

/// Failure of [`AggregateManager::handle_command`]: either the aggregate refused the command, or the
/// store could not persist the resulting events.
#[derive(Debug, Error)]
pub enum ManagerError<A, S> {
    #[error(transparent)]
    Aggregate(A),
    #[error(transparent)]
    Store(S),
}
