use std::ops::Deref;

use uuid::Uuid;

use crate::{Aggregate, StoreEvent};

/// This trait is used to implement an `EventHandler`. An event handler is intended to be an entity
/// which can create, update and delete a read side and perform side effects.
///
/// Event handlers run after the events have been persisted, so they cannot make a command fail.
pub trait EventHandler<A>
where
    A: Aggregate,
{
    /// Handle an event and perform an action. This action could be over a read model or a side-effect.
    /// All the errors should be handled from within the `EventHandler` and shouldn't panic.
    fn handle(&self, event: &StoreEvent<A::Event>);

    /// Perform a deletion of a resource using the given aggregate_id.
    fn delete(&self, _aggregate_id: Uuid) {}

    /// The name of the event handler. By default, this is the type name of the event handler,
    /// but it can be overridden to provide a custom name. This name is used as
    /// part of tracing spans, to identify the event handler being run.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<A, Q, T> EventHandler<A> for T
where
    A: Aggregate,
    Q: EventHandler<A> + ?Sized,
    T: Deref<Target = Q>,
{
    /// Deref call to [`EventHandler::handle`].
    fn handle(&self, event: &StoreEvent<A::Event>) {
        self.deref().handle(event);
    }

    /// Deref call to [`EventHandler::delete`].
    fn delete(&self, aggregate_id: Uuid) {
        self.deref().delete(aggregate_id);
    }

    /// Deref call to [`EventHandler::name`].
    fn name(&self) -> &'static str {
        self.deref().name()
    }
}
