pub use crate::aggregate::Aggregate;
pub use crate::handler::EventHandler;
pub use crate::manager::{AggregateManager, ManagerError};
pub use crate::state::AggregateState;
pub use crate::store::memory::{InMemoryStore, StoreError};
pub use crate::store::{EventStore, StoreEvent};

mod aggregate;
mod handler;
mod manager;
mod state;
mod store;

pub mod account;

pub mod types {
    pub type SequenceNumber = i32;
}
