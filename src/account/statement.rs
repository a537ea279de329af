use std::cell::RefCell;

use uuid::Uuid;

use crate::account::aggregate::AccountAggregate;
use crate::account::event::AccountEvent;
use crate::{EventHandler, StoreEvent};

/// Read model rendering every persisted account event as a statement line.
#[derive(Default)]
pub struct Statement {
    lines: RefCell<Vec<(Uuid, String)>>,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statement lines of one account, oldest first.
    pub fn lines_for(&self, aggregate_id: &Uuid) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(id, _)| id == aggregate_id)
            .map(|(_, line)| line.clone())
            .collect()
    }
}

impl EventHandler<AccountAggregate> for Statement {
    fn handle(&self, event: &StoreEvent<AccountEvent>) {
        let line = format!(
            "#{} {} {}",
            event.sequence_number,
            event.occurred_on.format("%Y-%m-%d %H:%M:%S"),
            event.payload
        );

        self.lines.borrow_mut().push((event.aggregate_id, line));
    }

    fn delete(&self, aggregate_id: Uuid) {
        self.lines.borrow_mut().retain(|(id, _)| id != &aggregate_id);
    }
}
