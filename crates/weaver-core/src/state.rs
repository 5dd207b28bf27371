//! Observable holders for the two pieces of session state.
//!
//! Single-threaded (WASM constraint): shared via Rc, interior mutability
//! via RefCell. Subscribers are notified synchronously inside `replace`,
//! so a consumer never observes a half-applied update.

use std::cell::RefCell;
use std::rc::Rc;

use weaver_types::message::Message;
use weaver_types::project::ProjectSnapshot;

type Subscriber<T> = Box<dyn Fn(&T)>;

/// A current-value cell with synchronous change notification.
/// Clone-cheap; clones share the same value and subscriber list.
pub struct StateCell<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Subscriber<T>>>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Clone> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Clone of the current value
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Replace the value wholesale, then notify subscribers synchronously.
    /// Re-entrant replacement from inside a subscriber is not supported.
    pub fn replace(&self, value: T) {
        *self.value.borrow_mut() = value;
        let current = self.get();
        for subscriber in self.subscribers.borrow().iter() {
            subscriber(&current);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(f));
    }
}

/// Append-only view over the conversation log.
/// Entries are never reordered; `clear` exists for explicit session reset.
#[derive(Clone)]
pub struct MessageLog {
    cell: StateCell<Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::from_messages(Vec::new())
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            cell: StateCell::new(messages),
        }
    }

    pub fn append(&self, message: Message) {
        let mut messages = self.cell.get();
        messages.push(message);
        self.cell.replace(messages);
    }

    pub fn all(&self) -> Vec<Message> {
        self.cell.get()
    }

    pub fn len(&self) -> usize {
        self.cell.value.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cell.replace(Vec::new());
    }

    pub fn subscribe(&self, f: impl Fn(&Vec<Message>) + 'static) {
        self.cell.subscribe(f);
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Holder for the current project snapshot. Replacement is wholesale and,
/// from the consumer's point of view, atomic.
#[derive(Clone)]
pub struct SnapshotCell {
    cell: StateCell<ProjectSnapshot>,
}

impl SnapshotCell {
    pub fn new(initial: ProjectSnapshot) -> Self {
        Self {
            cell: StateCell::new(initial),
        }
    }

    pub fn current(&self) -> ProjectSnapshot {
        self.cell.get()
    }

    pub fn replace(&self, snapshot: ProjectSnapshot) {
        self.cell.replace(snapshot);
    }

    pub fn subscribe(&self, f: impl Fn(&ProjectSnapshot) + 'static) {
        self.cell.subscribe(f);
    }
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self::new(ProjectSnapshot::placeholder())
    }
}
