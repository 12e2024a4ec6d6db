//! Identity of the thread issuing a logging call

use std::hash::{Hash, Hasher};
use std::thread::{self, ThreadId};

/// Handle of a calling thread.
///
/// Equality and hashing use the thread id only; the name is carried for labelling.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    id: ThreadId,
    name: Option<String>,
}

impl CallerIdentity {
    pub fn new(id: ThreadId, name: Option<String>) -> Self {
        Self { id, name }
    }

    pub fn current() -> Self {
        let thread = thread::current();
        Self {
            id: thread.id(),
            name: thread.name().map(String::from),
        }
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    /// Thread name, or the debug form of its id for unnamed threads
    pub fn display_name(&self) -> String {
        match self.name {
            Some(ref name) => name.clone(),
            None => format!("{:?}", self.id),
        }
    }
}

impl PartialEq for CallerIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CallerIdentity {}

impl Hash for CallerIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
