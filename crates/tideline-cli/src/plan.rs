//! Diff between the declared file and the recorded state.

use std::fmt;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::declared::{Address, Declared};
use crate::state::{State, StateEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
    #[serde(rename = "no-op")]
    NoOp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::NoOp => "no-op",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub address: Address,
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub changes: Vec<Change>,
}

impl Plan {
    /// Builds the plan. `differs(entry, declared)` tells whether a recorded
    /// resource no longer matches its declaration.
    ///
    /// Creates and updates come first in address order, deletes last in
    /// reverse address order.
    pub fn compute<F>(declared: &Declared, state: &State, mut differs: F) -> Result<Self>
    where
        F: FnMut(&StateEntry, &Value) -> Result<bool>,
    {
        let mut changes = Vec::new();

        for (address, attributes) in &declared.resources {
            let action = match state.get(address) {
                None => Action::Create,
                Some(entry) if differs(entry, attributes)? => Action::Update,
                Some(_) => Action::NoOp,
            };
            changes.push(Change {
                address: address.clone(),
                action,
            });
        }

        for address in state.resources.keys().rev() {
            if declared.get(address).is_none() {
                changes.push(Change {
                    address: address.clone(),
                    action: Action::Delete,
                });
            }
        }

        Ok(Self { changes })
    }

    pub fn count(&self, action: Action) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }

    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|c| c.action != Action::NoOp)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} to create, {} to update, {} to delete, {} unchanged",
            self.count(Action::Create),
            self.count(Action::Update),
            self.count(Action::Delete),
            self.count(Action::NoOp)
        )
    }
}
