//! Identity registry: numbered role labels and the body-id → role map.

use std::collections::HashMap;
use std::fmt;

/// The fixed set of clinical roles an operator can bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Surgeon,
    Assistant,
    Nurse,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 3] = [
        RoleCategory::Surgeon,
        RoleCategory::Assistant,
        RoleCategory::Nurse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Surgeon => "Surgeon",
            RoleCategory::Assistant => "Assistant",
            RoleCategory::Nurse => "Nurse",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A minted role identity: category plus 1-based sequence number.
///
/// The category travels as data; the display label is formatted on demand
/// and never parsed back to recover the category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleAssignment {
    pub category: RoleCategory,
    pub sequence: u32,
}

impl RoleAssignment {
    /// Display label, e.g. `Surgeon_1`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.category, self.sequence)
    }
}

/// Owner of all persistent binding state: per-category counters and the
/// tracked-body id → assignment map.
///
/// Counters are monotonic. A `(category, sequence)` pair handed out once is
/// never handed out again, so historical labels stay unique for the life of
/// the process even after rebinding. There is no deletion operation; entries
/// live until overwritten or the process exits.
#[derive(Debug, Default)]
pub struct RoleRegistry {
    counters: HashMap<RoleCategory, u32>,
    bindings: HashMap<u64, RoleAssignment>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next numbered assignment for `category`.
    ///
    /// Advances the category counter by exactly one; repeated calls never
    /// return the same assignment twice.
    pub fn generate(&mut self, category: RoleCategory) -> RoleAssignment {
        let counter = self.counters.entry(category).or_insert(0);
        *counter += 1;
        RoleAssignment {
            category,
            sequence: *counter,
        }
    }

    /// Unconditional upsert; rebinding an id overwrites its old assignment.
    pub fn bind(&mut self, body_id: u64, assignment: RoleAssignment) {
        self.bindings.insert(body_id, assignment);
    }

    pub fn assignment_of(&self, body_id: u64) -> Option<RoleAssignment> {
        self.bindings.get(&body_id).copied()
    }

    /// Bound label for `body_id`, or the `ID:{id}` display fallback.
    ///
    /// The fallback signals "unbound" to the operator; it is not an error.
    pub fn label_of(&self, body_id: u64) -> String {
        match self.bindings.get(&body_id) {
            Some(assignment) => assignment.label(),
            None => format!("ID:{}", body_id),
        }
    }

    /// Current counter value for `category` (0 before the first assignment).
    pub fn counter(&self, category: RoleCategory) -> u32 {
        self.counters.get(&category).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, RoleAssignment)> + '_ {
        self.bindings.iter().map(|(id, a)| (*id, *a))
    }
}
