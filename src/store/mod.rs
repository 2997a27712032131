//! Store Module
//!
//! The pool of students shared by every session.
//!
//! ## Responsibilities
//! - Bulk import (LOAD), additive and not deduplicated
//! - Uniform random pick (RANDOM)
//! - Size and ordered listing (INFO, LIST)
//! - Total clear (CLEAR)
//!
//! ## Concurrency
//! The store is the only state shared across sessions. Each operation is
//! atomic on its own; no ordering is imposed between operations issued by
//! different sessions.

mod memory;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use memory::InMemoryStore;

/// A student, identified by value (duplicates are permitted)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    fullname: String,
}

impl Student {
    /// Create a student from a full name
    pub fn new(fullname: impl Into<String>) -> Self {
        Self {
            fullname: fullname.into(),
        }
    }

    /// The student's full name
    pub fn fullname(&self) -> &str {
        &self.fullname
    }
}

impl From<&str> for Student {
    fn from(fullname: &str) -> Self {
        Self::new(fullname)
    }
}

impl From<String> for Student {
    fn from(fullname: String) -> Self {
        Self::new(fullname)
    }
}

/// Operational contract of a student pool
///
/// Implementations must make every individual method atomic.
pub trait StudentsStore: Send + Sync {
    /// Append all students in one step and return how many were added
    fn import(&self, students: Vec<Student>) -> usize;

    /// Pick one student uniformly at random
    ///
    /// Returns `RouletteError::EmptyStore` when there is nobody to pick.
    fn pick_random(&self) -> Result<Student>;

    /// Number of students currently held
    fn len(&self) -> usize;

    /// True when no student is held
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All students in insertion order
    fn list(&self) -> Vec<Student>;

    /// Remove every student
    fn clear(&self);
}
