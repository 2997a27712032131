//! In-memory store
//!
//! Vec-backed student pool behind a RwLock.

use std::io::BufRead;

use parking_lot::RwLock;
use rand::seq::SliceRandom;

use crate::error::{Result, RouletteError};
use super::{Student, StudentsStore};

/// Student pool kept in memory for the lifetime of the process
///
/// ## Concurrency:
/// - `students`: RwLock (concurrent LIST/INFO/RANDOM, exclusive LOAD/CLEAR)
#[derive(Debug, Default)]
pub struct InMemoryStore {
    students: RwLock<Vec<Student>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from newline-separated names
    ///
    /// Blank lines are skipped and surrounding whitespace is trimmed.
    /// Nothing is imported if reading fails part way.
    pub fn import_lines<R: BufRead>(&self, reader: R) -> Result<usize> {
        let mut students = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let name = line.trim();
            if !name.is_empty() {
                students.push(Student::new(name));
            }
        }
        Ok(self.import(students))
    }
}

impl StudentsStore for InMemoryStore {
    fn import(&self, students: Vec<Student>) -> usize {
        let added = students.len();
        self.students.write().extend(students);
        added
    }

    fn pick_random(&self) -> Result<Student> {
        self.students
            .read()
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(RouletteError::EmptyStore)
    }

    fn len(&self) -> usize {
        self.students.read().len()
    }

    fn list(&self) -> Vec<Student> {
        self.students.read().clone()
    }

    fn clear(&self) {
        self.students.write().clear();
    }
}
