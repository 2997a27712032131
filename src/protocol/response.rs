//! Response definitions
//!
//! Structured replies, each encoded as one JSON object on one line.

use serde::{Deserialize, Serialize};

use crate::store::Student;

/// Reply to INFO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub protocol_version: String,
    pub number_of_students: usize,
}

/// Reply to RANDOM
///
/// Exactly one of the two fields is present on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fullname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RandomResponse {
    /// A successful pick
    pub fn picked(student: &Student) -> Self {
        Self {
            fullname: Some(student.fullname().to_string()),
            error: None,
        }
    }

    /// A failed pick
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            fullname: None,
            error: Some(message.into()),
        }
    }

    pub fn fullname(&self) -> Option<&str> {
        self.fullname.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Outcome carried by LOAD and BYE replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

/// Reply to LOAD, sent after the sentinel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub status: Status,
    pub number_of_new_students: usize,
}

impl LoadResponse {
    pub fn success(number_of_new_students: usize) -> Self {
        Self {
            status: Status::Success,
            number_of_new_students,
        }
    }

    pub fn failure() -> Self {
        Self {
            status: Status::Failure,
            number_of_new_students: 0,
        }
    }
}

/// Reply to LIST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub students: Vec<Student>,
}

/// Reply to BYE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByeResponse {
    pub status: Status,
    pub number_of_commands: u64,
}

impl ByeResponse {
    pub fn success(number_of_commands: u64) -> Self {
        Self {
            status: Status::Success,
            number_of_commands,
        }
    }
}
