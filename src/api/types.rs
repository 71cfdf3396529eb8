use std::collections::HashMap;

use serde::Deserialize;

use crate::ClientError;

/// The only marker value that counts as success.
pub const SUCCESS_MARKER: &str = "Success";

/// Mutating operations and the response key carrying their outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Edit,
    Delete,
}

impl Operation {
    /// Key of the success marker in the response, e.g. `{"Edit": "Success"}`.
    pub fn marker_key(&self) -> &'static str {
        match self {
            Operation::Add => "Add",
            Operation::Edit => "Edit",
            Operation::Delete => "Delete",
        }
    }
}

/// An acknowledgment body such as `{"Delete": "Success"}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Acknowledgment(HashMap<String, serde_json::Value>);

impl Acknowledgment {
    /// The marker for `operation`, if present and a string.
    pub fn marker(&self, operation: Operation) -> Option<&str> {
        self.0.get(operation.marker_key())?.as_str()
    }

    /// Succeeds only if the marker for `operation` is exactly `"Success"`.
    ///
    /// # Errors
    /// `ClientError::OperationRejected` carrying whatever marker was found.
    pub fn require_success(&self, operation: Operation) -> Result<(), ClientError> {
        match self.marker(operation) {
            Some(SUCCESS_MARKER) => Ok(()),
            marker => Err(ClientError::OperationRejected {
                operation: operation.marker_key(),
                marker: marker
                    .map(str::to_owned)
                    .or_else(|| self.0.get(operation.marker_key()).map(|v| v.to_string())),
            }),
        }
    }
}

/// Form body of `POST /task/`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskForm {
    pub account_id: i64,
    pub text: String,
    pub priority: u8,
}

impl NewTaskForm {
    pub fn into_pairs(self) -> Vec<(String, String)> {
        vec![
            ("AccountId".to_owned(), self.account_id.to_string()),
            ("Task".to_owned(), self.text),
            ("Priority".to_owned(), self.priority.to_string()),
        ]
    }
}

/// Form body of `PUT /task/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTaskForm {
    pub id: i64,
    pub account_id: i64,
    pub text: String,
    pub priority: u8,
}

impl EditTaskForm {
    pub fn into_pairs(self) -> Vec<(String, String)> {
        vec![
            ("Id".to_owned(), self.id.to_string()),
            ("AccountId".to_owned(), self.account_id.to_string()),
            ("Task".to_owned(), self.text),
            ("Priority".to_owned(), self.priority.to_string()),
        ]
    }
}
