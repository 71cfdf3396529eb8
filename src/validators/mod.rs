pub mod email;
pub mod task;

pub use email::validate_email;
pub use task::{validate_priority, validate_task_text, DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
    PriorityOutOfRange(u8),
    TaskTextEmpty,
    UnknownSortField(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailEmpty => write!(f, "Email cannot be empty"),
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
            Self::PriorityOutOfRange(p) => write!(f, "Priority must be between 1 and 5, got {}", p),
            Self::TaskTextEmpty => write!(f, "Task text cannot be empty"),
            Self::UnknownSortField(name) => write!(f, "Cannot sort by {:?}", name),
        }
    }
}

impl std::error::Error for ValidationError {}
