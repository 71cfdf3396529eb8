use super::ValidationError;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;
/// Priority preselected for new tasks.
pub const DEFAULT_PRIORITY: u8 = 3;

pub fn validate_priority(priority: u8) -> Result<(), ValidationError> {
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        return Err(ValidationError::PriorityOutOfRange(priority));
    }
    Ok(())
}

pub fn validate_task_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::TaskTextEmpty);
    }
    Ok(())
}
