//! User-facing response messages.

pub const MISSING_FIELD_MESSAGE: &str = "Missing required volunteer data.";
pub const QUEUE_EMPTY_MESSAGE: &str = "No volunteers in the queue to assign.";
pub const ASSIGNED_MESSAGE: &str = "Successfully assigned volunteer.";
