//! Result type alias for Medtrack

use super::errors::MedtrackError;

/// Result type alias for Medtrack operations
///
/// # Examples
///
/// ```
/// use medtrack::domain::result::Result;
/// use medtrack::domain::errors::MedtrackError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MedtrackError::AssignmentNotFound(7))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MedtrackError>;
