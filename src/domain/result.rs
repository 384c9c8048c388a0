//! Result type alias for Clara

use super::errors::ClaraError;

/// Result type alias for Clara operations
///
/// # Examples
///
/// ```
/// use clara::domain::result::Result;
/// use clara::domain::errors::ClaraError;
///
/// fn submit_guard(ready: bool) -> Result<()> {
///     if !ready {
///         return Err(ClaraError::Precondition("claim is not ready".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(submit_guard(true).is_ok());
/// assert!(submit_guard(false).is_err());
/// ```
pub type Result<T> = std::result::Result<T, ClaraError>;
