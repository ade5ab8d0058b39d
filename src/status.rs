//! Exit status codes for the CLI
//!
//! - 0: the response was saved
//! - 1: any failure (bad command, network error, non-2xx status, write error)

use std::process::{ExitCode, Termination};

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Response fetched and written
    Success = 0,
    /// Anything else
    Error = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Map a fetch outcome to an exit status
    pub fn from_outcome<T, E>(outcome: &Result<T, E>) -> Self {
        if outcome.is_ok() {
            ExitStatus::Success
        } else {
            ExitStatus::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_outcome() {
        assert_eq!(ExitStatus::from_outcome(&Ok::<(), ()>(())), ExitStatus::Success);
        assert_eq!(ExitStatus::from_outcome(&Err::<(), ()>(())), ExitStatus::Error);
        assert_eq!(ExitStatus::Error as u8, 1);
    }
}
