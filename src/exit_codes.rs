//! Exit code constants for the crewbridge CLI.
//!
//! - 0: Success (including structured failures reported on stdout by `run`)
//! - 1: User error (malformed input, bad args, missing files, invalid config)
//! - 2: Execution failure (a `generate` run whose crew failed)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: malformed request, bad arguments, missing input files or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Execution failure: the delegate runtime or graph validation failed during `generate`.
pub const EXECUTION_FAILURE: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, EXECUTION_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn malformed_input_exit_is_non_zero() {
        assert_eq!(SUCCESS, 0);
        assert_ne!(USER_ERROR, 0);
        assert_ne!(EXECUTION_FAILURE, 0);
    }
}
