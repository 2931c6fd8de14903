//! Exit codes for the `dockform` binary
//!
//! These follow Unix conventions and sysexits.h where applicable.

/// Success
pub const SUCCESS: i32 = 0;

/// General error, such as a failure to serialize the result
pub const ERROR: i32 = 1;

/// The input could not be converted (syntax, no services, no image)
pub const INPUT_ERROR: i32 = 2;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (sysexits.h EX_USAGE)
pub const USAGE_ERROR: i32 = 64;

/// Nothing to convert (sysexits.h EX_NOINPUT)
pub const NO_INPUT: i32 = 66;
