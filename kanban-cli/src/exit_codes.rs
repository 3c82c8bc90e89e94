//! Process exit codes

/// Command completed
pub const EXIT_SUCCESS: i32 = 0;

/// Command ran but changed nothing (a stale id, an empty column)
pub const EXIT_WARNING: i32 = 1;

/// Command failed or was refused
pub const EXIT_ERROR: i32 = 2;
