//! Stable exit codes for the `icongen` binary.
//!
//! Handled conversion failures exit with [`OK`] unless `--strict` is passed.

/// Icon generated, or a handled failure outside strict mode.
pub const OK: i32 = 0;
/// Invalid config, unresolvable executable path, or another internal error.
pub const INVALID: i32 = 1;
/// `--strict`: the rasterizer ran but exited non-zero or timed out.
pub const CONVERSION_FAILED: i32 = 2;
/// `--strict`: the rasterizer could not be located or executed.
pub const TOOL_UNAVAILABLE: i32 = 3;
