//! Rasterize the application icon by delegating to an external converter.
//!
//! The crate keeps the pure parts separate from the side-effecting ones:
//!
//! - **[`paths`]** and **[`config`]**: where the icon lives and how it is converted.
//!   Path derivation is pure once the base directory is known.
//! - **[`process`]**: bounded child-process execution with a timeout.
//! - **[`convert`]**: builds the rasterizer invocation and classifies its outcome
//!   into [`convert::Conversion`].
//!
//! The `icongen` binary wires these together and prints a single status line.

pub mod config;
pub mod convert;
pub mod exit_codes;
pub mod logging;
pub mod paths;
pub mod process;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
