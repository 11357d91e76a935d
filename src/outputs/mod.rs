//! Output generation at the process boundary.
//!
//! # Submodules
//!
//! - [`json`]: the ranked article array (stdout) and the structured error
//!   object (stderr)
//!
//! Stdout only ever carries a complete JSON array. Failures are described on
//! stderr alone.

pub mod json;
