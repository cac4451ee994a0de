//! # Reelpack
//!
//! Scan media release folders, report which episodes are present or
//! missing, and plan how to package them.
//!
//! This crate re-exports [`reelpack_core`]; see its documentation for the
//! individual components.

pub use reelpack_core::*;
