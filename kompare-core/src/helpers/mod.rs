//! Low-level helper utilities.

pub mod classify;
pub mod convert;
#[cfg(feature = "serde")]
pub mod ser;
