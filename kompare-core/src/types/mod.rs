//! Core type definitions for kompare.

mod key;
mod value;
mod path;
mod divergence;
mod report;
mod error;

pub use key::Key;
pub use value::{Value, ValueType, Record, Repr};
pub use path::{Path, Segment, render_segments};
pub use divergence::{Divergence, Mismatch, MismatchKind, Payload};
pub use report::{Report, ReportOptions, TOP_LEVEL};
pub use error::{ErrorKind, KompareError};
