//! Startup and supervision of the per-file tails.

mod startup;
mod tail;

pub use startup::*;
pub use tail::*;
