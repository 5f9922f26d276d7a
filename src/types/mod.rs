//! Type definitions for carbontrack

mod error;
mod finance;
mod footprint;
mod record;

pub use error::*;
pub use finance::*;
pub use footprint::*;
pub use record::*;
