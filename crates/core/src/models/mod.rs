//! Data models for EduLog

mod record;
mod roster;
mod settings;

pub use record::*;
pub use roster::*;
pub use settings::*;
