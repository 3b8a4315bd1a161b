pub mod common;
pub mod institute;
pub mod record;
pub mod student;

pub use common::*;
pub use institute::*;
pub use record::*;
pub use student::*;
