pub mod export;
pub mod filter;
pub mod validate;

pub use export::*;
pub use filter::*;
pub use validate::*;
