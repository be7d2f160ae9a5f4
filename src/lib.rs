pub mod convert;
pub mod error;
pub mod interactive;
pub mod markdown;
pub mod page;

pub use error::{Error, Result};
