pub mod cell;
pub mod error;
pub mod traits;
pub mod types;

pub use cell::*;
pub use error::*;
pub use traits::*;
pub use types::*;
