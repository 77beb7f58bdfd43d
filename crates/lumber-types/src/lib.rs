pub mod length;
pub mod nominal;
pub mod property;

pub use length::*;
pub use nominal::*;
pub use property::*;
