pub mod reports;
pub mod sessions;

pub use reports::*;
pub use sessions::*;
