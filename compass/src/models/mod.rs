mod analysis;
mod history;
mod mood;

pub use analysis::*;
pub use history::*;
pub use mood::*;
