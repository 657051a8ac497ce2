mod analysis;
pub mod credentials;
mod sweeper;

pub use analysis::{AnalysisService, Outcome};
pub use credentials::{CredentialStore, EnvCredentials, StaticCredentials};
pub use sweeper::SessionSweeper;
