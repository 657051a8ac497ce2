mod state;
mod store;

pub use state::SessionState;
pub use store::{SessionHandle, SessionStore, SubmissionGuard};
