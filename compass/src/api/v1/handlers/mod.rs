pub(crate) mod health;
pub mod reports;
pub mod sessions;
pub(crate) mod settings;

pub use health::health_check;
pub use settings::get_settings;
