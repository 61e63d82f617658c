pub mod models;
pub mod provider;

pub use models::{CurrentUser, Role};
pub use provider::{IdentityProvider, MySqlIdentityProvider};
