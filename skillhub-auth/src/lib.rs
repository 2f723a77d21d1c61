mod error;
mod models;
mod session;
mod session_client;
mod settings;
mod store;

pub use error::AuthError;
pub use models::{AuthState, Credentials, User};
pub use session::{AuthSession, CallbackParams};
pub use session_client::{LoginKind, SessionClient};
pub use settings::Settings;
pub use store::CredentialStore;
