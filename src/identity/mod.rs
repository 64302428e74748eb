//! Credential verification and cookie-correlated session management.
//! Keep the public surface thin and split implementation across sub-modules.

mod session;
mod provider;
pub mod cookie;

pub use session::{SessionId, SessionManager};
pub use provider::{AuthProvider, LocalAuthProvider, LoginRequest};
pub use cookie::{cookie_value, expired_session_cookie, session_cookie, DEFAULT_SESSION_COOKIE};

pub(crate) use session::fingerprint;
