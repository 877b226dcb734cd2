use crate::auth::TokenVerifier;
use crate::database::Database;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable: the database handle wraps a pool and the verifier's
/// key cache is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub verifier: TokenVerifier,
}
