use tollgate_core::{Roster, TokenService};

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub roster: Roster,
    /// Signs tokens at login and verifies them on protected routes.
    pub tokens: TokenService,
}
