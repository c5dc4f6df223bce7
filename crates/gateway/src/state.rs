use std::sync::Arc;

use ct_domain::config::Config;
use ct_sessions::SessionStore;

use crate::conversation::TurnOrchestrator;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    // ── Core services ─────────────────────────────────────────────────
    pub config: Arc<Config>,
    pub orchestrator: Arc<TurnOrchestrator>,

    // ── Session management ────────────────────────────────────────────
    pub sessions: Arc<dyn SessionStore>,

    // ── Security (startup-computed) ───────────────────────────────────
    /// SHA-256 hash of the API bearer token (read once at startup).
    /// `None` = dev mode (no auth enforced).
    pub api_token_hash: Option<Vec<u8>>,
}
