//! Per-user conversation state for commtrainer.
//!
//! A session is keyed by an opaque caller-supplied string and carries the
//! ordered turn history, the user-turn counter and the terminated flag.
//! Access goes through a [`SessionHandle`]: an async mutex whose guard is
//! held for a whole turn, so turns on one key are serialized while
//! different keys proceed independently.

pub mod session;
pub mod store;

pub use session::{Session, SessionSummary};
pub use store::{InMemorySessionStore, SessionHandle, SessionStore};
