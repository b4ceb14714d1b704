//! Session management module

pub mod manager;
pub mod state;
pub mod store;

pub use manager::SessionManager;
pub use state::{RefreshOutcome, RememberedLogin, SessionState};
pub use store::{FileStorage, MemoryStorage, Storage};
