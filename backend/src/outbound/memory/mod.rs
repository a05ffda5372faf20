//! In-memory adapters used by tests and when no database URL is configured.
//!
//! Data is lost when the process exits.

mod registry;
mod users;

pub use registry::InMemoryRegistry;
pub use users::InMemoryUserRepository;
