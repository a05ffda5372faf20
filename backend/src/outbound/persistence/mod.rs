//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the registry and user repository ports backed
//! by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Storage-enforced integrity**: unique indexes and foreign keys back the
//!   program-name, username and enrollment-pair invariants.
//!
//! # Example
//!
//! ```no_run
//! use health_registry::outbound::persistence::{DbPool, DieselClientRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registry")).await?;
//! let clients = DieselClientRepository::new(pool);
//! # let _ = clients;
//! # Ok(())
//! # }
//! ```

mod diesel_client_repository;
mod diesel_enrollment_repository;
pub(crate) mod diesel_helpers;
mod diesel_program_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_client_repository::DieselClientRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_program_repository::DieselProgramRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
