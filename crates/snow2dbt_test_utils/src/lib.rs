//! snow2dbt Test Utilities
//!
//! Shared fakes and fixtures so the test suites never need a warehouse.
//!
//! # Usage
//!
//! ```rust,ignore
//! use snow2dbt_test_utils::{fixtures, StaticCatalog};
//!
//! let catalog = StaticCatalog::new().with_table(fixtures::users_snapshot());
//! let snapshot = fetch_table_snapshot(&catalog, &fixtures::users_table()).unwrap();
//! ```

pub mod catalog;
pub mod fixtures;
pub mod profiles;

// Re-exports for convenience
pub use catalog::StaticCatalog;
pub use profiles::TempProfilesDir;
