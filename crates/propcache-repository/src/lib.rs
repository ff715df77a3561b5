//! # Propcache Repository
//!
//! Listing record store implementations.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ListingRepository>
//! MySqlListingRepository | InMemoryListingRepository
//!   ↓  ChangeNotifier  →  Arc<dyn ListingObserver> (after commit)
//! MySQL
//! ```

pub mod memory;
pub mod mysql;
pub mod notifier;
pub mod pool;
pub mod traits;

pub use memory::InMemoryListingRepository;
pub use mysql::*;
pub use notifier::ChangeNotifier;
pub use pool::*;
pub use traits::*;
