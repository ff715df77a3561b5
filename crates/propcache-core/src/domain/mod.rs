//! Domain model: property listings, their price type, and change events.

mod events;
mod listing;
mod price;

pub use events::*;
pub use listing::*;
pub use price::*;
