//! SQLite-backed stores for users, properties, and favorites.

pub mod favorites;
pub mod properties;
pub mod users;

pub use favorites::{FavoriteStore, Toggle};
pub use properties::PropertyStore;
pub use users::UserStore;
