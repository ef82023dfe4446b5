//! The closed set of collections a stockbook persists.

use std::fmt;

/// One independently persisted collection.
///
/// Each collection is stored as a single whole-snapshot JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Product catalog: `{ id: product }`.
    Inventory,
    /// Sales log: `[ sale, ... ]`.
    Sales,
    /// Credentials: `{ username: password }`.
    Users,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Inventory, Collection::Sales, Collection::Users];

    /// File name used by [`crate::JsonFileStore`].
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Inventory => "inventory.json",
            Collection::Sales => "sales.json",
            Collection::Users => "users.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Inventory => "inventory",
            Collection::Sales => "sales",
            Collection::Users => "users",
        };
        write!(f, "{}", name)
    }
}
