use crate::model::category::Category;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Opaque card identifier tagged with its category.
///
/// `index` is the position of the card inside its category of the
/// [`CardCatalog`](crate::model::catalog::CardCatalog) it was issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub category: Category,
    pub index: u8,
}

impl Card {
    pub const fn new(category: Category, index: u8) -> Self {
        Self { category, index }
    }

    pub const fn figure(index: u8) -> Self {
        Self::new(Category::Figure, index)
    }

    pub const fn weapon(index: u8) -> Self {
        Self::new(Category::Weapon, index)
    }

    pub const fn room(index: u8) -> Self {
        Self::new(Category::Room, index)
    }

    pub const fn is_room(self) -> bool {
        matches!(self.category, Category::Room)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.category, self.index)
    }
}
