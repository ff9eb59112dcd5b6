use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    Figure = 0,
    Weapon = 1,
    Room = 2,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Figure, Category::Weapon, Category::Room];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Category::Figure),
            1 => Some(Category::Weapon),
            2 => Some(Category::Room),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Figure => "figure",
            Category::Weapon => "weapon",
            Category::Room => "room",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn index_roundtrip() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(Category::from_index(i), Some(*category));
            assert_eq!(category.index(), i);
        }
        assert_eq!(Category::from_index(3), None);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Category::Weapon.to_string(), "weapon");
    }
}
