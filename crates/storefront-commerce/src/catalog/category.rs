//! Product categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of categories a product can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Accessories,
    Electronics,
    Clothing,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [
        Category::Accessories,
        Category::Electronics,
        Category::Clothing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Accessories => "Accessories",
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Category names are matched exactly, as the API stores them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("Electronics".parse::<Category>(), Ok(Category::Electronics));
        assert!("electronics".parse::<Category>().is_err());
        assert!("Food".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_wire_name() {
        let json = serde_json::to_string(&Category::Clothing).unwrap();
        assert_eq!(json, "\"Clothing\"");
    }
}
