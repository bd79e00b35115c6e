//! Expense categories
//!
//! The ledger uses a fixed set of nine categories. Free-text categories are
//! rejected at parse time, so every stored expense carries one of these.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// All categories in menu order
    pub const ALL: [Category; 9] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::BillsAndUtilities,
        Category::Healthcare,
        Category::Education,
        Category::Groceries,
        Category::Other,
    ];

    /// Display name, as stored in the expense table
    pub fn name(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Groceries => "Groceries",
            Category::Other => "Other",
        }
    }

    /// Look up a category by its 1-based menu position
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// 1-based menu position
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the display name (case-insensitive) or the menu number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| UnknownCategory(s.to_string()));
        }

        Self::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Error for a category name outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        write!(
            f,
            "Unknown category '{}'. Expected one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownCategory {}
