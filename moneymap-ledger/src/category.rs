use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fixed set of transaction categories.
///
/// Declaration order is the order forms offer them and the order
/// breakdowns are reported in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    #[default]
    Food,
    Transportation,
    Housing,
    Shopping,
    Bills,
    Utilities,
    Entertainment,
    Healthcare,
    Education,
    Work,
    Salary,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Shopping,
        Category::Bills,
        Category::Utilities,
        Category::Entertainment,
        Category::Healthcare,
        Category::Education,
        Category::Work,
        Category::Salary,
        Category::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Housing => "Housing",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Work => "Work",
            Self::Salary => "Salary",
            Self::Other => "Other",
        }
    }

    fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    /// Next category in form order, wrapping around
    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous category in form order, wrapping around
    pub fn previous(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| LedgerError::UnknownCategory(needle.to_string()))
    }
}
