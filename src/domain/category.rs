use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Provider headline categories. "All" (no filter) is represented as
/// `Option<Category>::None` wherever a filter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Business,
    Technology,
    Sports,
    Health,
    Science,
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Technology,
        Category::Sports,
        Category::Health,
        Category::Science,
        Category::Entertainment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Sports => "sports",
            Category::Health => "health",
            Category::Science => "science",
            Category::Entertainment => "entertainment",
        }
    }

    /// Next selection in the filter bar, cycling through the "All" sentinel.
    pub fn cycle_next(current: Option<Category>) -> Option<Category> {
        match current {
            None => Some(Self::ALL[0]),
            Some(c) => {
                let i = Self::ALL.iter().position(|&x| x == c).unwrap_or(0);
                if i + 1 == Self::ALL.len() {
                    None
                } else {
                    Some(Self::ALL[i + 1])
                }
            }
        }
    }

    /// Previous selection in the filter bar, cycling through "All".
    pub fn cycle_prev(current: Option<Category>) -> Option<Category> {
        match current {
            None => Some(Self::ALL[Self::ALL.len() - 1]),
            Some(c) => {
                let i = Self::ALL.iter().position(|&x| x == c).unwrap_or(0);
                if i == 0 {
                    None
                } else {
                    Some(Self::ALL[i - 1])
                }
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
