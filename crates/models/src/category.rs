use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Label of the filter-only sentinel that selects every category.
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

/// Fixed classification tag stored on every gallery item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Events,
    Causes,
    Volunteers,
    Community,
    Environment,
    Healthcare,
    Fundraising,
    Team,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    #[error("'{0}' is not a gallery category")]
    Unknown(String),

    #[error("'All Categories' is a filter, not a storable category")]
    FilterOnly,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Events,
        Category::Causes,
        Category::Volunteers,
        Category::Community,
        Category::Environment,
        Category::Healthcare,
        Category::Fundraising,
        Category::Team,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Events => "Events",
            Category::Causes => "Causes",
            Category::Volunteers => "Volunteers",
            Category::Community => "Community",
            Category::Environment => "Environment",
            Category::Healthcare => "Healthcare",
            Category::Fundraising => "Fundraising",
            Category::Team => "Team",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL_CATEGORIES_LABEL) {
            return Err(CategoryParseError::FilterOnly);
        }

        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CategoryParseError::Unknown(trimmed.to_string()))
    }
}

/// Category selection used when listing items.
///
/// `All` is the "All Categories" sentinel and never ends up on a stored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => *only == category,
        }
    }

    /// The concrete category to query for, `None` for the sentinel.
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(*category),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES_LABEL),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES_LABEL)
            || trimmed.eq_ignore_ascii_case("all")
        {
            return Ok(CategoryFilter::All);
        }
        trimmed.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = CategoryParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}
