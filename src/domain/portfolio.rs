//! Portfolio grid filtering.

use std::fmt;

/// Category filter selected in the portfolio toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PortfolioFilter {
    /// Show every item
    #[default]
    All,
    /// Show items of one category
    Category(String),
}

impl PortfolioFilter {
    /// Parse the `data-filter` value of a filter button.
    ///
    /// # Example
    /// ```
    /// use portfolio_interactions::PortfolioFilter;
    ///
    /// assert_eq!(PortfolioFilter::parse("all"), PortfolioFilter::All);
    /// assert!(PortfolioFilter::parse("retratos").matches("retratos"));
    /// ```
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => PortfolioFilter::All,
            category => PortfolioFilter::Category(category.to_string()),
        }
    }

    /// Whether an item of `category` is shown under this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            PortfolioFilter::All => true,
            PortfolioFilter::Category(selected) => selected == category,
        }
    }
}

impl fmt::Display for PortfolioFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioFilter::All => f.write_str("all"),
            PortfolioFilter::Category(category) => f.write_str(category),
        }
    }
}

/// An item in the portfolio grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioItem {
    /// Item identifier
    pub id: String,
    /// `data-category` value
    pub category: String,
}

impl PortfolioItem {
    /// Describe a grid item.
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
        }
    }
}

/// Visibility of every item under `filter`, in grid order.
pub fn apply_filter<'a>(
    filter: &PortfolioFilter,
    items: &'a [PortfolioItem],
) -> Vec<(&'a PortfolioItem, bool)> {
    items
        .iter()
        .map(|item| (item, filter.matches(&item.category)))
        .collect()
}
