//! Search and filter criteria plus their query-string form
//!
//! Parameters whose value means "unconstrained" are left out entirely; the
//! service reads an absent parameter as no filter, not as an empty set.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Partner category selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Shop,
    Cafe,
    University,
    Sports,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::Shop,
        Category::Cafe,
        Category::University,
        Category::Sports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Shop => "shop",
            Category::Cafe => "cafe",
            Category::University => "university",
            Category::Sports => "sports",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| crate::MapError::ParseError(format!("unknown category: {s}")))
    }
}

/// The user-chosen constraints narrowing which points are queried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: Category,
    pub require_hot: bool,
    pub require_cold: bool,
    /// Free text; empty means no text filter
    pub query_text: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: Category::All,
            require_hot: false,
            require_cold: true,
            query_text: String::new(),
        }
    }
}

impl FilterCriteria {
    /// Criteria that constrain nothing: every field at its "no filter" value
    pub fn unconstrained() -> Self {
        Self {
            require_cold: false,
            ..Self::default()
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.to_query_parameters().is_empty()
    }
}

/// A partial update to `FilterCriteria`; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub category: Option<Category>,
    pub require_hot: Option<bool>,
    pub require_cold: Option<bool>,
    pub query_text: Option<String>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn require_hot(mut self, require_hot: bool) -> Self {
        self.require_hot = Some(require_hot);
        self
    }

    pub fn require_cold(mut self, require_cold: bool) -> Self {
        self.require_cold = Some(require_cold);
        self
    }

    pub fn query_text(mut self, text: impl Into<String>) -> Self {
        self.query_text = Some(text.into());
        self
    }

    /// Category and checkbox edits re-query at once; text edits wait for an
    /// explicit search.
    pub fn triggers_requery(&self) -> bool {
        self.category.is_some() || self.require_hot.is_some() || self.require_cold.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.triggers_requery() && self.query_text.is_none()
    }
}

/// Holds the current criteria for one map session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    criteria: FilterCriteria,
}

impl FilterState {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Apply a partial update and return the resulting criteria
    pub fn set(&mut self, patch: FilterPatch) -> FilterCriteria {
        if let Some(category) = patch.category {
            self.criteria.category = category;
        }
        if let Some(require_hot) = patch.require_hot {
            self.criteria.require_hot = require_hot;
        }
        if let Some(require_cold) = patch.require_cold {
            self.criteria.require_cold = require_cold;
        }
        if let Some(text) = patch.query_text {
            self.criteria.query_text = text;
        }
        self.criteria.clone()
    }

    pub fn to_query_parameters(&self) -> Vec<(&'static str, String)> {
        self.criteria.to_query_parameters()
    }
}

impl FilterCriteria {
    /// Ordered `name → value` pairs, omitting every "no filter" value
    pub fn to_query_parameters(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if self.category != Category::All {
            params.push(("category", self.category.as_str().to_string()));
        }
        if self.require_hot {
            params.push(("has_hot", "true".to_string()));
        }
        if self.require_cold {
            params.push(("has_cold", "true".to_string()));
        }
        let text = self.query_text.trim();
        if !text.is_empty() {
            params.push(("q", text.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_serialize_to_cold_only() {
        // `require_cold` defaults to true, so the stock criteria constrain on it
        let params = FilterState::default().to_query_parameters();
        assert_eq!(params, vec![("has_cold", "true".to_string())]);
    }

    #[test]
    fn test_unconstrained_criteria_yield_no_parameters() {
        let state = FilterState::new(FilterCriteria::unconstrained());
        assert!(state.to_query_parameters().is_empty());
        assert!(state.criteria().is_unconstrained());

        let mut toggled = FilterState::default();
        toggled.set(FilterPatch::new().require_cold(false));
        assert_eq!(toggled.criteria(), &FilterCriteria::unconstrained());
    }

    #[test]
    fn test_shop_with_hot_never_sends_has_cold() {
        let mut state = FilterState::default();
        state.set(
            FilterPatch::new()
                .category(Category::Shop)
                .require_hot(true)
                .require_cold(false),
        );
        assert_eq!(
            state.to_query_parameters(),
            vec![
                ("category", "shop".to_string()),
                ("has_hot", "true".to_string())
            ]
        );
    }

    #[test]
    fn test_parameter_order_is_stable() {
        let mut state = FilterState::default();
        state.set(
            FilterPatch::new()
                .query_text("  tea  ")
                .require_hot(true)
                .category(Category::Cafe),
        );
        let names: Vec<_> = state.to_query_parameters().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["category", "has_hot", "has_cold", "q"]);
        assert_eq!(state.to_query_parameters()[3].1, "tea");
    }

    #[test]
    fn test_blank_text_is_omitted() {
        let mut state = FilterState::default();
        state.set(FilterPatch::new().query_text("   ").require_cold(false));
        assert!(state.to_query_parameters().is_empty());
    }

    #[test]
    fn test_set_returns_updated_criteria() {
        let mut state = FilterState::default();
        let criteria = state.set(FilterPatch::new().category(Category::Sports));
        assert_eq!(criteria.category, Category::Sports);
        assert!(criteria.require_cold);
        assert_eq!(&criteria, state.criteria());
    }

    #[test]
    fn test_requery_trigger_rules() {
        assert!(FilterPatch::new().category(Category::Shop).triggers_requery());
        assert!(FilterPatch::new().require_hot(true).triggers_requery());
        assert!(!FilterPatch::new().query_text("water").triggers_requery());
        assert!(FilterPatch::new().is_empty());
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("library".parse::<Category>().is_err());
    }
}
