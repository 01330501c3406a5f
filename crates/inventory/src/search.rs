use serde::{Deserialize, Serialize};

use sweetshop_core::validation::{self, FieldViolation, Validator};
use sweetshop_core::{DomainError, DomainResult, ValueObject};

use crate::sweet::Sweet;

/// Search request as received from a caller. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Validate and normalize into a [`SearchFilter`].
    ///
    /// - blank-after-trim strings count as absent; with nothing else given
    ///   this is `EmptyCriteria`, otherwise the blank field is a validation
    ///   failure
    /// - prices must be finite and non-negative
    /// - `min_price <= max_price` when both are given, else `InvalidRange`
    pub fn validate(&self) -> DomainResult<SearchFilter> {
        let name = normalize(self.name.as_deref());
        let category = normalize(self.category.as_deref());

        if name.is_none()
            && category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
        {
            return Err(DomainError::EmptyCriteria);
        }

        let mut v = Validator::new();
        if self.name.is_some() && name.is_none() {
            v.reject(FieldViolation::new("name", "cannot be empty"));
        }
        if self.category.is_some() && category.is_none() {
            v.reject(FieldViolation::new("category", "cannot be empty"));
        }
        let min_price = self
            .min_price
            .and_then(|p| v.check(validation::check_non_negative_number("minPrice", p)));
        let max_price = self
            .max_price
            .and_then(|p| v.check(validation::check_non_negative_number("maxPrice", p)));
        v.finish().map_err(DomainError::validation)?;

        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(DomainError::InvalidRange { min, max });
            }
        }

        Ok(SearchFilter {
            name,
            category,
            min_price: min_price.unwrap_or(0.0),
            max_price: max_price.unwrap_or(f64::INFINITY),
        })
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Normalized, validated search predicates combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    name: Option<String>,
    category: Option<String>,
    min_price: f64,
    max_price: f64,
}

impl SearchFilter {
    pub fn matches(&self, sweet: &Sweet) -> bool {
        let price = sweet.price().get();

        self.name
            .as_deref()
            .is_none_or(|n| sweet.name().to_lowercase().contains(n))
            && self
                .category
                .as_deref()
                .is_none_or(|c| sweet.category().to_lowercase().contains(c))
            && self.min_price <= price
            && price <= self.max_price
    }
}

impl ValueObject for SearchFilter {}
