//! Fixture categories and their REST endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A group of fixtures that target the same resource endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `/user` fixtures.
    User,
    /// `/product` fixtures.
    Product,
    /// `/order` fixtures.
    Order,
}

impl Category {
    /// Every category, in the order a full run executes them.
    ///
    /// Orders reference users and products, so those are created first.
    pub const ALL: [Category; 3] = [Category::User, Category::Product, Category::Order];

    /// Lowercase category name, as used in fixture file names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Product => "product",
            Self::Order => "order",
        }
    }

    /// Endpoint path the category's requests are sent to.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::User => "/user",
            Self::Product => "/product",
            Self::Order => "/order",
        }
    }

    /// Whether `get` cases in this category are sent as `GET {endpoint}/{id}`.
    #[must_use]
    pub fn supports_lookup(self) -> bool {
        matches!(self, Self::User | Self::Product)
    }

    /// File name of the request payloads for this category.
    #[must_use]
    pub fn payload_file_name(self) -> String {
        format!("{}_testcases.json", self.as_str())
    }

    /// File name of the expected responses for this category.
    #[must_use]
    pub fn response_file_name(self) -> String {
        format!("{}_responses.json", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "product" => Ok(Self::Product),
            "order" => Ok(Self::Order),
            _ => Err(CoreError::UnknownCategory(s.to_string())),
        }
    }
}
