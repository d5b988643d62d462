use serde::{Deserialize, Serialize};

/// Identity of the product being analysed, as handed to every collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub product_url: String,
    pub product_name: String,
    pub brand_name: Option<String>,
}

impl ProductQuery {
    /// Builds a query, trimming the name and dropping a blank brand.
    #[must_use]
    pub fn new(
        product_url: impl Into<String>,
        product_name: impl Into<String>,
        brand_name: Option<String>,
    ) -> Self {
        Self {
            product_url: product_url.into(),
            product_name: product_name.into().trim().to_string(),
            brand_name: brand_name
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
        }
    }

    /// Label used in search queries and prompts: `"Brand Product"` when a
    /// brand is known, otherwise the bare product name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.brand_name {
            Some(brand) if !self.product_name.starts_with(brand.as_str()) => {
                format!("{brand} {}", self.product_name)
            }
            _ => self.product_name.clone(),
        }
    }
}
