//! Catalog entries as the cart sees them.

use crate::cart::VariantKey;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product with its selectable sizes and colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Current catalog price.
    pub price: Money,
    /// Image URLs; the first is shown in the cart.
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            images: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
        }
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// First image, or an empty string when the product has none.
    pub fn primary_image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or_default()
    }

    /// First size and first colour, used by quick-add buttons.
    pub fn default_variant(&self) -> Result<VariantKey, CommerceError> {
        match (self.sizes.first(), self.colors.first()) {
            (Some(size), Some(color)) => Ok(VariantKey::new(size.as_str(), color.as_str())),
            _ => Err(CommerceError::NoDefaultVariant(self.id.to_string())),
        }
    }

    /// Validate a shopper's size and colour choice.
    pub fn variant(&self, size: &str, color: &str) -> Result<VariantKey, CommerceError> {
        let offered = self.sizes.iter().any(|s| s == size) && self.colors.iter().any(|c| c == color);
        if !offered {
            return Err(CommerceError::VariantUnavailable {
                product_id: self.id.to_string(),
                size: size.to_string(),
                color: color.to_string(),
            });
        }
        Ok(VariantKey::new(size, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn tee() -> Product {
        Product::new("1", "Classic Tee", Money::new(1999, Currency::EUR))
            .with_images(["tee.jpg"])
            .with_sizes(["S", "M", "L"])
            .with_colors(["Black", "White"])
    }

    #[test]
    fn test_default_variant() {
        assert_eq!(tee().default_variant().unwrap(), VariantKey::new("S", "Black"));
    }

    #[test]
    fn test_no_default_without_sizes() {
        let product = Product::new("2", "Sticker", Money::new(300, Currency::EUR));
        assert!(matches!(
            product.default_variant(),
            Err(CommerceError::NoDefaultVariant(_))
        ));
        assert_eq!(product.primary_image(), "");
    }

    #[test]
    fn test_variant_selection() {
        let product = tee();
        assert!(product.variant("M", "White").is_ok());
        assert!(matches!(
            product.variant("XL", "White"),
            Err(CommerceError::VariantUnavailable { .. })
        ));
    }
}
