use core::str::FromStr;

use serde::{Deserialize, Serialize};

use husktrack_core::{DomainError, DomainResult};

/// The three coconut-byproduct SKUs the company trades.
///
/// These double as document ids in the `products` collection, which is why
/// the serialized form is the kebab-case SKU string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductSku {
    #[serde(rename = "coir-fiber")]
    CoirFiber,
    #[serde(rename = "coco-pith")]
    CocoPith,
    #[serde(rename = "husk-chips")]
    HuskChips,
}

impl ProductSku {
    pub const ALL: [ProductSku; 3] = [
        ProductSku::CoirFiber,
        ProductSku::CocoPith,
        ProductSku::HuskChips,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSku::CoirFiber => "coir-fiber",
            ProductSku::CocoPith => "coco-pith",
            ProductSku::HuskChips => "husk-chips",
        }
    }

    /// Human-readable name used on dashboards and as the ledger category for
    /// purchase expenses.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductSku::CoirFiber => "Coir Fiber",
            ProductSku::CocoPith => "Coco Pith",
            ProductSku::HuskChips => "Husk Chips",
        }
    }
}

impl core::fmt::Display for ProductSku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductSku {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coir-fiber" => Ok(ProductSku::CoirFiber),
            "coco-pith" => Ok(ProductSku::CocoPith),
            "husk-chips" => Ok(ProductSku::HuskChips),
            other => Err(DomainError::invalid_id(format!(
                "unknown product sku '{other}' (expected one of: coir-fiber, coco-pith, husk-chips)"
            ))),
        }
    }
}

/// Product record.
///
/// `stock` is an i64 so adjustment arithmetic stays in one signed domain, but
/// the non-negativity invariant is enforced by [`Product::adjusted_stock`]:
/// no operation may leave a persisted product with negative stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: ProductSku,
    pub name: String,
    /// Current quantity on hand. Never negative in persisted state.
    #[serde(default)]
    pub stock: i64,
    /// Acquisition cost per unit, in smallest currency unit (e.g. cents).
    pub unit_cost: i64,
    /// Sale price per unit, in smallest currency unit (e.g. cents).
    pub unit_price: i64,
}

impl Product {
    /// The seed catalog: every SKU at zero stock.
    ///
    /// Entry points write these into the `products` collection at startup for
    /// any SKU that does not already have a document.
    pub fn catalog() -> Vec<Product> {
        vec![
            Product {
                sku: ProductSku::CoirFiber,
                name: ProductSku::CoirFiber.display_name().to_string(),
                stock: 0,
                unit_cost: 800,
                unit_price: 1400,
            },
            Product {
                sku: ProductSku::CocoPith,
                name: ProductSku::CocoPith.display_name().to_string(),
                stock: 0,
                unit_cost: 500,
                unit_price: 900,
            },
            Product {
                sku: ProductSku::HuskChips,
                name: ProductSku::HuskChips.display_name().to_string(),
                stock: 0,
                unit_cost: 300,
                unit_price: 650,
            },
        ]
    }

    /// Compute the stock after applying a signed delta, rejecting any result
    /// that would take the quantity negative.
    pub fn adjusted_stock(&self, delta: i64) -> DomainResult<i64> {
        let new_stock = self
            .stock
            .checked_add(delta)
            .ok_or_else(|| DomainError::invariant("stock adjustment overflows"))?;
        if new_stock < 0 {
            return Err(DomainError::invariant(format!(
                "stock cannot go negative: {} available, change of {}",
                self.stock, delta
            )));
        }
        Ok(new_stock)
    }

    /// Whether an outbound movement of `quantity` units can be fulfilled.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity >= 0 && self.stock >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_round_trips_through_strings() {
        for sku in ProductSku::ALL {
            assert_eq!(sku.as_str().parse::<ProductSku>().unwrap(), sku);
        }
    }

    #[test]
    fn unknown_sku_is_rejected() {
        let err = "palm-oil".parse::<ProductSku>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn adjustment_enforces_non_negative_stock() {
        let mut product = Product::catalog().remove(0);
        product.stock = 100;

        assert_eq!(product.adjusted_stock(50).unwrap(), 150);
        assert_eq!(product.adjusted_stock(-100).unwrap(), 0);

        let err = product.adjusted_stock(-101).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => {
                assert!(msg.contains("100 available"));
            }
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn catalog_covers_every_sku_at_zero_stock() {
        let catalog = Product::catalog();
        assert_eq!(catalog.len(), ProductSku::ALL.len());
        for product in &catalog {
            assert_eq!(product.stock, 0);
            assert!(product.unit_cost > 0);
            assert!(product.unit_price > 0);
        }
    }
}
