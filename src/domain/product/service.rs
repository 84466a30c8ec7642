use super::entity::Product;
use super::errors::ProductError;

// ============================================================================
// Product Domain Service
// ============================================================================

pub struct ProductService;

impl ProductService {
    /// Raise every price by `percentage` percent.
    ///
    /// All new prices are checked before any product is changed.
    pub fn increase_price(products: &mut [Product], percentage: f64) -> Result<(), ProductError> {
        let new_prices = products
            .iter()
            .map(|product| {
                let price = product.price() + product.price() * percentage / 100.0;
                if !price.is_finite() || price < 0.0 {
                    Err(ProductError::InvalidPrice(price))
                } else {
                    Ok(price)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (product, price) in products.iter_mut().zip(new_prices) {
            product.change_price(price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_price_of_all_products() {
        let mut products = vec![
            Product::new("1", "Product 1", 10.0).unwrap(),
            Product::new("2", "Product 2", 20.0).unwrap(),
        ];

        ProductService::increase_price(&mut products, 100.0).unwrap();

        assert_eq!(products[0].price(), 20.0);
        assert_eq!(products[1].price(), 40.0);
    }

    #[test]
    fn test_decrease_below_zero_changes_nothing() {
        let mut products = vec![
            Product::new("1", "Product 1", 10.0).unwrap(),
            Product::new("2", "Product 2", 20.0).unwrap(),
        ];

        let result = ProductService::increase_price(&mut products, -150.0);

        assert!(matches!(result, Err(ProductError::InvalidPrice(_))));
        assert_eq!(products[0].price(), 10.0);
        assert_eq!(products[1].price(), 20.0);
    }
}
