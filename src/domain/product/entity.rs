use super::errors::ProductError;

// ============================================================================
// Product Entity
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: String,
    name: String,
    price: f64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Result<Self, ProductError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), ProductError> {
        if self.id.trim().is_empty() {
            return Err(ProductError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        Self::validate_price(self.price)
    }

    fn validate_price(price: f64) -> Result<(), ProductError> {
        if !price.is_finite() || price < 0.0 {
            return Err(ProductError::InvalidPrice(price));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: f64) -> Result<(), ProductError> {
        Self::validate_price(price)?;
        self.price = price;
        Ok(())
    }
}
