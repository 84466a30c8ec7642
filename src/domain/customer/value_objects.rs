use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::CustomerError;

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Customer address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, CustomerError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), CustomerError> {
        if self.street.trim().is_empty() {
            return Err(CustomerError::InvalidAddress("street is required"));
        }
        if self.number == 0 {
            return Err(CustomerError::InvalidAddress("number must be greater than zero"));
        }
        if self.zip.trim().is_empty() {
            return Err(CustomerError::InvalidAddress("zip is required"));
        }
        if self.city.trim().is_empty() {
            return Err(CustomerError::InvalidAddress("city is required"));
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
