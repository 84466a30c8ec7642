use super::errors::CustomerError;
use super::value_objects::Address;

// ============================================================================
// Customer Entity
// ============================================================================
//
// Invariants:
// - id and name are never empty
// - an active customer always has an address
// - reward points only grow and stay finite
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: String,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: f64,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, CustomerError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0.0,
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Rebuild a customer from stored state, re-checking the invariants
    pub fn restore(
        id: impl Into<String>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: f64,
    ) -> Result<Self, CustomerError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address,
            active,
            reward_points,
        };
        customer.validate()?;
        if customer.active && customer.address.is_none() {
            return Err(CustomerError::AddressRequired);
        }
        if !customer.reward_points.is_finite() || customer.reward_points < 0.0 {
            return Err(CustomerError::InvalidRewardPoints(customer.reward_points));
        }
        Ok(customer)
    }

    fn validate(&self) -> Result<(), CustomerError> {
        if self.id.trim().is_empty() {
            return Err(CustomerError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(CustomerError::EmptyName);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> f64 {
        self.reward_points
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), CustomerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CustomerError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    pub fn activate(&mut self) -> Result<(), CustomerError> {
        if self.address.is_none() {
            return Err(CustomerError::AddressRequired);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn add_reward_points(&mut self, points: f64) -> Result<(), CustomerError> {
        if !points.is_finite() || points < 0.0 {
            return Err(CustomerError::InvalidRewardPoints(points));
        }
        let total = self.reward_points + points;
        if !total.is_finite() {
            return Err(CustomerError::InvalidRewardPoints(total));
        }
        self.reward_points = total;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address() -> Address {
        Address::new("Street 1", 123, "13330-250", "São Paulo").unwrap()
    }

    #[test]
    fn test_customer_creation() {
        let customer = Customer::new("123", "John").unwrap();

        assert_eq!(customer.id(), "123");
        assert_eq!(customer.name(), "John");
        assert!(customer.address().is_none());
        assert!(!customer.is_active());
        assert_eq!(customer.reward_points(), 0.0);
    }

    #[test]
    fn test_customer_requires_id_and_name() {
        assert_eq!(Customer::new("", "John"), Err(CustomerError::EmptyId));
        assert_eq!(Customer::new("123", " "), Err(CustomerError::EmptyName));
    }

    #[test]
    fn test_change_name() {
        let mut customer = Customer::new("123", "John").unwrap();

        customer.change_name("Jane").unwrap();
        assert_eq!(customer.name(), "Jane");

        assert_eq!(customer.change_name(""), Err(CustomerError::EmptyName));
        assert_eq!(customer.name(), "Jane");
    }

    #[test]
    fn test_activate_requires_address() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        assert_eq!(customer.activate(), Err(CustomerError::AddressRequired));
        assert!(!customer.is_active());

        customer.change_address(test_address());
        customer.activate().unwrap();
        assert!(customer.is_active());

        customer.deactivate();
        assert!(!customer.is_active());
    }

    #[test]
    fn test_reward_points_accumulate() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();

        customer.add_reward_points(10.0).unwrap();
        customer.add_reward_points(5.5).unwrap();
        assert_eq!(customer.reward_points(), 15.5);

        assert!(customer.add_reward_points(-1.0).is_err());
        assert_eq!(customer.reward_points(), 15.5);
    }

    #[test]
    fn test_zero_reward_points_accepted() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        customer.add_reward_points(0.0).unwrap();
        assert_eq!(customer.reward_points(), 0.0);

        assert_eq!(
            customer.add_reward_points(-1.0).unwrap_err().to_string(),
            "Reward points must be finite and non-negative: -1"
        );
    }

    #[test]
    fn test_restore_active_customer_without_address_fails() {
        let result = Customer::restore("1", "Customer 1", None, true, 0.0);
        assert_eq!(result, Err(CustomerError::AddressRequired));

        let restored = Customer::restore("1", "Customer 1", Some(test_address()), true, 20.0).unwrap();
        assert!(restored.is_active());
        assert_eq!(restored.reward_points(), 20.0);
    }

    #[test]
    fn test_reward_points_overflow_rejected() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        customer.add_reward_points(f64::MAX).unwrap();

        let result = customer.add_reward_points(f64::MAX);
        assert!(matches!(result, Err(CustomerError::InvalidRewardPoints(_))));
        assert_eq!(customer.reward_points(), f64::MAX);
    }

    #[test]
    fn test_restore_rejects_invalid_reward_points() {
        for points in [f64::INFINITY, f64::NAN, -1.0] {
            let result = Customer::restore("1", "Customer 1", None, false, points);
            assert!(matches!(result, Err(CustomerError::InvalidRewardPoints(_))));
        }

        let restored = Customer::restore("1", "Customer 1", None, false, 0.0).unwrap();
        assert_eq!(restored.reward_points(), 0.0);
    }
}
