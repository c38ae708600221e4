use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Category of a bookable service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Logistics,
    Transportation,
    Consulting,
}

impl ServiceType {
    /// Convert service type to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Logistics => "logistics",
            ServiceType::Transportation => "transportation",
            ServiceType::Consulting => "consulting",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a customer in the database
///
/// Customers are append-only reference data: created once, never updated.
/// The email address doubles as a natural key for bulk-import de-duplication.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    #[schema(example = "Acme Corp")]
    pub name: String,
    #[schema(example = "ops@acme.example")]
    pub email: String,
    #[schema(example = "+1-555-0100")]
    pub phone: Option<String>,
    #[schema(example = "1 Warehouse Way, Springfield")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Represents the data needed to create a new customer
///
/// Used for POST /api/customers requests; id and created_at are generated
/// by the database.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[schema(example = "Acme Corp")]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "ops@acme.example")]
    pub email: String,
    #[schema(example = "+1-555-0100")]
    pub phone: Option<String>,
    #[schema(example = "1 Warehouse Way, Springfield")]
    pub address: Option<String>,
}

/// Represents a bookable service in the database
///
/// Services are append-only reference data; the name is unique because it
/// is the lookup key used by bulk import.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    pub id: Uuid,
    #[schema(example = "Express Freight")]
    pub name: String,
    pub service_type: ServiceType,
    #[schema(example = "Door-to-door freight within 3 days")]
    pub description: Option<String>,
    /// Price per unit quantity
    #[schema(value_type = f64, example = 150.0)]
    pub base_price: Decimal,
    /// Whole days from booking to estimated delivery
    #[schema(example = 3, minimum = 0)]
    pub estimated_delivery_days: i32,
    pub created_at: DateTime<Utc>,
}

/// Represents the data needed to create a new service
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateService {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[schema(example = "Express Freight")]
    pub name: String,
    pub service_type: ServiceType,
    #[schema(example = "Door-to-door freight within 3 days")]
    pub description: Option<String>,
    /// Price per unit quantity
    #[validate(custom = "crate::validation::validate_non_negative_price")]
    #[schema(value_type = f64, example = 150.0)]
    pub base_price: Decimal,
    /// Whole days from booking to estimated delivery
    #[validate(range(min = 0, message = "Estimated delivery days must not be negative"))]
    #[schema(example = 3, minimum = 0)]
    pub estimated_delivery_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_service_type_round_trip() {
        for (variant, s) in [
            (ServiceType::Logistics, "\"logistics\""),
            (ServiceType::Transportation, "\"transportation\""),
            (ServiceType::Consulting, "\"consulting\""),
        ] {
            let json = serde_json::to_string(&variant).expect("Failed to serialize ServiceType");
            assert_eq!(json, s);
            let parsed: ServiceType = serde_json::from_str(s).expect("Failed to deserialize");
            assert_eq!(parsed, variant);
        }
    }

    #[test]
    fn test_service_type_rejects_unknown_value() {
        let result = serde_json::from_str::<ServiceType>("\"catering\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_customer_serialization() {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: "Acme Corp".to_string(),
            email: "ops@acme.example".to_string(),
            phone: None,
            address: Some("1 Warehouse Way".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&customer).expect("Failed to serialize Customer");
        assert!(json.contains("\"name\":\"Acme Corp\""));
        assert!(json.contains("\"email\":\"ops@acme.example\""));
        assert!(json.contains("\"phone\":null"));
        assert!(json.contains("\"created_at\""));
    }

    #[test]
    fn test_create_customer_validation() {
        let valid = CreateCustomer {
            name: "Acme Corp".to_string(),
            email: "ops@acme.example".to_string(),
            phone: None,
            address: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateCustomer {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_name = CreateCustomer {
            name: String::new(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_create_service_deserialization() {
        let json = r#"{
            "name": "Express Freight",
            "service_type": "logistics",
            "description": "Door-to-door freight",
            "base_price": "150.00",
            "estimated_delivery_days": 3
        }"#;

        let service: CreateService =
            serde_json::from_str(json).expect("Failed to deserialize CreateService");
        assert_eq!(service.name, "Express Freight");
        assert_eq!(service.service_type, ServiceType::Logistics);
        assert_eq!(service.base_price, dec!(150.00));
        assert_eq!(service.estimated_delivery_days, 3);
    }

    #[test]
    fn test_create_service_validation() {
        let service = CreateService {
            name: "Express Freight".to_string(),
            service_type: ServiceType::Logistics,
            description: None,
            base_price: dec!(-1),
            estimated_delivery_days: 3,
        };
        assert!(service.validate().is_err());

        let service = CreateService {
            base_price: dec!(0),
            estimated_delivery_days: -1,
            ..service
        };
        assert!(service.validate().is_err());

        let service = CreateService {
            estimated_delivery_days: 0,
            ..service
        };
        assert!(service.validate().is_ok());
    }
}
