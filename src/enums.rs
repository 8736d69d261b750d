//! Wire-level enumerations of the seller API.
//!
//! Each enum maps one-to-one onto the string constants the API expects;
//! `as_str` returns the exact wire spelling.

use serde_json::Value;

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// `asc`
    Ascending,
    /// `desc`
    Descending,
}

impl SortDirection {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Fulfillment scheme a posting belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingScheme {
    /// Cross-border shipments.
    Crossborder,
    /// Fulfilled by Ozon.
    Fbo,
    /// Fulfilled by seller.
    Fbs,
}

impl PostingScheme {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crossborder => "crossborder",
            Self::Fbo => "fbo",
            Self::Fbs => "fbs",
        }
    }

    /// All schemes.
    #[must_use]
    pub fn all() -> [Self; 3] {
        [Self::Crossborder, Self::Fbo, Self::Fbs]
    }
}

/// Lifecycle status of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingStatus {
    /// `awaiting_approve`
    AwaitingApprove,
    /// `awaiting_packaging`
    AwaitingPackaging,
    /// `awaiting_deliver`
    AwaitingDeliver,
    /// `delivering`
    Delivering,
    /// `delivered`
    Delivered,
    /// `cancelled`
    Cancelled,
}

impl PostingStatus {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingApprove => "awaiting_approve",
            Self::AwaitingPackaging => "awaiting_packaging",
            Self::AwaitingDeliver => "awaiting_deliver",
            Self::Delivering => "delivering",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Every status, in lifecycle order.
    #[must_use]
    pub fn list() -> [Self; 6] {
        [
            Self::AwaitingApprove,
            Self::AwaitingPackaging,
            Self::AwaitingDeliver,
            Self::Delivering,
            Self::Delivered,
            Self::Cancelled,
        ]
    }

    /// Every status as a JSON array of wire spellings.
    #[must_use]
    pub fn list_value() -> Value {
        Value::Array(Self::list().iter().map(|s| Value::String(s.as_str().to_owned())).collect())
    }
}

/// Moderation/processing state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductState {
    /// `processed`
    Processed,
    /// `processing`
    Processing,
    /// `moderating`
    Moderating,
    /// `failed_moderation`
    FailedModeration,
    /// `failed_validation`
    FailedValidation,
    /// `failed`
    Failed,
}

impl ProductState {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Processing => "processing",
            Self::Moderating => "moderating",
            Self::FailedModeration => "failed_moderation",
            Self::FailedValidation => "failed_validation",
            Self::Failed => "failed",
        }
    }
}

/// Delivery schema filter used by analytics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliverySchema {
    /// Fulfilled by seller.
    Fbs,
    /// Fulfilled by Ozon.
    Fbo,
    /// Cross-border.
    Crossborder,
}

impl DeliverySchema {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fbs => "fbs",
            Self::Fbo => "fbo",
            Self::Crossborder => "crossborder",
        }
    }
}

/// Finance transaction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// `ALL`
    All,
    /// `ORDERS`
    Orders,
    /// `RETURNS`
    Returns,
    /// `SERVICES`
    Services,
    /// `OTHER`
    Other,
    /// `DEPOSIT`
    Deposit,
}

impl TransactionType {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Orders => "ORDERS",
            Self::Returns => "RETURNS",
            Self::Services => "SERVICES",
            Self::Other => "OTHER",
            Self::Deposit => "DEPOSIT",
        }
    }
}

/// Outcome of automatic category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierStatus {
    /// `CLASSIFIED`
    Classified,
    /// `NOT_CLASSIFIED`
    NotClassified,
}

impl ClassifierStatus {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classified => "CLASSIFIED",
            Self::NotClassified => "NOT_CLASSIFIED",
        }
    }
}

/// Unit of product dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionUnit {
    /// `mm`
    Millimeters,
    /// `cm`
    Centimeters,
    /// `in`
    Inches,
}

impl DimensionUnit {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Centimeters => "cm",
            Self::Inches => "in",
        }
    }
}

/// Unit of product weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    /// `g`
    Grams,
    /// `kg`
    Kilograms,
    /// `lb`
    Pounds,
}

impl WeightUnit {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Kilograms => "kg",
            Self::Pounds => "lb",
        }
    }
}

/// Dictionary language for category/attribute endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// `DEFAULT`
    Default,
    /// `EN`
    En,
    /// `RU`
    Ru,
}

impl Language {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::En => "EN",
            Self::Ru => "RU",
        }
    }
}

macro_rules! enum_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::String(value.as_str().to_owned())
                }
            }
        )+
    };
}

enum_display!(
    SortDirection,
    PostingScheme,
    PostingStatus,
    ProductState,
    DeliverySchema,
    TransactionType,
    ClassifierStatus,
    DimensionUnit,
    WeightUnit,
    Language,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spellings() {
        assert_eq!(SortDirection::Ascending.as_str(), "asc");
        assert_eq!(PostingScheme::Crossborder.as_str(), "crossborder");
        assert_eq!(PostingStatus::AwaitingDeliver.as_str(), "awaiting_deliver");
        assert_eq!(ProductState::FailedModeration.as_str(), "failed_moderation");
        assert_eq!(TransactionType::Deposit.as_str(), "DEPOSIT");
        assert_eq!(ClassifierStatus::NotClassified.as_str(), "NOT_CLASSIFIED");
        assert_eq!(DimensionUnit::Inches.as_str(), "in");
        assert_eq!(WeightUnit::Pounds.as_str(), "lb");
        assert_eq!(Language::Default.as_str(), "DEFAULT");
    }

    #[test]
    fn test_status_list_is_complete() {
        let list = PostingStatus::list();
        assert_eq!(list.len(), 6);
        assert_eq!(list[0], PostingStatus::AwaitingApprove);
        assert_eq!(list[5], PostingStatus::Cancelled);
    }

    #[test]
    fn test_status_list_value() {
        let value = PostingStatus::list_value();
        let items = value.as_array().unwrap();
        assert_eq!(items[0], "awaiting_approve");
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn test_into_value() {
        let value: Value = SortDirection::Descending.into();
        assert_eq!(value, Value::String("desc".to_owned()));
    }
}
