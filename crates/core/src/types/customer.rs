//! Customer classification enums.

use serde::{Deserialize, Serialize};

/// Customer pricing tier.
///
/// Cash-and-carry customers are either walk-in retail shoppers or registered
/// wholesale buyers (spaza shops, caterers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    #[default]
    Retail,
    Wholesale,
}

impl CustomerType {
    /// Lowercase label as used in persisted payloads and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Wholesale => "wholesale",
        }
    }
}

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Afrikaans.
    Af,
    /// isiZulu.
    Zu,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_type_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&CustomerType::Wholesale).unwrap(),
            "\"wholesale\""
        );
        let parsed: CustomerType = serde_json::from_str("\"retail\"").unwrap();
        assert_eq!(parsed, CustomerType::Retail);
    }

    #[test]
    fn test_language_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Zu).unwrap(), "\"zu\"");
    }
}
