use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// Knowledge-base category. Fixed set, stored as its snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Takaful,
    TakafulServices,
    Products,
    Contact,
    Agencies,
    Claims,
    Subscription,
    Payment,
    Faq,
    Company,
    Legal,
    General,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Self::Takaful,
        Self::TakafulServices,
        Self::Products,
        Self::Contact,
        Self::Agencies,
        Self::Claims,
        Self::Subscription,
        Self::Payment,
        Self::Faq,
        Self::Company,
        Self::Legal,
        Self::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Takaful => "takaful",
            Self::TakafulServices => "takaful_services",
            Self::Products => "products",
            Self::Contact => "contact",
            Self::Agencies => "agencies",
            Self::Claims => "claims",
            Self::Subscription => "subscription",
            Self::Payment => "payment",
            Self::Faq => "faq",
            Self::Company => "company",
            Self::Legal => "legal",
            Self::General => "general",
        }
    }

    /// Human-readable label used in formatted contexts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Takaful => "Takaful",
            Self::TakafulServices => "Services Takaful",
            Self::Products => "Produits",
            Self::Contact => "Contact",
            Self::Agencies => "Agences",
            Self::Claims => "Sinistres",
            Self::Subscription => "Souscription",
            Self::Payment => "Paiement",
            Self::Faq => "Questions fréquentes",
            Self::Company => "Entreprise",
            Self::Legal => "Mentions légales",
            Self::General => "Général",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownCategory {
                name: s.to_string(),
            })
    }
}
