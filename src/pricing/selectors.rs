// ABOUTME: Closed selector enumerations for the two rate tables
// Parses user-facing labels and reports the valid set on failure

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::error::CostError;

/// WhatsApp Cloud API message category, billed per call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiCategory {
    Marketing,
    Utility,
    Authentication,
    Service,
}

impl ApiCategory {
    pub const ALL: [ApiCategory; 4] = [
        Self::Marketing,
        Self::Utility,
        Self::Authentication,
        Self::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marketing => "marketing",
            Self::Utility => "utility",
            Self::Authentication => "authentication",
            Self::Service => "service",
        }
    }

    /// Comma separated list of every accepted label
    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ApiCategory {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marketing" => Ok(Self::Marketing),
            "utility" => Ok(Self::Utility),
            "authentication" => Ok(Self::Authentication),
            "service" => Ok(Self::Service),
            _ => Err(CostError::InvalidCategory {
                given: s.to_string(),
                valid: Self::valid_labels(),
            }),
        }
    }
}

impl std::fmt::Display for ApiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Twilio + WhatsApp billing regime, billed per conversation and per message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationType {
    Utility,
    ServiceConversation,
}

impl ConversationType {
    pub const ALL: [ConversationType; 2] = [Self::Utility, Self::ServiceConversation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utility => "utility",
            Self::ServiceConversation => "service_conversation",
        }
    }

    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ConversationType {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "utility" => Ok(Self::Utility),
            "service_conversation" => Ok(Self::ServiceConversation),
            _ => Err(CostError::InvalidConversationType {
                given: s.to_string(),
                valid: Self::valid_labels(),
            }),
        }
    }
}

impl std::fmt::Display for ConversationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
