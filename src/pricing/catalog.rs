// ABOUTME: Immutable pricing catalog for WhatsApp and Twilio + WhatsApp usage
// Holds both rate tables and computes totals as a linear function of usage counts

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::selectors::{ApiCategory, ConversationType};
use crate::utils::error::{CostError, Result};

/// WhatsApp Cloud API per-call rates in Malaysia (USD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatRates {
    pub marketing: f64,
    pub utility: f64,
    pub authentication: f64,
    pub service: f64,
}

impl Default for FlatRates {
    fn default() -> Self {
        Self {
            marketing: 0.086,
            utility: 0.02,
            authentication: 0.018,
            service: 0.022,
        }
    }
}

impl FlatRates {
    pub fn rate(&self, category: ApiCategory) -> f64 {
        match category {
            ApiCategory::Marketing => self.marketing,
            ApiCategory::Utility => self.utility,
            ApiCategory::Authentication => self.authentication,
            ApiCategory::Service => self.service,
        }
    }
}

/// Per-conversation and per-message price pair for one billing regime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationRate {
    pub conversation: f64,
    pub message: f64,
}

/// Twilio + WhatsApp rates keyed by conversation type (USD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversationRates {
    pub utility: ConversationRate,
    pub service_conversation: ConversationRate,
}

impl Default for ConversationRates {
    fn default() -> Self {
        Self {
            utility: ConversationRate {
                conversation: 0.02,
                message: 0.005,
            },
            service_conversation: ConversationRate {
                conversation: 0.0022,
                message: 0.005,
            },
        }
    }
}

impl ConversationRates {
    pub fn rate(&self, conversation_type: ConversationType) -> ConversationRate {
        match conversation_type {
            ConversationType::Utility => self.utility,
            ConversationType::ServiceConversation => self.service_conversation,
        }
    }
}

/// Both rate tables, fixed once constructed.
///
/// The catalog has no interior mutability, so a single instance can be shared
/// freely between threads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingCatalog {
    whatsapp_malaysia: FlatRates,
    twilio_whatsapp: ConversationRates,
}

impl PricingCatalog {
    /// Build a catalog from alternate rates, rejecting negative or non-finite prices
    pub fn new(flat: FlatRates, conversation: ConversationRates) -> Result<Self> {
        let catalog = Self {
            whatsapp_malaysia: flat,
            twilio_whatsapp: conversation,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load an alternate catalog from a TOML or JSON file.
    ///
    /// Flat categories and whole conversation regimes missing from the file
    /// keep their default rates. A regime that is present must give both its
    /// `conversation` and `message` rate.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let catalog: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(CostError::Config(format!(
                    "unsupported pricing file '{}': expected a .toml or .json extension",
                    path.display()
                )))
            }
        };

        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        for category in ApiCategory::ALL {
            check_rate(&format!("whatsapp_malaysia.{category}"), self.flat_rate(category))?;
        }
        for conversation_type in ConversationType::ALL {
            let rate = self.conversation_rates(conversation_type);
            check_rate(
                &format!("twilio_whatsapp.{conversation_type}.conversation"),
                rate.conversation,
            )?;
            check_rate(
                &format!("twilio_whatsapp.{conversation_type}.message"),
                rate.message,
            )?;
        }
        Ok(())
    }

    pub fn flat_rates(&self) -> &FlatRates {
        &self.whatsapp_malaysia
    }

    pub fn conversation_rate_table(&self) -> &ConversationRates {
        &self.twilio_whatsapp
    }

    pub fn flat_rate(&self, category: ApiCategory) -> f64 {
        self.whatsapp_malaysia.rate(category)
    }

    pub fn conversation_rates(&self, conversation_type: ConversationType) -> ConversationRate {
        self.twilio_whatsapp.rate(conversation_type)
    }

    /// Cost of `calls` WhatsApp API calls in the given category
    pub fn flat_cost(&self, category: ApiCategory, calls: u64) -> f64 {
        self.flat_rate(category) * calls as f64
    }

    /// Cost of Twilio + WhatsApp usage: conversations plus messages
    pub fn conversation_cost(
        &self,
        conversation_type: ConversationType,
        conversations: u64,
        messages: u64,
    ) -> f64 {
        let rate = self.conversation_rates(conversation_type);
        rate.conversation * conversations as f64 + rate.message * messages as f64
    }

    /// Same as [`flat_cost`](Self::flat_cost) for an unparsed category label
    pub fn compute_flat_cost(&self, category: &str, calls: u64) -> Result<f64> {
        let category: ApiCategory = category.parse()?;
        Ok(self.flat_cost(category, calls))
    }

    /// Same as [`conversation_cost`](Self::conversation_cost) for an unparsed type label
    pub fn compute_conversation_cost(
        &self,
        conversation_type: &str,
        conversations: u64,
        messages: u64,
    ) -> Result<f64> {
        let conversation_type: ConversationType = conversation_type.parse()?;
        Ok(self.conversation_cost(conversation_type, conversations, messages))
    }
}

fn check_rate(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CostError::Config(format!(
            "rate {name} must be a non-negative number, got {value}"
        )))
    }
}
