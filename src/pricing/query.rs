// ABOUTME: Typed cost queries and validation of raw, untrusted usage input
// Negative counts are rejected here so the catalog only ever sees u64 counts

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::catalog::PricingCatalog;
use super::selectors::{ApiCategory, ConversationType};
use crate::utils::error::{CostError, Result};

/// A validated pricing request against one of the two rate tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostQuery {
    Flat {
        category: ApiCategory,
        calls: u64,
    },
    Conversation {
        conversation_type: ConversationType,
        conversations: u64,
        messages: u64,
    },
}

/// Query as read from a usage file, before selectors and counts are checked
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawCostQuery {
    Flat {
        category: String,
        calls: i64,
    },
    Conversation {
        conversation_type: String,
        conversations: i64,
        messages: i64,
    },
}

impl TryFrom<RawCostQuery> for CostQuery {
    type Error = CostError;

    fn try_from(raw: RawCostQuery) -> Result<Self> {
        match raw {
            RawCostQuery::Flat { category, calls } => Ok(Self::Flat {
                category: category.parse()?,
                calls: checked_count("calls", calls)?,
            }),
            RawCostQuery::Conversation {
                conversation_type,
                conversations,
                messages,
            } => Ok(Self::Conversation {
                conversation_type: conversation_type.parse()?,
                conversations: checked_count("conversations", conversations)?,
                messages: checked_count("messages", messages)?,
            }),
        }
    }
}

fn checked_count(field: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| CostError::InvalidCount {
        field,
        given: value.to_string(),
    })
}

/// Parse a usage count typed by a user
pub fn parse_count(input: &str, field: &'static str) -> Result<u64> {
    input.trim().parse::<u64>().map_err(|_| CostError::InvalidCount {
        field,
        given: input.to_string(),
    })
}

/// Read a JSON array of queries and validate every entry
pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<Vec<CostQuery>> {
    let content = fs::read_to_string(path)?;
    parse_queries(&content)
}

pub fn parse_queries(json: &str) -> Result<Vec<CostQuery>> {
    let raw: Vec<RawCostQuery> = serde_json::from_str(json)?;
    raw.into_iter().map(CostQuery::try_from).collect()
}

impl PricingCatalog {
    pub fn evaluate(&self, query: &CostQuery) -> f64 {
        match *query {
            CostQuery::Flat { category, calls } => self.flat_cost(category, calls),
            CostQuery::Conversation {
                conversation_type,
                conversations,
                messages,
            } => self.conversation_cost(conversation_type, conversations, messages),
        }
    }
}
