pub mod catalog;
pub mod query;
pub mod report;
pub mod selectors;

#[cfg(test)]
mod catalog_test;

pub use catalog::{ConversationRate, ConversationRates, FlatRates, PricingCatalog};
pub use query::{load_queries, parse_count, parse_queries, CostQuery, RawCostQuery};
pub use report::{describe, render_rates, CostReport, ReportLine};
pub use selectors::{ApiCategory, ConversationType};
