// ABOUTME: Main library module that exports the public API
// Messaging cost calculator for WhatsApp Cloud API and Twilio + WhatsApp usage

pub mod app;
pub mod pricing;
pub mod utils;

// Re-export commonly used types
pub use app::{AppConfig, ExportFormat};
pub use pricing::{ApiCategory, ConversationType, CostQuery, CostReport, PricingCatalog};
pub use utils::{format_cost, CostError, Result};
