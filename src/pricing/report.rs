// ABOUTME: Spend reports built from evaluated cost queries
// Renders per-query lines, totals and the rate tables as text, JSON, CSV or Markdown

use serde::Serialize;

use super::catalog::PricingCatalog;
use super::query::CostQuery;
use super::selectors::{ApiCategory, ConversationType};
use crate::app::config::ExportFormat;
use crate::utils::error::Result;
use crate::utils::format::format_cost;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub description: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    lines: Vec<ReportLine>,
    total: f64,
}

impl CostReport {
    pub fn build(catalog: &PricingCatalog, queries: &[CostQuery]) -> Self {
        let lines: Vec<ReportLine> = queries
            .iter()
            .map(|query| ReportLine {
                description: describe(query),
                cost: catalog.evaluate(query),
            })
            .collect();
        let total = lines.iter().map(|line| line.cost).sum();

        Self { lines, total }
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        let rendered = match format {
            ExportFormat::Text => {
                let mut out = String::new();
                for line in &self.lines {
                    out.push_str(&format!(
                        "Total cost for {}: {}\n",
                        line.description,
                        format_cost(line.cost)
                    ));
                }
                out.push_str(&format!("Grand total: {}\n", format_cost(self.total)));
                out
            }
            ExportFormat::Json => serde_json::to_string_pretty(self)? + "\n",
            ExportFormat::Csv => {
                let mut out = String::from("description,cost\n");
                for line in &self.lines {
                    out.push_str(&format!("{},{:.6}\n", csv_field(&line.description), line.cost));
                }
                out.push_str(&format!("total,{:.6}\n", self.total));
                out
            }
            ExportFormat::Markdown => {
                let mut out = String::from("| Usage | Cost |\n|---|---:|\n");
                for line in &self.lines {
                    out.push_str(&format!(
                        "| {} | {} |\n",
                        line.description,
                        format_cost(line.cost)
                    ));
                }
                out.push_str(&format!("| **Total** | **{}** |\n", format_cost(self.total)));
                out
            }
        };
        Ok(rendered)
    }
}

/// Human readable summary of a query
pub fn describe(query: &CostQuery) -> String {
    match query {
        CostQuery::Flat { category, calls } => {
            format!("{calls} WhatsApp {category} API calls in Malaysia")
        }
        CostQuery::Conversation {
            conversation_type,
            conversations,
            messages,
        } => format!(
            "{conversations} {conversation_type} conversations and {messages} messages with Twilio + WhatsApp"
        ),
    }
}

struct RateRow {
    table: &'static str,
    selector: &'static str,
    unit: &'static str,
    rate: f64,
}

fn rate_rows(catalog: &PricingCatalog) -> Vec<RateRow> {
    let mut rows: Vec<RateRow> = ApiCategory::ALL
        .iter()
        .map(|category| RateRow {
            table: "whatsapp_malaysia",
            selector: category.as_str(),
            unit: "call",
            rate: catalog.flat_rate(*category),
        })
        .collect();

    for conversation_type in ConversationType::ALL {
        let rate = catalog.conversation_rates(conversation_type);
        rows.push(RateRow {
            table: "twilio_whatsapp",
            selector: conversation_type.as_str(),
            unit: "conversation",
            rate: rate.conversation,
        });
        rows.push(RateRow {
            table: "twilio_whatsapp",
            selector: conversation_type.as_str(),
            unit: "message",
            rate: rate.message,
        });
    }

    rows
}

/// Render both rate tables of a catalog
pub fn render_rates(catalog: &PricingCatalog, format: ExportFormat) -> Result<String> {
    let rows = rate_rows(catalog);
    let rendered = match format {
        ExportFormat::Text => {
            let mut out = String::new();
            let mut current_table = "";
            for row in &rows {
                if row.table != current_table {
                    current_table = row.table;
                    out.push_str(&format!("{}:\n", table_title(row.table)));
                }
                out.push_str(&format!("  {:<22} ${} per {}\n", row.selector, row.rate, row.unit));
            }
            out
        }
        ExportFormat::Json => serde_json::to_string_pretty(catalog)? + "\n",
        ExportFormat::Csv => {
            let mut out = String::from("table,selector,unit,rate\n");
            for row in &rows {
                out.push_str(&format!("{},{},{},{}\n", row.table, row.selector, row.unit, row.rate));
            }
            out
        }
        ExportFormat::Markdown => {
            let mut out = String::from("| Table | Selector | Unit | Rate (USD) |\n|---|---|---|---:|\n");
            for row in &rows {
                out.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    table_title(row.table),
                    row.selector,
                    row.unit,
                    row.rate
                ));
            }
            out
        }
    };
    Ok(rendered)
}

fn table_title(table: &str) -> &str {
    match table {
        "whatsapp_malaysia" => "WhatsApp (Malaysia)",
        "twilio_whatsapp" => "Twilio + WhatsApp",
        other => other,
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
