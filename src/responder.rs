//! Query responder
//!
//! Turns one free-text query into one text response using the data store.
//! Pure with respect to the store: the same input always yields the same
//! output, and no state is mutated.

use crate::classifier::{Intent, QueryCategory, QueryClassifier};
use crate::format;
use crate::models::{Company, Delta, Direction, Metric};
use crate::store::DataStore;
use std::sync::Arc;
use tracing::debug;

/// Year used for point values and summaries
pub const CURRENT_YEAR: &str = "2024";
/// Baseline year for change queries
pub const PREVIOUS_YEAR: &str = "2023";

pub const UNAVAILABLE_MESSAGE: &str =
    "Sorry, I couldn't load the financial data. Please check that the data file exists.";

pub const COMPARISON_SUMMARY: &str = "Company Comparison (2024):
Revenue: Microsoft ($245,122M) > Tesla ($97,690M) > Apple ($7,700M)
Net Income: Apple ($93,736M) > Microsoft ($88,136M) > Tesla ($7,153M)
Cash Flow: Apple ($118,254M) > Microsoft ($118,548M) > Tesla ($14,923M)";

pub const HELP_MESSAGE: &str = "I can help you with these financial queries:
• \"What is the total revenue?\" - Get revenue information
• \"How has net income changed?\" - See profit changes
• \"What is the operating cash flow?\" - Cash flow data
• \"Compare the companies\" - Side-by-side comparison
• \"What is the financial health?\" - Assets and equity info

You can also specify a company (Microsoft, Tesla, or Apple) in your question.";

/// Keyword-dispatch responder over a shared store
#[derive(Debug, Clone)]
pub struct QueryResponder {
    store: Arc<DataStore>,
}

impl QueryResponder {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Answer one query
    pub fn respond(&self, text: &str) -> String {
        if !self.store.is_available() {
            return UNAVAILABLE_MESSAGE.to_string();
        }

        let intent = QueryClassifier::classify(text);
        debug!(?intent, "Classified query");

        match intent.category {
            QueryCategory::Revenue => self.revenue(&intent),
            QueryCategory::NetIncome => self.metric_report(Metric::NetIncome, &intent),
            QueryCategory::CashFlow => self.metric_report(Metric::OperatingCashFlow, &intent),
            QueryCategory::Comparison => COMPARISON_SUMMARY.to_string(),
            QueryCategory::FinancialHealth => self.financial_health(),
            QueryCategory::Help => HELP_MESSAGE.to_string(),
        }
    }

    // =============================
    // Category Handlers
    // =============================

    /// Revenue has no change variant
    fn revenue(&self, intent: &Intent) -> String {
        match intent.company {
            Some(company) => self.point_value(company, Metric::TotalRevenue),
            None => self.point_summary(Metric::TotalRevenue),
        }
    }

    /// Net income and cash flow: point value or year-over-year change,
    /// for one company or all of them
    fn metric_report(&self, metric: Metric, intent: &Intent) -> String {
        match (intent.company, intent.wants_change) {
            (Some(company), true) => self.change_value(company, metric),
            (Some(company), false) => self.point_value(company, metric),
            (None, true) => self.change_summary(metric),
            (None, false) => self.point_summary(metric),
        }
    }

    fn financial_health(&self) -> String {
        let lines: Vec<String> = Company::ALL
            .into_iter()
            .filter_map(|company| {
                let assets = self.current(company, Metric::TotalAssets)?;
                let liabilities = self.current(company, Metric::TotalLiabilities)?;
                let equity = assets - liabilities;
                Some(format!(
                    "{}: Assets {}M, Equity {}M",
                    company,
                    format::money(assets),
                    format::money(equity)
                ))
            })
            .collect();

        if lines.is_empty() {
            return format!(
                "Sorry, I couldn't find assets and liabilities data for {}.",
                CURRENT_YEAR
            );
        }

        format!("Financial Position ({}): {}", CURRENT_YEAR, lines.join("; "))
    }

    // =============================
    // Response Templates
    // =============================

    fn point_value(&self, company: Company, metric: Metric) -> String {
        match self.current(company, metric) {
            Some(value) => format!(
                "{}'s {} in {} is {} million.",
                company,
                metric.phrase(),
                CURRENT_YEAR,
                format::money(value)
            ),
            None => missing_value(company, metric),
        }
    }

    fn point_summary(&self, metric: Metric) -> String {
        let parts: Vec<String> = Company::ALL
            .into_iter()
            .filter_map(|company| {
                self.current(company, metric)
                    .map(|value| format!("{}: {}M", company, format::money(value)))
            })
            .collect();

        if parts.is_empty() {
            return format!(
                "Sorry, I couldn't find {} data for {}.",
                metric.phrase(),
                CURRENT_YEAR
            );
        }

        format!("{} {}: {}", CURRENT_YEAR, metric, parts.join(", "))
    }

    fn change_value(&self, company: Company, metric: Metric) -> String {
        match self.year_over_year(company, metric) {
            Some(delta) if delta.direction() == Direction::Unchanged => format!(
                "{}'s {} was unchanged from {} to {}.",
                company,
                metric.phrase(),
                PREVIOUS_YEAR,
                CURRENT_YEAR
            ),
            Some(delta) => format!(
                "{}'s {} {} by {}M ({}) from {} to {}.",
                company,
                metric.phrase(),
                delta.direction(),
                format::change(&delta),
                format::percent(&delta),
                PREVIOUS_YEAR,
                CURRENT_YEAR
            ),
            None => missing_change(company, metric),
        }
    }

    fn change_summary(&self, metric: Metric) -> String {
        let parts: Vec<String> = Company::ALL
            .into_iter()
            .filter_map(|company| {
                self.year_over_year(company, metric)
                    .map(|delta| format!("{}: {}", company, describe_change(&delta)))
            })
            .collect();

        if parts.is_empty() {
            return format!(
                "Sorry, I couldn't compute {} changes from {} to {}.",
                metric.phrase(),
                PREVIOUS_YEAR,
                CURRENT_YEAR
            );
        }

        format!(
            "{} Changes ({} to {}): {}",
            metric,
            PREVIOUS_YEAR,
            CURRENT_YEAR,
            parts.join(", ")
        )
    }

    // =============================
    // Lookups
    // =============================

    fn current(&self, company: Company, metric: Metric) -> Option<f64> {
        self.store.value_at(company, metric, CURRENT_YEAR)
    }

    fn year_over_year(&self, company: Company, metric: Metric) -> Option<Delta> {
        self.store.delta(company, metric, PREVIOUS_YEAR, CURRENT_YEAR)
    }
}

fn describe_change(delta: &Delta) -> String {
    match delta.direction() {
        Direction::Unchanged => "unchanged (+0.0%)".to_string(),
        direction => format!(
            "{} by {}M ({})",
            direction,
            format::change(delta),
            format::percent(delta)
        ),
    }
}

fn missing_value(company: Company, metric: Metric) -> String {
    format!(
        "Sorry, I couldn't find {}'s {} for {}.",
        company,
        metric.phrase(),
        CURRENT_YEAR
    )
}

fn missing_change(company: Company, metric: Metric) -> String {
    format!(
        "Sorry, I couldn't compute the change in {}'s {} from {} to {}.",
        company,
        metric.phrase(),
        PREVIOUS_YEAR,
        CURRENT_YEAR
    )
}
