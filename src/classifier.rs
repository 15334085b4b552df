//! Query Classifier
//!
//! Maps free text to a query category using ordered keyword tables.
//! Categories are tested in priority order; the first one with a matching
//! keyword wins even if a later category would also match.

use crate::models::Company;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCategory {
    Revenue,
    NetIncome,
    CashFlow,
    Comparison,
    FinancialHealth,
    Help,
}

/// Static keyword lists, in priority order
const CATEGORY_KEYWORDS: &[(QueryCategory, &[&str])] = &[
    (QueryCategory::Revenue, &["total revenue", "revenue"]),
    (QueryCategory::NetIncome, &["net income", "profit", "earnings"]),
    (QueryCategory::CashFlow, &["cash flow", "operating cash"]),
    (QueryCategory::Comparison, &["compare", "comparison"]),
    (
        QueryCategory::FinancialHealth,
        &["financial health", "assets", "liabilities"],
    ),
];

const CHANGE_KEYWORDS: &[&str] = &["change", "growth"];

/// Classified query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub category: QueryCategory,
    pub company: Option<Company>,
    pub wants_change: bool,
}

/// Query classifier
pub struct QueryClassifier;

impl QueryClassifier {
    /// Classify user input. Input is lowercased and trimmed first.
    pub fn classify(text: &str) -> Intent {
        let query = normalize(text);

        Intent {
            category: Self::category(&query),
            company: Self::company(&query),
            wants_change: CHANGE_KEYWORDS.iter().any(|kw| query.contains(kw)),
        }
    }

    fn category(query: &str) -> QueryCategory {
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| query.contains(kw)))
            .map(|(category, _)| *category)
            .unwrap_or(QueryCategory::Help)
    }

    /// First company mentioned in Microsoft → Tesla → Apple order
    fn company(query: &str) -> Option<Company> {
        Company::ALL
            .into_iter()
            .find(|company| query.contains(company.keyword()))
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
