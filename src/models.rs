//! Core data models for the financial dataset

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Company {
    Microsoft,
    Tesla,
    Apple,
}

impl Company {
    /// Fixed order used for company keyword matching and summaries
    pub const ALL: [Company; 3] = [Company::Microsoft, Company::Tesla, Company::Apple];

    /// Label as it appears in the `Company` column of the source
    pub fn label(self) -> &'static str {
        match self {
            Company::Microsoft => "Microsoft",
            Company::Tesla => "Tesla",
            Company::Apple => "Apple",
        }
    }

    /// Lowercase keyword that selects this company in a query
    pub fn keyword(self) -> &'static str {
        match self {
            Company::Microsoft => "microsoft",
            Company::Tesla => "tesla",
            Company::Apple => "apple",
        }
    }

    /// Exact, case-sensitive match against a source label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalRevenue,
    NetIncome,
    OperatingCashFlow,
    TotalAssets,
    TotalLiabilities,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::TotalRevenue,
        Metric::NetIncome,
        Metric::OperatingCashFlow,
        Metric::TotalAssets,
        Metric::TotalLiabilities,
    ];

    /// Label as it appears in the `Metric` column of the source
    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalRevenue => "Total Revenue(in millions)",
            Metric::NetIncome => "Net Income(in millions)",
            Metric::OperatingCashFlow => "Operating Cash Flow(in millions)",
            Metric::TotalAssets => "Total Assets(in millions)",
            Metric::TotalLiabilities => "Total Liabilities(in millions)",
        }
    }

    /// Exact, case-sensitive match against a source label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }

    /// Lowercase phrase used inside sentences ("Tesla's net income ...")
    pub fn phrase(self) -> &'static str {
        match self {
            Metric::TotalRevenue => "total revenue",
            Metric::NetIncome => "net income",
            Metric::OperatingCashFlow => "operating cash flow",
            Metric::TotalAssets => "total assets",
            Metric::TotalLiabilities => "total liabilities",
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Metric::TotalRevenue => "Total Revenue",
            Metric::NetIncome => "Net Income",
            Metric::OperatingCashFlow => "Operating Cash Flow",
            Metric::TotalAssets => "Total Assets",
            Metric::TotalLiabilities => "Total Liabilities",
        };
        write!(f, "{}", s)
    }
}

//
// ================= Records =================
//

/// One cell of the dataset, in millions of USD
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub company: Company,
    pub metric: Metric,
    pub year: String,
    pub value: f64,
}

impl Record {
    pub fn new(company: Company, metric: Metric, year: impl Into<String>, value: f64) -> Self {
        Self {
            company,
            metric,
            year: year.into(),
            value,
        }
    }
}

//
// ================= Derived Values =================
//

/// Year-over-year change of one metric for one company
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Delta {
    pub change: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increased,
    Decreased,
    Unchanged,
}

impl Delta {
    /// Direction follows the sign of the raw change, not the percentage
    pub fn direction(&self) -> Direction {
        if self.change > 0.0 {
            Direction::Increased
        } else if self.change < 0.0 {
            Direction::Decreased
        } else {
            Direction::Unchanged
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Increased => "increased",
            Direction::Decreased => "decreased",
            Direction::Unchanged => "was unchanged",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_exactly() {
        for company in Company::ALL {
            assert_eq!(Company::from_label(company.label()), Some(company));
        }
        for metric in Metric::ALL {
            assert_eq!(Metric::from_label(metric.label()), Some(metric));
        }
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(Company::from_label("microsoft"), None);
        assert_eq!(Metric::from_label("net income(in millions)"), None);
        assert_eq!(Metric::from_label("Net Income"), None);
    }

    #[test]
    fn test_direction_follows_change_sign() {
        let up = Delta { change: 10.0, percent: 5.0 };
        let down = Delta { change: -0.5, percent: -0.01 };
        let flat = Delta { change: 0.0, percent: 0.0 };

        assert_eq!(up.direction(), Direction::Increased);
        assert_eq!(down.direction(), Direction::Decreased);
        assert_eq!(flat.direction(), Direction::Unchanged);
    }
}
