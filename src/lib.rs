//! Financial Query Responder
//!
//! Answers free-text questions about a small financial dataset
//! (Microsoft, Tesla, Apple; revenue, net income, cash flow, assets,
//! liabilities) using ordered keyword matching.
//!
//! FLOW:
//! CSV → DataStore (once) → QueryClassifier → QueryResponder → text

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod responder;
pub mod store;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use classifier::{Intent, QueryCategory, QueryClassifier};
pub use responder::QueryResponder;
pub use store::DataStore;
