//! Boolean queries over customer traits.
//!
//! A query such as `SMOKING = N AND ( EXERCISE = HIKE OR EXERCISE = BIKE )` is converted to
//! postfix with the shunting-yard algorithm and then evaluated once per customer.
//!
//! ```
//! use trait_query::{Customer, CustomerTable, QueryEngine};
//!
//! let mut customers = CustomerTable::new();
//! customers
//!     .insert(Customer::new("C1", "Ann").with_trait("SMOKING", "N").with_trait("GENDER", "F"))
//!     .unwrap();
//! customers
//!     .insert(Customer::new("C2", "Bea").with_trait("SMOKING", "Y").with_trait("GENDER", "F"))
//!     .unwrap();
//!
//! let engine = QueryEngine::new(customers);
//! let report = engine.search("SMOKING = N AND GENDER = F").unwrap();
//! assert_eq!(&[true, false], report.results());
//! ```
mod customers;
mod elements;
mod engine;
mod evaluator;
mod lexer;
mod observability;
mod postfix;
mod predicates;

pub use crate::{
    customers::{Customer, CustomerError, CustomerTable, Trait},
    elements::{Category, Element, Lexical, Operator},
    engine::{BatchOptions, BatchSummary, QueryEngine, QueryError, Report},
    evaluator::{evaluate, evaluate_all, validate, EvaluationError},
    lexer::{LexError, Lexer},
    postfix::{ConversionError, Postfix},
    predicates::{exclusive_match, exists, not_any, TraitPredicate},
};
