use crate::{
    customers::{Customer, CustomerTable},
    evaluator::{self, EvaluationError},
    observability::{log_debug, log_info, log_warn},
    postfix::{ConversionError, Postfix},
};
use itertools::Itertools;
use std::{fmt, io};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{0}")]
    Conversion(#[from] ConversionError),
    #[error("improperly formatted query: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Runs infix queries against a fixed set of customers.
pub struct QueryEngine {
    customers: CustomerTable,
}

impl QueryEngine {
    pub fn new(customers: CustomerTable) -> Self {
        Self { customers }
    }

    pub fn customers(&self) -> &CustomerTable {
        &self.customers
    }

    /// Converts an infix query and evaluates it for every customer.
    pub fn search(&self, query: &str) -> Result<Report<'_>, QueryError> {
        let postfix = Postfix::convert(query)?;
        self.evaluate(&postfix)
    }

    pub fn evaluate(&self, postfix: &Postfix<'_>) -> Result<Report<'_>, QueryError> {
        let results = evaluator::evaluate_all(postfix, &self.customers)?;
        Ok(Report {
            customers: &self.customers,
            results,
        })
    }

    /// Runs one query per line and writes each query, its postfix form and the matching
    /// customers. A query that cannot be converted or evaluated gets a warning and is skipped;
    /// only failures of the writer stop the batch.
    pub fn run_batch<W: io::Write>(
        &self,
        queries: &str,
        options: &BatchOptions,
        out: &mut W,
    ) -> io::Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for query in queries.lines().map(str::trim).filter(|query| !query.is_empty()) {
            writeln!(out, "Query: {query}")?;
            let postfix = match Postfix::convert(query) {
                Ok(postfix) => postfix,
                Err(error) => {
                    skip(out, query, &QueryError::from(error), &mut summary)?;
                    continue;
                }
            };
            if options.show_postfix {
                writeln!(out, "\tPostfix: {postfix}")?;
            }

            match self.evaluate(&postfix) {
                Ok(report) => {
                    log_debug!(
                        component = "engine",
                        event = "query_evaluated",
                        query = query,
                        matches = report.matches().count(),
                    );
                    write!(out, "{report}")?;
                    summary.evaluated += 1;
                }
                Err(error) => skip(out, query, &error, &mut summary)?,
            }
        }

        log_info!(
            component = "engine",
            event = "batch_completed",
            evaluated = summary.evaluated,
            skipped = summary.skipped,
        );
        Ok(summary)
    }
}

fn skip<W: io::Write>(
    out: &mut W,
    query: &str,
    error: &QueryError,
    summary: &mut BatchSummary,
) -> io::Result<()> {
    log_warn!(
        component = "engine",
        event = "query_skipped",
        query = query,
        error = %error,
    );
    summary.skipped += 1;
    writeln!(out, "\tWARNING: {error}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub show_postfix: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { show_postfix: true }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub skipped: usize,
}

/// The outcome of one query: a boolean per customer, in table order.
#[derive(Debug)]
pub struct Report<'t> {
    customers: &'t CustomerTable,
    results: Vec<bool>,
}

impl<'t> Report<'t> {
    pub fn results(&self) -> &[bool] {
        &self.results
    }

    pub fn is_match(&self, index: usize) -> bool {
        self.results.get(index).copied().unwrap_or(false)
    }

    /// The customers the query is true for.
    pub fn matches(&self) -> impl Iterator<Item = &'t Customer> + '_ {
        self.customers
            .iter()
            .zip(&self.results)
            .filter_map(|(customer, included)| included.then_some(customer))
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tQuery Result:")?;
        let mut matches = self.matches().peekable();
        if matches.peek().is_none() {
            return writeln!(f, "\t\tNo customers");
        }
        writeln!(
            f,
            "{}",
            matches
                .map(|customer| format!("\t\t{:<7}{}", customer.id(), customer.name()))
                .join("\n")
        )
    }
}
