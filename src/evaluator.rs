use crate::{
    customers::{Customer, CustomerTable, Trait},
    elements::{Category, Element, Operator},
    postfix::Postfix,
    predicates::TraitPredicate,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("operator {0} is missing an operand")]
    MissingOperand(Operator),
    #[error("operator {operator} expects {expected}, found {found}")]
    MismatchingOperand {
        operator: Operator,
        expected: &'static str,
        found: String,
    },
    #[error("unexpected '{0}' in postfix query")]
    UnexpectedToken(String),
    #[error("query is empty")]
    Empty,
    #[error("query leaves {0} values instead of a single result")]
    Unbalanced(usize),
    #[error("query result is {0} instead of a boolean")]
    NotBoolean(String),
}

/// Evaluates a postfix query for one customer.
///
/// The query is checked as it is evaluated: every operator must find two operands of the kind it
/// works on and exactly one boolean must remain at the end.
pub fn evaluate(postfix: &Postfix<'_>, customer: &Customer) -> Result<bool, EvaluationError> {
    run(postfix, |predicate, wanted| predicate.evaluate(customer, wanted))
}

/// Checks the shape of a postfix query without looking at any customer.
pub fn validate(postfix: &Postfix<'_>) -> Result<(), EvaluationError> {
    run(postfix, |_, _| false).map(|_| ())
}

/// Evaluates a postfix query for every customer, in table order.
///
/// The query is validated first so that a malformed query is rejected even when there are no
/// customers to evaluate it for.
pub fn evaluate_all(
    postfix: &Postfix<'_>,
    customers: &CustomerTable,
) -> Result<Vec<bool>, EvaluationError> {
    validate(postfix)?;
    customers
        .iter()
        .map(|customer| evaluate(postfix, customer))
        .collect()
}

/// Runs the postfix query on a stack, resolving each trait comparison through `resolve`.
fn run<F>(postfix: &Postfix<'_>, resolve: F) -> Result<bool, EvaluationError>
where
    F: Fn(TraitPredicate, &Trait) -> bool,
{
    let mut stack: Vec<Element> = Vec::with_capacity(postfix.len());

    for lexical in postfix {
        match lexical.category() {
            Category::Operand => stack.push(Element::Lexical(*lexical)),
            Category::Operator(operator) => {
                let right = stack
                    .pop()
                    .ok_or(EvaluationError::MissingOperand(operator))?;
                let left = stack
                    .pop()
                    .ok_or(EvaluationError::MissingOperand(operator))?;
                let value = apply(operator, &left, &right, &resolve)?;
                stack.push(Element::evaluated(operator, value));
            }
            Category::LeftParen | Category::RightParen => {
                return Err(EvaluationError::UnexpectedToken(lexical.token().to_owned()))
            }
        }
    }

    let result = stack.pop().ok_or(EvaluationError::Empty)?;
    if !stack.is_empty() {
        return Err(EvaluationError::Unbalanced(stack.len() + 1));
    }
    result
        .as_bool()
        .ok_or_else(|| EvaluationError::NotBoolean(result.to_string()))
}

fn apply<F>(
    operator: Operator,
    left: &Element,
    right: &Element,
    resolve: &F,
) -> Result<bool, EvaluationError>
where
    F: Fn(TraitPredicate, &Trait) -> bool,
{
    let compare = |predicate: TraitPredicate| -> Result<bool, EvaluationError> {
        let kind = expect_operand(operator, left)?;
        let value = expect_operand(operator, right)?;
        Ok(resolve(predicate, &Trait::new(kind, value)))
    };

    match operator {
        Operator::Equal => compare(TraitPredicate::Exists),
        Operator::NotAny => compare(TraitPredicate::NotAny),
        Operator::Only => compare(TraitPredicate::ExclusiveMatch),
        Operator::And => {
            let (left, right) = expect_booleans(operator, left, right)?;
            Ok(left && right)
        }
        Operator::Or => {
            let (left, right) = expect_booleans(operator, left, right)?;
            Ok(left || right)
        }
    }
}

fn expect_operand<'a>(
    operator: Operator,
    element: &Element<'a>,
) -> Result<&'a str, EvaluationError> {
    element
        .as_operand()
        .ok_or_else(|| EvaluationError::MismatchingOperand {
            operator,
            expected: "a trait type or value",
            found: element.to_string(),
        })
}

/// Both sides are checked before combining them so that a bad right-hand side is never skipped.
fn expect_booleans(
    operator: Operator,
    left: &Element,
    right: &Element,
) -> Result<(bool, bool), EvaluationError> {
    Ok((
        expect_boolean(operator, left)?,
        expect_boolean(operator, right)?,
    ))
}

fn expect_boolean(operator: Operator, element: &Element) -> Result<bool, EvaluationError> {
    element
        .as_bool()
        .ok_or_else(|| EvaluationError::MismatchingOperand {
            operator,
            expected: "a boolean result",
            found: element.to_string(),
        })
}
