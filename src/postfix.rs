use crate::{
    elements::{Category, Lexical},
    lexer::{LexError, Lexer},
    observability::log_debug,
};
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    #[error("missing left parenthesis for ')' at offset {offset}")]
    MissingLeftParen { offset: usize },
    #[error("missing right parenthesis for '(' at offset {offset}")]
    MissingRightParen { offset: usize },
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// An operator stack entry along with the offset of its token in the query.
type Pending<'a> = (usize, Lexical<'a>);

/// A query in postfix order, ready to be evaluated against any number of customers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Postfix<'a> {
    elements: Vec<Lexical<'a>>,
}

impl<'a> Postfix<'a> {
    /// Converts an infix query with the shunting-yard algorithm.
    ///
    /// Operators of equal precedence associate to the left and parentheses never leave the
    /// output. Nothing is returned when the parentheses do not balance.
    pub fn convert(infix: &'a str) -> Result<Self, ConversionError> {
        let mut output = Vec::new();
        let mut stack: Vec<Pending<'a>> = Vec::new();

        for token in Lexer::new(infix) {
            let (offset, token) = token?;
            let element = Lexical::classify(token);
            match element.category() {
                Category::Operand => output.push(element),
                Category::LeftParen => stack.push((offset, element)),
                Category::Operator(_) => {
                    process_operator(&mut stack, (offset, element), &mut output)
                }
                Category::RightParen => process_right_paren(&mut stack, offset, &mut output)?,
            }
        }
        process_remaining(&mut stack, &mut output)?;

        let postfix = Self { elements: output };
        log_debug!(
            component = "postfix",
            event = "query_converted",
            infix = infix,
            postfix = %postfix,
        );
        Ok(postfix)
    }

    /// Reads a query that is already in postfix order. Tokens are classified but not reordered.
    #[cfg(test)]
    pub(crate) fn from_postfix(postfix: &'a str) -> Result<Self, ConversionError> {
        let elements = Lexer::new(postfix)
            .map_ok(|(_, token)| Lexical::classify(token))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { elements })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lexical<'a>> {
        self.elements.iter()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.elements.iter().map(Lexical::token)
    }
}

impl<'s, 'a> IntoIterator for &'s Postfix<'a> {
    type Item = &'s Lexical<'a>;
    type IntoIter = std::slice::Iter<'s, Lexical<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Postfix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elements.iter().join(" "))
    }
}

/// Pops every operator that binds at least as tightly as the new one, stopping at a left
/// parenthesis, then pushes the new operator.
fn process_operator<'a>(
    stack: &mut Vec<Pending<'a>>,
    pending: Pending<'a>,
    output: &mut Vec<Lexical<'a>>,
) {
    let (_, operator) = pending;
    while stack
        .last()
        .is_some_and(|(_, top)| !top.is_left_paren() && top.precedence() >= operator.precedence())
    {
        if let Some((_, top)) = stack.pop() {
            output.push(top);
        }
    }
    stack.push(pending);
}

/// Pops up to the matching left parenthesis, which is discarded.
fn process_right_paren<'a>(
    stack: &mut Vec<Pending<'a>>,
    offset: usize,
    output: &mut Vec<Lexical<'a>>,
) -> Result<(), ConversionError> {
    while let Some((_, top)) = stack.pop() {
        if top.is_left_paren() {
            return Ok(());
        }
        output.push(top);
    }
    Err(ConversionError::MissingLeftParen { offset })
}

/// Drains the stack once the input is exhausted. Any left parenthesis still there is unmatched.
fn process_remaining<'a>(
    stack: &mut Vec<Pending<'a>>,
    output: &mut Vec<Lexical<'a>>,
) -> Result<(), ConversionError> {
    while let Some((offset, top)) = stack.pop() {
        if top.is_left_paren() {
            return Err(ConversionError::MissingRightParen { offset });
        }
        output.push(top);
    }
    Ok(())
}
