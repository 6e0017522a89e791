use logos::{Logos, SpannedIter};
use thiserror::Error;

#[derive(Error, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unrecognized input at offset {offset}")]
pub struct LexError {
    pub offset: usize,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\x0B\x0C]+")]
enum Token<'input> {
    #[regex(r"[^\x00-\x20\x7F]+", |lex| lex.slice())]
    Word(&'input str),
}

/// A query token along with the byte offset where it starts.
pub type Spanned<'input> = (usize, &'input str);

/// Splits a query line into whitespace-delimited tokens.
///
/// Tokens are only separated by whitespace, so `(BOOK` is a single token and
/// not a parenthesis followed by an operand. Control characters are rejected.
pub struct Lexer<'input> {
    tokens: SpannedIter<'input, Token<'input>>,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        Self {
            tokens: Token::lexer(input).spanned(),
        }
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Result<Spanned<'input>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next().map(|(token, span)| match token {
            Ok(Token::Word(word)) => Ok((span.start, word)),
            Err(_) => Err(LexError { offset: span.start }),
        })
    }
}
