use std::fmt;

/// The binary operators of the query language.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Operator {
    /// `=`: the customer has at least one matching trait.
    Equal,
    /// `NOTANY`: the customer has no matching trait.
    NotAny,
    /// `ONLY`: the customer has exactly one trait of that type and it matches.
    Only,
    And,
    Or,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Equal),
            "NOTANY" => Some(Self::NotAny),
            "ONLY" => Some(Self::Only),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotAny => "NOTANY",
            Self::Only => "ONLY",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Binding strength, higher binds tighter.
    #[inline]
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Equal | Self::NotAny | Self::Only => 3,
            Self::And => 2,
            Self::Or => 1,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Category {
    LeftParen,
    RightParen,
    Operator(Operator),
    /// A trait type or a trait value.
    Operand,
}

/// A classified query token.
///
/// The category and the precedence are fixed when the token is classified.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Lexical<'a> {
    token: &'a str,
    category: Category,
    precedence: u8,
}

impl<'a> Lexical<'a> {
    /// Parentheses and operands all share the lowest precedence.
    const LOWEST_PRECEDENCE: u8 = 0;

    pub fn classify(token: &'a str) -> Self {
        let category = match token {
            "(" => Category::LeftParen,
            ")" => Category::RightParen,
            token => Operator::from_symbol(token)
                .map(Category::Operator)
                .unwrap_or(Category::Operand),
        };
        let precedence = match category {
            Category::Operator(operator) => operator.precedence(),
            _ => Self::LOWEST_PRECEDENCE,
        };

        Self {
            token,
            category,
            precedence,
        }
    }

    #[inline]
    pub fn token(&self) -> &'a str {
        self.token
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    #[inline]
    pub fn precedence(&self) -> u8 {
        self.precedence
    }

    #[inline]
    pub fn is_left_paren(&self) -> bool {
        self.category == Category::LeftParen
    }
}

impl fmt::Display for Lexical<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token)
    }
}

/// An entry of the evaluation stack: either a token that has not been resolved yet or the
/// boolean result of an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element<'a> {
    Lexical(Lexical<'a>),
    Evaluated { label: String, value: bool },
}

impl<'a> Element<'a> {
    pub fn evaluated(operator: Operator, value: bool) -> Self {
        Self::Evaluated {
            label: format!("Boolean result of {operator}"),
            value,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Evaluated { value, .. } => Some(*value),
            Self::Lexical(_) => None,
        }
    }

    pub fn as_operand(&self) -> Option<&'a str> {
        match self {
            Self::Lexical(lexical) if lexical.category() == Category::Operand => {
                Some(lexical.token())
            }
            _ => None,
        }
    }
}

impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical(lexical) => write!(f, "'{lexical}'"),
            Self::Evaluated { label, value } => write!(f, "{label} ({value})"),
        }
    }
}
