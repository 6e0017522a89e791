use crate::customers::{Customer, Trait};

/// Checks a customer's traits against a single `(type, value)` pair.
#[derive(Hash, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitPredicate {
    Exists,
    NotAny,
    ExclusiveMatch,
}

impl TraitPredicate {
    pub fn evaluate(&self, customer: &Customer, wanted: &Trait) -> bool {
        match self {
            Self::Exists => exists(customer, wanted),
            Self::NotAny => not_any(customer, wanted),
            Self::ExclusiveMatch => exclusive_match(customer, wanted),
        }
    }
}

/// `=`: the customer has at least one trait with that type and value.
#[inline]
pub fn exists(customer: &Customer, wanted: &Trait) -> bool {
    !not_any(customer, wanted)
}

/// `NOTANY`: the customer has no trait with that type and value.
pub fn not_any(customer: &Customer, wanted: &Trait) -> bool {
    !customer.traits().iter().any(|candidate| candidate == wanted)
}

/// `ONLY`: the customer has exactly one trait of that type and its value matches. Having the
/// value alongside another value of the same type does not count.
pub fn exclusive_match(customer: &Customer, wanted: &Trait) -> bool {
    let mut same_kind = customer
        .traits()
        .iter()
        .filter(|candidate| candidate.kind() == wanted.kind());

    match (same_kind.next(), same_kind.next()) {
        (Some(only), None) => only.value() == wanted.value(),
        _ => false,
    }
}
