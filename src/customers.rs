use std::{collections::HashMap, fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug)]
pub enum CustomerError {
    #[error("customer {0} has already been defined")]
    AlreadyPresent(String),
    #[error("line {line}: TRAIT record found before any CUSTOMER record")]
    OrphanTrait { line: usize },
    #[error("line {line}: unknown record type '{keyword}'")]
    UnknownRecord { line: usize, keyword: String },
    #[error("line {line}: {record} record is missing its {field}")]
    MissingField {
        line: usize,
        record: &'static str,
        field: &'static str,
    },
}

/// A `(type, value)` attribute of a customer such as `(GENDER, F)`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Trait {
    kind: String,
    value: String,
}

impl Trait {
    pub fn new(kind: &str, value: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            value: value.to_owned(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: String,
    name: String,
    traits: Vec<Trait>,
}

impl Customer {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            traits: vec![],
        }
    }

    /// Adds a trait; the same trait type may appear several times.
    pub fn with_trait(mut self, kind: &str, value: &str) -> Self {
        self.traits.push(Trait::new(kind, value));
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }
}

/// The customers queries are evaluated against, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct CustomerTable {
    by_ids: HashMap<String, usize>,
    customers: Vec<Customer>,
}

impl CustomerTable {
    const CUSTOMER_RECORD: &'static str = "CUSTOMER";
    const TRAIT_RECORD: &'static str = "TRAIT";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, customer: Customer) -> Result<usize, CustomerError> {
        if self.by_ids.contains_key(customer.id()) {
            return Err(CustomerError::AlreadyPresent(customer.id));
        }

        let index = self.customers.len();
        self.by_ids.insert(customer.id.clone(), index);
        self.customers.push(customer);
        Ok(index)
    }

    pub fn by_id(&self, id: &str) -> Option<&Customer> {
        self.by_ids.get(id).map(|index| &self.customers[*index])
    }

    pub fn get(&self, index: usize) -> Option<&Customer> {
        self.customers.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Customer> {
        self.customers.iter()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    fn parse_customer(line: usize, rest: &str) -> Result<Customer, CustomerError> {
        let rest = rest.trim();
        let (id, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if id.is_empty() {
            return Err(CustomerError::MissingField {
                line,
                record: Self::CUSTOMER_RECORD,
                field: "identifier",
            });
        }

        Ok(Customer::new(id, name.trim()))
    }

    fn parse_trait(line: usize, rest: &str) -> Result<Trait, CustomerError> {
        let mut fields = rest.split_whitespace();
        let kind = fields.next().ok_or(CustomerError::MissingField {
            line,
            record: Self::TRAIT_RECORD,
            field: "type",
        })?;
        let value = fields.next().ok_or(CustomerError::MissingField {
            line,
            record: Self::TRAIT_RECORD,
            field: "value",
        })?;

        Ok(Trait::new(kind, value))
    }
}

impl<'a> IntoIterator for &'a CustomerTable {
    type Item = &'a Customer;
    type IntoIter = std::slice::Iter<'a, Customer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reads the customer file format: a `CUSTOMER <id> <name>` record followed by zero or more
/// `TRAIT <type> <value>` records. The name runs until the end of the line and may contain
/// blanks. Blank lines are ignored.
impl FromStr for CustomerTable {
    type Err = CustomerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut table = Self::new();
        let mut current: Option<Customer> = None;

        for (i, text) in input.lines().enumerate() {
            let line = i + 1;
            let text = text.trim_start();
            if text.trim_end().is_empty() {
                continue;
            }

            let (keyword, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
            match keyword {
                Self::CUSTOMER_RECORD => {
                    if let Some(customer) = current.replace(Self::parse_customer(line, rest)?) {
                        table.insert(customer)?;
                    }
                }
                Self::TRAIT_RECORD => {
                    let customer = current
                        .as_mut()
                        .ok_or(CustomerError::OrphanTrait { line })?;
                    customer.traits.push(Self::parse_trait(line, rest)?);
                }
                keyword => {
                    return Err(CustomerError::UnknownRecord {
                        line,
                        keyword: keyword.to_owned(),
                    })
                }
            }
        }

        if let Some(customer) = current {
            table.insert(customer)?;
        }
        Ok(table)
    }
}

/// Lists every customer followed by its traits.
impl fmt::Display for CustomerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID         Customer Name")?;
        writeln!(f, "                Trait      Value")?;
        for customer in self {
            writeln!(f, "{:<11}{}", customer.id(), customer.name())?;
            for customer_trait in customer.traits() {
                writeln!(
                    f,
                    "                {:<11}{}",
                    customer_trait.kind(),
                    customer_trait.value()
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOMERS: &str = "\
CUSTOMER 111111 BOB WIRE
TRAIT    GENDER     M
TRAIT    EXERCISE   BIKE
TRAIT    EXERCISE   HIKE

CUSTOMER 222222 MELBA TOAST
TRAIT    GENDER     F
CUSTOMER 333333 CRYSTAL BALL
";

    #[test]
    fn can_build_a_customer_table() {
        let mut table = CustomerTable::new();

        let first = table.insert(Customer::new("C1", "Ann").with_trait("GENDER", "F"));
        let second = table.insert(Customer::new("C2", "Bob"));

        assert_eq!(Ok(0), first);
        assert_eq!(Ok(1), second);
        assert_eq!(2, table.len());
        assert_eq!(Some("Bob"), table.by_id("C2").map(Customer::name));
    }

    #[test]
    fn return_an_error_on_duplicate_customers() {
        let mut table = CustomerTable::new();
        table.insert(Customer::new("C1", "Ann")).unwrap();

        let result = table.insert(Customer::new("C1", "Another Ann"));

        assert_eq!(Err(CustomerError::AlreadyPresent("C1".to_string())), result);
        assert_eq!(1, table.len());
    }

    #[test]
    fn can_parse_customers_and_their_traits() {
        let table: CustomerTable = CUSTOMERS.parse().unwrap();

        assert_eq!(3, table.len());
        assert_eq!(
            Some(
                &Customer::new("111111", "BOB WIRE")
                    .with_trait("GENDER", "M")
                    .with_trait("EXERCISE", "BIKE")
                    .with_trait("EXERCISE", "HIKE")
            ),
            table.get(0)
        );
        assert_eq!(
            Some(&Customer::new("222222", "MELBA TOAST").with_trait("GENDER", "F")),
            table.get(1)
        );
        assert_eq!(Some(&Customer::new("333333", "CRYSTAL BALL")), table.get(2));
    }

    #[test]
    fn can_parse_an_empty_customer_file() {
        let table: CustomerTable = "\n\n".parse().unwrap();

        assert!(table.is_empty());
    }

    #[test]
    fn return_an_error_on_a_trait_without_customer() {
        let result = "TRAIT GENDER F\nCUSTOMER 1 A".parse::<CustomerTable>();

        assert_eq!(Err(CustomerError::OrphanTrait { line: 1 }), result.map(|_| ()));
    }

    #[test]
    fn return_an_error_on_an_unknown_record() {
        let result = "CUSTOMER 1 A\nHOBBY CHESS".parse::<CustomerTable>();

        assert_eq!(
            Err(CustomerError::UnknownRecord {
                line: 2,
                keyword: "HOBBY".to_string()
            }),
            result.map(|_| ())
        );
    }

    #[test]
    fn return_an_error_on_a_trait_without_value() {
        let result = "CUSTOMER 1 A\nTRAIT GENDER".parse::<CustomerTable>();

        assert_eq!(
            Err(CustomerError::MissingField {
                line: 2,
                record: "TRAIT",
                field: "value"
            }),
            result.map(|_| ())
        );
    }

    #[test]
    fn return_an_error_on_a_customer_without_identifier() {
        let result = "CUSTOMER".parse::<CustomerTable>();

        assert_eq!(
            Err(CustomerError::MissingField {
                line: 1,
                record: "CUSTOMER",
                field: "identifier"
            }),
            result.map(|_| ())
        );
    }

    #[test]
    fn return_an_error_on_duplicate_customers_in_a_file() {
        let result = "CUSTOMER 1 A\nCUSTOMER 1 B".parse::<CustomerTable>();

        assert_eq!(
            Err(CustomerError::AlreadyPresent("1".to_string())),
            result.map(|_| ())
        );
    }

    #[test]
    fn can_list_customers_with_their_traits() {
        let table: CustomerTable = "CUSTOMER 111111 BOB WIRE\nTRAIT GENDER M\nCUSTOMER 2 X"
            .parse()
            .unwrap();

        let listing = table.to_string();

        assert_eq!(
            "ID         Customer Name\n\
             \x20               Trait      Value\n\
             111111     BOB WIRE\n\
             \x20               GENDER     M\n\
             2          X\n",
            listing
        );
    }
}
