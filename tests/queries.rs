use trait_query::{
    BatchOptions, BatchSummary, ConversionError, CustomerTable, EvaluationError, Operator,
    QueryEngine, QueryError,
};

const CUSTOMERS: &str = include_str!("data/customers.txt");
const QUERIES: &str = include_str!("data/queries.txt");

fn define_engine() -> QueryEngine {
    let customers: CustomerTable = CUSTOMERS.parse().unwrap();
    QueryEngine::new(customers)
}

fn search(engine: &QueryEngine, query: &str) -> Result<Vec<bool>, QueryError> {
    engine
        .search(query)
        .map(|report| report.results().to_vec())
}

#[test]
fn can_load_the_sample_customers() {
    let engine = define_engine();

    let customers = engine.customers();

    assert_eq!(4, customers.len());
    assert_eq!(
        Some("MELBA TOAST"),
        customers.by_id("222222").map(|customer| customer.name())
    );
    assert_eq!(5, customers.get(1).unwrap().traits().len());
}

#[test]
fn can_answer_every_sample_query() {
    let engine = define_engine();
    let expected = [
        ("SMOKING = N AND GENDER = F", vec![false, true, true, false]),
        (
            "SMOKING = N AND ( EXERCISE = HIKE OR EXERCISE = BIKE )",
            vec![true, false, true, false],
        ),
        (
            "GENDER = F AND EXERCISE NOTANY YOGA",
            vec![false, false, true, false],
        ),
        (
            "SMOKING = N AND EXERCISE = HIKE OR EXERCISE = BIKE",
            vec![true, false, true, false],
        ),
        ("( BOOK = SCIFI )", vec![true, true, true, false]),
        ("( ( ( BOOK ONLY SCIFI ) ) )", vec![true, false, true, false]),
    ];

    for (query, results) in expected {
        assert_eq!(Ok(results), search(&engine, query), "{query}");
    }
}

#[test]
fn return_warnings_for_the_bad_sample_queries() {
    let engine = define_engine();

    assert_eq!(
        Err(QueryError::Conversion(ConversionError::MissingLeftParen {
            offset: 13
        })),
        search(&engine, "BOOK = SCIFI )")
    );
    assert_eq!(
        Err(QueryError::Conversion(ConversionError::MissingRightParen {
            offset: 0
        })),
        search(&engine, "( GENDER = M")
    );
    assert_eq!(
        Err(QueryError::Evaluation(EvaluationError::MissingOperand(
            Operator::Or
        ))),
        search(&engine, "GENDER = F OR")
    );
}

#[test]
fn can_run_the_sample_query_file_to_the_end() {
    let engine = define_engine();
    let mut out = Vec::new();

    let summary = engine
        .run_batch(QUERIES, &BatchOptions::default(), &mut out)
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert_eq!(
        BatchSummary {
            evaluated: 6,
            skipped: 3
        },
        summary
    );
    assert_eq!(9, out.matches("Query: ").count());
    assert_eq!(3, out.matches("\tWARNING: ").count());
    assert!(out.contains("\tPostfix: SMOKING N = GENDER F = AND\n"));
    assert!(out.ends_with(
        "Query: GENDER = F OR\n\
         \tPostfix: GENDER F = OR\n\
         \tWARNING: improperly formatted query: operator OR is missing an operand\n"
    ));
}
