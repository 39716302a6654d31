use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use factloom::FactloomError;
use factloom::constraint::Constraint;
use factloom::construct::{Curried, Entity, FactSymbol, FactType, make_verb_fact};
use factloom::datatype::Ident;
use factloom::encoding::List;
use factloom::reading::Reading;

fn loves() -> FactType {
    FactType::named("loves", 2, Reading::parse("loves", "{0} loves {1}").expect("reading"))
}

#[test]
fn entity_identity_is_by_value() {
    let x = Entity::unit(Ident::from("x"));
    assert!(x.equals(&Entity::unit(Ident::from("x"))));
    assert!(!x.equals(&Entity::unit(Ident::from("y"))));
    assert_eq!(x.id(), &Ident::from("x"));
    assert_eq!(Entity::unit(42).into_id(), 42);
}

#[test]
fn bind_applies_to_the_wrapped_id() {
    let double = |n: i64| Entity::unit(n * 2);
    assert_eq!(Entity::unit(21).bind(double), double(21));
    let renamed = Entity::unit("bob").bind(|s: &str| Entity::unit(s.to_uppercase()));
    assert_eq!(renamed.id(), "BOB");
}

#[test]
fn curried_construction_keeps_call_order() {
    let fact_type = loves();
    let step = make_verb_fact(&fact_type);
    assert!(!step.is_complete());
    let step = step.apply("Alice").expect("first");
    assert!(!step.is_complete());
    let fact = step.apply("Bob").expect("second").into_fact().expect("complete");
    assert_eq!(fact.verb(), &Ident::from("loves"));
    assert_eq!(fact.nouns().to_vec(), vec![Entity::from("Alice"), Entity::from("Bob")]);
    assert_eq!(fact.arity(), 2);
}

#[test]
fn verb_function_runs_once_all_arguments_are_in() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let fact_type = FactType::new(
        3,
        move |nouns| {
            counter.fetch_add(1, Ordering::SeqCst);
            FactSymbol::new("between", nouns)
        },
        Reading::parse("between", "{0} lies between {1} and {2}").expect("reading"),
        List::nil(),
    );
    let step = fact_type.curry().apply("B").expect("one").apply("A").expect("two");
    assert_eq!(calls.load(Ordering::SeqCst), 0, "no call before the last argument");
    let fact = step.apply("C").expect("three").into_fact().expect("fact");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(fact_type.reading().render(&fact), "B lies between A and C");
}

#[test]
fn arity_zero_completes_immediately() {
    let raining = FactType::named("raining", 0, Reading::parse("raining", "it rains").expect("reading"));
    match raining.curry() {
        Curried::Complete { fact, arity } => {
            assert_eq!(arity, 0);
            assert!(fact.nouns().is_empty());
            assert_eq!(raining.reading().render(&fact), "it rains");
        }
        Curried::Partial(_) => panic!("arity zero should complete without arguments"),
    }
}

#[test]
fn over_and_under_supply_are_errors() {
    let fact_type = loves();
    let err = fact_type.fact(["Alice", "Bob", "Carol"]).unwrap_err();
    assert!(matches!(err, FactloomError::Arity { expected: 2, supplied: 3 }));
    let err = fact_type.fact(["Alice"]).unwrap_err();
    assert!(matches!(err, FactloomError::Arity { expected: 2, supplied: 1 }));
    assert!(fact_type.fact(["Alice", "Bob"]).is_ok());
}

#[test]
fn fact_type_accessors() {
    let always: Constraint = Constraint::alethic(|_: &[FactSymbol]| true);
    let fact_type = FactType::new(
        1,
        |nouns| FactSymbol::new("smokes", nouns),
        Reading::parse("smokes", "{0} smokes").expect("reading"),
        List::from(vec![always]),
    );
    assert_eq!(fact_type.arity(), 1);
    assert_eq!(fact_type.constraints().len(), 1);
    let fact = (fact_type.verb())(List::from(vec![Entity::from("Ann")]));
    assert_eq!(fact.to_string(), "smokes(Ann)");
}

#[test]
fn over_supply_reports_the_fact_type_arity() {
    // the verb function adds a noun of its own
    let stamped = FactType::new(
        2,
        |nouns: List<Entity>| FactSymbol::new("met", List::cons(Entity::from("today"), &nouns)),
        Reading::parse("met", "{1} met {2} {0}").expect("reading"),
        List::nil(),
    );
    let fact = stamped.fact(["Alice", "Bob"]).expect("two nouns fill the fact type");
    assert_eq!(fact.arity(), 3);
    let err = stamped.fact(["Alice", "Bob", "Carol"]).unwrap_err();
    assert!(
        matches!(err, FactloomError::Arity { expected: 2, supplied: 3 }),
        "expected the fact type's arity, got {err}"
    );
}
