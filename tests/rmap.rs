use factloom::constraint::Constraint;
use factloom::construct::{Entity, FactSymbol};
use factloom::rmap::{Pass, Rmap, Subtype, rmap};
use factloom::schema::ColumnType;
use factloom::settings::{Settings, WorldAssumption};

fn fact(verb: &str, nouns: &[&str]) -> FactSymbol {
    FactSymbol::new(verb, nouns.iter().map(|n| (*n).into()).collect::<Vec<_>>())
}

#[test]
fn plain_facts_are_preserved() {
    let facts = vec![fact("loves", &["Alice", "Bob"])];
    let output = rmap(&facts, &[], None);
    assert_eq!(output.transformed_facts, facts);
    assert!(output.schema.contains("Alice"));
    assert!(output.schema.contains("Bob"));
    assert!(output.black_boxes.is_empty());
    assert!(output.unaries.is_empty());
}

#[test]
fn references_are_erased() {
    let facts = vec![fact("identifies", &["userId", "user"]), fact("has", &["user", "profile"])];
    let output = rmap(&facts, &[], None);
    assert_eq!(output.transformed_facts, vec![facts[1].clone()], "the reference fact is gone");
    assert_eq!(output.black_boxes, vec![facts[0].clone()]);
    assert!(!output.schema.contains("userId"), "nothing mentions the reference anymore");
}

#[test]
fn black_box_columns_are_unpacked() {
    let facts = vec![fact("identifies", &["userId", "user"]), fact("has", &["user", "profile"])];
    let output = rmap(&facts, &[], None);
    let profile = output.schema.table("profile").expect("a table for profile");
    assert_eq!(profile.key(), Some("profile_id"));
    let names: Vec<&str> = profile.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["profile_id", "user_id"]);
    let user = output.schema.table("user").expect("a table for user");
    let names: Vec<&str> = user.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["user_id", "profile"], "the key already had the unpacked name");
}

#[test]
fn functional_roles_are_grouped_by_thing() {
    let facts = vec![
        fact("loves", &["Alice", "Bob"]),
        fact("knows", &["Alice", "Carol"]),
        fact("knows", &["Bob", "Carol"]),
    ];
    let output = rmap(&facts, &[], None);
    let alice = output.schema.table("Alice").expect("a table for Alice");
    assert_eq!(alice.functional_roles(), Some(&facts[..2]));
    let names: Vec<&str> = alice.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Alice_id", "Bob", "Carol"]);
    let carol = output.schema.table("Carol").expect("a table for Carol");
    assert_eq!(carol.functional_roles(), Some(&facts[1..]));
    assert_eq!(output.schema.tables().len(), 3);
}

#[test]
fn unaries_become_independent_objects() {
    let facts = vec![fact("smokes", &["Bob"]), fact("loves", &["Alice", "Carol"])];
    let output = rmap(&facts, &[], None);
    assert_eq!(output.transformed_facts, facts, "unaries come first, then the rest");
    assert_eq!(output.unaries.len(), 1);
    assert_eq!(output.unaries[0].fact(), &facts[0]);
    assert_eq!(output.unaries[0].world(), WorldAssumption::Open);

    let bob = output.schema.table("Bob").expect("a table for Bob");
    assert_eq!(bob.key(), Some("id"));
    assert_eq!(bob.column("id").map(|c| c.kind()), Some(ColumnType::String));
    assert_eq!(bob.column("created_at").map(|c| c.kind()), Some(ColumnType::Date));
    assert!(bob.functional_roles().is_none());
}

#[test]
fn closed_world_unaries() {
    let settings = Settings {
        unary_world: WorldAssumption::Closed,
        ..Settings::default()
    };
    let output = Rmap::new(settings).run(&[fact("smokes", &["Bob"])], &[], None);
    assert_eq!(output.unaries[0].world(), WorldAssumption::Closed);
}

#[test]
fn constraints_and_subtypes_do_not_change_the_schema() {
    let facts = vec![fact("loves", &["Alice", "Bob"]), fact("smokes", &["Carol"])];
    let plain = rmap(&facts, &[], None);
    let constraints = vec![Constraint::alethic(|population: &[FactSymbol]| !population.is_empty())];
    let subtypes = vec![Subtype {
        subtype: "Alice".into(),
        supertype: "Person".into(),
    }];
    let constrained = rmap(&facts, &constraints, Some(&subtypes[..]));
    assert_eq!(plain.schema, constrained.schema);
    assert_eq!(plain.transformed_facts, constrained.transformed_facts);
}

#[test]
fn mapping_is_deterministic() {
    let facts: Vec<FactSymbol> = (0..50)
        .map(|i| match i % 4 {
            0 => fact("refers_to", &[format!("ref{}", i).as_str(), format!("thing{}", i % 7).as_str()]),
            1 => fact("active", &[format!("thing{}", i % 7).as_str()]),
            _ => fact("owns", &[format!("thing{}", i % 7).as_str(), format!("thing{}", i % 5).as_str()]),
        })
        .collect();
    let first = rmap(&facts, &[], None);
    let second = rmap(&facts, &[], None);
    assert_eq!(first.schema, second.schema);
    assert_eq!(first.transformed_facts, second.transformed_facts);
    assert_eq!(
        serde_json::to_string(&first).expect("serializable"),
        serde_json::to_string(&second).expect("serializable")
    );
}

#[test]
fn empty_population() {
    let output = rmap(&[], &[], None);
    assert!(output.transformed_facts.is_empty());
    assert!(output.schema.tables().is_empty());
}

#[test]
fn passes_run_in_a_fixed_order() {
    assert_eq!(Pass::SEQUENCE.len(), 7);
    assert_eq!(Pass::SEQUENCE[0], Pass::TransformUnaries);
    assert_eq!(Pass::SEQUENCE[6], Pass::HandleSubtypes);
    assert_eq!(Pass::UnpackBlackBoxes.to_string(), "unpack black boxes");
}

#[test]
fn key_columns_survive_unpacking() {
    // the black box shares its name with the key of the independent tables
    let facts = vec![fact("identifies", &["code", "id"]), fact("smokes", &["Carol"])];
    let output = rmap(&facts, &[], None);
    let carol = output.schema.table("Carol").expect("a table for Carol");
    let key = carol.key().expect("independent tables are keyed");
    assert!(carol.column(key).is_some(), "the key {key} names a column");
    assert_eq!(carol.ddl(), r#"CREATE TABLE "Carol" ("id" TEXT PRIMARY KEY, "created_at" TEXT)"#);
}

#[test]
fn things_are_grouped_by_table_name() {
    let facts = vec![
        FactSymbol::new("rolled", vec![Entity::from(1), Entity::from("die")]),
        FactSymbol::new("drawn", vec![Entity::from("1"), Entity::from("card")]),
    ];
    let output = rmap(&facts, &[], None);
    let one = output.schema.table("1").expect("a table for 1");
    assert_eq!(one.functional_roles(), Some(&facts[..]), "both facts land in the same table");
    let names: Vec<&str> = one.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["1_id", "die", "card"]);
}
