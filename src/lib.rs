//! Factloom – an embedded toolkit for fact-based modeling.
//!
//! Factloom centers on the *fact*: a verb together with the ordered entities
//! taking part in it, such as `loves(Alice, Bob)`. Around it:
//! * An [`construct::Entity`] wraps one opaque identifier; entities are equal
//!   when their identifiers are.
//! * A [`construct::FactType`] describes an n-ary relationship: its arity, the
//!   verb function producing facts, its reading and its constraints. Facts are
//!   built from it one argument at a time.
//! * A [`reading::Reading`] renders a fact as text, and an inverse reading
//!   renders it from the other side.
//! * An [`event::Event`] is a fact at a time.
//! * A [`machine::StateMachine`] folds a guarded transition over a stream of
//!   inputs, such as events.
//! * A [`constraint::Constraint`] is an alethic or deontic predicate over a
//!   population of facts.
//!
//! Everything is an immutable value. Nothing is global, nothing blocks, and
//! independent values can be used from as many threads as one likes.
//!
//! ## Modules
//! * [`encoding`] – Truth selection, persistent lists and numerals.
//! * [`datatype`] – Identifier values and event times.
//! * [`construct`] – Entities, facts, fact types and curried construction.
//! * [`reading`] – Readings, their template parser and the reading keeper.
//! * [`event`] – Time-stamped facts.
//! * [`machine`] – Transitions and state machines.
//! * [`constraint`] – Modalities, constraints, verdicts and violations.
//! * [`meta`] – Schema metadata as facts.
//! * [`rmap`] – Relational mapping of a fact population into tables.
//! * [`schema`] – Tables, columns and DDL.
//! * [`serialize`] – The JSON boundary.
//! * [`settings`] – Settings for the mapping, read with the `config` crate.
//!
//! ## Quick Start
//! ```
//! use factloom::construct::{FactSymbol, FactType};
//! use factloom::reading::Reading;
//! use factloom::rmap::rmap;
//!
//! let loves = FactType::named("loves", 2, Reading::parse("loves", "{0} loves {1}").unwrap());
//! let fact = loves.curry().apply("Alice").unwrap().apply("Bob").unwrap().into_fact().unwrap();
//! assert_eq!(loves.reading().render(&fact), "Alice loves Bob");
//!
//! let output = rmap(&[fact], &[], None);
//! assert!(output.schema.contains("Alice") && output.schema.contains("Bob"));
//! # let _: Vec<FactSymbol> = output.transformed_facts;
//! ```
//!
//! ## Status
//! The mapping is a heuristic. Compound uniqueness and subtype handling are
//! still pass-throughs, and relationships and indices are never derived.

pub mod constraint;
pub mod construct;
pub mod datatype;
pub mod encoding;
pub mod error;
pub mod event;
pub mod machine;
pub mod meta;
pub mod reading;
pub mod rmap;
pub mod schema;
pub mod serialize;
pub mod settings;

pub use error::{FactloomError, Result};
