//! Relational mapping: derives a table schema from a population of facts.
//!
//! The mapping is a state machine fed a fixed sequence of passes, each run
//! once and in order:
//!
//! 1. Transform unaries: split off single-noun facts and tag them with the
//!    configured world assumption.
//! 2. Erase references: set aside facts whose verb is a reference predicate
//!    as black boxes, remembering the thing each one refers to.
//! 3. Map compound uniqueness: one table per fact type under a compound
//!    uniqueness constraint. Constraints carry no link to the verbs they
//!    constrain, so no such table can be found and the pass changes nothing.
//! 4. Group functional roles: one table per thing mentioned by the remaining
//!    facts, keyed on `<thing>_id`, listing those facts as functional roles.
//! 5. Map independent objects: a table with an `id` and a `created_at` for
//!    every thing in the transformed facts that has no table yet.
//! 6. Unpack black boxes: a column named after a black box becomes its
//!    `<name>_id` component column.
//! 7. Handle subtypes: passes the schema through unchanged.
//!
//! The result is heuristic and unproven. Runs over the same inputs give the
//! same schema.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use roaring::RoaringTreemap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constraint::Constraint;
use crate::construct::{FactSymbol, OtherHasher};
use crate::datatype::Ident;
use crate::machine::{StateMachine, Transition};
use crate::schema::{Column, ColumnType, Schema, Table};
use crate::settings::{Settings, WorldAssumption};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Pass {
    TransformUnaries,
    EraseReferences,
    MapCompoundUniqueness,
    GroupFunctionalRoles,
    MapIndependentObjects,
    UnpackBlackBoxes,
    HandleSubtypes,
}
impl Pass {
    pub const SEQUENCE: [Pass; 7] = [
        Pass::TransformUnaries,
        Pass::EraseReferences,
        Pass::MapCompoundUniqueness,
        Pass::GroupFunctionalRoles,
        Pass::MapIndependentObjects,
        Pass::UnpackBlackBoxes,
        Pass::HandleSubtypes,
    ];
    fn apply(&self, state: &RmapState, settings: &Settings) -> RmapState {
        let next = match self {
            Pass::TransformUnaries => transform_unaries(state, settings),
            Pass::EraseReferences => erase_references(state, settings),
            Pass::MapCompoundUniqueness => map_compound_uniqueness(state),
            Pass::GroupFunctionalRoles => group_functional_roles(state, settings),
            Pass::MapIndependentObjects => map_independent_objects(state, settings),
            Pass::UnpackBlackBoxes => unpack_black_boxes(state, settings),
            Pass::HandleSubtypes => handle_subtypes(state),
        };
        debug!(pass = %self, tables = next.schema.tables().len(), "pass complete");
        next
    }
}
impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Pass::TransformUnaries => "transform unaries",
            Pass::EraseReferences => "erase references",
            Pass::MapCompoundUniqueness => "map compound uniqueness",
            Pass::GroupFunctionalRoles => "group functional roles",
            Pass::MapIndependentObjects => "map independent objects",
            Pass::UnpackBlackBoxes => "unpack black boxes",
            Pass::HandleSubtypes => "handle subtypes",
        };
        write!(f, "{}", name)
    }
}

/// Declares one noun type a subtype of another.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Subtype {
    pub subtype: Ident,
    pub supertype: Ident,
}

/// A unary fact and how its absence is to be read.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct UnaryFact {
    fact: FactSymbol,
    world: WorldAssumption,
}
impl UnaryFact {
    pub fn fact(&self) -> &FactSymbol {
        &self.fact
    }
    pub fn world(&self) -> WorldAssumption {
        self.world
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RmapOutput {
    pub schema: Schema,
    /// Unary facts followed by the facts that survived reference erasure.
    pub transformed_facts: Vec<FactSymbol>,
    pub unaries: Vec<UnaryFact>,
    pub black_boxes: Vec<FactSymbol>,
}

// working state threaded through the passes
#[derive(Clone, Debug, Default)]
struct RmapState {
    input: Vec<FactSymbol>,
    constraints: Vec<Constraint>,
    subtypes: Vec<Subtype>,
    unaries: Vec<UnaryFact>,
    others: Vec<FactSymbol>,
    black_boxes: Vec<FactSymbol>,
    black_box_names: Vec<String>,
    survivors: Vec<FactSymbol>,
    schema: Schema,
}

// ------------- Rmap -------------
#[derive(Clone, Debug, Default)]
pub struct Rmap {
    settings: Arc<Settings>,
}
impl Rmap {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    fn machine(&self, initial: RmapState) -> StateMachine<RmapState, Pass> {
        let settings = Arc::clone(&self.settings);
        StateMachine::new(
            Transition::unguarded(move |state: &RmapState, pass: &Pass| pass.apply(state, &settings)),
            initial,
        )
    }
    pub fn run(
        &self,
        facts: &[FactSymbol],
        constraints: &[Constraint],
        subtypes: Option<&[Subtype]>,
    ) -> RmapOutput {
        let initial = RmapState {
            input: facts.to_vec(),
            constraints: constraints.to_vec(),
            subtypes: subtypes.map(<[Subtype]>::to_vec).unwrap_or_default(),
            ..RmapState::default()
        };
        let state = self.machine(initial).run(Pass::SEQUENCE.iter());
        let transformed_facts: Vec<FactSymbol> = state
            .unaries
            .iter()
            .map(|unary| unary.fact.clone())
            .chain(state.survivors.iter().cloned())
            .collect();
        info!(
            facts = facts.len(),
            transformed = transformed_facts.len(),
            black_boxes = state.black_boxes.len(),
            tables = state.schema.tables().len(),
            "relational mapping complete"
        );
        RmapOutput {
            schema: state.schema,
            transformed_facts,
            unaries: state.unaries,
            black_boxes: state.black_boxes,
        }
    }
}

/// Maps with default settings; see [`Rmap::run`].
pub fn rmap(facts: &[FactSymbol], constraints: &[Constraint], subtypes: Option<&[Subtype]>) -> RmapOutput {
    Rmap::default().run(facts, constraints, subtypes)
}

// ------------- Passes -------------
// the first table under a name wins
fn add_table(schema: &mut Schema, table: Table) {
    let name = table.name().to_string();
    if schema.add_table(table) {
        warn!(table = %name, "a table by this name already exists, keeping the first");
    }
}

fn transform_unaries(state: &RmapState, settings: &Settings) -> RmapState {
    let (unaries, others): (Vec<&FactSymbol>, Vec<&FactSymbol>) =
        state.input.iter().partition(|fact| fact.arity() == 1);
    debug!(unaries = unaries.len(), others = others.len(), "partitioned facts");
    RmapState {
        unaries: unaries
            .into_iter()
            .map(|fact| UnaryFact {
                fact: fact.clone(),
                world: settings.unary_world,
            })
            .collect(),
        others: others.into_iter().cloned().collect(),
        ..state.clone()
    }
}

fn erase_references(state: &RmapState, settings: &Settings) -> RmapState {
    let mut next = RmapState {
        others: Vec::new(),
        ..state.clone()
    };
    for fact in &state.others {
        let is_reference = fact.verb().as_str().is_some_and(|verb| settings.is_reference(verb));
        if is_reference {
            // the referenced thing is the last noun
            if let Some(referenced) = fact.nouns().iter().last() {
                let name = referenced.to_string();
                if !next.black_box_names.contains(&name) {
                    next.black_box_names.push(name);
                }
            }
            next.black_boxes.push(fact.clone());
        } else {
            next.survivors.push(fact.clone());
        }
    }
    debug!(erased = next.black_boxes.len(), survivors = next.survivors.len(), "erased references");
    next
}

fn map_compound_uniqueness(state: &RmapState) -> RmapState {
    let mut next = state.clone();
    for table in compound_uniqueness_tables(&state.constraints) {
        add_table(&mut next.schema, table);
    }
    next
}

// Finding the fact type under a compound uniqueness constraint needs a verb
// on the constraint, which constraints do not carry.
fn compound_uniqueness_tables(constraints: &[Constraint]) -> Vec<Table> {
    debug!(constraints = constraints.len(), "no constraint names a verb, no compound uniqueness tables");
    Vec::new()
}

fn group_functional_roles(state: &RmapState, settings: &Settings) -> RmapState {
    // things are grouped by the name their table gets
    let mut order: Vec<String> = Vec::new();
    let mut mentions: HashMap<String, RoaringTreemap, OtherHasher> = HashMap::default();
    for (position, fact) in state.survivors.iter().enumerate() {
        for noun in fact.nouns() {
            mentions
                .entry(noun.to_string())
                .or_insert_with(|| {
                    order.push(noun.to_string());
                    RoaringTreemap::new()
                })
                .insert(position as u64);
        }
    }
    let mut next = state.clone();
    for thing in order {
        let facts: Vec<FactSymbol> = mentions[&thing]
            .iter()
            .map(|position| state.survivors[position as usize].clone())
            .collect();
        let key = format!("{}{}", thing, settings.key_suffix);
        let mut columns = vec![Column::new(key.clone(), ColumnType::String)];
        for fact in &facts {
            for noun in fact.nouns() {
                let name = noun.to_string();
                if name != thing && columns.iter().all(|c| c.name() != name) {
                    columns.push(Column::new(name, ColumnType::String));
                }
            }
        }
        let table = Table::new(thing, columns)
            .with_key(key)
            .with_functional_roles(facts);
        add_table(&mut next.schema, table);
    }
    next
}

fn map_independent_objects(state: &RmapState, settings: &Settings) -> RmapState {
    let mut next = state.clone();
    let transformed = state
        .unaries
        .iter()
        .map(|unary| &unary.fact)
        .chain(state.survivors.iter());
    let mut independent = 0;
    for fact in transformed {
        for noun in fact.nouns() {
            let name = noun.to_string();
            if next.schema.contains(&name) {
                continue;
            }
            let table = Table::new(
                name,
                vec![
                    Column::new(settings.independent_key.clone(), ColumnType::String),
                    Column::new(settings.independent_timestamp.clone(), ColumnType::Date),
                ],
            )
            .with_key(settings.independent_key.clone());
            add_table(&mut next.schema, table);
            independent += 1;
        }
    }
    debug!(independent, "mapped independent objects");
    next
}

fn unpack_black_boxes(state: &RmapState, settings: &Settings) -> RmapState {
    let black_boxes: HashSet<&str, OtherHasher> =
        state.black_box_names.iter().map(String::as_str).collect();
    let schema = state.schema.clone().map_tables(|table| {
        let existing: HashSet<String, OtherHasher> =
            table.columns().iter().map(|c| c.name().to_string()).collect();
        // the key column keeps its name so the key stays valid
        let key = table.key().map(str::to_string);
        table.map_columns(|column| {
            let unpacked = format!("{}{}", column.name(), settings.key_suffix);
            let is_key = key.as_deref() == Some(column.name());
            if black_boxes.contains(column.name()) && !is_key && !existing.contains(&unpacked) {
                Column::new(unpacked, column.kind())
            } else {
                column
            }
        })
    });
    RmapState {
        schema,
        ..state.clone()
    }
}

// TODO: qualify columns of subtype tables with their supertype once subtypes
// carry role information.
fn handle_subtypes(state: &RmapState) -> RmapState {
    debug!(subtypes = state.subtypes.len(), "subtypes passed through");
    state.clone()
}
