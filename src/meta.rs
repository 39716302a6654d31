//! Schema metadata expressed as ordinary facts.
//!
//! Every builder returns a [`FactSymbol`] with a reserved verb, so a schema
//! description can be stored, queried and rendered with the same accessors
//! as domain facts. Builders validate nothing: `fact_type("loves", 2)` does
//! not check that such a fact type exists anywhere.

use std::fmt;

use crate::constraint::Modality;
use crate::construct::{Entity, FactSymbol};
use crate::datatype::Ident;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MetaVerb {
    NounType,
    FactType,
    Role,
    Reading,
    InverseReading,
    Constraint,
    ConstraintTarget,
    Violation,
}
impl MetaVerb {
    pub const ALL: [MetaVerb; 8] = [
        MetaVerb::NounType,
        MetaVerb::FactType,
        MetaVerb::Role,
        MetaVerb::Reading,
        MetaVerb::InverseReading,
        MetaVerb::Constraint,
        MetaVerb::ConstraintTarget,
        MetaVerb::Violation,
    ];
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaVerb::NounType => "nounType",
            MetaVerb::FactType => "factType",
            MetaVerb::Role => "role",
            MetaVerb::Reading => "reading",
            MetaVerb::InverseReading => "inverseReading",
            MetaVerb::Constraint => "constraint",
            MetaVerb::ConstraintTarget => "constraintTarget",
            MetaVerb::Violation => "violation",
        }
    }
    /// The reserved verb of `fact`, if it is a meta-fact.
    pub fn of(fact: &FactSymbol) -> Option<MetaVerb> {
        let verb = fact.verb().as_str()?;
        MetaVerb::ALL.into_iter().find(|meta| meta.as_str() == verb)
    }
}
impl fmt::Display for MetaVerb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn is_meta(fact: &FactSymbol) -> bool {
    MetaVerb::of(fact).is_some()
}

fn declare(verb: MetaVerb, arguments: Vec<Ident>) -> FactSymbol {
    FactSymbol::new(
        verb.as_str(),
        arguments.into_iter().map(Entity::unit).collect::<Vec<_>>(),
    )
}

/// `nounType(name)`
pub fn noun_type<N: Into<Ident>>(name: N) -> FactSymbol {
    declare(MetaVerb::NounType, vec![name.into()])
}

/// `factType(verb, arity)`
pub fn fact_type<V: Into<Ident>>(verb: V, arity: usize) -> FactSymbol {
    declare(MetaVerb::FactType, vec![verb.into(), Ident::from(arity)])
}

/// `role(verb, position, nounType)`
pub fn role<V, N>(verb: V, position: usize, noun_type: N) -> FactSymbol
where
    V: Into<Ident>,
    N: Into<Ident>,
{
    declare(
        MetaVerb::Role,
        vec![verb.into(), Ident::from(position), noun_type.into()],
    )
}

/// `reading(verb, text)`
pub fn reading<V: Into<Ident>>(verb: V, text: &str) -> FactSymbol {
    declare(MetaVerb::Reading, vec![verb.into(), Ident::from(text)])
}

/// `inverseReading(verb, inverseVerb, text)`
pub fn inverse_reading<V, W>(verb: V, inverse_verb: W, text: &str) -> FactSymbol
where
    V: Into<Ident>,
    W: Into<Ident>,
{
    declare(
        MetaVerb::InverseReading,
        vec![verb.into(), inverse_verb.into(), Ident::from(text)],
    )
}

/// `constraint(name, modality)`
pub fn constraint<N: Into<Ident>>(name: N, modality: Modality) -> FactSymbol {
    declare(
        MetaVerb::Constraint,
        vec![name.into(), Ident::from(modality.as_str())],
    )
}

/// `constraintTarget(constraint, verb, position)`
pub fn constraint_target<C, V>(constraint: C, verb: V, position: usize) -> FactSymbol
where
    C: Into<Ident>,
    V: Into<Ident>,
{
    declare(
        MetaVerb::ConstraintTarget,
        vec![constraint.into(), verb.into(), Ident::from(position)],
    )
}

/// `violation(constraint, entity, reason)`
pub fn violation<C: Into<Ident>>(constraint: C, entity: &Entity, reason: &str) -> FactSymbol {
    declare(
        MetaVerb::Violation,
        vec![constraint.into(), entity.id().clone(), Ident::from(reason)],
    )
}
