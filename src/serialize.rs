//! JSON boundary for the data-carrying constructs.
//!
//! A [`Shape`] is the plain-data form of an entity, fact, constraint or
//! event, tagged by `"type"`. Nouns are flattened to their identifiers.
//! Verb functions and predicates cannot cross the boundary: a constraint
//! keeps only its modality, and restoring a shape gives back data alone.

use serde::{Deserialize, Serialize};

use crate::constraint::{Constraint, Modality};
use crate::construct::{Entity, FactSymbol};
use crate::datatype::{Ident, Time};
use crate::encoding::List;
use crate::event::Event;
use crate::reading::Reading;
use crate::error::Result;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FactShape {
    pub verb: Ident,
    pub nouns: Vec<Ident>,
}
impl From<&FactSymbol> for FactShape {
    fn from(fact: &FactSymbol) -> Self {
        Self {
            verb: fact.verb().clone(),
            nouns: fact.nouns().iter().map(|noun| noun.id().clone()).collect(),
        }
    }
}
impl From<FactShape> for FactSymbol {
    fn from(shape: FactShape) -> Self {
        FactSymbol::new(
            shape.verb,
            shape.nouns.into_iter().map(Entity::unit).collect::<Vec<_>>(),
        )
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Entity {
        id: Ident,
    },
    FactSymbol(FactShape),
    Constraint {
        modality: Modality,
    },
    Event {
        fact: FactShape,
        time: Time,
        #[serde(default)]
        readings: Vec<Reading>,
    },
}
impl Shape {
    pub fn into_entity(self) -> Option<Entity> {
        match self {
            Shape::Entity { id } => Some(Entity::unit(id)),
            _ => None,
        }
    }
    pub fn into_fact(self) -> Option<FactSymbol> {
        match self {
            Shape::FactSymbol(fact) => Some(fact.into()),
            _ => None,
        }
    }
    pub fn into_event(self) -> Option<Event> {
        match self {
            Shape::Event { fact, time, readings } => {
                Some(Event::new(fact.into(), time, List::from(readings)))
            }
            _ => None,
        }
    }
    pub fn modality(&self) -> Option<Modality> {
        match self {
            Shape::Constraint { modality } => Some(*modality),
            _ => None,
        }
    }
}
impl From<&Entity> for Shape {
    fn from(entity: &Entity) -> Self {
        Shape::Entity {
            id: entity.id().clone(),
        }
    }
}
impl From<&FactSymbol> for Shape {
    fn from(fact: &FactSymbol) -> Self {
        Shape::FactSymbol(fact.into())
    }
}
impl<P: ?Sized> From<&Constraint<P>> for Shape {
    fn from(constraint: &Constraint<P>) -> Self {
        Shape::Constraint {
            modality: constraint.modality(),
        }
    }
}
impl From<&Event> for Shape {
    fn from(event: &Event) -> Self {
        Shape::Event {
            fact: event.fact().into(),
            time: event.time().clone(),
            readings: event.readings().to_vec(),
        }
    }
}

pub fn to_json<'a, T>(value: &'a T) -> Result<String>
where
    T: ?Sized,
    Shape: From<&'a T>,
{
    Ok(serde_json::to_string(&Shape::from(value))?)
}

pub fn from_json(json: &str) -> Result<Shape> {
    Ok(serde_json::from_str(json)?)
}

/// Reads a JSON array of shapes, keeping the facts among them.
pub fn facts_from_json(json: &str) -> Result<Vec<FactSymbol>> {
    let shapes: Vec<Shape> = serde_json::from_str(json)?;
    Ok(shapes.into_iter().filter_map(Shape::into_fact).collect())
}
