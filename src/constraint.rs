use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::construct::{Entity, FactSymbol};

/// The population a constraint is evaluated against unless the embedder
/// picks another type.
pub type Population = [FactSymbol];

// ------------- Modality -------------
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Must always hold.
    Alethic,
    /// Ought to hold; a failure is flagged rather than rejected.
    Deontic,
}
impl Modality {
    pub const ALETHIC: &'static str = "alethic";
    pub const DEONTIC: &'static str = "deontic";

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Alethic => Self::ALETHIC,
            Modality::Deontic => Self::DEONTIC,
        }
    }
    pub fn parse(tag: &str) -> Option<Modality> {
        match tag {
            Self::ALETHIC => Some(Modality::Alethic),
            Self::DEONTIC => Some(Modality::Deontic),
            _ => None,
        }
    }
}
impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a caller should make of one evaluation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Verdict {
    Holds,
    /// An alethic constraint failed.
    Rejected,
    /// A deontic constraint failed.
    Flagged,
}

// ------------- Constraint -------------
pub type Predicate<P> = Arc<dyn Fn(&P) -> bool + Send + Sync>;

pub struct Constraint<P: ?Sized = Population> {
    modality: Modality,
    predicate: Predicate<P>,
}
impl<P: ?Sized + 'static> Constraint<P> {
    pub fn new<F>(modality: Modality, predicate: F) -> Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        Self {
            modality,
            predicate: Arc::new(predicate),
        }
    }
    pub fn alethic<F>(predicate: F) -> Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        Self::new(Modality::Alethic, predicate)
    }
    pub fn deontic<F>(predicate: F) -> Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        Self::new(Modality::Deontic, predicate)
    }
}
impl<P: ?Sized> Constraint<P> {
    pub fn modality(&self) -> Modality {
        self.modality
    }
    pub fn predicate(&self) -> &Predicate<P> {
        &self.predicate
    }
    pub fn evaluate(&self, population: &P) -> bool {
        (self.predicate)(population)
    }
    pub fn evaluate_with_modality(&self, population: &P) -> (Modality, bool) {
        (self.modality, self.evaluate(population))
    }
    pub fn check(&self, population: &P) -> Verdict {
        match self.evaluate_with_modality(population) {
            (_, true) => Verdict::Holds,
            (Modality::Alethic, false) => Verdict::Rejected,
            (Modality::Deontic, false) => Verdict::Flagged,
        }
    }
}
impl<P: ?Sized> Clone for Constraint<P> {
    fn clone(&self) -> Self {
        Self {
            modality: self.modality,
            predicate: Arc::clone(&self.predicate),
        }
    }
}
impl<P: ?Sized> fmt::Debug for Constraint<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("modality", &self.modality)
            .finish()
    }
}

pub fn evaluate_constraint<P: ?Sized>(constraint: &Constraint<P>, population: &P) -> bool {
    constraint.evaluate(population)
}

pub fn evaluate_with_modality<P: ?Sized>(constraint: &Constraint<P>, population: &P) -> (Modality, bool) {
    constraint.evaluate_with_modality(population)
}

// ------------- Violation -------------
/// A record of a constraint failing for some entity. Nothing here creates
/// violations; that is left to whoever evaluates the constraints.
pub struct Violation<P: ?Sized = Population> {
    constraint: Constraint<P>,
    entity: Entity,
    reason: String,
}
impl<P: ?Sized> Violation<P> {
    pub fn new<R: Into<String>>(constraint: Constraint<P>, entity: Entity, reason: R) -> Self {
        Self {
            constraint,
            entity,
            reason: reason.into(),
        }
    }
    pub fn constraint(&self) -> &Constraint<P> {
        &self.constraint
    }
    pub fn entity(&self) -> &Entity {
        &self.entity
    }
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
impl<P: ?Sized> Clone for Violation<P> {
    fn clone(&self) -> Self {
        Self {
            constraint: self.constraint.clone(),
            entity: self.entity.clone(),
            reason: self.reason.clone(),
        }
    }
}
impl<P: ?Sized> fmt::Debug for Violation<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Violation")
            .field("constraint", &self.constraint)
            .field("entity", &self.entity)
            .field("reason", &self.reason)
            .finish()
    }
}
