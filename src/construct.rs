//! Fundamental constructs of the fact model.
//!
//! - Entities = a wrapper around one opaque identifier
//! - Fact symbols = (Verb, Nouns) where the nouns are the entities taking part
//! - Fact types = (Arity, Verb function, Reading, Constraints)
//!
//! A fact type describes the shape of an n-ary relationship, while a fact
//! symbol is one instance of it. Fact symbols are built from a fact type by
//! supplying its arguments one at a time (see [`FactType::curry`]), so that
//! the verb function only ever runs once all of its roles are filled.
//!
//! All constructs are immutable after creation. "Changing" one means making
//! a new one.

use std::sync::Arc;

use core::hash::BuildHasherDefault;
use seahash::SeaHasher;

// used to print out readable forms of a construct
use std::fmt;

use serde::{Deserialize, Serialize};

// our own stuff that we need
use crate::constraint::Constraint;
use crate::datatype::Ident;
use crate::encoding::List;
use crate::error::{FactloomError, Result};
use crate::reading::Reading;

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

// ------------- Entity -------------
/// Gives any value a retrievable identity. Equality is equality of the
/// wrapped identifier, never of the wrapper.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Entity<T = Ident> {
    id: T,
}
impl<T> Entity<T> {
    pub fn unit(id: T) -> Self {
        Self { id }
    }
    pub fn id(&self) -> &T {
        &self.id
    }
    pub fn into_id(self) -> T {
        self.id
    }
    /// Applies `f` to the wrapped identifier, so `Entity::unit(x).bind(f)`
    /// is `f(x)`.
    pub fn bind<U, F>(self, f: F) -> Entity<U>
    where
        F: FnOnce(T) -> Entity<U>,
    {
        f(self.id)
    }
}
impl<T: PartialEq> Entity<T> {
    pub fn equals(&self, other: &Entity<T>) -> bool {
        self.id == other.id
    }
}
impl From<&str> for Entity {
    fn from(s: &str) -> Self {
        Entity::unit(Ident::from(s))
    }
}
impl From<String> for Entity {
    fn from(s: String) -> Self {
        Entity::unit(Ident::from(s))
    }
}
impl From<i64> for Entity {
    fn from(n: i64) -> Self {
        Entity::unit(Ident::from(n))
    }
}
impl From<Ident> for Entity {
    fn from(id: Ident) -> Self {
        Entity::unit(id)
    }
}
impl<T: fmt::Display> fmt::Display for Entity<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

// ------------- FactSymbol -------------
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct FactSymbol {
    verb: Ident,
    nouns: List<Entity>,
}
impl FactSymbol {
    pub fn new<V, N>(verb: V, nouns: N) -> Self
    where
        V: Into<Ident>,
        N: Into<List<Entity>>,
    {
        Self {
            verb: verb.into(),
            nouns: nouns.into(),
        }
    }
    pub fn verb(&self) -> &Ident {
        &self.verb
    }
    pub fn nouns(&self) -> &List<Entity> {
        &self.nouns
    }
    /// The number of nouns, which is the arity of the relationship.
    pub fn arity(&self) -> usize {
        self.nouns.len()
    }
    /// True when the verb is the given text.
    pub fn has_verb(&self, verb: &str) -> bool {
        self.verb.as_str() == Some(verb)
    }
}
impl fmt::Display for FactSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let nouns: Vec<String> = self.nouns.iter().map(|n| n.to_string()).collect();
        write!(f, "{}({})", self.verb, nouns.join(", "))
    }
}

// ------------- FactType -------------
pub type VerbFn = Arc<dyn Fn(List<Entity>) -> FactSymbol + Send + Sync>;

#[derive(Clone)]
pub struct FactType {
    arity: usize,
    verb: VerbFn,
    reading: Reading,
    constraints: List<Constraint>,
}
impl FactType {
    pub fn new<F>(arity: usize, verb: F, reading: Reading, constraints: List<Constraint>) -> Self
    where
        F: Fn(List<Entity>) -> FactSymbol + Send + Sync + 'static,
    {
        Self {
            arity,
            verb: Arc::new(verb),
            reading,
            constraints,
        }
    }
    /// A fact type whose verb function simply records `verb` and the nouns.
    pub fn named<V: Into<Ident>>(verb: V, arity: usize, reading: Reading) -> Self {
        let verb = verb.into();
        Self::new(
            arity,
            move |nouns| FactSymbol::new(verb.clone(), nouns),
            reading,
            List::nil(),
        )
    }
    pub fn arity(&self) -> usize {
        self.arity
    }
    pub fn verb(&self) -> &VerbFn {
        &self.verb
    }
    pub fn reading(&self) -> &Reading {
        &self.reading
    }
    pub fn constraints(&self) -> &List<Constraint> {
        &self.constraints
    }
    /// Starts curried construction. With arity zero the verb function runs
    /// right away on the empty noun list.
    pub fn curry(&self) -> Curried {
        PartialFact {
            arity: self.arity,
            verb: Arc::clone(&self.verb),
            supplied: Vec::with_capacity(self.arity),
        }
        .settle()
    }
    /// Supplies all nouns at once. The count must match the arity.
    pub fn fact<I>(&self, nouns: I) -> Result<FactSymbol>
    where
        I: IntoIterator,
        I::Item: Into<Entity>,
    {
        let mut curried = self.curry();
        for noun in nouns {
            curried = curried.apply(noun)?;
        }
        curried.into_fact()
    }
}
impl fmt::Debug for FactType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FactType")
            .field("arity", &self.arity)
            .field("reading", &self.reading)
            .field("constraints", &self.constraints.len())
            .finish()
    }
}

/// Alias for [`FactType::curry`].
pub fn make_verb_fact(fact_type: &FactType) -> Curried {
    fact_type.curry()
}

// ------------- Currying -------------
/// A fact type with some of its roles filled in.
#[derive(Clone)]
pub struct PartialFact {
    arity: usize,
    verb: VerbFn,
    supplied: Vec<Entity>,
}
impl PartialFact {
    /// Fills the next role, in call order.
    pub fn apply<E: Into<Entity>>(mut self, noun: E) -> Curried {
        self.supplied.push(noun.into());
        self.settle()
    }
    pub fn remaining(&self) -> usize {
        self.arity - self.supplied.len()
    }
    fn settle(self) -> Curried {
        if self.supplied.len() == self.arity {
            Curried::Complete {
                fact: (self.verb)(List::from(self.supplied)),
                arity: self.arity,
            }
        } else {
            Curried::Partial(self)
        }
    }
}

/// The result of each step of curried construction.
#[derive(Clone)]
pub enum Curried {
    Partial(PartialFact),
    /// The finished fact, with the arity of the fact type it came from.
    Complete { fact: FactSymbol, arity: usize },
}
impl Curried {
    /// Applying past the arity is a caller error.
    pub fn apply<E: Into<Entity>>(self, noun: E) -> Result<Curried> {
        match self {
            Curried::Partial(partial) => Ok(partial.apply(noun)),
            Curried::Complete { arity, .. } => Err(FactloomError::Arity {
                expected: arity,
                supplied: arity + 1,
            }),
        }
    }
    pub fn into_fact(self) -> Result<FactSymbol> {
        match self {
            Curried::Complete { fact, .. } => Ok(fact),
            Curried::Partial(partial) => Err(FactloomError::Arity {
                expected: partial.arity,
                supplied: partial.supplied.len(),
            }),
        }
    }
    pub fn is_complete(&self) -> bool {
        matches!(self, Curried::Complete { .. })
    }
}
