//! Readings render facts as natural-language text.
//!
//! A [`Reading`] is a verb, a role order and a template of text fragments.
//! Rendering reorders the fact's nouns by the role order and interleaves them
//! with the fragments. An inverse reading is just another reading, declared
//! under its own verb, whose role order permutes the nouns of the original
//! verb's facts; nothing is derived automatically.
//!
//! There is no global registry. Embedders that want verb lookups keep their
//! readings in a [`ReadingKeeper`] they own.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

// used to keep the one-to-one mapping between verbs and their inverse verbs
use bimap::BiMap;
use pest::Parser;
use pest_derive::Parser;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::construct::{Entity, FactSymbol, OtherHasher};
use crate::datatype::Ident;
use crate::encoding::List;
use crate::error::{FactloomError, Result};

#[derive(Parser)]
#[grammar = "reading.pest"]
struct TemplateParser;

// ------------- Reading -------------
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Reading {
    verb: Ident,
    order: List<usize>,
    template: List<String>,
}
impl Reading {
    pub fn new<V: Into<Ident>>(verb: V, order: List<usize>, template: List<String>) -> Self {
        Self {
            verb: verb.into(),
            order,
            template,
        }
    }
    /// Parses a template such as `"{1} is loved by {0}"` into its role order
    /// and text fragments. There is always one more fragment than slots.
    pub fn parse<V: Into<Ident>>(verb: V, text: &str) -> Result<Self> {
        let template = TemplateParser::parse(Rule::template, text)?
            .next()
            .ok_or_else(|| FactloomError::Invariant("empty template parse".into()))?;
        let mut order = Vec::new();
        let mut fragments = Vec::new();
        let mut fragment = String::new();
        for part in template.into_inner() {
            match part.as_rule() {
                Rule::text => fragment.push_str(part.as_str()),
                Rule::slot => {
                    let position = part.into_inner().as_str();
                    let position = position.parse::<usize>().map_err(|e| {
                        FactloomError::Parse {
                            message: format!("role position '{}': {}", position, e),
                            line: None,
                            col: None,
                        }
                    })?;
                    order.push(position);
                    fragments.push(std::mem::take(&mut fragment));
                }
                _ => (),
            }
        }
        fragments.push(fragment);
        Ok(Self::new(verb, List::from(order), List::from(fragments)))
    }
    pub fn verb(&self) -> &Ident {
        &self.verb
    }
    pub fn order(&self) -> &List<usize> {
        &self.order
    }
    pub fn template(&self) -> &List<String> {
        &self.template
    }
    /// The fact's nouns in the order this reading mentions them. Positions
    /// beyond the nouns come back as `None`.
    pub fn reorder(&self, fact: &FactSymbol) -> List<Option<Entity>> {
        fact.nouns().reorder(&self.order)
    }
    /// Fragments and reordered nouns, alternately.
    pub fn render(&self, fact: &FactSymbol) -> String {
        let slots = self.reorder(fact);
        let mut rendered = String::new();
        let mut fragments = self.template.iter();
        let mut slots = slots.iter();
        loop {
            let fragment = fragments.next();
            if let Some(fragment) = fragment {
                rendered.push_str(fragment);
            }
            let slot = slots.next();
            match slot {
                Some(Some(noun)) => rendered.push_str(&noun.to_string()),
                Some(None) => {
                    warn!(verb = %self.verb, fact = %fact, "reading refers to a role the fact does not have");
                }
                None if fragment.is_none() => break,
                None => (),
            }
        }
        rendered
    }
}
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        let mut slots = self.order.iter();
        for fragment in self.template.iter() {
            s += fragment;
            if let Some(position) = slots.next() {
                s += &format!("{{{}}}", position);
            }
        }
        write!(f, "{}: {}", self.verb, s)
    }
}

// ------------- ReadingKeeper -------------
/// Owns readings by verb and remembers which verb is the inverse of which.
#[derive(Debug)]
pub struct ReadingKeeper {
    kept: HashMap<Ident, Arc<Reading>, OtherHasher>,
    inverses: BiMap<Ident, Ident>,
}
impl ReadingKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
            inverses: BiMap::new(),
        }
    }
    /// Keeps the reading for its verb. A verb keeps its first reading; the
    /// flag tells whether one was already kept.
    pub fn keep(&mut self, reading: Reading) -> (Arc<Reading>, bool) {
        match self.kept.entry(reading.verb().clone()) {
            Entry::Occupied(e) => (Arc::clone(e.get()), true),
            Entry::Vacant(e) => (Arc::clone(e.insert(Arc::new(reading))), false),
        }
    }
    /// Keeps `inverse` under its own verb and records it as the inverse of
    /// `verb`.
    pub fn keep_inverse<V: Into<Ident>>(&mut self, verb: V, inverse: Reading) -> (Arc<Reading>, bool) {
        let inverse_verb = inverse.verb().clone();
        let (kept, previously_kept) = self.keep(inverse);
        self.inverses.insert(verb.into(), inverse_verb);
        (kept, previously_kept)
    }
    pub fn get(&self, verb: &Ident) -> Option<Arc<Reading>> {
        self.kept.get(verb).cloned()
    }
    pub fn inverse_of(&self, verb: &Ident) -> Option<Arc<Reading>> {
        self.inverses
            .get_by_left(verb)
            .and_then(|inverse_verb| self.get(inverse_verb))
    }
    /// The verb a given inverse verb was declared for.
    pub fn verb_of_inverse(&self, inverse_verb: &Ident) -> Option<&Ident> {
        self.inverses.get_by_right(inverse_verb)
    }
    pub fn render(&self, fact: &FactSymbol) -> Option<String> {
        self.get(fact.verb()).map(|reading| reading.render(fact))
    }
    /// Renders the fact with the inverse reading of its verb.
    pub fn render_inverse(&self, fact: &FactSymbol) -> Option<String> {
        self.inverse_of(fact.verb()).map(|reading| reading.render(fact))
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}
impl Default for ReadingKeeper {
    fn default() -> Self {
        Self::new()
    }
}
