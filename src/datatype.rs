// used for timestamps on events
use chrono::{NaiveDate, NaiveDateTime, Utc};
// used to (de)serialize data types at the JSON boundary
use serde::{Deserialize, Serialize};

// used when parsing a string to a NaiveDateTime
use std::str::FromStr;
// used to print out readable forms of a data type
use std::fmt;

use crate::construct::Entity;

// ------------- Ident -------------
/// An opaque identifier value. Entities, verbs and meta-fact arguments are all
/// identified by one of these, and two identifiers are equal exactly when
/// their host values are.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ident {
    Number(i64),
    Text(String),
}

impl Ident {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Ident::Text(s) => Some(s),
            Ident::Number(_) => None,
        }
    }
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Ident::Number(n) => Some(*n),
            Ident::Text(_) => None,
        }
    }
}
impl From<&str> for Ident {
    fn from(s: &str) -> Self {
        Ident::Text(s.to_string())
    }
}
impl From<String> for Ident {
    fn from(s: String) -> Self {
        Ident::Text(s)
    }
}
impl From<&String> for Ident {
    fn from(s: &String) -> Self {
        Ident::Text(s.clone())
    }
}
impl From<i64> for Ident {
    fn from(n: i64) -> Self {
        Ident::Number(n)
    }
}
impl From<usize> for Ident {
    fn from(n: usize) -> Self {
        Ident::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }
}
impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Ident::Number(n) => write!(f, "{}", n),
            Ident::Text(s) => write!(f, "{}", s),
        }
    }
}

// ------------- Time -------------
/// When an event happened. The engine never orders events itself, but the
/// derived ordering is available to embedders that want one.
#[derive(Eq, PartialEq, PartialOrd, Ord, Debug, Hash, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Time {
    Tick(u64),
    Label(String),
    Thing(Entity),
    Date(NaiveDate),
    Moment(NaiveDateTime),
}
impl Time {
    pub fn now() -> Time {
        Time::Moment(Utc::now().naive_utc())
    }
    pub fn tick(t: u64) -> Time {
        Time::Tick(t)
    }
    /// Parses `YYYY-MM-DD` into a date and `YYYY-MM-DDTHH:MM:SS` into a moment,
    /// anything else is kept as a label.
    pub fn parse(s: &str) -> Time {
        if let Ok(d) = NaiveDate::from_str(s) {
            Time::Date(d)
        } else if let Ok(m) = NaiveDateTime::from_str(s) {
            Time::Moment(m)
        } else {
            Time::Label(s.to_string())
        }
    }
}
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Time::Tick(t) => write!(f, "{}", t),
            Time::Label(l) => write!(f, "{}", l),
            Time::Thing(e) => write!(f, "{}", e),
            Time::Date(d) => write!(f, "{}", d),
            Time::Moment(m) => write!(f, "{}", m),
        }
    }
}
