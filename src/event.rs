use std::fmt;

use serde::{Deserialize, Serialize};

use crate::construct::FactSymbol;
use crate::datatype::Time;
use crate::encoding::List;
use crate::reading::{Reading, ReadingKeeper};

// ------------- Event -------------
/// A fact that happened at some time, optionally carrying the readings that
/// should be used to render it. Events are plain values: any ordering of an
/// event stream is up to whoever builds the stream.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Event {
    fact: FactSymbol,
    time: Time,
    #[serde(default)]
    readings: List<Reading>,
}
impl Event {
    pub fn new(fact: FactSymbol, time: Time, readings: List<Reading>) -> Self {
        Self {
            fact,
            time,
            readings,
        }
    }
    /// An event without readings of its own.
    pub fn at(fact: FactSymbol, time: Time) -> Self {
        Self::new(fact, time, List::nil())
    }
    pub fn fact(&self) -> &FactSymbol {
        &self.fact
    }
    pub fn time(&self) -> &Time {
        &self.time
    }
    pub fn readings(&self) -> &List<Reading> {
        &self.readings
    }
    /// Renders with the event's own reading for the fact's verb, falling back
    /// to the keeper.
    pub fn render(&self, keeper: &ReadingKeeper) -> Option<String> {
        self.readings
            .iter()
            .find(|reading| reading.verb() == self.fact.verb())
            .map(|reading| reading.render(&self.fact))
            .or_else(|| keeper.render(&self.fact))
    }
}
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} @ {}", self.fact, self.time)
    }
}
