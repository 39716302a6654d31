//! The relational schema produced by the mapping.
//!
//! Tables are identified by name; adding a table under a name that is
//! already present keeps the first one.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::construct::FactSymbol;

// ------------- Column -------------
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Date,
}
impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Date => "date",
        }
    }
    /// The SQL type a column of this type is declared with.
    pub fn sql(&self) -> &'static str {
        match self {
            ColumnType::String => "TEXT",
            ColumnType::Date => "TEXT",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Column {
    name: String,
    #[serde(rename = "type")]
    kind: ColumnType,
}
impl Column {
    pub fn new<N: Into<String>>(name: N, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> ColumnType {
        self.kind
    }
}
impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.kind.as_str())
    }
}

// ------------- Table -------------
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    functional_roles: Option<Vec<FactSymbol>>,
}
impl Table {
    pub fn new<N: Into<String>>(name: N, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            key: None,
            rows: None,
            functional_roles: None,
        }
    }
    pub fn with_key<K: Into<String>>(mut self, key: K) -> Self {
        self.key = Some(key.into());
        self
    }
    pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = Some(rows);
        self
    }
    pub fn with_functional_roles(mut self, facts: Vec<FactSymbol>) -> Self {
        self.functional_roles = Some(facts);
        self
    }
    /// The same table with every column passed through `f`.
    pub fn map_columns<F>(self, f: F) -> Self
    where
        F: FnMut(Column) -> Column,
    {
        Self {
            columns: self.columns.into_iter().map(f).collect(),
            ..self
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
    pub fn rows(&self) -> Option<&[Vec<String>]> {
        self.rows.as_deref()
    }
    pub fn functional_roles(&self) -> Option<&[FactSymbol]> {
        self.functional_roles.as_deref()
    }
    /// A `CREATE TABLE` statement; the key column becomes the primary key.
    pub fn ddl(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let mut definition = format!("{} {}", quote(&c.name), c.kind.sql());
                if self.key.as_deref() == Some(c.name.as_str()) {
                    definition += " PRIMARY KEY";
                }
                definition
            })
            .collect();
        format!("CREATE TABLE {} ({})", quote(&self.name), columns.join(", "))
    }
}
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        write!(f, "{} ({})", self.name, columns.join(", "))
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

// ------------- Relationship / Index -------------
/// An association between two tables.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub via: String,
}

/// An index over table columns, as a uniqueness constraint would require.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Index {
    pub table: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

// ------------- Schema -------------
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Schema {
    tables: BTreeMap<String, Table>,
    relationships: Vec<Relationship>,
    indices: Vec<Index>,
}
impl Schema {
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds `table` unless one with the same name exists. Returns whether a
    /// table by that name was already there.
    pub fn add_table(&mut self, table: Table) -> bool {
        match self.tables.entry(table.name.clone()) {
            Entry::Occupied(_) => true,
            Entry::Vacant(e) => {
                e.insert(table);
                false
            }
        }
    }
    pub fn tables(&self) -> &BTreeMap<String, Table> {
        &self.tables
    }
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
    pub fn indices(&self) -> &[Index] {
        &self.indices
    }
    /// The same schema with every table passed through `f`.
    pub fn map_tables<F>(self, mut f: F) -> Self
    where
        F: FnMut(Table) -> Table,
    {
        Self {
            tables: self
                .tables
                .into_iter()
                .map(|(name, table)| (name, f(table)))
                .collect(),
            ..self
        }
    }
    /// One `CREATE TABLE` statement per table, in name order.
    pub fn ddl(&self) -> Vec<String> {
        self.tables.values().map(Table::ddl).collect()
    }
}
