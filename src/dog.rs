use rusqlite::types::{FromSql, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, StoreError};
use crate::schema::columns;

/// Column values produced by [`Dog::to_map`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

/// One row of the `dogs` table.
///
/// A `Dog` is never mutated in place: to change a stored dog, build a new
/// value with the same `id` and pass it to
/// [`DogStore::update`](crate::store::DogStore::update).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dog {
    id: i64,
    name: String,
    age: i64,
}

impl Dog {
    pub fn new(id: i64, name: impl Into<String>, age: i64) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    /// Column name to value mapping, keyed exactly by the table's columns.
    pub fn to_map(&self) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            (columns::ID, Value::from(self.id)),
            (columns::NAME, Value::from(self.name.as_str())),
            (columns::AGE, Value::from(self.age)),
        ])
    }

    /// Decodes a row fetched from the `dogs` table by column name.
    pub(crate) fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            id: column(row, columns::ID)?,
            name: column(row, columns::NAME)?,
            age: column(row, columns::AGE)?,
        })
    }
}

fn column<T: FromSql>(row: &Row<'_>, name: &str) -> Result<T> {
    row.get(name)
        .map_err(|err| StoreError::from_column(name, err))
}

impl fmt::Display for Dog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dog{{id: {}, name: {}, age: {}}}",
            self.id, self.name, self.age
        )
    }
}

/// Renders a list of dogs as `[Dog{..}, Dog{..}]`.
pub fn format_dogs(dogs: &[Dog]) -> String {
    let items: Vec<String> = dogs.iter().map(Dog::to_string).collect();
    format!("[{}]", items.join(", "))
}
