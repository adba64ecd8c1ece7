//! Table definition for the `dogs` table.
//!
//! The schema is fixed at [`SCHEMA_VERSION`]; there is no migration path.

/// Value stamped into `PRAGMA user_version` when the table is created.
pub const SCHEMA_VERSION: i64 = 1;

pub const DOGS_TABLE: &str = "dogs";

pub mod columns {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const AGE: &str = "age";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
}

impl DataType {
    fn as_sql(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: &'static str,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &'static str, data_type: DataType) -> Self {
        Self {
            name,
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push_str(match constraint {
                ColumnConstraint::PrimaryKey => " PRIMARY KEY",
            });
        }
        sql
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: &'static str,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// `CREATE TABLE IF NOT EXISTS` statement for this table.
    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDefinition::to_sql).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {}({})",
            self.name,
            columns.join(", ")
        )
    }
}

/// The one table this crate persists.
pub fn dogs_table() -> TableDefinition {
    TableDefinition {
        name: DOGS_TABLE,
        columns: vec![
            ColumnDefinition::new(columns::ID, DataType::Integer)
                .with_constraint(ColumnConstraint::PrimaryKey),
            ColumnDefinition::new(columns::NAME, DataType::Text),
            ColumnDefinition::new(columns::AGE, DataType::Integer),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn dogs_table_sql() {
        assert_eq!(
            dogs_table().create_sql(),
            "CREATE TABLE IF NOT EXISTS dogs(id INTEGER PRIMARY KEY, name TEXT, age INTEGER)"
        );
    }

    #[test]
    fn create_sql_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        let sql = dogs_table().create_sql();
        conn.execute(&sql, []).unwrap();
        conn.execute("INSERT INTO dogs (id, name, age) VALUES (1, 'Rex', 2)", [])
            .unwrap();
        conn.execute(&sql, []).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM dogs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
