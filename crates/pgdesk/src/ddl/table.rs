use super::{require, run_ddl};
use crate::client::GenericClient;
use crate::error::{DeskError, DeskResult};
use crate::ident::{validate_identifier, validate_identifiers};

/// One column of a `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
    /// Inline constraints such as `NOT NULL DEFAULT 0`; may be empty.
    pub constraints: String,
}

impl ColumnDef {
    pub fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            constraints: String::new(),
        }
    }

    pub fn constraints(mut self, constraints: &str) -> Self {
        self.constraints = constraints.to_string();
        self
    }

    fn render(&self) -> DeskResult<String> {
        validate_identifier(&self.name)?;
        require(&self.data_type, "column type")?;
        Ok(join_words(&[
            self.name.as_str(),
            self.data_type.as_str(),
            self.constraints.as_str(),
        ]))
    }
}

fn join_words(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `CREATE TABLE IF NOT EXISTS name (col type constraints, ..., table_constraint, ...)`
pub fn create_table_sql(
    name: &str,
    columns: &[ColumnDef],
    table_constraints: &[&str],
) -> DeskResult<String> {
    validate_identifier(name)?;
    if columns.is_empty() {
        return Err(DeskError::validation("column list cannot be empty"));
    }
    let mut defs = columns
        .iter()
        .map(ColumnDef::render)
        .collect::<DeskResult<Vec<_>>>()?;
    defs.extend(
        table_constraints
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    );
    Ok(format!("CREATE TABLE IF NOT EXISTS {name} ({})", defs.join(", ")))
}

pub async fn create_table(
    conn: &impl GenericClient,
    name: &str,
    columns: &[ColumnDef],
    table_constraints: &[&str],
) -> DeskResult<()> {
    let sql = create_table_sql(name, columns, table_constraints)?;
    run_ddl(conn, &sql, &format!("create table {name}")).await
}

/// `ALTER TABLE` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterTable {
    AddColumn {
        table: String,
        column: String,
        data_type: String,
        constraints: String,
    },
    DropColumn {
        table: String,
        column: String,
    },
    AlterColumnType {
        table: String,
        column: String,
        data_type: String,
    },
    RenameColumn {
        table: String,
        from: String,
        to: String,
    },
    RenameTable {
        from: String,
        to: String,
    },
    AddCheck {
        table: String,
        constraint: String,
        expression: String,
    },
    DropConstraint {
        table: String,
        constraint: String,
    },
    SetNotNull {
        table: String,
        column: String,
    },
    DropNotNull {
        table: String,
        column: String,
    },
    AddUnique {
        table: String,
        constraint: String,
        column: String,
    },
    AddForeignKey {
        table: String,
        constraint: String,
        column: String,
        ref_table: String,
        ref_column: String,
    },
}

impl AlterTable {
    /// Validate identifiers and render the statement.
    pub fn to_sql(&self) -> DeskResult<String> {
        use AlterTable::*;
        let sql = match self {
            AddColumn {
                table,
                column,
                data_type,
                constraints,
            } => {
                validate_identifiers([table.as_str(), column.as_str()])?;
                require(data_type, "column type")?;
                format!(
                    "ALTER TABLE {table} ADD COLUMN {}",
                    join_words(&[column.as_str(), data_type.as_str(), constraints.as_str()])
                )
            }
            DropColumn { table, column } => {
                validate_identifiers([table.as_str(), column.as_str()])?;
                format!("ALTER TABLE {table} DROP COLUMN {column}")
            }
            AlterColumnType {
                table,
                column,
                data_type,
            } => {
                validate_identifiers([table.as_str(), column.as_str()])?;
                require(data_type, "column type")?;
                format!("ALTER TABLE {table} ALTER COLUMN {column} TYPE {data_type}")
            }
            RenameColumn { table, from, to } => {
                validate_identifiers([table.as_str(), from.as_str(), to.as_str()])?;
                format!("ALTER TABLE {table} RENAME COLUMN {from} TO {to}")
            }
            RenameTable { from, to } => {
                validate_identifiers([from.as_str(), to.as_str()])?;
                format!("ALTER TABLE {from} RENAME TO {to}")
            }
            AddCheck {
                table,
                constraint,
                expression,
            } => {
                validate_identifiers([table.as_str(), constraint.as_str()])?;
                require(expression, "check expression")?;
                format!("ALTER TABLE {table} ADD CONSTRAINT {constraint} CHECK ({expression})")
            }
            DropConstraint { table, constraint } => {
                validate_identifiers([table.as_str(), constraint.as_str()])?;
                format!("ALTER TABLE {table} DROP CONSTRAINT {constraint}")
            }
            SetNotNull { table, column } => {
                validate_identifiers([table.as_str(), column.as_str()])?;
                format!("ALTER TABLE {table} ALTER COLUMN {column} SET NOT NULL")
            }
            DropNotNull { table, column } => {
                validate_identifiers([table.as_str(), column.as_str()])?;
                format!("ALTER TABLE {table} ALTER COLUMN {column} DROP NOT NULL")
            }
            AddUnique {
                table,
                constraint,
                column,
            } => {
                validate_identifiers([table.as_str(), constraint.as_str(), column.as_str()])?;
                format!("ALTER TABLE {table} ADD CONSTRAINT {constraint} UNIQUE ({column})")
            }
            AddForeignKey {
                table,
                constraint,
                column,
                ref_table,
                ref_column,
            } => {
                validate_identifiers([
                    table.as_str(),
                    constraint.as_str(),
                    column.as_str(),
                    ref_table.as_str(),
                    ref_column.as_str(),
                ])?;
                format!(
                    "ALTER TABLE {table} ADD CONSTRAINT {constraint} \
                     FOREIGN KEY ({column}) REFERENCES {ref_table}({ref_column})"
                )
            }
        };
        Ok(sql)
    }

    /// Short description used in logs and error context.
    pub fn describe(&self) -> String {
        use AlterTable::*;
        match self {
            AddColumn { table, column, .. } => format!("add column {column} to {table}"),
            DropColumn { table, column } => format!("drop column {column} from {table}"),
            AlterColumnType { table, column, .. } => {
                format!("change type of {table}.{column}")
            }
            RenameColumn { table, from, to } => format!("rename column {table}.{from} to {to}"),
            RenameTable { from, to } => format!("rename table {from} to {to}"),
            AddCheck {
                table, constraint, ..
            } => format!("add check {constraint} on {table}"),
            DropConstraint { table, constraint } => {
                format!("drop constraint {constraint} on {table}")
            }
            SetNotNull { table, column } => format!("set {table}.{column} not null"),
            DropNotNull { table, column } => format!("drop not null on {table}.{column}"),
            AddUnique {
                table, constraint, ..
            } => format!("add unique {constraint} on {table}"),
            AddForeignKey {
                table, constraint, ..
            } => format!("add foreign key {constraint} on {table}"),
        }
    }
}

pub async fn alter_table(conn: &impl GenericClient, op: &AlterTable) -> DeskResult<()> {
    let sql = op.to_sql()?;
    run_ddl(conn, &sql, &op.describe()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::RecordingClient;

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[test]
    fn create_table_with_constraints() {
        let sql = create_table_sql(
            "products",
            &[
                ColumnDef::new("id", "SERIAL").constraints("PRIMARY KEY"),
                ColumnDef::new("name", "VARCHAR(100)").constraints("NOT NULL"),
                ColumnDef::new("price", "NUMERIC(10,2)"),
            ],
            &["CHECK (price >= 0)", "  "],
        )
        .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS products (id SERIAL PRIMARY KEY, \
             name VARCHAR(100) NOT NULL, price NUMERIC(10,2), CHECK (price >= 0))"
        );
    }

    #[test]
    fn create_table_requires_columns_and_valid_names() {
        assert!(matches!(
            create_table_sql("products", &[], &[]),
            Err(DeskError::Validation(_))
        ));
        assert!(matches!(
            create_table_sql("products", &[ColumnDef::new("bad name", "INT")], &[]),
            Err(DeskError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            create_table_sql("products", &[ColumnDef::new("id", " ")], &[]),
            Err(DeskError::Validation(_))
        ));
    }

    #[test]
    fn alter_table_renderings() {
        let cases = [
            (
                AlterTable::AddColumn {
                    table: s("products"),
                    column: s("sku"),
                    data_type: s("TEXT"),
                    constraints: s(""),
                },
                "ALTER TABLE products ADD COLUMN sku TEXT",
            ),
            (
                AlterTable::AlterColumnType {
                    table: s("products"),
                    column: s("qty"),
                    data_type: s("BIGINT"),
                },
                "ALTER TABLE products ALTER COLUMN qty TYPE BIGINT",
            ),
            (
                AlterTable::RenameTable {
                    from: s("products"),
                    to: s("items"),
                },
                "ALTER TABLE products RENAME TO items",
            ),
            (
                AlterTable::AddCheck {
                    table: s("products"),
                    constraint: s("price_pos"),
                    expression: s("price > 0"),
                },
                "ALTER TABLE products ADD CONSTRAINT price_pos CHECK (price > 0)",
            ),
            (
                AlterTable::DropNotNull {
                    table: s("products"),
                    column: s("description"),
                },
                "ALTER TABLE products ALTER COLUMN description DROP NOT NULL",
            ),
            (
                AlterTable::AddForeignKey {
                    table: s("products"),
                    constraint: s("fk_category"),
                    column: s("category_id"),
                    ref_table: s("categories"),
                    ref_column: s("id"),
                },
                "ALTER TABLE products ADD CONSTRAINT fk_category FOREIGN KEY (category_id) \
                 REFERENCES categories(id)",
            ),
        ];
        for (op, expected) in cases {
            assert_eq!(op.to_sql().unwrap(), expected);
        }
    }

    #[test]
    fn injection_in_identifiers_is_rejected() {
        let op = AlterTable::DropColumn {
            table: s("products; DROP TABLE users"),
            column: s("id"),
        };
        assert!(matches!(op.to_sql(), Err(DeskError::InvalidIdentifier(_))));

        let op = AlterTable::RenameColumn {
            table: s("products"),
            from: s("name"),
            to: s(""),
        };
        assert!(matches!(op.to_sql(), Err(DeskError::Validation(_))));
    }

    #[tokio::test]
    async fn runner_executes_and_adds_context() {
        let conn = RecordingClient::new();
        let op = AlterTable::SetNotNull {
            table: s("products"),
            column: s("name"),
        };
        alter_table(&conn, &op).await.unwrap();
        assert_eq!(
            conn.last_sql().as_deref(),
            Some("ALTER TABLE products ALTER COLUMN name SET NOT NULL")
        );

        let failing = RecordingClient::new().failing("column contains nulls");
        let err = alter_table(&failing, &op).await.unwrap_err();
        assert_eq!(err.to_string(), "set products.name not null: column contains nulls");
    }

    #[tokio::test]
    async fn invalid_identifier_never_reaches_the_database() {
        let conn = RecordingClient::new();
        let err = create_table(&conn, "1products", &[ColumnDef::new("id", "INT")], &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
        assert!(conn.calls().is_empty());
    }
}
