//! ENUM and composite types.

use super::{require, run_ddl};
use crate::client::GenericClient;
use crate::error::{DeskError, DeskResult};
use crate::ident::{validate_identifier, validate_identifiers};

/// `CREATE TYPE name AS ENUM ('a', 'b', ...)`
///
/// Labels must themselves be plain identifiers; they are then quoted.
pub fn create_enum_type_sql(name: &str, values: &[&str]) -> DeskResult<String> {
    validate_identifier(name)?;
    if values.is_empty() {
        return Err(DeskError::validation("enum needs at least one value"));
    }
    validate_identifiers(values.iter().copied())?;
    let labels: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
    Ok(format!("CREATE TYPE {name} AS ENUM ({})", labels.join(", ")))
}

pub async fn create_enum_type(
    conn: &impl GenericClient,
    name: &str,
    values: &[&str],
) -> DeskResult<()> {
    let sql = create_enum_type_sql(name, values)?;
    run_ddl(conn, &sql, &format!("create enum type {name}")).await
}

/// `ALTER TYPE name ADD VALUE 'value' [BEFORE 'other']`
pub fn add_enum_value_sql(name: &str, value: &str, before: Option<&str>) -> DeskResult<String> {
    validate_identifiers([name, value])?;
    let mut sql = format!("ALTER TYPE {name} ADD VALUE '{value}'");
    if let Some(before) = before.filter(|b| !b.is_empty()) {
        validate_identifier(before)?;
        sql.push_str(&format!(" BEFORE '{before}'"));
    }
    Ok(sql)
}

pub async fn add_enum_value(
    conn: &impl GenericClient,
    name: &str,
    value: &str,
    before: Option<&str>,
) -> DeskResult<()> {
    let sql = add_enum_value_sql(name, value, before)?;
    run_ddl(conn, &sql, &format!("add value {value} to enum {name}")).await
}

/// `CREATE TYPE name AS (field type, ...)`; fields render in the given order.
pub fn create_composite_type_sql(name: &str, fields: &[(&str, &str)]) -> DeskResult<String> {
    validate_identifier(name)?;
    if fields.is_empty() {
        return Err(DeskError::validation("composite type needs at least one field"));
    }
    let defs = fields
        .iter()
        .map(|(field, ty)| {
            validate_identifier(field)?;
            require(ty, "field type")?;
            Ok(format!("{field} {ty}"))
        })
        .collect::<DeskResult<Vec<_>>>()?;
    Ok(format!("CREATE TYPE {name} AS ({})", defs.join(", ")))
}

pub async fn create_composite_type(
    conn: &impl GenericClient,
    name: &str,
    fields: &[(&str, &str)],
) -> DeskResult<()> {
    let sql = create_composite_type_sql(name, fields)?;
    run_ddl(conn, &sql, &format!("create composite type {name}")).await
}

/// `DROP TYPE IF EXISTS name CASCADE`
pub fn drop_type_sql(name: &str) -> DeskResult<String> {
    validate_identifier(name)?;
    Ok(format!("DROP TYPE IF EXISTS {name} CASCADE"))
}

pub async fn drop_type(conn: &impl GenericClient, name: &str) -> DeskResult<()> {
    let sql = drop_type_sql(name)?;
    run_ddl(conn, &sql, &format!("drop type {name}")).await
}
