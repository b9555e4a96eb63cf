//! Views and materialized views.

use super::{require, run_ddl};
use crate::client::GenericClient;
use crate::error::DeskResult;
use crate::ident::validate_identifier;

fn view_sql(verb: &str, name: &str, query: &str) -> DeskResult<String> {
    validate_identifier(name)?;
    require(query, "view query")?;
    Ok(format!("{verb} {name} AS {}", query.trim()))
}

/// `CREATE VIEW name AS query`
pub fn create_view_sql(name: &str, query: &str) -> DeskResult<String> {
    view_sql("CREATE VIEW", name, query)
}

pub async fn create_view(conn: &impl GenericClient, name: &str, query: &str) -> DeskResult<()> {
    let sql = create_view_sql(name, query)?;
    run_ddl(conn, &sql, &format!("create view {name}")).await
}

/// `CREATE OR REPLACE VIEW name AS query`
pub fn create_or_replace_view_sql(name: &str, query: &str) -> DeskResult<String> {
    view_sql("CREATE OR REPLACE VIEW", name, query)
}

pub async fn create_or_replace_view(
    conn: &impl GenericClient,
    name: &str,
    query: &str,
) -> DeskResult<()> {
    let sql = create_or_replace_view_sql(name, query)?;
    run_ddl(conn, &sql, &format!("create or replace view {name}")).await
}

/// `DROP VIEW IF EXISTS name CASCADE`
pub fn drop_view_sql(name: &str) -> DeskResult<String> {
    validate_identifier(name)?;
    Ok(format!("DROP VIEW IF EXISTS {name} CASCADE"))
}

pub async fn drop_view(conn: &impl GenericClient, name: &str) -> DeskResult<()> {
    let sql = drop_view_sql(name)?;
    run_ddl(conn, &sql, &format!("drop view {name}")).await
}

/// `CREATE MATERIALIZED VIEW name AS query`
pub fn create_materialized_view_sql(name: &str, query: &str) -> DeskResult<String> {
    view_sql("CREATE MATERIALIZED VIEW", name, query)
}

pub async fn create_materialized_view(
    conn: &impl GenericClient,
    name: &str,
    query: &str,
) -> DeskResult<()> {
    let sql = create_materialized_view_sql(name, query)?;
    run_ddl(conn, &sql, &format!("create materialized view {name}")).await
}

/// `REFRESH MATERIALIZED VIEW [CONCURRENTLY] name`
///
/// `CONCURRENTLY` requires a unique index on the view; the server enforces it.
pub fn refresh_materialized_view_sql(name: &str, concurrently: bool) -> DeskResult<String> {
    validate_identifier(name)?;
    let mode = if concurrently { "CONCURRENTLY " } else { "" };
    Ok(format!("REFRESH MATERIALIZED VIEW {mode}{name}"))
}

pub async fn refresh_materialized_view(
    conn: &impl GenericClient,
    name: &str,
    concurrently: bool,
) -> DeskResult<()> {
    let sql = refresh_materialized_view_sql(name, concurrently)?;
    run_ddl(conn, &sql, &format!("refresh materialized view {name}")).await
}

/// `DROP MATERIALIZED VIEW IF EXISTS name CASCADE`
pub fn drop_materialized_view_sql(name: &str) -> DeskResult<String> {
    validate_identifier(name)?;
    Ok(format!("DROP MATERIALIZED VIEW IF EXISTS {name} CASCADE"))
}

pub async fn drop_materialized_view(conn: &impl GenericClient, name: &str) -> DeskResult<()> {
    let sql = drop_materialized_view_sql(name)?;
    run_ddl(conn, &sql, &format!("drop materialized view {name}")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeskError;
    use crate::stmt::select;
    use crate::test_support::RecordingClient;

    #[test]
    fn view_statements() {
        let body = select("products").where_eq("active", "t").build();
        assert_eq!(
            create_view_sql("active_products", &body).unwrap(),
            "CREATE VIEW active_products AS SELECT * FROM products WHERE active = 't'"
        );
        assert!(create_or_replace_view_sql("v", "SELECT 1").unwrap().starts_with("CREATE OR REPLACE VIEW v AS"));
        assert_eq!(drop_view_sql("v").unwrap(), "DROP VIEW IF EXISTS v CASCADE");
        assert!(matches!(create_view_sql("v", " "), Err(DeskError::Validation(_))));
        assert!(matches!(drop_view_sql("v-1"), Err(DeskError::InvalidIdentifier(_))));
    }

    #[test]
    fn refresh_modes() {
        assert_eq!(
            refresh_materialized_view_sql("sales_mv", false).unwrap(),
            "REFRESH MATERIALIZED VIEW sales_mv"
        );
        assert_eq!(
            refresh_materialized_view_sql("sales_mv", true).unwrap(),
            "REFRESH MATERIALIZED VIEW CONCURRENTLY sales_mv"
        );
    }

    #[tokio::test]
    async fn materialized_lifecycle() {
        let conn = RecordingClient::new();
        create_materialized_view(&conn, "sales_mv", "SELECT region, SUM(amount) FROM sales GROUP BY region")
            .await
            .unwrap();
        refresh_materialized_view(&conn, "sales_mv", true).await.unwrap();
        drop_materialized_view(&conn, "sales_mv").await.unwrap();

        let sqls: Vec<String> = conn.calls().into_iter().map(|(sql, _)| sql).collect();
        assert_eq!(
            sqls,
            [
                "CREATE MATERIALIZED VIEW sales_mv AS SELECT region, SUM(amount) FROM sales GROUP BY region",
                "REFRESH MATERIALIZED VIEW CONCURRENTLY sales_mv",
                "DROP MATERIALIZED VIEW IF EXISTS sales_mv CASCADE",
            ]
        );
    }
}
