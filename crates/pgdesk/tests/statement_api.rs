//! Public API checks for the statement builder and DDL renderers.

use pgdesk::ddl::{self, AlterTable, ColumnDef};
use pgdesk::stmt::{self, AggregateFunc, Case, SimpleCase, WithStatement, expr, grouping};
use pgdesk::{DeskError, ErrorKind, validate_identifier};

#[test]
fn report_query_renders_every_clause() {
    let sql = stmt::select("sales s")
        .distinct()
        .select(&["s.region"])
        .select_upper("s.rep", "rep")
        .aggregate("s.amount", AggregateFunc::Sum)
        .left_join("reps r", "r.id = s.rep_id")
        .where_ne("s.status", "void")
        .where_between("s.amount", "10", "500")
        .rollup(&["s.region", "s.rep"])
        .having("SUM(s.amount) > 100")
        .order_by_asc(&["s.region"])
        .limit(10)
        .offset(0)
        .build();

    assert_eq!(
        sql,
        "SELECT DISTINCT s.region, UPPER(s.rep) AS rep, SUM(s.amount) FROM sales s \
         LEFT JOIN reps r ON r.id = s.rep_id \
         WHERE s.status != 'void' AND s.amount BETWEEN 10 AND 500 \
         GROUP BY ROLLUP(s.region, s.rep) HAVING SUM(s.amount) > 100 \
         ORDER BY s.region ASC LIMIT 10"
    );
}

#[test]
fn bound_values_number_through_nesting() {
    let sub = stmt::select("orders o")
        .select(&["1"])
        .where_raw("o.customer_id = c.id")
        .where_bind("o.total", ">", 50i32);
    let main = stmt::select("customers c")
        .where_bind("c.country", "=", "DE".to_string())
        .where_exists(sub)
        .having_bind("COUNT(*)", ">=", 2i64)
        .group_by(&["c.id"]);
    let with = WithStatement::new(main).cte_builder(
        "vip",
        stmt::select("customers").where_bind("tier", "=", "gold".to_string()),
    );

    let (sql, params) = with.build_with_params();
    assert_eq!(params.len(), 4);
    assert!(sql.starts_with("WITH vip AS (SELECT * FROM customers WHERE tier = $1) "));
    assert!(sql.contains("c.country = $2"));
    assert!(sql.contains("o.total > $3"));
    assert!(sql.ends_with("HAVING COUNT(*) >= $4"));
}

#[test]
fn free_expression_helpers() {
    assert_eq!(expr::concat(&["first", "last"]).as_deref(), Some("first || ' ' || last"));
    assert_eq!(expr::coalesce(&[]), None);
    assert_eq!(grouping::cube(&["a", "b"]).as_deref(), Some("CUBE(a, b)"));
    assert_eq!(
        Case::new().when("x > 0", "'pos'").otherwise("'neg'").build(),
        "CASE WHEN x > 0 THEN 'pos' ELSE 'neg' END"
    );
    assert_eq!(SimpleCase::new("status").build(), "");
}

#[test]
fn ddl_renderers_validate_first() {
    assert!(validate_identifier("order_items").is_ok());

    let err = ddl::create_table_sql("items", &[ColumnDef::new("id;", "INT")], &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);

    let op = AlterTable::RenameColumn {
        table: "items".into(),
        from: "nm".into(),
        to: "name".into(),
    };
    assert_eq!(op.to_sql().unwrap(), "ALTER TABLE items RENAME COLUMN nm TO name");

    assert!(matches!(
        ddl::create_view_sql("v_items", ""),
        Err(DeskError::Validation(_))
    ));
}
