use crate::cli::QueryArgs;
use crate::config::ProjectConfig;
use crate::render;
use crate::session::Session;
use pgdesk::{StatementBuilder, stmt};

/// Translate parsed arguments into a statement. `default_limit` applies when
/// `--limit` was not given.
pub fn build_statement(args: &QueryArgs, default_limit: Option<i64>) -> StatementBuilder {
    let mut qb = stmt::select(&args.relation);

    let cols: Vec<&str> = args.select.iter().map(String::as_str).collect();
    qb = qb.select(&cols);
    if args.distinct {
        qb = qb.distinct();
    }
    for (func, col) in &args.aggregates {
        qb = qb.aggregate(col, *func);
    }
    for cond in &args.wheres {
        qb = qb.where_raw(cond);
    }

    let group: Vec<&str> = args.group_by.iter().map(String::as_str).collect();
    qb = qb.group_by(&group);
    let rollup: Vec<&str> = args.rollup.iter().map(String::as_str).collect();
    qb = qb.rollup(&rollup);
    let cube: Vec<&str> = args.cube.iter().map(String::as_str).collect();
    qb = qb.cube(&cube);

    for cond in &args.having {
        qb = qb.having(cond);
    }
    let order: Vec<&str> = args.order_by.iter().map(String::as_str).collect();
    qb = qb.order_by(&order);

    if let Some(limit) = args.limit.or(default_limit) {
        qb = qb.limit(limit);
    }
    if let Some(offset) = args.offset {
        qb = qb.offset(offset);
    }
    qb
}

pub async fn run(
    args: QueryArgs,
    project: &ProjectConfig,
    session: &mut Session,
) -> anyhow::Result<()> {
    let qb = build_statement(&args, project.file.query.default_limit);
    qb.validate()?;
    render::print_sql(&qb.build());

    if args.global.dry_run {
        return Ok(());
    }

    let client = crate::connect(project, args.global.database.as_deref()).await?;

    let grid = session.run_query(&client, &qb).await?;
    render::print_grid(grid);
    Ok(())
}
