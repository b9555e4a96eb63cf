use crate::cli::{DdlAction, DdlArgs};
use crate::config::ProjectConfig;
use crate::render;
use crate::session::Session;
use pgdesk::ddl;
use pgdesk::{DeskResult, GenericClient};

impl DdlAction {
    /// Render without touching the database; identifiers are validated here.
    pub fn to_sql(&self) -> DeskResult<String> {
        match self {
            DdlAction::Alter(op) => op.to_sql(),
            DdlAction::CreateView {
                name,
                query,
                replace,
                materialized,
            } => match (materialized, replace) {
                (true, _) => ddl::create_materialized_view_sql(name, query),
                (false, true) => ddl::create_or_replace_view_sql(name, query),
                (false, false) => ddl::create_view_sql(name, query),
            },
            DdlAction::DropView { name, materialized } => {
                if *materialized {
                    ddl::drop_materialized_view_sql(name)
                } else {
                    ddl::drop_view_sql(name)
                }
            }
            DdlAction::CreateEnum { name, values } => {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                ddl::create_enum_type_sql(name, &values)
            }
            DdlAction::DropType { name } => ddl::drop_type_sql(name),
        }
    }

    /// Execute through the library runners so logging and error context match.
    pub async fn apply(&self, conn: &impl GenericClient) -> DeskResult<()> {
        match self {
            DdlAction::Alter(op) => ddl::alter_table(conn, op).await,
            DdlAction::CreateView {
                name,
                query,
                replace,
                materialized,
            } => match (materialized, replace) {
                (true, _) => ddl::create_materialized_view(conn, name, query).await,
                (false, true) => ddl::create_or_replace_view(conn, name, query).await,
                (false, false) => ddl::create_view(conn, name, query).await,
            },
            DdlAction::DropView { name, materialized } => {
                if *materialized {
                    ddl::drop_materialized_view(conn, name).await
                } else {
                    ddl::drop_view(conn, name).await
                }
            }
            DdlAction::CreateEnum { name, values } => {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                ddl::create_enum_type(conn, name, &values).await
            }
            DdlAction::DropType { name } => ddl::drop_type(conn, name).await,
        }
    }
}

pub async fn run(
    args: DdlArgs,
    project: &ProjectConfig,
    session: &mut Session,
) -> anyhow::Result<()> {
    let sql = args.action.to_sql()?;
    render::print_sql(&sql);

    if args.global.dry_run {
        return Ok(());
    }

    let client = crate::connect(project, args.global.database.as_deref()).await?;

    args.action.apply(&client).await?;
    session.record(sql);
    render::success("done");
    Ok(())
}
