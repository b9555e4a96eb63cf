pub mod cli;
pub mod config;
mod ddl_cmd;
mod logging;
mod query_cmd;
mod render;
pub mod session;

use config::ProjectConfig;
use pgdesk::ExecConfig;
use session::Session;

pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cmd = cli::parse_args(&args)?;
    let global = match &cmd {
        cli::Command::Help(topic) => {
            cli::print_help(*topic);
            return Ok(());
        }
        cli::Command::Query(q) => &q.global,
        cli::Command::Ddl(d) => &d.global,
    };

    let project = ProjectConfig::load_or_default(global.config.clone())?;
    logging::init_logging(&project.file.log.level);

    let mut exec = ExecConfig::new();
    if let Some(timeout) = project.query_timeout() {
        exec = exec.with_query_timeout(timeout);
    }
    let mut session = Session::new(exec);

    let outcome = match cmd {
        cli::Command::Help(_) => Ok(()),
        cli::Command::Query(args) => query_cmd::run(args, &project, &mut session).await,
        cli::Command::Ddl(args) => ddl_cmd::run(args, &project, &mut session).await,
    };
    outcome?;

    tracing::debug!(statements = session.history().len(), "session finished");
    Ok(())
}

/// One pooled connection to the configured database.
pub(crate) async fn connect(
    project: &ProjectConfig,
    database: Option<&str>,
) -> anyhow::Result<pgdesk::deadpool_postgres::Client> {
    let url = project.database_url(database)?;
    let pool = pgdesk::create_pool_with_config(&url, project.file.database.pool_size)?;
    let client = pool.get().await?;
    tracing::debug!(pool_size = project.file.database.pool_size, "connected");
    Ok(client)
}
