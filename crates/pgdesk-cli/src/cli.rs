use pgdesk::AggregateFunc;
use pgdesk::ddl::AlterTable;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Query,
    Ddl,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Query(QueryArgs),
    Ddl(DdlArgs),
}

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: PathBuf,
    pub database: Option<String>,
    pub dry_run: bool,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from("pgdesk.toml"),
            database: None,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryArgs {
    pub global: GlobalArgs,
    pub relation: String,
    pub select: Vec<String>,
    pub wheres: Vec<String>,
    pub group_by: Vec<String>,
    pub having: Vec<String>,
    pub order_by: Vec<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub distinct: bool,
    pub aggregates: Vec<(AggregateFunc, String)>,
    pub rollup: Vec<String>,
    pub cube: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DdlArgs {
    pub global: GlobalArgs,
    pub action: DdlAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdlAction {
    /// add-column, drop-column, rename-column, rename-table
    Alter(AlterTable),
    CreateView {
        name: String,
        query: String,
        replace: bool,
        materialized: bool,
    },
    DropView {
        name: String,
        materialized: bool,
    },
    CreateEnum {
        name: String,
        values: Vec<String>,
    },
    DropType {
        name: String,
    },
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "query" => parse_query(it.map(|s| s.as_str())),
        "ddl" => parse_ddl(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn next_value<'a>(flag: &str, it: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<&'a str> {
    let Some(v) = it.next() else {
        anyhow::bail!("{flag} requires a value");
    };
    Ok(v)
}

/// Handle options shared by every command. Returns `false` if `token` is not one.
fn parse_global<'a>(
    global: &mut GlobalArgs,
    token: &'a str,
    it: &mut impl Iterator<Item = &'a str>,
) -> anyhow::Result<bool> {
    match token {
        "--config" => global.config = PathBuf::from(next_value(token, it)?),
        _ if token.starts_with("--config=") => {
            global.config = PathBuf::from(token.trim_start_matches("--config="));
        }
        "--database" => global.database = Some(next_value(token, it)?.to_string()),
        _ if token.starts_with("--database=") => {
            global.database = Some(token.trim_start_matches("--database=").to_string());
        }
        "--dry-run" => global.dry_run = true,
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_query<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut args = QueryArgs::default();
    let mut relation: Option<&str> = None;

    while let Some(token) = it.next() {
        if parse_global(&mut args.global, token, &mut it)? {
            continue;
        }
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Query)),
            "--select" => args.select.extend(split_csv(next_value(token, &mut it)?)),
            "--where" => args.wheres.push(next_value(token, &mut it)?.to_string()),
            "--group-by" => args.group_by.extend(split_csv(next_value(token, &mut it)?)),
            "--having" => args.having.push(next_value(token, &mut it)?.to_string()),
            "--order-by" => args.order_by.push(next_value(token, &mut it)?.to_string()),
            "--limit" => args.limit = Some(parse_count(token, next_value(token, &mut it)?)?),
            "--offset" => args.offset = Some(parse_count(token, next_value(token, &mut it)?)?),
            "--distinct" => args.distinct = true,
            "--agg" => args.aggregates.push(parse_aggregate(next_value(token, &mut it)?)?),
            "--rollup" => args.rollup.extend(split_csv(next_value(token, &mut it)?)),
            "--cube" => args.cube.extend(split_csv(next_value(token, &mut it)?)),
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other if relation.is_none() => relation = Some(other),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    let Some(relation) = relation else {
        anyhow::bail!("query requires a relation (e.g. `pgdesk query products`)");
    };
    args.relation = relation.to_string();
    Ok(Command::Query(args))
}

fn parse_count(flag: &str, v: &str) -> anyhow::Result<i64> {
    v.parse()
        .map_err(|_| anyhow::anyhow!("{flag} expects an integer, got {v:?}"))
}

/// `FN:COL`, e.g. `sum:price`.
fn parse_aggregate(v: &str) -> anyhow::Result<(AggregateFunc, String)> {
    let Some((func, col)) = v.split_once(':') else {
        anyhow::bail!("--agg expects FN:COL, got {v:?}");
    };
    if col.trim().is_empty() {
        anyhow::bail!("--agg column must not be empty");
    }
    Ok((func.parse()?, col.trim().to_string()))
}

fn parse_ddl<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut global = GlobalArgs::default();
    let mut action: Option<&str> = None;
    let mut positional: Vec<&str> = Vec::new();
    let mut constraints = String::new();
    let mut replace = false;
    let mut materialized = false;

    while let Some(token) = it.next() {
        if parse_global(&mut global, token, &mut it)? {
            continue;
        }
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Ddl)),
            "--constraints" => constraints = next_value(token, &mut it)?.to_string(),
            "--or-replace" => replace = true,
            "--materialized" => materialized = true,
            other if other.starts_with("--") => anyhow::bail!("unknown argument: {other}"),
            other if action.is_none() => action = Some(other),
            other => positional.push(other),
        }
    }

    let Some(action) = action else {
        return Ok(Command::Help(HelpTopic::Ddl));
    };

    let take = |n: usize, usage: &str| -> anyhow::Result<Vec<String>> {
        if positional.len() != n {
            anyhow::bail!("usage: pgdesk ddl {action} {usage}");
        }
        Ok(positional.iter().map(|s| s.to_string()).collect())
    };

    let action = match action {
        "add-column" => {
            let [table, column, data_type]: [String; 3] = take(3, "<TABLE> <COLUMN> <TYPE>")?
                .try_into()
                .map_err(|_| anyhow::anyhow!("add-column expects three arguments"))?;
            DdlAction::Alter(AlterTable::AddColumn {
                table,
                column,
                data_type,
                constraints,
            })
        }
        "drop-column" => {
            let [table, column]: [String; 2] = take(2, "<TABLE> <COLUMN>")?
                .try_into()
                .map_err(|_| anyhow::anyhow!("drop-column expects two arguments"))?;
            DdlAction::Alter(AlterTable::DropColumn { table, column })
        }
        "rename-column" => {
            let [table, from, to]: [String; 3] = take(3, "<TABLE> <FROM> <TO>")?
                .try_into()
                .map_err(|_| anyhow::anyhow!("rename-column expects three arguments"))?;
            DdlAction::Alter(AlterTable::RenameColumn { table, from, to })
        }
        "rename-table" => {
            let [from, to]: [String; 2] = take(2, "<FROM> <TO>")?
                .try_into()
                .map_err(|_| anyhow::anyhow!("rename-table expects two arguments"))?;
            DdlAction::Alter(AlterTable::RenameTable { from, to })
        }
        "create-view" => {
            let [name, query]: [String; 2] = take(2, "<NAME> <QUERY>")?
                .try_into()
                .map_err(|_| anyhow::anyhow!("create-view expects two arguments"))?;
            DdlAction::CreateView {
                name,
                query,
                replace,
                materialized,
            }
        }
        "drop-view" => {
            let [name]: [String; 1] = take(1, "<NAME>")?
                .try_into()
                .map_err(|_| anyhow::anyhow!("drop-view expects one argument"))?;
            DdlAction::DropView { name, materialized }
        }
        "create-enum" => {
            if positional.len() < 2 {
                anyhow::bail!("usage: pgdesk ddl create-enum <NAME> <VALUE>...");
            }
            DdlAction::CreateEnum {
                name: positional[0].to_string(),
                values: positional[1..].iter().map(|s| s.to_string()).collect(),
            }
        }
        "drop-type" => {
            let [name]: [String; 1] = take(1, "<NAME>")?
                .try_into()
                .map_err(|_| anyhow::anyhow!("drop-type expects one argument"))?;
            DdlAction::DropType { name }
        }
        other => anyhow::bail!("unknown ddl action: {other}"),
    };

    Ok(Command::Ddl(DdlArgs { global, action }))
}

fn split_csv(v: &str) -> Vec<String> {
    v.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
pgdesk - PostgreSQL statement builder and schema helper

USAGE:
  pgdesk <COMMAND> [OPTIONS]

COMMANDS:
  query         Build a SELECT and run it (or print it with --dry-run)
  ddl           Run a schema change (columns, views, enum types)

Run `pgdesk <command> --help` for more."
            );
        }
        HelpTopic::Query => {
            println!(
                "\
USAGE:
  pgdesk query <RELATION> [OPTIONS]

GLOBAL OPTIONS:
  --config <FILE>       Config file path (default: pgdesk.toml)
  --database <URL>      Override database.url from config
  --dry-run             Print the SQL without executing it
  -h, --help            Print help

QUERY OPTIONS:
  --select <A,B>        Projection columns
  --distinct            SELECT DISTINCT
  --agg <FN:COL>        Aggregate (count, sum, avg, min, max); repeatable
  --where <COND>        Condition, ANDed with others; repeatable
  --group-by <A,B>      GROUP BY columns
  --rollup <A,B>        GROUP BY ROLLUP(...)
  --cube <A,B>          GROUP BY CUBE(...)
  --having <COND>       HAVING condition; repeatable
  --order-by <TERM>     ORDER BY term, e.g. \"price DESC\"; repeatable
  --limit <N>           LIMIT (default: query.default_limit)
  --offset <N>          OFFSET"
            );
        }
        HelpTopic::Ddl => {
            println!(
                "\
USAGE:
  pgdesk ddl add-column <TABLE> <COLUMN> <TYPE> [--constraints <SQL>]
  pgdesk ddl drop-column <TABLE> <COLUMN>
  pgdesk ddl rename-column <TABLE> <FROM> <TO>
  pgdesk ddl rename-table <FROM> <TO>
  pgdesk ddl create-view <NAME> <QUERY> [--or-replace] [--materialized]
  pgdesk ddl drop-view <NAME> [--materialized]
  pgdesk ddl create-enum <NAME> <VALUE>...
  pgdesk ddl drop-type <NAME>

GLOBAL OPTIONS:
  --config <FILE>       Config file path (default: pgdesk.toml)
  --database <URL>      Override database.url from config
  --dry-run             Print the SQL without executing it
  -h, --help            Print help"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        std::iter::once("pgdesk")
            .chain(v.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parse_query_with_clauses() {
        let cmd = parse_args(&args(&[
            "query",
            "products",
            "--select",
            "category, name",
            "--where",
            "price > 10",
            "--where",
            "active",
            "--agg",
            "SUM:price",
            "--order-by",
            "category DESC",
            "--limit",
            "5",
            "--database=postgres://localhost/shop",
            "--dry-run",
        ]))
        .unwrap();
        let Command::Query(q) = cmd else {
            panic!("expected query");
        };

        assert_eq!(q.relation, "products");
        assert_eq!(q.select, ["category", "name"]);
        assert_eq!(q.wheres, ["price > 10", "active"]);
        assert_eq!(q.aggregates, [(AggregateFunc::Sum, "price".to_string())]);
        assert_eq!(q.order_by, ["category DESC"]);
        assert_eq!(q.limit, Some(5));
        assert_eq!(q.global.database.as_deref(), Some("postgres://localhost/shop"));
        assert!(q.global.dry_run);
        assert_eq!(q.global.config, PathBuf::from("pgdesk.toml"));
    }

    #[test]
    fn parse_query_errors() {
        assert!(parse_args(&args(&["query"])).is_err());
        assert!(parse_args(&args(&["query", "t", "--limit", "ten"])).is_err());
        assert!(parse_args(&args(&["query", "t", "--agg", "median:x"])).is_err());
        assert!(parse_args(&args(&["query", "t", "--agg", "sum"])).is_err());
        assert!(parse_args(&args(&["query", "t", "u"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
    }

    #[test]
    fn parse_ddl_actions() {
        let cmd = parse_args(&args(&[
            "ddl",
            "add-column",
            "products",
            "sku",
            "TEXT",
            "--constraints",
            "UNIQUE",
        ]))
        .unwrap();
        let Command::Ddl(d) = cmd else {
            panic!("expected ddl");
        };
        assert_eq!(
            d.action,
            DdlAction::Alter(AlterTable::AddColumn {
                table: "products".into(),
                column: "sku".into(),
                data_type: "TEXT".into(),
                constraints: "UNIQUE".into(),
            })
        );

        let Command::Ddl(d) =
            parse_args(&args(&["ddl", "create-enum", "mood", "sad", "ok", "happy"])).unwrap()
        else {
            panic!("expected ddl");
        };
        assert_eq!(
            d.action,
            DdlAction::CreateEnum {
                name: "mood".into(),
                values: vec!["sad".into(), "ok".into(), "happy".into()],
            }
        );

        let Command::Ddl(d) =
            parse_args(&args(&["ddl", "drop-view", "sales_mv", "--materialized"])).unwrap()
        else {
            panic!("expected ddl");
        };
        assert_eq!(
            d.action,
            DdlAction::DropView {
                name: "sales_mv".into(),
                materialized: true,
            }
        );
    }

    #[test]
    fn ddl_arity_is_checked() {
        let err = parse_args(&args(&["ddl", "rename-table", "a"])).unwrap_err();
        assert_eq!(err.to_string(), "usage: pgdesk ddl rename-table <FROM> <TO>");
        assert!(matches!(
            parse_args(&args(&["ddl"])).unwrap(),
            Command::Help(HelpTopic::Ddl)
        ));
    }
}
