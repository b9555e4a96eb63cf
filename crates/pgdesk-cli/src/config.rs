use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_path: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;
        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!(
                "failed to load config file {}: {e:#}",
                config_path.display()
            )
        })?;

        Ok(Self { config_path, file })
    }

    /// Load `config_path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(config_path: PathBuf) -> anyhow::Result<Self> {
        if config_path.exists() {
            return Self::load(config_path);
        }
        Ok(Self {
            config_path,
            file: ConfigFile::default(),
        })
    }

    /// `--database`, then `database.url`, then `DATABASE_URL`.
    pub fn database_url(&self, cli_override: Option<&str>) -> anyhow::Result<String> {
        if let Some(url) = cli_override.filter(|u| !u.trim().is_empty()) {
            return Ok(url.to_string());
        }
        if let Some(url) = self.file.database.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.to_string());
        }
        match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Ok(url),
            _ => anyhow::bail!(
                "no database configured; set database.url in {}, pass --database, or set DATABASE_URL",
                self.config_path.display()
            ),
        }
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        self.file
            .query
            .timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl ConfigFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.expand_env()?;
        file.validate()?;
        Ok(file)
    }

    fn expand_env(&mut self) -> anyhow::Result<()> {
        if let Some(url) = self.database.url.as_mut() {
            *url = expand_env_vars(url)?;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.database.pool_size == 0 {
            anyhow::bail!("database.pool_size must be at least 1");
        }
        if let Some(limit) = self.query.default_limit {
            if limit <= 0 {
                anyhow::bail!("query.default_limit must be positive");
            }
        }
        if self.log.level.trim().is_empty() {
            anyhow::bail!("log.level must not be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            pool_size: default_pool_size(),
        }
    }
}

fn default_pool_size() -> usize {
    pgdesk::DEFAULT_POOL_SIZE
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryConfig {
    pub timeout_ms: Option<u64>,
    pub default_limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}}}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let v = std::env::var(&key)
                .map_err(|_| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}
