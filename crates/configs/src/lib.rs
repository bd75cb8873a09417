use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub soap: SoapConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Directory holding the enrollment form (index.html, script.js).
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4), public_dir: default_public_dir() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 5050 }

fn default_public_dir() -> String { "public".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Apply pending migrations on startup.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }

/// Which enrollment store backs the service.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Database,
    Memory,
}

impl StoreBackend {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(Self::Database),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(anyhow!("unknown store backend `{other}` (expected database|memory)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoapConfig {
    /// Path serving both the SOAP endpoint (POST) and the WSDL (GET).
    #[serde(default = "default_soap_path")]
    pub path: String,
    /// Externally visible base URL written into the WSDL `soap:address`.
    /// Derived from host/port when absent.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl Default for SoapConfig {
    fn default() -> Self {
        Self { path: default_soap_path(), public_url: None }
    }
}

fn default_soap_path() -> String { "/wsdl".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_log_format() -> String { "compact".into() }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is absent, then apply environment overrides and validate.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with an explicit variable lookup.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = env("CONFIG_PATH").unwrap_or_else(|| "config.toml".to_string());
        let mut cfg = match load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_overrides_from(env)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment variables win over file values.
    fn apply_overrides_from(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = env("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be a port number, got `{port}`"))?;
        }
        if let Some(w) = env("TOKIO_WORKER_THREADS") {
            let threads = w
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow!("TOKIO_WORKER_THREADS must be a thread count, got `{w}`"))?;
            self.server.worker_threads = Some(threads);
        }
        if let Some(dir) = env("PUBLIC_DIR") {
            self.server.public_dir = dir;
        }
        if let Some(backend) = env("STORE_BACKEND") {
            self.store.backend = StoreBackend::parse(&backend)?;
        }
        if let Some(fmt) = env("LOG_FORMAT") {
            self.logging.format = fmt;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        self.soap.normalize();
        // 仅在使用数据库存储时校验 database 配置
        if self.store.backend == StoreBackend::Database {
            self.database.normalize_from_env();
            self.database.validate()?;
        }
        Ok(())
    }

    /// Base URL clients should use to reach the SOAP endpoint.
    pub fn soap_endpoint_url(&self) -> String {
        let base = match &self.soap.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.server.host, self.server.port),
        };
        format!("{}{}", base, self.soap.path)
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        if self.public_dir.trim().is_empty() {
            self.public_dir = default_public_dir();
        }
        Ok(())
    }
}

impl SoapConfig {
    fn normalize(&mut self) {
        let trimmed = self.path.trim().trim_end_matches('/');
        self.path = if trimmed.is_empty() {
            default_soap_path()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 URL，则尝试从环境变量填充
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_5050_with_wsdl_path() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 5050);
        assert_eq!(cfg.soap.path, "/wsdl");
        assert_eq!(cfg.store.backend, StoreBackend::Database);
        assert_eq!(cfg.soap_endpoint_url(), "http://127.0.0.1:5050/wsdl");
    }

    #[test]
    fn parses_toml_sections() -> Result<()> {
        let mut cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            public_dir = "web"

            [store]
            backend = "memory"

            [soap]
            path = "enroll/"
            public_url = "https://intake.example.com/"
            "#,
        )?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.public_dir, "web");
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.soap.path, "/enroll");
        assert_eq!(cfg.soap_endpoint_url(), "https://intake.example.com/enroll");
        assert_eq!(cfg.database.max_connections, 10);
        Ok(())
    }

    #[test]
    fn database_backend_requires_supported_url() {
        let mut db = DatabaseConfig { url: "mysql://localhost/x".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
        db.url = "postgres://localhost/enroll".into();
        assert!(db.validate().is_ok());
        db.min_connections = 0;
        assert!(db.validate().is_err());
    }

    #[test]
    fn store_backend_parse() {
        assert_eq!(StoreBackend::parse("Memory").ok(), Some(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse(" db ").ok(), Some(StoreBackend::Database));
        assert!(StoreBackend::parse("mongo").is_err());
    }

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn server_section_with_only_port_keeps_default_host() -> Result<()> {
        let cfg = parse("[server]\nport = 6060\n")?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 6060);
        assert_eq!(cfg.server.public_dir, "public");
        Ok(())
    }

    #[test]
    fn absent_config_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("missing.toml");
        let path = missing.to_string_lossy().into_owned();
        let cfg = AppConfig::load_with(vars(&[("CONFIG_PATH", path.as_str()), ("STORE_BACKEND", "memory")]))?;
        assert_eq!(cfg.server.port, 5050);
        assert_eq!(cfg.soap.path, "/wsdl");
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        Ok(())
    }

    #[test]
    fn env_overrides_win_over_file_values() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        std::io::Write::write_all(
            &mut file,
            b"[server]\nhost = \"10.0.0.1\"\nport = 8080\npublic_dir = \"web\"\n\n[store]\nbackend = \"database\"\n\n[logging]\nformat = \"compact\"\n",
        )?;
        let path = file.path().to_string_lossy().into_owned();
        let cfg = AppConfig::load_with(vars(&[
            ("CONFIG_PATH", path.as_str()),
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "9090"),
            ("TOKIO_WORKER_THREADS", "2"),
            ("PUBLIC_DIR", "static"),
            ("STORE_BACKEND", "memory"),
            ("LOG_FORMAT", "json"),
        ]))?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.server.public_dir, "static");
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.logging.format, "json");
        Ok(())
    }

    #[test]
    fn malformed_env_values_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("none.toml").to_string_lossy().into_owned();
        let bad = [
            ("SERVER_PORT", "fifty"),
            ("SERVER_PORT", "70000"),
            ("TOKIO_WORKER_THREADS", "many"),
            ("STORE_BACKEND", "mongo"),
        ];
        for (key, value) in bad {
            let res = AppConfig::load_with(vars(&[("CONFIG_PATH", path.as_str()), (key, value)]));
            assert!(res.is_err(), "{key}={value} should be rejected");
        }
    }

    #[test]
    fn zero_port_rejected() {
        let mut cfg = AppConfig::default();
        cfg.store.backend = StoreBackend::Memory;
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}
