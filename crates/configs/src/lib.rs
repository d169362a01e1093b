use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub mail: MailConfig,
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
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(DEFAULT_WORKER_THREADS) }
    }
}

/// Addresses used by the deletion notice mailer.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mail_to")]
    pub mail_to: String,
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self { mail_to: default_mail_to(), mail_from: default_mail_from() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of the compact human format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_mail_to() -> String { "admin@mycompany.com".to_string() }
fn default_mail_from() -> String { "noreply@mycompany.com".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

pub fn from_toml_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if present, otherwise defaults overlaid with
    /// `SERVER_HOST` / `SERVER_PORT` / `TOKIO_WORKER_THREADS`.
    /// A file that exists but does not parse or validate is still an error.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        if std::path::Path::new(&path).exists() {
            return Self::load_and_validate();
        }
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        // 邮件地址允许由环境变量覆盖
        self.mail.normalize_from_env();
        self.mail.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = DEFAULT_HOST.to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MailConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(to) = std::env::var("MAIL_TO") {
            if !to.trim().is_empty() { self.mail_to = to; }
        }
        if let Ok(from) = std::env::var("MAIL_FROM") {
            if !from.trim().is_empty() { self.mail_from = from; }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mail_to.contains('@') {
            return Err(anyhow!("mail.mail_to is not an email address: {}", self.mail_to));
        }
        if !self.mail_from.contains('@') {
            return Err(anyhow!("mail.mail_from is not an email address: {}", self.mail_from));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() -> Result<()> {
        let cfg = from_toml_str("")?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.mail.mail_to, "admin@mycompany.com");
        assert!(!cfg.logging.json);
        Ok(())
    }

    #[test]
    fn parses_all_sections() -> Result<()> {
        let cfg = from_toml_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [mail]
            mail_to = "ops@example.com"
            mail_from = "bot@example.com"

            [logging]
            json = true
            "#,
        )?;
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.mail.mail_from, "bot@example.com");
        assert!(cfg.logging.json);
        Ok(())
    }

    #[test]
    fn normalize_fills_blank_host_and_zero_threads() -> Result<()> {
        let mut server = ServerConfig { host: "  ".into(), port: 81, worker_threads: Some(0) };
        server.normalize()?;
        assert_eq!(server.host, DEFAULT_HOST);
        assert_eq!(server.worker_threads, Some(4));
        Ok(())
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut server = ServerConfig { port: 0, ..ServerConfig::default() };
        assert!(server.normalize().is_err());
    }

    #[test]
    fn mail_addresses_must_look_like_emails() {
        let mail = MailConfig { mail_to: "nobody".into(), mail_from: "noreply@mycompany.com".into() };
        assert!(mail.validate().is_err());
        assert!(MailConfig::default().validate().is_ok());
    }
}
