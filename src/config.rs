use serde::Deserialize;

/// Which concurrency driver services accepted connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// One asynchronous task per connection.
    Event,
    /// A fixed set of worker tasks pulling connections from a queue.
    Pool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub backlog: u32,
    pub pages_dir: String,
    pub driver: DriverKind,
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            backlog: 100,
            pages_dir: "pages".to_string(),
            driver: DriverKind::Event,
            workers: 4,
        }
    }
}

impl Config {
    /// Loads configuration from the YAML file named by `STATICD_CONFIG`
    /// (default `staticd.yaml`), falling back to defaults when the file is
    /// absent or unreadable. The `LISTEN` environment variable overrides the
    /// listen address either way.
    pub fn load() -> Self {
        let path = std::env::var("STATICD_CONFIG")
            .unwrap_or_else(|_| "staticd.yaml".to_string());

        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(text) => match Self::from_yaml(&text) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Invalid config file {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }

        cfg
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
