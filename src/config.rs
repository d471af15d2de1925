// Environment-sourced configuration

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared secret expected in the `x-api-key` header on protected routes.
    pub api_key: String,
    pub prometheus_url: String,
    /// Instance label used in host-scoped memory queries (node exporter address).
    pub prom_instance: String,
    pub repo_root: String,
    pub deploy_script: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from a key lookup (e.g. a map in tests instead of process env).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a number between 1 and 65535, got {raw}"))?,
            None => 8000,
        };
        let config = AppConfig {
            api_key: get("API_KEY").unwrap_or_default(),
            prometheus_url: get("PROMETHEUS_URL")
                .unwrap_or_else(|| "http://prometheus:9090".into()),
            prom_instance: get("PROM_INSTANCE")
                .unwrap_or_else(|| "host.docker.internal:9100".into()),
            repo_root: get("REPO_ROOT").unwrap_or_else(|| "/repo".into()),
            deploy_script: get("DEPLOY_SCRIPT").unwrap_or_else(|| "/repo/scripts/deploy.sh".into()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        // Refuse to boot without a secret; an unset key must never mean "accept everyone".
        anyhow::ensure!(
            !self.api_key.is_empty(),
            "API_KEY environment variable is not set"
        );
        anyhow::ensure!(self.port > 0, "PORT must be between 1 and 65535, got 0");
        anyhow::ensure!(
            !self.prometheus_url.is_empty(),
            "PROMETHEUS_URL must be non-empty"
        );
        anyhow::ensure!(
            !self.deploy_script.is_empty(),
            "DEPLOY_SCRIPT must be non-empty"
        );
        Ok(())
    }
}
