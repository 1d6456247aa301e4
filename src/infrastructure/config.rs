use crate::application::dashboard_controller::ControllerSettings;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub refresh: RefreshSettings,
    pub toast: ToastSettings,
    pub search: SearchSettings,
    pub preview: PreviewSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ToastSettings {
    pub ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchSettings {
    pub min_chars: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreviewSettings {
    pub listen_addr: String,
}

impl DashboardConfig {
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            refresh_interval: Duration::from_secs(self.refresh.interval_secs),
            toast_ttl: Duration::from_secs(self.toast.ttl_secs),
            search_min_chars: self.search.min_chars,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.refresh.interval_secs > 0,
            "refresh.interval_secs must be greater than zero"
        );
        Ok(())
    }
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("api.base_url", "http://127.0.0.1:5000")?
        .set_default("refresh.interval_secs", 300)?
        .set_default("toast.ttl_secs", 5)?
        .set_default("search.min_chars", 2)?
        .set_default("preview.listen_addr", "0.0.0.0:8080")?)
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__*` variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
