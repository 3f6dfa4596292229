use crate::application::panel_presenter::StalePolicy;
use crate::domain::panel::{Endpoint, PanelDefinition};
use serde::Deserialize;

pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_MARKET_URL: &str = "https://api.coingecko.com/api/v3/coins/markets";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub posts: PostsSettings,
    pub market: MarketSettings,
    pub refresh: RefreshSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostsSettings {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketSettings {
    pub url: String,
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    pub discard_stale: bool,
}

impl MarketSettings {
    /// Markets URL with the fixed query parameters applied.
    pub fn endpoint_url(&self) -> String {
        let params = [
            ("vs_currency", self.vs_currency.clone()),
            ("order", self.order.clone()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
            ("sparkline", self.sparkline.to_string()),
        ];

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.url.trim_end_matches('?'), query)
    }
}

impl RefreshSettings {
    pub fn stale_policy(&self) -> StalePolicy {
        if self.discard_stale {
            StalePolicy::Discard
        } else {
            StalePolicy::Apply
        }
    }
}

impl DashboardConfig {
    pub fn panel_definitions(&self) -> Vec<PanelDefinition> {
        vec![
            PanelDefinition::posts(Endpoint::new(self.posts.url.clone())),
            PanelDefinition::market(Endpoint::new(self.market.endpoint_url())),
        ]
    }
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("posts.url", DEFAULT_POSTS_URL)?
        .set_default("market.url", DEFAULT_MARKET_URL)?
        .set_default("market.vs_currency", "usd")?
        .set_default("market.order", "market_cap_desc")?
        .set_default("market.per_page", 10)?
        .set_default("market.page", 1)?
        .set_default("market.sparkline", false)?
        .set_default("refresh.discard_stale", true)
}

/// Defaults, then `config/dashboard.{toml,yaml,json}` if present, then
/// `DASHBOARD__SECTION__KEY` environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
