// Panel domain models
use super::chart::{ChartData, ChartKind, ChartSpec, ValueFormat};
use chrono::{DateTime, Utc};
use std::fmt;

/// Which dataset a panel shows; selects the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Posts,
    Market,
}

impl PanelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelKind::Posts => "posts",
            PanelKind::Market => "market",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
}

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Static description of one panel: where it loads from and how it looks.
#[derive(Debug, Clone)]
pub struct PanelDefinition {
    pub id: String,
    pub kind: PanelKind,
    pub endpoint: Endpoint,
    pub surface: String,
    pub default_title: String,
    pub empty_message: String,
    pub chart: ChartSpec,
}

impl PanelDefinition {
    pub fn posts(endpoint: Endpoint) -> Self {
        Self {
            id: PanelKind::Posts.as_str().to_string(),
            kind: PanelKind::Posts,
            endpoint,
            surface: "posts-chart".to_string(),
            default_title: "JSONPlaceholder Posts".to_string(),
            empty_message: "No post data to display.".to_string(),
            chart: ChartSpec {
                kind: ChartKind::Bar,
                title: "Posts per User (JSONPlaceholder)".to_string(),
                dataset_label: "# of Posts".to_string(),
                x_axis_title: "User ID".to_string(),
                y_axis_title: "Number of Posts".to_string(),
                begin_at_zero: true,
                background_color: "rgba(54, 162, 235, 0.7)".to_string(),
                border_color: "rgba(54, 162, 235, 1)".to_string(),
                value_format: ValueFormat::Count,
            },
        }
    }

    pub fn market(endpoint: Endpoint) -> Self {
        Self {
            id: PanelKind::Market.as_str().to_string(),
            kind: PanelKind::Market,
            endpoint,
            surface: "market-chart".to_string(),
            default_title: "CoinGecko Crypto Prices".to_string(),
            empty_message: "No crypto data to display.".to_string(),
            chart: ChartSpec {
                kind: ChartKind::Bar,
                title: "Top 10 Crypto Prices (CoinGecko)".to_string(),
                dataset_label: "Price (USD)".to_string(),
                x_axis_title: "Cryptocurrency".to_string(),
                y_axis_title: "Price in USD".to_string(),
                // Prices are far from zero
                begin_at_zero: false,
                background_color: "rgba(75, 192, 192, 0.7)".to_string(),
                border_color: "rgba(75, 192, 192, 1)".to_string(),
                value_format: ValueFormat::Usd,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    Idle,
    Loading,
    Ready,
    Empty,
    Failed,
}

impl PanelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelStatus::Idle => "idle",
            PanelStatus::Loading => "loading",
            PanelStatus::Ready => "ready",
            PanelStatus::Empty => "empty",
            PanelStatus::Failed => "failed",
        }
    }
}

/// The chart a panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub handle_id: u64,
    pub spec: ChartSpec,
    pub data: ChartData,
}

/// Point-in-time copy of a panel's visible state.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSnapshot {
    pub id: String,
    pub title: String,
    pub status: PanelStatus,
    pub message: String,
    pub is_error: bool,
    pub loading: bool,
    pub chart: Option<ChartView>,
    pub updated_at: Option<DateTime<Utc>>,
}
