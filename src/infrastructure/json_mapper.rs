// Mapper to convert domain models to JSON wire types
use crate::domain::chart::ChartSpec;
use crate::domain::dashboard::Dashboard;
use crate::domain::panel::{ChartView, PanelSnapshot};
use crate::infrastructure::chart_registry::RenderedChart;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub title: String,
    pub panels: Vec<PanelDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDto {
    pub id: String,
    pub title: String,
    pub status: &'static str,
    pub message: String,
    pub is_error: bool,
    pub loading: bool,
    pub chart: Option<ChartDto>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDto {
    pub handle: u64,
    #[serde(flatten)]
    pub spec: ChartSpec,
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
    pub formatted_values: Vec<Option<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveChartDto {
    pub handle: u64,
    pub surface: String,
    pub title: String,
    pub points: usize,
    pub created_at: DateTime<Utc>,
}

pub fn dashboard_to_dto(dashboard: Dashboard) -> DashboardDto {
    DashboardDto {
        title: dashboard.title,
        panels: dashboard.panels.into_iter().map(panel_to_dto).collect(),
    }
}

pub fn panel_to_dto(panel: PanelSnapshot) -> PanelDto {
    PanelDto {
        id: panel.id,
        title: panel.title,
        status: panel.status.as_str(),
        message: panel.message,
        is_error: panel.is_error,
        loading: panel.loading,
        chart: panel.chart.map(chart_to_dto),
        updated_at: panel.updated_at,
    }
}

fn chart_to_dto(chart: ChartView) -> ChartDto {
    let formatted_values = chart
        .data
        .values()
        .iter()
        .map(|value| value.map(|v| chart.spec.value_format.format(v)))
        .collect();

    ChartDto {
        handle: chart.handle_id,
        labels: chart.data.labels().to_vec(),
        values: chart.data.values().to_vec(),
        formatted_values,
        spec: chart.spec,
    }
}

pub fn live_chart_to_dto(chart: RenderedChart) -> LiveChartDto {
    LiveChartDto {
        handle: chart.id,
        surface: chart.surface,
        title: chart.spec.title,
        points: chart.data.len(),
        created_at: chart.created_at,
    }
}
