// Domain layer - Panel, chart and record models
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod panel;
pub mod records;
