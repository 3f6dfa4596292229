// Application layer - Panel pipelines and the traits they depend on
pub mod chart_renderer;
pub mod dashboard_service;
pub mod fetcher;
pub mod panel_presenter;
pub mod transformer;
