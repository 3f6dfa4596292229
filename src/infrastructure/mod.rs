// Infrastructure layer - External dependencies and adapters
pub mod chart_registry;
pub mod chunked_json;
pub mod config;
pub mod http_fetcher;
pub mod http_response;
pub mod json_mapper;
