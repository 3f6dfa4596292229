// Dashboard service - Runs every panel's fetch, transform and present sequence
use crate::application::chart_renderer::ChartRenderer;
use crate::application::fetcher::Fetcher;
use crate::application::panel_presenter::{LoadTicket, Panel, StalePolicy};
use crate::application::transformer::transform;
use crate::domain::dashboard::Dashboard;
use crate::domain::panel::{PanelDefinition, PanelSnapshot};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const DASHBOARD_TITLE: &str = "Public API Dashboard";
const UPDATE_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct DashboardService {
    fetcher: Arc<dyn Fetcher>,
    panels: Arc<Vec<Arc<Panel>>>,
    updates: broadcast::Sender<PanelSnapshot>,
}

impl DashboardService {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        renderer: Arc<dyn ChartRenderer>,
        definitions: Vec<PanelDefinition>,
        stale_policy: StalePolicy,
    ) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

        let panels = definitions
            .into_iter()
            .map(|definition| {
                Arc::new(Panel::new(
                    definition,
                    renderer.clone(),
                    stale_policy,
                    updates.clone(),
                ))
            })
            .collect();

        Self {
            fetcher,
            panels: Arc::new(panels),
            updates,
        }
    }

    /// Start a load for every panel. Each runs as its own task; nothing
    /// orders them against each other.
    pub fn load_all(&self) -> Vec<JoinHandle<()>> {
        tracing::info!("Loading {} panels", self.panels.len());

        self.panels
            .iter()
            .map(|panel| {
                // Taken before spawning so generations follow request order
                let ticket = panel.begin_load();
                let service = self.clone();
                let panel = panel.clone();
                tokio::spawn(async move { service.run_load(&panel, ticket).await })
            })
            .collect()
    }

    /// Run one panel's full sequence inline.
    #[cfg(test)]
    pub async fn load_panel(&self, panel: &Panel) {
        let ticket = panel.begin_load();
        self.run_load(panel, ticket).await;
    }

    async fn run_load(&self, panel: &Panel, ticket: LoadTicket) {
        let endpoint = &panel.definition().endpoint;
        tracing::debug!(panel = %panel.id(), kind = %panel.kind(), url = %endpoint.url, "Fetching");

        let outcome = match self.fetcher.fetch_json(endpoint).await {
            Ok(payload) => transform(panel.kind(), payload),
            Err(e) => Err(e),
        };

        panel.present(ticket, outcome);
    }

    pub fn panels(&self) -> &[Arc<Panel>] {
        &self.panels
    }

    pub fn panel(&self, id: &str) -> Option<PanelSnapshot> {
        self.panels()
            .iter()
            .find(|panel| panel.id() == id)
            .map(|panel| panel.snapshot())
    }

    pub fn dashboard(&self) -> Dashboard {
        let snapshots = self.panels().iter().map(|panel| panel.snapshot()).collect();
        Dashboard::new(DASHBOARD_TITLE.to_string(), snapshots)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelSnapshot> {
        self.updates.subscribe()
    }
}
