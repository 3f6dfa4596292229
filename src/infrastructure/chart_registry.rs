// In-process charting backend that keeps track of live chart instances
use crate::application::chart_renderer::ChartRenderer;
use crate::domain::chart::{ChartData, ChartHandle, ChartSpec};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub id: u64,
    pub surface: String,
    pub spec: ChartSpec,
    pub data: ChartData,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct ChartRegistry {
    next_id: AtomicU64,
    live: Mutex<BTreeMap<u64, RenderedChart>>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All live charts, oldest first.
    pub fn live_charts(&self) -> Vec<RenderedChart> {
        self.lock_live().values().cloned().collect()
    }

    pub fn live_count(&self) -> usize {
        self.lock_live().len()
    }

    #[cfg(test)]
    pub fn live_on(&self, surface: &str) -> usize {
        self.lock_live()
            .values()
            .filter(|chart| chart.surface == surface)
            .count()
    }

    fn lock_live(&self) -> MutexGuard<'_, BTreeMap<u64, RenderedChart>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChartRenderer for ChartRegistry {
    fn create(&self, surface: &str, spec: &ChartSpec, data: &ChartData) -> ChartHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let chart = RenderedChart {
            id,
            surface: surface.to_string(),
            spec: spec.clone(),
            data: data.clone(),
            created_at: Utc::now(),
        };
        self.lock_live().insert(id, chart);
        ChartHandle::new(id, surface.to_string())
    }

    fn destroy(&self, handle: ChartHandle) {
        if self.lock_live().remove(&handle.id()).is_none() {
            tracing::warn!(
                "Destroy requested for unknown chart {} on {}",
                handle.id(),
                handle.surface()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::panel::{Endpoint, PanelDefinition};

    #[test]
    fn test_create_and_destroy() {
        let registry = ChartRegistry::new();
        let spec = PanelDefinition::market(Endpoint::new("http://localhost")).chart;
        let data = ChartData::from_pairs(vec![("Bitcoin", 50000.0)]);

        let first = registry.create("market-chart", &spec, &data);
        let second = registry.create("posts-chart", &spec, &data);
        assert_ne!(first.id(), second.id());
        assert_eq!(registry.live_count(), 2);
        assert_eq!(registry.live_on("market-chart"), 1);

        registry.destroy(first);
        assert_eq!(registry.live_on("market-chart"), 0);

        let live = registry.live_charts();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].surface, "posts-chart");
        assert_eq!(live[0].data, data);
    }
}
