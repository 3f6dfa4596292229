// Charting collaborator seen from the panels
use crate::domain::chart::{ChartData, ChartHandle, ChartSpec};

pub trait ChartRenderer: Send + Sync {
    /// Draw a chart on `surface` and hand back the handle that owns it.
    fn create(&self, surface: &str, spec: &ChartSpec, data: &ChartData) -> ChartHandle;

    /// Release a chart created by `create`.
    fn destroy(&self, handle: ChartHandle);
}
