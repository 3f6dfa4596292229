// Dashboard domain model
use super::panel::PanelSnapshot;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub panels: Vec<PanelSnapshot>,
}

impl Dashboard {
    pub fn new(title: String, panels: Vec<PanelSnapshot>) -> Self {
        Self { title, panels }
    }
}
