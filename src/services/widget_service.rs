use tracing::{debug, info, instrument};

use crate::db::{default_widget_layout, DbError, WidgetConfig, WidgetLayoutRepository};

#[derive(Clone)]
pub struct WidgetService {
    repo: WidgetLayoutRepository,
}

impl WidgetService {
    pub fn new(repo: WidgetLayoutRepository) -> Self {
        Self { repo }
    }

    /// Layout ordered by position.
    pub async fn get_layout(&self) -> Vec<WidgetConfig> {
        normalize_positions(self.repo.get_layout().await)
    }

    #[instrument(skip(self, layout), fields(count = layout.len()))]
    pub async fn save_layout(&self, layout: Vec<WidgetConfig>) -> Result<Vec<WidgetConfig>, DbError> {
        let layout = normalize_positions(layout);
        self.repo.save_layout(&layout).await?;
        info!("Saved widget layout with {} widgets", layout.len());
        Ok(layout)
    }

    /// `Ok(None)` when no widget has this id.
    #[instrument(skip(self))]
    pub async fn set_widget_enabled(
        &self,
        id: &str,
        enabled: bool,
    ) -> Result<Option<Vec<WidgetConfig>>, DbError> {
        let mut layout = self.get_layout().await;

        let Some(widget) = layout.iter_mut().find(|w| w.id == id) else {
            debug!("Widget {} not found", id);
            return Ok(None);
        };
        widget.enabled = enabled;

        self.save_layout(layout).await.map(Some)
    }

    /// Move a widget; positions past the end clamp to the last slot.
    #[instrument(skip(self))]
    pub async fn move_widget(
        &self,
        id: &str,
        new_position: usize,
    ) -> Result<Option<Vec<WidgetConfig>>, DbError> {
        let mut layout = self.get_layout().await;

        let Some(current) = layout.iter().position(|w| w.id == id) else {
            debug!("Widget {} not found", id);
            return Ok(None);
        };

        let widget = layout.remove(current);
        let target = new_position.min(layout.len());
        layout.insert(target, widget);

        // Order in the vec is now authoritative
        for (position, widget) in layout.iter_mut().enumerate() {
            widget.position = position;
        }

        self.save_layout(layout).await.map(Some)
    }

    pub async fn reset_layout(&self) -> Result<Vec<WidgetConfig>, DbError> {
        self.repo.clear_layout().await?;
        info!("Widget layout reset to default");
        Ok(default_widget_layout())
    }
}

/// Stable sort by position, then renumber 0..n.
fn normalize_positions(mut layout: Vec<WidgetConfig>) -> Vec<WidgetConfig> {
    layout.sort_by_key(|w| w.position);
    for (position, widget) in layout.iter_mut().enumerate() {
        widget.position = position;
    }
    layout
}
