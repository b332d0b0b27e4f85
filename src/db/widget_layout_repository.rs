use tracing::{debug, error, instrument};

use crate::db::{default_widget_layout, DbError, KeyValueStore, WidgetConfig};

pub const WIDGET_LAYOUT_KEY: &str = "widget_layout";

#[derive(Clone)]
pub struct WidgetLayoutRepository {
    store: KeyValueStore,
}

impl WidgetLayoutRepository {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Stored layout, or the default layout when none is stored or it
    /// cannot be read.
    #[instrument(skip(self))]
    pub async fn get_layout(&self) -> Vec<WidgetConfig> {
        match self.store.get_json::<Vec<WidgetConfig>>(WIDGET_LAYOUT_KEY).await {
            Ok(Some(layout)) => layout,
            Ok(None) => {
                debug!("No widget layout stored, using default");
                default_widget_layout()
            }
            Err(e) => {
                error!("Failed to read widget layout, using default: {}", e);
                default_widget_layout()
            }
        }
    }

    #[instrument(skip(self, layout), fields(count = layout.len()))]
    pub async fn save_layout(&self, layout: &[WidgetConfig]) -> Result<(), DbError> {
        self.store.set_json(WIDGET_LAYOUT_KEY, &layout).await
    }

    pub async fn clear_layout(&self) -> Result<(), DbError> {
        self.store.remove(WIDGET_LAYOUT_KEY).await
    }
}
