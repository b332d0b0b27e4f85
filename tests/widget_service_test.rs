// Dashboard widget layout persistence

mod common;

use common::memory_state;
use field_weather_service::db::widget_layout_repository::WIDGET_LAYOUT_KEY;
use field_weather_service::db::{default_widget_layout, WidgetType};

fn ids(layout: &[field_weather_service::db::WidgetConfig]) -> Vec<&str> {
    layout.iter().map(|w| w.id.as_str()).collect()
}

#[tokio::test]
async fn test_default_layout_when_nothing_stored() {
    let (state, _store) = memory_state();
    let layout = state.widget_service.get_layout().await;

    assert_eq!(layout, default_widget_layout());
    assert_eq!(layout.len(), WidgetType::ALL.len());
    assert!(layout.iter().all(|w| w.enabled));
}

#[tokio::test]
async fn test_disable_widget_persists() {
    let (state, _store) = memory_state();
    let service = state.widget_service;

    let layout = service
        .set_widget_enabled("hourly_forecast", false)
        .await
        .unwrap()
        .expect("widget exists");
    assert!(!layout.iter().find(|w| w.id == "hourly_forecast").unwrap().enabled);

    let reloaded = service.get_layout().await;
    assert_eq!(reloaded, layout);
}

#[tokio::test]
async fn test_unknown_widget_is_none() {
    let (state, store) = memory_state();
    let service = state.widget_service;

    assert!(service.set_widget_enabled("radar", true).await.unwrap().is_none());
    assert!(service.move_widget("radar", 0).await.unwrap().is_none());
    assert_eq!(store.get_raw(WIDGET_LAYOUT_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_move_widget_renumbers() {
    let (state, _store) = memory_state();
    let service = state.widget_service;

    let layout = service.move_widget("crop_advice", 0).await.unwrap().unwrap();
    assert_eq!(ids(&layout)[0], "crop_advice");
    assert_eq!(ids(&layout)[1], "current_conditions");
    let positions: Vec<usize> = layout.iter().map(|w| w.position).collect();
    assert_eq!(positions, (0..layout.len()).collect::<Vec<_>>());

    // Past the end clamps to the last slot
    let layout = service.move_widget("crop_advice", 99).await.unwrap().unwrap();
    assert_eq!(*ids(&layout).last().unwrap(), "crop_advice");
}

#[tokio::test]
async fn test_reset_restores_default() {
    let (state, store) = memory_state();
    let service = state.widget_service;

    service.move_widget("elevation_zone", 0).await.unwrap();
    let layout = service.reset_layout().await.unwrap();

    assert_eq!(layout, default_widget_layout());
    assert_eq!(store.get_raw(WIDGET_LAYOUT_KEY).await.unwrap(), None);
    assert_eq!(service.get_layout().await, default_widget_layout());
}

#[tokio::test]
async fn test_corrupt_layout_reads_as_default() {
    let (state, store) = memory_state();
    store
        .set_raw(WIDGET_LAYOUT_KEY, "{\"not\": \"a list\"}".to_string())
        .await
        .unwrap();

    assert_eq!(state.widget_service.get_layout().await, default_widget_layout());
}
