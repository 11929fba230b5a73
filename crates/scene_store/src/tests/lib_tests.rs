use super::*;

fn chair(x: f64) -> FurnitureItem {
    FurnitureItem::new("chair", Vec3::new(x, 0.0, 0.0), 0.0, "#8B4513")
}

#[tokio::test]
async fn new_store_holds_the_default_scene() {
    let store = SceneStore::new();
    let snapshot = store.snapshot().await;

    assert_eq!(snapshot.version, 0);
    assert_eq!(snapshot.configuration, SceneConfiguration::default());
    assert_eq!(snapshot.view_mode, ViewMode::Orbit);
    assert_eq!(snapshot.camera_position, DEFAULT_CAMERA_POSITION);
}

#[tokio::test]
async fn every_applied_change_bumps_version_and_broadcasts() {
    let store = SceneStore::new();
    let mut events = store.subscribe();

    let handle = store.add_furniture(chair(0.0)).await;
    store.set_ambient_light(0.7).await;
    store
        .update_furniture_color(handle.index, "#000000")
        .await
        .expect("color");

    assert_eq!(
        events.recv().await.expect("event"),
        SceneEvent::FurnitureAdded {
            version: 1,
            index: 0
        }
    );
    assert_eq!(
        events.recv().await.expect("event"),
        SceneEvent::LightingChanged { version: 2 }
    );
    assert_eq!(
        events.recv().await.expect("event"),
        SceneEvent::FurnitureUpdated {
            version: 3,
            index: 0
        }
    );
    assert_eq!(store.version().await, 3);
}

#[tokio::test]
async fn rejected_operations_do_not_bump_version() {
    let store = SceneStore::new();
    let mut events = store.subscribe();

    assert!(store.remove_furniture(0).await.is_err());
    assert!(store.set_room_dimensions(-1.0, 3.0, 3.0).await.is_err());
    assert!(store.remove_light(2).await.is_err());

    assert_eq!(store.version().await, 0);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn fixed_furniture_survives_remove_requests() {
    let store = SceneStore::new();
    store
        .add_furniture(FurnitureItem {
            is_fixed: true,
            ..FurnitureItem::new("column", Vec3::ORIGIN, 0.0, "#FFFFFF")
        })
        .await;

    assert_eq!(
        store.remove_furniture(0).await,
        Err(StoreError::FixedItem { index: 0 })
    );
    assert_eq!(store.configuration().await.furniture.len(), 1);
}

#[tokio::test]
async fn resize_reports_furniture_left_outside() {
    let store = SceneStore::new();
    store.add_furniture(chair(0.5)).await;
    store.add_furniture(chair(2.9)).await;

    let outside = store.set_room_dimensions(4.0, 2.7, 4.0).await.expect("resize");

    assert_eq!(outside, [1]);
    assert_eq!(store.furniture_outside_room().await, [1]);
    assert_eq!(
        store.configuration().await.dimensions,
        Dimensions::new(4.0, 2.7, 4.0)
    );
}

#[tokio::test]
async fn select_material_falls_back_for_unknown_names() {
    let store = SceneStore::new();

    let applied = store.select_material(Surface::Floor, "marble").await;
    assert_eq!(applied.name, "marble");

    let fallback = store.select_material(Surface::Wall, "unobtainium").await;
    assert_eq!(fallback.name, "wood");
    assert_eq!(store.configuration().await.wall_material.name, "wood");
}

#[tokio::test]
async fn ids_follow_items_across_index_shifts() {
    let store = SceneStore::new();
    let first = store.add_furniture(chair(0.0)).await;
    let second = store.add_furniture(chair(1.0)).await;

    store.remove_furniture(first.index).await.expect("remove");

    assert_eq!(store.furniture_index(second.id).await, Some(0));
    assert_eq!(store.furniture_index(first.id).await, None);
    assert_eq!(store.furniture_id(0).await, Some(second.id));
}

#[tokio::test]
async fn view_state_is_part_of_the_snapshot() {
    let store = SceneStore::new();
    store.set_view_mode(ViewMode::FirstPerson).await;
    store.set_camera_position(Vec3::new(1.0, 1.65, 2.0)).await;

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.view_mode, ViewMode::FirstPerson);
    assert_eq!(snapshot.camera_position, Vec3::new(1.0, 1.65, 2.0));

    // Reset covers the scene, not the viewer.
    store.reset().await;
    assert_eq!(store.snapshot().await.view_mode, ViewMode::FirstPerson);
}

#[tokio::test]
async fn serialized_operations_drive_the_store() {
    let store = SceneStore::new();
    let operations: Vec<SceneOperation> = serde_json::from_value(serde_json::json!([
        { "type": "add_furniture", "payload": { "item": {
            "type": "sofa",
            "position": { "x": 0.0, "y": 0.25, "z": 2.0 },
            "rotation": 180.0,
            "color": "#8B4513"
        } } },
        { "type": "copy_furniture", "payload": { "index": 0 } },
        { "type": "set_background_color", "payload": { "color": "#FFA07A" } },
        { "type": "remove_door", "payload": { "index": 0 } }
    ]))
    .expect("operations");

    for operation in operations {
        store.apply(operation).await.expect("apply");
    }

    let config = store.configuration().await;
    assert_eq!(config.furniture.len(), 2);
    assert_eq!(config.furniture[1].position, Vec3::ORIGIN);
    assert_eq!(config.background_color, "#FFA07A");
    assert!(config.doors.is_empty());
    assert_eq!(store.version().await, 4);

    let err = store
        .apply(SceneOperation::RemoveFurniture { index: 9 })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 9, .. }));
}

#[tokio::test]
async fn concurrent_edits_are_serialized() {
    let store = SceneStore::new();
    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.add_furniture(chair(i as f64 * 0.1)).await })
        })
        .collect();

    let mut indices = Vec::new();
    for task in tasks {
        indices.push(task.await.expect("task").index);
    }
    indices.sort_unstable();

    assert_eq!(indices, (0..16).collect::<Vec<_>>());
    assert_eq!(store.version().await, 16);
}
