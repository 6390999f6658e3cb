use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::station_catalog::StationCatalog;
use crate::engine::camera::viewport_camera::{CameraControls, camera_controller};
use crate::engine::core::app_state::{AppState, enter_failed_state};
use crate::engine::core::config::WorldConfig;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::catalog_loader::{
    CatalogLoader, check_catalog_loading, start_loading, update_loading_frontend,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::animation::animate_world;
use crate::engine::scene::world::spawn_world;
use crate::interaction::InteractionPlugin;
use crate::interaction::manager::InteractionManager;
use crate::interaction::progress::ProgressStore;
use crate::interaction::storage::platform_store;
use crate::interaction::zones::ZoneRegistry;
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers StationCatalog as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<StationCatalog>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(InteractionPlugin);

    // Read after LogPlugin so configuration warnings are visible.
    let config = WorldConfig::from_environment();
    insert_world_resources(&mut app, &config);

    app.add_systems(Startup, (spawn_world, start_loading))
        .add_systems(
            Update,
            (check_catalog_loading, update_loading_frontend)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Failed), enter_failed_state)
        .add_systems(
            Update,
            (camera_controller, animate_world).run_if(in_state(AppState::Running)),
        );

    app
}

/// Everything derived from the start-up configuration, available before the first frame.
fn insert_world_resources(app: &mut App, config: &WorldConfig) {
    let theme = config.theme;
    let height = theme.height_field();
    let positions = theme.station_positions(&height);

    let progress = ProgressStore::new(platform_store(config.progress_file.as_deref()));
    let mut manager = InteractionManager::new(ZoneRegistry::from_positions(&positions));
    manager.seed_completed(&progress);

    info!(
        "World '{}' with {} stations, {} already visited",
        theme.as_str(),
        manager.registry().zones().len(),
        progress.snapshot().visited
    );

    app.insert_resource(config.clone())
        .insert_resource(theme)
        .insert_resource(height)
        .insert_resource(positions)
        .insert_resource(progress)
        .insert_resource(manager)
        .init_resource::<CameraControls>()
        .init_resource::<LoadingProgress>()
        .init_resource::<CatalogLoader>();
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: "wgpu=error,naga=warn,bevy_render=warn,station_world=debug".to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
