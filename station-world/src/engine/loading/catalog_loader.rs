use bevy::asset::LoadState;
use bevy::prelude::*;

use super::progress::LoadingProgress;
use crate::engine::assets::station_catalog::{CatalogError, StationCatalog};
use crate::engine::core::app_state::{AppState, InitFailure};
use crate::rpc::web_rpc::WebRpcInterface;

pub const CATALOG_PATH: &str = "stations/catalog.json";

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<StationCatalog>>,
}

/// Where catalog loading stands after one poll.
#[derive(Debug)]
pub enum CatalogStatus {
    Pending,
    Ready(StationCatalog),
    Failed(CatalogError),
}

/// Decide the catalog's status from the asset server's view of it.
pub fn resolve_catalog(state: Option<&LoadState>, catalog: Option<&StationCatalog>) -> CatalogStatus {
    match state {
        Some(LoadState::Failed(err)) => CatalogStatus::Failed(CatalogError::LoadFailed(err.to_string())),
        Some(LoadState::Loaded) => match catalog {
            Some(catalog) => match catalog.validate() {
                Ok(()) => CatalogStatus::Ready(catalog.clone()),
                Err(e) => CatalogStatus::Failed(e),
            },
            None => CatalogStatus::Pending,
        },
        _ => CatalogStatus::Pending,
    }
}

pub fn start_loading(
    mut catalog_loader: ResMut<CatalogLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
) {
    info!("Loading station catalog from {}", CATALOG_PATH);
    catalog_loader.handle = Some(asset_server.load(CATALOG_PATH));
    loading_progress.catalog_requested = true;
}

/// Move to running once the catalog is loaded and valid, or to failed if it never will be.
pub fn check_catalog_loading(
    mut commands: Commands,
    catalog_loader: Res<CatalogLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    catalogs: Res<Assets<StationCatalog>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = &catalog_loader.handle else {
        return;
    };

    let state = asset_server.get_load_state(handle);
    if matches!(state, Some(LoadState::Loaded)) {
        loading_progress.catalog_loaded = true;
    }

    match resolve_catalog(state.as_ref(), catalogs.get(handle)) {
        CatalogStatus::Pending => {}
        CatalogStatus::Ready(catalog) => {
            info!(
                "✓ Station catalog ready: {} elders, {} fires",
                catalog.elders.len(),
                catalog.fires.len()
            );
            loading_progress.catalog_validated = true;
            commands.insert_resource(catalog);
            next_state.set(AppState::Running);
        }
        CatalogStatus::Failed(e) => {
            error!("Station catalog unusable: {}", e);
            commands.insert_resource(InitFailure(e.to_string()));
            next_state.set(AppState::Failed);
        }
    }
}

/// Report each loading stage to the host page once.
pub fn update_loading_frontend(
    mut loading_progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let stage = loading_progress.stage();
    if loading_progress.reported_stage == Some(stage) {
        return;
    }
    rpc_interface.send_notification("loading_progress", serde_json::json!({ "stage": stage }));
    loading_progress.reported_stage = Some(stage);
}
