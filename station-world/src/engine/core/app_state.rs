use bevy::prelude::*;

use crate::interaction::ui::spawn_error_screen;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    /// Initialisation failed; only the error screen is shown.
    Failed,
}

/// Why the world could not start.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct InitFailure(pub String);

pub fn enter_failed_state(
    mut commands: Commands,
    failure: Option<Res<InitFailure>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let message = failure
        .map(|f| f.0.clone())
        .unwrap_or_else(|| "Unknown initialisation error".to_string());
    error!("→ Initialisation failed: {}", message);

    spawn_error_screen(&mut commands, &message);
    rpc_interface.send_notification("init_failed", serde_json::json!({ "message": message }));
}
