use bevy::prelude::*;

use super::experience::NavigationRequest;
use crate::rpc::web_rpc::WebRpcInterface;

/// Leave the world for a station's activity page.
///
/// In the browser the page navigates away; natively there is nowhere to go,
/// so the destination is only logged. The host page is told either way.
pub fn perform_navigation(
    mut requests: EventReader<NavigationRequest>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for request in requests.read() {
        rpc_interface.send_notification(
            "navigate",
            serde_json::json!({ "destination": request.destination }),
        );
        navigate_to(&request.destination);
    }
}

#[cfg(target_arch = "wasm32")]
fn navigate_to(destination: &str) {
    let Some(window) = web_sys::window() else {
        error!("Window object not available, cannot navigate to {}", destination);
        return;
    };
    if let Err(e) = window.location().set_href(destination) {
        error!("Navigation to {} failed: {:?}", destination, e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn navigate_to(destination: &str) {
    info!("Navigation requested: {}", destination);
}
