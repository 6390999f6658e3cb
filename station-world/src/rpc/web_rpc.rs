use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::station_category::StationCategory;
use crate::engine::scene::layout::StationPositions;
use crate::interaction::events::{CommandSource, OverlayAction, OverlayCommand, StationEvent};
use crate::interaction::manager::{InteractionManager, Overlay};
use crate::interaction::progress::{ProgressStore, ProgressUpdate};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the embedding page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications waiting for the next send.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing the postMessage bridge for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_station_events,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) =
                window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available, host bridge is receive-disabled"),
    }

    // Ownership passes to JS so the listener outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw message received from the host page.
#[derive(Event)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// World state a request may read.
pub struct RpcContext<'a> {
    pub progress: &'a ProgressStore,
    pub positions: &'a StationPositions,
    pub overlay: Option<&'a Overlay>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    progress: Res<ProgressStore>,
    positions: Res<StationPositions>,
    manager: Res<InteractionManager>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut overlay_commands: EventWriter<OverlayCommand>,
) {
    let context = RpcContext {
        progress: &progress,
        positions: &positions,
        overlay: manager.overlay(),
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("RPC request: {}", request.method);
                let mut commands = Vec::new();
                if let Some(response) = handle_rpc_request(&request, &context, &mut commands) {
                    rpc_interface.queue_response(response);
                }
                overlay_commands.write_batch(commands);
            }
            Err(parse_error) => {
                warn!("Ignoring malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
///
/// Overlay changes are not applied here; they are pushed to `commands` and
/// go through the same path as button presses.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    commands: &mut Vec<OverlayCommand>,
) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "get_progress" => handle_get_progress(context.progress),
        "get_station_positions" => handle_get_station_positions(&request.params, context.positions),
        "close_overlay" => handle_close_overlay(context.overlay, commands),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_get_progress(progress: &ProgressStore) -> Result<serde_json::Value, RpcError> {
    let snapshot = progress.snapshot();
    Ok(serde_json::json!({
        "visited": progress.visited(),
        "count": snapshot.visited,
        "total": snapshot.total,
        "ratio": snapshot.ratio,
    }))
}

/// Station anchors, optionally filtered to one category.
fn handle_get_station_positions(
    params: &serde_json::Value,
    positions: &StationPositions,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize, Default)]
    struct PositionParams {
        category: Option<String>,
    }

    let filter = if params.is_null() {
        PositionParams::default()
    } else {
        serde_json::from_value::<PositionParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected optional 'category' string"))?
    };

    if let Some(category) = &filter.category {
        if StationCategory::from_string(category).is_none() {
            return Err(RpcError::invalid_params(&format!(
                "Unknown category: {}",
                category
            )));
        }
    }

    let stations: Vec<serde_json::Value> = positions
        .iter()
        .filter(|(category, _, _)| {
            filter
                .category
                .as_deref()
                .is_none_or(|wanted| category.as_str() == wanted)
        })
        .map(|(category, local_id, position)| {
            serde_json::json!({
                "category": category.as_str(),
                "local_id": local_id,
                "position": [position.x, position.y, position.z],
            })
        })
        .collect();

    Ok(serde_json::json!({ "stations": stations }))
}

/// Close whatever is open. The welcome modal counts as dismissed.
fn handle_close_overlay(
    overlay: Option<&Overlay>,
    commands: &mut Vec<OverlayCommand>,
) -> Result<serde_json::Value, RpcError> {
    let Some(overlay) = overlay else {
        return Ok(serde_json::json!({ "closed": false }));
    };

    let action = match overlay {
        Overlay::Welcome => OverlayAction::DismissWelcome,
        _ => OverlayAction::Close,
    };
    commands.push(OverlayCommand {
        action,
        source: CommandSource::Rpc,
    });

    Ok(serde_json::json!({ "closed": true, "kind": overlay.kind() }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

fn progress_params(update: &ProgressUpdate) -> serde_json::Value {
    serde_json::json!({
        "visited": update.visited,
        "total": update.total,
        "ratio": update.ratio,
    })
}

/// Mirror station events to the host page.
pub fn forward_station_events(
    mut events: EventReader<StationEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match event {
            StationEvent::OverlayOpened { kind, station } => rpc_interface.send_notification(
                "overlay_opened",
                serde_json::json!({
                    "kind": kind,
                    "category": station.map(|tag| tag.category.as_str()),
                    "local_id": station.map(|tag| tag.local_id),
                }),
            ),
            StationEvent::OverlayClosed => {
                rpc_interface.send_notification("overlay_closed", serde_json::json!({}))
            }
            StationEvent::ProgressChanged(update) => {
                rpc_interface.send_notification("progress_updated", progress_params(update))
            }
            StationEvent::JourneyCompleted => {
                rpc_interface.send_notification("journey_completed", serde_json::json!({}))
            }
        }
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Responses after notifications to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
#[path = "web_rpc_tests.rs"]
mod web_rpc_tests;
