use super::*;
use crate::engine::scene::heightmap::HeightField;
use crate::engine::scene::theme::WorldTheme;
use crate::interaction::storage::InMemoryStore;
use constants::storage_keys::VISITED;
use pretty_assertions::assert_eq;
use serde_json::json;

struct Fixture {
    progress: ProgressStore,
    positions: StationPositions,
}

impl Fixture {
    fn new() -> Self {
        let store = InMemoryStore::new().with_value(VISITED, r#"["fire-2","cabin-1"]"#);
        Self {
            progress: ProgressStore::new(Box::new(store)),
            positions: WorldTheme::Diorama.station_positions(&HeightField::flat()),
        }
    }

    fn call(
        &self,
        overlay: Option<&Overlay>,
        method: &str,
        params: serde_json::Value,
    ) -> (RpcResponse, Vec<OverlayCommand>) {
        let context = RpcContext {
            progress: &self.progress,
            positions: &self.positions,
            overlay,
        };
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(7)),
        };
        let mut commands = Vec::new();
        let response = handle_rpc_request(&request, &context, &mut commands).unwrap();
        (response, commands)
    }
}

#[test]
fn requests_without_id_get_no_response() {
    let fixture = Fixture::new();
    let context = RpcContext {
        progress: &fixture.progress,
        positions: &fixture.positions,
        overlay: None,
    };
    let request: RpcRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_progress"}"#).unwrap();

    assert!(handle_rpc_request(&request, &context, &mut Vec::new()).is_none());
}

#[test]
fn get_progress_reports_visited_keys() {
    let (response, commands) = Fixture::new().call(None, "get_progress", json!(null));

    let result = response.result.unwrap();
    assert_eq!(result["visited"], json!(["fire-2", "cabin-1"]));
    assert_eq!(result["count"], json!(2));
    assert_eq!(result["total"], json!(18));
    assert_eq!(response.id, Some(json!(7)));
    assert!(commands.is_empty());
}

#[test]
fn get_station_positions_lists_every_station() {
    let (response, _) = Fixture::new().call(None, "get_station_positions", json!(null));

    let stations = response.result.unwrap()["stations"].as_array().unwrap().clone();
    assert_eq!(stations.len(), 18);
    assert_eq!(stations[0]["category"], json!("cabin"));
    assert_eq!(stations[0]["local_id"], json!(0));
    assert_eq!(stations[0]["position"].as_array().unwrap().len(), 3);
    assert_eq!(stations[17]["category"], json!("memorial"));
}

#[test]
fn get_station_positions_filters_by_category() {
    let (response, _) =
        Fixture::new().call(None, "get_station_positions", json!({ "category": "fire" }));

    let stations = response.result.unwrap()["stations"].as_array().unwrap().clone();
    assert_eq!(stations.len(), 6);
    assert!(stations.iter().all(|s| s["category"] == json!("fire")));
}

#[test]
fn bad_params_are_rejected() {
    let fixture = Fixture::new();

    let (response, _) = fixture.call(None, "get_station_positions", json!({ "category": "moon" }));
    assert_eq!(response.error.unwrap().code, -32602);

    let (response, _) = fixture.call(None, "get_station_positions", json!({ "category": 3 }));
    assert_eq!(response.error.unwrap().code, -32602);
}

#[test]
fn unknown_method_is_not_found() {
    let (response, _) = Fixture::new().call(None, "get_fps", json!(null));

    let error = response.error.unwrap();
    assert_eq!(error.code, -32601);
    assert_eq!(error.data, Some(json!({ "method": "get_fps" })));
    assert!(response.result.is_none());
}

#[test]
fn close_overlay_with_nothing_open_is_a_no_op() {
    let (response, commands) = Fixture::new().call(None, "close_overlay", json!(null));

    assert_eq!(response.result, Some(json!({ "closed": false })));
    assert!(commands.is_empty());
}

#[test]
fn close_overlay_dismisses_the_welcome_modal() {
    let (response, commands) = Fixture::new().call(Some(&Overlay::Welcome), "close_overlay", json!(null));

    assert_eq!(response.result, Some(json!({ "closed": true, "kind": "welcome" })));
    assert_eq!(
        commands,
        vec![OverlayCommand {
            action: OverlayAction::DismissWelcome,
            source: CommandSource::Rpc,
        }]
    );
}

#[test]
fn station_events_become_notifications() {
    use crate::engine::assets::station_category::StationCategory;
    use crate::interaction::zones::ZoneTag;

    let mut app = App::new();
    app.init_resource::<WebRpcInterface>()
        .add_event::<StationEvent>()
        .add_systems(Update, forward_station_events);

    app.world_mut().send_event(StationEvent::OverlayOpened {
        kind: "experience",
        station: Some(ZoneTag::new(StationCategory::Fire, 3)),
    });
    app.world_mut()
        .send_event(StationEvent::ProgressChanged(ProgressUpdate {
            visited: 18,
            total: 18,
            ratio: 1.0,
            newly_visited: true,
            journey_completed: true,
        }));
    app.world_mut().send_event(StationEvent::JourneyCompleted);
    app.update();

    let interface = app.world().resource::<WebRpcInterface>();
    let sent: Vec<(&str, &serde_json::Value)> = interface
        .pending_notifications()
        .iter()
        .map(|n| (n.method.as_str(), &n.params))
        .collect();
    assert_eq!(
        sent,
        vec![
            (
                "overlay_opened",
                &json!({ "kind": "experience", "category": "fire", "local_id": 3 })
            ),
            (
                "progress_updated",
                &json!({ "visited": 18, "total": 18, "ratio": 1.0 })
            ),
            ("journey_completed", &json!({})),
        ]
    );
}
