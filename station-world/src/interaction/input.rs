use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::events::{CommandSource, OverlayAction, OverlayCommand, StationEvent};
use super::manager::{InteractionManager, Overlay};
use super::ray::camera_world_from_clip;
use crate::engine::assets::station_catalog::StationCatalog;
use crate::engine::camera::viewport_camera::CameraControls;

/// Primary click: pick a station and open its overlay.
pub fn handle_station_clicks(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    catalog: Res<StationCatalog>,
    mut manager: ResMut<InteractionManager>,
    mut controls: ResMut<CameraControls>,
    mut station_events: EventWriter<StationEvent>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) || manager.is_open() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, transform)) = camera_query.single() else {
        return;
    };
    let Some(viewport) = camera.logical_viewport_rect() else {
        return;
    };

    let world_from_clip = camera_world_from_clip(camera, transform);
    match manager.handle_click(cursor, viewport, world_from_clip, &catalog, &mut controls) {
        Ok(Some(tag)) => {
            if let Some(overlay) = manager.overlay() {
                station_events.write(StationEvent::OverlayOpened {
                    kind: overlay.kind(),
                    station: Some(tag),
                });
            }
        }
        Ok(None) => {}
        Err(e) => error!("Station click failed: {}", e),
    }
}

/// Escape closes the open overlay; on the welcome modal it counts as dismissal.
pub fn handle_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    manager: Res<InteractionManager>,
    mut overlay_commands: EventWriter<OverlayCommand>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    let action = match manager.overlay() {
        None => return,
        Some(Overlay::Welcome) => OverlayAction::DismissWelcome,
        Some(_) => OverlayAction::Close,
    };
    overlay_commands.write(OverlayCommand {
        action,
        source: CommandSource::Keyboard,
    });
}

/// Turn overlay button presses into commands.
pub fn handle_overlay_buttons(
    buttons: Query<(&Interaction, &OverlayAction), Changed<Interaction>>,
    mut overlay_commands: EventWriter<OverlayCommand>,
) {
    for (interaction, action) in &buttons {
        if *interaction == Interaction::Pressed {
            overlay_commands.write(OverlayCommand {
                action: *action,
                source: CommandSource::Pointer,
            });
        }
    }
}
