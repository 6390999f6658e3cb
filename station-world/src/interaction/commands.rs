use bevy::prelude::*;

use super::events::{OverlayAction, OverlayCommand, StationEvent, publish_progress};
use super::experience::NavigationRequest;
use super::manager::InteractionManager;
use super::progress::ProgressStore;
use crate::engine::camera::viewport_camera::CameraControls;

/// Apply overlay commands from buttons, keys and the host page to the manager.
pub fn apply_overlay_commands(
    mut overlay_commands: EventReader<OverlayCommand>,
    mut manager: ResMut<InteractionManager>,
    mut progress: ResMut<ProgressStore>,
    mut controls: ResMut<CameraControls>,
    mut station_events: EventWriter<StationEvent>,
    mut navigation: EventWriter<NavigationRequest>,
) {
    for command in overlay_commands.read() {
        debug!("Overlay {:?} via {:?}", command.action, command.source);
        let was_open = manager.is_open();

        match command.action {
            OverlayAction::Advance => {
                manager.advance_dialogue();
            }
            OverlayAction::Select(option) => {
                manager.select_answer(option);
            }
            OverlayAction::Acknowledge => {
                if let Some(update) = manager.acknowledge_dialogue(&mut progress, &mut controls) {
                    publish_progress(update, &mut station_events);
                }
            }
            OverlayAction::Activate => {
                if let Some(activation) = manager.activate_experience(&mut progress, &mut controls)
                {
                    publish_progress(activation.progress, &mut station_events);
                    navigation.write(activation.navigation);
                }
            }
            OverlayAction::Close => {
                manager.close(&mut controls);
            }
            OverlayAction::DismissWelcome => {
                manager.dismiss_welcome(&mut progress, &mut controls);
            }
        }

        if was_open && !manager.is_open() {
            station_events.write(StationEvent::OverlayClosed);
        }
    }
}

/// Run the answer feedback timer of an open dialogue.
pub fn tick_answer_feedback(time: Res<Time>, mut manager: ResMut<InteractionManager>) {
    let pending = manager
        .dialogue()
        .is_some_and(|session| session.feedback().is_some());
    // Only a resolved mark changes what is on screen.
    if pending && manager.bypass_change_detection().tick(time.delta()).is_some() {
        manager.set_changed();
    }
}
