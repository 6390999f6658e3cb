use bevy::prelude::*;

use super::events::StationEvent;
use super::manager::InteractionManager;
use super::progress::ProgressStore;
use crate::engine::camera::viewport_camera::CameraControls;

/// Open the welcome modal on entering the world, unless it was dismissed on an earlier visit.
pub fn show_welcome_on_first_visit(
    progress: Res<ProgressStore>,
    mut manager: ResMut<InteractionManager>,
    mut controls: ResMut<CameraControls>,
    mut station_events: EventWriter<StationEvent>,
) {
    if !progress.first_visit_pending() {
        return;
    }
    if manager.show_welcome(&mut controls) {
        info!("First visit, showing welcome");
        station_events.write(StationEvent::OverlayOpened {
            kind: "welcome",
            station: None,
        });
    }
}
