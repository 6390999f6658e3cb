use bevy::prelude::*;

use super::progress::ProgressUpdate;
use super::zones::ZoneTag;

/// Something the visitor can do to the open overlay.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// Next greeting line.
    Advance,
    /// Answer option by index, in authored order.
    Select(usize),
    /// Final dialogue button: record success or leave the welcome-back screen.
    Acknowledge,
    /// Experience call-to-action.
    Activate,
    Close,
    DismissWelcome,
}

/// Where an overlay command came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Pointer,
    Keyboard,
    Rpc,
}

/// Request to act on the open overlay.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayCommand {
    pub action: OverlayAction,
    pub source: CommandSource,
}

/// State changes the UI and the host page react to.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum StationEvent {
    OverlayOpened {
        kind: &'static str,
        station: Option<ZoneTag>,
    },
    OverlayClosed,
    ProgressChanged(ProgressUpdate),
    JourneyCompleted,
}

/// Publish a progress update, plus the one-time completion notice when it carries one.
pub fn publish_progress(update: ProgressUpdate, events: &mut EventWriter<StationEvent>) {
    events.write(StationEvent::ProgressChanged(update));
    if update.journey_completed {
        events.write(StationEvent::JourneyCompleted);
    }
}
