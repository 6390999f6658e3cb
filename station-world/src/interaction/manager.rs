use std::collections::HashSet;
use std::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

use super::dialogue::{AnswerMark, DialogueOutcome, DialogueSession};
use super::experience::{ExperiencePopup, NavigationRequest};
use super::progress::{ProgressStore, ProgressUpdate};
use super::zones::{ZoneRegistry, ZoneTag};
use crate::engine::assets::station_catalog::StationCatalog;
use crate::engine::assets::station_category::StationCategory;
use crate::engine::camera::viewport_camera::CameraControls;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("no {category} station with local id {local_id}")]
    UnknownStation {
        category: StationCategory,
        local_id: usize,
    },
    #[error("an overlay is already open")]
    OverlayOpen,
}

/// The single overlay that may be on screen.
#[derive(Debug, Clone)]
pub enum Overlay {
    Dialogue(DialogueSession),
    Experience(ExperiencePopup),
    Welcome,
}

impl Overlay {
    /// Name used in frontend notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dialogue(_) => "dialogue",
            Self::Experience(_) => "experience",
            Self::Welcome => "welcome",
        }
    }

    pub fn station(&self) -> Option<ZoneTag> {
        match self {
            Self::Dialogue(session) => Some(ZoneTag::new(StationCategory::Cabin, session.local_id())),
            Self::Experience(popup) => Some(ZoneTag::new(popup.category, popup.local_id)),
            Self::Welcome => None,
        }
    }
}

/// Result of calling the experience call-to-action.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub progress: ProgressUpdate,
    pub navigation: NavigationRequest,
}

/// Owns the pick zones, the overlay slot and which elders have been completed.
///
/// Every path that opens an overlay disables camera controls and every path
/// that closes one enables them again.
#[derive(Resource, Debug, Default)]
pub struct InteractionManager {
    registry: ZoneRegistry,
    overlay: Option<Overlay>,
    completed_elders: HashSet<usize>,
}

impl InteractionManager {
    pub fn new(registry: ZoneRegistry) -> Self {
        Self {
            registry,
            overlay: None,
            completed_elders: HashSet::new(),
        }
    }

    /// Restore completed elders from persisted `cabin-{n}` keys (1-based).
    pub fn seed_completed(&mut self, progress: &ProgressStore) {
        for n in progress.visited_ids(StationCategory::Cabin.as_str()) {
            if let Some(local_id) = n.checked_sub(1) {
                self.completed_elders.insert(local_id);
            }
        }
        if !self.completed_elders.is_empty() {
            info!("{} elder visits restored", self.completed_elders.len());
        }
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn dialogue(&self) -> Option<&DialogueSession> {
        match &self.overlay {
            Some(Overlay::Dialogue(session)) => Some(session),
            _ => None,
        }
    }

    pub fn experience(&self) -> Option<&ExperiencePopup> {
        match &self.overlay {
            Some(Overlay::Experience(popup)) => Some(popup),
            _ => None,
        }
    }

    pub fn is_elder_completed(&self, local_id: usize) -> bool {
        self.completed_elders.contains(&local_id)
    }

    /// Handle a primary click. No-op while any overlay is open or when nothing is hit.
    pub fn handle_click(
        &mut self,
        pointer: Vec2,
        viewport: Rect,
        world_from_clip: Mat4,
        catalog: &StationCatalog,
        controls: &mut CameraControls,
    ) -> Result<Option<ZoneTag>, InteractionError> {
        if self.is_open() {
            return Ok(None);
        }
        let Some(hit) = self.registry.pick(pointer, viewport, world_from_clip) else {
            return Ok(None);
        };
        debug!(
            "Picked {}-{} at {:.1}",
            hit.tag.category, hit.tag.local_id, hit.distance
        );
        self.open_station(hit.tag, catalog, controls)?;
        Ok(Some(hit.tag))
    }

    /// Open the overlay for a station: a dialogue for cabins, a popup for everything else.
    pub fn open_station(
        &mut self,
        tag: ZoneTag,
        catalog: &StationCatalog,
        controls: &mut CameraControls,
    ) -> Result<(), InteractionError> {
        if self.is_open() {
            return Err(InteractionError::OverlayOpen);
        }
        let unknown = InteractionError::UnknownStation {
            category: tag.category,
            local_id: tag.local_id,
        };

        let overlay = match tag.category {
            StationCategory::Cabin => {
                let visit = catalog.elder(tag.local_id).ok_or(unknown)?;
                let completed = self.completed_elders.contains(&tag.local_id);
                Overlay::Dialogue(DialogueSession::start(tag.local_id, visit.clone(), completed))
            }
            category => {
                let descriptor = catalog.experience(category, tag.local_id).ok_or(unknown)?;
                Overlay::Experience(ExperiencePopup {
                    category,
                    local_id: tag.local_id,
                    descriptor: descriptor.clone(),
                })
            }
        };

        info!("Opened {} for {}-{}", overlay.kind(), tag.category, tag.local_id);
        self.overlay = Some(overlay);
        controls.enabled = false;
        Ok(())
    }

    pub fn advance_dialogue(&mut self) -> bool {
        match &mut self.overlay {
            Some(Overlay::Dialogue(session)) => session.advance(),
            _ => false,
        }
    }

    pub fn select_answer(&mut self, option: usize) -> Option<AnswerMark> {
        match &mut self.overlay {
            Some(Overlay::Dialogue(session)) => session.select(option),
            _ => None,
        }
    }

    /// Drive the pending answer timer, if a dialogue is open.
    pub fn tick(&mut self, delta: Duration) -> Option<AnswerMark> {
        match &mut self.overlay {
            Some(Overlay::Dialogue(session)) => session.tick(delta),
            _ => None,
        }
    }

    /// Finish the dialogue from its last screen.
    ///
    /// A completed challenge records `cabin-{local_id + 1}`; the welcome-back
    /// screen closes without touching progress. Returns the recorded update, if any.
    pub fn acknowledge_dialogue(
        &mut self,
        progress: &mut ProgressStore,
        controls: &mut CameraControls,
    ) -> Option<ProgressUpdate> {
        let Some(Overlay::Dialogue(session)) = &self.overlay else {
            return None;
        };
        let local_id = session.local_id();
        let outcome = session.acknowledge()?;

        let update = match outcome {
            DialogueOutcome::Completed => {
                self.completed_elders.insert(local_id);
                Some(progress.mark_visited(StationCategory::Cabin.as_str(), local_id + 1))
            }
            DialogueOutcome::Dismissed => None,
        };
        self.close(controls);
        update
    }

    /// Call-to-action: record the visit, close the popup, hand back where to go.
    pub fn activate_experience(
        &mut self,
        progress: &mut ProgressStore,
        controls: &mut CameraControls,
    ) -> Option<Activation> {
        let popup = self.experience()?;
        let category = popup.category;
        let local_id = popup.local_id;
        let destination = popup.descriptor.destination.clone();

        let update = progress.mark_visited(category.as_str(), local_id);
        self.close(controls);
        Some(Activation {
            progress: update,
            navigation: NavigationRequest { destination },
        })
    }

    /// Show the first-visit modal. Only when nothing else is open.
    pub fn show_welcome(&mut self, controls: &mut CameraControls) -> bool {
        if self.is_open() {
            return false;
        }
        self.overlay = Some(Overlay::Welcome);
        controls.enabled = false;
        true
    }

    pub fn dismiss_welcome(&mut self, progress: &mut ProgressStore, controls: &mut CameraControls) -> bool {
        if !matches!(self.overlay, Some(Overlay::Welcome)) {
            return false;
        }
        progress.acknowledge_welcome();
        self.close(controls)
    }

    /// Tear down whatever is open, discarding uncommitted state. Returns whether anything was open.
    pub fn close(&mut self, controls: &mut CameraControls) -> bool {
        controls.enabled = true;
        match self.overlay.take() {
            Some(overlay) => {
                debug!("Closed {}", overlay.kind());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod manager_tests;
