//! Station interaction: picking, overlays and progress.
//!
//! A click is turned into a world ray and tested against invisible spheres
//! over each station. Cabins open an elder dialogue that ends in a question;
//! every other station opens an experience popup whose call-to-action
//! records the visit and navigates to an activity page. Only one overlay is
//! ever open, and camera controls are off while it is.
//!
//! ## Flow
//!
//! ```text
//! click ──> ZoneRegistry::pick ──> InteractionManager::open_station
//!                                          │
//!           buttons / Escape / RPC ──> OverlayCommand ──> apply_overlay_commands
//!                                          │
//!                          ProgressStore::mark_visited ──> StationEvent
//! ```

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;

/// Overlay commands applied to the manager and the answer-feedback timer.
pub mod commands;

/// Elder dialogue state machine.
pub mod dialogue;

/// Commands and notifications exchanged between input, manager, UI and host page.
pub mod events;

/// Experience popup model and navigation requests.
pub mod experience;

/// Pointer and keyboard input systems.
pub mod input;

/// Single-overlay manager owning pick zones and completed elders.
pub mod manager;

/// Leaving the world for an activity page.
pub mod navigation;

/// Visited stations and first-visit flag over durable storage.
pub mod progress;

/// Screen-to-world rays and ray/sphere tests.
pub mod ray;

/// Durable key-value storage backends.
pub mod storage;

/// Bevy UI for overlays, progress bar, banners and error screen.
pub mod ui;

/// First-visit welcome modal.
pub mod welcome;

/// Station pick volumes and nearest-hit picking.
pub mod zones;

/// Registers interaction events and schedules its systems for the running world.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<events::OverlayCommand>()
            .add_event::<events::StationEvent>()
            .add_event::<experience::NavigationRequest>()
            .add_systems(OnEnter(AppState::Loading), ui::spawn_loading_screen)
            .add_systems(OnExit(AppState::Loading), ui::despawn_loading_screen)
            .add_systems(
                OnEnter(AppState::Running),
                (ui::spawn_progress_bar, welcome::show_welcome_on_first_visit),
            )
            .add_systems(
                Update,
                (
                    // Clicks are gated on the overlay state before this frame's commands apply.
                    input::handle_station_clicks,
                    input::handle_overlay_buttons,
                    input::handle_escape,
                    commands::apply_overlay_commands,
                    commands::tick_answer_feedback,
                    navigation::perform_navigation,
                    ui::rebuild_overlay,
                    ui::update_progress_bar,
                    ui::show_completion_banner,
                    ui::expire_completion_banner,
                    ui::button_hover_colors,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );
    }
}
