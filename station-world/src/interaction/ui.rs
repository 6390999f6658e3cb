use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use constants::render_settings::{
    ANSWER_CORRECT, ANSWER_WRONG, BUTTON_HOVER, BUTTON_IDLE, BUTTON_PRESSED, OVERLAY_BACKDROP,
    OVERLAY_MUTED_TEXT, OVERLAY_PANEL, OVERLAY_TEXT, PROGRESS_FILL, PROGRESS_TRACK,
};
use constants::station::COMPLETION_NOTICE_SECS;

use super::dialogue::{AnswerMark, DialogueSession, DialogueStep};
use super::events::{OverlayAction, StationEvent};
use super::experience::{ExperiencePopup, category_accent};
use super::manager::{InteractionManager, Overlay};
use super::progress::{ProgressStore, ProgressUpdate};
use crate::engine::assets::station_category::StationCategory;

const WELCOME_TITLE: &str = "Welcome, traveller";
const WELCOME_BODY: &str = "Walk among the cabins, fires and gathering places. Click a station to hear its story. \
Elders will share a teaching and ask you a question; every other station leads to an activity. \
Your progress is remembered on this device.";
const COMPLETION_TEXT: &str = "You have visited every station. Thank you for walking with us.";

/// Root of whatever overlay is on screen; rebuilt whenever the manager changes.
#[derive(Component)]
pub struct OverlayRoot;

/// Buttons that take hover colours.
#[derive(Component)]
pub struct OverlayButton;

#[derive(Component)]
pub struct ProgressFill;

#[derive(Component)]
pub struct ProgressLabel;

#[derive(Component)]
pub struct CompletionBanner {
    timer: Timer,
}

#[derive(Component)]
pub struct LoadingScreen;

/// Reflect the manager's overlay slot on screen.
pub fn rebuild_overlay(
    mut commands: Commands,
    manager: Res<InteractionManager>,
    roots: Query<Entity, With<OverlayRoot>>,
) {
    if !manager.is_changed() {
        return;
    }
    for root in &roots {
        commands.entity(root).despawn();
    }
    let Some(overlay) = manager.overlay() else {
        return;
    };

    // Experience popups close on a click outside the panel.
    let backdrop_closes = matches!(overlay, Overlay::Experience(_));
    let mut backdrop = commands.spawn((
        OverlayRoot,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(OVERLAY_BACKDROP),
        GlobalZIndex(10),
        FocusPolicy::Block,
    ));
    if backdrop_closes {
        backdrop.insert((Button, OverlayAction::Close));
    }

    backdrop.with_children(|backdrop| {
        backdrop
            .spawn((
                Node {
                    width: Val::Px(560.0),
                    max_width: Val::Percent(92.0),
                    flex_direction: FlexDirection::Column,
                    padding: UiRect::all(Val::Px(24.0)),
                    row_gap: Val::Px(12.0),
                    ..default()
                },
                BackgroundColor(OVERLAY_PANEL),
                BorderRadius::all(Val::Px(10.0)),
                FocusPolicy::Block,
                Interaction::default(),
            ))
            .with_children(|panel| match overlay {
                Overlay::Dialogue(session) => dialogue_panel(panel, session),
                Overlay::Experience(popup) => experience_panel(panel, popup),
                Overlay::Welcome => welcome_panel(panel),
            });
    });
}

fn dialogue_panel(panel: &mut ChildSpawnerCommands, session: &DialogueSession) {
    let visit = session.visit();
    let accent = category_accent(StationCategory::Cabin);

    heading(panel, &visit.speaker_name, accent);
    muted(panel, &visit.speaker_location);

    match session.step() {
        DialogueStep::Greeting(i) => {
            body(panel, session.current_line().unwrap_or_default());
            muted(panel, &format!("{} / {}", i + 1, visit.greetings.len()));
            button_row(panel, |row| {
                button(row, "Continue", OverlayAction::Advance, BUTTON_IDLE);
                button(row, "Leave", OverlayAction::Close, BUTTON_IDLE);
            });
        }
        DialogueStep::MathChallenge => {
            let Some(challenge) = session.challenge() else {
                return;
            };
            muted(panel, &challenge.label);
            body(panel, &challenge.question);
            let feedback = session.feedback();
            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|options| {
                    for (i, option) in challenge.options.iter().enumerate() {
                        let color = match feedback {
                            Some(f) if f.option == i => match f.mark {
                                AnswerMark::Correct => ANSWER_CORRECT,
                                AnswerMark::Wrong => ANSWER_WRONG,
                            },
                            _ => BUTTON_IDLE,
                        };
                        button(options, &option.text, OverlayAction::Select(i), color);
                    }
                });
            button_row(panel, |row| {
                button(row, "Leave", OverlayAction::Close, BUTTON_IDLE);
            });
        }
        DialogueStep::Success => {
            body(panel, session.current_line().unwrap_or_default());
            button_row(panel, |row| {
                button(row, "Thank you", OverlayAction::Acknowledge, BUTTON_IDLE);
                button(row, "Leave", OverlayAction::Close, BUTTON_IDLE);
            });
        }
        DialogueStep::AlreadyVisited => {
            body(panel, session.current_line().unwrap_or_default());
            button_row(panel, |row| {
                button(row, "Thank you", OverlayAction::Acknowledge, BUTTON_IDLE);
            });
        }
    }
}

fn experience_panel(panel: &mut ChildSpawnerCommands, popup: &ExperiencePopup) {
    heading(panel, &popup.descriptor.title, popup.accent());
    if let Some(subtitle) = &popup.descriptor.subtitle {
        muted(panel, subtitle);
    }

    panel
        .spawn((
            Text::default(),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(OVERLAY_TEXT),
        ))
        .with_children(|text| {
            for span in popup.body() {
                let color = if span.emphasis {
                    popup.accent()
                } else {
                    OVERLAY_TEXT
                };
                text.spawn((
                    TextSpan::new(span.text),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(color),
                ));
            }
        });

    button_row(panel, |row| {
        button(row, &popup.descriptor.action_label, OverlayAction::Activate, popup.accent());
        button(row, "Not now", OverlayAction::Close, BUTTON_IDLE);
    });
}

fn welcome_panel(panel: &mut ChildSpawnerCommands) {
    heading(panel, WELCOME_TITLE, PROGRESS_FILL);
    body(panel, WELCOME_BODY);
    button_row(panel, |row| {
        button(row, "Begin exploring", OverlayAction::DismissWelcome, BUTTON_IDLE);
    });
}

fn heading(parent: &mut ChildSpawnerCommands, text: &str, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 26.0,
            ..default()
        },
        TextColor(color),
    ));
}

fn body(parent: &mut ChildSpawnerCommands, text: &str) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(OVERLAY_TEXT),
    ));
}

fn muted(parent: &mut ChildSpawnerCommands, text: &str) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(OVERLAY_MUTED_TEXT),
    ));
}

fn button_row(parent: &mut ChildSpawnerCommands, buttons: impl FnOnce(&mut ChildSpawnerCommands)) {
    parent
        .spawn(Node {
            justify_content: JustifyContent::FlexEnd,
            column_gap: Val::Px(10.0),
            margin: UiRect::top(Val::Px(8.0)),
            ..default()
        })
        .with_children(buttons);
}

fn button(parent: &mut ChildSpawnerCommands, label: &str, action: OverlayAction, color: Color) {
    let mut entity = parent.spawn((
        Button,
        action,
        Node {
            padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
            justify_content: JustifyContent::Center,
            ..default()
        },
        BackgroundColor(color),
        BorderRadius::all(Val::Px(6.0)),
    ));
    // Marked answers keep their colour until the mark clears.
    if color == BUTTON_IDLE {
        entity.insert(OverlayButton);
    }
    entity.with_children(|button| {
        button.spawn((
            Text::new(label),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(OVERLAY_TEXT),
        ));
    });
}

pub fn button_hover_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<OverlayButton>)>,
) {
    for (interaction, mut background) in &mut buttons {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVER,
            Interaction::None => BUTTON_IDLE,
        };
    }
}

fn progress_text(update: &ProgressUpdate) -> String {
    format!("Stations visited: {} / {}", update.visited, update.total)
}

pub fn spawn_progress_bar(mut commands: Commands, progress: Res<ProgressStore>) {
    let snapshot = progress.snapshot();
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(progress_text(&snapshot)),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(OVERLAY_TEXT),
                ProgressLabel,
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(260.0),
                        height: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(PROGRESS_TRACK),
                    BorderRadius::all(Val::Px(6.0)),
                ))
                .with_children(|track| {
                    track.spawn((
                        Node {
                            width: Val::Percent(snapshot.ratio * 100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(PROGRESS_FILL),
                        BorderRadius::all(Val::Px(6.0)),
                        ProgressFill,
                    ));
                });
        });
}

pub fn update_progress_bar(
    mut events: EventReader<StationEvent>,
    mut fills: Query<&mut Node, With<ProgressFill>>,
    mut labels: Query<&mut Text, With<ProgressLabel>>,
) {
    let Some(update) = events
        .read()
        .filter_map(|event| match event {
            StationEvent::ProgressChanged(update) => Some(*update),
            _ => None,
        })
        .last()
    else {
        return;
    };

    for mut node in &mut fills {
        node.width = Val::Percent(update.ratio * 100.0);
    }
    for mut text in &mut labels {
        text.0 = progress_text(&update);
    }
}

pub fn show_completion_banner(mut commands: Commands, mut events: EventReader<StationEvent>) {
    if !events
        .read()
        .any(|event| matches!(event, StationEvent::JourneyCompleted))
    {
        return;
    }
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            GlobalZIndex(20),
            CompletionBanner {
                timer: Timer::from_seconds(COMPLETION_NOTICE_SECS, TimerMode::Once),
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        padding: UiRect::axes(Val::Px(20.0), Val::Px(12.0)),
                        ..default()
                    },
                    BackgroundColor(OVERLAY_PANEL),
                    BorderRadius::all(Val::Px(8.0)),
                ))
                .with_children(|banner| {
                    banner.spawn((
                        Text::new(COMPLETION_TEXT),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(PROGRESS_FILL),
                    ));
                });
        });
}

pub fn expire_completion_banner(
    mut commands: Commands,
    time: Res<Time>,
    mut banners: Query<(Entity, &mut CompletionBanner)>,
) {
    for (entity, mut banner) in &mut banners {
        if banner.timer.tick(time.delta()).finished() {
            commands.entity(entity).despawn();
        }
    }
}

pub fn spawn_loading_screen(mut commands: Commands) {
    commands
        .spawn((
            LoadingScreen,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(OVERLAY_PANEL),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading stations..."),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(OVERLAY_MUTED_TEXT),
            ));
        });
}

pub fn despawn_loading_screen(mut commands: Commands, screens: Query<Entity, With<LoadingScreen>>) {
    for entity in &screens {
        commands.entity(entity).despawn();
    }
}

/// Full-screen message shown when the world cannot start.
pub fn spawn_error_screen(commands: &mut Commands, message: &str) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.06, 0.05, 0.06)),
            GlobalZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("The world could not be loaded."),
                TextFont {
                    font_size: 26.0,
                    ..default()
                },
                TextColor(ANSWER_WRONG),
            ));
            parent.spawn((
                Text::new(message),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(OVERLAY_MUTED_TEXT),
            ));
        });
}
