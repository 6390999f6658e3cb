use super::*;
use crate::engine::scene::heightmap::HeightField;
use crate::engine::scene::theme::WorldTheme;
use crate::interaction::dialogue::DialogueStep;
use crate::interaction::storage::InMemoryStore;
use constants::station::{ANSWER_FEEDBACK_DELAY_MS, TOTAL_STATIONS, ZONE_VERTICAL_BIAS};
use constants::storage_keys::VISITED;
use pretty_assertions::assert_eq;

const BUNDLED: &str = include_str!("../../assets/stations/catalog.json");
const FEEDBACK: Duration = Duration::from_millis(ANSWER_FEEDBACK_DELAY_MS);

struct Fixture {
    manager: InteractionManager,
    catalog: StationCatalog,
    progress: ProgressStore,
    controls: CameraControls,
}

impl Fixture {
    fn new() -> Self {
        Self::with_storage(InMemoryStore::new())
    }

    fn with_storage(storage: InMemoryStore) -> Self {
        let positions = WorldTheme::Diorama.station_positions(&HeightField::flat());
        let progress = ProgressStore::new(Box::new(storage));
        let mut manager = InteractionManager::new(ZoneRegistry::from_positions(&positions));
        manager.seed_completed(&progress);
        Self {
            manager,
            catalog: StationCatalog::from_json(BUNDLED).expect("bundled catalog"),
            progress,
            controls: CameraControls::default(),
        }
    }

    fn open(&mut self, category: StationCategory, local_id: usize) -> Result<(), InteractionError> {
        self.manager.open_station(
            ZoneTag::new(category, local_id),
            &self.catalog,
            &mut self.controls,
        )
    }

    fn correct_option(&self, local_id: usize) -> usize {
        self.catalog.elders[local_id]
            .challenge
            .options
            .iter()
            .position(|o| o.correct)
            .expect("every challenge has a correct answer")
    }

    fn wrong_option(&self, local_id: usize) -> usize {
        self.catalog.elders[local_id]
            .challenge
            .options
            .iter()
            .position(|o| !o.correct)
            .expect("every challenge has a wrong answer")
    }

    fn skip_greetings(&mut self) {
        while self.manager.advance_dialogue() {}
    }

    /// Full cabin flow through to acknowledgement.
    fn complete_elder(&mut self, local_id: usize) -> Option<ProgressUpdate> {
        self.open(StationCategory::Cabin, local_id).expect("cabin opens");
        self.skip_greetings();
        let option = self.correct_option(local_id);
        self.manager.select_answer(option);
        self.manager.tick(FEEDBACK);
        self.manager
            .acknowledge_dialogue(&mut self.progress, &mut self.controls)
    }
}

/// Camera 120 units in front of a single zone at the origin, looking down -Z.
fn single_zone_view(category: StationCategory) -> (InteractionManager, Mat4, Rect) {
    let mut registry = ZoneRegistry::new();
    registry.register_zone(Vec3::ZERO, category, 0);

    let projection = Mat4::perspective_infinite_reverse_rh(0.8, 4.0 / 3.0, 0.1);
    let camera = Mat4::from_translation(Vec3::new(0.0, ZONE_VERTICAL_BIAS, 120.0));
    (
        InteractionManager::new(registry),
        camera * projection.inverse(),
        Rect::new(0.0, 0.0, 800.0, 600.0),
    )
}

#[test]
fn click_on_empty_sky_opens_nothing() {
    let mut fixture = Fixture::new();
    let (mut manager, world_from_clip, viewport) = single_zone_view(StationCategory::Herb);

    let result = manager.handle_click(
        Vec2::new(5.0, 5.0),
        viewport,
        world_from_clip,
        &fixture.catalog,
        &mut fixture.controls,
    );

    assert_eq!(result, Ok(None));
    assert!(!manager.is_open());
    assert!(fixture.controls.enabled);
}

#[test]
fn click_on_station_opens_its_popup() {
    let mut fixture = Fixture::new();
    let (mut manager, world_from_clip, viewport) = single_zone_view(StationCategory::Herb);

    let result = manager.handle_click(
        Vec2::new(400.0, 300.0),
        viewport,
        world_from_clip,
        &fixture.catalog,
        &mut fixture.controls,
    );

    assert_eq!(result, Ok(Some(ZoneTag::new(StationCategory::Herb, 0))));
    let popup = manager.experience().expect("popup open");
    assert_eq!(popup.descriptor, fixture.catalog.herb);
    assert!(!fixture.controls.enabled);
}

#[test]
fn clicks_are_ignored_while_an_overlay_is_open() {
    let mut fixture = Fixture::new();
    let (mut manager, world_from_clip, viewport) = single_zone_view(StationCategory::Cabin);
    assert!(manager.show_welcome(&mut fixture.controls));

    let result = manager.handle_click(
        Vec2::new(400.0, 300.0),
        viewport,
        world_from_clip,
        &fixture.catalog,
        &mut fixture.controls,
    );

    assert_eq!(result, Ok(None));
    assert!(matches!(manager.overlay(), Some(Overlay::Welcome)));
}

#[test]
fn open_then_close_leaves_no_trace_for_every_category() {
    let mut fixture = Fixture::new();
    let tags: Vec<ZoneTag> = fixture
        .manager
        .registry()
        .zones()
        .iter()
        .map(|z| z.tag)
        .collect();
    assert_eq!(tags.len(), TOTAL_STATIONS);

    for tag in tags {
        fixture.open(tag.category, tag.local_id).expect("station opens");
        assert!(!fixture.controls.enabled);
        assert_eq!(fixture.manager.overlay().and_then(Overlay::station), Some(tag));

        assert!(fixture.manager.close(&mut fixture.controls));
        assert!(fixture.controls.enabled);
        assert!(!fixture.manager.is_open());
    }

    assert!(fixture.progress.visited().is_empty());
    assert_eq!(fixture.progress.snapshot().ratio, 0.0);
}

#[test]
fn full_cabin_flow_records_one_based_key() {
    let mut fixture = Fixture::new();
    fixture.open(StationCategory::Cabin, 0).unwrap();

    let greetings = fixture.catalog.elders[0].greetings.len();
    for i in 0..greetings {
        assert_eq!(
            fixture.manager.dialogue().map(|s| s.step()),
            Some(DialogueStep::Greeting(i))
        );
        fixture.manager.advance_dialogue();
    }
    assert_eq!(
        fixture.manager.dialogue().map(|s| s.step()),
        Some(DialogueStep::MathChallenge)
    );

    let correct = fixture.correct_option(0);
    fixture.manager.select_answer(correct);
    fixture.manager.tick(FEEDBACK);
    assert_eq!(
        fixture.manager.dialogue().map(|s| s.step()),
        Some(DialogueStep::Success)
    );

    let update = fixture
        .manager
        .acknowledge_dialogue(&mut fixture.progress, &mut fixture.controls)
        .expect("progress recorded");

    assert!(update.newly_visited);
    assert_eq!(fixture.progress.visited(), vec!["cabin-1".to_string()]);
    assert!(!fixture.manager.is_open());
    assert!(fixture.controls.enabled);
    assert!(fixture.manager.is_elder_completed(0));
}

#[test]
fn completed_elder_greets_with_welcome_back() {
    let mut fixture = Fixture::new();
    fixture.complete_elder(3);

    fixture.open(StationCategory::Cabin, 3).unwrap();
    assert_eq!(
        fixture.manager.dialogue().map(|s| s.step()),
        Some(DialogueStep::AlreadyVisited)
    );

    let update = fixture
        .manager
        .acknowledge_dialogue(&mut fixture.progress, &mut fixture.controls);
    assert_eq!(update, None);
    assert!(!fixture.manager.is_open());
    assert_eq!(fixture.progress.visited(), vec!["cabin-4".to_string()]);
}

#[test]
fn persisted_cabins_seed_completed_elders() {
    let storage = InMemoryStore::new().with_value(VISITED, r#"["cabin-2","fire-0","cabin-0"]"#);
    let mut fixture = Fixture::with_storage(storage);

    assert!(fixture.manager.is_elder_completed(1));
    assert!(!fixture.manager.is_elder_completed(0));

    fixture.open(StationCategory::Cabin, 1).unwrap();
    assert_eq!(
        fixture.manager.dialogue().map(|s| s.step()),
        Some(DialogueStep::AlreadyVisited)
    );
}

#[test]
fn wrong_answer_keeps_the_question_and_records_nothing() {
    let mut fixture = Fixture::new();
    fixture.open(StationCategory::Cabin, 1).unwrap();
    fixture.skip_greetings();

    let wrong = fixture.wrong_option(1);
    assert_eq!(fixture.manager.select_answer(wrong), Some(AnswerMark::Wrong));
    assert_eq!(fixture.manager.tick(FEEDBACK), Some(AnswerMark::Wrong));

    let session = fixture.manager.dialogue().expect("still open");
    assert_eq!(session.step(), DialogueStep::MathChallenge);
    assert!(session.feedback().is_none());
    assert_eq!(
        fixture
            .manager
            .acknowledge_dialogue(&mut fixture.progress, &mut fixture.controls),
        None
    );
    assert!(fixture.manager.is_open());
    assert!(fixture.progress.visited().is_empty());
}

#[test]
fn closing_during_feedback_cancels_the_transition() {
    let mut fixture = Fixture::new();
    fixture.open(StationCategory::Cabin, 2).unwrap();
    fixture.skip_greetings();
    let correct = fixture.correct_option(2);
    fixture.manager.select_answer(correct);

    assert!(fixture.manager.close(&mut fixture.controls));
    assert_eq!(fixture.manager.tick(FEEDBACK * 4), None);

    assert!(!fixture.manager.is_open());
    assert!(!fixture.manager.is_elder_completed(2));
    assert!(fixture.progress.visited().is_empty());

    fixture.open(StationCategory::Cabin, 2).unwrap();
    assert_eq!(
        fixture.manager.dialogue().map(|s| s.step()),
        Some(DialogueStep::Greeting(0))
    );
}

#[test]
fn activation_records_visit_and_navigates() {
    let mut fixture = Fixture::new();
    fixture.open(StationCategory::Fire, 2).unwrap();

    let activation = fixture
        .manager
        .activate_experience(&mut fixture.progress, &mut fixture.controls)
        .expect("popup was open");

    assert_eq!(
        activation.navigation.destination,
        fixture.catalog.fires[2].destination
    );
    assert_eq!(fixture.progress.visited(), vec!["fire-2".to_string()]);
    assert!(!fixture.manager.is_open());
    assert!(fixture.controls.enabled);

    fixture.open(StationCategory::Fire, 2).unwrap();
    let again = fixture
        .manager
        .activate_experience(&mut fixture.progress, &mut fixture.controls)
        .unwrap();
    assert!(!again.progress.newly_visited);
    assert_eq!(again.progress.ratio, activation.progress.ratio);
}

#[test]
fn unknown_station_keeps_everything_closed() {
    let mut fixture = Fixture::new();

    let err = fixture.open(StationCategory::Memorial, 3).unwrap_err();
    assert_eq!(
        err,
        InteractionError::UnknownStation {
            category: StationCategory::Memorial,
            local_id: 3
        }
    );
    assert!(fixture.open(StationCategory::Cabin, 99).is_err());
    assert!(!fixture.manager.is_open());
    assert!(fixture.controls.enabled);
}

#[test]
fn every_station_once_completes_the_journey_once() {
    let mut fixture = Fixture::new();
    let mut completions = 0;

    for local_id in 0..6 {
        let update = fixture.complete_elder(local_id).expect("recorded");
        completions += update.journey_completed as usize;
    }
    for tag in fixture
        .manager
        .registry()
        .zones()
        .iter()
        .map(|z| z.tag)
        .filter(|t| t.category != StationCategory::Cabin)
        .collect::<Vec<_>>()
    {
        fixture.open(tag.category, tag.local_id).unwrap();
        let activation = fixture
            .manager
            .activate_experience(&mut fixture.progress, &mut fixture.controls)
            .unwrap();
        completions += activation.progress.journey_completed as usize;
    }

    assert_eq!(completions, 1);
    assert_eq!(fixture.progress.snapshot().ratio, 1.0);

    fixture.open(StationCategory::Garden, 0).unwrap();
    let repeat = fixture
        .manager
        .activate_experience(&mut fixture.progress, &mut fixture.controls)
        .unwrap();
    assert!(!repeat.progress.journey_completed);
}

#[test]
fn welcome_is_dismissed_once_and_remembered() {
    let mut fixture = Fixture::new();
    assert!(fixture.progress.first_visit_pending());

    assert!(fixture.manager.show_welcome(&mut fixture.controls));
    assert!(!fixture.controls.enabled);
    assert_eq!(fixture.open(StationCategory::Herb, 0), Err(InteractionError::OverlayOpen));

    assert!(
        fixture
            .manager
            .dismiss_welcome(&mut fixture.progress, &mut fixture.controls)
    );
    assert!(fixture.controls.enabled);
    assert!(!fixture.progress.first_visit_pending());
    assert!(
        !fixture
            .manager
            .dismiss_welcome(&mut fixture.progress, &mut fixture.controls)
    );
}
