use bevy::prelude::*;
use constants::station::{ELDER_CABIN_COUNT, FIRE_COUNT, SINGLE_STATION_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::station_category::StationCategory;

/// A single answer to an elder's question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub correct: bool,
}

/// The question that closes every elder visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathChallenge {
    pub label: String,
    pub question: String,
    /// Rendered in authored order, never shuffled.
    pub options: Vec<AnswerOption>,
    pub success: String,
}

/// Narrative and question for one elder cabin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElderVisit {
    pub id: String,
    pub speaker_name: String,
    pub speaker_location: String,
    pub greetings: Vec<String>,
    pub challenge: MathChallenge,
}

/// Popup copy for every non-cabin station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceDescriptor {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Body text; `**text**` marks emphasised spans.
    pub message: String,
    pub action_label: String,
    /// Relative URL the call-to-action navigates to.
    pub destination: String,
}

/// Complete station catalog as a Bevy asset. Mirrors the JSON structure exactly.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationCatalog {
    pub elders: Vec<ElderVisit>,
    pub fires: Vec<ExperienceDescriptor>,
    pub herb: ExperienceDescriptor,
    pub logpile: ExperienceDescriptor,
    pub garden: ExperienceDescriptor,
    pub cart: ExperienceDescriptor,
    pub fishing: ExperienceDescriptor,
    pub memorial: ExperienceDescriptor,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("station catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected {expected} {kind} stations, catalog has {found}")]
    CountMismatch {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("elder visit '{id}' has no correct answer")]
    NoCorrectAnswer { id: String },
    #[error("asset server failed to load the station catalog: {0}")]
    LoadFailed(String),
}

impl StationCatalog {
    /// Parse and validate a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: StationCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the catalog matches the station layout every world uses.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.elders.len() != ELDER_CABIN_COUNT {
            return Err(CatalogError::CountMismatch {
                kind: "cabin",
                expected: ELDER_CABIN_COUNT,
                found: self.elders.len(),
            });
        }
        if self.fires.len() != FIRE_COUNT {
            return Err(CatalogError::CountMismatch {
                kind: "fire",
                expected: FIRE_COUNT,
                found: self.fires.len(),
            });
        }
        if let Some(visit) = self
            .elders
            .iter()
            .find(|visit| !visit.challenge.options.iter().any(|o| o.correct))
        {
            return Err(CatalogError::NoCorrectAnswer {
                id: visit.id.clone(),
            });
        }
        Ok(())
    }

    pub fn elder(&self, local_id: usize) -> Option<&ElderVisit> {
        self.elders.get(local_id)
    }

    /// Descriptor for an experience station. Single stations only answer to local id 0.
    pub fn experience(
        &self,
        category: StationCategory,
        local_id: usize,
    ) -> Option<&ExperienceDescriptor> {
        let single = local_id == 0;
        match category {
            StationCategory::Cabin => None,
            StationCategory::Fire => self.fires.get(local_id),
            StationCategory::Herb => single.then_some(&self.herb),
            StationCategory::LogPile => single.then_some(&self.logpile),
            StationCategory::Garden => single.then_some(&self.garden),
            StationCategory::Cart => single.then_some(&self.cart),
            StationCategory::Fishing => single.then_some(&self.fishing),
            StationCategory::Memorial => single.then_some(&self.memorial),
        }
    }

    pub fn station_count(&self) -> usize {
        self.elders.len() + self.fires.len() + SINGLE_STATION_COUNT
    }
}

/// A run of body text, optionally emphasised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichSpan {
    pub text: String,
    pub emphasis: bool,
}

/// Split `**bold**` markup into spans. An unterminated marker is kept literally.
pub fn rich_text_spans(message: &str) -> Vec<RichSpan> {
    let mut spans = Vec::new();
    let mut rest = message;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };
        if start > 0 {
            spans.push(RichSpan {
                text: rest[..start].to_string(),
                emphasis: false,
            });
        }
        if end > 0 {
            spans.push(RichSpan {
                text: after[..end].to_string(),
                emphasis: true,
            });
        }
        rest = &after[end + 2..];
    }

    if !rest.is_empty() {
        spans.push(RichSpan {
            text: rest.to_string(),
            emphasis: false,
        });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BUNDLED: &str = include_str!("../../../assets/stations/catalog.json");

    #[test]
    fn bundled_catalog_parses_and_validates() {
        let catalog = StationCatalog::from_json(BUNDLED).expect("bundled catalog");
        assert_eq!(catalog.elders.len(), ELDER_CABIN_COUNT);
        assert_eq!(catalog.fires.len(), FIRE_COUNT);
        assert_eq!(catalog.station_count(), constants::station::TOTAL_STATIONS);
    }

    #[test]
    fn single_stations_only_resolve_local_id_zero() {
        let catalog = StationCatalog::from_json(BUNDLED).unwrap();
        assert!(catalog.experience(StationCategory::Herb, 0).is_some());
        assert!(catalog.experience(StationCategory::Herb, 1).is_none());
        assert!(catalog.experience(StationCategory::Fire, 5).is_some());
        assert!(catalog.experience(StationCategory::Fire, 6).is_none());
        assert!(catalog.experience(StationCategory::Cabin, 0).is_none());
    }

    #[test]
    fn validation_rejects_challenge_without_correct_answer() {
        let mut catalog = StationCatalog::from_json(BUNDLED).unwrap();
        for option in &mut catalog.elders[2].challenge.options {
            option.correct = false;
        }
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, CatalogError::NoCorrectAnswer { id } if id == "elder-agnes"));
    }

    #[test]
    fn validation_rejects_missing_fires() {
        let mut catalog = StationCatalog::from_json(BUNDLED).unwrap();
        catalog.fires.pop();
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::CountMismatch { kind: "fire", .. })
        ));
    }

    #[test]
    fn rich_text_splits_emphasis() {
        let spans = rich_text_spans("Learn how **bannock** was made.");
        assert_eq!(
            spans,
            vec![
                RichSpan {
                    text: "Learn how ".into(),
                    emphasis: false
                },
                RichSpan {
                    text: "bannock".into(),
                    emphasis: true
                },
                RichSpan {
                    text: " was made.".into(),
                    emphasis: false
                },
            ]
        );
    }

    #[test]
    fn rich_text_keeps_unterminated_marker() {
        let spans = rich_text_spans("half **open");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "half **open");
        assert!(!spans[0].emphasis);
    }
}
