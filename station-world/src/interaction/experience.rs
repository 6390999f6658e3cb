use bevy::prelude::*;

use crate::engine::assets::station_catalog::{ExperienceDescriptor, RichSpan, rich_text_spans};
use crate::engine::assets::station_category::StationCategory;

/// Open popup for any non-cabin station.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperiencePopup {
    pub category: StationCategory,
    pub local_id: usize,
    pub descriptor: ExperienceDescriptor,
}

impl ExperiencePopup {
    pub fn body(&self) -> Vec<RichSpan> {
        rich_text_spans(&self.descriptor.message)
    }

    pub fn accent(&self) -> Color {
        category_accent(self.category)
    }
}

/// Header colour for a category's popup.
pub fn category_accent(category: StationCategory) -> Color {
    match category {
        StationCategory::Cabin => Color::srgb(0.62, 0.42, 0.26),
        StationCategory::Fire => Color::srgb(0.95, 0.52, 0.18),
        StationCategory::Herb => Color::srgb(0.42, 0.72, 0.38),
        StationCategory::LogPile => Color::srgb(0.66, 0.46, 0.26),
        StationCategory::Garden => Color::srgb(0.52, 0.78, 0.32),
        StationCategory::Cart => Color::srgb(0.78, 0.62, 0.36),
        StationCategory::Fishing => Color::srgb(0.32, 0.60, 0.82),
        StationCategory::Memorial => Color::srgb(0.70, 0.70, 0.78),
    }
}

/// Page the visitor is sent to from a call-to-action.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub destination: String,
}
