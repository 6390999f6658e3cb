use bevy::prelude::*;
use constants::station::SINGLE_STATION_COUNT;

use crate::engine::assets::station_category::StationCategory;

/// Where every station sits in the current world.
///
/// Cabins and fires are indexed lists; every other category has exactly one
/// station, addressed with local id 0.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct StationPositions {
    pub cabins: Vec<Vec3>,
    pub fires: Vec<Vec3>,
    pub herb: Vec3,
    pub logpile: Vec3,
    pub garden: Vec3,
    pub cart: Vec3,
    pub fishing: Vec3,
    pub memorial: Vec3,
}

impl StationPositions {
    /// Build a layout from flat anchors: 6 cabins, 6 fires, then the singles in category order.
    pub fn from_anchors(cabins: Vec<Vec3>, fires: Vec<Vec3>, singles: [Vec3; 6]) -> Self {
        let [herb, logpile, garden, cart, fishing, memorial] = singles;
        Self {
            cabins,
            fires,
            herb,
            logpile,
            garden,
            cart,
            fishing,
            memorial,
        }
    }

    pub fn single(&self, category: StationCategory) -> Option<Vec3> {
        match category {
            StationCategory::Cabin | StationCategory::Fire => None,
            StationCategory::Herb => Some(self.herb),
            StationCategory::LogPile => Some(self.logpile),
            StationCategory::Garden => Some(self.garden),
            StationCategory::Cart => Some(self.cart),
            StationCategory::Fishing => Some(self.fishing),
            StationCategory::Memorial => Some(self.memorial),
        }
    }

    /// Every station as (category, local id, anchor), cabins first, then fires, then singles.
    pub fn iter(&self) -> impl Iterator<Item = (StationCategory, usize, Vec3)> + '_ {
        let cabins = self
            .cabins
            .iter()
            .enumerate()
            .map(|(i, p)| (StationCategory::Cabin, i, *p));
        let fires = self
            .fires
            .iter()
            .enumerate()
            .map(|(i, p)| (StationCategory::Fire, i, *p));
        let singles = StationCategory::ALL
            .into_iter()
            .filter_map(|category| self.single(category).map(|p| (category, 0, p)));
        cabins.chain(fires).chain(singles)
    }

    pub fn len(&self) -> usize {
        self.cabins.len() + self.fires.len() + SINGLE_STATION_COUNT
    }

    /// Anchors only, for keeping decoration clear of stations.
    pub fn all_anchors(&self) -> Vec<Vec3> {
        self.iter().map(|(_, _, p)| p).collect()
    }
}

/// Evenly spaced points on a circle in the XZ plane, starting at `offset` radians.
pub fn ring(count: usize, radius: f32, offset: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let angle = offset + i as f32 * std::f32::consts::TAU / count as f32;
            Vec2::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}
