use bevy::prelude::*;

/// Loading stages reported to the host page while the world starts.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadingProgress {
    pub catalog_requested: bool,
    pub catalog_loaded: bool,
    pub catalog_validated: bool,
    /// Last stage sent to the host, so each stage is reported once.
    pub reported_stage: Option<&'static str>,
}

impl LoadingProgress {
    pub fn stage(&self) -> &'static str {
        if self.catalog_validated {
            "ready"
        } else if self.catalog_loaded {
            "validating"
        } else if self.catalog_requested {
            "loading_catalog"
        } else {
            "starting"
        }
    }
}
