use bevy::prelude::*;

use crate::engine::scene::theme::WorldTheme;

/// Start-up choices: which world to build and, natively, where progress is kept.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct WorldConfig {
    pub theme: WorldTheme,
    /// Native progress file override; unused in the browser.
    pub progress_file: Option<String>,
}

impl WorldConfig {
    fn with_theme_name(name: Option<&str>, progress_file: Option<String>) -> Self {
        let theme = match name {
            None => WorldTheme::default(),
            Some(name) => WorldTheme::from_string(name).unwrap_or_else(|| {
                warn!(
                    "Unknown world '{}', using '{}'",
                    name,
                    WorldTheme::default().as_str()
                );
                WorldTheme::default()
            }),
        };
        Self {
            theme,
            progress_file,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use clap::Parser;

    use super::WorldConfig;

    #[derive(Parser, Debug)]
    #[command(name = "station-world", about = "Explorable world of clickable learning stations")]
    pub struct Cli {
        /// World theme: islands, crystal, diorama or terrain.
        #[arg(long)]
        pub world: Option<String>,

        /// JSON file visited stations are kept in.
        #[arg(long)]
        pub progress_file: Option<String>,
    }

    impl WorldConfig {
        pub fn from_cli(cli: Cli) -> Self {
            Self::with_theme_name(cli.world.as_deref(), cli.progress_file)
        }

        pub fn from_environment() -> Self {
            Self::from_cli(Cli::parse())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::Cli;

#[cfg(target_arch = "wasm32")]
impl WorldConfig {
    /// Read `?world=` from the page URL.
    pub fn from_environment() -> Self {
        use web_sys::UrlSearchParams;

        let world = web_sys::window()
            .and_then(|window| window.location().search().ok())
            .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("world"));
        Self::with_theme_name(world.as_deref(), None)
    }
}
