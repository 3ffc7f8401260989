//! Application configuration from the environment

use deck::DeckParams;
use loadspan_config::InteractionConfig;
use tracing::warn;

/// Env var overriding the number of deck segments
pub const SEGMENTS_VAR: &str = "LOADSPAN_SEGMENTS";
/// Env var overriding the weight change per dragged pixel
pub const DRAG_SENSITIVITY_VAR: &str = "LOADSPAN_DRAG_SENSITIVITY";

/// Startup configuration for the native app
#[derive(Debug, Clone, Default)]
pub struct LoadspanConfig {
    pub deck: DeckParams,
    pub interaction: InteractionConfig,
}

impl LoadspanConfig {
    /// Defaults with any overrides from LOADSPAN_SEGMENTS and LOADSPAN_DRAG_SENSITIVITY
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(SEGMENTS_VAR).ok().as_deref(),
            std::env::var(DRAG_SENSITIVITY_VAR).ok().as_deref(),
        )
    }

    /// Defaults with the given raw override values applied.
    ///
    /// Unparseable or unusable values are logged and ignored.
    pub fn from_vars(segments: Option<&str>, drag_sensitivity: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = segments {
            match raw.trim().parse::<usize>() {
                Ok(count) if count > 0 => config.deck = DeckParams::with_segments(count),
                _ => warn!("Ignoring {}={:?}: expected a positive integer", SEGMENTS_VAR, raw),
            }
        }

        if let Some(raw) = drag_sensitivity {
            let tuned = raw
                .trim()
                .parse::<f32>()
                .ok()
                .and_then(|value| config.interaction.with_drag_sensitivity(value));
            match tuned {
                Some(interaction) => config.interaction = interaction,
                None => warn!(
                    "Ignoring {}={:?}: expected a positive number",
                    DRAG_SENSITIVITY_VAR, raw
                ),
            }
        }

        config
    }
}
