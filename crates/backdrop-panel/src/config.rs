//! Panel configuration
//!
//! Mirrors the options object a host page hands to a panel. Keys are
//! camelCase so the JavaScript side can pass `JSON.stringify(options)`
//! straight through.

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, PanelResult};
use crate::math::Rect;

/// Default quiet period before debounced coordinates are released
pub const DEFAULT_DEBOUNCE_MS: f64 = 100.0;

/// Default opacity of the resize preview overlay
pub const DEFAULT_OVERLAY_OPACITY: f64 = 0.4;

/// Throttling/preview policy for a session
///
/// Ordered `Eco < Balanced < Quality`. Deserializes from either the
/// lowercase name or the numeric level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "QualityRepr")]
pub enum Quality {
    /// 30 Hz capped redraws, panel content hidden behind the overlay while resizing
    Eco,
    /// Uncapped redraws, panel content hidden behind the overlay while resizing
    #[default]
    Balanced,
    /// Uncapped redraws, live panel content while resizing
    Quality,
}

impl Quality {
    /// Map the numeric levels `0..=2` used by host pages
    pub fn from_level(level: u8) -> PanelResult<Quality> {
        match level {
            0 => Ok(Quality::Eco),
            1 => Ok(Quality::Balanced),
            2 => Ok(Quality::Quality),
            other => Err(PanelError::InvalidQuality(other.to_string())),
        }
    }

    /// Whether redraws are capped to the economy interval
    pub fn is_throttled(self) -> bool {
        self == Quality::Eco
    }

    /// Whether resize previews go to the overlay instead of live content
    pub fn hides_content_on_resize(self) -> bool {
        self < Quality::Quality
    }
}

impl std::str::FromStr for Quality {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eco" | "0" => Ok(Quality::Eco),
            "balanced" | "1" => Ok(Quality::Balanced),
            "quality" | "2" => Ok(Quality::Quality),
            _ => Err(PanelError::InvalidQuality(s.to_string())),
        }
    }
}

/// Wire form of [`Quality`]: `"eco"` or `0`
#[derive(Deserialize)]
#[serde(untagged)]
enum QualityRepr {
    Level(u8),
    Name(String),
}

impl TryFrom<QualityRepr> for Quality {
    type Error = PanelError;

    fn try_from(repr: QualityRepr) -> Result<Self, Self::Error> {
        match repr {
            QualityRepr::Level(level) => Quality::from_level(level),
            QualityRepr::Name(name) => name.parse(),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Quality::Eco => "eco",
            Quality::Balanced => "balanced",
            Quality::Quality => "quality",
        };
        f.write_str(name)
    }
}

/// Initial coordinates as supplied by the host; missing fields take defaults
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
struct PartialRect {
    left: Option<f64>,
    top: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

impl From<PartialRect> for Rect {
    fn from(partial: PartialRect) -> Self {
        let defaults = Rect::default();
        Rect::new(
            partial.left.unwrap_or(defaults.left),
            partial.top.unwrap_or(defaults.top),
            partial.width.unwrap_or(defaults.width),
            partial.height.unwrap_or(defaults.height),
        )
    }
}

fn deserialize_initial_coords<'de, D>(deserializer: D) -> Result<Rect, D::Error>
where
    D: serde::Deserializer<'de>,
{
    PartialRect::deserialize(deserializer).map(Rect::from)
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> f64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_overlay_opacity() -> f64 {
    DEFAULT_OVERLAY_OPACITY
}

/// Options recognized by a panel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    /// Coordinates written on mount
    #[serde(default, deserialize_with = "deserialize_initial_coords")]
    pub initial_coords: Rect,
    /// Process-wide quality; each session copies it at begin
    #[serde(default)]
    pub quality: Quality,
    /// Clamp drag to the viewport
    #[serde(default = "default_true")]
    pub restrict_bounds: bool,
    /// Write styles to the target/overlay; when off only geometry is tracked
    #[serde(default = "default_true")]
    pub set_styles: bool,
    /// Quiet period for debounced coordinates
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: f64,
    /// Opacity of the resize overlay when revealed
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            initial_coords: Rect::default(),
            quality: Quality::default(),
            restrict_bounds: true,
            set_styles: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
        }
    }
}

impl PanelConfig {
    /// Parse configuration from a JSON options object
    pub fn from_json(json: &str) -> PanelResult<PanelConfig> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style quality override
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Builder-style bounds restriction override
    pub fn with_restrict_bounds(mut self, restrict: bool) -> Self {
        self.restrict_bounds = restrict;
        self
    }

    /// Builder-style initial coordinates override
    pub fn with_initial_coords(mut self, coords: Rect) -> Self {
        self.initial_coords = coords;
        self
    }
}
