use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::schedule::ScheduleOpts;
use crate::assets::loader::AssetRef;
use crate::encode::gif::GifOpts;
use crate::foundation::error::{WheelError, WheelResult};
use crate::render::cpu::RenderOpts;
use crate::wheel::geometry::WheelGeometry;
use crate::wheel::order::Candidate;

/// All tunables of one spin, with defaults matching a 500px, 50-frame looping GIF.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpinOpts {
    /// Canvas and wheel dimensions.
    pub geometry: WheelGeometry,
    /// Frame counts, rotations, easing and landing.
    pub schedule: ScheduleOpts,
    /// Cosmetic rendering options.
    pub render: RenderOpts,
    /// GIF output options.
    pub encode: GifOpts,
}

impl SpinOpts {
    /// Check every option group.
    pub fn validate(&self) -> WheelResult<()> {
        self.geometry.validate()?;
        if self.schedule.full_rotations < 2 {
            return Err(WheelError::validation(format!(
                "full_rotations must be >= 2, got {}",
                self.schedule.full_rotations
            )));
        }
        self.encode.validate()
    }
}

/// A complete spin request.
///
/// ```json
/// {
///   "candidates": [{"label": "Alice", "color": "#e53935"}, {"label": "Bob", "color": "#1e88e5"}],
///   "selected_index": 1,
///   "avatar": {"path": "avatar.png"},
///   "options": {"encode": {"transparent": false}}
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpinRequest {
    /// Candidates in the caller's order.
    pub candidates: Vec<Candidate>,
    /// Index of the winner in `candidates`.
    pub selected_index: usize,
    /// Image drawn in the hub.
    pub avatar: AssetRef,
    /// Replacement for the built-in pointer icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<AssetRef>,
    /// Tunables; every field is optional in JSON.
    #[serde(default)]
    pub options: SpinOpts,
}

impl SpinRequest {
    /// Build a request with default options.
    pub fn new(candidates: Vec<Candidate>, selected_index: usize, avatar: AssetRef) -> Self {
        Self {
            candidates,
            selected_index,
            avatar,
            pointer: None,
            options: SpinOpts::default(),
        }
    }

    /// Parse a request from JSON text.
    pub fn from_json_str(s: &str) -> WheelResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| WheelError::validation(format!("parse spin request JSON: {e}")))
    }

    /// Parse a request from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> WheelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| WheelError::validation(format!("parse spin request JSON: {e}")))
    }

    /// Parse a request from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> WheelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WheelError::validation(format!("open spin request JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/request.rs"]
mod tests;
