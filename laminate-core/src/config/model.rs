use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::{Opacity, OutputFormat};
use crate::foundation::error::{LaminateError, LaminateResult};

/// One configured image layer: where to look, what to match, how opaque.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SlotConfig {
    /// Directory searched (non-recursively) for this slot's images.
    pub directory: PathBuf,
    /// Substring that matched file names must contain; empty matches all.
    #[serde(default)]
    pub name_filter: String,
    /// Opacity applied to every image drawn from this slot.
    #[serde(default)]
    pub opacity: Opacity,
}

/// A finalized compile job: ordered slots plus the output settings.
///
/// This is the boundary object handed over by whatever collects the
/// configuration. Slot order is the stacking order: slot 0 ends up visually
/// on top and the last slot is the bottom-most layer.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CompileJob {
    /// Ordered slot configurations; index 0 is the top-most layer.
    pub slots: Vec<SlotConfig>,
    /// Directory output files are written into. Must already exist; the
    /// compositor never creates it.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,
    /// Output image format for every composited group.
    #[serde(default)]
    pub format: OutputFormat,
}

impl CompileJob {
    /// Parse a job description from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LaminateResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LaminateError::validation(format!("parse job JSON: {e}")))
    }

    /// Parse a job description from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LaminateResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LaminateError::validation(format!("open job JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check job data that deserialization cannot enforce.
    pub fn validate(&self) -> LaminateResult<()> {
        if self.slots.is_empty() {
            return Err(LaminateError::validation(
                "job must configure at least one slot",
            ));
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.opacity.percent() > 100 {
                return Err(LaminateError::validation(format!(
                    "slot {i}: opacity must be within 0..=100"
                )));
            }
        }
        Ok(())
    }

    /// Move the slot at `index` by `direction` positions.
    ///
    /// Negative direction moves toward the top of the stack. A move whose
    /// source or target falls outside the slot list is a no-op returning
    /// `false`.
    pub fn move_slot(&mut self, index: usize, direction: isize) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        let target = index as isize + direction;
        if target < 0 || target >= self.slots.len() as isize {
            return false;
        }
        let slot = self.slots.remove(index);
        self.slots.insert(target as usize, slot);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
