use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::model::SlotConfig;
use crate::foundation::error::LaminateResult;

/// Leading bytes read when sniffing a candidate file for a raster format.
const SNIFF_LEN: u64 = 64;

/// Images resolved for one slot, in positional pairing order.
///
/// Recomputed fresh on every compile invocation; never cached.
#[derive(Clone, Debug, Default)]
pub struct ResolvedSlot {
    /// Matched image files, sorted lexicographically by full path string.
    pub images: Vec<PathBuf>,
}

/// Resolve the images for one slot.
///
/// Entries directly inside the slot directory (non-recursive) are kept when
/// their file name contains the slot's `name_filter`, they are regular files,
/// and their leading bytes sniff as a known raster image format (magic
/// numbers, never the extension). Matches are sorted lexicographically by
/// path string ascending: `img10` pairs before `img2`; callers relying on
/// numeric ordering must zero-pad their file names. A missing or unreadable
/// directory resolves to zero images rather than an error.
#[tracing::instrument(skip(slot))]
pub fn resolve_slot(slot: &SlotConfig) -> LaminateResult<ResolvedSlot> {
    let Ok(entries) = std::fs::read_dir(&slot.directory) else {
        return Ok(ResolvedSlot::default());
    };

    let mut images = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !name_matches(&path, &slot.name_filter) {
            continue;
        }
        if !path.is_file() {
            continue;
        }
        if !sniffs_as_image(&path) {
            continue;
        }
        images.push(path);
    }

    images.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(ResolvedSlot { images })
}

fn name_matches(path: &Path, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    path.file_name()
        .map(|name| name.to_string_lossy().contains(filter))
        .unwrap_or(false)
}

/// A file that cannot be read is not a recognized image.
fn sniffs_as_image(path: &Path) -> bool {
    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    if file.take(SNIFF_LEN).read_to_end(&mut head).is_err() {
        return false;
    }
    image::guess_format(&head).is_ok()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/scan.rs"]
mod tests;
