//! Laminate is a batch image-layer compositor.
//!
//! Laminate turns an ordered list of configured *slots* (a source directory,
//! a file-name filter, and an opacity) into flattened images: matching files
//! are discovered per slot, paired positionally across slots, and each
//! matched group is alpha-composited into one output file.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: [`resolve_slot`] lists each slot's directory and keeps the
//!    entries that content-sniff as raster images, sorted deterministically.
//! 2. **Validate**: [`validate_resolutions`] confirms a single shared pixel
//!    resolution across every resolved image before anything is written.
//! 3. **Composite**: [`composite_stack`] paints each group bottom-to-top in
//!    premultiplied RGBA8 with per-slot opacity applied.
//! 4. **Encode**: [`write_composite`] flattens onto an opaque white
//!    background for alpha-less formats and persists `Combined_{j}` files.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: resolution order is lexicographic on the
//!   path string and is the sole determinant of positional pairing.
//! - **All-or-nothing validation**: the resolution check is a barrier; a
//!   mismatch aborts before any output file exists on disk.
//! - **Premultiplied RGBA8** internally: straight alpha appears only at the
//!   encoding boundary.
//!
//! The one-shot entry point is [`compile`]; [`compile_with_options`] adds
//! group-level parallelism on a rayon pool.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod config;
mod encode;
mod foundation;
mod pipeline;

pub use assets::decode::{decode_layer, load_layer, probe_resolution};
pub use assets::scan::{ResolvedSlot, resolve_slot};
pub use compose::blend::{PremulRgba8, over, over_in_place, unpremultiply_rgba8_in_place};
pub use compose::stack::{StackLayer, composite_stack};
pub use config::model::{CompileJob, SlotConfig};
pub use encode::writer::{output_file_name, write_composite};
pub use foundation::core::{ImageRgba8, Opacity, OutputFormat, Resolution};
pub use foundation::error::{LaminateError, LaminateResult};
pub use pipeline::{CompileOptions, compile, compile_with_options, validate_resolutions};
