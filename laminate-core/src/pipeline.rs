use std::collections::BTreeSet;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::assets::decode::{load_layer, probe_resolution};
use crate::assets::scan::{ResolvedSlot, resolve_slot};
use crate::compose::stack::{StackLayer, composite_stack};
use crate::config::model::CompileJob;
use crate::encode::writer::write_composite;
use crate::foundation::core::Resolution;
use crate::foundation::error::{LaminateError, LaminateResult};

/// Execution options for [`compile_with_options`].
///
/// The default is the plain sequential pass.
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    /// Composite output groups on a rayon worker pool instead of one by one.
    pub parallel: bool,
    /// Worker thread override (parallel mode only); `None` uses rayon's
    /// default.
    pub threads: Option<usize>,
}

/// Run a compile job with default (sequential) options.
///
/// See [`compile_with_options`] for the pipeline contract.
#[tracing::instrument(skip(job))]
pub fn compile(job: &CompileJob) -> LaminateResult<Vec<PathBuf>> {
    compile_with_options(job, &CompileOptions::default())
}

/// Run a compile job: resolve, validate, then composite and encode every
/// output group.
///
/// Pipeline, in order:
/// 1. [`CompileJob::validate`]
/// 2. output-directory gate ([`LaminateError::OutputDirectoryUnset`] when
///    unset; the directory must already exist)
/// 3. [`resolve_slot`] per slot, fresh on every call
/// 4. [`validate_resolutions`] across every resolved image; this barrier
///    means a mismatch never leaves partial output behind
/// 5. one composite + encode per output index `0..max(slot lengths)`
///
/// Output groups are independent; with `options.parallel` they run on a
/// rayon pool. The returned paths are ordered by group index either way.
/// A write failure after the barrier is fatal for the run; groups already
/// written are not rolled back.
#[tracing::instrument(skip(job, options))]
pub fn compile_with_options(
    job: &CompileJob,
    options: &CompileOptions,
) -> LaminateResult<Vec<PathBuf>> {
    job.validate()?;

    let Some(output_directory) = job.output_directory.as_deref() else {
        return Err(LaminateError::OutputDirectoryUnset);
    };
    if !output_directory.is_dir() {
        return Err(LaminateError::validation(format!(
            "output directory '{}' does not exist",
            output_directory.display()
        )));
    }

    let resolved: Vec<ResolvedSlot> = job
        .slots
        .iter()
        .map(resolve_slot)
        .collect::<LaminateResult<_>>()?;

    validate_resolutions(&resolved)?;

    let group_count = resolved.iter().map(|s| s.images.len()).max().unwrap_or(0);

    let render_group = |index: usize| -> LaminateResult<PathBuf> {
        let mut layers = Vec::with_capacity(job.slots.len());
        for (slot, slot_images) in job.slots.iter().zip(&resolved) {
            // A slot with no image at this index contributes nothing.
            let Some(path) = slot_images.images.get(index) else {
                continue;
            };
            layers.push(StackLayer {
                image: load_layer(path)?,
                opacity: slot.opacity,
            });
        }
        let combined = composite_stack(&layers)?;
        write_composite(&combined, job.format, output_directory, index)
    };

    if options.parallel {
        let pool = build_thread_pool(options.threads)?;
        pool.install(|| {
            (0..group_count)
                .into_par_iter()
                .map(render_group)
                .collect::<LaminateResult<Vec<_>>>()
        })
    } else {
        (0..group_count).map(render_group).collect()
    }
}

/// Confirm a single shared pixel resolution across every resolved image.
///
/// Full pre-scan: every image header is read before any compositing begins.
/// An empty set of images is [`LaminateError::NoImagesFound`]; more than one
/// distinct resolution is [`LaminateError::ResolutionMismatch`].
pub fn validate_resolutions(slots: &[ResolvedSlot]) -> LaminateResult<Resolution> {
    let mut found = BTreeSet::new();
    for slot in slots {
        for path in &slot.images {
            found.insert(probe_resolution(path)?);
        }
    }

    let mut found = found.into_iter();
    match (found.next(), found.next()) {
        (None, _) => Err(LaminateError::NoImagesFound),
        (Some(only), None) => Ok(only),
        (Some(first), Some(second)) => {
            let mut all = vec![first, second];
            all.extend(found);
            Err(LaminateError::ResolutionMismatch { found: all })
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> LaminateResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LaminateError::validation(
            "compile options 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LaminateError::validation(format!("failed to build rayon thread pool: {e}")))
}
