use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use crate::{
    assets::{decode::decode_source, source::SourceImage},
    encode::jpeg::encode_jpeg,
    foundation::error::{CanvasError, CanvasResult},
    naming::resolve::resolve,
    options::model::ProcessingOptions,
    render::pipeline::composite,
};

/// One finished output: encoded bytes plus the resolved file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Shared flag for abandoning a run between items.
///
/// Clones share state, so a UI thread can hold one clone and raise it while the run holds another.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A source that was attempted but produced no artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedItem {
    /// 1-based position in the batch.
    pub index: usize,
    /// Declared name of the source.
    pub name: String,
    /// Rendered error message.
    pub reason: String,
}

/// Result of a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Successful artifacts, in input order.
    pub artifacts: Vec<OutputArtifact>,
    /// Items that failed and were skipped, in input order.
    pub skipped: Vec<SkippedItem>,
}

/// State of one in-flight run. Only the orchestrator touches it.
struct BatchRun<'a> {
    sources: &'a [SourceImage],
    options: ProcessingOptions,
    pattern: &'a str,
    completed: usize,
    report: BatchReport,
}

impl BatchRun<'_> {
    fn total(&self) -> usize {
        self.sources.len()
    }

    fn progress(&self) -> f64 {
        if self.total() == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total() as f64
    }
}

/// Decode, composite, encode and name a single source.
///
/// `index` is the 1-based batch position used by `{idx}`.
pub fn process_one(
    source: &SourceImage,
    options: &ProcessingOptions,
    index: usize,
    pattern: &str,
) -> CanvasResult<OutputArtifact> {
    let raster = decode_source(source)?;
    let canvas = composite(&raster, options)?;
    let bytes = encode_jpeg(&canvas, options.quality)?;
    Ok(OutputArtifact {
        filename: resolve(pattern, index, &source.stem()),
        bytes,
    })
}

/// Process `sources` in order and return the artifacts that succeeded.
///
/// `on_progress` receives `attempted / total` after every item, ending at exactly `1.0`.
pub fn run(
    sources: &[SourceImage],
    options: &ProcessingOptions,
    pattern: &str,
    on_progress: impl FnMut(f64),
) -> CanvasResult<Vec<OutputArtifact>> {
    run_with_report(sources, options, pattern, &CancelFlag::default(), on_progress)
        .map(|report| report.artifacts)
}

/// Like [`run`], but also reports skipped items and honours `cancel` between items.
///
/// Options are validated once up front; an invalid option aborts before any item is touched.
/// Per-item failures are logged and skipped. A raised `cancel` flag stops the run before the
/// next item with [`CanvasError::Cancelled`].
#[tracing::instrument(skip_all, fields(items = sources.len(), pattern = pattern))]
pub fn run_with_report(
    sources: &[SourceImage],
    options: &ProcessingOptions,
    pattern: &str,
    cancel: &CancelFlag,
    mut on_progress: impl FnMut(f64),
) -> CanvasResult<BatchReport> {
    options.validate()?;

    let mut batch = BatchRun {
        sources,
        options: *options,
        pattern,
        completed: 0,
        report: BatchReport::default(),
    };

    if batch.total() == 0 {
        on_progress(batch.progress());
        return Ok(batch.report);
    }

    for (pos, source) in sources.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::info!(
                completed = batch.completed,
                total = batch.total(),
                "batch cancelled"
            );
            return Err(CanvasError::Cancelled {
                completed: batch.completed,
                total: batch.total(),
            });
        }

        let index = pos + 1;
        let started = Instant::now();
        match process_one(source, &batch.options, index, batch.pattern) {
            Ok(artifact) => {
                tracing::debug!(
                    index,
                    source = %source.name,
                    filename = %artifact.filename,
                    bytes = artifact.bytes.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "item done"
                );
                batch.report.artifacts.push(artifact);
            }
            Err(err) if err.is_item_recoverable() => {
                tracing::warn!(index, source = %source.name, error = %err, "skipping item");
                batch.report.skipped.push(SkippedItem {
                    index,
                    name: source.name.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => {
                tracing::error!(index, source = %source.name, error = %err, "aborting batch");
                return Err(err);
            }
        }

        batch.completed += 1;
        on_progress(batch.progress());
    }

    tracing::info!(
        produced = batch.report.artifacts.len(),
        skipped = batch.report.skipped.len(),
        "batch finished"
    );
    Ok(batch.report)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/orchestrator.rs"]
mod tests;
