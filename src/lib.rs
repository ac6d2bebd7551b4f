//! Batch compositor for social-media canvases.
//!
//! Every source photo is placed on a fixed-size canvas: a blurred, cover-fitted copy of the photo
//! fills the background, a translucent colour overlay dims it, and the untouched photo sits on top,
//! contain-fitted inside an optional border with an optional stroke around it. Results are encoded
//! as JPEG, named from a `{idx}`/`{stem}` pattern and handed over individually or as one ZIP.
//!
//! - Build [`ProcessingOptions`] (or start from a [`FormatPreset`])
//! - Feed [`SourceImage`]s to [`run`] / [`run_with_report`]
//! - Turn the [`OutputArtifact`]s into [`Deliverable`]s with [`package`]
#![forbid(unsafe_code)]

pub mod assets;
pub mod batch;
pub mod encode;
mod foundation;
pub mod layout;
pub mod naming;
pub mod options;
pub mod package;
pub mod render;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgb8, Rgba8Premul, Size};
pub use crate::foundation::error::{CanvasError, CanvasResult};

pub use crate::assets::decode::{decode_image, decode_source};
pub use crate::assets::source::{SourceImage, stem_of};
pub use crate::batch::orchestrator::{
    BatchReport, CancelFlag, OutputArtifact, SkippedItem, process_one, run, run_with_report,
};
pub use crate::encode::jpeg::{OUTPUT_EXTENSION, OUTPUT_MEDIA_TYPE, encode_jpeg, jpeg_quality};
pub use crate::layout::fit::{
    FitPlacement, background_placement, contain_fit, cover_fit, foreground_placement,
};
pub use crate::naming::resolve::{DEFAULT_PATTERN, resolve};
pub use crate::options::model::ProcessingOptions;
pub use crate::options::presets::{FORMAT_PRESETS, FormatPreset, find_preset};
pub use crate::package::archive::{
    DEFAULT_ARCHIVE_NAME, Deliverable, PackageMode, dedupe_names, package, write_archive,
};
pub use crate::render::pipeline::{CompositePass, PASS_ORDER, composite, composite_passes};
pub use crate::render::raster::Raster;
