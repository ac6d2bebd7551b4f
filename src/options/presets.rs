use crate::foundation::core::Canvas;

/// A named canvas size for a common social media placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatPreset {
    /// Stable kebab-case identifier (CLI `--preset` value).
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub canvas: Canvas,
}

const fn preset(id: &'static str, label: &'static str, width: u32, height: u32) -> FormatPreset {
    FormatPreset {
        id,
        label,
        canvas: Canvas { width, height },
    }
}

/// Built-in presets, in display order.
pub const FORMAT_PRESETS: &[FormatPreset] = &[
    preset("instagram-portrait", "Instagram Portrait 4:5", 1080, 1350),
    preset("instagram-square", "Instagram Square 1:1", 1350, 1350),
    preset("instagram-story", "Instagram Story 9:16", 1080, 1920),
    preset("linkedin-cover", "LinkedIn Personal Cover", 1584, 396),
    preset("facebook-page-cover", "Facebook Page Cover", 1640, 664),
    preset("facebook-event", "Facebook Event Image", 1920, 1080),
    preset("facebook-group-header", "Facebook Group Header", 1640, 856),
    preset("youtube-thumbnail", "YouTube Thumbnail", 1280, 720),
    preset("youtube-profile", "YouTube Profile", 800, 800),
    preset("youtube-cover", "YouTube Cover", 2560, 1440),
    preset("twitter-profile", "Twitter Profile", 400, 400),
    preset("twitter-header", "Twitter Header", 1500, 500),
];

/// Look up a preset by id (case-insensitive).
pub fn find_preset(id: &str) -> Option<&'static FormatPreset> {
    FORMAT_PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id.trim()))
}
