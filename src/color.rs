/// Color triple in (blue, green, red) channel order
pub type Bgr = [u8; 3];

/// Mean color reported for a torso with no usable pixels.
///
/// Saturated pitch green is never a plausible shirt color after the green band
/// was suppressed, so these samples gather in a cluster of their own.
pub const SENTINEL_COLOR: Bgr = [60, 250, 0];

/// Team colors reported while evidence is still being gathered.
pub const PLACEHOLDER_TEAM_A: Bgr = [255, 255, 255];
pub const PLACEHOLDER_TEAM_B: Bgr = [0, 0, 0];

/// The suppression marker; a pixel equal to it carries no color information.
pub const BLACK: Bgr = [0, 0, 0];
