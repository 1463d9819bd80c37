//! Engine-wide constants for page geometry and map defaults.
//! Keeping them in a single place makes it easier to tweak the print defaults.

/// PDF page units (points) per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Map block width in points when the layout does not set one.
pub const DEFAULT_MAP_WIDTH: u32 = 340;

/// Map block height in points when the layout does not set one.
pub const DEFAULT_MAP_HEIGHT: u32 = 453;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Inches per metre.
pub const INCHES_PER_METER: f64 = 39.370_078_740_157_48;

/// Inches per degree of longitude at the equator (WGS84 semi-major axis).
pub const INCHES_PER_DEGREE: f64 = 4_374_754.0;

/// Page size used when a layout omits one (A4 portrait, in points).
pub const DEFAULT_PAGE_SIZE: (f64, f64) = (595.0, 842.0);

/// Page margin used when a layout omits one, in points.
pub const DEFAULT_PAGE_MARGIN: f64 = 40.0;
