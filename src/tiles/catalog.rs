//! Resolutions and coverage of a cached tile layer

use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use crate::{PrintError, Result};
use std::fmt;

/// A resolution picked from a catalog: its position in the configured list and its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionInfo {
    pub index: usize,
    pub value: f64,
}

impl ResolutionInfo {
    pub fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }
}

impl fmt::Display for ResolutionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resolution #{} ({})", self.index, self.value)
    }
}

/// Everything needed to pick tiles out of a tile cache layer.
///
/// Built once per layer definition and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionCatalog {
    resolutions: Vec<f64>,
    width: u32,
    height: u32,
    bounds: Bounds,
    extension: String,
}

impl ResolutionCatalog {
    /// Builds a catalog from a whitespace separated resolution list and a
    /// `type/subtype` format string such as `image/png`.
    pub fn from_text(
        resolutions: &str,
        width: u32,
        height: u32,
        bounds: Bounds,
        format: &str,
    ) -> Result<Self> {
        let values = resolutions
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    PrintError::invalid_configuration(format!(
                        "resolution '{}' is not a number",
                        token
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let extension = extension_from_format(format)?;
        Self::new(values, width, height, bounds, extension)
    }

    /// Builds a catalog from already parsed resolutions and a known file extension.
    pub fn new(
        resolutions: Vec<f64>,
        width: u32,
        height: u32,
        bounds: Bounds,
        extension: impl Into<String>,
    ) -> Result<Self> {
        if resolutions.is_empty() {
            return Err(PrintError::invalid_configuration(
                "a tile layer needs at least one resolution",
            ));
        }
        if !bounds.is_valid() {
            return Err(PrintError::invalid_configuration(format!(
                "inverted tile layer extent {:?}",
                bounds
            )));
        }

        let catalog = Self {
            resolutions,
            width,
            height,
            bounds,
            extension: extension.into(),
        };
        log::debug!("built {}", catalog);
        Ok(catalog)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resolutions(&self) -> &[f64] {
        &self.resolutions
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn min_x(&self) -> f64 {
        self.bounds.min.x
    }

    pub fn min_y(&self) -> f64 {
        self.bounds.min.y
    }

    /// Largest configured resolution not above `target`.
    ///
    /// The list is scanned from its last entry down to its first, so among equal
    /// candidates the one with the highest index wins. When every resolution is
    /// above `target` the last entry is returned whatever its value.
    pub fn nearest_resolution(&self, target: f64) -> ResolutionInfo {
        let last = self.resolutions.len() - 1;
        let mut best: Option<ResolutionInfo> = None;
        for (index, &value) in self.resolutions.iter().enumerate().rev() {
            if value > target {
                continue;
            }
            if best.map_or(true, |current| value > current.value) {
                best = Some(ResolutionInfo::new(index, value));
            }
        }
        best.unwrap_or_else(|| ResolutionInfo::new(last, self.resolutions[last]))
    }

    /// True when both corners lie inside the layer extent, edges included.
    pub fn is_visible(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> bool {
        self.bounds
            .contains_bounds(&Bounds::new(Point::new(x1, y1), Point::new(x2, y2)))
    }
}

impl fmt::Display for ResolutionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tile catalog {}x{} {} extent=[{}, {}, {}, {}] resolutions={:?}",
            self.width,
            self.height,
            self.extension,
            self.bounds.min.x,
            self.bounds.min.y,
            self.bounds.max.x,
            self.bounds.max.y,
            self.resolutions
        )
    }
}

/// Pulls the subtype out of `type/subtype`, lower-cased, with `jpg` spelled `jpeg`.
fn extension_from_format(format: &str) -> Result<String> {
    let invalid = || {
        PrintError::invalid_configuration(format!(
            "format '{}' is not of the form type/subtype",
            format
        ))
    };
    let (kind, subtype) = format.split_once('/').ok_or_else(invalid)?;
    if kind.is_empty() || subtype.is_empty() || subtype.contains('/') {
        return Err(invalid());
    }

    let extension = subtype.to_lowercase();
    Ok(if extension == "jpg" {
        "jpeg".to_string()
    } else {
        extension
    })
}
