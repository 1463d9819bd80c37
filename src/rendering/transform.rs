//! Mapping between map units and page points for one map block render

use crate::core::bounds::Bounds;
use crate::core::constants::POINTS_PER_INCH;
use crate::core::geo::{DistanceUnit, Point};
use crate::rendering::surface::Rect;
use crate::{PrintError, Result};
use nalgebra::{Matrix3, Point2, Rotation2, Vector2};

/// Page/map geometry of a single map block render.
///
/// Built fresh for every render call and never modified; overview maps derive a
/// zoomed-out copy with [`Transformer::with_scale_factor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transformer {
    center: Point,
    paper_width: f64,
    paper_height: f64,
    scale: f64,
    dpi: u32,
    unit: DistanceUnit,
    /// Radians, counter-clockwise
    rotation: f64,
}

impl Transformer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        center_x: f64,
        center_y: f64,
        paper_width: f64,
        paper_height: f64,
        scale: f64,
        dpi: u32,
        unit: DistanceUnit,
        rotation: f64,
    ) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(PrintError::invalid_value("scale", scale));
        }
        if dpi == 0 {
            return Err(PrintError::invalid_value("dpi", dpi));
        }
        if !(paper_width > 0.0 && paper_height > 0.0) {
            return Err(PrintError::invalid_configuration(format!(
                "map area {}x{} is empty",
                paper_width, paper_height
            )));
        }
        if !(center_x.is_finite() && center_y.is_finite()) {
            return Err(PrintError::invalid_value(
                "center",
                format!("[{}, {}]", center_x, center_y),
            ));
        }
        if !rotation.is_finite() {
            return Err(PrintError::invalid_value("rotation", rotation));
        }

        Ok(Self {
            center: Point::new(center_x, center_y),
            paper_width,
            paper_height,
            scale,
            dpi,
            unit,
            rotation,
        })
    }

    /// Same view at `factor` times the scale, used by overview maps
    pub fn with_scale_factor(&self, factor: f64) -> Result<Self> {
        Self::new(
            self.center.x,
            self.center.y,
            self.paper_width,
            self.paper_height,
            self.scale * factor,
            self.dpi,
            self.unit,
            self.rotation,
        )
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Width of the map area in points
    pub fn paper_width(&self) -> f64 {
        self.paper_width
    }

    /// Height of the map area in points
    pub fn paper_height(&self) -> f64 {
        self.paper_height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Page points covering one map unit
    pub fn points_per_unit(&self) -> f64 {
        POINTS_PER_INCH * self.unit.inches_per_unit() / self.scale
    }

    pub fn geo_width(&self) -> f64 {
        self.paper_width / self.points_per_unit()
    }

    pub fn geo_height(&self) -> f64 {
        self.paper_height / self.points_per_unit()
    }

    /// Map units per output pixel
    pub fn resolution(&self) -> f64 {
        self.scale / (self.dpi as f64 * self.unit.inches_per_unit())
    }

    pub fn pixel_width(&self) -> u32 {
        (self.paper_width * self.dpi as f64 / POINTS_PER_INCH).round() as u32
    }

    pub fn pixel_height(&self) -> u32 {
        (self.paper_height * self.dpi as f64 / POINTS_PER_INCH).round() as u32
    }

    /// Unrotated view box in map units
    pub fn geo_bounds(&self) -> Bounds {
        Bounds::from_center_and_size(self.center, self.geo_width(), self.geo_height())
    }

    /// Corners of the area actually shown, in map units
    pub fn geo_polygon(&self) -> [Point; 4] {
        self.geo_bounds()
            .corners()
            .map(|corner| corner.rotate_around(&self.center, -self.rotation))
    }

    /// Axis-aligned box enclosing the rotated view
    pub fn rotated_geo_bounds(&self) -> Bounds {
        let (sin, cos) = self.rotation.sin_cos();
        let (width, height) = (self.geo_width(), self.geo_height());
        Bounds::from_center_and_size(
            self.center,
            (width * cos).abs() + (height * sin).abs(),
            (width * sin).abs() + (height * cos).abs(),
        )
    }

    /// Homogeneous matrix taking map coordinates into `rect` on the page.
    ///
    /// The map center lands on the rectangle center and the rotation turns
    /// around that point.
    pub fn geo_to_page(&self, rect: &Rect) -> Matrix3<f64> {
        let page_center = rect.center();
        let to_origin = Matrix3::new_translation(&Vector2::new(-self.center.x, -self.center.y));
        let rotate = Rotation2::new(self.rotation).to_homogeneous();
        let scale = Matrix3::new_nonuniform_scaling(&Vector2::new(
            self.points_per_unit(),
            self.points_per_unit(),
        ));
        let to_page = Matrix3::new_translation(&Vector2::new(page_center.x, page_center.y));
        to_page * scale * rotate * to_origin
    }

    pub fn page_to_geo(&self, rect: &Rect) -> Result<Matrix3<f64>> {
        self.geo_to_page(rect)
            .try_inverse()
            .ok_or_else(|| PrintError::Render("map transform is not invertible".to_string()))
    }

    pub fn map_to_page(&self, point: &Point, rect: &Rect) -> Point {
        apply(&self.geo_to_page(rect), point)
    }
}

/// Applies a homogeneous 2D matrix to a point
pub fn apply(matrix: &Matrix3<f64>, point: &Point) -> Point {
    let mapped = matrix.transform_point(&Point2::new(point.x, point.y));
    Point::new(mapped.x, mapped.y)
}
