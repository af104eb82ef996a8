//! Extrusion settings.

/// Parameters for [`crate::Path::extrude`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudeConfig {
    /// Wall height; the bevel starts here.
    pub height: f64,
    /// Horizontal distance the bevel reaches in from the wall.
    pub bevel_offset: f64,
    /// Bevel slope in degrees (45 rises as far as it reaches in).
    pub bevel_angle_degrees: f64,
    /// Maximum tangent turn between wall/bevel slices on curves.
    /// Lower = smoother curves, more triangles.
    pub max_angle_degrees: f64,
    /// Orient rings with [`crate::Path::auto_flip_normals`] before generating.
    pub auto_flip_normals: bool,
}

impl Default for ExtrudeConfig {
    fn default() -> Self {
        Self {
            height: 4.0,
            bevel_offset: 1.0,
            bevel_angle_degrees: 45.0,
            max_angle_degrees: 10.0,
            auto_flip_normals: true,
        }
    }
}

impl ExtrudeConfig {
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_bevel(mut self, offset: f64, angle_degrees: f64) -> Self {
        self.bevel_offset = offset;
        self.bevel_angle_degrees = angle_degrees;
        self
    }

    pub fn with_max_angle(mut self, degrees: f64) -> Self {
        self.max_angle_degrees = degrees;
        self
    }

    pub fn with_auto_flip(mut self, enabled: bool) -> Self {
        self.auto_flip_normals = enabled;
        self
    }

    /// How far the bevel climbs above the wall top.
    pub fn bevel_rise(&self) -> f64 {
        self.bevel_offset * self.bevel_angle_degrees.to_radians().tan()
    }

    /// Height of the bevel cap.
    pub fn bevel_z(&self) -> f64 {
        self.height + self.bevel_rise()
    }
}
