use std::f64::consts::PI;

use crate::angle::{clamp_pitch, wrap_yaw};

/// Camera pose for a rectilinear panorama view. All angles in radians;
/// `fov` is the vertical field of view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewPose {
    pub yaw: f64,
    pub pitch: f64,
    pub fov: f64,
}

impl ViewPose {
    pub fn new(yaw: f64, pitch: f64, fov: f64) -> Self {
        Self { yaw, pitch, fov }
    }
}

/// Viewport size in physical pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

/// Traditional rectilinear view limiter.
///
/// Composes three constraints:
/// - a resolution floor on the vertical fov, so zooming in never exceeds
///   one source pixel per screen pixel (`max_resolution` is the cube face
///   size in pixels, spanning 90° of arc);
/// - a ceiling on the vertical fov (`max_vfov`);
/// - a ceiling on the derived horizontal fov (`max_hfov`).
///
/// Pitch is clamped to straight up/down and yaw wraps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewLimits {
    pub max_resolution: u32,
    pub max_vfov: f64,
    pub max_hfov: f64,
}

impl ViewLimits {
    pub fn traditional(max_resolution: u32, max_vfov: f64, max_hfov: f64) -> Self {
        Self {
            max_resolution,
            max_vfov,
            max_hfov,
        }
    }

    /// Smallest vertical fov that keeps at least one source pixel per
    /// screen pixel for the given viewport.
    pub fn min_vfov(&self, viewport: Viewport) -> f64 {
        if self.max_resolution == 0 {
            return 0.0;
        }
        viewport.height as f64 * PI / (2.0 * self.max_resolution as f64)
    }

    /// Largest vertical fov whose derived horizontal fov stays within
    /// `max_hfov` at the viewport's aspect ratio.
    fn max_vfov_for_hfov(&self, viewport: Viewport) -> f64 {
        let aspect = viewport.aspect();
        if aspect <= 0.0 {
            return self.max_vfov;
        }
        2.0 * ((self.max_hfov / 2.0).tan() / aspect).atan()
    }

    /// Applies all limits to a pose. Deterministic and pure; the renderer
    /// receives only already-limited poses.
    pub fn clamp(&self, pose: ViewPose, viewport: Viewport) -> ViewPose {
        let upper = self.max_vfov.min(self.max_vfov_for_hfov(viewport)).min(PI);
        let lower = self.min_vfov(viewport).min(upper);
        ViewPose {
            yaw: wrap_yaw(pose.yaw),
            pitch: clamp_pitch(pose.pitch),
            fov: pose.fov.clamp(lower, upper),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewLimits, ViewPose, Viewport};
    use crate::angle::deg;
    use std::f64::consts::PI;

    fn limits() -> ViewLimits {
        ViewLimits::traditional(1024, deg(100.0), deg(120.0))
    }

    #[test]
    fn pose_within_limits_is_unchanged() {
        let vp = Viewport::new(800, 600);
        let pose = ViewPose::new(0.5, 0.2, deg(80.0));
        let out = limits().clamp(pose, vp);
        assert_eq!(out, pose);
    }

    #[test]
    fn fov_is_capped_by_max_vfov() {
        let vp = Viewport::new(600, 800);
        let out = limits().clamp(ViewPose::new(0.0, 0.0, deg(170.0)), vp);
        assert!(out.fov <= deg(100.0) + 1e-12);
    }

    #[test]
    fn wide_viewport_is_capped_by_max_hfov() {
        // At a 2:1 aspect the hfov ceiling binds before the vfov ceiling.
        let vp = Viewport::new(1600, 800);
        let out = limits().clamp(ViewPose::new(0.0, 0.0, deg(100.0)), vp);
        let hfov = 2.0 * ((out.fov / 2.0).tan() * vp.aspect()).atan();
        assert!(hfov <= deg(120.0) + 1e-9);
        assert!(out.fov < deg(100.0));
    }

    #[test]
    fn zooming_in_hits_the_resolution_floor() {
        let vp = Viewport::new(800, 600);
        let out = limits().clamp(ViewPose::new(0.0, 0.0, deg(1.0)), vp);
        let floor = 600.0 * PI / (2.0 * 1024.0);
        assert!((out.fov - floor).abs() < 1e-12);
    }

    #[test]
    fn pitch_clamps_and_yaw_wraps() {
        let vp = Viewport::new(800, 600);
        let out = limits().clamp(ViewPose::new(3.0 * PI, 2.0, deg(90.0)), vp);
        assert!((out.yaw - PI).abs() < 1e-12);
        assert_eq!(out.pitch, PI / 2.0);
    }

    #[test]
    fn zero_height_viewport_does_not_divide_by_zero() {
        let vp = Viewport::new(800, 0);
        let out = limits().clamp(ViewPose::new(0.0, 0.0, deg(90.0)), vp);
        assert!(out.fov.is_finite());
    }
}
