//! Object space to region pixel projection
//!
//! Region coordinates follow the host convention: origin at the bottom-left
//! corner, y growing upwards.

use glam::{Mat4, Vec3};

use crate::host::Region;

/// Integer pixel position inside the region (y-up)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// View-projection times object world matrix. Order matters.
#[inline]
pub fn combined_transform(perspective: Mat4, object_world: Mat4) -> Mat4 {
    perspective * object_world
}

/// Project an object-space position to region pixels.
///
/// With `clip_behind_camera`, points with `w <= 0` return `None`. Without it
/// the perspective divide is applied unguarded and the result for such points
/// is meaningless (but never panics).
pub fn project_to_region(
    transform: &Mat4,
    co: Vec3,
    region: Region,
    clip_behind_camera: bool,
) -> Option<ScreenPoint> {
    let clip = *transform * co.extend(1.0);
    if clip_behind_camera && clip.w <= 0.0 {
        return None;
    }

    // dehomogenise
    let ndc = clip.truncate() / clip.w;

    let (mid_x, mid_y) = region.mid();
    let width = region.width as f32;
    let height = region.height as f32;
    Some(ScreenPoint {
        x: (mid_x + ndc.x * width / 2.0) as i32,
        y: (mid_y + ndc.y * height / 2.0) as i32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        Region::new(800, 600)
    }

    #[test]
    fn focal_center_lands_mid_region() {
        let transform = combined_transform(Mat4::IDENTITY, Mat4::IDENTITY);
        let p = project_to_region(&transform, Vec3::ZERO, region(), true).unwrap();
        assert_eq!(p, ScreenPoint { x: 400, y: 300 });
    }

    #[test]
    fn transforms_reducing_to_identity_center_too() {
        let object = Mat4::from_translation(Vec3::new(3.0, -2.0, 5.0));
        let view = object.inverse();
        let transform = combined_transform(view, object);
        let p = project_to_region(&transform, Vec3::ZERO, region(), true).unwrap();
        assert_eq!(p, ScreenPoint { x: 400, y: 300 });
    }

    #[test]
    fn ndc_corners_map_to_region_edges() {
        let transform = Mat4::IDENTITY;
        let p = project_to_region(&transform, Vec3::new(1.0, 1.0, 0.0), region(), true).unwrap();
        assert_eq!(p, ScreenPoint { x: 800, y: 600 });
        let p = project_to_region(&transform, Vec3::new(-0.5, -1.0, 0.0), region(), true).unwrap();
        assert_eq!(p, ScreenPoint { x: 200, y: 0 });
    }

    #[test]
    fn perspective_divide_is_applied() {
        let perspective = Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let region = Region::new(200, 200);
        let near = project_to_region(&perspective, Vec3::new(1.0, 0.0, -2.0), region, true).unwrap();
        let far = project_to_region(&perspective, Vec3::new(1.0, 0.0, -4.0), region, true).unwrap();
        // x/(-z) with a 90 degree fov: 0.5 and 0.25 of the half width
        assert!((near.x - 150).abs() <= 1, "near.x = {}", near.x);
        assert!((far.x - 125).abs() <= 1, "far.x = {}", far.x);
        assert!((near.y - 100).abs() <= 1);
    }

    #[test]
    fn behind_camera_is_clipped() {
        let perspective = Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let behind = Vec3::new(0.0, 0.0, 2.0);
        assert!(project_to_region(&perspective, behind, region(), true).is_none());
        // unguarded path still produces a value
        assert!(project_to_region(&perspective, behind, region(), false).is_some());
    }
}
