//! Ray intersection for weight marker picking and deck hit points.
//!
//! The pointer is turned into a world-space [`Ray`] by the renderer; everything
//! here is plain geometry so it can be tested without a window.

use glam::{Quat, Vec3};

use crate::constants::MARKER_RADIUS;
use crate::deformation::Segment;
use crate::engine::WeightPoint;
use crate::params::DeckParams;

/// Epsilon for floating point comparisons
const EPSILON: f32 = 1e-6;

/// World-space pointer ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Should be normalized
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of picking a weight marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightPick {
    pub index: usize,
    pub distance: f32,
}

/// Result of hitting the deck surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckHit {
    pub segment: usize,
    pub distance: f32,
    pub point: Vec3,
}

/// Ray-sphere intersection test.
/// Returns the distance to the closest intersection point, or None if no hit.
pub fn ray_sphere_intersection(ray: Ray, sphere_center: Vec3, sphere_radius: f32) -> Option<f32> {
    let oc = ray.origin - sphere_center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere_radius * sphere_radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 || a < EPSILON {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    if t1 > EPSILON {
        Some(t1)
    } else if t2 > EPSILON {
        Some(t2)
    } else {
        None
    }
}

/// Ray-box intersection (axis-aligned box).
pub fn ray_box_intersection(ray: Ray, box_center: Vec3, box_half_size: Vec3) -> Option<f32> {
    let min = box_center - box_half_size;
    let max = box_center + box_half_size;

    let inv = |d: f32| if d.abs() > EPSILON { 1.0 / d } else { f32::INFINITY };
    let inv_dir = Vec3::new(inv(ray.direction.x), inv(ray.direction.y), inv(ray.direction.z));

    let t1 = (min - ray.origin) * inv_dir;
    let t2 = (max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    if tmin > EPSILON {
        Some(tmin)
    } else if tmax > EPSILON {
        Some(tmax)
    } else {
        None
    }
}

/// Ray against a box rotated about Z (a deformed deck segment)
fn ray_segment_intersection(ray: Ray, segment: &Segment, half_size: Vec3) -> Option<f32> {
    let to_local = Quat::from_rotation_z(-segment.rotation_z);
    let local = Ray::new(
        to_local * (ray.origin - segment.position),
        to_local * ray.direction,
    );
    ray_box_intersection(local, Vec3::ZERO, half_size)
}

/// Nearest weight marker under the ray.
///
/// Each marker is a sphere of [`MARKER_RADIUS`] scaled by its current marker scale.
pub fn pick_weight_point(ray: Ray, points: &[WeightPoint]) -> Option<WeightPick> {
    points
        .iter()
        .filter_map(|point| {
            let radius = MARKER_RADIUS * point.marker_scale();
            ray_sphere_intersection(ray, point.position, radius).map(|distance| WeightPick {
                index: point.index,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Nearest deck surface point under the ray, honoring each segment's current pose
pub fn raycast_deck(ray: Ray, segments: &[Segment], params: &DeckParams) -> Option<DeckHit> {
    let half_size = Vec3::new(
        params.segment_length * 0.5,
        params.segment_height * 0.5,
        params.segment_width * 0.5,
    );

    segments
        .iter()
        .filter_map(|segment| {
            ray_segment_intersection(ray, segment, half_size).map(|distance| DeckHit {
                segment: segment.index,
                distance,
                point: ray.at(distance),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 100.0, z), Vec3::NEG_Y)
    }

    #[test]
    fn test_ray_sphere_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = ray_sphere_intersection(ray, Vec3::ZERO, 1.0);
        assert!(hit.is_some());
        assert!((hit.unwrap() - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_ray_sphere_miss() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 5.0), Vec3::NEG_Z);
        assert!(ray_sphere_intersection(ray, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_ray_sphere_behind_origin() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray_sphere_intersection(ray, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_ray_box_hit_top_face() {
        let hit = ray_box_intersection(down_at(0.0, 0.0), Vec3::ZERO, Vec3::splat(1.0));
        assert!((hit.unwrap() - 99.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_box_axis_parallel_miss() {
        assert!(ray_box_intersection(down_at(5.0, 0.0), Vec3::ZERO, Vec3::splat(1.0)).is_none());
    }

    #[test]
    fn test_pick_nearest_of_overlapping_markers() {
        let params = DeckParams::default();
        let mut near = WeightPoint::at_rest(0, &params);
        near.position = Vec3::new(0.0, 0.0, 10.0);
        let mut far = WeightPoint::at_rest(1, &params);
        far.position = Vec3::new(0.0, 0.0, -10.0);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z);
        let pick = pick_weight_point(ray, &[far, near]).expect("both in line");
        assert_eq!(pick.index, 0);
        assert!((pick.distance - 36.0).abs() < 1e-4);
    }

    #[test]
    fn test_heavier_marker_is_easier_to_hit() {
        let params = DeckParams::default();
        let mut point = WeightPoint::at_rest(0, &params);
        point.position = Vec3::ZERO;
        let ray = Ray::new(Vec3::new(6.0, 0.0, 50.0), Vec3::NEG_Z);

        assert!(pick_weight_point(ray, &[point]).is_none());
        point.weight = 0.5;
        assert!(pick_weight_point(ray, &[point]).is_some());
    }

    #[test]
    fn test_raycast_deck_hits_top_surface() {
        let params = DeckParams::default();
        let segments: Vec<Segment> = (0..params.segment_count)
            .map(|i| Segment::at_rest(i, &params))
            .collect();

        let hit = raycast_deck(down_at(0.0, 2.0), &segments, &params).expect("center of deck");
        assert_eq!(hit.segment, 7);
        assert!((hit.point.y - 3.0).abs() < 1e-4);

        let hit = raycast_deck(down_at(-175.0, 0.0), &segments, &params).expect("left end");
        assert_eq!(hit.segment, 0);

        assert!(raycast_deck(down_at(0.0, 20.0), &segments, &params).is_none());
    }

    #[test]
    fn test_raycast_deck_follows_sag() {
        let params = DeckParams::default();
        let mut segments: Vec<Segment> = (0..params.segment_count)
            .map(|i| Segment::at_rest(i, &params))
            .collect();
        let mut weights = vec![0.0; params.segment_count];
        weights[7] = 1.0;
        crate::deformation::deform_all(&weights, &mut segments, &params);

        let hit = raycast_deck(down_at(0.0, 0.0), &segments, &params).expect("center of deck");
        assert_eq!(hit.segment, 7);
        // tilted top face of a segment sunk by 8
        assert!(hit.point.y < 0.0);
        assert!(hit.point.y > -8.0);
    }
}
