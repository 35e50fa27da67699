use glam::{Vec2, Vec3};

use crate::meshes;
use crate::render::renderer::camera::{Camera, Ray};
use crate::render::renderer::mesh::CpuMesh;

use super::viewpoint::{Marker, MarkerId, MarkerShape};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub marker: MarkerId,
    pub distance: f32,
}

/// Marker dimensions. The renderer builds its GPU meshes from the same
/// geometry, so what is drawn is what can be hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerDims {
    pub cone_radius: f32,
    pub cone_height: f32,
    pub cone_segments: u32,
    pub sphere_radius: f32,
}

impl Default for MarkerDims {
    fn default() -> Self {
        Self {
            cone_radius: 0.3,
            cone_height: 0.3,
            cone_segments: 8,
            sphere_radius: 0.2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarkerGeometry {
    cone: CpuMesh,
    cone_radius: f32,
    sphere: CpuMesh,
    sphere_radius: f32,
}

impl MarkerGeometry {
    pub fn new(dims: MarkerDims) -> Self {
        let cone = meshes::cone(dims.cone_radius, dims.cone_height, dims.cone_segments);
        let sphere = meshes::sphere(dims.sphere_radius, 16, 12);
        Self {
            cone_radius: cone.bounding_radius(),
            sphere_radius: sphere.bounding_radius(),
            cone,
            sphere,
        }
    }

    pub fn mesh(&self, shape: MarkerShape) -> &CpuMesh {
        match shape {
            MarkerShape::Cone => &self.cone,
            MarkerShape::Sphere => &self.sphere,
        }
    }

    fn bounds(&self, shape: MarkerShape) -> f32 {
        match shape {
            MarkerShape::Cone => self.cone_radius,
            MarkerShape::Sphere => self.sphere_radius,
        }
    }
}

impl Default for MarkerGeometry {
    fn default() -> Self {
        Self::new(MarkerDims::default())
    }
}

pub struct PickingService {
    geometry: MarkerGeometry,
}

impl PickingService {
    pub fn new(geometry: MarkerGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &MarkerGeometry {
        &self.geometry
    }

    /// Nearest marker under the pointer, seen through `camera`.
    pub fn pick_ndc<'a>(
        &self,
        camera: &Camera,
        ndc: Vec2,
        markers: impl IntoIterator<Item = &'a Marker>,
    ) -> Option<PickHit> {
        self.pick(&camera.ray_from_ndc(ndc), markers)
    }

    pub fn pick<'a>(&self, ray: &Ray, markers: impl IntoIterator<Item = &'a Marker>) -> Option<PickHit> {
        markers
            .into_iter()
            .filter_map(|m| {
                self.intersect(ray, m)
                    .map(|distance| PickHit { marker: m.id(), distance })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn intersect(&self, ray: &Ray, marker: &Marker) -> Option<f32> {
        if !hits_sphere(ray, marker.position, self.geometry.bounds(marker.shape)) {
            return None;
        }

        // test in marker space, report world distance
        let model = marker.model();
        let inv = model.inverse();
        let local = Ray {
            origin: inv.transform_point3(ray.origin),
            direction: inv.transform_vector3(ray.direction),
        };

        self.geometry
            .mesh(marker.shape)
            .triangles()
            .filter_map(|tri| intersect_triangle(&local, tri))
            .map(|t| (model.transform_point3(local.at(t)) - ray.origin).length())
            .min_by(f32::total_cmp)
    }
}

impl Default for PickingService {
    fn default() -> Self {
        Self::new(MarkerGeometry::default())
    }
}

fn hits_sphere(ray: &Ray, center: Vec3, radius: f32) -> bool {
    let oc = center - ray.origin;
    let along = oc.dot(ray.direction);
    let closest_sq = oc.length_squared() - along * along;
    closest_sq <= radius * radius && (along >= 0.0 || oc.length_squared() <= radius * radius)
}

/// Möller-Trumbore, double sided. Returns the ray parameter of the hit.
fn intersect_triangle(ray: &Ray, [a, b, c]: [Vec3; 3]) -> Option<f32> {
    const EPS: f32 = 1e-7;

    let e1 = b - a;
    let e2 = c - a;
    let p = ray.direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(e1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    (t > EPS).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::registry::NavigationRegistry;
    use approx::assert_relative_eq;

    // slightly off axis so the ray never grazes a shared edge
    fn ray_down_z() -> Ray {
        Ray { origin: Vec3::new(0.013, 0.021, 10.0), direction: Vec3::NEG_Z }
    }

    #[test]
    fn nearest_marker_wins() {
        let mut reg = NavigationRegistry::new(Camera::default(), Camera::default());
        let far = reg.add_viewpoint(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO, MarkerShape::Sphere).marker.id();
        let near = reg.add_viewpoint(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, MarkerShape::Cone).marker.id();

        let picker = PickingService::default();
        let hit = picker.pick(&ray_down_z(), reg.markers()).unwrap();

        assert_eq!(hit.marker, near);
        assert_ne!(hit.marker, far);
        // crosses the cone at half height, where it is 0.15 wide
        assert!(hit.distance > 7.6 && hit.distance < 8.0, "distance {}", hit.distance);
    }

    #[test]
    fn sphere_hit_distance_is_radius_short_of_center() {
        let mut reg = NavigationRegistry::new(Camera::default(), Camera::default());
        reg.add_viewpoint(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO, MarkerShape::Sphere);

        let picker = PickingService::default();
        let hit = picker.pick(&ray_down_z(), reg.markers()).unwrap();
        assert_relative_eq!(hit.distance, 9.8, epsilon = 1e-2);
    }

    #[test]
    fn miss_returns_none() {
        let mut reg = NavigationRegistry::new(Camera::default(), Camera::default());
        reg.add_viewpoint(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, MarkerShape::Cone);

        let picker = PickingService::default();
        assert!(picker.pick(&ray_down_z(), reg.markers()).is_none());
        assert!(picker.pick(&ray_down_z(), std::iter::empty()).is_none());
    }

    #[test]
    fn pointer_at_screen_center_picks_marker_in_front_of_camera() {
        let home = Camera::perspective(50.0, 1.0, 0.1, 100.0)
            .with_pose(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let mut reg = NavigationRegistry::new(home, Camera::default());
        let id = reg.add_viewpoint(Vec3::ZERO, Vec3::ZERO, MarkerShape::Cone).marker.id();

        let picker = PickingService::default();
        let hit = picker.pick_ndc(reg.home_camera(), Vec2::ZERO, reg.markers());
        assert_eq!(hit.map(|h| h.marker), Some(id));

        let miss = picker.pick_ndc(reg.home_camera(), Vec2::new(0.9, 0.9), reg.markers());
        assert!(miss.is_none());
    }
}
