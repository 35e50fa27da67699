use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec3;

use crate::render::renderer::camera::Camera;
use crate::render::renderer::light::PointLight;

use super::direction::{resolve_directions, DirectionTarget};
use super::viewpoint::{Marker, MarkerId, MarkerShape, Viewpoint, ViewpointId};

static NEXT_REGISTRY: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveCamera {
    Home,
    Viewpoint(ViewpointId),
}

/// All navigable viewpoints plus the camera currently rendered.
///
/// `active` is always `Home` or the id of a viewpoint held here; the only way
/// to change it is through `activate_home` / `activate_viewpoint`.
pub struct NavigationRegistry {
    tag: u32,
    next_serial: u32,
    home: Camera,
    lens: Camera,
    viewpoints: Vec<Viewpoint>,
    active: ActiveCamera,
}

impl NavigationRegistry {
    /// `lens` supplies fov/aspect/clip planes for every viewpoint camera.
    pub fn new(home: Camera, lens: Camera) -> Self {
        Self {
            tag: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            next_serial: 0,
            home,
            lens,
            viewpoints: Vec::new(),
            active: ActiveCamera::Home,
        }
    }

    pub fn add_viewpoint(&mut self, position: Vec3, orientation: Vec3, shape: MarkerShape) -> &mut Viewpoint {
        let serial = self.next_serial;
        self.next_serial += 1;

        let id = ViewpointId { registry: self.tag, serial };
        let marker = MarkerId { registry: self.tag, serial };

        log::debug!("viewpoint #{serial} at {position} ({shape:?})");

        self.viewpoints
            .push(Viewpoint::new(id, marker, position, orientation, shape, &self.lens));
        let last = self.viewpoints.len() - 1;
        &mut self.viewpoints[last]
    }

    /// Attach a point light at the viewpoint's camera pose. Returns `None`
    /// when the viewpoint is not ours. A second call replaces the first light.
    pub fn highlight_viewpoint(&mut self, id: ViewpointId) -> Option<&PointLight> {
        let vp = self.viewpoint_mut(id)?;

        let mut light = PointLight::at(vp.camera.position);
        light.orientation = vp.camera.orientation;
        if vp.highlight.replace(light).is_some() {
            log::debug!("replacing highlight light of viewpoint #{}", id.serial);
        }

        vp.highlight.as_ref()
    }

    pub fn find_viewpoint_by_marker(&self, marker: MarkerId) -> Option<&Viewpoint> {
        self.viewpoints.iter().find(|vp| vp.marker.id() == marker)
    }

    pub fn viewpoint(&self, id: ViewpointId) -> Option<&Viewpoint> {
        self.viewpoints.iter().find(|vp| vp.id() == id)
    }

    pub fn viewpoint_mut(&mut self, id: ViewpointId) -> Option<&mut Viewpoint> {
        self.viewpoints.iter_mut().find(|vp| vp.id() == id)
    }

    pub fn contains(&self, id: ViewpointId) -> bool {
        self.viewpoint(id).is_some()
    }

    pub fn viewpoints(&self) -> &[Viewpoint] {
        &self.viewpoints
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.viewpoints.iter().map(|vp| &vp.marker)
    }

    pub fn markers_mut(&mut self) -> impl Iterator<Item = &mut Marker> {
        self.viewpoints.iter_mut().map(|vp| &mut vp.marker)
    }

    pub fn highlight_lights(&self) -> impl Iterator<Item = &PointLight> {
        self.viewpoints.iter().filter_map(Viewpoint::highlight)
    }

    pub fn home_camera(&self) -> &Camera {
        &self.home
    }

    pub fn home_camera_mut(&mut self) -> &mut Camera {
        &mut self.home
    }

    pub fn active(&self) -> ActiveCamera {
        self.active
    }

    pub fn is_home(&self) -> bool {
        self.active == ActiveCamera::Home
    }

    pub fn active_camera(&self) -> &Camera {
        match self.active {
            ActiveCamera::Home => &self.home,
            ActiveCamera::Viewpoint(id) => self
                .viewpoint(id)
                .map(|vp| &vp.camera)
                .unwrap_or(&self.home),
        }
    }

    pub fn activate_home(&mut self) {
        self.active = ActiveCamera::Home;
    }

    pub fn activate_viewpoint(&mut self, id: ViewpointId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.active = ActiveCamera::Viewpoint(id);
        true
    }

    /// Directional neighbours of the active camera.
    pub fn directions(&self) -> Vec<DirectionTarget> {
        resolve_directions(self.active_camera(), &self.viewpoints)
    }

    /// Window resize. Only the home camera follows the viewport, viewpoint
    /// cameras keep the aspect they were built with.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.home.set_aspect(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> NavigationRegistry {
        NavigationRegistry::new(Camera::default(), Camera::perspective(45.0, 1.5, 0.1, 100.0))
    }

    #[test]
    fn markers_resolve_back_to_their_viewpoint() {
        let mut reg = registry();
        let a = reg.add_viewpoint(Vec3::new(3.0, 0.23, 1.1), Vec3::ZERO, MarkerShape::Cone).id();
        let b = reg.add_viewpoint(Vec3::new(3.0, 3.3, 0.0), Vec3::ZERO, MarkerShape::Sphere).id();

        for id in [a, b] {
            let marker = reg.viewpoint(id).unwrap().marker.id();
            assert_eq!(reg.find_viewpoint_by_marker(marker).map(Viewpoint::id), Some(id));
        }
    }

    #[test]
    fn foreign_marker_is_not_found() {
        let mut reg = registry();
        reg.add_viewpoint(Vec3::ZERO, Vec3::ZERO, MarkerShape::Cone);

        let mut other = registry();
        let foreign = other.add_viewpoint(Vec3::ZERO, Vec3::ZERO, MarkerShape::Cone).marker.id();

        assert!(reg.find_viewpoint_by_marker(foreign).is_none());
    }

    #[test]
    fn highlight_rejects_foreign_viewpoint_without_mutation() {
        let mut reg = registry();
        reg.add_viewpoint(Vec3::ONE, Vec3::ZERO, MarkerShape::Cone);

        let mut other = registry();
        let foreign = other.add_viewpoint(Vec3::ONE, Vec3::ZERO, MarkerShape::Cone).id();

        assert!(reg.highlight_viewpoint(foreign).is_none());
        assert_eq!(reg.highlight_lights().count(), 0);
    }

    #[test]
    fn highlight_sits_on_the_camera_and_replaces() {
        let mut reg = registry();
        let id = reg.add_viewpoint(Vec3::new(3.0, 0.23, 0.0), Vec3::new(0.0, 7.88, 0.0), MarkerShape::Cone).id();

        let pos = reg.highlight_viewpoint(id).map(|l| l.position);
        assert_eq!(pos, Some(reg.viewpoint(id).unwrap().camera.position));

        reg.highlight_viewpoint(id);
        assert_eq!(reg.highlight_lights().count(), 1);
    }

    #[test]
    fn active_camera_only_switches_to_members() {
        let mut reg = registry();
        let id = reg.add_viewpoint(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, MarkerShape::Cone).id();

        let mut other = registry();
        let foreign = other.add_viewpoint(Vec3::ZERO, Vec3::ZERO, MarkerShape::Cone).id();

        assert!(!reg.activate_viewpoint(foreign));
        assert!(reg.is_home());

        assert!(reg.activate_viewpoint(id));
        assert_eq!(reg.active_camera().position, Vec3::new(1.0, 2.0, 3.0));

        reg.activate_home();
        assert_eq!(reg.active_camera(), reg.home_camera());
    }
}
