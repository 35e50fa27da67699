use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::render::renderer::camera::Camera;
use crate::render::renderer::light::{AmbientLight, PointLight};

use super::registry::NavigationRegistry;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelTransform {
    pub position: Vec3,
    pub rotation: Vec3, // XYZ Euler, radians
    pub scale: f32,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self { position: Vec3::ZERO, rotation: Vec3::ZERO, scale: 1.0 }
    }
}

impl ModelTransform {
    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rot, self.position)
    }
}

/// Everything in the scene that is not navigation: the loaded model and
/// the scene lights. Debug sliders edit these fields directly.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    pub model: ModelTransform,
    pub key_light: PointLight,
    pub ambient: AmbientLight,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            model: ModelTransform::default(),
            key_light: PointLight::at(Vec3::new(4.0, 12.0, 8.0)),
            ambient: AmbientLight::default(),
        }
    }
}

/// Read-only snapshot handed to the renderer for one draw.
#[derive(Clone, Copy)]
pub struct SceneView<'a> {
    pub registry: &'a NavigationRegistry,
    pub settings: &'a SceneSettings,
}

impl SceneView<'_> {
    /// Key light first, then viewpoint highlights in registry order.
    pub fn point_lights(&self) -> impl Iterator<Item = &PointLight> {
        std::iter::once(&self.settings.key_light).chain(self.registry.highlight_lights())
    }
}

/// Sub-rectangle of the surface in surface pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

pub trait SceneRenderer {
    /// Draw the whole surface from `camera`.
    fn render_main(&mut self, scene: &SceneView<'_>, camera: &Camera);

    /// Draw over `rect` only, on top of the main view of the same frame.
    fn render_preview(&mut self, scene: &SceneView<'_>, camera: &Camera, rect: PreviewRect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::viewpoint::MarkerShape;

    #[test]
    fn key_light_comes_before_highlights() {
        let mut reg = NavigationRegistry::new(Camera::default(), Camera::default());
        let id = reg.add_viewpoint(Vec3::new(3.0, 0.23, 1.1), Vec3::ZERO, MarkerShape::Cone).id();
        reg.add_viewpoint(Vec3::new(3.0, 3.3, 0.0), Vec3::ZERO, MarkerShape::Sphere);
        reg.highlight_viewpoint(id);

        let settings = SceneSettings::default();
        let view = SceneView { registry: &reg, settings: &settings };

        let positions: Vec<_> = view.point_lights().map(|l| l.position).collect();
        assert_eq!(positions, vec![Vec3::new(4.0, 12.0, 8.0), Vec3::new(3.0, 0.23, 1.1)]);
    }

    #[test]
    fn model_matrix_scales_then_moves() {
        let model = ModelTransform { position: Vec3::new(0.0, -0.79, 0.0), rotation: Vec3::ZERO, scale: 0.6 };
        let p = model.matrix().transform_point3(Vec3::ONE);
        assert!(p.abs_diff_eq(Vec3::new(0.6, -0.19, 0.6), 1e-5));
    }
}
