use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::navigation::{MarkerAnimator, MarkerDims, MarkerShape, ModelTransform, SceneSettings};
use crate::render::renderer::camera::Camera;
use crate::render::renderer::light::{AmbientLight, PointLight};

/// Where the viewer config is served from.
pub const CONFIG_URL: &str = "/assets/viewer.json";

/// Scene description loaded at startup. Every field has a default, so a
/// partial (or missing) `viewer.json` still yields the full rover scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub model_url: String,
    pub background_url: Option<String>,
    pub model: ModelPreset,
    pub home: CameraPreset,
    /// Lens shared by every viewpoint camera; its pose is ignored.
    pub lens: CameraPreset,
    pub viewpoints: Vec<ViewpointPreset>,
    pub key_light: LightPreset,
    pub ambient: AmbientPreset,
    pub markers: MarkerStyle,
    pub preview: PreviewSize,
    pub debug_panel: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let mut viewpoints = vec![ViewpointPreset {
            position: [3.0, 3.3, 0.0],
            rotation: [0.0, 0.0, 0.0],
            shape: MarkerShape::Sphere,
            highlight: false,
            turns: vec![Turn::Yaw(90.0), Turn::Pitch(320.0)],
        }];

        viewpoints.extend([1.1, 0.0, -1.1].map(|z| ViewpointPreset {
            position: [3.0, 0.23, z],
            rotation: [0.0, 7.88, 0.0],
            shape: MarkerShape::Cone,
            highlight: true,
            turns: Vec::new(),
        }));

        Self {
            model_url: "/assets/Perseverance.glb".into(),
            background_url: Some("/assets/background_panorama_blurred.jpg".into()),
            model: ModelPreset::default(),
            home: CameraPreset {
                position: [7.07, 1.56, 7.07],
                rotation: [0.0, 0.73, 0.0],
                fov_y_deg: 50.0,
                ..CameraPreset::default()
            },
            lens: CameraPreset::default(),
            viewpoints,
            key_light: LightPreset::default(),
            ambient: AmbientPreset::default(),
            markers: MarkerStyle::default(),
            preview: PreviewSize::default(),
            debug_panel: true,
        }
    }
}

impl ViewerConfig {
    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            model: ModelTransform {
                position: self.model.position.into(),
                rotation: self.model.rotation.into(),
                scale: self.model.scale,
            },
            key_light: PointLight {
                color: self.key_light.color.into(),
                intensity: self.key_light.intensity,
                ..PointLight::at(self.key_light.position.into())
            },
            ambient: AmbientLight {
                color: self.ambient.color.into(),
                intensity: self.ambient.intensity,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPreset {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: f32,
}

impl Default for ModelPreset {
    fn default() -> Self {
        Self { position: [0.0; 3], rotation: [0.0; 3], scale: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPreset {
    pub position: [f32; 3],
    pub rotation: [f32; 3], // XYZ Euler, radians
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraPreset {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            fov_y_deg: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraPreset {
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::perspective(self.fov_y_deg, aspect, self.near, self.far)
            .with_pose(self.position.into(), self.rotation.into())
    }
}

/// Extra turn around the camera's own axis, in degrees, applied after the pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Yaw(f32),
    Pitch(f32),
}

impl Turn {
    pub fn apply(&self, camera: &mut Camera) {
        match *self {
            Turn::Yaw(deg) => camera.rotate_y(deg.to_radians()),
            Turn::Pitch(deg) => camera.rotate_x(deg.to_radians()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewpointPreset {
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    pub shape: MarkerShape,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub turns: Vec<Turn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightPreset {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for LightPreset {
    fn default() -> Self {
        Self { position: [4.0, 12.0, 8.0], color: [1.0; 3], intensity: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientPreset {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for AmbientPreset {
    fn default() -> Self {
        Self { color: [1.0; 3], intensity: 0.3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub inactive_color: [f32; 3],
    pub hover_color: [f32; 3],
    pub yaw_deg_per_sec: f32,
    pub cone_radius: f32,
    pub cone_height: f32,
    pub cone_segments: u32,
    pub sphere_radius: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        let animator = MarkerAnimator::default();
        let dims = MarkerDims::default();
        Self {
            inactive_color: animator.inactive_tint.into(),
            hover_color: animator.hover_tint.into(),
            yaw_deg_per_sec: animator.yaw_rate.to_degrees(),
            cone_radius: dims.cone_radius,
            cone_height: dims.cone_height,
            cone_segments: dims.cone_segments,
            sphere_radius: dims.sphere_radius,
        }
    }
}

impl MarkerStyle {
    pub fn animator(&self) -> MarkerAnimator {
        MarkerAnimator {
            yaw_rate: self.yaw_deg_per_sec.to_radians(),
            inactive_tint: Vec3::from(self.inactive_color),
            hover_tint: Vec3::from(self.hover_color),
        }
    }

    pub fn dims(&self) -> MarkerDims {
        MarkerDims {
            cone_radius: self.cone_radius,
            cone_height: self.cone_height,
            cone_segments: self.cone_segments,
            sphere_radius: self.sphere_radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self { width: 240, height: 160 }
    }
}
