use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::render::renderer::camera::Camera;
use crate::render::renderer::light::PointLight;

/// Identity of a viewpoint. Carries the id of the registry that created it,
/// so an id from one registry never matches a viewpoint of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewpointId {
    pub(super) registry: u32,
    pub(super) serial: u32,
}

/// Identity of a viewpoint's marker, the handle picking hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId {
    pub(super) registry: u32,
    pub(super) serial: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Cone,
    Sphere,
}

/// Visual label of a viewpoint; also the pick target.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    pub shape: MarkerShape,
    pub position: Vec3,
    pub rotation: Vec3, // XYZ Euler, radians
    pub tint: Vec3,
    /// Height the idle bob accumulates on; hover motion is an offset from it.
    pub(crate) baseline_y: f32,
}

impl Marker {
    pub(super) fn new(id: MarkerId, shape: MarkerShape, position: Vec3) -> Self {
        Self {
            id,
            shape,
            position,
            rotation: Vec3::ZERO,
            tint: Vec3::ONE,
            baseline_y: position.y,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn baseline_y(&self) -> f32 {
        self.baseline_y
    }

    pub fn model(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_rotation_translation(rot, self.position)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewpoint {
    id: ViewpointId,
    pub position: Vec3,
    pub orientation: Vec3,
    pub camera: Camera,
    pub marker: Marker,
    pub(super) highlight: Option<PointLight>,
}

impl Viewpoint {
    pub(super) fn new(
        id: ViewpointId,
        marker_id: MarkerId,
        position: Vec3,
        orientation: Vec3,
        shape: MarkerShape,
        lens: &Camera,
    ) -> Self {
        Self {
            id,
            position,
            orientation,
            camera: lens.clone().with_pose(position, orientation),
            marker: Marker::new(marker_id, shape, position),
            highlight: None,
        }
    }

    pub fn id(&self) -> ViewpointId {
        self.id
    }

    pub fn highlight(&self) -> Option<&PointLight> {
        self.highlight.as_ref()
    }
}
