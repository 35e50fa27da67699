use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};

/// Perspective camera posed by a position and a quaternion orientation.
///
/// Rotations follow the usual scene-graph convention: Euler angles are
/// applied in XYZ order and the camera looks down its local -Z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3, // normalized
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            orientation: Quat::IDENTITY,
            fov_y_deg: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn perspective(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov_y_deg,
            aspect,
            near,
            far,
        }
    }

    pub fn with_pose(mut self, position: Vec3, euler: Vec3) -> Self {
        self.position = position;
        self.set_euler(euler);
        self
    }

    pub fn set_euler(&mut self, euler: Vec3) {
        self.orientation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
    }

    pub fn euler(&self) -> Vec3 {
        let (x, y, z) = self.orientation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Turn around the camera's own X axis.
    pub fn rotate_x(&mut self, angle: f32) {
        self.orientation = (self.orientation * Quat::from_rotation_x(angle)).normalize();
    }

    /// Turn around the camera's own Y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        self.orientation = (self.orientation * Quat::from_rotation_y(angle)).normalize();
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn world(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    pub fn view(&self) -> Mat4 {
        self.world().inverse()
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray through a point given in normalized device coordinates
    /// (x right, y up, both in -1..1).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();

        // wgpu clip space keeps depth in 0..1
        let near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Ray {
            origin: near,
            direction: (far - near).normalize_or(self.forward()),
        }
    }
}
