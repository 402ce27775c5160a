//! Placement of a shape in the world, optionally relative to a parent node.

use ::glam::{DMat4, DQuat, DVec3};

/// Index of a free standing transform node owned by a [`crate::scene::Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformHandle(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
    /// units per second
    pub linear_velocity: DVec3,
    /// rotation applied per second
    pub angular_velocity: DQuat,
    /// pivot of the rotation in local coordinates
    pub rotation_origin: DVec3,
    /// pivot of the scaling in local coordinates
    pub scale_origin: DVec3,
    pub parent: Option<TransformHandle>,
    pub(crate) model: DMat4,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
            linear_velocity: DVec3::ZERO,
            angular_velocity: DQuat::IDENTITY,
            rotation_origin: DVec3::ZERO,
            scale_origin: DVec3::ZERO,
            parent: None,
            model: DMat4::IDENTITY,
        }
    }
}

impl Transform {
    pub fn at(position: DVec3) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_parent(mut self, parent: TransformHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// translate * scale about `scale_origin` * rotate about `rotation_origin`
    pub fn local_matrix(&self) -> DMat4 {
        let scale = DMat4::from_translation(self.scale_origin)
            * DMat4::from_scale(self.scale)
            * DMat4::from_translation(-self.scale_origin);
        let rotate = DMat4::from_translation(self.rotation_origin)
            * DMat4::from_quat(self.rotation)
            * DMat4::from_translation(-self.rotation_origin);
        DMat4::from_translation(self.position) * scale * rotate
    }

    /// Advance by `dt` seconds of linear and angular velocity
    pub fn integrate(&mut self, dt: f64) {
        self.position += self.linear_velocity * dt;
        if self.angular_velocity != DQuat::IDENTITY {
            let target = self.rotation * self.angular_velocity;
            self.rotation = self.rotation.slerp(target, dt).normalize();
        }
    }

    /// World matrix as of the last scene update
    pub fn model(&self) -> DMat4 {
        self.model
    }

    /// Compose the local matrix with the parent's world matrix and cache it
    pub(crate) fn resolve(&mut self, parent_model: Option<DMat4>) -> DMat4 {
        let local = self.local_matrix();
        self.model = match parent_model {
            Some(parent) => parent * local,
            None => local,
        };
        self.model
    }

    /// World position of the local origin
    pub fn world_position(&self) -> DVec3 {
        self.model.transform_point3(DVec3::ZERO)
    }
}
