use std::fmt::{self, Display, Formatter};

use glam::Vec3;

use crate::core::{Mesh, Transform};

/// Radians per second the demo animation advances by.
pub const SPIN_RATE: f32 = 1.2;

#[derive(Clone, Debug)]
pub struct Entity {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Transform,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Entity: {:?}", self.name)
    }
}

impl Entity {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform: Transform::default(),
        }
    }
}

/// The ordered list of meshes drawn each frame, together with their animation state.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub entities: Vec<Entity>,
    pub theta: f32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// A spinning cube at the origin and an octahedron circling it.
    pub fn demo() -> Self {
        Self::demo_with(Mesh::cube())
    }

    /// Same layout as [`Scene::demo`] with `primary` in place of the cube.
    pub fn demo_with(primary: Mesh) -> Self {
        let mut scene = Scene::new();
        scene.add_entity(Entity::new("cube", primary));
        let mut octa = Entity::new("octahedron", Mesh::octahedron());
        octa.transform.translation = Vec3::new(0.0, 0.0, 3.0);
        scene.add_entity(octa);
        scene.apply_theta();
        scene
    }

    /// Advances the animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.theta += SPIN_RATE * dt;
        self.apply_theta();
    }

    fn apply_theta(&mut self) {
        let theta = self.theta;
        if let Some(primary) = self.entities.get_mut(0) {
            primary.transform.rotation = Vec3::new(theta, theta * 2.0, theta * 3.0);
        }
        if let Some(octa) = self.entities.get_mut(1) {
            octa.transform.rotation = Vec3::new(0.0, theta * 3.0, 0.0);
        }
    }

    pub fn primary_mut(&mut self) -> Option<&mut Entity> {
        self.entities.first_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_layout() {
        let scene = Scene::demo();
        assert_eq!(scene.entities.len(), 2);
        assert_eq!(scene.entities[0].name, "cube");
        assert_eq!(scene.entities[1].transform.translation, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn advance_drives_both_rotations() {
        let mut scene = Scene::demo();
        scene.advance(0.5);
        let theta = SPIN_RATE * 0.5;
        assert_eq!(
            scene.entities[0].transform.rotation,
            Vec3::new(theta, theta * 2.0, theta * 3.0)
        );
        assert_eq!(scene.entities[1].transform.rotation, Vec3::new(0.0, theta * 3.0, 0.0));
    }
}
