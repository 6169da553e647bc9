//! Scene container.
//!
//! A [`Scene`] owns the meshes that get drawn. Meshes are added once and are
//! then addressed by the [`MeshId`] handed out on insertion. Nothing is ever
//! removed, so ids stay valid for the lifetime of the scene.

use crate::data_structures::mesh::Mesh;

/// Handle to a mesh owned by a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

#[derive(Clone, Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn mesh(&self, id: MeshId) -> &Mesh {
        &self.meshes[id.0]
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> &mut Mesh {
        &mut self.meshes[id.0]
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_address_their_mesh() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        let first = scene.add(Mesh::new(Default::default(), Default::default()));
        let second = scene.add(Mesh::new(Default::default(), Default::default()));
        scene.mesh_mut(second).rotation.y = 1.0;
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.mesh(first).rotation.y, 0.0);
        assert_eq!(scene.mesh(second).rotation.y, 1.0);
    }
}
