use joistframe::{
    settings::Material,
    viewport::{MeshSpec, Placement, RenderBackend},
};
use nalgebra::Point3;

/// A mesh known only by its id and where it was last placed.
#[derive(Debug)]
pub struct LoggedMesh {
    pub id: u32,
    pub visible: bool,
    pub world_center: Option<Point3<f32>>,
}

/// A [RenderBackend] that draws nothing, and emits a [tracing] event for every call instead.
#[derive(Debug, Default)]
pub struct TracingBackend {
    next_id: u32,
    live: u32,
}

impl TracingBackend {
    /// Number of meshes created but not yet released.
    pub fn live(&self) -> u32 {
        self.live
    }
}

#[derive(Debug, thiserror::Error)]
#[error("ran out of mesh ids")]
pub struct OutOfIds;

impl RenderBackend for TracingBackend {
    type Mesh = LoggedMesh;
    type Error = OutOfIds;

    fn create_mesh(&mut self, spec: &MeshSpec) -> Result<Self::Mesh, Self::Error> {
        let id = self.next_id;
        self.next_id = self.next_id.checked_add(1).ok_or(OutOfIds)?;
        self.live += 1;
        tracing::debug!(
            id,
            size = ?spec.size,
            material = %spec.material,
            wireframe = spec.wireframe,
            visible = spec.visible,
            vertices = spec.vertex_count(),
            "create mesh"
        );
        Ok(LoggedMesh {
            id,
            visible: spec.visible,
            world_center: None,
        })
    }

    fn release_mesh(&mut self, mesh: Self::Mesh) {
        self.live -= 1;
        tracing::debug!(id = mesh.id, "release mesh");
    }

    fn set_material(&mut self, mesh: &mut Self::Mesh, material: Material, wireframe: bool) {
        tracing::debug!(id = mesh.id, %material, wireframe, "set material");
    }

    fn set_visible(&mut self, mesh: &mut Self::Mesh, visible: bool) {
        mesh.visible = visible;
        tracing::debug!(id = mesh.id, visible, "set visibility");
    }

    fn place(&mut self, mesh: &mut Self::Mesh, placement: &Placement) {
        mesh.world_center = placement.transform().map(|t| t * Point3::origin());
        tracing::trace!(id = mesh.id, world = ?mesh.world_center, "place mesh");
    }
}
