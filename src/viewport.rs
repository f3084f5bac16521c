//! Viewport state and the controller that keeps it in sync with [FrameSettings].
//!
//! Nothing here draws anything: meshes are created, placed and released through a
//! [RenderBackend], and this module only decides *what* those meshes should be.

use nalgebra::{Point3, Similarity3, Translation3, UnitQuaternion, Vector3};
use parking_lot::Mutex;

use crate::{
    camera::OrthoCamera,
    frame::{layout_joist_centroids, JoistLayout},
    settings::{
        CommitAction, DegeneratePolicy, DisplayMode, FrameSettings, Material, Real, SettingEdit,
    },
    Degeneracy, Error,
};

/// Everything a backend needs to create a box mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshSpec {
    pub size: Vector3<Real>,
    pub material: Material,
    pub wireframe: bool,
    pub visible: bool,
}

impl MeshSpec {
    /// Vertices in a box mesh: 4 per face, since faces don't share normals.
    pub const BOX_VERTICES: usize = 24;

    #[inline]
    pub fn vertex_count(&self) -> usize {
        Self::BOX_VERTICES
    }
}

/// Where a mesh sits in the scene.
///
/// `center` is the mesh's position before the viewport's scale & rotation are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub center: Point3<Real>,
    pub rotation_y: Real,
    pub scale: Real,
}

impl Placement {
    /// The full model transform: translate to `center`, then scale, then rotate about y.
    ///
    /// `None` if `scale` is zero or not finite, since no similarity flattens the mesh.
    pub fn transform(&self) -> Option<Similarity3<Real>> {
        (self.scale.is_finite() && self.scale != 0.0).then(|| {
            Similarity3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.rotation_y),
                self.scale,
            ) * Translation3::from(self.center.coords)
        })
    }
}

/// The drawing side of a viewport.
pub trait RenderBackend {
    type Mesh;
    type Error: std::fmt::Display;

    fn create_mesh(&mut self, spec: &MeshSpec) -> Result<Self::Mesh, Self::Error>;
    /// Free every resource held by `mesh`.
    fn release_mesh(&mut self, mesh: Self::Mesh);
    fn set_material(&mut self, mesh: &mut Self::Mesh, material: Material, wireframe: bool);
    fn set_visible(&mut self, mesh: &mut Self::Mesh, visible: bool);
    fn place(&mut self, mesh: &mut Self::Mesh, placement: &Placement);
}

/// The meshes currently owned by a viewport, and how they are shown.
#[derive(Debug)]
pub struct ViewportState<M> {
    box_mesh: Option<M>,
    members: Vec<M>,
    layout: Option<JoistLayout<Real>>,
    mode: DisplayMode,
    rotation_y: Real,
    scale: Real,
}

impl<M> ViewportState<M> {
    fn empty(mode: DisplayMode, scale: Real) -> Self {
        Self {
            box_mesh: None,
            members: Vec::new(),
            layout: None,
            mode,
            rotation_y: 0.0,
            scale,
        }
    }

    #[inline]
    pub fn box_mesh(&self) -> Option<&M> {
        self.box_mesh.as_ref()
    }

    /// Member meshes, index-aligned with [layout](Self::layout)'s centroids.
    #[inline]
    pub fn members(&self) -> &[M] {
        &self.members
    }

    /// The layout the member meshes were placed from. `None` only after a backend failure.
    #[inline]
    pub fn layout(&self) -> Option<&JoistLayout<Real>> {
        self.layout.as_ref()
    }

    #[inline]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[inline]
    pub fn rotation_y(&self) -> Real {
        self.rotation_y
    }

    #[inline]
    pub fn scale(&self) -> Real {
        self.scale
    }

    /// Vertices of everything currently visible.
    pub fn vertex_count(&self) -> usize {
        match self.mode {
            DisplayMode::Box => self.box_mesh.iter().count() * MeshSpec::BOX_VERTICES,
            DisplayMode::Frame => self.members.len() * MeshSpec::BOX_VERTICES,
        }
    }

    /// Placement of a mesh centered on `center`, under the current rotation & scale.
    pub fn placement(&self, center: Point3<Real>) -> Placement {
        Placement {
            center,
            rotation_y: self.rotation_y,
            scale: self.scale,
        }
    }

    /// Every mesh paired with its placement.
    fn placed_mut(&mut self) -> impl Iterator<Item = (&mut M, Placement)> + '_ {
        let base = self.placement(Point3::origin());
        let centroids = self.layout.as_ref().map(JoistLayout::centroids).unwrap_or(&[]);
        self.box_mesh
            .iter_mut()
            .map(move |m| (m, base))
            .chain(
                self.members
                    .iter_mut()
                    .zip(centroids)
                    .map(move |(m, c)| (m, Placement { center: *c, ..base })),
            )
    }
}

/// The result of a successful [commit](Controller::commit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitOutcome {
    pub action: CommitAction,
    /// Set if the new layout has overlapping members and the policy is [DegeneratePolicy::Warn].
    pub warning: Option<Degeneracy<Real>>,
}

/// Owns a [RenderBackend] and the [ViewportState] built with it, and applies setting edits to
/// both.
///
/// Edits are all-or-nothing: if the new settings can't be laid out, neither the settings nor
/// any mesh change. Meshes are released when the controller is dropped.
pub struct Controller<B: RenderBackend> {
    backend: B,
    settings: FrameSettings,
    camera: OrthoCamera,
    state: ViewportState<B::Mesh>,
}

impl<B: RenderBackend> Controller<B> {
    /// Build a viewport of `width` × `height` pixels showing `settings`.
    ///
    /// # Errors
    ///
    /// * Any error of [FrameSettings::validate], [OrthoCamera::new] or of laying out `settings`.
    /// * [Backend](Error::Backend) if the backend fails to create a mesh.
    pub fn new(
        backend: B,
        settings: FrameSettings,
        width: Real,
        height: Real,
    ) -> Result<Self, Error<Real>> {
        settings.validate()?;
        let camera = OrthoCamera::new(width, height)?;
        let state = ViewportState::empty(settings.display_mode(), camera.model_scale());
        let mut res = Self {
            backend,
            settings,
            camera,
            state,
        };
        let (layout, _) = plan(&res.settings)?;
        res.replace_meshes(layout)?;
        Ok(res)
    }

    #[inline]
    pub fn settings(&self) -> &FrameSettings {
        &self.settings
    }

    #[inline]
    pub fn state(&self) -> &ViewportState<B::Mesh> {
        &self.state
    }

    #[inline]
    pub fn camera(&self) -> &OrthoCamera {
        &self.camera
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Apply a single edit and perform whatever follow-up it calls for.
    ///
    /// # Errors
    ///
    /// * Any error of [FrameSettings::apply] or of laying out the new settings; nothing changes.
    /// * [Backend](Error::Backend) if the backend fails to create a mesh. The new settings are
    ///   discarded, and the viewport is left without meshes until the next successful
    ///   [rebuild](Self::rebuild).
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn commit(&mut self, edit: SettingEdit) -> Result<CommitOutcome, Error<Real>> {
        let (next, action) = self.settings.with_edit(edit)?;
        let mut warning = None;
        match action {
            CommitAction::Rebuild => {
                let (layout, w) = plan(&next)?;
                warning = w;
                let prev = std::mem::replace(&mut self.settings, next);
                if let Err(e) = self.replace_meshes(layout) {
                    self.settings = prev;
                    return Err(e);
                }
            }
            CommitAction::SwitchDisplay => {
                self.settings = next;
                self.switch_display();
            }
            CommitAction::SetMaterial => {
                self.settings = next;
                self.refresh_materials();
            }
            CommitAction::None => self.settings = next,
        }
        Ok(CommitOutcome { action, warning })
    }

    /// Recompute the layout from the current settings and replace every mesh.
    pub fn rebuild(&mut self) -> Result<Option<Degeneracy<Real>>, Error<Real>> {
        let (layout, warning) = plan(&self.settings)?;
        self.replace_meshes(layout)?;
        Ok(warning)
    }

    /// Reframe the camera for a new viewport size and rescale every mesh to match.
    ///
    /// # Errors
    ///
    /// Any error of [OrthoCamera::resize], e.g. for a minimised window. Neither the camera nor
    /// any mesh changes, so the viewport keeps its last good framing.
    pub fn resize(&mut self, width: Real, height: Real) -> Result<(), Error<Real>> {
        if let Err(e) = self.camera.resize(width, height) {
            tracing::debug!(width, height, "ignoring resize to an empty viewport");
            return Err(e);
        }
        self.state.scale = self.camera.model_scale();
        tracing::trace!(width, height, scale = self.state.scale, "resized viewport");
        self.place_all();
        Ok(())
    }

    /// Advance the viewport by `dt` seconds, spinning it if auto-rotation is enabled.
    pub fn tick(&mut self, dt: Real) {
        if self.settings.auto_rotate {
            self.state.rotation_y = (self.state.rotation_y + std::f32::consts::PI * 0.05 * dt)
                .rem_euclid(std::f32::consts::TAU);
            self.place_all();
        }
    }

    fn mesh_spec(&self, size: Vector3<Real>, visible: bool) -> MeshSpec {
        MeshSpec {
            size,
            material: self.settings.material,
            wireframe: self.settings.wireframe,
            visible,
        }
    }

    fn release_all(&mut self) {
        if let Some(m) = self.state.box_mesh.take() {
            self.backend.release_mesh(m);
        }
        for m in self.state.members.drain(..) {
            self.backend.release_mesh(m);
        }
        self.state.layout = None;
    }

    /// Release the current meshes, then create & place new ones for `layout`.
    fn replace_meshes(&mut self, layout: JoistLayout<Real>) -> Result<(), Error<Real>> {
        self.release_all();
        self.state.mode = self.settings.display_mode();
        let show_frame = self.state.mode == DisplayMode::Frame;

        let box_spec = self.mesh_spec(self.settings.half_extents().size(), !show_frame);
        let member_spec = self.mesh_spec(layout.member_size(), show_frame);

        let box_mesh = self
            .backend
            .create_mesh(&box_spec)
            .map_err(|e| Error::Backend(e.to_string()))?;
        let mut members = Vec::with_capacity(layout.len());
        for _ in 0..layout.len() {
            match self.backend.create_mesh(&member_spec) {
                Ok(m) => members.push(m),
                Err(e) => {
                    tracing::error!(error = %e, "failed to create member mesh");
                    self.backend.release_mesh(box_mesh);
                    for m in members {
                        self.backend.release_mesh(m);
                    }
                    return Err(Error::Backend(e.to_string()));
                }
            }
        }

        tracing::debug!(
            members = members.len(),
            mode = %self.state.mode,
            "replaced viewport meshes"
        );
        self.state.box_mesh = Some(box_mesh);
        self.state.members = members;
        self.state.layout = Some(layout);
        self.place_all();
        Ok(())
    }

    fn switch_display(&mut self) {
        self.state.mode = self.settings.display_mode();
        let show_frame = self.state.mode == DisplayMode::Frame;
        if let Some(m) = self.state.box_mesh.as_mut() {
            self.backend.set_visible(m, !show_frame);
        }
        for m in self.state.members.iter_mut() {
            self.backend.set_visible(m, show_frame);
        }
    }

    fn refresh_materials(&mut self) {
        let (material, wireframe) = (self.settings.material, self.settings.wireframe);
        if let Some(m) = self.state.box_mesh.as_mut() {
            self.backend.set_material(m, material, wireframe);
        }
        for m in self.state.members.iter_mut() {
            self.backend.set_material(m, material, wireframe);
        }
    }

    fn place_all(&mut self) {
        let Self { backend, state, .. } = self;
        for (mesh, placement) in state.placed_mut() {
            backend.place(mesh, &placement);
        }
    }
}

impl<B: RenderBackend> Drop for Controller<B> {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Lay out `settings`, applying its [DegeneratePolicy].
fn plan(
    settings: &FrameSettings,
) -> Result<(JoistLayout<Real>, Option<Degeneracy<Real>>), Error<Real>> {
    let layout = layout_joist_centroids(&settings.half_extents(), &settings.joist_params())?;
    let warning = layout.spacing().degeneracy();
    match (warning, settings.degenerate) {
        (Some(d), DegeneratePolicy::Reject) => Err(d.into()),
        (Some(d), DegeneratePolicy::Warn) => {
            tracing::warn!(%d, "joist layout has overlapping members");
            Ok((layout, Some(d)))
        }
        (None, _) => Ok((layout, None)),
    }
}

/// Serializes access to a [Controller], so that concurrent callers never observe a viewport
/// midway through a rebuild.
pub struct SharedController<B: RenderBackend> {
    inner: Mutex<Controller<B>>,
}

impl<B: RenderBackend> SharedController<B> {
    pub fn new(controller: Controller<B>) -> Self {
        Self {
            inner: Mutex::new(controller),
        }
    }

    pub fn commit(&self, edit: SettingEdit) -> Result<CommitOutcome, Error<Real>> {
        self.inner.lock().commit(edit)
    }

    pub fn resize(&self, width: Real, height: Real) -> Result<(), Error<Real>> {
        self.inner.lock().resize(width, height)
    }

    pub fn tick(&self, dt: Real) {
        self.inner.lock().tick(dt)
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut Controller<B>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn into_inner(self) -> Controller<B> {
        self.inner.into_inner()
    }
}
