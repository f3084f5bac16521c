//! Mesh lifecycle of [Controller] against a backend that records every call.

use joistframe::{
    settings::{
        CommitAction, DegeneratePolicy, DisplayMode, FrameSettings, Material, SettingEdit,
        SettingField, SettingValue,
    },
    viewport::{Controller, MeshSpec, Placement, RenderBackend, SharedController},
    Error, InvalidArgument,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(usize),
    Release(usize),
    Material(usize, Material, bool),
    Visible(usize, bool),
    Place(usize),
}

#[derive(Debug, Default)]
struct Recorder {
    next_id: usize,
    live: Vec<usize>,
    calls: Vec<Call>,
    specs: Vec<MeshSpec>,
    placements: Vec<(usize, Placement)>,
    /// Fail every creation after this many successful ones.
    fail_after: Option<usize>,
}

#[derive(Debug)]
struct Mesh(usize);

impl Recorder {
    fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl RenderBackend for Recorder {
    type Mesh = Mesh;
    type Error = &'static str;

    fn create_mesh(&mut self, spec: &MeshSpec) -> Result<Mesh, Self::Error> {
        if let Some(n) = self.fail_after.as_mut() {
            if *n == 0 {
                return Err("out of meshes");
            }
            *n -= 1;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.live.push(id);
        self.specs.push(*spec);
        self.calls.push(Call::Create(id));
        Ok(Mesh(id))
    }

    fn release_mesh(&mut self, mesh: Mesh) {
        self.live.retain(|&id| id != mesh.0);
        self.calls.push(Call::Release(mesh.0));
    }

    fn set_material(&mut self, mesh: &mut Mesh, material: Material, wireframe: bool) {
        self.calls.push(Call::Material(mesh.0, material, wireframe));
    }

    fn set_visible(&mut self, mesh: &mut Mesh, visible: bool) {
        self.calls.push(Call::Visible(mesh.0, visible));
    }

    fn place(&mut self, mesh: &mut Mesh, placement: &Placement) {
        self.placements.push((mesh.0, *placement));
        self.calls.push(Call::Place(mesh.0));
    }
}

fn controller() -> Controller<Recorder> {
    Controller::new(Recorder::default(), FrameSettings::default(), 800.0, 600.0).unwrap()
}

fn edit(field: SettingField, value: SettingValue) -> SettingEdit {
    SettingEdit::new(field, value)
}

#[test]
fn initial_build_creates_box_and_members() {
    let c = controller();
    // one box + three joists
    assert_eq!(c.backend().live, vec![0, 1, 2, 3]);
    assert_eq!(c.state().members().len(), 3);
    assert_eq!(c.state().mode(), DisplayMode::Box);
    assert_eq!(c.state().vertex_count(), MeshSpec::BOX_VERTICES);
    assert!(c.backend().specs[0].visible);
    assert!(c.backend().specs[1..].iter().all(|s| !s.visible));
    assert!((c.state().scale() - 198.0).abs() < 1e-3);
}

#[test]
fn rebuild_releases_before_creating() {
    let mut c = controller();
    c.backend_mut().take_calls();

    let outcome = c
        .commit(edit(SettingField::JoistCount, SettingValue::Integer(5)))
        .unwrap();
    assert_eq!(outcome.action, CommitAction::Rebuild);
    assert_eq!(outcome.warning, None);

    let calls = c.backend_mut().take_calls();
    let last_release = calls
        .iter()
        .rposition(|c| matches!(c, Call::Release(_)))
        .unwrap();
    let first_create = calls
        .iter()
        .position(|c| matches!(c, Call::Create(_)))
        .unwrap();
    assert!(last_release < first_create);
    assert_eq!(
        calls.iter().filter(|c| matches!(c, Call::Release(_))).count(),
        4
    );
    assert_eq!(c.backend().live.len(), 6);
    assert_eq!(c.state().members().len(), 5);
    assert_eq!(c.settings().joist_count, 5);
}

#[test]
fn members_are_placed_at_centroids() {
    let c = controller();
    let layout = c.state().layout().unwrap();
    for (mesh, centroid) in c.state().members().iter().zip(layout.centroids()) {
        let (_, placement) = c
            .backend()
            .placements
            .iter()
            .rev()
            .find(|(id, _)| *id == mesh.0)
            .unwrap();
        assert_eq!(placement.center, *centroid);
    }
}

#[test]
fn invalid_edit_changes_nothing() {
    let mut c = controller();
    let before = c.settings().clone();
    c.backend_mut().take_calls();

    assert!(matches!(
        c.commit(edit(SettingField::JoistCount, SettingValue::Integer(1))),
        Err(Error::InvalidArgument(InvalidArgument::OutOfRange { .. }))
    ));
    assert!(matches!(
        c.commit(edit(SettingField::MemberWidth, SettingValue::Toggle(true))),
        Err(Error::InvalidArgument(InvalidArgument::WrongKind { .. }))
    ));
    assert_eq!(c.settings(), &before);
    assert!(c.backend().calls.is_empty());
    assert_eq!(c.backend().live, vec![0, 1, 2, 3]);
}

#[test]
fn degenerate_layout_warns_by_default() {
    let mut c = controller();
    // x = 2, three joists => interval 1; width 3 => inset 2 crosses the inner joist
    let outcome = c
        .commit(edit(SettingField::MemberWidth, SettingValue::Number(3.0)))
        .unwrap();
    let warning = outcome.warning.unwrap();
    assert_eq!(warning.index, 0);
    assert_eq!(c.state().members().len(), 3);
}

#[test]
fn degenerate_layout_can_be_rejected() {
    let mut c = controller();
    c.commit(edit(
        SettingField::Degenerate,
        SettingValue::Policy(DegeneratePolicy::Reject),
    ))
    .unwrap();
    let live = c.backend().live.clone();
    c.backend_mut().take_calls();

    assert!(matches!(
        c.commit(edit(SettingField::MemberWidth, SettingValue::Number(3.0))),
        Err(Error::GeometricDegenerate(_))
    ));
    assert_eq!(c.settings().member_width, 1.5);
    assert_eq!(c.backend().live, live);
    assert!(c.backend().calls.is_empty());
}

#[test]
fn switching_display_toggles_visibility() {
    let mut c = controller();
    c.backend_mut().take_calls();
    let outcome = c
        .commit(edit(SettingField::ShowFrame, SettingValue::Toggle(true)))
        .unwrap();
    assert_eq!(outcome.action, CommitAction::SwitchDisplay);
    assert_eq!(
        c.backend_mut().take_calls(),
        vec![
            Call::Visible(0, false),
            Call::Visible(1, true),
            Call::Visible(2, true),
            Call::Visible(3, true),
        ]
    );
    assert_eq!(c.state().mode(), DisplayMode::Frame);
    assert_eq!(c.state().vertex_count(), 3 * MeshSpec::BOX_VERTICES);
}

#[test]
fn material_edits_reach_every_mesh() {
    let mut c = controller();
    c.backend_mut().take_calls();
    c.commit(edit(SettingField::Wireframe, SettingValue::Toggle(true)))
        .unwrap();
    let calls = c.backend_mut().take_calls();
    assert_eq!(calls.len(), 4);
    assert!(calls
        .iter()
        .all(|c| matches!(c, Call::Material(_, Material::Normal, true))));

    c.commit(edit(
        SettingField::Material,
        SettingValue::Material(Material::Depth),
    ))
    .unwrap();
    assert!(c
        .backend_mut()
        .take_calls()
        .iter()
        .all(|c| matches!(c, Call::Material(_, Material::Depth, true))));
}

#[test]
fn tick_rotates_only_when_enabled() {
    let mut c = controller();
    c.tick(2.0);
    assert!((c.state().rotation_y() - std::f32::consts::PI * 0.1).abs() < 1e-6);

    c.commit(edit(SettingField::AutoRotate, SettingValue::Toggle(false)))
        .unwrap();
    c.backend_mut().take_calls();
    c.tick(2.0);
    assert!(c.backend().calls.is_empty());
}

#[test]
fn resize_rescales_meshes() {
    let mut c = controller();
    c.resize(400.0, 1000.0).unwrap();
    assert!((c.state().scale() - 132.0).abs() < 1e-3);
    let (_, last) = c.backend().placements.last().unwrap();
    assert!((last.scale - 132.0).abs() < 1e-3);
}

#[test]
fn empty_viewport_keeps_last_framing() {
    let mut c = controller();
    c.backend_mut().take_calls();
    let camera = *c.camera();

    assert!(matches!(
        c.resize(0.0, 600.0),
        Err(Error::InvalidArgument(
            InvalidArgument::NonPositiveDimension { .. }
        ))
    ));
    assert!(c.resize(800.0, 0.0).is_err());
    assert!(c.backend().calls.is_empty());
    assert_eq!(c.camera(), &camera);
    assert!((c.state().scale() - 198.0).abs() < 1e-3);

    // placing still works once the window comes back
    c.resize(400.0, 1000.0).unwrap();
    assert!(c
        .backend()
        .placements
        .iter()
        .all(|(_, p)| p.transform().is_some()));
}

#[test]
fn initial_settings_are_range_checked() {
    let settings = FrameSettings {
        x: 100.0,
        joist_count: 500,
        member_width: 0.01,
        ..Default::default()
    };
    let res = Controller::new(Recorder::default(), settings, 800.0, 600.0);
    assert!(matches!(
        res,
        Err(Error::InvalidArgument(InvalidArgument::OutOfRange {
            field: SettingField::X,
            ..
        }))
    ));

    assert!(Controller::new(Recorder::default(), FrameSettings::default(), 0.0, 0.0).is_err());
}

#[test]
fn rotation_wraps_around() {
    let mut c = controller();
    // 50s at pi/20 rad/s is one and a quarter turns
    c.tick(50.0);
    let r = c.state().rotation_y();
    assert!((0.0..std::f32::consts::TAU).contains(&r));
    assert!((r - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    for _ in 0..1000 {
        c.tick(60.0);
    }
    assert!((0.0..std::f32::consts::TAU).contains(&c.state().rotation_y()));
}

#[test]
fn backend_failure_discards_the_edit() {
    let mut c = controller();
    // enough for the box and two members, but not a third
    c.backend_mut().fail_after = Some(3);
    assert!(matches!(
        c.commit(edit(SettingField::X, SettingValue::Number(10.0))),
        Err(Error::Backend(_))
    ));
    assert_eq!(c.settings().x, 2.0);
    assert!(c.backend().live.is_empty());
    assert!(c.state().layout().is_none());

    c.backend_mut().fail_after = None;
    assert_eq!(c.rebuild(), Ok(None));
    assert_eq!(c.backend().live.len(), 4);
}

#[test]
fn shared_controller_serializes_commits() {
    let shared = SharedController::new(controller());
    std::thread::scope(|s| {
        for n in 2..6 {
            let shared = &shared;
            s.spawn(move || {
                shared
                    .commit(edit(SettingField::JoistCount, SettingValue::Integer(n)))
                    .unwrap();
            });
        }
    });
    shared.with(|c| {
        let n = c.settings().joist_count;
        assert_eq!(c.state().members().len(), n);
        assert_eq!(c.backend().live.len(), n + 1);
    });
}
