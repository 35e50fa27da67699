use glam::Vec3;

use rover_ui::navigation::{
    ActiveCamera, AppContext, Direction, DirectionTarget, InputEvent, MarkerShape, NavigationRegistry,
    PreviewRect, SceneRenderer, SceneSettings, SceneView, Viewport, ViewpointId,
};
use rover_ui::render::renderer::camera::Camera;

#[derive(Debug, PartialEq)]
enum Draw {
    Main(Vec3),
    Preview(Vec3, PreviewRect),
}

#[derive(Default)]
struct Recorder {
    draws: Vec<Draw>,
}

impl SceneRenderer for Recorder {
    fn render_main(&mut self, _scene: &SceneView<'_>, camera: &Camera) {
        self.draws.push(Draw::Main(camera.position));
    }

    fn render_preview(&mut self, _scene: &SceneView<'_>, camera: &Camera, rect: PreviewRect) {
        self.draws.push(Draw::Preview(camera.position, rect));
    }
}

impl Recorder {
    fn take(&mut self) -> Vec<Draw> {
        std::mem::take(&mut self.draws)
    }
}

const HOME: Vec3 = Vec3::new(10.0, 0.23, 0.0);
const ROW: [f32; 3] = [1.1, 0.0, -1.1];

/// Home camera looking down -X at a row of three cones.
fn row_scene() -> (AppContext, Vec<ViewpointId>) {
    let viewport = Viewport::new(800, 600);
    let home = Camera::perspective(50.0, 800.0 / 600.0, 0.1, 100.0)
        .with_pose(HOME, Vec3::new(0.0, 90f32.to_radians(), 0.0));
    let mut registry = NavigationRegistry::new(home, Camera::perspective(45.0, 800.0 / 600.0, 0.1, 100.0));

    let ids = ROW
        .iter()
        .map(|&z| {
            registry
                .add_viewpoint(Vec3::new(3.0, 0.23, z), Vec3::new(0.0, 7.88, 0.0), MarkerShape::Cone)
                .id()
        })
        .collect();

    (AppContext::new(registry, SceneSettings::default(), viewport), ids)
}

fn vp_position(ctx: &AppContext, id: ViewpointId) -> Vec3 {
    ctx.registry().viewpoint(id).unwrap().camera.position
}

#[test]
fn directions_from_the_first_of_a_row() {
    let (mut ctx, ids) = row_scene();
    assert!(ctx.registry_mut().activate_viewpoint(ids[0]));

    let targets = ctx.registry().directions();
    assert_eq!(targets, vec![DirectionTarget { direction: Direction::Right, viewpoint: ids[1] }]);
}

#[test]
fn nothing_is_hovered_before_the_pointer_moves() {
    let (mut ctx, _) = row_scene();
    let mut r = Recorder::default();

    let report = ctx.frame(0.0, &mut r);

    assert_eq!(report.hovered, None);
    assert_eq!(report.preview, None);
    assert!(report.affordances.is_empty());
    assert_eq!(r.take(), vec![Draw::Main(HOME)]);
}

#[test]
fn hover_click_walk_and_return_home() {
    let (mut ctx, ids) = row_scene();
    let input = ctx.input();
    let mut r = Recorder::default();

    // a few pixels off centre, straight at the middle cone
    input.push(InputEvent::PointerMoved { x: 403.0, y: 297.0 });
    let report = ctx.frame(0.0, &mut r);

    let middle = ctx.registry().viewpoint(ids[1]).unwrap().marker.id();
    let rect = PreviewRect { x: 403, y: 297, width: 240, height: 160 };
    assert_eq!(report.hovered, Some(middle));
    assert_eq!(report.preview, Some(rect));
    assert!(report.affordances.is_empty());
    assert_eq!(r.take(), vec![Draw::Main(HOME), Draw::Preview(vp_position(&ctx, ids[1]), rect)]);

    // click switches to the hovered viewpoint; no preview away from home
    input.push(InputEvent::Clicked);
    let report = ctx.frame(16.0, &mut r);

    assert_eq!(report.active, ActiveCamera::Viewpoint(ids[1]));
    assert_eq!(report.preview, None);
    assert_eq!(
        report.affordances,
        vec![
            DirectionTarget { direction: Direction::Left, viewpoint: ids[0] },
            DirectionTarget { direction: Direction::Right, viewpoint: ids[2] },
        ]
    );
    assert_eq!(r.take(), vec![Draw::Main(vp_position(&ctx, ids[1]))]);

    input.push(InputEvent::DirectionChosen(Direction::Left));
    let report = ctx.frame(32.0, &mut r);

    assert_eq!(report.active, ActiveCamera::Viewpoint(ids[0]));
    assert_eq!(
        report.affordances,
        vec![DirectionTarget { direction: Direction::Right, viewpoint: ids[1] }]
    );

    // no viewpoint further left; stays put
    input.push(InputEvent::DirectionChosen(Direction::Left));
    assert_eq!(ctx.frame(48.0, &mut r).active, ActiveCamera::Viewpoint(ids[0]));

    input.push(InputEvent::HomeRequested);
    let report = ctx.frame(64.0, &mut r);

    assert_eq!(report.active, ActiveCamera::Home);
    assert!(report.affordances.is_empty());
    assert!(report.preview.is_some());
}

#[test]
fn clicking_empty_space_keeps_the_camera() {
    let (mut ctx, _) = row_scene();
    let input = ctx.input();
    let mut r = Recorder::default();

    input.push(InputEvent::PointerMoved { x: 10.0, y: 10.0 });
    input.push(InputEvent::Clicked);
    let report = ctx.frame(0.0, &mut r);

    assert_eq!(report.active, ActiveCamera::Home);
    assert_eq!(report.hovered, None);
}

#[test]
fn directions_are_ignored_at_home() {
    let (mut ctx, _) = row_scene();
    let input = ctx.input();
    let mut r = Recorder::default();

    input.push(InputEvent::DirectionChosen(Direction::Right));
    assert_eq!(ctx.frame(0.0, &mut r).active, ActiveCamera::Home);
}

#[test]
fn resize_reaches_the_home_camera_only() {
    let (mut ctx, ids) = row_scene();
    let input = ctx.input();
    let mut r = Recorder::default();

    input.push(InputEvent::Resized { width: 1000, height: 500 });
    ctx.frame(0.0, &mut r);

    assert_eq!(ctx.viewport(), Viewport::new(1000, 500));
    assert_eq!(ctx.registry().home_camera().aspect, 2.0);
    assert_eq!(ctx.registry().viewpoint(ids[0]).unwrap().camera.aspect, 800.0 / 600.0);
}

#[test]
fn debug_events_edit_scene_settings() {
    let (mut ctx, _) = row_scene();
    let input = ctx.input();
    let mut r = Recorder::default();

    let index = ctx
        .bindings()
        .iter()
        .position(|b| b.folder == "Light" && b.label == "intensity")
        .unwrap();

    input.push(InputEvent::DebugChanged { index, value: 4.5 });
    input.push(InputEvent::DebugChanged { index: 999, value: 1.0 });
    ctx.frame(0.0, &mut r);

    assert_eq!(ctx.settings().key_light.intensity, 4.5);
}
