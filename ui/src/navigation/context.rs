use glam::Vec2;

use crate::config::ViewerConfig;

use super::animator::MarkerAnimator;
use super::clock::{Clock, ClockSample};
use super::debug::{scene_bindings, DebugBinding};
use super::direction::{Direction, DirectionTarget};
use super::input::{InputEvent, InputQueue};
use super::picking::{MarkerGeometry, PickingService};
use super::registry::{ActiveCamera, NavigationRegistry};
use super::scene::{PreviewRect, SceneRenderer, SceneSettings, SceneView};
use super::viewpoint::MarkerId;

/// Drawing surface size in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width: width.max(1), height: height.max(1) }
    }

    /// Surface pixel (origin top-left) to normalized device coordinates.
    pub fn to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.width as f32 * 2.0 - 1.0,
            -(pixel.y / self.height as f32) * 2.0 + 1.0,
        )
    }
}

/// What one frame did, for the UI layer to mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub hovered: Option<MarkerId>,
    pub preview: Option<PreviewRect>,
    pub affordances: Vec<DirectionTarget>,
    pub active: ActiveCamera,
}

/// Top-left corner at the pointer, pushed back inside the surface.
pub fn preview_rect(pointer: Vec2, size: (u32, u32), viewport: Viewport) -> PreviewRect {
    let width = size.0.min(viewport.width);
    let height = size.1.min(viewport.height);

    let clamp = |p: f32, span: u32, limit: u32| (p.max(0.0) as u32).min(limit - span);

    PreviewRect {
        x: clamp(pointer.x, width, viewport.width),
        y: clamp(pointer.y, height, viewport.height),
        width,
        height,
    }
}

/// Owns the whole viewer state. The frame callback is the only writer;
/// DOM listeners reach it through the shared [`InputQueue`].
pub struct AppContext {
    registry: NavigationRegistry,
    settings: SceneSettings,
    animator: MarkerAnimator,
    picker: PickingService,
    clock: Clock,
    input: InputQueue,
    bindings: Vec<DebugBinding>,

    viewport: Viewport,
    pointer: Option<Vec2>,
    preview_size: (u32, u32),
}

impl AppContext {
    pub fn new(registry: NavigationRegistry, settings: SceneSettings, viewport: Viewport) -> Self {
        Self {
            registry,
            settings,
            animator: MarkerAnimator::default(),
            picker: PickingService::default(),
            clock: Clock::default(),
            input: InputQueue::default(),
            bindings: scene_bindings(),
            viewport,
            pointer: None,
            preview_size: (240, 160),
        }
    }

    pub fn from_config(config: &ViewerConfig, viewport: Viewport) -> Self {
        let aspect = viewport.width as f32 / viewport.height as f32;

        let home = config.home.camera(aspect);
        let lens = config.lens.camera(aspect);
        let mut registry = NavigationRegistry::new(home, lens);

        for preset in &config.viewpoints {
            let vp = registry.add_viewpoint(preset.position.into(), preset.rotation.into(), preset.shape);
            for turn in &preset.turns {
                turn.apply(&mut vp.camera);
            }
            let id = vp.id();
            if preset.highlight {
                registry.highlight_viewpoint(id);
            }
        }

        log::info!("scene ready with {} viewpoints", registry.viewpoints().len());

        let mut ctx = Self::new(registry, config.scene_settings(), viewport);
        ctx.animator = config.markers.animator();
        ctx.picker = PickingService::new(MarkerGeometry::new(config.markers.dims()));
        ctx.preview_size = (config.preview.width, config.preview.height);
        ctx
    }

    pub fn input(&self) -> InputQueue {
        self.input.clone()
    }

    pub fn registry(&self) -> &NavigationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut NavigationRegistry {
        &mut self.registry
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SceneSettings {
        &mut self.settings
    }

    pub fn picker(&self) -> &PickingService {
        &self.picker
    }

    pub fn bindings(&self) -> &[DebugBinding] {
        &self.bindings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene_view(&self) -> SceneView<'_> {
        SceneView { registry: &self.registry, settings: &self.settings }
    }

    /// One display refresh.
    pub fn frame(&mut self, now_ms: f64, renderer: &mut impl SceneRenderer) -> FrameReport {
        let sample = self.clock.tick(now_ms);
        for event in self.input.drain() {
            self.apply(event);
        }

        renderer.render_main(&self.scene_view(), self.registry.active_camera());

        let hovered = self.pick();
        self.animate(sample, hovered);

        let preview = hovered
            .filter(|_| self.registry.is_home())
            .and_then(|marker| self.registry.find_viewpoint_by_marker(marker))
            .zip(self.pointer)
            .map(|(vp, pointer)| {
                let rect = preview_rect(pointer, self.preview_size, self.viewport);
                renderer.render_preview(&self.scene_view(), &vp.camera, rect);
                rect
            });

        let affordances = if self.registry.is_home() {
            Vec::new()
        } else {
            self.registry.directions()
        };

        FrameReport {
            hovered,
            preview,
            affordances,
            active: self.registry.active(),
        }
    }

    fn animate(&mut self, sample: ClockSample, hovered: Option<MarkerId>) {
        self.animator.animate(self.registry.markers_mut(), sample, hovered);
    }

    /// Marker under the pointer, always seen through the home camera.
    fn pick(&self) -> Option<MarkerId> {
        let ndc = self.viewport.to_ndc(self.pointer?);
        self.picker
            .pick_ndc(self.registry.home_camera(), ndc, self.registry.markers())
            .map(|hit| hit.marker)
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => self.pointer = Some(Vec2::new(x, y)),
            InputEvent::Clicked => {
                let Some(marker) = self.pick() else { return };
                if let Some(id) = self.registry.find_viewpoint_by_marker(marker).map(|vp| vp.id()) {
                    log::debug!("marker clicked, switching camera");
                    self.registry.activate_viewpoint(id);
                }
            }
            InputEvent::HomeRequested => self.registry.activate_home(),
            InputEvent::DirectionChosen(direction) => self.go(direction),
            InputEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.registry.set_aspect(self.viewport.width as f32, self.viewport.height as f32);
            }
            InputEvent::DebugChanged { index, value } => match self.bindings.get(index).copied() {
                Some(binding) => binding.apply(self, value),
                None => log::warn!("no debug binding #{index}"),
            },
        }
    }

    fn go(&mut self, direction: Direction) {
        if self.registry.is_home() {
            return;
        }
        let target = self
            .registry
            .directions()
            .into_iter()
            .find(|t| t.direction == direction);

        match target {
            Some(t) => {
                self.registry.activate_viewpoint(t.viewpoint);
            }
            None => log::debug!("nothing {} of the active camera", direction.label()),
        }
    }
}
