//! Viewpoint navigation: the registry of vantage points, marker motion,
//! pointer picking, neighbour resolution and the per-frame driver tying
//! them together. Nothing in here touches the DOM or the GPU.

pub mod animator;
pub mod clock;
pub mod context;
pub mod debug;
pub mod direction;
pub mod input;
pub mod picking;
pub mod registry;
pub mod scene;
pub mod viewpoint;

pub use animator::MarkerAnimator;
pub use clock::{Clock, ClockSample};
pub use context::{preview_rect, AppContext, FrameReport, Viewport};
pub use debug::{scene_bindings, DebugBinding};
pub use direction::{resolve_directions, Direction, DirectionTarget};
pub use input::{InputEvent, InputQueue};
pub use picking::{MarkerDims, MarkerGeometry, PickHit, PickingService};
pub use registry::{ActiveCamera, NavigationRegistry};
pub use scene::{ModelTransform, PreviewRect, SceneRenderer, SceneSettings, SceneView};
pub use viewpoint::{Marker, MarkerId, MarkerShape, Viewpoint, ViewpointId};
