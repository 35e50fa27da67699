use anyhow::Result;
use web_sys::HtmlCanvasElement;

use crate::navigation::MarkerGeometry;

use super::renderer::gpu::GpuState;
use super::renderer::gpu::surface_context::SurfaceContext;

/// Bring up WebGL on `canvas` and build every pipeline the viewer draws with.
///
/// Marker meshes come from the same `MarkerGeometry` the picker tests
/// against, so what is drawn is exactly what can be clicked.
pub async fn init_wgpu(canvas: &HtmlCanvasElement, markers: &MarkerGeometry) -> Result<GpuState> {
    let sc = SurfaceContext::new_async(canvas).await?;
    Ok(GpuState::new(sc, markers))
}
