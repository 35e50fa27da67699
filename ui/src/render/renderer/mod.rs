pub mod camera;
pub mod light;
pub mod mesh;
pub mod vertex;
pub mod instance;
pub mod uniform;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod gpu;
