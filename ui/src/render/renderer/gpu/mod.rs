pub mod utils;
pub mod gpu_state;
pub mod surface_context;
pub mod resource_context;
pub mod instance_buffer;
pub mod pipelines;

pub use gpu_state::GpuState;
