use bytemuck::Pod;

use super::surface_context::SurfaceContext;

/// Per-instance vertex buffer rebuilt every frame. Grows to the next power
/// of two when the instances no longer fit, never shrinks.
pub struct InstanceBuffer<V: Pod> {
    label: &'static str,
    staging: Vec<V>,   // CPU-side cache, keeps its allocation between frames
    capacity: u32,     // instances that fit in `buf`
    count: u32,        // instances written this frame
    buf: wgpu::Buffer,
}

impl<V: Pod> InstanceBuffer<V> {
    pub fn new(sc: &SurfaceContext, label: &'static str, initial_cap: u32) -> Self {
        let capacity = initial_cap.max(1);
        Self {
            label,
            staging: Vec::with_capacity(capacity as usize),
            capacity,
            count: 0,
            buf: Self::create_buf(sc, label, capacity),
        }
    }

    fn create_buf(sc: &SurfaceContext, label: &str, cap: u32) -> wgpu::Buffer {
        sc.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: cap as u64 * std::mem::size_of::<V>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the contents and upload them in one shot.
    pub fn sync(&mut self, sc: &SurfaceContext, instances: impl IntoIterator<Item = V>) {
        self.staging.clear();
        self.staging.extend(instances);

        let needed = self.staging.len() as u32;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buf = Self::create_buf(sc, self.label, self.capacity);
            log::debug!("{}: grew to {} instances", self.label, self.capacity);
        }
        self.count = needed;

        if needed > 0 {
            sc.queue.write_buffer(&self.buf, 0, bytemuck::cast_slice(&self.staging));
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buf.slice(..)
    }
}
