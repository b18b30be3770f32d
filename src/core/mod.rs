pub mod frame_buffer;
pub mod mesh;
pub mod projector;
pub mod rasterizer;
pub mod renderer;
pub mod surface;
