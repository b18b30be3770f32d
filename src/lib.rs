//! # scanline-rasterizer
//!
//! 软件扫描线光栅化渲染器：自由飞行相机、逐三角形平面裁剪、
//! 透视投影、背面剔除，以及带倒数深度缓冲和透视校正纹理映射的扫描线填充。

pub mod core;
pub mod geometry;
pub mod io;
pub mod materials;
pub mod utils;
