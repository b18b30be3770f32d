// geometry/mod.rs
// 导出几何基元、裁剪与相机相关模块
pub mod camera;
pub mod matrix;
pub mod plane;
pub mod triangle;
pub mod vector;
