// materials/mod.rs
// 导出纹理与颜色相关模块
pub mod color;
pub mod texture;
