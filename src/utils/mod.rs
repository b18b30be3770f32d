// utils/mod.rs
// 输出、渲染流程与内置资源相关的工具模块
pub mod demo_meshes;
pub mod render_process;
pub mod save_utils;
