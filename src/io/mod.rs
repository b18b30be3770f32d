pub mod config_loader;
pub mod controller;
pub mod obj_loader;
pub mod render_settings;
pub mod resource_loader;
pub mod simple_cli;
pub mod texture_loader;
