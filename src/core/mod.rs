pub mod clock;
pub mod constants;
pub mod geometry;
pub mod infrastructure;
pub mod lifecycle;
pub mod palette;
pub mod scene;
pub mod schedule;
pub mod theme;
pub mod transition;
pub mod viewport;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
