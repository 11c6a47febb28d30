pub mod audio;
pub mod camera;
pub mod constants;
pub mod geometry;
pub mod input;
pub mod ledger;
pub mod menu;
pub mod preloader;
pub mod reveal;
pub mod scene;
pub mod sparkles;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static STARS_WGSL: &str = include_str!("../shaders/stars.wgsl");

pub use audio::*;
pub use camera::*;
pub use constants::*;
pub use geometry::*;
pub use input::*;
pub use ledger::*;
pub use menu::*;
pub use preloader::*;
pub use reveal::*;
pub use scene::*;
pub use sparkles::*;
