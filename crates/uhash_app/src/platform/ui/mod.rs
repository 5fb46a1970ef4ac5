pub mod input;
pub mod render;

pub use render::ConsoleUi;
