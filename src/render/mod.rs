//! Rendering: a backend-neutral scene drawn onto a [`Surface`], and the
//! terminal frame built around it

pub mod renderer;
pub mod scene;
pub mod surface;
pub mod terminal;

pub use renderer::{Hud, Renderer};
pub use scene::{SceneRenderer, SnakePalette};
pub use surface::{PixelRect, Rgba, Surface};
pub use terminal::TerminalSurface;
