//! Rendering module
//!
//! Scenes are built as a list of fill commands, then replayed on a Canvas2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{DrawCmd, draw_list};
