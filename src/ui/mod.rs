//! Terminal UI: view models, theming and ANSI rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready data computed from state
//! - [`renderer`]: entry point called from the plugin's `render`
//! - [`components`]: header, grid, detail, form, toast and footer
//! - [`helpers`]: cursor positioning, fitting and wrapping text
//! - [`theme`]: color schemes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Body, FooterInfo, HeaderInfo, UIViewModel};
