//! Top-level rendering entry point.
//!
//! Computes the view model from state, then hands it to the screen
//! components. Nothing here decides what is visible.

use crate::app::AppState;
use crate::ui::components;

/// Renders the whole plugin pane to stdout.
///
/// Call [`AppState::set_viewport`] first so grid navigation uses the same
/// column count the frame is drawn with.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_screen(&viewmodel, &state.theme, rows, cols);
}
