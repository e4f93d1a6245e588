//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI on stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI for a pane of `rows` x `cols` cells to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Full-page states replace everything; otherwise the table page is drawn and
/// the detail panel, if open, goes on top.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if vm.page.is_full_page() {
        if let Some(empty) = &vm.empty_state {
            components::render_empty_state(empty, theme, cols);
        }
        return;
    }

    components::render_table_page(vm, theme, cols, rows);

    if let Some(panel) = &vm.detail {
        components::render_detail_panel(panel, theme, rows, cols);
    }
}
