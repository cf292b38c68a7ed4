// src/panel/mod.rs
// =============================================================================
// The search panel of one language tab: debounced input, paging state,
// what to show, and the loop that wires them to stdin and the network.
// =============================================================================

mod debounce;
mod driver;
mod session;
pub mod view;

pub use driver::PanelDriver;
pub use session::{PaginationMode, SearchSession};
pub use view::PanelView;
