//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with command highlighting and current instruction
//! - [`tape`]: Cells around the cursor with values and character previews
//! - [`output`]: Output produced up to the current step
//! - [`status`]: Status bar with keybindings and execution state
//! - `utils`: Shared formatting helpers
//!
//! Each pane exports a `render_*` function taking the frame, its area, the data
//! to show, focus state, and (where scrollable) a mutable scroll state.

mod utils;

pub mod output;
pub mod source;
pub mod status;
pub mod tape;

pub use output::render_output_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tape::{render_tape_pane, TapeScrollState};
