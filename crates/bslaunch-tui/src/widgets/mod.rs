//! Custom widget components

mod directory_prompt;
mod form;
mod header;
mod license;
mod links;
pub mod modal_overlay;
mod output;
mod status_line;

pub use directory_prompt::{DirectoryPromptView, DropOverlay};
pub use form::FormView;
pub use header::MainHeader;
pub use license::LicenseOverlay;
pub use links::LinksView;
pub use output::OutputView;
pub use status_line::StatusLine;
