// Library root
// -----------
// The binary (`main.rs`) only sets up logging and configuration and then
// calls `run`. Everything else lives here so it can be tested.
//
// Module responsibilities:
// - `model`: the movie record and its lenient text parsing.
// - `catalog`: the in-memory catalog and its search filters.
// - `storage`: loading and saving the catalog file.
// - `api`: looking movies up on the metadata provider.
// - `ui`: the interactive menu that ties the above together.
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod ui;

pub use catalog::{Catalog, SearchFilter};
pub use config::Config;
pub use error::{FetchError, StorageError};
pub use model::MovieRecord;

/// Start the interactive catalog session.
pub fn run(config: &Config) -> anyhow::Result<()> {
    ui::main_menu(config)
}
