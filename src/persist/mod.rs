mod load;
mod save;

pub use load::{import_save, load_game};
pub use save::{export_save, save_game};

use thiserror::Error;

/// Default save slot file name.
pub const SAVE_FILE: &str = "silicon-fab-save.json";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save data is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}
