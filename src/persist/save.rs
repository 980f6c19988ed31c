use std::fs;
use std::path::Path;

use anyhow::Result;
use log::debug;

use crate::sim::state::GameState;

/// Serialize the full state as pretty-printed JSON suitable for
/// copy-paste export. `last_save` is refreshed to the supplied time.
pub fn export_save(state: &GameState, now_ms: u64) -> String {
    let mut snapshot = state.clone();
    snapshot.last_save = now_ms;
    // GameState serializes infallibly: no maps with non-string keys.
    serde_json::to_string_pretty(&snapshot).expect("state serializes to JSON")
}

/// Write the save slot. Same layout as the export blob.
pub fn save_game(state: &GameState, path: &Path, now_ms: u64) -> Result<()> {
    fs::write(path, export_save(state, now_ms))?;
    debug!("saved game to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{self, EconomyConfig};

    #[test]
    fn export_is_pretty_and_stamps_last_save() {
        let state = catalog::initial_state(&EconomyConfig::default());
        let blob = export_save(&state, 1234);
        assert!(blob.contains('\n'), "export should be human-diffable");
        assert!(blob.contains("\"lastSave\": 1234"));
        assert!(blob.contains("\"productionLines\""));
        assert!(blob.contains("\"totalEarned\""));
        // Unlock gates keep the flat discriminant key.
        assert!(blob.contains("\"unlockCondition\""));
        assert!(blob.contains("\"type\": \"spent\""));
    }
}
