use std::collections::HashMap;
use std::path::Path;

use crate::error::{CoreError, Result};

/// Static mapping from device identifier to rider display name.
///
/// Consulted read-only at runtime. Devices without an entry render as
/// `"Device {id}"` everywhere a name is shown.
#[derive(Debug, Clone, Default)]
pub struct RiderNameTable {
    names: HashMap<u16, String>,
}

impl RiderNameTable {
    /// An empty table; every device falls back to the synthesized label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON object file mapping identifier to name:
    ///
    /// ```json
    /// { "22": "Luke", "33": "Anakin", "79": "Ventress" }
    /// ```
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::RiderTableIo {
            path: path.to_path_buf(),
            source,
        })?;
        let names: HashMap<u16, String> =
            serde_json::from_str(&text).map_err(|source| CoreError::RiderTableParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { names })
    }

    /// Display name for a device, falling back to `"Device {id}"`.
    pub fn display_name(&self, device_id: u16) -> String {
        self.names
            .get(&device_id)
            .cloned()
            .unwrap_or_else(|| format!("Device {device_id}"))
    }

    pub fn insert(&mut self, device_id: u16, name: impl Into<String>) {
        self.names.insert(device_id, name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(u16, String)> for RiderNameTable {
    fn from_iter<I: IntoIterator<Item = (u16, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_device_uses_rider_name() {
        let mut table = RiderNameTable::new();
        table.insert(79, "Ventress");
        assert_eq!(table.display_name(79), "Ventress");
    }

    #[test]
    fn test_unknown_device_synthesizes_label() {
        let table = RiderNameTable::new();
        assert_eq!(table.display_name(42), "Device 42");
    }

    #[test]
    fn test_from_json_file() {
        let dir = std::env::temp_dir().join(format!(
            "lapwire-names-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let path = dir.join("riders.json");
        std::fs::write(&path, r#"{ "22": "Luke", "33": "Anakin" }"#)
            .expect("rider file should be writable");

        let table = RiderNameTable::from_json_file(&path).expect("rider file should load");
        assert_eq!(table.len(), 2);
        assert_eq!(table.display_name(22), "Luke");
        assert_eq!(table.display_name(79), "Device 79");
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = RiderNameTable::from_json_file(Path::new("/nonexistent/riders.json"))
            .expect_err("missing file should fail");
        assert!(matches!(err, CoreError::RiderTableIo { .. }));
    }

    #[test]
    fn test_from_json_file_malformed() {
        let dir = std::env::temp_dir().join(format!("lapwire-badnames-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let path = dir.join("riders.json");
        std::fs::write(&path, "[1, 2, 3]").expect("rider file should be writable");

        let err = RiderNameTable::from_json_file(&path).expect_err("array should not parse");
        assert!(matches!(err, CoreError::RiderTableParse { .. }));
    }
}
