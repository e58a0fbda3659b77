use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CoreError, Result};
use crate::format::format_best_secs;
use crate::names::RiderNameTable;
use crate::registry::DeviceRegistry;

/// Publishes the per-device leaderboard to a fixed path.
///
/// Every publish is a full rewrite from the current registry state: the
/// rendered content goes to a temporary file beside the target, which is
/// then renamed over it. Readers never observe a partially written summary,
/// and a crash mid-write leaves the previous complete one intact.
#[derive(Debug, Clone)]
pub struct SummaryPublisher {
    path: PathBuf,
}

impl SummaryPublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the registry into summary text: one line per device that has
    /// a lap count or a best lap, in ascending identifier order.
    ///
    /// Deterministic for a given registry snapshot.
    pub fn render(registry: &DeviceRegistry, names: &RiderNameTable) -> String {
        let lines: Vec<String> = registry
            .iter()
            .filter(|(_, state)| state.has_laps())
            .map(|(device_id, state)| {
                format!(
                    "{}: {} laps Best: {}",
                    names.display_name(device_id),
                    state.lap_count,
                    format_best_secs(state.best_lap_ms),
                )
            })
            .collect();

        if lines.is_empty() {
            String::new()
        } else {
            lines.join("\n") + "\n"
        }
    }

    /// Render and durably replace the summary file.
    pub fn publish(&self, registry: &DeviceRegistry, names: &RiderNameTable) -> Result<()> {
        let content = Self::render(registry, names);
        let tmp = tmp_path(&self.path);

        write_scoped(&tmp, content.as_bytes()).map_err(|source| CoreError::Publish {
            path: self.path.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| CoreError::Publish {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), bytes = content.len(), "summary published");
        Ok(())
    }
}

fn tmp_path(target: &Path) -> PathBuf {
    let mut os = target.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

// Scoped so the handle is closed before the rename, on every exit path.
fn write_scoped(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::tracker;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "lapwire-summary-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir
    }

    fn registry_with_laps(laps: &[(u16, &[u64])]) -> DeviceRegistry {
        let mut registry = DeviceRegistry::new();
        let base = Instant::now();
        for (device_id, durations) in laps {
            let mut offset = 0;
            tracker::record(&mut registry, *device_id, base);
            for ms in *durations {
                offset += ms;
                tracker::record(&mut registry, *device_id, base + Duration::from_millis(offset));
            }
        }
        registry
    }

    #[test]
    fn test_render_ascending_order_with_fallback_names() {
        let registry = registry_with_laps(&[(79, &[21111]), (22, &[22220])]);
        let mut names = RiderNameTable::new();
        names.insert(22, "Luke");

        let text = SummaryPublisher::render(&registry, &names);
        assert_eq!(text, "Luke: 1 laps Best: 22.22s\nDevice 79: 1 laps Best: 21.111s\n");
    }

    #[test]
    fn test_render_skips_devices_without_laps() {
        let mut registry = registry_with_laps(&[(79, &[21111])]);
        // Device 33 was sighted once; no lap yet, no summary line.
        tracker::record(&mut registry, 33, Instant::now());

        let text = SummaryPublisher::render(&registry, &RiderNameTable::new());
        assert_eq!(text, "Device 79: 1 laps Best: 21.111s\n");
    }

    #[test]
    fn test_render_empty_registry_is_empty_string() {
        let registry = DeviceRegistry::new();
        assert_eq!(SummaryPublisher::render(&registry, &RiderNameTable::new()), "");
    }

    #[test]
    fn test_render_is_idempotent() {
        let registry = registry_with_laps(&[(22, &[1200, 900, 1500])]);
        let names = RiderNameTable::new();

        let first = SummaryPublisher::render(&registry, &names);
        let second = SummaryPublisher::render(&registry, &names);
        assert_eq!(first, second);
    }

    #[test]
    fn test_publish_writes_and_removes_tmp() {
        let dir = temp_dir("publish");
        let path = dir.join("laptimes.txt");
        let publisher = SummaryPublisher::new(&path);
        let registry = registry_with_laps(&[(79, &[21111])]);

        publisher
            .publish(&registry, &RiderNameTable::new())
            .expect("publish should succeed");

        let content = fs::read_to_string(&path).expect("summary should exist");
        assert_eq!(content, "Device 79: 1 laps Best: 21.111s\n");
        assert!(!tmp_path(&path).exists(), "tmp file should be renamed away");
    }

    #[test]
    fn test_failed_publish_leaves_previous_summary_intact() {
        let dir = temp_dir("failed");
        let path = dir.join("laptimes.txt");
        let publisher = SummaryPublisher::new(&path);
        let names = RiderNameTable::new();

        let registry = registry_with_laps(&[(79, &[21111])]);
        publisher
            .publish(&registry, &names)
            .expect("first publish should succeed");

        // Block the temporary path with a directory so the next write fails
        // before it can touch the target.
        fs::create_dir_all(tmp_path(&path)).expect("tmp blocker should be creatable");

        let registry = registry_with_laps(&[(79, &[900])]);
        let err = publisher
            .publish(&registry, &names)
            .expect_err("publish over a blocked tmp path should fail");
        assert!(matches!(err, CoreError::Publish { .. }));

        let content = fs::read_to_string(&path).expect("summary should still exist");
        assert_eq!(content, "Device 79: 1 laps Best: 21.111s\n");
    }

    #[test]
    fn test_publish_into_missing_directory_fails() {
        let dir = temp_dir("missing");
        let publisher = SummaryPublisher::new(dir.join("no-such").join("laptimes.txt"));
        let registry = registry_with_laps(&[(79, &[21111])]);

        let err = publisher
            .publish(&registry, &RiderNameTable::new())
            .expect_err("missing parent directory should fail");
        assert!(matches!(err, CoreError::Publish { .. }));
    }
}
