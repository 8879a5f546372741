//! Sysfs display backlight control.
//!
//! Each backlight surface is a directory under `/sys/class/backlight/`
//! containing two plain-text integer files:
//!
//! - `max_brightness` – the upper bound (read-only).
//! - `brightness` – the current level (writable, `0..=max_brightness`).
//!
//! The surface is resolved again on every adjustment, so a GPU driver reload
//! that recreates the directory is picked up without restarting the daemon.
//! When several surfaces exist the one whose name contains `amdgpu` wins,
//! otherwise the first in sorted order.

use std::fs;
use std::path::{Path, PathBuf};

use dial_core::RotationDirection;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::dispatch::BacklightControl;

/// Default sysfs class directory for backlight surfaces.
pub const DEFAULT_CLASS_ROOT: &str = "/sys/class/backlight";

/// Substring of the preferred surface name.
const PREFERRED_SURFACE: &str = "amdgpu";

/// Error type for backlight operations.
#[derive(Debug, Error)]
pub enum BacklightError {
    /// No surface exists under the class root.
    #[error("no backlight surface under {0}")]
    NoSurface(PathBuf),

    /// A sysfs attribute could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sysfs attribute did not contain an unsigned integer.
    #[error("unexpected content {content:?} in {path}")]
    Parse { path: PathBuf, content: String },
}

/// Computes the brightness after one detent.
///
/// `step = max(1, round(max * step_percent / 100))` and the result is clamped
/// to `0..=max`.
pub fn next_brightness(
    current: u32,
    max: u32,
    direction: RotationDirection,
    step_percent: u8,
) -> u32 {
    let scaled = (u64::from(max) * u64::from(step_percent) + 50) / 100;
    let step = u32::try_from(scaled).unwrap_or(u32::MAX).max(1);
    match direction {
        RotationDirection::Clockwise => current.saturating_add(step).min(max),
        RotationDirection::CounterClockwise => current.saturating_sub(step).min(max),
    }
}

/// Backlight controller over a sysfs class directory.
#[derive(Debug, Clone)]
pub struct SysfsBacklight {
    class_root: PathBuf,
}

impl SysfsBacklight {
    pub fn new(class_root: impl Into<PathBuf>) -> Self {
        Self {
            class_root: class_root.into(),
        }
    }

    /// Finds the surface directory to adjust.
    ///
    /// # Errors
    ///
    /// Returns [`BacklightError::NoSurface`] when the class root is missing
    /// or empty.
    pub fn resolve_surface(&self) -> Result<PathBuf, BacklightError> {
        let mut surfaces: Vec<PathBuf> = fs::read_dir(&self.class_root)
            .map_err(|_| BacklightError::NoSurface(self.class_root.clone()))?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .collect();
        surfaces.sort();

        let preferred = surfaces.iter().position(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.contains(PREFERRED_SURFACE))
        });
        match preferred {
            Some(i) => Ok(surfaces.swap_remove(i)),
            None => surfaces
                .into_iter()
                .next()
                .ok_or_else(|| BacklightError::NoSurface(self.class_root.clone())),
        }
    }

    /// Applies one detent and returns the value written.
    ///
    /// # Errors
    ///
    /// Returns a [`BacklightError`] if the surface cannot be resolved, read,
    /// parsed, or written.
    pub fn try_adjust(
        &self,
        direction: RotationDirection,
        step_percent: u8,
    ) -> Result<u32, BacklightError> {
        let surface = self.resolve_surface()?;
        let max = read_level(&surface.join("max_brightness"))?;
        let brightness_path = surface.join("brightness");
        let current = read_level(&brightness_path)?;

        let next = next_brightness(current, max, direction, step_percent);
        fs::write(&brightness_path, next.to_string()).map_err(|source| BacklightError::Io {
            path: brightness_path.clone(),
            source,
        })?;
        debug!("backlight {} {current} -> {next} (max {max})", surface.display());
        Ok(next)
    }
}

impl Default for SysfsBacklight {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_ROOT)
    }
}

impl BacklightControl for SysfsBacklight {
    fn adjust(&self, direction: RotationDirection, step_percent: u8) {
        if let Err(e) = self.try_adjust(direction, step_percent) {
            warn!("backlight adjustment skipped: {e}");
        }
    }
}

fn read_level(path: &Path) -> Result<u32, BacklightError> {
    let content = fs::read_to_string(path).map_err(|source| BacklightError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    content.trim().parse().map_err(|_| BacklightError::Parse {
        path: path.to_path_buf(),
        content,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use RotationDirection::{Clockwise, CounterClockwise};

    fn temp_class_root() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zone_dials_backlight_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn make_surface(root: &Path, name: &str, current: u32, max: u32) -> PathBuf {
        let surface = root.join(name);
        fs::create_dir_all(&surface).unwrap();
        fs::write(surface.join("max_brightness"), format!("{max}\n")).unwrap();
        fs::write(surface.join("brightness"), format!("{current}\n")).unwrap();
        surface
    }

    fn level(surface: &Path) -> u32 {
        fs::read_to_string(surface.join("brightness"))
            .unwrap()
            .trim()
            .parse()
            .unwrap()
    }

    // ── next_brightness ───────────────────────────────────────────────────────

    #[test]
    fn test_next_brightness_steps_by_percentage_of_max() {
        assert_eq!(next_brightness(100, 100, CounterClockwise, 5), 95);
        assert_eq!(next_brightness(50, 255, Clockwise, 5), 63);
    }

    #[test]
    fn test_next_brightness_step_is_at_least_one() {
        assert_eq!(next_brightness(3, 10, Clockwise, 1), 4);
        assert_eq!(next_brightness(3, 10, CounterClockwise, 0), 2);
    }

    #[test]
    fn test_next_brightness_never_leaves_bounds() {
        for max in [1u32, 7, 100, 255, 96000] {
            for current in [0, max / 2, max] {
                for pct in [1u8, 5, 50, 100] {
                    assert!(next_brightness(current, max, Clockwise, pct) <= max);
                    let down = next_brightness(current, max, CounterClockwise, pct);
                    assert!(down <= current, "down from {current} gave {down}");
                }
            }
        }
        assert_eq!(next_brightness(0, 100, CounterClockwise, 5), 0);
        assert_eq!(next_brightness(100, 100, Clockwise, 5), 100);
    }

    // ── Surface resolution ────────────────────────────────────────────────────

    #[test]
    fn test_resolve_prefers_amdgpu_surface() {
        let root = temp_class_root();
        make_surface(&root, "acpi_video0", 5, 10);
        let amd = make_surface(&root, "amdgpu_bl1", 5, 10);

        let resolved = SysfsBacklight::new(&root).resolve_surface().unwrap();

        assert_eq!(resolved, amd);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_resolve_falls_back_to_first_sorted_surface() {
        let root = temp_class_root();
        make_surface(&root, "intel_backlight", 5, 10);
        let first = make_surface(&root, "acpi_video0", 5, 10);

        let resolved = SysfsBacklight::new(&root).resolve_surface().unwrap();

        assert_eq!(resolved, first);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_resolve_without_surfaces_is_no_surface_error() {
        let root = temp_class_root();

        let result = SysfsBacklight::new(&root).resolve_surface();

        assert!(matches!(result, Err(BacklightError::NoSurface(_))));
        fs::remove_dir_all(&root).ok();
    }

    // ── Adjustment ────────────────────────────────────────────────────────────

    #[test]
    fn test_counter_clockwise_detent_at_full_brightness_writes_95() {
        // Arrange
        let root = temp_class_root();
        let surface = make_surface(&root, "amdgpu_bl0", 100, 100);
        let backlight = SysfsBacklight::new(&root);

        // Act
        backlight.adjust(CounterClockwise, 5);

        // Assert
        assert_eq!(level(&surface), 95);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_unparsable_level_is_reported_and_left_untouched() {
        let root = temp_class_root();
        let surface = root.join("amdgpu_bl0");
        fs::create_dir_all(&surface).unwrap();
        fs::write(surface.join("max_brightness"), "255\n").unwrap();
        fs::write(surface.join("brightness"), "bright\n").unwrap();

        let result = SysfsBacklight::new(&root).try_adjust(Clockwise, 5);

        assert!(matches!(result, Err(BacklightError::Parse { .. })));
        assert_eq!(
            fs::read_to_string(surface.join("brightness")).unwrap(),
            "bright\n"
        );
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_missing_class_root_is_swallowed_by_adjust() {
        let backlight = SysfsBacklight::new("/nonexistent/zone-dials/backlight");
        backlight.adjust(Clockwise, 5);
        assert!(backlight.try_adjust(Clockwise, 5).is_err());
    }
}
