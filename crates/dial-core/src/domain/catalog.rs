//! The action catalog and the per-dial bindings.
//!
//! Each dial is bound, once at startup, to one named entry of a fixed
//! catalog.  The bindings never change while the process runs; to change what
//! a dial does, restart the daemon with different `--left` / `--right`
//! arguments.
//!
//! # Why reject unknown names at startup?
//!
//! An unknown action name is a configuration mistake.  Reporting it before the
//! daemon starts polling (with the list of valid names) makes the mistake
//! visible in `systemctl status` instead of turning a dial into a silent
//! no-op.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::domain::dial::{DialIdentity, RotationDirection};
use crate::keymap::{KeyCode, RelAxis};

/// Action bound to the left dial when nothing else is configured.
pub const DEFAULT_LEFT_ACTION: &str = "volume";
/// Action bound to the right dial when nothing else is configured.
pub const DEFAULT_RIGHT_ACTION: &str = "brightness";

/// Error type for catalog lookups.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// The name does not appear in the catalog.
    #[error("unknown action '{name}' for the {dial} dial (valid actions: {valid})")]
    UnknownAction {
        dial: DialIdentity,
        name: String,
        valid: String,
    },
}

/// What a dial does when it turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionProfile {
    /// Press and release one key per detent.
    KeyPair {
        clockwise: KeyCode,
        counter_clockwise: KeyCode,
    },
    /// Move a relative axis by `direction.sign() * multiplier`, optionally
    /// while holding a modifier key.
    RelativeAxis {
        axis: RelAxis,
        multiplier: i32,
        modifier: Option<KeyCode>,
    },
    /// Step the display backlight by a percentage of its maximum.
    Backlight { step_percent: u8 },
}

impl ActionProfile {
    /// Returns the key to tap for `direction`, if this is a key pair.
    pub fn key_for(&self, direction: RotationDirection) -> Option<KeyCode> {
        match (self, direction) {
            (ActionProfile::KeyPair { clockwise, .. }, RotationDirection::Clockwise) => {
                Some(*clockwise)
            }
            (
                ActionProfile::KeyPair {
                    counter_clockwise, ..
                },
                RotationDirection::CounterClockwise,
            ) => Some(*counter_clockwise),
            _ => None,
        }
    }

    /// Returns the signed axis movement for `direction`, if this is a
    /// relative-axis profile.
    pub fn relative_amount(&self, direction: RotationDirection) -> Option<i32> {
        match self {
            ActionProfile::RelativeAxis { multiplier, .. } => Some(direction.sign() * multiplier),
            _ => None,
        }
    }
}

/// The fixed table of named actions.
///
/// The catalog is a zero-sized handle over a static table; it exists so the
/// lookup, the name listing, and the capability union live in one place.
pub struct ActionCatalog;

const ENTRIES: &[(&str, ActionProfile)] = &[
    (
        "volume",
        ActionProfile::KeyPair {
            clockwise: KeyCode::VolumeUp,
            counter_clockwise: KeyCode::VolumeDown,
        },
    ),
    ("brightness", ActionProfile::Backlight { step_percent: 5 }),
    (
        "scroll",
        ActionProfile::RelativeAxis {
            axis: RelAxis::Wheel,
            multiplier: 1,
            modifier: None,
        },
    ),
    (
        "scroll_inverted",
        ActionProfile::RelativeAxis {
            axis: RelAxis::Wheel,
            multiplier: -1,
            modifier: None,
        },
    ),
    (
        "scroll_horizontal",
        ActionProfile::RelativeAxis {
            axis: RelAxis::HWheel,
            multiplier: 1,
            modifier: None,
        },
    ),
    (
        "arrows_vertical",
        ActionProfile::KeyPair {
            clockwise: KeyCode::Up,
            counter_clockwise: KeyCode::Down,
        },
    ),
    (
        "arrows_horizontal",
        ActionProfile::KeyPair {
            clockwise: KeyCode::Right,
            counter_clockwise: KeyCode::Left,
        },
    ),
    (
        "media",
        ActionProfile::KeyPair {
            clockwise: KeyCode::NextSong,
            counter_clockwise: KeyCode::PreviousSong,
        },
    ),
    (
        "page_scroll",
        ActionProfile::KeyPair {
            clockwise: KeyCode::PageUp,
            counter_clockwise: KeyCode::PageDown,
        },
    ),
    (
        "zoom",
        ActionProfile::RelativeAxis {
            axis: RelAxis::Wheel,
            multiplier: 1,
            modifier: Some(KeyCode::LeftCtrl),
        },
    ),
    (
        "zoom_keys",
        ActionProfile::KeyPair {
            clockwise: KeyCode::ZoomIn,
            counter_clockwise: KeyCode::ZoomOut,
        },
    ),
];

impl ActionCatalog {
    /// Looks up an action by name (exact, case-sensitive).
    pub fn lookup(name: &str) -> Option<ActionProfile> {
        ENTRIES
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, profile)| *profile)
    }

    /// All action names in catalog order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        ENTRIES.iter().map(|(name, _)| *name)
    }

    /// All `(name, profile)` entries in catalog order.
    pub fn entries() -> impl Iterator<Item = (&'static str, ActionProfile)> {
        ENTRIES.iter().copied()
    }

    /// The union of every key and axis any catalog entry can emit.
    ///
    /// This is what the virtual output device declares, regardless of which
    /// two actions are active in this run.
    pub fn capabilities() -> Capabilities {
        let mut caps = Capabilities::default();
        for (_, profile) in ENTRIES {
            match *profile {
                ActionProfile::KeyPair {
                    clockwise,
                    counter_clockwise,
                } => {
                    caps.keys.insert(clockwise);
                    caps.keys.insert(counter_clockwise);
                }
                ActionProfile::RelativeAxis { axis, modifier, .. } => {
                    caps.axes.insert(axis);
                    if let Some(m) = modifier {
                        caps.keys.insert(m);
                    }
                }
                ActionProfile::Backlight { .. } => {}
            }
        }
        caps
    }
}

/// Key and axis capability set of a synthetic input device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub keys: BTreeSet<KeyCode>,
    pub axes: BTreeSet<RelAxis>,
}

/// The immutable left/right action bindings for one daemon run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialBindings {
    pub left: ActionProfile,
    pub right: ActionProfile,
}

impl DialBindings {
    /// Resolves both action names against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownAction`] for the first name that is not
    /// in the catalog.
    pub fn from_names(left: &str, right: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            left: resolve(DialIdentity::Left, left)?,
            right: resolve(DialIdentity::Right, right)?,
        })
    }

    /// Returns the profile bound to `identity`.
    pub fn profile(&self, identity: DialIdentity) -> &ActionProfile {
        match identity {
            DialIdentity::Left => &self.left,
            DialIdentity::Right => &self.right,
        }
    }
}

impl Default for DialBindings {
    fn default() -> Self {
        // Both defaults are catalog entries; the fallbacks only guard against
        // a future rename of the table.
        Self {
            left: ActionCatalog::lookup(DEFAULT_LEFT_ACTION).unwrap_or(ActionProfile::KeyPair {
                clockwise: KeyCode::VolumeUp,
                counter_clockwise: KeyCode::VolumeDown,
            }),
            right: ActionCatalog::lookup(DEFAULT_RIGHT_ACTION)
                .unwrap_or(ActionProfile::Backlight { step_percent: 5 }),
        }
    }
}

fn resolve(dial: DialIdentity, name: &str) -> Result<ActionProfile, CatalogError> {
    ActionCatalog::lookup(name).ok_or_else(|| CatalogError::UnknownAction {
        dial,
        name: name.to_string(),
        valid: ActionCatalog::names().collect::<Vec<_>>().join(", "),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Lookup ────────────────────────────────────────────────────────────────

    #[test]
    fn test_lookup_volume_returns_volume_key_pair() {
        assert_eq!(
            ActionCatalog::lookup("volume"),
            Some(ActionProfile::KeyPair {
                clockwise: KeyCode::VolumeUp,
                counter_clockwise: KeyCode::VolumeDown,
            })
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(ActionCatalog::lookup("Volume"), None);
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let names: Vec<_> = ActionCatalog::names().collect();
        let unique: BTreeSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_zoom_holds_left_ctrl_while_scrolling() {
        let zoom = ActionCatalog::lookup("zoom").expect("zoom must exist");
        assert_eq!(
            zoom,
            ActionProfile::RelativeAxis {
                axis: RelAxis::Wheel,
                multiplier: 1,
                modifier: Some(KeyCode::LeftCtrl),
            }
        );
    }

    // ── Profile helpers ───────────────────────────────────────────────────────

    #[test]
    fn test_key_for_picks_branch_by_direction() {
        let profile = ActionCatalog::lookup("media").unwrap();
        assert_eq!(
            profile.key_for(RotationDirection::Clockwise),
            Some(KeyCode::NextSong)
        );
        assert_eq!(
            profile.key_for(RotationDirection::CounterClockwise),
            Some(KeyCode::PreviousSong)
        );
    }

    #[test]
    fn test_relative_amount_applies_multiplier_sign() {
        let inverted = ActionCatalog::lookup("scroll_inverted").unwrap();
        assert_eq!(inverted.relative_amount(RotationDirection::Clockwise), Some(-1));
        assert_eq!(
            inverted.relative_amount(RotationDirection::CounterClockwise),
            Some(1)
        );
    }

    #[test]
    fn test_non_axis_profile_has_no_relative_amount() {
        let backlight = ActionProfile::Backlight { step_percent: 5 };
        assert_eq!(backlight.relative_amount(RotationDirection::Clockwise), None);
        assert_eq!(backlight.key_for(RotationDirection::Clockwise), None);
    }

    // ── Capabilities ──────────────────────────────────────────────────────────

    #[test]
    fn test_capabilities_cover_every_catalog_key_and_axis() {
        // Arrange
        let caps = ActionCatalog::capabilities();

        // Act / Assert
        for (name, profile) in ActionCatalog::entries() {
            match profile {
                ActionProfile::KeyPair {
                    clockwise,
                    counter_clockwise,
                } => {
                    assert!(caps.keys.contains(&clockwise), "{name}: missing {clockwise}");
                    assert!(caps.keys.contains(&counter_clockwise), "{name}");
                }
                ActionProfile::RelativeAxis { axis, modifier, .. } => {
                    assert!(caps.axes.contains(&axis), "{name}: missing {axis}");
                    if let Some(m) = modifier {
                        assert!(caps.keys.contains(&m), "{name}: missing modifier {m}");
                    }
                }
                ActionProfile::Backlight { .. } => {}
            }
        }
    }

    #[test]
    fn test_capabilities_contain_nothing_outside_the_catalog() {
        let caps = ActionCatalog::capabilities();
        // Every KeyCode variant is used by some entry, so the sets match exactly.
        assert_eq!(caps.keys.len(), KeyCode::ALL.len());
        assert_eq!(
            caps.axes.iter().copied().collect::<Vec<_>>(),
            vec![RelAxis::HWheel, RelAxis::Wheel]
        );
    }

    // ── Bindings ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_bindings_are_volume_and_brightness() {
        let bindings = DialBindings::default();
        assert_eq!(Some(bindings.left), ActionCatalog::lookup("volume"));
        assert_eq!(Some(bindings.right), ActionCatalog::lookup("brightness"));
    }

    #[test]
    fn test_from_names_resolves_both_dials() {
        let bindings = DialBindings::from_names("scroll", "media").expect("valid names");
        assert_eq!(
            bindings.profile(DialIdentity::Left),
            &ActionCatalog::lookup("scroll").unwrap()
        );
        assert_eq!(
            bindings.profile(DialIdentity::Right),
            &ActionCatalog::lookup("media").unwrap()
        );
    }

    #[test]
    fn test_from_names_rejects_unknown_right_action() {
        // Act
        let err = DialBindings::from_names("volume", "warp_drive").unwrap_err();

        // Assert
        match err {
            CatalogError::UnknownAction { dial, name, valid } => {
                assert_eq!(dial, DialIdentity::Right);
                assert_eq!(name, "warp_drive");
                assert!(valid.contains("brightness"));
            }
        }
    }

    #[test]
    fn test_unknown_action_message_lists_valid_names() {
        let err = DialBindings::from_names("nope", "volume").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("left dial"), "got: {msg}");
        assert!(msg.contains("page_scroll"), "got: {msg}");
    }
}
