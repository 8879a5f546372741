//! evdev node discovery by device name.

use std::path::PathBuf;

use crate::infrastructure::virtual_output::VIRTUAL_DEVICE_NAME;

/// Substring of the dial's evdev device name.
pub const DIAL_INPUT_NAME: &str = "ZOTAC Gaming Zone Dials";

/// Picks the first candidate, in sorted path order, whose name contains
/// [`DIAL_INPUT_NAME`].  The daemon's own virtual device never matches.
pub fn select_first_match<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = (PathBuf, Option<String>)>,
{
    let mut matches: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|(_, name)| {
            name.as_deref()
                .is_some_and(|n| n.contains(DIAL_INPUT_NAME) && !n.contains(VIRTUAL_DEVICE_NAME))
        })
        .map(|(path, _)| path)
        .collect();
    matches.sort();
    matches.into_iter().next()
}

/// Finds the dial's `/dev/input/eventN` node through `evdev::enumerate`.
#[cfg(target_os = "linux")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EvdevLocator;

#[cfg(target_os = "linux")]
impl EvdevLocator {
    pub fn locate(&self) -> Option<PathBuf> {
        select_first_match(
            evdev::enumerate().map(|(path, device)| (path, device.name().map(str::to_owned))),
        )
    }
}
