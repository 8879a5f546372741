//! Storage infrastructure: the daemon's TOML configuration file.
//!
//! The file is optional.  Every field has a default, so a missing file, a
//! missing section, or a missing key all fall back to built-in values, and
//! command-line flags override whatever the file says.

pub mod config;
