//! Zone dial daemon: entry point.
//!
//! Watches the handheld's two rotary dials and turns every detent into the
//! action bound to that dial: a key tap, a scroll step, or a display
//! brightness change.
//!
//! # Usage
//!
//! ```text
//! zone-dials [OPTIONS]
//!
//! Options:
//!   --left <ACTION>         Action bound to the left dial  [default: volume]
//!   --right <ACTION>        Action bound to the right dial [default: brightness]
//!   --mode <MODE>           hidraw | evdev                 [default: hidraw]
//!   --config <PATH>         Config file [default: /etc/zone-dials/config.toml]
//!   --list-actions          Print the accepted action names and exit
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable             | Overrides   |
//! |----------------------|-------------|
//! | `ZONE_DIALS_LEFT`    | `--left`    |
//! | `ZONE_DIALS_RIGHT`   | `--right`   |
//! | `ZONE_DIALS_MODE`    | `--mode`    |
//! | `ZONE_DIALS_CONFIG`  | `--config`  |
//! | `RUST_LOG`           | `[logging] level` |
//!
//! Flags and environment variables take precedence over the config file.
//!
//! # Startup failures
//!
//! An unknown action name, a malformed config file, or a virtual device that
//! cannot be created ends the process with a non-zero exit code.  Everything
//! after startup (missing device, unplug, grab contention, backlight errors)
//! is retried forever.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use dial_core::{ActionCatalog, DialBindings};
use dial_daemon::infrastructure::{
    event_source::SourceMode,
    storage::config::{load_config, DaemonConfig, DEFAULT_CONFIG_PATH},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Zone dial daemon.
#[derive(Debug, Parser)]
#[command(
    name = "zone-dials",
    about = "Maps the handheld's rotary dials to key, scroll, and brightness actions",
    version
)]
struct Cli {
    /// Action bound to the left dial (see --list-actions).
    #[arg(long, env = "ZONE_DIALS_LEFT")]
    left: Option<String>,

    /// Action bound to the right dial (see --list-actions).
    #[arg(long, env = "ZONE_DIALS_RIGHT")]
    right: Option<String>,

    /// Hardware integration mode.
    #[arg(long, value_enum, env = "ZONE_DIALS_MODE")]
    mode: Option<SourceMode>,

    /// Path to the TOML config file.  A missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, env = "ZONE_DIALS_CONFIG")]
    config: PathBuf,

    /// Print the accepted action names and exit.
    #[arg(long)]
    list_actions: bool,
}

/// Effective settings after merging flags over the config file.
#[derive(Debug)]
struct Settings {
    bindings: DialBindings,
    mode: SourceMode,
    config: DaemonConfig,
}

impl Cli {
    /// Merges the flags over `config` and validates the action names.
    ///
    /// # Errors
    ///
    /// Returns an error naming the valid actions if either dial is bound to
    /// an unknown name.
    fn into_settings(self, config: DaemonConfig) -> anyhow::Result<Settings> {
        let left = self.left.unwrap_or_else(|| config.dials.left.clone());
        let right = self.right.unwrap_or_else(|| config.dials.right.clone());
        let bindings =
            DialBindings::from_names(&left, &right).context("invalid dial binding")?;
        Ok(Settings {
            bindings,
            mode: self.mode.unwrap_or(config.device.mode),
            config,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_actions {
        for name in ActionCatalog::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // RUST_LOG wins; otherwise the config file level; otherwise `info`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.logging.level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match cli.into_settings(config) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e:#}");
            return Err(e);
        }
    };

    if let Err(e) = run(settings).await {
        error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

#[cfg(target_os = "linux")]
async fn run(settings: Settings) -> anyhow::Result<()> {
    use dial_daemon::application::{
        dispatch::DispatchActionUseCase,
        session::{DialBackend, DialSession, SessionConfig},
    };
    use dial_daemon::infrastructure::{
        backlight::SysfsBacklight,
        event_source::{evdev::EvdevBackend, hidraw::HidrawBackend},
        locator::{EvdevLocator, HidrawLocator},
        virtual_output::linux::UinputOutput,
    };
    use tokio::signal::unix::{signal, SignalKind};

    fn spawn_session<B>(
        backend: B,
        dispatcher: DispatchActionUseCase,
        config: SessionConfig,
        running: Arc<AtomicBool>,
    ) -> tokio::task::JoinHandle<()>
    where
        B: DialBackend + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            DialSession::new(backend, dispatcher, config, running).run();
        })
    }

    let Settings {
        bindings,
        mode,
        config,
    } = settings;

    info!(
        left = ?bindings.left,
        right = ?bindings.right,
        %mode,
        "Zone dial daemon starting"
    );

    let output = UinputOutput::new().context("failed to create the virtual input device")?;
    let backlight = SysfsBacklight::new(config.backlight.class_root.clone());
    let dispatcher =
        DispatchActionUseCase::new(Arc::new(bindings), Arc::new(output), Arc::new(backlight));

    // ── Graceful shutdown flag ─────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let session_config = config.timing.session();
    let heartbeat = config.timing.heartbeat();

    let session = match mode {
        SourceMode::Hidraw => spawn_session(
            HidrawBackend::new(HidrawLocator::default(), heartbeat),
            dispatcher,
            session_config,
            Arc::clone(&running),
        ),
        SourceMode::Evdev => spawn_session(
            EvdevBackend::new(EvdevLocator, heartbeat),
            dispatcher,
            session_config,
            Arc::clone(&running),
        ),
    };

    let mut sigterm = signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl+C")?;
            info!("received SIGINT; shutting down");
        }
        _ = sigterm.recv() => info!("received SIGTERM; shutting down"),
    }

    running.store(false, Ordering::Relaxed);
    session.await.context("dial session task panicked")?;

    info!("Zone dial daemon stopped");
    Ok(())
}

#[cfg(not(target_os = "linux"))]
async fn run(_settings: Settings) -> anyhow::Result<()> {
    anyhow::bail!("zone-dials needs the Linux input subsystem (hidraw, evdev, uinput)")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dial_core::{ActionProfile, KeyCode};

    #[test]
    fn test_cli_defaults_leave_bindings_to_config() {
        let cli = Cli::parse_from(["zone-dials"]);
        assert_eq!(cli.left, None);
        assert_eq!(cli.right, None);
        assert_eq!(cli.mode, None);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.list_actions);
    }

    #[test]
    fn test_settings_from_defaults_bind_volume_and_brightness() {
        let settings = Cli::parse_from(["zone-dials"])
            .into_settings(DaemonConfig::default())
            .unwrap();

        assert_eq!(
            settings.bindings.left,
            ActionProfile::KeyPair {
                clockwise: KeyCode::VolumeUp,
                counter_clockwise: KeyCode::VolumeDown,
            }
        );
        assert_eq!(
            settings.bindings.right,
            ActionProfile::Backlight { step_percent: 5 }
        );
        assert_eq!(settings.mode, SourceMode::Hidraw);
    }

    #[test]
    fn test_flags_override_config_file() {
        // Arrange
        let mut config = DaemonConfig::default();
        config.dials.left = "media".to_string();
        config.device.mode = SourceMode::Hidraw;

        // Act
        let settings = Cli::parse_from(["zone-dials", "--left", "scroll", "--mode", "evdev"])
            .into_settings(config)
            .unwrap();

        // Assert
        assert_eq!(settings.bindings, DialBindings::from_names("scroll", "brightness").unwrap());
        assert_eq!(settings.mode, SourceMode::Evdev);
    }

    #[test]
    fn test_config_file_used_when_flag_absent() {
        let mut config = DaemonConfig::default();
        config.dials.right = "page_scroll".to_string();

        let settings = Cli::parse_from(["zone-dials"]).into_settings(config).unwrap();

        assert_eq!(settings.bindings, DialBindings::from_names("volume", "page_scroll").unwrap());
    }

    #[test]
    fn test_unknown_action_is_rejected_with_valid_names() {
        let err = Cli::parse_from(["zone-dials", "--right", "teleport"])
            .into_settings(DaemonConfig::default())
            .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("teleport"), "{message}");
        assert!(message.contains("volume"), "{message}");
    }

    #[test]
    fn test_unknown_mode_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["zone-dials", "--mode", "usb"]);
        assert!(result.is_err());
    }
}
