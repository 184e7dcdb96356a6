//! Command line arguments and output target selection.

use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// File written when no window can be opened and no `--output` was given.
pub const FALLBACK_OUTPUT: &str = "activation_timing.png";

#[derive(Parser, Debug)]
#[command(
    name = "magnet-timing-chart",
    version,
    about = "Plot final speed against electromagnet activation time"
)]
pub struct Cli {
    /// Write the chart to this file instead of opening a window (png, jpg, bmp or svg).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Figure settings as JSON; omitted fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Open the written file with the system viewer.
    #[arg(long, action = ArgAction::SetTrue, requires = "output")]
    pub open: bool,

    /// Print the effective figure settings as JSON and exit.
    #[arg(long, action = ArgAction::SetTrue)]
    pub print_config: bool,
}

/// Where the chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Window,
    File(PathBuf),
}

impl Cli {
    /// An explicit `--output` always wins; without a display the chart is
    /// written to [`FALLBACK_OUTPUT`] instead of opening a window.
    pub fn target(&self, display_available: bool) -> OutputTarget {
        match &self.output {
            Some(path) => OutputTarget::File(path.clone()),
            None if display_available => OutputTarget::Window,
            None => OutputTarget::File(PathBuf::from(FALLBACK_OUTPUT)),
        }
    }
}

/// Whether a window can be opened, judged from the environment.
///
/// Only X11/Wayland platforms need a display server; macOS and Windows
/// always have a desktop session when run interactively.
pub fn display_available(var: impl Fn(&str) -> Option<OsString>) -> bool {
    if cfg!(all(unix, not(target_os = "macos"), not(target_os = "ios"))) {
        ["DISPLAY", "WAYLAND_DISPLAY", "WAYLAND_SOCKET"]
            .iter()
            .any(|name| var(name).is_some_and(|v| !v.is_empty()))
    } else {
        true
    }
}
