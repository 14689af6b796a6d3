//! Platform-specific ping command line conventions
//!
//! The system ping utilities disagree on how the reply count and the wait
//! time are spelled, and on the unit of the wait time. Each flavor knows how
//! to ask for exactly one echo request bounded by a millisecond timeout.

use crate::types::ParserKind;

/// Command line dialect of the system ping utility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingFlavor {
    /// Windows `ping.exe`: `-n <count> -w <milliseconds>`
    Windows,
    /// Linux iputils/busybox: `-c <count> -W <seconds>`
    Iputils,
    /// macOS and the BSDs: `-c <count> -W <milliseconds>`
    Bsd,
}

impl PingFlavor {
    /// Flavor of the ping utility shipped with the current platform
    pub fn current() -> Self {
        #[cfg(target_os = "windows")]
        {
            Self::Windows
        }
        #[cfg(any(target_os = "macos", target_os = "freebsd", target_os = "openbsd", target_os = "netbsd"))]
        {
            Self::Bsd
        }
        #[cfg(not(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd"
        )))]
        {
            Self::Iputils
        }
    }

    /// Arguments for a single echo request to `target` waiting at most `timeout_ms`
    pub fn args(&self, target: &str, timeout_ms: u32) -> Vec<String> {
        match self {
            Self::Windows => vec![
                target.to_string(),
                "-n".to_string(),
                "1".to_string(),
                "-w".to_string(),
                timeout_ms.to_string(),
            ],
            Self::Iputils => vec![
                "-c".to_string(),
                "1".to_string(),
                "-W".to_string(),
                iputils_wait_seconds(timeout_ms).to_string(),
                target.to_string(),
            ],
            Self::Bsd => vec![
                "-c".to_string(),
                "1".to_string(),
                "-W".to_string(),
                timeout_ms.to_string(),
                target.to_string(),
            ],
        }
    }

    /// Parser strategy that understands this flavor's reply lines
    pub fn default_parser(&self) -> ParserKind {
        match self {
            Self::Windows => ParserKind::Marker,
            Self::Iputils | Self::Bsd => ParserKind::Iputils,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Iputils => "iputils",
            Self::Bsd => "bsd",
        }
    }
}

/// iputils only accepts whole seconds for `-W`, and 0 means "wait forever"
pub fn iputils_wait_seconds(timeout_ms: u32) -> u32 {
    timeout_ms.div_ceil(1000).max(1)
}

/// Human-readable name of the current platform
pub fn get_platform_name() -> String {
    #[cfg(target_os = "windows")]
    {
        "Windows".to_string()
    }
    #[cfg(target_os = "macos")]
    {
        "macOS".to_string()
    }
    #[cfg(target_os = "linux")]
    {
        "Linux".to_string()
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        "Unknown".to_string()
    }
}
