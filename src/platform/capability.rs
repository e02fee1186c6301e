//! Platform capability detection.
//!
//! Resolved once at startup from the configured platform API version. The
//! result decides which of the mutually exclusive progress listeners is
//! registered for the lifetime of the process.

use semver::Version;
use tracing::info;

/// First platform API version that raises advancement events.
const ADVANCEMENT_API: Version = Version::new(7, 0, 0);

/// Which progress event family the platform raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvents {
    /// Newer platforms: advancement grants.
    Advancements,
    /// Older platforms: legacy achievements.
    Achievements,
}

/// Optional platform features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub progress: ProgressEvents,
}

impl Capabilities {
    /// Detect capabilities for a platform API version.
    pub fn detect(version: &Version) -> Self {
        let progress = if *version >= ADVANCEMENT_API {
            ProgressEvents::Advancements
        } else {
            info!(
                "Platform API {} has no advancement events, using legacy achievements",
                version
            );
            ProgressEvents::Achievements
        };

        Self { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_platform_uses_advancements() {
        let caps = Capabilities::detect(&Version::parse("7.1.0").unwrap());
        assert_eq!(caps.progress, ProgressEvents::Advancements);
    }

    #[test]
    fn test_exact_boundary_uses_advancements() {
        let caps = Capabilities::detect(&Version::new(7, 0, 0));
        assert_eq!(caps.progress, ProgressEvents::Advancements);
    }

    #[test]
    fn test_old_platform_uses_achievements() {
        let caps = Capabilities::detect(&Version::parse("5.2.0").unwrap());
        assert_eq!(caps.progress, ProgressEvents::Achievements);
    }

    #[test]
    fn test_prerelease_before_boundary() {
        let caps = Capabilities::detect(&Version::parse("7.0.0-rc.1").unwrap());
        assert_eq!(caps.progress, ProgressEvents::Achievements);
    }
}
