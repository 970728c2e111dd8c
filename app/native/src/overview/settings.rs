//! Resolved controller settings.

use crate::config::{
    AnimationTimings, ConfigError, ForesightConfig, TemporaryFilter, WindowAddedPolicy,
};
use crate::overview::temporary::TemporaryWindowPatterns;
use crate::shell::{OverviewView, WorkspaceId};

/// Immutable settings shared by every controller the extension creates.
#[derive(Debug, Clone, Default)]
pub struct OverviewSettings {
    /// Overview page to open.
    pub overview_view: OverviewView,
    /// Close-animation delays.
    pub timings: AnimationTimings,
    /// Which overview a new window dismisses.
    pub window_added_policy: WindowAddedPolicy,
    /// Scope of the temporary-window filter.
    pub temporary_filter: TemporaryFilter,
    /// Never auto-show on workspace 0.
    pub keep_first_workspace_quiet: bool,
    /// Temporary window patterns.
    pub patterns: TemporaryWindowPatterns,
}

impl OverviewSettings {
    /// Resolves settings from the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] if a configured temporary window
    /// rule is malformed.
    pub fn from_config(config: &ForesightConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            overview_view: config.overview_view,
            timings: config.animation,
            window_added_policy: config.window_added_policy,
            temporary_filter: config.temporary_filter,
            keep_first_workspace_quiet: config.keep_first_workspace_quiet,
            patterns: TemporaryWindowPatterns::from_config(config)?,
        })
    }

    /// Returns `true` if the overview may be opened automatically on `workspace`.
    #[must_use]
    pub fn may_auto_show(&self, workspace: WorkspaceId) -> bool {
        !(self.keep_first_workspace_quiet && workspace == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemporaryWindowRule;

    #[test]
    fn test_from_default_config() {
        let settings = OverviewSettings::from_config(&ForesightConfig::default()).unwrap();

        assert_eq!(settings.overview_view, OverviewView::Windows);
        assert_eq!(settings.timings, AnimationTimings::default());
        assert_eq!(settings.patterns.len(), TemporaryWindowPatterns::builtin().len());
        assert!(settings.may_auto_show(0));
    }

    #[test]
    fn test_quiet_first_workspace() {
        let config = ForesightConfig { keep_first_workspace_quiet: true, ..Default::default() };
        let settings = OverviewSettings::from_config(&config).unwrap();

        assert!(!settings.may_auto_show(0));
        assert!(settings.may_auto_show(1));
    }

    #[test]
    fn test_invalid_rule_propagates() {
        let config = ForesightConfig {
            temporary_windows: vec![TemporaryWindowRule::default()],
            ..Default::default()
        };
        assert!(OverviewSettings::from_config(&config).is_err());
    }
}
