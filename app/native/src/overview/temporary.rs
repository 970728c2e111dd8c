//! Temporary window patterns.
//!
//! Some applications briefly open splash, login or updater windows before
//! their real window appears. Those windows must never open or dismiss the
//! overview. They are recognised by a fixed, ordered table of patterns,
//! optionally extended from the configuration file.
//!
//! # Matching
//!
//! A pattern matches a window when all of the following hold:
//!
//! - the title equals the pattern title, or matches its regular expression
//! - the `WM_CLASS` equals the pattern class (both absent counts as equal)
//! - the sandboxed app id equals the pattern app id, or the window has no
//!   app id at all (unless strict app id matching is enabled)

use regex::Regex;

use crate::config::{ConfigError, ForesightConfig, TemporaryWindowRule};
use crate::shell::Window;

/// How a pattern matches the window title.
#[derive(Debug, Clone)]
pub enum TitlePattern {
    /// Exact, case-sensitive text.
    Exact(String),
    /// Regular expression.
    Regex(Regex),
}

impl TitlePattern {
    /// Returns `true` if `title` matches.
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        match self {
            Self::Exact(text) => text == title,
            Self::Regex(regex) => regex.is_match(title),
        }
    }

    /// Returns the pattern source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(text) => text,
            Self::Regex(regex) => regex.as_str(),
        }
    }
}

/// A single temporary window pattern.
#[derive(Debug, Clone)]
pub struct TemporaryWindowPattern {
    /// Title matcher.
    pub title: TitlePattern,
    /// Expected `WM_CLASS`, `None` for windows without a class.
    pub wm_class: Option<String>,
    /// Sandboxed application id the pattern belongs to.
    pub app_id: String,
}

impl TemporaryWindowPattern {
    /// Returns `true` if the window matches this pattern.
    #[must_use]
    pub fn matches(&self, window: &Window, strict_app_id: bool) -> bool {
        if !self.title.matches(&window.title) {
            return false;
        }

        if window.wm_class != self.wm_class {
            return false;
        }

        match window.sandboxed_app_id.as_deref() {
            Some(app_id) => app_id == self.app_id,
            None => !strict_app_id,
        }
    }
}

/// Title part of a built-in pattern.
enum BuiltinTitle {
    Exact(&'static str),
    Regex(&'static str),
}

/// Built-in patterns: (title, `WM_CLASS`, app id).
const BUILTIN_PATTERNS: &[(BuiltinTitle, Option<&str>, &str)] = &[
    // Steam bootstrapper and updater, before the client sets a class
    (BuiltinTitle::Exact("Steam"), None, "com.valvesoftware.Steam"),
    (BuiltinTitle::Exact("Sign in to Steam"), Some("steam"), "com.valvesoftware.Steam"),
    (BuiltinTitle::Regex(r"^Steam - (Self Updater|Updating)"), None, "com.valvesoftware.Steam"),
    (BuiltinTitle::Exact("Discord Updater"), Some("discord"), "com.discordapp.Discord"),
    (BuiltinTitle::Regex(r"^(Updating|Launching) .+"), Some("heroic"), "com.heroicgameslauncher.hgl"),
    (BuiltinTitle::Exact("splash"), Some("jetbrains-toolbox"), "com.jetbrains.Toolbox"),
];

/// The ordered, immutable set of temporary window patterns.
#[derive(Debug, Clone)]
pub struct TemporaryWindowPatterns {
    patterns: Vec<TemporaryWindowPattern>,
    strict_app_id: bool,
}

impl TemporaryWindowPatterns {
    /// Returns the built-in pattern table with lenient app id matching.
    #[must_use]
    pub fn builtin() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .filter_map(|(title, wm_class, app_id)| {
                let title = match title {
                    BuiltinTitle::Exact(text) => TitlePattern::Exact((*text).to_string()),
                    BuiltinTitle::Regex(source) => match Regex::new(source) {
                        Ok(regex) => TitlePattern::Regex(regex),
                        Err(err) => {
                            tracing::warn!(pattern = source, error = %err, "foresight: skipping built-in pattern");
                            return None;
                        }
                    },
                };
                Some(TemporaryWindowPattern {
                    title,
                    wm_class: wm_class.map(str::to_string),
                    app_id: (*app_id).to_string(),
                })
            })
            .collect();

        Self { patterns, strict_app_id: false }
    }

    /// Builds the pattern set from the built-in table plus configured rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] if a configured rule sets both or
    /// neither of `title` and `titleRegex`, has an empty app id, or carries an
    /// invalid regular expression.
    pub fn from_config(config: &ForesightConfig) -> Result<Self, ConfigError> {
        let mut set = Self::builtin();
        set.strict_app_id = config.strict_app_id_match;

        for (index, rule) in config.temporary_windows.iter().enumerate() {
            set.patterns.push(compile_rule(index, rule)?);
        }

        Ok(set)
    }

    /// Returns `true` if the window is a known temporary window.
    #[must_use]
    pub fn is_temporary(&self, window: &Window) -> bool { self.matching(window).is_some() }

    /// Returns the first pattern matching the window, with its index.
    #[must_use]
    pub fn matching(&self, window: &Window) -> Option<(usize, &TemporaryWindowPattern)> {
        self.patterns
            .iter()
            .enumerate()
            .find(|(_, pattern)| pattern.matches(window, self.strict_app_id))
    }

    /// Returns whether app ids are matched strictly.
    #[must_use]
    pub const fn strict_app_id(&self) -> bool { self.strict_app_id }

    /// Iterates over the patterns in matching order.
    pub fn iter(&self) -> impl Iterator<Item = &TemporaryWindowPattern> { self.patterns.iter() }

    /// Returns the number of patterns.
    #[must_use]
    pub fn len(&self) -> usize { self.patterns.len() }

    /// Returns `true` if there are no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.patterns.is_empty() }
}

impl Default for TemporaryWindowPatterns {
    fn default() -> Self { Self::builtin() }
}

/// Validates and compiles a configured rule.
fn compile_rule(index: usize, rule: &TemporaryWindowRule) -> Result<TemporaryWindowPattern, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidRule { index, reason };

    if rule.app_id.trim().is_empty() {
        return Err(invalid("appId must not be empty".to_string()));
    }

    let title = match (&rule.title, &rule.title_regex) {
        (Some(text), None) => TitlePattern::Exact(text.clone()),
        (None, Some(source)) => {
            TitlePattern::Regex(Regex::new(source).map_err(|err| invalid(err.to_string()))?)
        }
        (Some(_), Some(_)) => return Err(invalid("set either title or titleRegex, not both".to_string())),
        (None, None) => return Err(invalid("title or titleRegex is required".to_string())),
    };

    Ok(TemporaryWindowPattern {
        title,
        wm_class: rule.wm_class.clone(),
        app_id: rule.app_id.clone(),
    })
}
