//! Declarative mapping from serial event lines to sound requests

use std::path::PathBuf;

use crate::domain::playback::SoundRequest;

/// Placeholder in a target template replaced by the event parameter
pub const PLACEHOLDER: &str = "#t#";

/// Character that terminates an event parameter
pub const PARAMETER_SENTINEL: char = '#';

/// One event kind: a pattern to look for in a line and the sound it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRule {
    name: String,
    pattern: String,
    takes_parameter: bool,
    template: String,
}

impl EventRule {
    /// Rule without parameter, always mapping to the same file
    pub fn fixed(
        name: impl Into<String>,
        pattern: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            takes_parameter: false,
            template: target.into(),
        }
    }

    /// Rule whose parameter follows the pattern and runs up to the next
    /// sentinel; it is substituted for [`PLACEHOLDER`] in the template.
    pub fn parameterized(
        name: impl Into<String>,
        pattern: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            takes_parameter: true,
            template: template.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Try this rule against a trimmed line
    pub fn apply(&self, line: &str) -> Option<EventMatch> {
        let start = line.find(self.pattern.as_str())?;

        if !self.takes_parameter {
            return Some(EventMatch {
                rule: self.name.clone(),
                parameter: None,
                request: SoundRequest::background(PathBuf::from(&self.template)),
            });
        }

        let rest = &line[start + self.pattern.len()..];
        let parameter = rest.split(PARAMETER_SENTINEL).next().unwrap_or_default();
        if !is_safe_parameter(parameter) {
            return None;
        }

        let target = self.template.replace(PLACEHOLDER, parameter);
        Some(EventMatch {
            rule: self.name.clone(),
            parameter: Some(parameter.to_string()),
            request: SoundRequest::background(PathBuf::from(target)),
        })
    }
}

/// Parameters end up inside a file name, so they must not be able to
/// leave the template's directory.
fn is_safe_parameter(parameter: &str) -> bool {
    !parameter.is_empty()
        && !parameter.contains('/')
        && !parameter.contains('\\')
        && !parameter.contains("..")
}

/// Result of resolving a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMatch {
    /// Name of the rule that matched
    pub rule: String,
    /// Extracted parameter, for parameterized rules
    pub parameter: Option<String>,
    /// Sound to play
    pub request: SoundRequest,
}

/// Ordered rule list; the first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGrammar {
    rules: Vec<EventRule>,
}

impl EventGrammar {
    pub fn new(rules: Vec<EventRule>) -> Self {
        Self { rules }
    }

    /// The trigger firmware's event set:
    /// `Play Ready Sound`, `Play Team Sound#<name>#` and `play_sound`.
    pub fn standard(ready: &str, team_template: &str, default: &str) -> Self {
        Self::new(vec![
            EventRule::fixed("ready", "Play Ready Sound", ready),
            EventRule::parameterized("team", "Play Team Sound#", team_template),
            EventRule::fixed("play", "play_sound", default),
        ])
    }

    pub fn rules(&self) -> &[EventRule] {
        &self.rules
    }

    /// Map a line to a sound request, if any rule matches
    pub fn resolve(&self, line: &str) -> Option<EventMatch> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.rules.iter().find_map(|rule| rule.apply(line))
    }
}
