use std::fmt;

/// Built-in rule types, keyed by the `type` tag of a [`RuleDescriptor`].
///
/// Tags outside this set are not an error: they resolve to the fail-safe
/// processor at evaluation time.
///
/// [`RuleDescriptor`]: super::RuleDescriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    PluginsActivated,
    SendAtTime,
    PluginVersion,
    Not,
    Or,
    And,
    Fail,
}

impl RuleType {
    pub const ALL: [RuleType; 7] = [
        RuleType::PluginsActivated,
        RuleType::SendAtTime,
        RuleType::PluginVersion,
        RuleType::Not,
        RuleType::Or,
        RuleType::And,
        RuleType::Fail,
    ];

    /// Resolve a `type` tag. Matching is exact (case-sensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "plugins_activated" => Some(Self::PluginsActivated),
            "send_at_time" => Some(Self::SendAtTime),
            "plugin_version" => Some(Self::PluginVersion),
            "not" => Some(Self::Not),
            "or" => Some(Self::Or),
            "and" => Some(Self::And),
            "fail" => Some(Self::Fail),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PluginsActivated => "plugins_activated",
            Self::SendAtTime => "send_at_time",
            Self::PluginVersion => "plugin_version",
            Self::Not => "not",
            Self::Or => "or",
            Self::And => "and",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_resolve_to_themselves() {
        for ty in RuleType::ALL {
            assert_eq!(RuleType::from_tag(ty.as_str()), Some(ty));
            assert_eq!(ty.to_string(), ty.as_str());
        }
    }

    #[test]
    fn unknown_tags() {
        assert_eq!(RuleType::from_tag(""), None);
        assert_eq!(RuleType::from_tag("OR"), None);
        assert_eq!(RuleType::from_tag("is_ecommerce"), None);
    }
}
