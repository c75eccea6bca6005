// Redirect rule matching for request paths

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum RedirectType {
    Permanent,
    Temporary,
}

impl RedirectType {
    pub fn status_code(&self) -> u16 {
        match self {
            RedirectType::Permanent => 301,
            RedirectType::Temporary => 302,
        }
    }
}

impl TryFrom<u16> for RedirectType {
    type Error = CoreError;

    fn try_from(code: u16) -> Result<Self> {
        match code {
            301 => Ok(RedirectType::Permanent),
            302 => Ok(RedirectType::Temporary),
            other => Err(CoreError::InvalidRedirectType(other)),
        }
    }
}

impl From<RedirectType> for u16 {
    fn from(kind: RedirectType) -> Self {
        kind.status_code()
    }
}

/// A redirect as stored in the CMS.
///
/// Pattern rules end their `source_path` with `*`; whatever follows the base in the
/// request path is substituted for `*` in `destination_path`, or appended when the
/// destination has no wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub source_path: String,
    pub destination_path: String,
    pub redirect_type: RedirectType,
    #[serde(default)]
    pub is_pattern: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectTarget {
    pub destination: String,
    pub redirect_type: RedirectType,
}

impl RedirectTarget {
    pub fn status_code(&self) -> u16 {
        self.redirect_type.status_code()
    }
}

impl RedirectRule {
    pub fn validate(&self) -> Result<()> {
        if !self.source_path.starts_with('/') {
            return Err(CoreError::InvalidRedirectRule(format!(
                "source path `{}` must start with '/'",
                self.source_path
            )));
        }
        if self.is_pattern && !self.source_path.ends_with('*') {
            return Err(CoreError::InvalidRedirectRule(format!(
                "pattern source `{}` must end with '*'",
                self.source_path
            )));
        }
        Ok(())
    }

    /// Base of a pattern rule: the source path without its trailing `*`.
    fn pattern_base(&self) -> &str {
        self.source_path.trim_end_matches('*')
    }

    pub fn matches(&self, path: &str) -> Option<RedirectTarget> {
        let destination = if self.is_pattern {
            let base = self.pattern_base();
            let suffix = match path.strip_prefix(base) {
                Some(suffix) => suffix,
                // "/blog" matches "/blog/*" with an empty capture
                None if base.ends_with('/') && path == base.trim_end_matches('/') => "",
                None => return None,
            };
            self.substitute(suffix)
        } else if path == self.source_path {
            self.destination_path.clone()
        } else {
            return None;
        };

        Some(RedirectTarget {
            destination,
            redirect_type: self.redirect_type,
        })
    }

    fn substitute(&self, suffix: &str) -> String {
        if self.destination_path.contains('*') {
            return self.destination_path.replacen('*', suffix, 1);
        }
        if suffix.is_empty() {
            return self.destination_path.clone();
        }
        format!(
            "{}/{}",
            self.destination_path.trim_end_matches('/'),
            suffix.trim_start_matches('/')
        )
    }
}

/// Pick the redirect for `path`: exact rules beat patterns, longer pattern bases beat shorter.
pub fn find_redirect(rules: &[RedirectRule], path: &str) -> Option<RedirectTarget> {
    if let Some(target) = rules
        .iter()
        .filter(|rule| !rule.is_pattern)
        .find_map(|rule| rule.matches(path))
    {
        return Some(target);
    }

    rules
        .iter()
        .filter(|rule| rule.is_pattern)
        .filter_map(|rule| rule.matches(path).map(|target| (rule.pattern_base().len(), target)))
        .max_by_key(|(len, _)| *len)
        .map(|(_, target)| target)
}
