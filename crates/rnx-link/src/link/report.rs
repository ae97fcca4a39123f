//! Outcome of a linking pass

use camino::Utf8PathBuf;
use serde::Serialize;

/// A symlink created for a hoisted dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedPeer {
    pub name: String,
    /// Hoisted location the link points at
    pub source: Utf8PathBuf,
    /// Link path inside the framework's module directory
    pub destination: Utf8PathBuf,
}

/// Why a dependency was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Already present in the module directory
    AlreadyPresent,
    /// Nothing (or nothing readable) at the hoisted location
    Unavailable,
    /// The hoisted location is a file, not a package directory
    NotADirectory,
    /// The name would resolve outside the install tree
    InvalidName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPeer {
    pub name: String,
    pub reason: SkipReason,
}

/// Links created and dependencies skipped, in manifest order
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    pub linked: Vec<LinkedPeer>,
    pub skipped: Vec<SkippedPeer>,
}

impl LinkReport {
    pub fn linked_names(&self) -> impl Iterator<Item = &str> {
        self.linked.iter().map(|peer| peer.name.as_str())
    }

    pub fn skipped_because(&self, reason: SkipReason) -> impl Iterator<Item = &str> {
        self.skipped
            .iter()
            .filter(move |peer| peer.reason == reason)
            .map(|peer| peer.name.as_str())
    }

    pub(crate) fn skip(&mut self, name: &str, reason: SkipReason) {
        self.skipped.push(SkippedPeer {
            name: name.to_string(),
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_because_filters_by_reason() {
        let mut report = LinkReport::default();
        report.skip("react", SkipReason::AlreadyPresent);
        report.skip("left-pad", SkipReason::Unavailable);
        report.skip("fbjs", SkipReason::AlreadyPresent);

        let present: Vec<&str> = report.skipped_because(SkipReason::AlreadyPresent).collect();
        assert_eq!(present, vec!["react", "fbjs"]);
        assert_eq!(report.linked_names().count(), 0);
    }

    #[test]
    fn test_report_serializes_reason_in_kebab_case() {
        let mut report = LinkReport::default();
        report.skip("yeoman-generator", SkipReason::NotADirectory);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skipped"][0]["reason"], "not-a-directory");
    }
}
