use std::fmt;
use std::str::FromStr;

use kondi_util::errors::{KondiError, KondiResult};
use serde::{Deserialize, Serialize};

/// Coordinates that uniquely identify an artifact:
/// `group:artifact[:classifier]:version`.
///
/// Ordering is lexicographic over the fields, which gives every map keyed by
/// coordinates a stable iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactCoords {
    pub group_id: String,
    pub artifact_id: String,
    pub classifier: Option<String>,
    pub version: String,
}

impl ArtifactCoords {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            classifier: None,
            version: version.into(),
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Parse `"group:artifact:version"` or `"group:artifact:classifier:version"`.
    pub fn parse(s: &str) -> KondiResult<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(KondiError::InvalidCoordinate {
                value: s.to_string(),
            });
        }
        match parts.as_slice() {
            [group, artifact, version] => Ok(Self::new(*group, *artifact, *version)),
            [group, artifact, classifier, version] => {
                Ok(Self::new(*group, *artifact, *version).with_classifier(*classifier))
            }
            _ => Err(KondiError::InvalidCoordinate {
                value: s.to_string(),
            }),
        }
    }

    /// `group:artifact[:classifier]` identifier (without version).
    pub fn key(&self) -> String {
        match &self.classifier {
            Some(c) => format!("{}:{}:{}", self.group_id, self.artifact_id, c),
            None => format!("{}:{}", self.group_id, self.artifact_id),
        }
    }
}

impl fmt::Display for ArtifactCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key(), self.version)
    }
}

impl FromStr for ArtifactCoords {
    type Err = KondiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ArtifactCoords {
    type Error = KondiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ArtifactCoords> for String {
    fn from(coords: ArtifactCoords) -> Self {
        coords.to_string()
    }
}
