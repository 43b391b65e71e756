use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of ideas the backend returns for every topic.
pub const IDEAS_PER_TOPIC: usize = 4;

/// A topic that has passed the non-empty check. Construction trims
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card heading shown above an idea, 1-indexed.
pub fn idea_label(index: usize) -> String {
    format!("Idea {}", index + 1)
}
