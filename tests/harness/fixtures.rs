// tests/harness/fixtures.rs
//
// Fixture loader for Help Scout conversation pages stored as JSON.

use std::path::PathBuf;

use helpscout_inbox::Conversation;
use serde::Deserialize;

#[derive(Deserialize)]
struct Embedded {
    conversations: Vec<Conversation>,
}

#[derive(Deserialize)]
struct Page {
    #[serde(rename = "_embedded")]
    embedded: Embedded,
}

/// Loader for conversation-list fixtures.
pub struct FixtureLoader {
    base_path: PathBuf,
}

impl FixtureLoader {
    /// Create a new fixture loader pointing to the standard fixtures directory.
    pub fn new() -> Self {
        Self {
            base_path: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests")
                .join("fixtures")
                .join("conversations"),
        }
    }

    /// Raw JSON of a fixture page, as the list endpoint would return it.
    pub fn load_raw(&self, name: &str) -> String {
        let path = self.base_path.join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
    }

    /// Conversations of a fixture page, in file order.
    pub fn load_page(&self, name: &str) -> Vec<Conversation> {
        let page: Page = serde_json::from_str(&self.load_raw(name))
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {}", name, e));
        page.embedded.conversations
    }
}

impl Default for FixtureLoader {
    fn default() -> Self {
        Self::new()
    }
}
