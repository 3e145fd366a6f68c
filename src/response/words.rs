use serde::Deserialize;

use crate::response::Render;

/// `page: "words"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WordList {
    pub page: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub words: Vec<String>,
}

impl Render for WordList {
    fn render(&self) -> String {
        format!(
            "Parsed JSON:\nPage: {}\nWords: {}\nInput: {}\n",
            self.page,
            self.words.join(", "),
            self.input
        )
    }
}
