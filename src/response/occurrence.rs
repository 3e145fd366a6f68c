use std::collections::BTreeMap;

use serde::Deserialize;

use crate::response::Render;

/// `page: "occurrence"`, word → number of times it was seen
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WordOccurrence {
    pub page: String,
    #[serde(default)]
    pub words: BTreeMap<String, i64>,
}

impl Render for WordOccurrence {
    fn render(&self) -> String {
        let words: Vec<String> = self
            .words
            .iter()
            .map(|(word, count)| format!("Word is {}, it showed up {} time", word, count))
            .collect();
        format!("Parsed JSON:\nPage: {}\nWords: {}\n", self.page, words.join("\n"))
    }
}
