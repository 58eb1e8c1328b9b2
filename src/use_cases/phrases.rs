// Spoken text per game state. Templates may reference `{expected}` and
// `{looked}`, which are replaced with the spoken direction words.

use crate::domain::Direction;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Phrases {
    pub intro: String,
    pub instructions: String,
    pub not_matching: String,
    pub matching: String,
}

impl Default for Phrases {
    fn default() -> Self {
        Self {
            intro: "Follow my instructions by looking where I tell you to".to_string(),
            instructions: "Look {expected}".to_string(),
            not_matching: "Don't look {looked}, look {expected}".to_string(),
            matching: "Great!".to_string(),
        }
    }
}

impl Phrases {
    pub fn intro(&self) -> String {
        self.intro.clone()
    }

    pub fn instructions(&self, expected: Direction) -> String {
        fill(&self.instructions, expected, None)
    }

    pub fn not_matching(&self, expected: Direction, looked: Direction) -> String {
        fill(&self.not_matching, expected, Some(looked))
    }

    pub fn matching(&self, expected: Direction) -> String {
        fill(&self.matching, expected, None)
    }
}

fn fill(template: &str, expected: Direction, looked: Option<Direction>) -> String {
    let text = template.replace("{expected}", &expected.to_string());
    match looked {
        Some(looked) => text.replace("{looked}", &looked.to_string()),
        None => text,
    }
}
