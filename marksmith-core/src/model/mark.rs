use serde::{Deserialize, Serialize};

/// Boolean formatting attribute carried by a text leaf
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Question,
    Code,
}

impl Mark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Question => "question",
            Mark::Code => "code",
        }
    }
}

/// A run of text with its marks.
///
/// Marks follow the editor's JSON shape: a missing or `null` attribute is
/// inactive, `true` is active. `false` is accepted on input and treated
/// as inactive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Leaf {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<bool>,
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper, mostly for fixtures
    pub fn with(mut self, mark: Mark) -> Self {
        self.set_mark(mark, Some(true));
        self
    }

    pub fn mark(&self, mark: Mark) -> Option<bool> {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Question => self.question,
            Mark::Code => self.code,
        }
    }

    pub fn set_mark(&mut self, mark: Mark, value: Option<bool>) {
        let slot = match mark {
            Mark::Bold => &mut self.bold,
            Mark::Italic => &mut self.italic,
            Mark::Underline => &mut self.underline,
            Mark::Question => &mut self.question,
            Mark::Code => &mut self.code,
        };
        *slot = value;
    }

    /// True only for an explicit `true`
    pub fn has_mark(&self, mark: Mark) -> bool {
        self.mark(mark) == Some(true)
    }

    /// Number of chars in the run. Offsets everywhere are char offsets.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether two leaves carry the same marks and can be merged
    pub fn same_marks(&self, other: &Leaf) -> bool {
        [Mark::Bold, Mark::Italic, Mark::Underline, Mark::Question, Mark::Code]
            .iter()
            .all(|&m| self.has_mark(m) == other.has_mark(m))
    }

    /// Split at a char offset, keeping marks on both halves
    pub fn split_at(&self, offset: usize) -> (Leaf, Leaf) {
        let byte = self
            .text
            .char_indices()
            .nth(offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        let mut left = self.clone();
        let mut right = self.clone();
        left.text = self.text[..byte].to_string();
        right.text = self.text[byte..].to_string();
        (left, right)
    }
}
