//! Presentation dispatch for elements and leaves.
//!
//! Front ends turn these templates into widgets; nothing here knows about
//! a particular rendering backend.

use crate::model::{BlockType, Element, Leaf};

/// Decoration drawn before a section block's content
pub const SECTION_RULE: &str = "------------------";

/// Marker drawn before a question block's content
pub const QUESTION_MARKER: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTemplate {
    BlockQuote,
    BulletedList,
    HeadingOne,
    HeadingTwo,
    Heading,
    ListItem,
    NumberedList,
    Question,
    Code,
    Section,
    Paragraph,
}

/// Semantic color slots, resolved against the configured palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Question,
    QuestionLeaf,
    Heading,
}

impl ElementTemplate {
    /// Text drawn before the children
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            ElementTemplate::Question => Some(QUESTION_MARKER),
            ElementTemplate::Section => Some(SECTION_RULE),
            _ => None,
        }
    }

    pub fn accent(&self) -> Option<Accent> {
        match self {
            ElementTemplate::Question => Some(Accent::Question),
            ElementTemplate::HeadingOne | ElementTemplate::HeadingTwo | ElementTemplate::Heading => {
                Some(Accent::Heading)
            }
            _ => None,
        }
    }
}

/// Choose the template for an element. Unknown and missing types fall back
/// to the paragraph template.
pub fn render_element(element: &Element) -> ElementTemplate {
    let Some(kind) = &element.kind else {
        return ElementTemplate::Paragraph;
    };
    match kind {
        BlockType::BlockQuote => ElementTemplate::BlockQuote,
        BlockType::BulletedList => ElementTemplate::BulletedList,
        BlockType::HeadingOne => ElementTemplate::HeadingOne,
        BlockType::HeadingTwo => ElementTemplate::HeadingTwo,
        BlockType::Heading => ElementTemplate::Heading,
        BlockType::ListItem => ElementTemplate::ListItem,
        BlockType::NumberedList => ElementTemplate::NumberedList,
        BlockType::Question => ElementTemplate::Question,
        BlockType::Code => ElementTemplate::Code,
        BlockType::Section => ElementTemplate::Section,
        BlockType::Paragraph | BlockType::Other(_) => ElementTemplate::Paragraph,
    }
}

/// Wrapper applied around leaf text, innermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafWrapper {
    Strong,
    Code,
    Emphasis,
    Underline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPresentation<'a> {
    pub text: &'a str,
    pub wrappers: Vec<LeafWrapper>,
    pub accent: Option<Accent>,
}

impl LeafPresentation<'_> {
    pub fn has(&self, wrapper: LeafWrapper) -> bool {
        self.wrappers.contains(&wrapper)
    }
}

/// Each present mark wraps the text independently, in a fixed order:
/// bold, code, italic, underline.
pub fn render_leaf(leaf: &Leaf) -> LeafPresentation<'_> {
    let mut wrappers = Vec::new();
    if leaf.bold == Some(true) {
        wrappers.push(LeafWrapper::Strong);
    }
    if leaf.code == Some(true) {
        wrappers.push(LeafWrapper::Code);
    }
    if leaf.italic == Some(true) {
        wrappers.push(LeafWrapper::Emphasis);
    }
    if leaf.underline == Some(true) {
        wrappers.push(LeafWrapper::Underline);
    }

    LeafPresentation {
        text: &leaf.text,
        wrappers,
        accent: (leaf.question == Some(true)).then_some(Accent::QuestionLeaf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mark;

    #[test]
    fn test_unknown_and_missing_types_render_as_paragraph() {
        let unknown = Element::text_block(Some(BlockType::Other("callout".into())), "x");
        let missing = Element::text_block(None, "x");
        assert_eq!(render_element(&unknown), ElementTemplate::Paragraph);
        assert_eq!(render_element(&missing), ElementTemplate::Paragraph);
    }

    #[test]
    fn test_question_and_section_decorations() {
        let question = render_element(&Element::text_block(Some(BlockType::Question), "why"));
        assert_eq!(question.prefix(), Some("/"));
        assert_eq!(question.accent(), Some(Accent::Question));

        let section = render_element(&Element::text_block(Some(BlockType::Section), "part"));
        assert_eq!(section.prefix(), Some(SECTION_RULE));
        assert_eq!(section.accent(), None);
    }

    #[test]
    fn test_all_heading_levels_share_the_heading_accent() {
        for kind in [BlockType::HeadingOne, BlockType::HeadingTwo, BlockType::Heading] {
            let template = render_element(&Element::text_block(Some(kind), "title"));
            assert_eq!(template.accent(), Some(Accent::Heading));
        }
    }

    #[test]
    fn test_leaf_marks_compose() {
        let leaf = Leaf::new("hey").with(Mark::Italic).with(Mark::Bold).with(Mark::Code);
        let presentation = render_leaf(&leaf);
        assert_eq!(
            presentation.wrappers,
            vec![LeafWrapper::Strong, LeafWrapper::Code, LeafWrapper::Emphasis]
        );
        assert!(!presentation.has(LeafWrapper::Underline));
        assert_eq!(presentation.text, "hey");
        assert_eq!(presentation.accent, None);
    }

    #[test]
    fn test_plain_leaf_has_no_wrappers() {
        let plain = Leaf::new("plain");
        let presentation = render_leaf(&plain);
        assert!(presentation.wrappers.is_empty());
        assert!(render_leaf(&Leaf::new("q").with(Mark::Question)).accent.is_some());
    }
}
