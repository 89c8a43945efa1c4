use marksmith_core::toggle::{
    is_block_active, is_bold_mark_active, is_heading_block_active, is_list_block_active,
    is_mark_active, toggle_bold_mark, toggle_heading_block, toggle_list_block, toggle_mark,
};
use marksmith_core::{
    render_element, BlockPoint, BlockType, Document, Editor, Element, ElementTemplate, Leaf,
    ListFormat, Mark, Node, Selection,
};
use proptest::prelude::*;

fn editor(json: &str, selection: Selection) -> Editor {
    let mut editor = Editor::new(Document::from_json(json).unwrap());
    editor.set_selection(Some(selection));
    editor
}

fn json(doc: &str) -> Document {
    Document::from_json(doc).unwrap()
}

fn three_blocks() -> Selection {
    Selection::new(BlockPoint::new(0, 0), BlockPoint::new(2, 1))
}

#[test]
fn bold_scenario() {
    let mut ed = editor(
        r#"[{"type":"paragraph","children":[{"text":"hi","bold":null}]}]"#,
        Selection::within(0, 0, 2),
    );

    toggle_bold_mark(&mut ed);
    assert_eq!(ed.document(), &json(r#"[{"type":"paragraph","children":[{"text":"hi","bold":true}]}]"#));
    assert!(is_bold_mark_active(&ed));

    toggle_bold_mark(&mut ed);
    let leaf = ed.document().children[0].as_element().unwrap().children[0].as_leaf().unwrap();
    assert_eq!(leaf.bold, None);
    assert!(!is_bold_mark_active(&ed));
}

#[test]
fn heading_scenario() {
    let mut ed = editor(r#"[{"type":null,"children":[{"text":"x"}]}]"#, Selection::within(0, 0, 1));

    toggle_heading_block(&mut ed);
    assert_eq!(ed.document(), &json(r#"[{"type":"heading","children":[{"text":"x"}]}]"#));
    assert!(is_heading_block_active(&ed));

    toggle_heading_block(&mut ed);
    assert_eq!(ed.document(), &json(r#"[{"children":[{"text":"x"}]}]"#));
}

#[test]
fn mixed_list_scenario_rewraps_into_one_numbered_list() {
    let mut ed = editor(
        r#"[
            {"type":"paragraph","children":[{"text":"a"}]},
            {"type":"bulleted-list","children":[
                {"type":"list-item","children":[{"text":"b"}]}
            ]},
            {"type":"paragraph","children":[{"text":"c"}]}
        ]"#,
        three_blocks(),
    );

    toggle_list_block(&mut ed, ListFormat::NumberedList);

    let expected = json(
        r#"[{"type":"numbered-list","children":[
            {"type":"list-item","children":[{"text":"a"}]},
            {"type":"list-item","children":[{"text":"b"}]},
            {"type":"list-item","children":[{"text":"c"}]}
        ]}]"#,
    );
    assert_eq!(ed.document(), &expected);
    assert!(is_list_block_active(&ed, ListFormat::NumberedList));
}

#[test]
fn switching_list_format_leaves_a_single_container() {
    let mut ed = editor(
        r#"[
            {"type":"paragraph","children":[{"text":"a"}]},
            {"type":"paragraph","children":[{"text":"b"}]},
            {"type":"paragraph","children":[{"text":"c"}]}
        ]"#,
        three_blocks(),
    );

    toggle_list_block(&mut ed, ListFormat::NumberedList);
    toggle_list_block(&mut ed, ListFormat::BulletedList);

    let doc = ed.document();
    assert_eq!(doc.children.len(), 1);
    let container = doc.children[0].as_element().unwrap();
    assert_eq!(container.kind, Some(BlockType::BulletedList));
    assert_eq!(container.children.len(), 3);
    for item in &container.children {
        let item = item.as_element().unwrap();
        assert_eq!(item.kind, Some(BlockType::ListItem));
        assert!(item.is_lowest_block());
    }
    assert!(!is_block_active(&ed, &BlockType::NumberedList));
}

#[test]
fn list_toggle_on_middle_item_splits_the_list() {
    let mut ed = editor(
        r#"[{"type":"bulleted-list","children":[
            {"type":"list-item","children":[{"text":"a"}]},
            {"type":"list-item","children":[{"text":"b"}]},
            {"type":"list-item","children":[{"text":"c"}]}
        ]}]"#,
        Selection::collapsed(BlockPoint::new(1, 0)),
    );

    toggle_list_block(&mut ed, ListFormat::BulletedList);

    let expected = json(
        r#"[
            {"type":"bulleted-list","children":[{"type":"list-item","children":[{"text":"a"}]}]},
            {"type":"paragraph","children":[{"text":"b"}]},
            {"type":"bulleted-list","children":[{"type":"list-item","children":[{"text":"c"}]}]}
        ]"#,
    );
    assert_eq!(ed.document(), &expected);
}

#[test]
fn list_toggle_inside_nested_containers_keeps_one_list_type() {
    let mut ed = editor(
        r#"[{"type":"bulleted-list","children":[
            {"type":"list-item","children":[{"text":"a"}]},
            {"type":"numbered-list","children":[
                {"type":"list-item","children":[{"text":"b"}]},
                {"type":"list-item","children":[{"text":"c"}]}
            ]}
        ]}]"#,
        Selection::new(BlockPoint::new(1, 0), BlockPoint::new(2, 1)),
    );

    toggle_list_block(&mut ed, ListFormat::BulletedList);

    let expected = json(
        r#"[
            {"type":"bulleted-list","children":[{"type":"list-item","children":[{"text":"a"}]}]},
            {"type":"bulleted-list","children":[
                {"type":"list-item","children":[{"text":"b"}]},
                {"type":"list-item","children":[{"text":"c"}]}
            ]}
        ]"#,
    );
    assert_eq!(ed.document(), &expected);

    for (path, _) in ed.document().lowest_blocks() {
        let containers: Vec<_> = (1..path.len())
            .filter_map(|len| ed.document().get(&path[..len]))
            .filter_map(Node::as_element)
            .filter_map(|el| el.kind.clone())
            .filter(BlockType::is_list)
            .collect();
        assert!(containers.windows(2).all(|pair| pair[0] == pair[1]));
    }
    assert!(is_list_block_active(&ed, ListFormat::BulletedList));
}

#[test]
fn block_query_sees_containers() {
    let ed = editor(
        r#"[{"type":"numbered-list","children":[
            {"type":"list-item","children":[{"text":"a"}]}
        ]}]"#,
        Selection::collapsed(BlockPoint::new(0, 0)),
    );
    assert!(is_block_active(&ed, &BlockType::NumberedList));
    assert!(is_block_active(&ed, &BlockType::ListItem));
    assert!(!is_block_active(&ed, &BlockType::BulletedList));
}

#[test]
fn marks_and_block_types_are_independent() {
    let mut ed = editor(
        r#"[{"type":"code","children":[{"text":"fn"}]}]"#,
        Selection::within(0, 0, 2),
    );
    toggle_mark(&mut ed, Mark::Underline);
    assert_eq!(
        ed.document().children[0].as_element().unwrap().kind,
        Some(BlockType::Code)
    );

    toggle_heading_block(&mut ed);
    let block = ed.document().children[0].as_element().unwrap();
    assert!(block.leaves().all(|l| l.has_mark(Mark::Underline)));
}

#[test]
fn unknown_types_render_as_paragraph() {
    let doc = json(r#"[{"type":"aside","children":[{"text":"x"}]},{"children":[{"text":"y"}]}]"#);
    for node in &doc.children {
        let Node::Element(el) = node else {
            panic!("expected element");
        };
        assert_eq!(render_element(el), ElementTemplate::Paragraph);
    }
}

fn leaves_strategy() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::vec(("[a-z]{1,5}", any::<bool>()), 1..6)
}

fn paragraph(leaves: &[(String, bool)], mark: Mark, mark_all: bool) -> Document {
    let children = leaves
        .iter()
        .map(|(text, flag)| {
            let mut leaf = Leaf::new(text.clone());
            if *flag {
                leaf = leaf.with(mark);
            }
            if mark_all {
                leaf = leaf.with(Mark::Bold);
            }
            Node::Leaf(leaf)
        })
        .collect();
    Document::new(vec![Element::new(Some(BlockType::Paragraph), children).into()])
}

proptest! {
    #[test]
    fn universal_match_law(leaves in leaves_strategy(), a in 0usize..30, b in 0usize..30) {
        let total: usize = leaves.iter().map(|(t, _)| t.len()).sum();
        let (from, to) = (a.min(b) % (total + 1), a.max(b) % (total + 1));
        prop_assume!(from < to);

        let mut ed = Editor::new(paragraph(&leaves, Mark::Bold, false));
        ed.set_selection(Some(Selection::within(0, from, to)));

        let mut offset = 0;
        let mut expected = true;
        for (text, bold) in &leaves {
            let (start, end) = (offset, offset + text.len());
            offset = end;
            if start < to && end > from && !bold {
                expected = false;
            }
        }
        prop_assert_eq!(is_mark_active(&ed, Mark::Bold), expected);
    }

    #[test]
    fn toggling_twice_restores_uniform_selection(
        leaves in leaves_strategy(),
        bold in any::<bool>(),
        a in 0usize..30,
        b in 0usize..30,
    ) {
        let total: usize = leaves.iter().map(|(t, _)| t.len()).sum();
        let (from, to) = (a.min(b) % (total + 1), a.max(b) % (total + 1));
        prop_assume!(from < to);

        let original = Editor::new(paragraph(&leaves, Mark::Italic, bold));
        let mut ed = original.clone();
        ed.set_selection(Some(Selection::within(0, from, to)));

        toggle_mark(&mut ed, Mark::Bold);
        prop_assert_eq!(is_mark_active(&ed, Mark::Bold), !bold);
        toggle_mark(&mut ed, Mark::Bold);
        prop_assert_eq!(ed.document(), original.document());
    }
}
