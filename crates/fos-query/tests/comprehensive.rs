//! Comprehensive tests for fos-query
//!
//! End-to-end behavior of `build`, the resolver and the collection API
//! against parsed documents.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::rc::Rc;

use fos_html::{get_outer_html, HtmlParser};
use fos_query::{
    build, get_attr_map, get_style_map, to_camel_case, to_map, CaseMode, DocumentRef,
    EventListener, NodeCollection, NodeId, Selector,
};

fn doc(html: &str) -> DocumentRef {
    DocumentRef::new(HtmlParser::new().parse(html))
}

fn outer(doc: &DocumentRef, nodes: &NodeCollection) -> Vec<String> {
    let d = doc.borrow();
    nodes.iter().map(|n| get_outer_html(&d.tree, n)).collect()
}

fn owned(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// RESOLUTION ORDER
// ============================================================================

#[test]
fn test_css_results_in_document_order() {
    let doc = doc("<p id=a></p><div><p id=b></p></div><p id=c></p>");
    let ps = build(&doc, "div p, p", None);
    let ids: Vec<_> = (0..ps.len())
        .map(|i| ps.eq(i).unwrap().attr("id").unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_node_sequence_keeps_insertion_order() {
    let doc = doc("<i></i><b></b><u></u>");
    let all = build(&doc, "i, b, u", None);
    let order = vec![all[2], all[0], all[1]];

    assert_eq!(build(&doc, order.clone(), None).to_vec(), order);
    assert_eq!(build(&doc, order.as_slice(), None).to_vec(), order);
    assert_eq!(build(&doc, &all, None).to_vec(), all.to_vec());
    assert_eq!(build(&doc, all[1], None).to_vec(), vec![all[1]]);
}

#[test]
fn test_context_scopes_queries() {
    let doc = doc("<ul id=x><li>1</li></ul><ul><li>2</li></ul>");
    let root = build(&doc, "#x", None)[0];
    let items = build(&doc, "li", Some(root));
    assert_eq!(items.len(), 1);
    assert_eq!(items.root(), Some(root));
    assert_eq!(items.text(), "1");
}

#[test]
fn test_empty_selector_is_empty() {
    let doc = doc("<p></p>");
    assert!(build(&doc, "", None).is_empty());
    assert!(build(&doc, Selector::Empty, None).is_empty());
    assert!(build(&doc, None::<NodeId>, None).is_empty());
}

// ============================================================================
// MARKUP AND TABLE SCAFFOLDS
// ============================================================================

#[test]
fn test_row_markup_matches_unscaffolded_parse() {
    let doc = doc("");
    let scaffolded = build(&doc, "<tr><td>a</td></tr>", None);

    let reference = {
        let table = build(&doc, "<table><tbody><tr><td>a</td></tr></tbody></table>", None);
        table.find("tr").children(None)
    };

    assert_eq!(outer(&doc, &scaffolded), outer(&doc, &reference));
    assert_eq!(outer(&doc, &scaffolded), vec!["<td>a</td>"]);
    assert!(scaffolded.is_element());
    assert_eq!(scaffolded.name(), "td");
}

#[test]
fn test_cell_markup() {
    let doc = doc("");
    let cells = build(&doc, "<td>1</td><td>2</td>", None);
    assert_eq!(outer(&doc, &cells), vec!["<td>1</td>", "<td>2</td>"]);
}

#[test]
fn test_markup_nodes_are_detached() {
    let doc = doc("<p>x</p>");
    let made = build(&doc, "<em>new</em>", None);
    assert_eq!(made.name(), "em");
    assert!(made.parent().is_none());
    assert_eq!(build(&doc, "em", None).len(), 0);
}

#[test]
fn test_markup_into_table_rows() {
    let doc = doc("<table><tbody id=body><tr><td>0</td></tr></tbody></table>");
    build(&doc, "#body", None).append("<tr><td>1</td></tr>");
    // Row markup resolves to its cells
    assert_eq!(build(&doc, "#body > td", None).len(), 1);
    assert_eq!(build(&doc, "td", None).len(), 2);
}

// ============================================================================
// STRING UTILITIES
// ============================================================================

#[test]
fn test_attr_map_round_trip() {
    let doc = doc(r#"<input id="x" class="a b" disabled>"#);
    let input = build(&doc, "input", None);
    let serialized = get_outer_html(&doc.borrow().tree, input[0]);

    let expected = owned(&[("id", "x"), ("class", "a b"), ("disabled", "")]);
    assert_eq!(get_attr_map(&serialized), expected);
    assert_eq!(input.attrs(), expected);
}

#[test]
fn test_style_map_round_trip() {
    assert_eq!(
        get_style_map("color: rgb(255,0,0); margin:4px;"),
        owned(&[("color", "#FF0000"), ("margin", "4px")])
    );
}

#[test]
fn test_camel_case_modes() {
    assert_eq!(to_camel_case("background-color", CaseMode::default()), "backgroundColor");
    assert_eq!(to_camel_case("background-color", CaseMode::Upper), "BackgroundColor");
}

#[test]
fn test_to_map_ranges() {
    let map = to_map("1..3,7", None);
    let mut keys: Vec<_> = map.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["1", "2", "3", "7"]);
    assert!(map.values().all(|&v| v));
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_remove_all_events_stops_dispatch() {
    let doc = doc("<button>go</button>");
    let calls = Rc::new(RefCell::new(0));
    let seen = calls.clone();
    let listener = EventListener::new(move |_| *seen.borrow_mut() += 1);

    let mut button = build(&doc, "button", None);
    button.on("click", listener);
    doc.dispatch(button[0], "click");
    assert_eq!(*calls.borrow(), 1);

    button.remove_all_events();
    doc.dispatch(button[0], "click");
    assert_eq!(*calls.borrow(), 1);
    assert!(button.registry(0).unwrap().is_empty());
}

#[test]
fn test_listener_sees_bubbling_from_descendant() {
    let doc = doc("<ul><li><a>x</a></li></ul>");
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();

    build(&doc, "ul", None).on(
        "click",
        EventListener::new(move |event| sink.borrow_mut().push(event.event_type.clone())),
    );
    doc.dispatch(build(&doc, "a", None)[0], "click");
    assert_eq!(*log.borrow(), vec!["click".to_string()]);
}

#[test]
fn test_listener_can_use_toolkit() {
    let doc = doc("<button>0</button>");
    let handle = doc.clone();
    let mut button = build(&doc, "button", None);
    button.on(
        "click",
        EventListener::new(move |_| {
            let mut b = build(&handle, "button", None);
            let next = b.text().parse::<u32>().unwrap_or(0) + 1;
            b.set_text(&next.to_string());
        }),
    );

    doc.dispatch(button[0], "click");
    doc.dispatch(button[0], "click");
    assert_eq!(button.text(), "2");
}

// ============================================================================
// MUTATION POLICIES
// ============================================================================

#[test]
fn test_append_markup_two_targets_independent() {
    let doc = doc("<div class=t></div><div class=t></div>");
    build(&doc, ".t", None).append("<p><b>x</b></p>");

    let bolds = build(&doc, ".t b", None);
    assert_eq!(bolds.len(), 2);
    assert_ne!(bolds[0], bolds[1]);

    bolds.eq(0).unwrap().set_text("first");
    assert_eq!(bolds.eq(1).unwrap().text(), "x");
}

#[test]
fn test_append_live_node_two_targets_moves() {
    let doc = doc("<div class=t></div><div class=t></div><span>s</span>");
    let span = build(&doc, "span", None);
    build(&doc, ".t", None).append(span[0]);

    let targets = build(&doc, ".t", None);
    assert_eq!(targets.eq(0).unwrap().html(), "");
    assert_eq!(targets.eq(1).unwrap().html(), "<span>s</span>");
    assert_eq!(build(&doc, "span", None).len(), 1);
}

#[test]
fn test_before_then_after_sequential() {
    let doc = doc("<ol><li id=m>m</li></ol>");
    build(&doc, "#m", None)
        .before("<li>b</li>")
        .after("<li>a</li>");
    let items = build(&doc, "li", None);
    let texts: Vec<_> = (0..items.len()).map(|i| items.eq(i).unwrap().text()).collect();
    assert_eq!(texts, vec!["b", "m", "a"]);
}

#[test]
fn test_replace_with_returns_new_nodes() {
    let doc = doc("<p id=old>o</p>");
    let replaced = build(&doc, "#old", None).replace_with("<h1>new</h1>");
    assert_eq!(replaced.name(), "h1");
    assert_eq!(replaced.parent().unwrap().name(), "body");
    assert!(build(&doc, "#old", None).is_empty());
}

// ============================================================================
// REMOVAL AND TRAVERSAL DEFAULTS
// ============================================================================

#[test]
fn test_remove_then_traverse() {
    let doc = doc("<div><p>1</p></div>");
    let mut div = build(&doc, "div", None);
    div.remove();

    assert_eq!(div.len(), 0);
    assert!(div.parent().is_none());
    assert!(div.children(None).is_empty());
    assert!(div.first().is_none());
    assert!(div.last().is_none());
    assert!(div.next().is_none());
    assert!(div.find("p").is_empty());
    assert_eq!(div.contains(NodeId::ROOT), None);
    assert!(div.index().is_err());
    assert!(div.offset().is_err());
}

#[test]
fn test_closest_without_match_is_empty_collection() {
    let doc = doc("<div><p>1</p></div>");
    let closest = build(&doc, "p", None).closest("table");
    assert!(closest.is_empty());
    assert_eq!(closest.len(), 0);
}

#[test]
fn test_each_visits_in_order() {
    let doc = doc("<i>0</i><i>1</i><i>2</i>");
    let items = build(&doc, "i", None);
    let mut visited = Vec::new();
    items.each(|node, index| {
        visited.push(index);
        if node == items[1] {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(visited, vec![0, 1]);
}

#[test]
fn test_get_path_default_stops_at_body() {
    let doc = doc("<main><section><em>x</em></section></main>");
    assert_eq!(
        build(&doc, "em", None).get_path(None),
        vec!["em", "section", "main"]
    );
    assert!(build(&doc, "em", None).get_path(None).iter().all(|n| n != "body"));
}
