//! End-to-end tests for the searchable select: rendering, the shared pointer
//! hub, remote search and mapping a committed label back to its entity.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use lifeline_tui_components::prelude::*;
use pretty_assertions::assert_eq;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

// ============================================================================
// HELPERS
// ============================================================================

fn draw_at(select: &SearchableSelect, area: Rect) -> Buffer {
    let mut buf = Buffer::empty(area);
    select.render(area, &mut buf);
    buf
}

fn lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.y..area.bottom())
        .map(|y| {
            (area.x..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn type_text(select: &mut SearchableSelect, text: &str) {
    for c in text.chars() {
        select.handle_key(key(KeyCode::Char(c)));
    }
}

#[derive(Debug, PartialEq)]
struct Lifeline {
    code: &'static str,
    client: &'static str,
    location: &'static str,
}

impl Labeled for Lifeline {
    fn label_parts(&self) -> Vec<String> {
        vec![
            self.code.to_string(),
            self.client.to_string(),
            self.location.to_string(),
        ]
    }
}

fn lifelines() -> Vec<Lifeline> {
    vec![
        Lifeline { code: "LL-001", client: "Acme", location: "Roof" },
        Lifeline { code: "LL-002", client: "Brick", location: "Silo" },
        Lifeline { code: "LL-003", client: "Crane", location: "" },
    ]
}

// ============================================================================
// RENDERING
// ============================================================================

mod rendering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_closed_field_with_label() {
        let select = SearchableSelect::new(vec!["Harness".into()])
            .label("Life-line")
            .required();
        let text = lines(&draw_at(&select, Rect::new(0, 0, 30, 4)));

        assert_eq!(text[0], "Life-line *");
        assert!(text[1].starts_with(" Select..."));
        assert!(text[1].ends_with('▾'));
        assert_eq!(text[2], "");
    }

    #[test]
    fn test_error_line_only_while_closed() {
        let mut select = SearchableSelect::new(vec!["Harness".into()]).error("Pick one");
        let text = lines(&draw_at(&select, Rect::new(0, 0, 30, 6)));
        assert_eq!(text[1], "Pick one");

        select.open();
        let text = lines(&draw_at(&select, Rect::new(0, 0, 30, 6)));
        assert!(text.iter().all(|line| !line.contains("Pick one")));
    }

    #[test]
    fn test_open_dropdown_lists_labels() {
        let format = LabelFormat::default();
        let mut select = SearchableSelect::new(option_labels(&lifelines(), &format))
            .label("Life-line")
            .value("LL-002 · Brick · Silo");
        select.handle_key(key(KeyCode::Enter));
        let text = lines(&draw_at(&select, Rect::new(0, 0, 30, 8)));

        assert!(text[1].ends_with('▴'));
        assert!(text[2].starts_with('╭'));
        assert!(text[3].starts_with("│   LL-001 · Acme · Roof"));
        assert!(text[4].starts_with("│ ✓ LL-002 · Brick · Silo"));
        assert!(text[5].starts_with("│   LL-003 · Crane"));
        assert!(text[6].starts_with('╰'));
    }

    #[test]
    fn test_search_header_and_no_results() {
        let mut select = SearchableSelect::new(vec!["Harness".into(), "Lanyard".into()]);
        type_text(&mut select, "ar");
        let text = lines(&draw_at(&select, Rect::new(0, 0, 30, 8)));
        assert!(text[2].contains("2 results"));

        type_text(&mut select, "zz");
        let text = lines(&draw_at(&select, Rect::new(0, 0, 30, 8)));
        assert!(text[2].contains("0 results"));
        assert!(text[3].contains("No results"));
    }

    #[test]
    fn test_searching_shows_spinner_text() {
        let mut select = SearchableSelect::new(Vec::new()).on_search(|_| {});
        type_text(&mut select, "ll");
        select.set_search_loading(true);
        let text = lines(&draw_at(&select, Rect::new(0, 0, 30, 8)));
        assert!(text[3].contains("Searching..."));
    }
}

// ============================================================================
// OUTSIDE CLICKS
// ============================================================================

mod outside_clicks {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test_log::test]
    fn test_hub_click_outside_dismisses_without_emitting() {
        let hub = PointerHub::new();
        let changes = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&changes);
        let mut select = SearchableSelect::new(vec!["Harness".into(), "Lanyard".into()])
            .value("Harness")
            .pointer_hub(hub.clone())
            .on_change(move |value| sink.borrow_mut().push(value.to_string()));

        select.open();
        draw_at(&select, Rect::new(0, 0, 30, 6));
        assert_eq!(hub.listener_count(), 1);

        // Inside the dropdown: stays open.
        hub.dispatch(&click(5, 2));
        assert!(select.is_open());

        hub.dispatch(&click(5, 20));
        assert!(!select.is_open());
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(select.current_value(), "Harness");
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_option_click_goes_through_hub_then_widget() {
        let hub = PointerHub::new();
        let mut select =
            SearchableSelect::new(vec!["Harness".into(), "Lanyard".into()]).pointer_hub(hub.clone());
        select.open();
        draw_at(&select, Rect::new(0, 0, 30, 6));

        let event = click(6, 3);
        hub.dispatch(&event);
        assert_eq!(select.handle_mouse(event), ComponentResult::Done("Lanyard".to_string()));
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_opening_another_select_closes_the_first() {
        let hub = PointerHub::new();
        let mut first = SearchableSelect::new(vec!["A1".into(), "A2".into(), "A3".into()])
            .pointer_hub(hub.clone());
        let mut second = SearchableSelect::new(vec!["B1".into()]).pointer_hub(hub.clone());

        first.open();
        draw_at(&first, Rect::new(0, 0, 30, 6));
        draw_at(&second, Rect::new(0, 6, 30, 6));

        let event = click(2, 6);
        hub.dispatch(&event);
        assert_eq!(second.handle_mouse(event), ComponentResult::Handled);

        assert!(!first.is_open());
        assert!(second.is_open());
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_listener_count_stable_across_cycles() {
        let hub = PointerHub::new();
        let mut select = SearchableSelect::new(vec!["Harness".into()]).pointer_hub(hub.clone());

        for _ in 0..10 {
            select.open();
            assert_eq!(hub.listener_count(), 1);
            select.handle_key(key(KeyCode::Esc));
            assert_eq!(hub.listener_count(), 0);
        }
        for _ in 0..10 {
            select.handle_key(key(KeyCode::Enter));
            select.handle_key(key(KeyCode::Enter));
        }
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_drop_while_open_releases_listener() {
        let hub = PointerHub::new();
        let mut select = SearchableSelect::new(vec!["Harness".into()]).pointer_hub(hub.clone());
        select.open();
        assert_eq!(hub.listener_count(), 1);

        drop(select);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(&click(0, 0));
    }

    #[test]
    fn test_disable_while_open_releases_listener() {
        let hub = PointerHub::new();
        let mut select = SearchableSelect::new(vec!["Harness".into()]).pointer_hub(hub.clone());
        select.open();
        select.set_disabled(true);
        assert!(!select.is_open());
        assert_eq!(hub.listener_count(), 0);

        select.open();
        assert!(!select.is_open());
    }
}

// ============================================================================
// REMOTE SEARCH
// ============================================================================

mod remote_search {
    use super::*;
    use pretty_assertions::assert_eq;

    fn searching_select() -> (SearchableSelect, Rc<RefCell<Vec<SearchRequest>>>) {
        let requests: Rc<RefCell<Vec<SearchRequest>>> = Rc::default();
        let sink = Rc::clone(&requests);
        let select = SearchableSelect::new(Vec::new())
            .on_search(move |request| sink.borrow_mut().push(request));
        (select, requests)
    }

    #[test_log::test]
    fn test_only_latest_results_apply() {
        let (mut select, requests) = searching_select();
        type_text(&mut select, "li");
        let (first, latest) = {
            let requests = requests.borrow();
            assert_eq!(requests.len(), 2);
            (requests[0].clone(), requests[1].clone())
        };
        assert_eq!(latest.term, "li");

        // Slow answer to "l" arrives after "li" was typed.
        let stale = select.apply_search_results(first.ticket, vec!["Lanyard".into()]);
        assert!(matches!(stale, Err(SelectError::StaleSearch { .. })));
        assert!(select.options().is_empty());

        select.set_search_loading(true);
        select
            .apply_search_results(latest.ticket, vec!["Lima".into(), "Lisbon".into(), "Oslo".into()])
            .unwrap();
        assert!(!select.is_searching());
        // Results are still narrowed by the live search text.
        assert_eq!(select.filtered_options(), vec!["Lima", "Lisbon"]);
    }

    #[test]
    fn test_results_after_close_are_stale() {
        let (mut select, requests) = searching_select();
        type_text(&mut select, "os");
        let ticket = requests.borrow().last().map(|r| r.ticket).unwrap();
        select.dismiss();

        assert_eq!(
            select.apply_search_results(ticket, vec!["Oslo".into()]),
            Err(SelectError::StaleSearch {
                issued: ticket.generation,
                current: None
            })
        );
    }

    #[test]
    fn test_results_for_another_select_rejected() {
        let (mut left, left_requests) = searching_select();
        let (mut right, _) = searching_select();
        type_text(&mut left, "a");
        type_text(&mut right, "a");
        let ticket = left_requests.borrow()[0].ticket;

        let err = right.apply_search_results(ticket, vec!["Acme".into()]).unwrap_err();
        assert!(matches!(err, SelectError::ForeignTicket { .. }));
        assert!(right.options().is_empty());
        left.apply_search_results(ticket, vec!["Acme".into()]).unwrap();
        assert_eq!(left.filtered_options(), vec!["Acme"]);
    }
}

// ============================================================================
// LABEL ROUND TRIP
// ============================================================================

mod round_trip {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_committed_label_resolves_to_entity() {
        let candidates = lifelines();
        let format = LabelFormat::default();
        let committed = Rc::new(RefCell::new(None::<String>));
        let sink = Rc::clone(&committed);
        let mut select = SearchableSelect::new(option_labels(&candidates, &format))
            .on_change(move |value| *sink.borrow_mut() = Some(value.to_string()));

        type_text(&mut select, "crane");
        select.handle_key(key(KeyCode::Down));
        select.handle_key(key(KeyCode::Enter));

        let label = committed.borrow().clone().unwrap();
        assert_eq!(label, "LL-003 · Crane");
        let found = resolve_selection(&label, &candidates, &format).unwrap();
        assert_eq!(found.code, "LL-003");

        // The host writes the value back; the widget shows the check mark.
        select.set_value(label);
        select.open();
        let text = lines(&draw_at(&select, Rect::new(0, 0, 30, 6)));
        assert!(text[4].starts_with("│ ✓ LL-003 · Crane"));
    }

    #[test]
    fn test_cleared_selection_is_empty() {
        let candidates = lifelines();
        let format = LabelFormat::default();
        let mut select = SearchableSelect::new(option_labels(&candidates, &format))
            .value("LL-001 · Acme · Roof");
        let ComponentResult::Done(value) = select.handle_key(key(KeyCode::Delete)) else {
            panic!("delete should clear");
        };
        assert_eq!(
            resolve_selection(&value, &candidates, &format),
            Err(ResolveError::EmptySelection)
        );
    }
}
