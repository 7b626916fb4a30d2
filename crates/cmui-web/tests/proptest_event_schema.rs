//! Property-based tests for the JSON event schema and engine robustness.
//!
//! Verifies:
//! 1. Every event survives encode then parse unchanged
//! 2. Arbitrary event streams never panic the engine, and ids that are on
//!    the page never produce `UnknownForm`/`UnknownRow`
//! 3. A declined delete never yields an intent, whatever came before

use std::time::Duration;

use cmui_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use cmui_core::ids::{FormId, NoticeId, RowId};
use cmui_core::intent::Intent;
use cmui_forms::{ContactRow, ContactTable, Form};
use cmui_validation::Field;
use cmui_web::{EnhanceError, Enhancer, EnhancerConfig, Page, encode_event, parse_event};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_field() -> impl Strategy<Value = String> {
    prop_oneof![Just("name"), Just("email"), Just("message")].prop_map(String::from)
}

fn arb_key() -> impl Strategy<Value = KeyEvent> {
    let code = prop_oneof![
        any::<char>().prop_map(KeyCode::Char),
        Just(KeyCode::Enter),
        Just(KeyCode::Escape),
        Just(KeyCode::Tab),
        Just(KeyCode::Backspace),
        "[A-Z][a-z]{2,8}".prop_map(|s| KeyCode::from_dom_key(&s)),
    ];
    (code, 0u8..16)
        .prop_map(|(code, bits)| KeyEvent::new(code).with_modifiers(Modifiers::from_bits_truncate(bits)))
}

fn arb_event() -> impl Strategy<Value = Event> {
    let form = (1u32..3).prop_map(FormId);
    prop_oneof![
        (form.clone(), arb_field()).prop_map(|(form, field)| Event::Blur { form, field }),
        (form.clone(), arb_field(), ".{0,12}")
            .prop_map(|(form, field, value)| Event::Input { form, field, value }),
        form.clone().prop_map(|form| Event::Submit { form }),
        form.prop_map(|form| Event::Reset { form }),
        (0u32..3).prop_map(|n| Event::DeleteClick { row: RowId(n) }),
        (0usize..6).prop_map(|column| Event::HeaderClick { column }),
        (0u64..4).prop_map(|n| Event::DismissNotice { notice: NoticeId(n) }),
        arb_key().prop_map(Event::Key),
        Just(Event::BeforeUnload),
    ]
}

fn page() -> Page {
    let fields = || {
        [
            Field::new("name", "Alice").required(),
            Field::new("email", "alice@example.com").required(),
            Field::new("message", "").textarea(),
        ]
    };
    let mut add = Form::new(FormId(1), "/add_contact").with_submit("Add").with_reset();
    let mut edit = Form::new(FormId(2), "/update_contact/2").with_submit("Update");
    for f in fields() {
        add = add.field(f.clone());
        edit = edit.field(f);
    }
    Page::new().form(add).form(edit).with_table(ContactTable {
        headers: ["ID", "Name", "Email", "Message"].map(String::from).to_vec(),
        rows: (0u32..3)
            .map(|n| ContactRow::contact(RowId(n), &n.to_string(), "x", "x@y.z", "m"))
            .collect(),
    })
}

proptest! {
    #[test]
    fn encode_then_parse_is_identity(event in arb_event()) {
        let json = encode_event(&event).unwrap();
        prop_assert_eq!(parse_event(&json).unwrap(), event);
    }
}

proptest! {
    #[test]
    fn event_streams_never_hit_unknown_ids(
        events in prop::collection::vec((arb_event(), 0u64..2_000), 0..60),
        answers in prop::collection::vec(any::<bool>(), 0..8),
    ) {
        let mut e = Enhancer::new(page(), EnhancerConfig::default(), cmui_forms::ScriptedPrompt::new(answers));
        e.init();
        for (event, dt) in events {
            match e.dispatch(event) {
                Ok(()) => {}
                Err(EnhanceError::UnknownForm(_) | EnhanceError::UnknownRow(_)) => {
                    prop_assert!(false, "id on the page reported unknown");
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
            e.advance_time(Duration::from_millis(dt));
        }
        e.advance_time(Duration::from_secs(60));
        e.take_intents();
        prop_assert_eq!(e.pending_tasks(), 0);
    }
}

proptest! {
    #[test]
    fn declined_delete_is_silent(
        prefix in prop::collection::vec(arb_event(), 0..20),
        row in 0u32..3,
    ) {
        let mut e = Enhancer::new(page(), EnhancerConfig::default(), |_: &str| false);
        e.init();
        for event in prefix {
            let _ = e.dispatch(event);
        }
        e.advance_time(Duration::from_secs(60));
        e.take_intents();

        e.dispatch(Event::DeleteClick { row: RowId(row) }).unwrap();
        e.advance_time(Duration::from_secs(60));
        let intents = e.take_intents();
        let no_busy_dim_or_navigate = intents.iter().all(|i| !matches!(
            i,
            Intent::SetDeleteBusy { .. } | Intent::DimRow { .. } | Intent::Navigate { .. }
        ));
        prop_assert!(no_busy_dim_or_navigate);
        prop_assert!(intents.is_empty());
    }
}
