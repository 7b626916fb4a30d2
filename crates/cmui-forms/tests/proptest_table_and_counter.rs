//! Property-based tests for table sorting and the character counter.
//!
//! Verifies:
//! 1. Sorting emits a permutation of the current rows
//! 2. Sorting by ID puts numeric ids in ascending order before every
//!    non-numeric id, which keep their relative order
//! 3. Text columns sort case-insensitively and sorting twice is stable
//! 4. Counter levels never decrease as the length grows

use std::time::Duration;

use cmui_core::ids::RowId;
use cmui_core::intent::{CounterLevel, Intent};
use cmui_forms::counter::counter_state;
use cmui_forms::{ContactRow, ContactTable, Effects};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_id_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (-50i64..500).prop_map(|n| n.to_string()),
        1 => "[a-z]{1,4}",
        1 => Just(String::new()),
    ]
}

fn arb_table() -> impl Strategy<Value = ContactTable> {
    prop::collection::vec((arb_id_cell(), "[A-Za-z ]{0,8}"), 0..20).prop_map(|cells| {
        ContactTable {
            headers: ["ID", "Name", "Email", "Message", "Actions"]
                .map(String::from)
                .to_vec(),
            rows: cells
                .into_iter()
                .enumerate()
                .map(|(i, (id, name))| {
                    ContactRow::contact(RowId(i as u32), &id, &name, "e@x.io", "m")
                })
                .collect(),
        }
    })
}

fn emitted_order(fx: &mut Effects) -> Vec<RowId> {
    fx.drain_intents()
        .into_iter()
        .find_map(|i| match i {
            Intent::ReorderRows { order } => Some(order),
            _ => None,
        })
        .unwrap_or_default()
}

fn rank(level: CounterLevel) -> u8 {
    match level {
        CounterLevel::Normal => 0,
        CounterLevel::Warning => 1,
        CounterLevel::Danger => 2,
    }
}

proptest! {
    #[test]
    fn sort_emits_a_permutation(mut table in arb_table(), column in 0usize..4) {
        let mut before: Vec<RowId> = table.rows.iter().map(|r| r.id).collect();
        let mut fx = Effects::new();
        prop_assert!(table.sort_by(&mut fx, column, Duration::from_secs(1)));
        let mut after = emitted_order(&mut fx);
        prop_assert_eq!(after.len(), before.len());
        before.sort();
        after.sort();
        prop_assert_eq!(after, before);
    }
}

proptest! {
    #[test]
    fn id_sort_is_numeric_with_garbage_last(mut table in arb_table()) {
        let garbage_before: Vec<RowId> = table
            .rows
            .iter()
            .filter(|r| r.cell(0).parse::<i64>().is_err())
            .map(|r| r.id)
            .collect();

        let mut fx = Effects::new();
        table.sort_by(&mut fx, 0, Duration::from_secs(1));

        let ids: Vec<Option<i64>> = table.rows.iter().map(|r| r.cell(0).parse().ok()).collect();
        let first_garbage = ids.iter().position(Option::is_none).unwrap_or(ids.len());
        prop_assert!(ids[first_garbage..].iter().all(Option::is_none));
        let numeric: Vec<i64> = ids[..first_garbage].iter().flatten().copied().collect();
        prop_assert!(numeric.windows(2).all(|w| w[0] <= w[1]));

        let garbage_after: Vec<RowId> = table.rows[first_garbage..].iter().map(|r| r.id).collect();
        prop_assert_eq!(garbage_after, garbage_before);
    }
}

proptest! {
    #[test]
    fn name_sort_ignores_case_and_is_idempotent(mut table in arb_table()) {
        let mut fx = Effects::new();
        table.sort_by(&mut fx, 1, Duration::from_secs(1));
        let keys: Vec<String> = table.rows.iter().map(|r| r.cell(1).to_lowercase()).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));

        let first = emitted_order(&mut fx);
        table.sort_by(&mut fx, 1, Duration::from_secs(1));
        prop_assert_eq!(emitted_order(&mut fx), first);
    }
}

proptest! {
    #[test]
    fn counter_level_is_monotonic(max in 1usize..5_000, a in 0usize..6_000, b in 0usize..6_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (text, level_lo) = counter_state(lo, max);
        let (_, level_hi) = counter_state(hi, max);
        prop_assert!(rank(level_lo) <= rank(level_hi));
        prop_assert_eq!(text, format!("{lo}/{max} characters"));
    }
}
