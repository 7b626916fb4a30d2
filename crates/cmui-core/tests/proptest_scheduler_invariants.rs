//! Property-based invariant tests for the task scheduler.
//!
//! Verifies:
//! 1. Released tasks come out in non-decreasing due order
//! 2. Nothing is released before it is due
//! 3. Cancelling an owner leaves no task of that owner behind
//! 4. Every scheduled, uncancelled task is released exactly once

use std::collections::HashSet;
use std::time::Duration;

use cmui_core::ids::{FormId, RowId};
use cmui_core::scheduler::{Scheduler, TaskOwner};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_owner() -> impl Strategy<Value = TaskOwner> {
    prop_oneof![
        (0u32..4).prop_map(|n| TaskOwner::Form(FormId(n))),
        (0u32..4).prop_map(|n| TaskOwner::Row(RowId(n))),
        (0usize..4).prop_map(TaskOwner::Header),
        Just(TaskOwner::Page),
    ]
}

fn arb_plan() -> impl Strategy<Value = Vec<(u64, TaskOwner)>> {
    prop::collection::vec((0u64..10_000, arb_owner()), 0..40)
}

fn drain(s: &mut Scheduler<usize>, now: Duration) -> Vec<(Duration, usize)> {
    let mut out = Vec::new();
    while let Some(t) = s.pop_due(now) {
        out.push((t.due, t.task));
    }
    out
}

proptest! {
    #[test]
    fn release_order_is_by_due_time(plan in arb_plan()) {
        let mut s = Scheduler::new();
        for (i, (delay, owner)) in plan.iter().enumerate() {
            s.schedule(Duration::ZERO, Duration::from_millis(*delay), *owner, i);
        }
        let fired = drain(&mut s, Duration::from_secs(60));
        prop_assert!(fired.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}

proptest! {
    #[test]
    fn nothing_fires_early(plan in arb_plan(), cutoff in 0u64..10_000) {
        let mut s = Scheduler::new();
        for (i, (delay, owner)) in plan.iter().enumerate() {
            s.schedule(Duration::ZERO, Duration::from_millis(*delay), *owner, i);
        }
        let now = Duration::from_millis(cutoff);
        let fired = drain(&mut s, now);
        prop_assert!(fired.iter().all(|(due, _)| *due <= now));
        let expected = plan.iter().filter(|(d, _)| *d <= cutoff).count();
        prop_assert_eq!(fired.len(), expected);
    }
}

proptest! {
    #[test]
    fn cancel_owner_removes_all_of_its_tasks(plan in arb_plan(), victim in arb_owner()) {
        let mut s = Scheduler::new();
        for (i, (delay, owner)) in plan.iter().enumerate() {
            s.schedule(Duration::ZERO, Duration::from_millis(*delay), *owner, i);
        }
        s.cancel_owner(victim);
        prop_assert_eq!(s.pending_for(victim), 0);

        let fired = drain(&mut s, Duration::from_secs(60));
        let survivors = plan.iter().filter(|(_, o)| *o != victim).count();
        prop_assert_eq!(fired.len(), survivors);
        for (_, idx) in fired {
            prop_assert_ne!(plan[idx].1, victim);
        }
    }
}

proptest! {
    #[test]
    fn each_task_fires_exactly_once(plan in arb_plan(), steps in prop::collection::vec(1u64..3_000, 1..10)) {
        let mut s = Scheduler::new();
        for (i, (delay, owner)) in plan.iter().enumerate() {
            s.schedule(Duration::ZERO, Duration::from_millis(*delay), *owner, i);
        }
        let mut now = Duration::ZERO;
        let mut seen = HashSet::new();
        for step in steps {
            now += Duration::from_millis(step);
            for (_, idx) in drain(&mut s, now) {
                prop_assert!(seen.insert(idx), "task {} fired twice", idx);
            }
        }
        for (_, idx) in drain(&mut s, Duration::from_secs(60)) {
            prop_assert!(seen.insert(idx), "task {} fired twice", idx);
        }
        prop_assert_eq!(seen.len(), plan.len());
    }
}
