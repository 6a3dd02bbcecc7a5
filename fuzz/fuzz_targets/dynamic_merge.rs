#![no_main]

// Harness: dynamic_merge – membership union, removal stability and no resurrection.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use causal_clock::causal::CausalOrder;
use causal_clock::time::DynamicVectorTimestamp;
use causal_clock::types::{ProcessId, Relation};

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Step {
    Tick(u8),
    Send { from: u8, to: u8 },
    MarkRemovable { at: u8, target: u8 },
    Prune(u8),
}

const PROCESSES: usize = 4;

fuzz_target!(|steps: Vec<Step>| {
    let ids: Vec<ProcessId> = (0..PROCESSES).map(|i| ProcessId::from(format!("p{i}"))).collect();
    let mut views: Vec<DynamicVectorTimestamp> =
        ids.iter().map(|id| DynamicVectorTimestamp::new(id.clone())).collect();
    let pick = |n: u8| usize::from(n) % PROCESSES;

    for step in steps {
        match step {
            Step::Tick(p) => {
                let p = pick(p);
                let before = views[p].clone();
                views[p] = before.next(&ids[p]).expect("own entry present");
                assert_eq!(views[p].compare(&before).unwrap(), Relation::HappensAfter);
            }
            Step::Send { from, to } => {
                let (from, to) = (pick(from), pick(to));
                let message = views[from].clone();
                let merged = views[to].next_with(&ids[to], &message).expect("own entry present");
                for id in message.processes() {
                    assert!(merged.contains(id) || merged.removed().contains(id));
                }
                views[to] = merged;
            }
            Step::MarkRemovable { at, target } => {
                let (at, target) = (pick(at), pick(target));
                if let Ok(marked) = views[at].mark_process_as_removable(&ids[target]) {
                    views[at] = marked.next(&ids[at]).expect("own entry present");
                }
            }
            Step::Prune(p) => {
                let p = pick(p);
                let (pruned, removed) = views[p].prune();
                for id in &removed {
                    assert!(!pruned.contains(id));
                    assert!(pruned.removed().contains(id));
                }
                if pruned.contains(&ids[p]) {
                    views[p] = pruned;
                }
            }
        }
    }
});
