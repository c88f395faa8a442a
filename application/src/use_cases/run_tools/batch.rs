//! Batch execution.
//!
//! A batch is partitioned into independent reads and per-path write
//! groups. Each read, and each write group's sequential chain, is one work
//! unit; all units share a single pool of `max_concurrency` slots.
//! Outcomes are collected by batch position and returned in input order.

use futures::stream::{self, StreamExt};
use toolbatch_domain::{BatchPlan, Indexed, ToolCall, ToolOutcome, WriteGroup};
use tracing::{debug, info};

use super::ToolScheduler;
use crate::context::ExecutionContext;

enum WorkUnit {
    Read(Indexed<ToolCall>),
    Writes(WriteGroup),
}

impl ToolScheduler {
    /// Execute a batch, returning exactly one outcome per call in input
    /// order. A failing call never aborts the others.
    pub async fn run_batch(&self, mut calls: Vec<ToolCall>) -> Vec<ToolOutcome> {
        if calls.len() <= 1 {
            return match calls.pop() {
                Some(call) => vec![self.run_one(call).await],
                None => Vec::new(),
            };
        }

        let ctx = self.context();
        // group by the same root-relative path the executors will touch
        let plan = BatchPlan::partition_with(&calls, &self.config.mutating_tools, |path| {
            ctx.resolve(path)
        });
        info!(
            calls = calls.len(),
            reads = plan.reads.len(),
            write_groups = plan.write_groups.len(),
            max_concurrency = self.config.max_concurrency,
            "Running tool batch"
        );

        let units = plan
            .reads
            .into_iter()
            .map(WorkUnit::Read)
            .chain(plan.write_groups.into_iter().map(WorkUnit::Writes));

        let ctx_ref: &ExecutionContext = &ctx;
        let completed: Vec<Vec<Indexed<ToolOutcome>>> = stream::iter(units)
            .map(move |unit| self.run_unit(unit, ctx_ref))
            .buffer_unordered(self.config.max_concurrency)
            .collect()
            .await;

        let mut slots: Vec<Option<ToolOutcome>> = vec![None; calls.len()];
        for outcome in completed.into_iter().flatten() {
            if let Some(slot) = slots.get_mut(outcome.index) {
                *slot = Some(outcome.item);
            }
        }

        calls
            .iter()
            .zip(slots)
            .map(|(call, slot)| {
                slot.unwrap_or_else(|| {
                    ToolOutcome::error(&call.id, format!("Tool '{}' was not executed", call.name))
                })
            })
            .collect()
    }

    async fn run_unit(&self, unit: WorkUnit, ctx: &ExecutionContext) -> Vec<Indexed<ToolOutcome>> {
        match unit {
            WorkUnit::Read(call) => {
                let item = self.execute_call(&call.item, ctx).await;
                vec![Indexed {
                    index: call.index,
                    item,
                }]
            }
            WorkUnit::Writes(group) => {
                debug!(key = %group.key, calls = group.calls.len(), "Running write chain");
                let mut outcomes = Vec::with_capacity(group.calls.len());
                for call in group.calls {
                    let item = self.execute_call(&call.item, ctx).await;
                    outcomes.push(Indexed {
                        index: call.index,
                        item,
                    });
                }
                outcomes
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use std::sync::atomic::Ordering;
    use toolbatch_domain::ToolCall;

    fn ids(outcomes: &[toolbatch_domain::ToolOutcome]) -> Vec<&str> {
        outcomes.iter().map(|o| o.tool_call_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let harness = Harness::new();
        assert!(harness.scheduler.run_batch(Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_single_call_batch() {
        let harness = Harness::new();
        let outcomes = harness
            .scheduler
            .run_batch(vec![read_call("only", "a.txt", 0)])
            .await;
        assert_eq!(ids(&outcomes), vec!["only"]);
        assert_eq!(outcomes[0].content, "read a.txt");
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_preserved_under_variable_latency() {
        let harness = Harness::with_concurrency(4);
        let calls = vec![
            read_call("c0", "f0", 50),
            read_call("c1", "f1", 10),
            read_call("c2", "f2", 30),
            read_call("c3", "f3", 0),
            read_call("c4", "f4", 20),
        ];

        let outcomes = harness.scheduler.run_batch(calls).await;

        assert_eq!(ids(&outcomes), vec!["c0", "c1", "c2", "c3", "c4"]);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.content, format!("read f{}", i));
        }
        // Completion order differs from submission order.
        assert_eq!(harness.spans.labels(), vec!["f3", "f1", "f4", "f2", "f0"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_path_writes_serialize() {
        let harness = Harness::with_concurrency(4);
        let calls = vec![
            append_call("w1", "log.txt", "one", 30),
            append_call("w2", "log.txt", "two", 5),
            append_call("w3", "./log.txt", "three", 10),
        ];

        let outcomes = harness.scheduler.run_batch(calls).await;

        assert_eq!(ids(&outcomes), vec!["w1", "w2", "w3"]);
        assert_eq!(harness.files.entries("log.txt"), vec!["one", "two"]);
        assert_eq!(harness.files.entries("./log.txt"), vec!["three"]);

        let spans = harness.spans.spans();
        assert_eq!(spans.len(), 3);
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
        assert_eq!(
            harness.spans.labels(),
            vec!["log.txt=one", "log.txt=two", "./log.txt=three"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_absolute_and_relative_spellings_share_a_chain() {
        let harness = Harness::with_concurrency(4);
        let calls = vec![
            append_call("w1", "/y", "v1", 50),
            append_call("w2", "y", "v2", 0),
            append_call("w3", "/work/y", "v3", 0),
        ];

        harness.scheduler.run_batch(calls).await;

        assert_eq!(harness.spans.labels(), vec!["/y=v1", "y=v2", "/work/y=v3"]);
        let spans = harness.spans.spans();
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_paths_overlap() {
        let harness = Harness::with_concurrency(4);
        let calls = vec![
            append_call("a1", "a.txt", "1", 30),
            append_call("b1", "b.txt", "1", 30),
            append_call("a2", "a.txt", "2", 30),
        ];

        harness.scheduler.run_batch(calls).await;

        let a1 = harness.spans.find("a.txt=1");
        let a2 = harness.spans.find("a.txt=2");
        let b1 = harness.spans.find("b.txt=1");
        assert!(a1.overlaps(&b1));
        assert!(!a1.overlaps(&a2));
        assert!(a1.end <= a2.start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pool_bounds_concurrency() {
        let harness = Harness::with_concurrency(2);
        let calls = (0..4)
            .map(|i| read_call(&format!("c{}", i), &format!("f{}", i), 10))
            .collect();

        harness.scheduler.run_batch(calls).await;

        let spans = harness.spans.spans();
        for span in &spans {
            let concurrent = spans.iter().filter(|other| other.overlaps(span)).count();
            assert!(concurrent <= 2, "{} units ran at once", concurrent);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_mixed_batch() {
        let harness = Harness::with_concurrency(2);
        let calls = vec![
            read_call("r1", "/x", 20),
            append_call("w1", "/y", "v1", 15),
            append_call("w2", "/y", "v2", 5),
            read_call("r2", "/z", 0),
        ];

        let outcomes = harness.scheduler.run_batch(calls).await;

        assert_eq!(ids(&outcomes), vec!["r1", "w1", "w2", "r2"]);
        assert!(outcomes.iter().all(|o| !o.is_error));
        assert_eq!(outcomes[0].content, "read /x");
        assert_eq!(outcomes[3].content, "read /z");
        assert_eq!(harness.files.entries("/y").last().map(String::as_str), Some("v2"));
        assert_eq!(harness.files.entries("/y"), vec!["v1", "v2"]);
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let harness = Harness::new();
        let calls = vec![
            read_call("ok1", "a", 0),
            ToolCall::new("bad", "fail"),
            ToolCall::new("ghost", "no_such_tool"),
            read_call("ok2", "b", 0),
        ];

        let outcomes = harness.scheduler.run_batch(calls).await;

        assert_eq!(ids(&outcomes), vec!["ok1", "bad", "ghost", "ok2"]);
        assert!(!outcomes[0].is_error);
        assert!(outcomes[1].is_error);
        assert_eq!(outcomes[2].content, "Unknown tool: no_such_tool");
        assert!(!outcomes[3].is_error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_identical_reads_execute_once() {
        let harness = Harness::with_concurrency(4);
        let calls = vec![read_call("a", "same", 10), read_call("b", "same", 10)];

        let outcomes = harness.scheduler.run_batch(calls).await;

        assert_eq!(ids(&outcomes), vec!["a", "b"]);
        assert_eq!(outcomes[0].content, outcomes[1].content);
        assert_eq!(harness.reads.load(Ordering::SeqCst), 1);
        assert_eq!(harness.metrics.records().len(), 1);
    }
}
