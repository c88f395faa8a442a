//! Read/write classification and per-path write grouping
//!
//! A batch is split into reads, which may run in any order, and write
//! groups: all mutating calls that address the same target path, kept in
//! submission order. A write group is a sharded mutex keyed by path,
//! computed once per batch instead of held as a long-lived lock.
//!
//! ```text
//! [read a, write b#1, write c, write b#2, read d]
//!   reads:        [0: read a] [4: read d]
//!   write groups: b → [1: write b#1, 3: write b#2]
//!                 c → [2: write c]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::entities::ToolCall;

/// Grouping key shared by writes with no determinable target path.
pub const SHARED_WRITE_KEY: &str = "<no-path>";

/// Input field holding the target path when a tool declares none.
pub const DEFAULT_PATH_FIELD: &str = "path";

/// Whether a call may run concurrently with anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolClass {
    Read,
    Write,
}

/// The closed set of mutating tools, each with its target-path field.
///
/// Anything not listed here is a read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutatingTools {
    tools: BTreeMap<String, String>,
}

impl MutatingTools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a mutating tool whose target path lives in `path`
    pub fn with_tool(self, name: impl Into<String>) -> Self {
        self.with_tool_field(name, DEFAULT_PATH_FIELD)
    }

    /// Declare a mutating tool with a tool-specific path field
    pub fn with_tool_field(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.tools.insert(name.into(), field.into());
        self
    }

    pub fn classify(&self, tool_name: &str) -> ToolClass {
        if self.tools.contains_key(tool_name) {
            ToolClass::Write
        } else {
            ToolClass::Read
        }
    }

    pub fn is_mutating(&self, tool_name: &str) -> bool {
        self.classify(tool_name) == ToolClass::Write
    }

    /// The input field that holds the target path of a mutating tool
    pub fn path_field(&self, tool_name: &str) -> Option<&str> {
        self.tools.get(tool_name).map(|s| s.as_str())
    }

    /// Raw target path of a call, if the tool is mutating and the field is a string
    pub fn target_path<'a>(&self, call: &'a ToolCall) -> Option<&'a str> {
        self.path_field(&call.name)
            .and_then(|field| call.get_str(field))
    }

    /// Grouping key for a write call, by lexical normalization
    pub fn write_key(&self, call: &ToolCall) -> String {
        self.write_key_with(call, |path| Some(normalize_path(path)))
    }

    /// Grouping key for a write call, mapping the raw target through
    /// `resolve`. Targets `resolve` rejects share [`SHARED_WRITE_KEY`].
    ///
    /// Pass the same resolution the executors use so that every spelling
    /// of one file (`/y`, `y`, `<root>/y`) lands in one group.
    pub fn write_key_with<F>(&self, call: &ToolCall, resolve: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        self.target_path(call)
            .filter(|path| !path.trim().is_empty())
            .and_then(resolve)
            .unwrap_or_else(|| SHARED_WRITE_KEY.to_string())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Lexically normalize a path so equivalent spellings share a key.
///
/// Strips surrounding whitespace, converts `\` to `/`, drops empty and `.`
/// segments and folds `..` where a parent segment exists. Leading `..`
/// segments are kept; a leading `/` is preserved.
pub fn normalize_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    let absolute = path.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(&last) if last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// A call together with its position in the submitted batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed<T> {
    pub index: usize,
    pub item: T,
}

/// Writes sharing one target path, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteGroup {
    pub key: String,
    pub calls: Vec<Indexed<ToolCall>>,
}

/// A batch split into independent reads and serialized write groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPlan {
    pub reads: Vec<Indexed<ToolCall>>,
    /// Ordered by first appearance of each key in the batch
    pub write_groups: Vec<WriteGroup>,
}

impl BatchPlan {
    /// Partition with write keys from lexical normalization.
    pub fn partition(calls: &[ToolCall], mutating: &MutatingTools) -> Self {
        Self::partition_with(calls, mutating, |path| Some(normalize_path(path)))
    }

    /// Partition with write keys from a caller-supplied path resolver.
    pub fn partition_with<F>(calls: &[ToolCall], mutating: &MutatingTools, resolve: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut plan = BatchPlan::default();
        let mut group_index: HashMap<String, usize> = HashMap::new();

        for (index, call) in calls.iter().enumerate() {
            let entry = Indexed {
                index,
                item: call.clone(),
            };

            match mutating.classify(&call.name) {
                ToolClass::Read => plan.reads.push(entry),
                ToolClass::Write => {
                    let key = mutating.write_key_with(call, &resolve);
                    match group_index.get(&key) {
                        Some(&slot) => plan.write_groups[slot].calls.push(entry),
                        None => {
                            group_index.insert(key.clone(), plan.write_groups.len());
                            plan.write_groups.push(WriteGroup {
                                key,
                                calls: vec![entry],
                            });
                        }
                    }
                }
            }
        }

        plan
    }

    /// Number of independently schedulable units (reads + write chains)
    pub fn unit_count(&self) -> usize {
        self.reads.len() + self.write_groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mutating() -> MutatingTools {
        MutatingTools::new()
            .with_tool("write_file")
            .with_tool_field("rename_file", "from")
    }

    fn write(id: &str, path: &str) -> ToolCall {
        ToolCall::new(id, "write_file").with_arg("path", path)
    }

    #[test]
    fn test_classify_closed_set() {
        let tools = mutating();
        assert_eq!(tools.classify("write_file"), ToolClass::Write);
        assert_eq!(tools.classify("rename_file"), ToolClass::Write);
        assert_eq!(tools.classify("read_file"), ToolClass::Read);
        assert_eq!(tools.classify("anything_else"), ToolClass::Read);
    }

    #[test]
    fn test_tool_specific_path_field() {
        let tools = mutating();
        let call = ToolCall::new("1", "rename_file")
            .with_arg("from", "a.txt")
            .with_arg("path", "ignored.txt");
        assert_eq!(tools.write_key(&call), "a.txt");
    }

    #[test]
    fn test_missing_or_non_string_path_uses_shared_key() {
        let tools = mutating();
        let no_path = ToolCall::new("1", "write_file");
        let numeric = ToolCall::new("2", "write_file").with_arg("path", 42);
        let blank = write("3", "  ");
        assert_eq!(tools.write_key(&no_path), SHARED_WRITE_KEY);
        assert_eq!(tools.write_key(&numeric), SHARED_WRITE_KEY);
        assert_eq!(tools.write_key(&blank), SHARED_WRITE_KEY);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("./src//lib.rs"), "src/lib.rs");
        assert_eq!(normalize_path("src/bin/../lib.rs"), "src/lib.rs");
        assert_eq!(normalize_path("/a/./b/"), "/a/b");
        assert_eq!(normalize_path("/../a"), "/a");
        assert_eq!(normalize_path("../a"), "../a");
        assert_eq!(normalize_path("src\\main.rs"), "src/main.rs");
        assert_eq!(normalize_path("./"), ".");
    }

    #[test]
    fn test_partition_groups_equivalent_paths() {
        let calls = vec![
            ToolCall::new("r1", "read_file").with_arg("path", "a"),
            write("w1", "b.txt"),
            write("w2", "c.txt"),
            write("w3", "./b.txt"),
            ToolCall::new("r2", "read_file").with_arg("path", "d"),
        ];

        let plan = BatchPlan::partition(&calls, &mutating());

        let read_indices: Vec<usize> = plan.reads.iter().map(|r| r.index).collect();
        assert_eq!(read_indices, vec![0, 4]);

        assert_eq!(plan.write_groups.len(), 2);
        assert_eq!(plan.write_groups[0].key, "b.txt");
        let b_ids: Vec<&str> = plan.write_groups[0]
            .calls
            .iter()
            .map(|c| c.item.id.as_str())
            .collect();
        assert_eq!(b_ids, vec!["w1", "w3"]);
        assert_eq!(plan.write_groups[1].key, "c.txt");
        assert_eq!(plan.unit_count(), 4);
    }

    #[test]
    fn test_partition_with_resolver_merges_aliases() {
        // stand-in for workspace resolution: strip the root, refuse escapes
        let resolve = |path: &str| {
            let relative = normalize_path(path.trim_start_matches("/work").trim_start_matches('/'));
            (!relative.starts_with("..")).then_some(relative)
        };
        let calls = vec![
            write("w1", "/y"),
            write("w2", "y"),
            write("w3", "/work/y"),
            write("w4", "../escape"),
            ToolCall::new("w5", "write_file"),
        ];

        let plan = BatchPlan::partition_with(&calls, &mutating(), resolve);

        assert_eq!(plan.write_groups.len(), 2);
        assert_eq!(plan.write_groups[0].key, "y");
        assert_eq!(plan.write_groups[0].calls.len(), 3);
        assert_eq!(plan.write_groups[1].key, SHARED_WRITE_KEY);
        let shared: Vec<&str> = plan.write_groups[1]
            .calls
            .iter()
            .map(|c| c.item.id.as_str())
            .collect();
        assert_eq!(shared, vec!["w4", "w5"]);
    }

    #[test]
    fn test_pathless_writes_share_one_group() {
        let calls = vec![
            ToolCall::new("a", "write_file"),
            write("b", "x"),
            ToolCall::new("c", "write_file"),
        ];
        let plan = BatchPlan::partition(&calls, &mutating());

        assert_eq!(plan.write_groups.len(), 2);
        assert_eq!(plan.write_groups[0].key, SHARED_WRITE_KEY);
        assert_eq!(plan.write_groups[0].calls.len(), 2);
        assert_eq!(plan.write_groups[0].calls[1].item.id, "c");
    }
}
