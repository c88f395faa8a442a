//! Sandbox verdicts for the `check-path` command

use toolbatch_application::ExecutionContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathVerdict {
    /// Inside the workspace and admitted by the sandbox
    Allowed { relative: String },
    /// Escapes the workspace root
    OutsideWorkspace,
    /// Inside the workspace but rejected; `pattern` is the deny glob, if one matched
    Denied {
        relative: String,
        pattern: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCheck {
    pub path: String,
    pub verdict: PathVerdict,
}

impl PathCheck {
    pub fn evaluate(ctx: &ExecutionContext, path: &str) -> Self {
        let verdict = match ctx.resolve(path) {
            None => PathVerdict::OutsideWorkspace,
            Some(relative) if ctx.is_path_allowed(&relative) => PathVerdict::Allowed { relative },
            Some(relative) => PathVerdict::Denied {
                pattern: ctx.sandbox().denying_pattern(&relative).map(str::to_string),
                relative,
            },
        };
        Self {
            path: path.to_string(),
            verdict,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self.verdict, PathVerdict::Allowed { .. })
    }
}
