//! Pipeline state machine.
//!
//! ```text
//! Start -> InstallingDeps -> Bundling -> Reporting -> Done
//!              |                |
//!              +----> Failed <--+
//! ```
//!
//! `Done` and `Failed` are terminal.

use std::fmt;

/// Where the pipeline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Start,
    InstallingDeps,
    Bundling,
    Reporting,
    Done,
    Failed,
}

impl PipelineState {
    /// Number of working stages, for `[n/3]` progress headers.
    pub const STAGE_COUNT: usize = 3;

    /// Next state after the current one succeeds. `None` from terminal states.
    pub fn on_success(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::InstallingDeps),
            Self::InstallingDeps => Some(Self::Bundling),
            Self::Bundling => Some(Self::Reporting),
            Self::Reporting => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// State after the current one fails. Only the two tool-driven stages can fail.
    pub fn on_failure(self) -> Option<Self> {
        match self {
            Self::InstallingDeps | Self::Bundling => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// 1-based stage number for working stages.
    pub fn stage_number(self) -> Option<usize> {
        match self {
            Self::InstallingDeps => Some(1),
            Self::Bundling => Some(2),
            Self::Reporting => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::InstallingDeps => "dependency installation",
            Self::Bundling => "executable bundling",
            Self::Reporting => "completion report",
            Self::Done => "done",
            Self::Failed => "failed",
        })
    }
}
