//! Side-effect commands returned from update

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Layout geometry changed; the host should redraw
    Redraw,
    /// Show a different pointer cursor (CSS cursor names, e.g. `ew-resize`)
    SetCursor(&'static str),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Whether this command (or any command in a batch) requests a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::Redraw => true,
            Cmd::SetCursor(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::needs_redraw),
        }
    }

    /// Cursor requested by this command, if any (last one wins in a batch)
    pub fn cursor(&self) -> Option<&'static str> {
        match self {
            Cmd::Redraw => None,
            Cmd::SetCursor(cursor) => Some(*cursor),
            Cmd::Batch(cmds) => cmds.iter().rev().find_map(Cmd::cursor),
        }
    }
}
