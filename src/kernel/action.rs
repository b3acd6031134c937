use crate::core::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RunCommand(Command),
    SetViewHeight { height: usize },
    Refresh,
}
