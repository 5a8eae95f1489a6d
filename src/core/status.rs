//! Process return status

use serde::Serialize;

/// Final status of a run, mapped onto the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReturnStatus {
    FileOpened,
    DirOpened,
    FileCouldNotOpen,
    DirContainsFilesCouldNotOpen,
    Error,
    BadArgs,
    UndefinedStatus,
}

impl ReturnStatus {
    /// Exit code reported to the shell
    pub fn exit_code(self) -> u8 {
        match self {
            ReturnStatus::FileOpened | ReturnStatus::DirOpened => 0,
            ReturnStatus::FileCouldNotOpen | ReturnStatus::DirContainsFilesCouldNotOpen => 1,
            ReturnStatus::Error => 2,
            ReturnStatus::BadArgs => 3,
            ReturnStatus::UndefinedStatus => 4,
        }
    }
}
