use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum CoreReason {
    #[error("rule load error")]
    RuleLoad,
    #[error("rule parse error")]
    RuleParse,
    #[error("plugin provider error")]
    Provider,
    #[error("processor registry error")]
    Registry,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for CoreReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::RuleLoad => 1001,
            Self::RuleParse => 1002,
            Self::Provider => 1003,
            Self::Registry => 1004,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type CoreError = StructError<CoreReason>;
pub type CoreResult<T> = Result<T, CoreError>;
