//! Error types for the reveal engine

use thiserror::Error;

/// Reveal engine error
#[derive(Error, Debug)]
pub enum RevealError {
    #[error("Empty pool: category '{category}'{}", context_suffix(.context))]
    EmptyPool {
        category: String,
        context: Option<String>,
    },

    #[error("Invalid context: upstream of slot '{slot}' is unset")]
    InvalidContext { slot: String },

    #[error("Unreachable dependent: no '{category}' pool for parent '{parent}'")]
    UnreachableDependent { category: String, parent: String },

    #[error("Run {0} still in flight")]
    Busy(u64),

    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    #[error("Invalid topology: {0}")]
    Topology(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RevealError {
    pub fn empty_pool(category: impl Into<String>, context: Option<&str>) -> Self {
        Self::EmptyPool {
            category: category.into(),
            context: context.map(str::to_string),
        }
    }

    /// Draw failures keep the slot's last value and let the run continue
    pub fn is_draw_failure(&self) -> bool {
        matches!(
            self,
            RevealError::EmptyPool { .. } | RevealError::UnreachableDependent { .. }
        )
    }
}

fn context_suffix(context: &Option<String>) -> String {
    context
        .as_deref()
        .map(|c| format!(" (context '{c}')"))
        .unwrap_or_default()
}

/// Result type alias
pub type RevealResult<T> = Result<T, RevealError>;
