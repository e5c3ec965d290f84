use super::gate::GateError;
use crate::errors::QuickpickError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CloseError {
    #[error(transparent)]
    Gate(#[from] GateError),
}

impl QuickpickError for CloseError {
    fn error_code(&self) -> &'static str {
        match self {
            CloseError::Gate(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            CloseError::Gate(e) => e.is_user_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_error_delegates_to_gate() {
        let err = CloseError::from(GateError::new("boom"));
        assert_eq!(err.error_code(), "CLOSE_GATE_FAILED");
        assert!(!err.is_user_error());
        assert_eq!(err.to_string(), "Close gate failed: boom");
    }
}
