//! エラー型

use thiserror::Error;

/// 評価パラメータファイルの読み書きエラー
#[derive(Debug, Error)]
pub enum EvalFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("feature table truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("feature table has trailing data after {expected} bytes")]
    TrailingData { expected: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = EvalFileError::Truncated { expected: 10, actual: 4 };
        assert_eq!(e.to_string(), "feature table truncated: expected 10 bytes, got 4");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "eval.bin");
        let e: EvalFileError = io.into();
        assert!(matches!(e, EvalFileError::Io(_)));
        assert_eq!(e.to_string(), "eval.bin");
    }
}
