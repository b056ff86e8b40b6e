use mwbkit_php::EmitError;
use thiserror::Error;

/// Errors raised while turning a table into migration code.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("unsupported type `{type_name}` on column `{column}`")]
    UnsupportedType { type_name: String, column: String },

    #[error("invalid index type `{index_type}` on index `{index}`")]
    InvalidIndexType { index_type: String, index: String },

    #[error(transparent)]
    Emit(#[from] EmitError),
}
