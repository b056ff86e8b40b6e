use mwbkit_laravel::TranslateError;
use mwbkit_schema::LoadError;
use thiserror::Error;

use crate::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
