use std::fmt::{self, Display, Formatter};

use crate::config::ConfigurationError;
use crate::stores::StoreError;

#[derive(Debug)]
pub struct UnderFsError(String);

impl From<&'static str> for UnderFsError {
    fn from(val: &'static str) -> Self {
        Self(val.to_string())
    }
}

impl From<String> for UnderFsError {
    fn from(val: String) -> Self {
        Self(val)
    }
}

impl From<ConfigurationError> for UnderFsError {
    fn from(error: ConfigurationError) -> Self {
        Self(error.to_string())
    }
}

impl From<StoreError> for UnderFsError {
    fn from(error: StoreError) -> Self {
        Self(error.to_string())
    }
}

impl Display for UnderFsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type UnderFsResult<T> = Result<T, UnderFsError>;
