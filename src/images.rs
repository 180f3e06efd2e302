//! Image uploading, backed by whichever [`aws::Api`] the registry holds.

use crate::{aws, RegistryApi, RegistryError};

/// Internal image uploader that takes its AWS client from a registry.
#[derive(Debug, Clone)]
pub struct Uploader {
    aws_api: aws::Api,
}

impl Uploader {
    /// Builds an uploader from the [`aws::Api`] registered in `deps`.
    ///
    /// # Errors
    ///
    /// Whatever the registry returns for the lookup, unchanged; typically
    /// [`RegistryError::NotRegistered`] when wiring forgot the client.
    pub fn new(deps: &impl RegistryApi) -> Result<Self, RegistryError> {
        let mut aws_api = aws::Api::default();
        deps.get(&mut aws_api)?;
        Ok(Self { aws_api })
    }

    /// Builds an uploader from the process-wide [`global`](crate::global) registry.
    ///
    /// # Errors
    ///
    /// Same as [`Uploader::new`].
    pub fn from_global() -> Result<Self, RegistryError> {
        Self::new(crate::global::api())
    }

    /// Uploads a fixed test payload.
    pub fn upload(&self) -> String {
        self.aws_api.upload_image(b"testing")
    }
}
