//! Stand-in for a third-party SDK client that knows nothing about the registry.

/// Credentialed AWS API client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Api {
    key: String,
    secret: String,
}

impl Api {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Pretends to upload `data`, echoing it back together with the credentials.
    pub fn upload_image(&self, data: &[u8]) -> String {
        format!(
            "Uploading image to AWS: {} {}:{}",
            String::from_utf8_lossy(data),
            self.key,
            self.secret
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_image_format() {
        let api = Api::new("my key", "my secret");
        assert_eq!(
            api.upload_image(b"cat.png"),
            "Uploading image to AWS: cat.png my key:my secret"
        );
    }

    #[test]
    fn test_default_has_empty_credentials() {
        assert_eq!(
            Api::default().upload_image(b""),
            "Uploading image to AWS:  :"
        );
    }
}
