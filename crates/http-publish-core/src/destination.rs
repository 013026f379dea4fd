//! Destination records
//!
//! A destination is one named HTTP endpoint a document can be published to.
//! [`DestinationSettings`] is immutable once built; [`DestinationDraft`]
//! captures form input field by field and only produces a record through
//! [`DestinationDraft::finalize`], which validates it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One publish target
///
/// Construction never fails. Every string is trimmed and a blank value is
/// stored as absent. Call [`validate`](Self::validate) before persisting or
/// using a record built from user input.
///
/// # Storage format
///
/// ```json
/// {
///   "name": "blog",
///   "url": "https://example.org/publish",
///   "authHeaderName": "Authorization",
///   "authHeaderValue": "Bearer 12345"
/// }
/// ```
///
/// All four fields are optional at the storage layer. Records read back from
/// storage are taken as they are.
///
/// # Security
///
/// The Debug implementation does NOT expose the auth header value.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_header_name: Option<String>,

    /// ⚠️ NEVER log this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_header_value: Option<String>,
}

impl std::fmt::Debug for DestinationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationSettings")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("auth_header_name", &self.auth_header_name)
            .field(
                "auth_header_value",
                &self.auth_header_value.as_ref().map(|_| "<REDACTED>"),
            )
            .finish()
    }
}

impl DestinationSettings {
    /// Create a destination from raw field input
    ///
    /// # Parameters
    ///
    /// - `name`: Unique name shown to the user and used for lookup
    /// - `url`: Absolute URL the document is POSTed to
    /// - `auth_header_name`: Optional header to attach (e.g. "Authorization")
    /// - `auth_header_value`: Optional value for that header
    pub fn new(
        name: Option<&str>,
        url: Option<&str>,
        auth_header_name: Option<&str>,
        auth_header_value: Option<&str>,
    ) -> Self {
        Self {
            name: normalize(name),
            url: normalize(url),
            auth_header_name: normalize(auth_header_name),
            auth_header_value: normalize(auth_header_value),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn auth_header_name(&self) -> Option<&str> {
        self.auth_header_name.as_deref()
    }

    pub fn auth_header_value(&self) -> Option<&str> {
        self.auth_header_value.as_deref()
    }

    /// Header to attach to the request, if any
    ///
    /// A header name without a value is legal and is sent with an empty value.
    pub fn auth_header(&self) -> Option<(&str, &str)> {
        self.auth_header_name()
            .map(|name| (name, self.auth_header_value().unwrap_or("")))
    }

    /// Check that the record is usable
    ///
    /// Checks run in order: name, URL presence, URL syntax, auth header pairing.
    /// The first failing check is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_none() {
            return Err(ValidationError::MissingName);
        }

        let url = self.url.as_deref().ok_or(ValidationError::MissingUrl)?;
        url::Url::parse(url).map_err(|e| ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if self.auth_header_value.is_some() && self.auth_header_name.is_none() {
            return Err(ValidationError::MissingAuthName);
        }

        Ok(())
    }
}

/// Trim, and treat an empty result as absent
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Destination being filled in from a form or command line
///
/// Fields can be set in any order and overwritten freely. Nothing is checked
/// until [`finalize`](Self::finalize).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DestinationDraft {
    name: Option<String>,
    url: Option<String>,
    auth_header_name: Option<String>,
    auth_header_value: Option<String>,
}

impl std::fmt::Debug for DestinationDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationDraft")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("auth_header_name", &self.auth_header_name)
            .field(
                "auth_header_value",
                &self.auth_header_value.as_ref().map(|_| "<REDACTED>"),
            )
            .finish()
    }
}

impl DestinationDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.name = Some(value.into());
        self
    }

    pub fn set_url(&mut self, value: impl Into<String>) -> &mut Self {
        self.url = Some(value.into());
        self
    }

    pub fn set_auth_header_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.auth_header_name = Some(value.into());
        self
    }

    pub fn set_auth_header_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.auth_header_value = Some(value.into());
        self
    }

    /// Builder-style variant of [`set_name`](Self::set_name)
    pub fn with_name(mut self, value: impl Into<String>) -> Self {
        self.set_name(value);
        self
    }

    /// Builder-style variant of [`set_url`](Self::set_url)
    pub fn with_url(mut self, value: impl Into<String>) -> Self {
        self.set_url(value);
        self
    }

    /// Builder-style variant of [`set_auth_header_name`](Self::set_auth_header_name)
    pub fn with_auth_header_name(mut self, value: impl Into<String>) -> Self {
        self.set_auth_header_name(value);
        self
    }

    /// Builder-style variant of [`set_auth_header_value`](Self::set_auth_header_value)
    pub fn with_auth_header_value(mut self, value: impl Into<String>) -> Self {
        self.set_auth_header_value(value);
        self
    }

    /// Reset every field, e.g. after a successful add
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Normalize and validate the captured input
    pub fn finalize(&self) -> Result<DestinationSettings, ValidationError> {
        let settings = DestinationSettings::new(
            self.name.as_deref(),
            self.url.as_deref(),
            self.auth_header_name.as_deref(),
            self.auth_header_value.as_deref(),
        );
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_invalid() {
        let dest = DestinationSettings::new(None, None, None, None);
        assert_eq!(dest.validate(), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_missing_url() {
        let dest = DestinationSettings::new(Some("default"), None, None, None);
        assert_eq!(dest.validate(), Err(ValidationError::MissingUrl));

        let blank = DestinationSettings::new(Some("default"), Some("   "), None, None);
        assert_eq!(blank.validate(), Err(ValidationError::MissingUrl));
    }

    #[test]
    fn test_url_must_be_a_url() {
        let dest = DestinationSettings::new(Some("default"), Some("lala"), None, None);
        assert!(matches!(
            dest.validate(),
            Err(ValidationError::InvalidUrl { ref url, .. }) if url == "lala"
        ));

        let dest = DestinationSettings::new(Some("default"), Some("http://lala"), None, None);
        assert!(dest.validate().is_ok());

        let dest = DestinationSettings::new(Some("default"), Some("https://example.org/pub"), None, None);
        assert!(dest.validate().is_ok());
    }

    #[test]
    fn test_auth_value_requires_auth_name() {
        let dest = DestinationSettings::new(Some("default"), Some("http://lala"), None, Some("something"));
        assert_eq!(dest.validate(), Err(ValidationError::MissingAuthName));

        let dest = DestinationSettings::new(Some("default"), Some("http://lala"), Some("name"), Some("value"));
        assert!(dest.validate().is_ok());
    }

    #[test]
    fn test_auth_name_without_value_is_legal() {
        let dest = DestinationSettings::new(Some("default"), Some("http://lala"), Some("X-Token"), None);
        assert!(dest.validate().is_ok());
        assert_eq!(dest.auth_header(), Some(("X-Token", "")));
    }

    #[test]
    fn test_normalization() {
        let dest = DestinationSettings::new(Some("  default  "), Some(" http://lala\t"), None, None);
        assert_eq!(dest.name(), Some("default"));
        assert_eq!(dest.url(), Some("http://lala"));

        let blank = DestinationSettings::new(Some("   "), None, Some(""), Some(" "));
        assert_eq!(blank.name(), None);
        assert_eq!(blank.auth_header_name(), None);
        assert_eq!(blank.auth_header_value(), None);
    }

    #[test]
    fn test_serde_field_names() {
        let dest = DestinationSettings::new(
            Some("d"),
            Some("http://example.org/pub"),
            Some("Authorization"),
            Some("Bearer xyz"),
        );
        let json = serde_json::to_value(&dest).unwrap();
        assert_eq!(json["authHeaderName"], "Authorization");
        assert_eq!(json["authHeaderValue"], "Bearer xyz");

        let partial: DestinationSettings =
            serde_json::from_str(r#"{"name":"a","url":"http://a"}"#).unwrap();
        assert_eq!(partial.name(), Some("a"));
        assert_eq!(partial.auth_header(), None);
        assert!(!serde_json::to_string(&partial).unwrap().contains("authHeaderName"));
    }

    #[test]
    fn test_auth_value_not_exposed_in_debug() {
        let dest = DestinationSettings::new(
            Some("d"),
            Some("http://lala"),
            Some("Authorization"),
            Some("Bearer secret_token_12345"),
        );
        let debug_str = format!("{:?}", dest);
        assert!(!debug_str.contains("secret_token_12345"));
        assert!(debug_str.contains("<REDACTED>"));

        let draft = DestinationDraft::new().with_auth_header_value("secret_token_12345");
        assert!(!format!("{:?}", draft).contains("secret_token_12345"));
    }

    #[test]
    fn test_draft_finalize() {
        let mut draft = DestinationDraft::new();
        draft.set_name(" blog ").set_url("lala");
        assert!(matches!(draft.finalize(), Err(ValidationError::InvalidUrl { .. })));

        draft.set_url("https://example.org/pub");
        let dest = draft.finalize().unwrap();
        assert_eq!(dest.name(), Some("blog"));
        assert_eq!(dest.url(), Some("https://example.org/pub"));

        draft.clear();
        assert_eq!(draft, DestinationDraft::default());
        assert_eq!(draft.finalize(), Err(ValidationError::MissingName));
    }
}
