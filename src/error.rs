use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The store answered but rejected the request.
  #[error("{message}")]
  Request { status: Option<u16>, message: String },
  #[error(transparent)]
  Http(#[from] reqwest::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error("invalid store url: {0}")]
  Url(String),
}

impl Error {
  pub fn request(status: Option<u16>, message: impl Into<String>) -> Self {
    Error::Request { status, message: message.into() }
  }

  /// Text shown to the user when the request fails.
  pub fn user_message(&self) -> String {
    match self {
      Error::Request { message, .. } => message.clone(),
      Error::Http(err) if err.is_timeout() => String::from("The wardrobe service did not answer in time"),
      Error::Http(err) if err.is_connect() => String::from("Could not reach the wardrobe service"),
      other => other.to_string(),
    }
  }
}

impl From<url::ParseError> for Error {
  fn from(err: url::ParseError) -> Self {
    Error::Url(err.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_request_error_shows_server_message() {
    let err = Error::request(Some(500), "server error");
    assert_eq!(err.user_message(), "server error");
    assert_eq!(err.to_string(), "server error");
  }

  #[test]
  fn test_url_error_conversion() {
    let err: Error = url::Url::parse("not a url").unwrap_err().into();
    assert!(matches!(err, Error::Url(_)));
    assert!(err.user_message().starts_with("invalid store url"));
  }
}
