use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{error, info};
use url::Url;

use crate::{
  error::Error,
  wardrobe::types::{Clothing, ClothingId, ClothingPatch, WardrobeStore},
};

const CLOTHING_PATH: &str = "clothing";

/// Error body returned by the wardrobe service.
#[derive(Debug, Deserialize)]
struct ProblemBody {
  msg: Option<String>,
}

/// Talks to the wardrobe REST service.
pub struct HttpWardrobeStore {
  client: Client,
  base_url: Url,
}

impl HttpWardrobeStore {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
    let base_url = Url::parse(base_url)?;
    if base_url.cannot_be_a_base() {
      return Err(Error::Url(format!("{base_url} cannot be used as a base url")));
    }
    let client = Client::builder().timeout(timeout).build()?;
    Ok(HttpWardrobeStore { client, base_url })
  }

  fn clothing_url(&self, ids: Option<&[ClothingId]>) -> Result<Url, Error> {
    let mut url = self.base_url.clone();
    {
      let mut segments = url.path_segments_mut().map_err(|()| Error::Url(self.base_url.to_string()))?;
      segments.pop_if_empty().push(CLOTHING_PATH);
      if let Some(ids) = ids {
        segments.push(&ids.join(","));
      }
    }
    Ok(url)
  }
}

/// Turn a non-success response into a request error carrying the server's message.
async fn classify_failure(response: Response) -> Error {
  let status = response.status();
  let bytes = response.bytes().await.unwrap_or_default();
  let body_text = String::from_utf8_lossy(&bytes).trim().to_string();
  let message = serde_json::from_slice::<ProblemBody>(&bytes)
    .ok()
    .and_then(|problem| problem.msg)
    .filter(|msg| !msg.is_empty())
    .unwrap_or_else(|| if body_text.is_empty() { fallback_message(status) } else { body_text });
  error!("Wardrobe service rejected request with status {}: {}", status, message);
  Error::request(Some(status.as_u16()), message)
}

fn fallback_message(status: StatusCode) -> String {
  format!("request failed with status {}", status.as_u16())
}

#[async_trait]
impl WardrobeStore for HttpWardrobeStore {
  async fn clothes(&self) -> Result<Vec<Clothing>, Error> {
    let url = self.clothing_url(None)?;
    info!("GET {}", url);
    let response = self.client.get(url).send().await?;
    if !response.status().is_success() {
      return Err(classify_failure(response).await);
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
  }

  async fn update_clothes(&self, ids: &[ClothingId], patch: &ClothingPatch) -> Result<(), Error> {
    let url = self.clothing_url(Some(ids))?;
    info!("PUT {} {:?}", url, patch);
    let response = self.client.put(url).json(patch).send().await?;
    if !response.status().is_success() {
      return Err(classify_failure(response).await);
    }
    Ok(())
  }

  async fn delete_clothes(&self, ids: &[ClothingId]) -> Result<(), Error> {
    let url = self.clothing_url(Some(ids))?;
    info!("DELETE {}", url);
    let response = self.client.delete(url).send().await?;
    if !response.status().is_success() {
      return Err(classify_failure(response).await);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use httpmock::prelude::*;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  fn store_for(server: &MockServer) -> HttpWardrobeStore {
    HttpWardrobeStore::new(&server.base_url(), Duration::from_secs(2)).unwrap()
  }

  fn ids(values: &[&str]) -> Vec<ClothingId> {
    values.iter().map(|value| value.to_string()).collect()
  }

  #[test]
  fn test_clothing_url_joins_ids() {
    let store = HttpWardrobeStore::new("http://localhost:3000/api/", Duration::from_secs(1)).unwrap();

    assert_eq!(store.clothing_url(None).unwrap().as_str(), "http://localhost:3000/api/clothing");
    assert_eq!(
      store.clothing_url(Some(&ids(&["a", "b", "c"]))).unwrap().as_str(),
      "http://localhost:3000/api/clothing/a,b,c"
    );
  }

  #[test]
  fn test_rejects_non_base_url() {
    assert!(matches!(HttpWardrobeStore::new("mailto:me@example.com", Duration::from_secs(1)), Err(Error::Url(_))));
    assert!(matches!(HttpWardrobeStore::new("nope", Duration::from_secs(1)), Err(Error::Url(_))));
  }

  #[tokio::test]
  async fn test_fetch_clothes() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
      when.method(GET).path("/clothing");
      then.status(200).json_body(json!([
        { "_id": "a", "fav": true, "type": "top", "kind": "shirt" },
        { "_id": "b", "dirty": true, "type": "bottom", "kind": "pants" }
      ]));
    });

    let clothes = store_for(&server).clothes().await.unwrap();

    mock.assert();
    assert_eq!(clothes.len(), 2);
    assert_eq!(clothes[0], Clothing::new("a", "top", "shirt").favorite(true));
    assert_eq!(clothes[1], Clothing::new("b", "bottom", "pants").dirty(true));
  }

  #[tokio::test]
  async fn test_update_sends_single_request_for_all_ids() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
      when.method(PUT).path("/clothing/a,b,c").json_body(json!({ "dirty": true }));
      then.status(200).json_body(json!({ "msg": "ok" }));
    });

    let result = store_for(&server).update_clothes(&ids(&["a", "b", "c"]), &ClothingPatch::dirty(true)).await;

    assert!(result.is_ok());
    mock.assert();
  }

  #[tokio::test]
  async fn test_delete_failure_carries_server_message() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
      when.method(DELETE).path("/clothing/a");
      then.status(500).json_body(json!({ "msg": "server error" }));
    });

    let err = store_for(&server).delete_clothes(&ids(&["a"])).await.unwrap_err();

    mock.assert();
    assert!(matches!(err, Error::Request { status: Some(500), .. }));
    assert_eq!(err.user_message(), "server error");
  }

  #[tokio::test]
  async fn test_failure_without_body_uses_status() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
      when.method(PUT).path("/clothing/a");
      then.status(404);
    });

    let err = store_for(&server).update_clothes(&ids(&["a"]), &ClothingPatch::favorite(true)).await.unwrap_err();

    assert_eq!(err.user_message(), "request failed with status 404");
  }
}
