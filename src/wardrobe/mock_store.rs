use std::sync::Mutex;

use async_trait::async_trait;

use super::{Clothing, ClothingId, ClothingPatch, WardrobeStore};
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
  Clothes,
  Update(Vec<ClothingId>, ClothingPatch),
  Delete(Vec<ClothingId>),
}

/// In-memory store that records every call and can be told to reject mutations.
#[derive(Debug, Default)]
pub struct MockWardrobeStore {
  clothes: Mutex<Vec<Clothing>>,
  calls: Mutex<Vec<StoreCall>>,
  failure: Option<String>,
}

impl MockWardrobeStore {
  pub fn new(clothes: Vec<Clothing>) -> Self {
    MockWardrobeStore { clothes: Mutex::new(clothes), ..Default::default() }
  }

  pub fn failing(clothes: Vec<Clothing>, message: &str) -> Self {
    MockWardrobeStore { clothes: Mutex::new(clothes), failure: Some(message.to_string()), ..Default::default() }
  }

  pub fn calls(&self) -> Vec<StoreCall> {
    self.calls.lock().unwrap().clone()
  }

  pub fn mutations(&self) -> Vec<StoreCall> {
    self.calls().into_iter().filter(|call| *call != StoreCall::Clothes).collect()
  }

  fn check_failure(&self) -> Result<(), Error> {
    match &self.failure {
      Some(message) => Err(Error::request(Some(500), message.clone())),
      None => Ok(()),
    }
  }
}

#[async_trait]
impl WardrobeStore for MockWardrobeStore {
  async fn clothes(&self) -> Result<Vec<Clothing>, Error> {
    self.calls.lock().unwrap().push(StoreCall::Clothes);
    Ok(self.clothes.lock().unwrap().clone())
  }

  async fn update_clothes(&self, ids: &[ClothingId], patch: &ClothingPatch) -> Result<(), Error> {
    self.calls.lock().unwrap().push(StoreCall::Update(ids.to_vec(), *patch));
    self.check_failure()?;
    let mut clothes = self.clothes.lock().unwrap();
    for clothing in clothes.iter_mut().filter(|clothing| ids.contains(&clothing.id)) {
      if let Some(favorite) = patch.favorite {
        clothing.favorite = favorite;
      }
      if let Some(dirty) = patch.dirty {
        clothing.dirty = dirty;
      }
    }
    Ok(())
  }

  async fn delete_clothes(&self, ids: &[ClothingId]) -> Result<(), Error> {
    self.calls.lock().unwrap().push(StoreCall::Delete(ids.to_vec()));
    self.check_failure()?;
    self.clothes.lock().unwrap().retain(|clothing| !ids.contains(&clothing.id));
    Ok(())
  }
}
