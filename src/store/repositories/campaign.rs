//! Campaign repository

use crate::store::models::Campaign;
use crate::store::Store;

pub struct CampaignRepository {
    store: Store,
}

impl CampaignRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Campaign> {
        self.store.lock().await.campaigns.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Campaign> {
        self.store.lock().await.campaign(id).cloned()
    }
}
