use std::sync::RwLock;

use async_trait::async_trait;

use roofline_core::QuoteId;
use roofline_quotes::QuoteLead;

use super::{QuoteStore, QuoteStoreError};

#[derive(Debug, Default)]
pub struct InMemoryQuoteStore {
    leads: RwLock<Vec<QuoteLead>>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.leads.read().map(|leads| leads.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> QuoteStoreError {
    QuoteStoreError::Unavailable("in-memory quote store lock poisoned".to_string())
}

#[async_trait]
impl QuoteStore for InMemoryQuoteStore {
    async fn append(&self, lead: &QuoteLead) -> Result<(), QuoteStoreError> {
        let mut leads = self.leads.write().map_err(|_| poisoned())?;

        if leads.iter().any(|l| l.id == lead.id) {
            return Err(QuoteStoreError::Duplicate(lead.id));
        }
        leads.push(lead.clone());

        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<QuoteLead>, QuoteStoreError> {
        let leads = self.leads.read().map_err(|_| poisoned())?;

        let mut newest: Vec<QuoteLead> = leads.clone();
        // Ties on created_at keep insertion order reversed.
        newest.reverse();
        newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        newest.truncate(limit);

        Ok(newest)
    }

    async fn get(&self, id: &QuoteId) -> Result<Option<QuoteLead>, QuoteStoreError> {
        let leads = self.leads.read().map_err(|_| poisoned())?;
        Ok(leads.iter().find(|l| &l.id == id).cloned())
    }
}
