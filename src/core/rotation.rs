//! API-key rotation for providers that enforce per-key quotas.
//!
//! The rotator owns an ordered key pool, the index of the active key and a
//! client bound to it. The active index survives across rows, so a batch keeps
//! using whichever key last worked instead of starting over at the first one.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::ApiKey;
use crate::core::query::SearchQuery;
use crate::core::services::SearchProvider;
use crate::error::{ConfigError, LookupError, Result};

type Connect<C> = Box<dyn Fn(&ApiKey) -> C + Send + Sync>;

#[derive(Error, Debug)]
pub enum RotationError {
    #[error("All {attempts} API keys reported quota exhaustion")]
    AllCredentialsExhausted { attempts: usize },

    #[error(transparent)]
    Provider(LookupError),
}

pub struct CredentialRotator<C> {
    pool: Vec<ApiKey>,
    active: usize,
    client: C,
    connect: Connect<C>,
}

impl<C> CredentialRotator<C> {
    /// Start on the first key of `pool`. `connect` builds a client bound to
    /// one key and is called again on every rotation.
    pub fn new<F>(pool: Vec<ApiKey>, connect: F) -> Result<Self>
    where
        F: Fn(&ApiKey) -> C + Send + Sync + 'static,
    {
        let first = pool.first().ok_or_else(|| ConfigError::MissingCredential {
            name: "API key pool".to_string(),
        })?;
        let client = connect(first);

        Ok(Self {
            pool,
            active: 0,
            client,
            connect: Box::new(connect),
        })
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Advance to `(active + 1) mod N` and rebuild the client for that key.
    pub fn rotate(&mut self) -> usize {
        self.active = (self.active + 1) % self.pool.len();
        self.client = (self.connect)(&self.pool[self.active]);
        info!("Rotating to API key {} of {}", self.active + 1, self.pool.len());
        self.active
    }
}

impl<C: SearchProvider> CredentialRotator<C> {
    /// Run `query`, rotating on quota exhaustion.
    ///
    /// At most one attempt per key in the pool: after N quota failures for the
    /// same query the search gives up with `AllCredentialsExhausted`. Any other
    /// provider error ends the search immediately.
    pub async fn search(&mut self, query: &SearchQuery) -> std::result::Result<Vec<C::Item>, RotationError> {
        let max_attempts = self.pool.len();

        for attempt in 1..=max_attempts {
            match self.client.search(query).await {
                Ok(items) => return Ok(items),
                Err(e) if e.is_quota_exhausted() => {
                    warn!(
                        "Quota exhausted on API key {} of {} (attempt {}/{})",
                        self.active + 1,
                        max_attempts,
                        attempt,
                        max_attempts
                    );
                    self.rotate();
                }
                Err(e) => return Err(RotationError::Provider(e)),
            }
        }

        Err(RotationError::AllCredentialsExhausted { attempts: max_attempts })
    }
}
