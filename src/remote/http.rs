//! HTTP implementation of [`RemoteStore`].
//!
//! Thin JSON client over the persistence collaborator's endpoints. Calls
//! carry a short timeout so gameplay never stalls on a dead network; the
//! public trait methods swallow every error into `None`/`false` and log it.

use super::RemoteStore;
use crate::core::constants::{REMOTE_TIMEOUT_SECS, REMOTE_USER_AGENT};
use crate::score::WaveScoreEntry;
use crate::skills::ProgressionState;
use log::warn;
use std::error::Error;
use std::time::Duration;

pub struct HttpRemoteStore {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpRemoteStore {
    /// `base_url` without a trailing slash, e.g. `https://api.example.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(REMOTE_TIMEOUT_SECS))
            .build();
        HttpRemoteStore {
            base_url: base_url.into(),
            agent,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, Box<dyn Error>> {
        let value: T = self
            .agent
            .get(&self.url(path))
            .set("User-Agent", REMOTE_USER_AGENT)
            .call()?
            .into_json()?;
        Ok(value)
    }

    fn put_json<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<(), Box<dyn Error>> {
        self.agent
            .put(&self.url(path))
            .set("User-Agent", REMOTE_USER_AGENT)
            .send_json(body)?;
        Ok(())
    }

    fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<(), Box<dyn Error>> {
        self.agent
            .post(&self.url(path))
            .set("User-Agent", REMOTE_USER_AGENT)
            .send_json(body)?;
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), Box<dyn Error>> {
        self.agent
            .delete(&self.url(path))
            .set("User-Agent", REMOTE_USER_AGENT)
            .call()?;
        Ok(())
    }
}

impl RemoteStore for HttpRemoteStore {
    fn fetch_progression(&self, device_id: &str) -> Option<ProgressionState> {
        match self.get_json(&format!("progression/{}", device_id)) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("remote progression fetch unavailable: {}", e);
                None
            }
        }
    }

    fn push_progression(&self, device_id: &str, state: &ProgressionState) -> bool {
        match self.put_json(&format!("progression/{}", device_id), state) {
            Ok(()) => true,
            Err(e) => {
                warn!("remote progression push failed: {}", e);
                false
            }
        }
    }

    fn fetch_scores(&self, device_id: &str) -> Option<Vec<WaveScoreEntry>> {
        match self.get_json(&format!("scores/{}", device_id)) {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!("remote score fetch unavailable: {}", e);
                None
            }
        }
    }

    fn push_score(&self, device_id: &str, entry: &WaveScoreEntry) -> bool {
        match self.post_json(&format!("scores/{}", device_id), entry) {
            Ok(()) => true,
            Err(e) => {
                warn!("remote score push failed: {}", e);
                false
            }
        }
    }

    fn reset_scores(&self, device_id: &str) -> bool {
        match self.delete(&format!("scores/{}", device_id)) {
            Ok(()) => true,
            Err(e) => {
                warn!("remote score reset failed: {}", e);
                false
            }
        }
    }
}
