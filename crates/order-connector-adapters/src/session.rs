use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use order_connector_core::{
    ConnectorError, RequestDispatcher, SessionInfo, SessionSnapshot, WalletSession,
};

/// Shared handle to the wallet connection. Clones observe the same session.
#[derive(Clone, Default)]
pub struct WalletSessionManager {
    inner: Arc<Mutex<SessionState>>,
}

#[derive(Default)]
struct SessionState {
    active: Option<ActiveSession>,
    generation: u64,
}

struct ActiveSession {
    info: SessionInfo,
    dispatcher: Option<Arc<dyn RequestDispatcher>>,
}

impl fmt::Debug for WalletSessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topic = self
            .inner
            .lock()
            .ok()
            .and_then(|g| g.active.as_ref().map(|a| a.info.topic.clone()));
        f.debug_struct("WalletSessionManager")
            .field("topic", &topic)
            .finish()
    }
}

impl WalletSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, SessionState>, ConnectorError> {
        self.inner
            .lock()
            .map_err(|e| ConnectorError::Transport(format!("session lock poisoned: {e}")))
    }

    pub fn connect(
        &self,
        info: SessionInfo,
        dispatcher: Arc<dyn RequestDispatcher>,
    ) -> Result<(), ConnectorError> {
        let mut g = self.state()?;
        g.generation = g.generation.saturating_add(1);
        info!(topic = %info.topic, generation = g.generation, "wallet session connected");
        g.active = Some(ActiveSession {
            info,
            dispatcher: Some(dispatcher),
        });
        Ok(())
    }

    /// Swaps the provider behind the active session, as a reconnect or chain switch does.
    pub fn replace_dispatcher(
        &self,
        dispatcher: Option<Arc<dyn RequestDispatcher>>,
    ) -> Result<(), ConnectorError> {
        let mut g = self.state()?;
        let state = &mut *g;
        let active = state.active.as_mut().ok_or_else(|| {
            ConnectorError::ProviderUnavailable("no wallet session to update".to_owned())
        })?;
        state.generation = state.generation.saturating_add(1);
        info!(
            topic = %active.info.topic,
            generation = state.generation,
            has_provider = dispatcher.is_some(),
            "wallet session provider replaced"
        );
        active.dispatcher = dispatcher;
        Ok(())
    }

    pub fn update_info(&self, info: SessionInfo) -> Result<(), ConnectorError> {
        let mut g = self.state()?;
        let active = g.active.as_mut().ok_or_else(|| {
            ConnectorError::ProviderUnavailable("no wallet session to update".to_owned())
        })?;
        active.info = info;
        Ok(())
    }

    pub fn disconnect(&self) -> Result<(), ConnectorError> {
        let mut g = self.state()?;
        if let Some(active) = g.active.take() {
            g.generation = g.generation.saturating_add(1);
            info!(topic = %active.info.topic, "wallet session disconnected");
        }
        Ok(())
    }

    pub fn is_connected(&self) -> Result<bool, ConnectorError> {
        Ok(self.state()?.active.is_some())
    }

    /// Bumped on every connect, provider swap and disconnect.
    pub fn generation(&self) -> Result<u64, ConnectorError> {
        Ok(self.state()?.generation)
    }
}

impl WalletSession for WalletSessionManager {
    fn snapshot(&self) -> Result<Option<SessionSnapshot>, ConnectorError> {
        Ok(self.state()?.active.as_ref().map(|a| SessionSnapshot {
            info: a.info.clone(),
            dispatcher: a.dispatcher.clone(),
        }))
    }

    fn active_session(&self) -> Result<Option<SessionInfo>, ConnectorError> {
        Ok(self.state()?.active.as_ref().map(|a| a.info.clone()))
    }

    fn dispatcher(&self) -> Result<Option<Arc<dyn RequestDispatcher>>, ConnectorError> {
        Ok(self
            .state()?
            .active
            .as_ref()
            .and_then(|a| a.dispatcher.clone()))
    }
}
