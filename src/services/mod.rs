//! Client services: transport, endpoint catalogue and fetch controllers

pub mod catalog;
pub mod controller;
pub mod transport;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    error::AppResult,
    gate::{NavLink, RoleGate, SessionAction},
    models::Resource,
    pagination::PaginationState,
    session::{AuthSession, SessionSnapshot, TokenSession},
};

use catalog::Endpoint;
use controller::ResourceFetchController;
use transport::{HttpTransport, Transport};

/// Shared pieces every list view is built from
#[derive(Clone)]
pub struct LibraryClient {
    transport: Arc<dyn Transport>,
    session: Arc<dyn AuthSession>,
    gate: RoleGate,
    page_size: u32,
    window_size: usize,
    sign_out_on_unauthorized: bool,
}

impl LibraryClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<dyn AuthSession>, config: &AppConfig) -> Self {
        Self {
            transport,
            session,
            gate: RoleGate::default(),
            page_size: config.pagination.page_size,
            window_size: config.pagination.window_size,
            sign_out_on_unauthorized: config.auth.sign_out_on_unauthorized,
        }
    }

    /// HTTP transport and a token session seeded from configuration
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let transport = HttpTransport::new(&config.api)?;
        tracing::info!("Using library backend at {}", transport.base_url());
        let session = TokenSession::from_token(config.auth.access_token.as_deref());

        Ok(Self::new(Arc::new(transport), Arc::new(session), config))
    }

    pub fn with_gate(mut self, gate: RoleGate) -> Self {
        self.gate = gate;
        self
    }

    /// Controller for one list view
    pub fn controller<T: Resource>(&self, endpoint: Endpoint<T>) -> ResourceFetchController<T> {
        let controller = ResourceFetchController::new(endpoint, self.transport.clone(), self.page_size);
        if self.sign_out_on_unauthorized {
            controller.sign_out_on_unauthorized(self.session.clone())
        } else {
            controller
        }
    }

    pub fn session(&self) -> &dyn AuthSession {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn gate(&self) -> &RoleGate {
        &self.gate
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        self.gate.visible_links(&self.snapshot())
    }

    pub fn session_action(&self) -> SessionAction {
        self.gate.session_action(&self.snapshot())
    }

    /// Page numbers to render under a list
    pub fn page_window(&self, pagination: &PaginationState) -> Vec<u32> {
        pagination.window(self.window_size)
    }
}
