//! Request/response cycles against one paginated endpoint
//!
//! Each call to [`ResourceFetchController::request_page`] starts a cycle tagged
//! with a new generation number. Loading is published before the call returns;
//! when the transport settles, the outcome is published only if no newer cycle
//! has started since. Older outcomes are dropped on arrival, the transport call
//! itself is never aborted.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::{wrappers::WatchStream, Stream};

use crate::{
    error::FetchError,
    models::{envelope::parse_page, FetchResult, Page, Resource},
    pagination::PaginationState,
    services::{
        catalog::{Endpoint, Filters},
        transport::{body_preview, ResourceRequest, Transport},
    },
    session::{AuthSession, Credential},
};

/// What observers of a controller see.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub result: FetchResult<T>,
    pub pagination: PaginationState,
    generation: u64,
}

impl<T> ViewState<T> {
    /// Number of cycles started so far
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Whether a finished cycle got to publish its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Published,
    /// A newer cycle started first; the outcome was discarded
    Superseded,
}

pub struct ResourceFetchController<T: Resource> {
    endpoint: Endpoint<T>,
    transport: Arc<dyn Transport>,
    state: watch::Sender<ViewState<T>>,
    sign_out_on_unauthorized: Option<Arc<dyn AuthSession>>,
}

impl<T: Resource> ResourceFetchController<T> {
    pub fn new(endpoint: Endpoint<T>, transport: Arc<dyn Transport>, page_size: u32) -> Self {
        let (state, _) = watch::channel(ViewState {
            result: FetchResult::Loading,
            pagination: PaginationState::new(page_size),
            generation: 0,
        });

        Self {
            endpoint,
            transport,
            state,
            sign_out_on_unauthorized: None,
        }
    }

    /// Sign `session` out whenever a published cycle fails as unauthorized.
    pub fn sign_out_on_unauthorized(mut self, session: Arc<dyn AuthSession>) -> Self {
        self.sign_out_on_unauthorized = Some(session);
        self
    }

    pub fn endpoint(&self) -> &Endpoint<T> {
        &self.endpoint
    }

    pub fn current_result(&self) -> FetchResult<T> {
        self.state.borrow().result.clone()
    }

    pub fn pagination(&self) -> PaginationState {
        self.state.borrow().pagination
    }

    pub fn view_state(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.subscribe()
    }

    /// Current state followed by every later transition
    pub fn updates(&self) -> impl Stream<Item = ViewState<T>> {
        WatchStream::new(self.state.subscribe())
    }

    /// Start a cycle for `page_index`.
    ///
    /// Loading is published before this returns. When the endpoint needs a
    /// credential and `auth` is missing or expired, the cycle is settled as
    /// [`FetchError::Unauthenticated`] right here and the returned future is
    /// already complete; no request is made.
    pub fn request_page(
        &self,
        page_index: u32,
        filters: &Filters,
        auth: Option<&Credential>,
    ) -> impl Future<Output = SettleOutcome> + Send + '_ {
        let mut generation = 0;
        let mut page_size = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.result = FetchResult::Loading;
            generation = state.generation;
            page_size = state.pagination.page_size();
        });

        let cycle = match self.prepare(page_index, page_size, filters, auth) {
            Ok(request) => Ok(request),
            Err(error) => Err(self.settle(generation, Err(error))),
        };

        async move {
            match cycle {
                Ok(request) => {
                    let result = self.fetch(request, page_index, page_size).await;
                    self.settle(generation, result)
                }
                Err(outcome) => outcome,
            }
        }
    }

    /// Clamp `target` to the known pages, then request it.
    pub fn advance_to(
        &self,
        target: i64,
        filters: &Filters,
        auth: Option<&Credential>,
    ) -> impl Future<Output = SettleOutcome> + Send + '_ {
        let page_index = self.pagination().advance_to(target).page_index();
        self.request_page(page_index, filters, auth)
    }

    /// Request a page with whatever credential `session` holds right now.
    pub fn request_page_as(
        &self,
        page_index: u32,
        filters: &Filters,
        session: &dyn AuthSession,
    ) -> impl Future<Output = SettleOutcome> + Send + '_ {
        let snapshot = session.snapshot();
        let auth = snapshot.token.as_ref().filter(|_| snapshot.is_authenticated);
        self.request_page(page_index, filters, auth)
    }

    fn prepare(
        &self,
        page_index: u32,
        page_size: u32,
        filters: &Filters,
        auth: Option<&Credential>,
    ) -> Result<ResourceRequest, FetchError> {
        let bearer = match auth {
            Some(credential) if credential.is_valid() => Some(credential.clone()),
            Some(credential) => {
                tracing::debug!(
                    "Ignoring expired credential {} for {}",
                    credential.fingerprint(),
                    self.endpoint.path()
                );
                None
            }
            None => None,
        };

        if self.endpoint.requires_auth() && bearer.is_none() {
            return Err(FetchError::Unauthenticated);
        }

        Ok(ResourceRequest {
            path: self.endpoint.path().to_string(),
            query: self.endpoint.query(page_index, page_size, filters),
            bearer,
        })
    }

    async fn fetch(
        &self,
        request: ResourceRequest,
        page_index: u32,
        page_size: u32,
    ) -> Result<Page<T>, FetchError> {
        let response = self.transport.get(request).await?;

        if !response.is_success() {
            tracing::warn!(
                "{} answered status {}: {}",
                self.endpoint.path(),
                response.status,
                body_preview(&response.body)
            );
            return Err(FetchError::from_status(response.status));
        }

        parse_page::<T>(&response.body, page_index, page_size)
    }

    fn settle(&self, generation: u64, result: Result<Page<T>, FetchError>) -> SettleOutcome {
        let failed = result.is_err();
        let unauthorized = matches!(result, Err(FetchError::Unauthorized(_)));
        let summary = match &result {
            Ok(page) => format!(
                "page {}/{} with {} {}",
                page.page_index() + 1,
                page.total_pages(),
                page.len(),
                T::COLLECTION
            ),
            Err(error) => error.to_string(),
        };

        let published = self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            if let Ok(page) = &result {
                state.pagination = state
                    .pagination
                    .with_totals(page.total_pages())
                    .advance_to(i64::from(page.page_index()));
            }
            state.result = result.into();
            true
        });

        if !published {
            tracing::debug!(
                "Discarding superseded cycle {} for {}: {}",
                generation,
                self.endpoint.path(),
                summary
            );
            return SettleOutcome::Superseded;
        }

        if !failed {
            tracing::info!("{}: {}", self.endpoint.path(), summary);
        } else {
            tracing::warn!("{}: {}", self.endpoint.path(), summary);
        }
        if unauthorized {
            if let Some(session) = &self.sign_out_on_unauthorized {
                session.sign_out();
            }
        }

        SettleOutcome::Published
    }
}
