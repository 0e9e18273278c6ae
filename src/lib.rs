//! E-Library client
//!
//! Authenticated, paginated access to the library REST backend: book search,
//! reviews, shelf history and staff messages. A [`ResourceFetchController`]
//! drives one list view through its loading/failed/loaded lifecycle, a
//! [`PaginationState`] tracks the page window and a [`RoleGate`] decides which
//! links and actions the current session may see.

pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod pagination;
pub mod services;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult, FetchError, FetchErrorKind};
pub use gate::{Affordance, NavLink, RoleGate, RolePolicy, SessionAction};
pub use models::{FetchResult, Page, Resource, RoleClaim};
pub use pagination::PaginationState;
pub use services::{
    catalog::{Endpoint, Filters},
    controller::{ResourceFetchController, SettleOutcome, ViewState},
    transport::{HttpTransport, ResourceRequest, Transport, TransportResponse},
    LibraryClient,
};
pub use session::{AuthSession, Credential, SessionSnapshot, TokenSession};
