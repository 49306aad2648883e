use client_core::SearchBackend;
use shared::{domain::ServiceRef, protocol::SearchRequest};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::{
    context::{AppContext, Region},
    render::{show_search_error, show_search_result},
};

pub const TITLE_HTML: &str = "<em>Arabidopsis thaliana</em> small RNA - Phased Loci ";
pub const PROVENANCE_HTML: &str = r#"<p>Visit <a href="http://www.meyerslab.org/data/">Meyers Lab Data</a> for more information!</p>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Uninitialized,
    SkeletonRendered,
    AwaitingResponse,
    ResultsRendered,
    ErrorLogged,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("ready handler already ran for this page (state {0:?})")]
    AlreadyInitialized(PageState),
}

/// Host-ready handler for one page lifetime.
pub struct PageInitializer {
    service: ServiceRef,
    state: PageState,
}

impl Default for PageInitializer {
    fn default() -> Self {
        Self::new(ServiceRef::default())
    }
}

impl PageInitializer {
    pub fn new(service: ServiceRef) -> Self {
        Self {
            service,
            state: PageState::Uninitialized,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn service(&self) -> &ServiceRef {
        &self.service
    }

    /// Renders the skeleton and performs the page's single search. Any call
    /// after the first is rejected without touching the page or the backend.
    pub async fn on_ready(
        &mut self,
        ctx: &mut AppContext,
        backend: &dyn SearchBackend,
    ) -> Result<PageState, PageError> {
        if self.state != PageState::Uninitialized {
            return Err(PageError::AlreadyInitialized(self.state));
        }

        ctx.render_skeleton(TITLE_HTML);
        ctx.add_class(Region::ProvenanceInfo, "text-center");
        ctx.append_html(Region::ProvenanceInfo, PROVENANCE_HTML);
        self.state = PageState::SkeletonRendered;
        debug!(state = ?self.state, app = ctx.app_name(), "skeleton rendered");

        let request = SearchRequest::for_service(&self.service);
        self.state = PageState::AwaitingResponse;
        debug!(state = ?self.state, service = %self.service, "search issued");

        self.state = match backend.search(&request).await {
            Ok(response) => {
                if show_search_result(ctx, &response) {
                    PageState::ResultsRendered
                } else {
                    PageState::ErrorLogged
                }
            }
            Err(err) => {
                show_search_error(&err);
                PageState::ErrorLogged
            }
        };
        Ok(self.state)
    }

    /// Waits for the host's ready signal, then runs the handler. If the host
    /// drops the signal without firing it the page stays uninitialized.
    pub async fn run(
        mut self,
        ready: oneshot::Receiver<()>,
        ctx: &mut AppContext,
        backend: &dyn SearchBackend,
    ) -> Result<PageState, PageError> {
        if ready.await.is_err() {
            info!("host ready signal dropped before firing");
            return Ok(self.state);
        }
        self.on_ready(ctx, backend).await
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
