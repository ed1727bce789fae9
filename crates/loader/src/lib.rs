//! Idempotent loading of external script/stylesheet dependencies.
//!
//! The loader never touches the document itself; insertion and presence
//! checks go through the injected [`ResourceHost`]. Completion flows back
//! in via [`ResourceLoader::resource_loaded`] / [`resource_failed`], which
//! settle every ticket waiting on that URL.
//!
//! Key properties:
//! - At most one `begin_load` per URL per page lifetime, regardless of how
//!   many concurrent tickets want it.
//! - Failure of any single resource fails the whole ticket with the first
//!   failing URL; no partial success is surfaced.
//! - No retry policy: a failed URL stays failed until a *new*
//!   `ensure_loaded` call asks for it again.

use std::collections::BTreeMap;

use tracing::{debug, warn};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Script,
    Stylesheet,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Resource {
    pub kind: ResourceKind,
    pub url: String,
}

impl Resource {
    pub fn script(url: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::Script,
            url: url.into(),
        }
    }

    pub fn stylesheet(url: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::Stylesheet,
            url: url.into(),
        }
    }
}

/// Stable handle for one `ensure_loaded` call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLoadError {
    pub url: String,
}

impl std::fmt::Display for ResourceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "external resource failed to load: {}", self.url)
    }
}

impl std::error::Error for ResourceLoadError {}

/// Lifecycle of one URL within the page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UrlState {
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketState {
    Pending,
    Ready,
    Failed(ResourceLoadError),
    Cancelled,
}

/// Document-side effects, injected so the loader stays pure and testable.
pub trait ResourceHost {
    /// True if an equivalent resource is already present in the document.
    fn is_present(&self, resource: &Resource) -> bool;
    /// Insert the resource and start loading it. Completion is reported
    /// back through `resource_loaded` / `resource_failed`.
    fn begin_load(&mut self, resource: &Resource);
}

#[derive(Debug)]
struct Ticket {
    /// URLs this ticket waits on, in request order (first failure wins).
    wanted: Vec<String>,
    state: TicketState,
}

#[derive(Debug, Default)]
pub struct ResourceLoader {
    next_ticket: u64,
    urls: BTreeMap<String, UrlState>,
    tickets: BTreeMap<LoadTicket, Ticket>,
}

impl ResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_state(&self, url: &str) -> Option<UrlState> {
        self.urls.get(url).copied()
    }

    pub fn is_loaded(&self, url: &str) -> bool {
        self.url_state(url) == Some(UrlState::Loaded)
    }

    /// Request that every resource in the set be present, returning a
    /// ticket that settles once all of them are.
    ///
    /// Idempotent per URL: resources already loaded or in flight are not
    /// re-inserted; resources that previously failed are retried because
    /// this is a new attempt.
    pub fn ensure_loaded(
        &mut self,
        host: &mut dyn ResourceHost,
        resources: &[Resource],
    ) -> LoadTicket {
        let mut wanted: Vec<String> = Vec::with_capacity(resources.len());
        for resource in resources {
            if !wanted.iter().any(|u| u == &resource.url) {
                wanted.push(resource.url.clone());
            }

            match self.urls.get(&resource.url) {
                Some(UrlState::Loaded) | Some(UrlState::Loading) => {}
                Some(UrlState::Failed) | None => {
                    if host.is_present(resource) {
                        self.urls.insert(resource.url.clone(), UrlState::Loaded);
                    } else {
                        debug!(url = %resource.url, "inserting external resource");
                        self.urls.insert(resource.url.clone(), UrlState::Loading);
                        host.begin_load(resource);
                    }
                }
            }
        }

        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        self.tickets.insert(
            ticket,
            Ticket {
                wanted,
                state: TicketState::Pending,
            },
        );
        self.refresh_ticket(ticket);
        ticket
    }

    pub fn ticket_state(&self, ticket: LoadTicket) -> Option<&TicketState> {
        self.tickets.get(&ticket).map(|t| &t.state)
    }

    /// Cancel a pending ticket. A cancelled ticket never reports Ready;
    /// in-flight URLs remain tracked for other tickets.
    pub fn cancel(&mut self, ticket: LoadTicket) -> bool {
        match self.tickets.get_mut(&ticket) {
            Some(t) if t.state == TicketState::Pending => {
                t.state = TicketState::Cancelled;
                true
            }
            _ => false,
        }
    }

    /// Completion callback from the host: the URL finished loading.
    pub fn resource_loaded(&mut self, url: &str) {
        self.urls.insert(url.to_string(), UrlState::Loaded);
        self.refresh_all();
    }

    /// Completion callback from the host: the URL failed to load.
    pub fn resource_failed(&mut self, url: &str) {
        warn!(url, "external resource failed to load");
        self.urls.insert(url.to_string(), UrlState::Failed);
        self.refresh_all();
    }

    fn refresh_all(&mut self) {
        let tickets: Vec<LoadTicket> = self.tickets.keys().copied().collect();
        for ticket in tickets {
            self.refresh_ticket(ticket);
        }
    }

    fn refresh_ticket(&mut self, ticket: LoadTicket) {
        let Some(t) = self.tickets.get(&ticket) else {
            return;
        };
        if t.state != TicketState::Pending {
            return;
        }

        let failed = t
            .wanted
            .iter()
            .find(|url| self.urls.get(*url).copied() == Some(UrlState::Failed));
        let next = if let Some(url) = failed {
            TicketState::Failed(ResourceLoadError { url: url.clone() })
        } else if t
            .wanted
            .iter()
            .all(|url| self.urls.get(url).copied() == Some(UrlState::Loaded))
        {
            TicketState::Ready
        } else {
            return;
        };

        if let Some(t) = self.tickets.get_mut(&ticket) {
            t.state = next;
        }
    }
}
