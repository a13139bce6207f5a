// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Dispatching of decoded events to registered handlers
//!
//! Handlers with a matching filter are invoked in registration order,
//! followed by all catch-all handlers. A failing or panicking handler
//! does not prevent the remaining handlers from being invoked.

use std::{
    any::Any,
    borrow::Cow,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, PoisonError, RwLock,
    },
};

use thiserror::Error;

use crate::Event;

mod filter;
pub use self::filter::{
    BrowseFilter, ButtonFilter, EventFilter, JogFilter, JogTouchFilter, KnobFilter, PadFilter,
    TabFilter,
};


/// Event handler
///
/// Invoked on the input thread. Handlers should return quickly.
pub type Handler = Arc<dyn Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static>;

/// Receives all handler failures.
pub type ErrorReporter = Arc<dyn Fn(&HandlerFailure) + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("#{_0}")]
pub struct HandlerId(u64);

#[derive(Debug, Error)]
pub enum HandlerFailure {
    #[error("handler {id} failed on {event:?}: {err:#}")]
    Failed {
        id: HandlerId,
        event: Event,
        err: anyhow::Error,
    },
    #[error("handler {id} panicked on {event:?}: {msg}")]
    Panicked {
        id: HandlerId,
        event: Event,
        msg: Cow<'static, str>,
    },
}

impl HandlerFailure {
    #[must_use]
    pub const fn id(&self) -> HandlerId {
        match self {
            Self::Failed { id, .. } | Self::Panicked { id, .. } => *id,
        }
    }
}

/// Outcome of [`EventRouter::dispatch()`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Number of handlers that have been invoked
    pub invoked: usize,
    /// Number of handlers that failed or panicked
    pub failed: usize,
}

impl DispatchSummary {
    #[must_use]
    pub const fn succeeded(&self) -> usize {
        self.invoked - self.failed
    }
}

#[derive(Clone)]
struct Registration {
    id: HandlerId,
    /// `None` for catch-all handlers
    filter: Option<EventFilter>,
    handler: Handler,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl Registration {
    fn invoke(&self, event: &Event) -> Result<(), HandlerFailure> {
        let Self { id, handler, .. } = self;
        match panic::catch_unwind(AssertUnwindSafe(|| handler(event))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(HandlerFailure::Failed {
                id: *id,
                event: *event,
                err,
            }),
            Err(payload) => Err(HandlerFailure::Panicked {
                id: *id,
                event: *event,
                msg: panic_message(payload),
            }),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> Cow<'static, str> {
    match payload.downcast::<&'static str>() {
        Ok(msg) => Cow::Borrowed(*msg),
        Err(payload) => match payload.downcast::<String>() {
            Ok(msg) => Cow::Owned(*msg),
            Err(_) => Cow::Borrowed("<unknown>"),
        },
    }
}

fn report_failure_as_warning(failure: &HandlerFailure) {
    log::warn!("{failure}");
}

/// Registry of event handlers.
///
/// Handlers could be registered and unregistered from any thread
/// while events are dispatched. Each dispatch operates on a snapshot
/// of the registrations that is taken before the first handler is
/// invoked.
pub struct EventRouter {
    registrations: RwLock<Arc<Vec<Registration>>>,
    next_id: AtomicU64,
    error_reporter: ErrorReporter,
}

impl fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRouter")
            .field("registrations", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRouter {
    /// Report handler failures as warnings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_error_reporter(report_failure_as_warning)
    }

    #[must_use]
    pub fn with_error_reporter<R>(error_reporter: R) -> Self
    where
        R: Fn(&HandlerFailure) + Send + Sync + 'static,
    {
        Self {
            registrations: RwLock::default(),
            next_id: AtomicU64::new(1),
            error_reporter: Arc::new(error_reporter),
        }
    }

    fn snapshot(&self) -> Arc<Vec<Registration>> {
        let registrations = self
            .registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&registrations)
    }

    fn modify<T>(&self, modify: impl FnOnce(&mut Vec<Registration>) -> T) -> T {
        let mut registrations = self
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        modify(Arc::make_mut(&mut registrations))
    }

    fn add(&self, filter: Option<EventFilter>, handler: Handler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        log::debug!("Registering handler {id} with filter {filter:?}");
        self.modify(|registrations| {
            registrations.push(Registration {
                id,
                filter,
                handler,
            });
        });
        id
    }

    /// Register a handler for all events that match the filter.
    pub fn register<F>(&self, filter: impl Into<EventFilter>, handler: F) -> HandlerId
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.add(Some(filter.into()), Arc::new(handler))
    }

    /// Register a handler for all events.
    ///
    /// Catch-all handlers are invoked after all handlers with a filter.
    pub fn on_any<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.add(None, Arc::new(handler))
    }

    pub fn on_pad<F>(&self, filter: PadFilter, handler: F) -> HandlerId
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(filter, handler)
    }

    pub fn on_tab<F>(&self, filter: TabFilter, handler: F) -> HandlerId
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(filter, handler)
    }

    pub fn on_button<F>(&self, filter: ButtonFilter, handler: F) -> HandlerId
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(filter, handler)
    }

    pub fn on_knob<F>(&self, filter: KnobFilter, handler: F) -> HandlerId
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(filter, handler)
    }

    pub fn on_jog<F>(&self, filter: JogFilter, handler: F) -> HandlerId
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(filter, handler)
    }

    pub fn on_jog_touch<F>(&self, filter: JogTouchFilter, handler: F) -> HandlerId
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(filter, handler)
    }

    pub fn on_browse<F>(&self, filter: BrowseFilter, handler: F) -> HandlerId
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(filter, handler)
    }

    /// Remove a handler.
    ///
    /// Returns `false` if the handler is unknown, e.g. if it has
    /// already been unregistered.
    pub fn unregister(&self, id: HandlerId) -> bool {
        let removed = self.modify(|registrations| {
            let len_before = registrations.len();
            registrations.retain(|registration| registration.id != id);
            registrations.len() < len_before
        });
        if removed {
            log::debug!("Unregistered handler {id}");
        }
        removed
    }

    /// Remove all handlers.
    pub fn clear(&self) {
        self.modify(Vec::clear);
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Invoke all matching handlers.
    pub fn dispatch(&self, event: &Event) -> DispatchSummary {
        let registrations = self.snapshot();
        let filtered = registrations.iter().filter(|registration| {
            registration
                .filter
                .is_some_and(|filter| filter.matches(event))
        });
        let catch_all = registrations
            .iter()
            .filter(|registration| registration.filter.is_none());
        let mut summary = DispatchSummary::default();
        for registration in filtered.chain(catch_all) {
            summary.invoked += 1;
            if let Err(failure) = registration.invoke(event) {
                summary.failed += 1;
                (self.error_reporter)(&failure);
            }
        }
        summary
    }
}
