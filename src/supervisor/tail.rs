//! Concurrent tailing of every watched log.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use tokio::task::JoinSet;

use crate::display;
use crate::notifier::Dispatcher;
use crate::trade::{LineKind, TradeParser};
use crate::watcher::{LineSource, TailError, WatchTarget};

/// Error that ended one tail task.
#[derive(thiserror::Error, Debug)]
pub enum SupervisorError {
    /// The log could not be opened or read.
    #[error(transparent)]
    Tail(#[from] TailError),

    /// The task panicked or was aborted.
    #[error("Tail task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A tail that stopped, with the target it was watching when known.
#[derive(Debug)]
pub struct TailFailure {
    /// `None` when the task panicked before reporting back.
    pub target: Option<WatchTarget>,
    pub error: SupervisorError,
}

/// What happened to a single observed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Ignored,
    Unparseable,
    Delivered,
    NotDelivered,
}

/// Shared, read-only state used by every tail task.
#[derive(Debug)]
pub struct TailContext {
    parser: TradeParser,
    dispatcher: Arc<Dispatcher>,
    poll_interval: Duration,
    raw_mode: bool,
}

impl TailContext {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>, poll_interval: Duration) -> Self {
        Self {
            parser: TradeParser::new(),
            dispatcher,
            poll_interval,
            raw_mode: false,
        }
    }

    /// Print lines without truncation.
    #[must_use]
    pub fn with_raw_mode(mut self, raw_mode: bool) -> Self {
        self.raw_mode = raw_mode;
        self
    }

    /// Print, classify and, for offers, dispatch one line.
    ///
    /// Dispatch is awaited here, so a slow channel delays only the tail that
    /// owns this line.
    pub async fn handle_line(&self, label: &str, line: &str) -> LineOutcome {
        display::print_line(label, line, self.raw_mode);

        let offer = match self.parser.classify(line) {
            LineKind::Ignored => return LineOutcome::Ignored,
            LineKind::Unparseable => {
                display::print_unparseable(label, line, self.raw_mode);
                return LineOutcome::Unparseable;
            }
            LineKind::Offer(offer) => offer,
        };

        let message = offer.notification_text();
        tracing::info!(
            label,
            item = %offer.item_name,
            price = %offer.price(),
            "Trade offer found"
        );
        display::print_offer(label, &message);

        match self.dispatcher.dispatch(&message).await {
            Ok(()) => {
                display::print_delivered(label);
                LineOutcome::Delivered
            }
            Err(e) => {
                tracing::warn!(label, error = %e, "Notification not delivered");
                display::print_delivery_failed(label, &e.to_string());
                LineOutcome::NotDelivered
            }
        }
    }
}

/// Owns the watch targets and runs one independent tail per target.
pub struct TailSupervisor {
    targets: Vec<WatchTarget>,
    context: Arc<TailContext>,
}

impl TailSupervisor {
    /// Create a supervisor over `targets` sharing `context`.
    #[must_use]
    pub fn new(targets: Vec<WatchTarget>, context: TailContext) -> Self {
        Self {
            targets,
            context: Arc::new(context),
        }
    }

    #[must_use]
    pub fn targets(&self) -> &[WatchTarget] {
        &self.targets
    }

    /// Run every tail until all of them have stopped.
    ///
    /// A failing tail is reported and does not affect the others. Returns the
    /// failures in the order the tails stopped.
    pub async fn run(self) -> Vec<TailFailure> {
        let mut join_set = JoinSet::new();

        for target in self.targets {
            let context = Arc::clone(&self.context);
            join_set.spawn(async move {
                let result = tail_target(&target, &context).await;
                (target, result)
            });
        }

        tracing::info!(tails = join_set.len(), "Tail supervisor started");

        let mut failures = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            let failure = match joined {
                Ok((target, Ok(()))) => {
                    tracing::info!(label = %target.label, "Tail finished");
                    continue;
                }
                Ok((target, Err(e))) => {
                    tracing::error!(
                        label = %target.label,
                        path = %target.path.display(),
                        error = %e,
                        "Tail stopped"
                    );
                    display::print_tail_failed(&target.label, &e.to_string());
                    TailFailure {
                        target: Some(target),
                        error: e.into(),
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Tail task panicked");
                    display::print_error(&format!("Tail task failed: {e}"));
                    TailFailure {
                        target: None,
                        error: e.into(),
                    }
                }
            };
            failures.push(failure);
            tracing::info!(remaining = join_set.len(), "Tails still running");
        }

        failures
    }
}

async fn tail_target(target: &WatchTarget, context: &TailContext) -> Result<(), TailError> {
    let source = LineSource::open(&target.path, context.poll_interval).await?;

    tracing::info!(label = %target.label, path = %target.path.display(), "Tail started");
    display::print_tail_start(&target.label, &target.path.display().to_string());

    follow_lines(&target.label, source.into_lines(), context).await
}

/// Feed `lines` through `context` until the stream ends or yields an error.
async fn follow_lines<S>(label: &str, lines: S, context: &TailContext) -> Result<(), TailError>
where
    S: Stream<Item = Result<String, TailError>>,
{
    tokio::pin!(lines);

    while let Some(line) = lines.next().await {
        context.handle_line(label, &line?).await;
    }

    Ok(())
}
