//! The generic broadcast hub actor.
//!
//! A [`Hub`] is one long-lived Tokio task owning one [`Widget`]'s state.
//! It consumes exactly one event per cycle -- a mutation command, a
//! subscribe, an unsubscribe, or a base-timer tick -- and pushes the
//! resulting update to every registered subscriber. Nothing outside the
//! hub task ever touches widget state or the subscriber set; callers
//! hold a [`HubHandle`] and communicate purely by message passing.
//!
//! After every successful state change the hub publishes a complete
//! snapshot into a shared [`RwLock`] cell, so read-only HTTP requests
//! can render the current state without queueing behind the worker.
//!
//! # Scheduling
//!
//! A widget declares its base timer period via [`Widget::tick_period`]
//! (`None` disables ticking entirely, as for the pass-through checkbox
//! grid). A widget that returns `true` from [`Widget::idle_pauses_timer`]
//! has its timer disarmed whenever the subscriber set is empty and reset
//! on the subscribe that makes it non-empty again, so no burst of missed
//! ticks is ever delivered.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use liveboard_types::SubscriberId;
use tokio::sync::{RwLock, mpsc, oneshot};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::grid::GridError;
use crate::subscribers::SubscriberSet;

/// Commands queued ahead of the hub worker.
const COMMAND_BUFFER: usize = 32;

/// One widget's state plus its reactions to hub events.
///
/// Methods are synchronous; the async hub loop drives them one event at
/// a time, which is what makes the single-writer invariant hold.
pub trait Widget: Send + 'static {
    /// Mutation command accepted by [`Widget::apply`].
    type Command: Send + fmt::Debug + 'static;
    /// Payload broadcast to subscribers.
    type Update: Clone + Send + fmt::Debug + 'static;
    /// Complete state copy published for snapshot readers.
    type Snapshot: Clone + Send + Sync + 'static;

    /// Short name used in log output.
    const NAME: &'static str;

    /// Base timer period; `None` means this widget never ticks.
    fn tick_period(&self) -> Option<Duration>;

    /// Whether the timer should stop entirely while nobody subscribes.
    fn idle_pauses_timer(&self) -> bool {
        false
    }

    /// Apply one mutation command.
    ///
    /// Returns the update to broadcast, or `None` when the change should
    /// only surface through later ticks (the Game of Life applies edits
    /// silently and lets the next generation carry them).
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] for rejected commands; the hub logs the
    /// rejection and carries on, state unchanged.
    fn apply(&mut self, command: Self::Command) -> Result<Option<Self::Update>, GridError>;

    /// React to one base-timer tick given the current watcher count.
    fn on_tick(&mut self, watchers: usize) -> Option<Self::Update>;

    /// Hook invoked when a new subscriber joins.
    fn on_subscribe(&mut self) {}

    /// Produce a complete copy of the current state.
    fn snapshot(&self) -> Self::Snapshot;
}

/// Errors surfaced to hub clients.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The hub worker is gone; the process is shutting down.
    #[error("hub worker is no longer running")]
    Closed,
}

/// A command submitted to a hub worker.
#[derive(Debug)]
enum HubCommand<W: Widget> {
    /// Apply a widget mutation.
    Mutate(W::Command),
    /// Register a subscriber; the reply carries its subscription.
    Subscribe(oneshot::Sender<Subscription<W>>),
    /// Deregister a subscriber.
    Unsubscribe(SubscriberId),
}

/// Cloneable client handle to one hub worker.
#[derive(Debug)]
pub struct HubHandle<W: Widget> {
    commands: mpsc::Sender<HubCommand<W>>,
    shared: Arc<RwLock<W::Snapshot>>,
}

// Manual impl: deriving Clone would demand W: Clone.
impl<W: Widget> Clone for HubHandle<W> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<W: Widget> HubHandle<W> {
    /// Submit a mutation command.
    ///
    /// Commands from one caller are processed in submission order.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Closed`] if the worker has stopped.
    pub async fn mutate(&self, command: W::Command) -> Result<(), HubError> {
        self.commands
            .send(HubCommand::Mutate(command))
            .await
            .map_err(|_| HubError::Closed)
    }

    /// Register as a subscriber and receive the delivery handle.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Closed`] if the worker has stopped.
    pub async fn subscribe(&self) -> Result<Subscription<W>, HubError> {
        let (reply, receipt) = oneshot::channel();
        self.commands
            .send(HubCommand::Subscribe(reply))
            .await
            .map_err(|_| HubError::Closed)?;
        receipt.await.map_err(|_| HubError::Closed)
    }

    /// Read the most recently published state snapshot.
    ///
    /// This bypasses the worker's command queue entirely; it only
    /// contends with the brief write the worker performs when
    /// publishing a new snapshot.
    pub async fn snapshot(&self) -> W::Snapshot {
        self.shared.read().await.clone()
    }
}

/// A registered subscriber's end of the hub: an ordered stream of
/// updates plus the means to leave.
///
/// Dropping the subscription issues exactly one unsubscribe command;
/// the hub treats a duplicate (for example after it already pruned the
/// channel as stalled) as a silent no-op.
#[derive(Debug)]
pub struct Subscription<W: Widget> {
    id: SubscriberId,
    updates: mpsc::Receiver<W::Update>,
    commands: mpsc::Sender<HubCommand<W>>,
}

impl<W: Widget> Subscription<W> {
    /// This subscriber's identity.
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next update, or `None` once the hub has closed the
    /// delivery channel (unsubscribed or pruned).
    pub async fn next(&mut self) -> Option<W::Update> {
        self.updates.recv().await
    }
}

impl<W: Widget> Drop for Subscription<W> {
    fn drop(&mut self) {
        let _ = self.commands.try_send(HubCommand::Unsubscribe(self.id));
    }
}

/// One event consumed per hub cycle.
enum Event<W: Widget> {
    Command(Option<HubCommand<W>>),
    Tick,
}

/// The hub worker state; owned entirely by its task.
struct Hub<W: Widget> {
    widget: W,
    commands: mpsc::Receiver<HubCommand<W>>,
    commands_tx: mpsc::Sender<HubCommand<W>>,
    subscribers: SubscriberSet<W::Update>,
    shared: Arc<RwLock<W::Snapshot>>,
}

/// Spawn a hub worker for `widget` and return its client handle.
pub fn spawn<W: Widget>(widget: W) -> HubHandle<W> {
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
    let shared = Arc::new(RwLock::new(widget.snapshot()));
    let hub = Hub {
        widget,
        commands: commands_rx,
        commands_tx: commands_tx.clone(),
        subscribers: SubscriberSet::new(),
        shared: Arc::clone(&shared),
    };
    tokio::spawn(hub.run());
    HubHandle {
        commands: commands_tx,
        shared,
    }
}

impl<W: Widget> Hub<W> {
    /// The hub event loop: consume one event per cycle until every
    /// command sender is gone.
    async fn run(mut self) {
        info!(widget = W::NAME, "hub worker started");

        let mut timer = self.widget.tick_period().map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        loop {
            let tick_armed = timer.is_some()
                && !(self.widget.idle_pauses_timer() && self.subscribers.is_empty());

            let event = tokio::select! {
                command = self.commands.recv() => Event::Command(command),
                () = next_tick(timer.as_mut()), if tick_armed => Event::Tick,
            };

            match event {
                Event::Command(Some(command)) => self.handle_command(command, &mut timer).await,
                Event::Command(None) => break,
                Event::Tick => {
                    if let Some(update) = self.widget.on_tick(self.subscribers.len()) {
                        self.publish(Some(update)).await;
                    }
                }
            }
        }

        info!(widget = W::NAME, "hub worker stopped");
    }

    async fn handle_command(&mut self, command: HubCommand<W>, timer: &mut Option<Interval>) {
        match command {
            HubCommand::Mutate(command) => {
                debug!(widget = W::NAME, command = ?command, "mutation received");
                match self.widget.apply(command) {
                    Ok(update) => self.publish(update).await,
                    Err(error) => {
                        warn!(widget = W::NAME, %error, "mutation rejected, state unchanged");
                    }
                }
            }
            HubCommand::Subscribe(reply) => {
                let resuming = self.subscribers.is_empty() && self.widget.idle_pauses_timer();
                let (id, updates) = self.subscribers.add();
                self.widget.on_subscribe();
                if resuming {
                    if let Some(interval) = timer.as_mut() {
                        interval.reset();
                    }
                }
                debug!(
                    widget = W::NAME,
                    subscriber = %id,
                    watchers = self.subscribers.len(),
                    "subscriber joined"
                );
                let subscription = Subscription {
                    id,
                    updates,
                    commands: self.commands_tx.clone(),
                };
                if reply.send(subscription).is_err() {
                    // Requester vanished before receiving its handle.
                    self.subscribers.remove(id);
                }
            }
            HubCommand::Unsubscribe(id) => {
                if self.subscribers.remove(id) {
                    debug!(
                        widget = W::NAME,
                        subscriber = %id,
                        watchers = self.subscribers.len(),
                        "subscriber left"
                    );
                }
            }
        }
    }

    /// Publish the post-change snapshot, then broadcast `update` if any.
    async fn publish(&mut self, update: Option<W::Update>) {
        *self.shared.write().await = self.widget.snapshot();
        if let Some(update) = update {
            let delivered = self.subscribers.broadcast(&update);
            debug!(widget = W::NAME, delivered, "update broadcast");
        }
    }
}

/// Await the next tick of an optional timer; pends forever when absent.
async fn next_tick(timer: Option<&mut Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
