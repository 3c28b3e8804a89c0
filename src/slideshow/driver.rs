use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::{
    sync::{broadcast, mpsc, oneshot, Mutex},
    task::JoinHandle,
    time::{self, Duration, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{SlideshowController, SlideshowEvent, SlideshowSnapshot};

// Set to true to log every command the driver applies
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

const EVENT_CAPACITY: usize = 64;

enum SlideshowCommand {
    Advance,
    Retreat,
    Tap { x: f64, screen_width: f64 },
    PressIn,
    PressOut { x: f64, screen_width: f64 },
    SetPaused(bool),
    Snapshot(oneshot::Sender<SlideshowSnapshot>),
    Close,
}

/// A mounted slideshow.
///
/// The controller lives inside a single spawned task, which is the only
/// place its state is touched. Input arrives as commands, changes leave as
/// broadcast events. Unmounting cancels the task, so no countdown can fire
/// against a slideshow that is gone.
#[derive(Clone)]
pub struct SlideshowHandle {
    id: Uuid,
    commands: mpsc::UnboundedSender<SlideshowCommand>,
    events: broadcast::Sender<SlideshowEvent>,
    cancel_token: CancellationToken,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SlideshowHandle {
    /// Spawns the driver task. Must be called inside a tokio runtime.
    pub fn mount(controller: SlideshowController) -> Self {
        let id = controller.id();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let cancel_token = CancellationToken::new();

        let handle = tokio::spawn(drive(
            controller,
            command_rx,
            event_tx.clone(),
            cancel_token.clone(),
        ));

        Self {
            id,
            commands: command_tx,
            events: event_tx,
            cancel_token,
            task: Arc::new(Mutex::new(Some(handle))),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SlideshowEvent> {
        self.events.subscribe()
    }

    pub fn advance(&self) -> Result<()> {
        self.send(SlideshowCommand::Advance)
    }

    pub fn retreat(&self) -> Result<()> {
        self.send(SlideshowCommand::Retreat)
    }

    pub fn handle_tap(&self, x: f64, screen_width: f64) -> Result<()> {
        self.send(SlideshowCommand::Tap { x, screen_width })
    }

    pub fn press_in(&self) -> Result<()> {
        self.send(SlideshowCommand::PressIn)
    }

    pub fn press_out(&self, x: f64, screen_width: f64) -> Result<()> {
        self.send(SlideshowCommand::PressOut { x, screen_width })
    }

    pub fn set_paused(&self, paused: bool) -> Result<()> {
        self.send(SlideshowCommand::SetPaused(paused))
    }

    pub fn close(&self) -> Result<()> {
        self.send(SlideshowCommand::Close)
    }

    pub async fn snapshot(&self) -> Result<SlideshowSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(SlideshowCommand::Snapshot(reply_tx))?;
        reply_rx
            .await
            .map_err(|_| anyhow!("slideshow {} stopped before answering", self.id))
    }

    /// Stops the driver task and waits for it to finish.
    pub async fn unmount(&self) -> Result<()> {
        self.cancel_token.cancel();
        if let Some(handle) = self.task.lock().await.take() {
            handle
                .await
                .with_context(|| format!("slideshow {} driver failed to join", self.id))?;
        }
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        !self.commands.is_closed()
    }

    fn send(&self, command: SlideshowCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("slideshow {} is no longer mounted", self.id))
    }
}

async fn drive(
    mut controller: SlideshowController,
    mut commands: mpsc::UnboundedReceiver<SlideshowCommand>,
    events: broadcast::Sender<SlideshowEvent>,
    cancel_token: CancellationToken,
) {
    let id = controller.id();
    let tick_ms = controller.config().tick_interval_ms;
    let mut ticker = time::interval(Duration::from_millis(tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    log_info!("slideshow {id} driver started");

    loop {
        let deadline = controller.next_deadline(Instant::now());

        tokio::select! {
            biased;

            _ = cancel_token.cancelled() => {
                log_info!("slideshow {id} unmounted");
                break;
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    log_info!("slideshow {id} lost every handle, shutting down");
                    break;
                };
                apply(&mut controller, command, &events);
            }
            _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                publish(&events, controller.tick(Instant::now()));
            }
            _ = ticker.tick(), if tick_ms > 0 => {
                let now = Instant::now();
                publish(&events, controller.tick(now));
                if controller.next_deadline(now).is_some() {
                    let index = controller.current_index();
                    let fraction = controller.progress(now)[index];
                    publish(&events, Some(SlideshowEvent::Progress { index, fraction }));
                }
            }
        }

        if controller.is_closed() {
            break;
        }
    }

    // Leftover commands would otherwise act on a closed slideshow.
    commands.close();
    log_info!("slideshow {id} driver stopped");
}

fn apply(
    controller: &mut SlideshowController,
    command: SlideshowCommand,
    events: &broadcast::Sender<SlideshowEvent>,
) {
    let now = Instant::now();
    match command {
        SlideshowCommand::Advance => publish(events, controller.advance(now)),
        SlideshowCommand::Retreat => publish(events, controller.retreat(now)),
        SlideshowCommand::Tap { x, screen_width } => {
            publish(events, controller.handle_tap(x, screen_width, now))
        }
        SlideshowCommand::PressIn => publish(events, controller.press_in(now)),
        SlideshowCommand::PressOut { x, screen_width } => {
            for event in controller.press_out(x, screen_width, now) {
                publish(events, Some(event));
            }
        }
        SlideshowCommand::SetPaused(paused) => publish(events, controller.set_paused(paused, now)),
        SlideshowCommand::Snapshot(reply) => {
            if reply.send(controller.snapshot(now)).is_err() {
                log_warn!("slideshow {} snapshot requester went away", controller.id());
            }
        }
        SlideshowCommand::Close => publish(events, controller.close()),
    }
}

fn publish(events: &broadcast::Sender<SlideshowEvent>, event: Option<SlideshowEvent>) {
    if let Some(event) = event {
        log_debug!("slideshow event {event:?}");
        // No subscribers is fine; the UI may not be listening yet.
        let _ = events.send(event);
    }
}
