//! ---
//! pw_section: "06-terminal-dashboard"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Polling controller: refresh loops, commands, shutdown."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! Owns the background polling tasks for one view. The clock loop ticks
//! every second, the data loop every five, the chart loop (plant view only)
//! every thirty; all results come back over one event channel. Commands flow
//! the other way: manual refresh and the delayed full rebuild a topology
//! change demands.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};
use tracing::{debug, error, warn};

use plantwatch_client::{ApiClient, ClientError};
use plantwatch_common::config::RefreshConfig;
use plantwatch_model::{FieldIssue, FleetSnapshot, PlantSnapshot, PowerHistory};

/// Which dashboard the controller is polling for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Fleet,
    Plant(u32),
}

/// Everything the UI loop can receive from the background tasks.
#[derive(Debug)]
pub enum PollEvent {
    /// Header clock cadence.
    ClockTick,
    Fleet(Result<(FleetSnapshot, Vec<FieldIssue>), ClientError>),
    Plant(Result<(PlantSnapshot, Vec<FieldIssue>), ClientError>),
    Chart(Result<(PowerHistory, Vec<FieldIssue>), ClientError>),
    /// The reload delay has elapsed; the view must discard its state before
    /// the refetch events that follow.
    Rebuilt,
}

/// Requests from the UI loop into the polling tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch the data endpoint now, outside the regular cadence.
    RefreshData,
    /// Fetch the chart endpoint now (plant view).
    RefreshChart,
    /// Wait out the reload delay, then emit [`PollEvent::Rebuilt`] and
    /// refetch everything.
    ScheduleReload,
}

/// Lenient plant-id parse for free-form selectors: anything unparsable
/// falls back to plant 1 rather than failing navigation.
pub fn lenient_plant_id(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(id) => id,
        Err(_) => {
            error!(raw, "invalid plant id, falling back to plant 1");
            1
        }
    }
}

/// Cloneable handle for sending commands while the event side is borrowed.
#[derive(Clone)]
pub struct CommandSender(mpsc::Sender<Command>);

impl CommandSender {
    pub async fn send(&self, command: Command) {
        if self.0.send(command).await.is_err() {
            warn!(?command, "poll task gone, command dropped");
        }
    }
}

/// Handle over the running poll tasks for one view.
pub struct DashboardController {
    events: mpsc::Receiver<PollEvent>,
    commands: mpsc::Sender<Command>,
    shutdown: broadcast::Sender<()>,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardController {
    /// Spawn the poll loops for `mode`. The first data fetch fires
    /// immediately; the chart loop only exists for plant views.
    pub fn start(client: ApiClient, refresh: RefreshConfig, mode: ViewMode) -> Self {
        let (event_tx, events) = mpsc::channel(32);
        let (commands, command_rx) = mpsc::channel(8);
        let (shutdown, _) = broadcast::channel(4);

        let clock_task = spawn_clock_task(
            refresh.clock_interval,
            event_tx.clone(),
            shutdown.subscribe(),
        );
        let poll_task = spawn_poll_task(
            client,
            refresh,
            mode,
            event_tx,
            command_rx,
            shutdown.subscribe(),
        );

        Self {
            events,
            commands,
            shutdown,
            tasks: vec![clock_task, poll_task],
        }
    }

    /// Receive the next poll event; `None` once the tasks are gone.
    pub async fn next_event(&mut self) -> Option<PollEvent> {
        self.events.recv().await
    }

    /// Send a command to the poll loop.
    pub async fn send(&self, command: Command) {
        self.commander().send(command).await;
    }

    /// Detach a command handle usable while `next_event` is pending.
    pub fn commander(&self) -> CommandSender {
        CommandSender(self.commands.clone())
    }

    /// Stop all tasks and wait for them to exit.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        for task in self.tasks {
            if let Err(err) = task.await {
                warn!(error = %err, "poll task join error");
            }
        }
    }
}

fn spawn_clock_task(
    cadence: std::time::Duration,
    events: mpsc::Sender<PollEvent>,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(cadence);
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    if events.send(PollEvent::ClockTick).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

fn spawn_poll_task(
    client: ApiClient,
    refresh: RefreshConfig,
    mode: ViewMode,
    events: mpsc::Sender<PollEvent>,
    mut commands: mpsc::Receiver<Command>,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut data_tick = interval(refresh.data_interval);
        let mut chart_tick = interval(refresh.chart_interval);
        let is_plant = matches!(mode, ViewMode::Plant(_));
        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    debug!(?mode, "poll shutdown received");
                    break;
                }
                _ = data_tick.tick() => {
                    if send_data(&client, mode, &events).await.is_err() {
                        break;
                    }
                }
                _ = chart_tick.tick(), if is_plant => {
                    if send_chart(&client, mode, &events).await.is_err() {
                        break;
                    }
                }
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    let sent = match command {
                        Command::RefreshData => send_data(&client, mode, &events).await,
                        Command::RefreshChart => send_chart(&client, mode, &events).await,
                        Command::ScheduleReload => {
                            // The countdown runs off-loop; commands keep
                            // being serviced while the rebuild is pending.
                            let events = events.clone();
                            let client = client.clone();
                            let delay = refresh.reload_delay;
                            tokio::spawn(async move {
                                sleep(delay).await;
                                if events.send(PollEvent::Rebuilt).await.is_err() {
                                    return;
                                }
                                if send_data(&client, mode, &events).await.is_ok() && is_plant {
                                    let _ = send_chart(&client, mode, &events).await;
                                }
                            });
                            Ok(())
                        }
                    };
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

async fn send_data(
    client: &ApiClient,
    mode: ViewMode,
    events: &mpsc::Sender<PollEvent>,
) -> Result<(), ()> {
    let event = match mode {
        ViewMode::Fleet => PollEvent::Fleet(client.fleet_live().await),
        ViewMode::Plant(plant_id) => PollEvent::Plant(client.plant_details(plant_id).await),
    };
    events.send(event).await.map_err(|_| ())
}

async fn send_chart(
    client: &ApiClient,
    mode: ViewMode,
    events: &mpsc::Sender<PollEvent>,
) -> Result<(), ()> {
    let ViewMode::Plant(plant_id) = mode else {
        return Ok(());
    };
    events
        .send(PollEvent::Chart(client.plant_history(plant_id).await))
        .await
        .map_err(|_| ())
}
