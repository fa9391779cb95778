use super::{
    flight_model::{FlightModel, SimulatorState},
    sim_config::{MIN_SPEED_MULTIPLIER, SimConfig, clamp_speed_multiplier},
    telemetry::TelemetrySample,
};
use crate::{info, log, warn};
use rand::rngs::StdRng;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{Mutex, mpsc, watch},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_util::sync::CancellationToken;

/// Single subscriber of the telemetry stream.
///
/// Frames are pushed synchronously, one per tick, in mission time order. Any
/// `FnMut(TelemetrySample)` closure is a sink.
pub trait TelemetrySink: Send + 'static {
    fn on_telemetry(&mut self, sample: TelemetrySample);
}

impl<F> TelemetrySink for F
where
    F: FnMut(TelemetrySample) + Send + 'static,
{
    fn on_telemetry(&mut self, sample: TelemetrySample) { self(sample) }
}

/// Creates a sink that forwards frames into an unbounded channel.
///
/// The receiver yields `None` once the mission has landed or was stopped.
pub fn channel_sink() -> (impl TelemetrySink, mpsc::UnboundedReceiver<TelemetrySample>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink = move |sample: TelemetrySample| {
        if tx.send(sample).is_err() {
            warn!("Telemetry receiver dropped, discarding frame at T+{:.1}s", sample.mission_time());
        }
    };
    (sink, rx)
}

struct TickTask {
    c_tok: CancellationToken,
    handle: JoinHandle<()>,
}

impl TickTask {
    fn is_alive(&self) -> bool { !self.c_tok.is_cancelled() && !self.handle.is_finished() }
}

/// Timer driven flight simulator.
///
/// Owns the flight model and the tick task. Ticks run at `config.tick_interval` of
/// wall time, the speed multiplier only scales the simulated time per tick.
pub struct FlightSimulator {
    config: SimConfig,
    model: Arc<Mutex<FlightModel<StdRng>>>,
    speed_tx: watch::Sender<f64>,
    tick_task: Option<TickTask>,
}

impl FlightSimulator {
    /// Creates a new simulator in `PRELAUNCH`. Nothing runs until [`FlightSimulator::start`].
    pub fn new(config: SimConfig) -> Self {
        let model = Arc::new(Mutex::new(FlightModel::from_config(config.clone())));
        let (speed_tx, _) = watch::channel(MIN_SPEED_MULTIPLIER);
        Self {
            config,
            model,
            speed_tx,
            tick_task: None,
        }
    }

    pub fn config(&self) -> &SimConfig { &self.config }

    /// The multiplier the next tick will use.
    pub fn speed_multiplier(&self) -> f64 { *self.speed_tx.borrow() }

    /// Clamps `value` to `[1, 20]` and applies it from the next tick on.
    pub fn set_speed_multiplier(&self, value: f64) {
        match clamp_speed_multiplier(value) {
            Some(clamped) => {
                self.speed_tx.send_replace(clamped);
            }
            None => warn!("Ignoring non-finite speed multiplier {value}"),
        }
    }

    /// Indicates whether the tick task is alive.
    pub fn is_running(&self) -> bool { self.tick_task.as_ref().is_some_and(TickTask::is_alive) }

    /// Returns a copy of the current simulator state.
    pub async fn snapshot(&self) -> SimulatorState { *self.model.lock().await.state() }

    /// Starts a mission from scratch and pushes one frame per tick to `sink`.
    ///
    /// A mission already in flight is cancelled and its progress discarded. Must be
    /// called from within a Tokio runtime.
    pub fn start(&mut self, sink: impl TelemetrySink) {
        if let Some(task) = self.tick_task.take() {
            if task.is_alive() {
                log!("Mission restarted, discarding the running flight");
            }
            task.c_tok.cancel();
        }

        let mut model = FlightModel::from_config(self.config.clone());
        model.set_speed_multiplier(self.speed_multiplier());
        model.launch();
        self.model = Arc::new(Mutex::new(model));

        let c_tok = CancellationToken::new();
        let handle = tokio::spawn(Self::run(
            Arc::clone(&self.model),
            self.speed_tx.subscribe(),
            c_tok.clone(),
            self.config.tick_interval,
            sink,
        ));
        self.tick_task = Some(TickTask { c_tok, handle });
        info!(
            "Mission started at {} with speed multiplier {}",
            self.config.launch_site,
            self.speed_multiplier()
        );
    }

    /// Cancels the tick task. Safe to call when nothing is running.
    ///
    /// A tick that is already being computed still emits its frame.
    pub fn stop(&mut self) {
        if let Some(task) = self.tick_task.take() {
            if task.is_alive() {
                info!("Mission stopped");
            }
            task.c_tok.cancel();
        }
    }

    async fn run(
        model: Arc<Mutex<FlightModel<StdRng>>>,
        speed_rx: watch::Receiver<f64>,
        c_tok: CancellationToken,
        period: Duration,
        mut sink: impl TelemetrySink,
    ) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                () = c_tok.cancelled() => {
                    model.lock().await.halt();
                    break;
                }
                _ = ticker.tick() => {
                    let next = {
                        let mut model_lock = model.lock().await;
                        model_lock.set_speed_multiplier(*speed_rx.borrow());
                        model_lock.tick()
                    };
                    let Some(sample) = next else { break };
                    sink.on_telemetry(sample);
                    if sample.phase().is_terminal() {
                        info!(
                            "Landed at {} after {}",
                            sample.position(),
                            sample.mission_elapsed_label()
                        );
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for FlightSimulator {
    fn drop(&mut self) {
        if let Some(task) = &self.tick_task {
            task.c_tok.cancel();
        }
    }
}
