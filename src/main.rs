use hab_mission_sim::{
    common::GeoPoint,
    dispersion::{CepMode, LandingForecast},
    error, event, forecast,
    flight_sim::{FlightSimulator, SimConfig, TelemetrySample, channel_sink},
    info, log,
    mission_control::{MissionControl, MissionEvent},
    warn,
};
use rand::{SeedableRng, rngs::StdRng};
use std::{env, str::FromStr};

const DEFAULT_SPEED: f64 = 1.0;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let speed = parse_env("HAB_SPEED").unwrap_or(DEFAULT_SPEED);
    let seed = parse_env::<u64>("HAB_SEED");
    let cep_mode = parse_env::<CepMode>("HAB_CEP").unwrap_or_default();

    let config = match seed {
        Some(s) => SimConfig::default().with_seed(s),
        None => SimConfig::default(),
    };
    let launch_site = config.launch_site;
    let burst_altitude = config.burst_altitude;
    let forecast_rng = seed.map_or_else(StdRng::from_os_rng, |s| StdRng::seed_from_u64(s ^ 0x5eed));
    let mut control = MissionControl::new(cep_mode, forecast_rng);

    let mut simulator = FlightSimulator::new(config);
    simulator.set_speed_multiplier(speed);
    log!("CEP mode {cep_mode}, seed {seed:?}");

    let (sink, mut telemetry_rx) = channel_sink();
    simulator.start(sink);

    loop {
        tokio::select! {
            received = telemetry_rx.recv() => {
                let Some(sample) = received else { break };
                event!(
                    "{} {} alt {:.1} m ({:.0}%) v/s {:.2} m/s pos {} wind {:.2} m/s @ {:.0}°",
                    sample.mission_elapsed_label(),
                    sample.phase(),
                    sample.altitude(),
                    sample.altitude_fraction(burst_altitude) * 100.0,
                    sample.vertical_speed(),
                    sample.position(),
                    sample.wind_speed(),
                    sample.wind_heading_deg()
                );
                for mission_event in control.observe(&sample) {
                    report(&mission_event, &sample, control.forecast(), launch_site);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, stopping mission");
                simulator.stop();
            }
        }
    }

    match control.latest() {
        Some(last) => info!(
            "Mission ended in {} at {}, {:.0} m from the launch site",
            last.phase(),
            last.mission_elapsed_label(),
            launch_site.meters_to(&last.position()).abs()
        ),
        None => warn!("Mission ended without telemetry"),
    }
}

fn report(
    mission_event: &MissionEvent,
    sample: &TelemetrySample,
    landing: Option<&LandingForecast>,
    launch_site: GeoPoint,
) {
    match mission_event {
        MissionEvent::PhaseChanged { from, to } => info!(
            "{} {from} -> {to} at {:.1} m",
            sample.mission_elapsed_label(),
            sample.altitude()
        ),
        MissionEvent::ForecastReady => {
            if let Some(l) = landing {
                report_forecast(l);
            }
        }
        MissionEvent::ForecastFailed(e) => error!("Landing forecast failed: {e}"),
        MissionEvent::Landed { position, mission_time } => info!(
            "Touchdown at {position} after {mission_time:.1} s, drift {:.0} m",
            launch_site.meters_to(position).abs()
        ),
    }
}

fn report_forecast(landing: &LandingForecast) {
    let cep = landing.cep();
    forecast!(
        "{} candidates around {}, CEP {:.0} m x {:.0} m @ {:.0}°, {:.0}% inside",
        landing.points().len(),
        cep.center(),
        cep.semi_major_m(),
        cep.semi_minor_m(),
        cep.orientation_deg(),
        landing.containment() * 100.0
    );
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    let parsed = raw.trim().parse::<T>().ok();
    if parsed.is_none() {
        warn!("Ignoring unparsable {key}={raw}");
    }
    parsed
}
