use super::{
    FlightModel, FlightSimulator, Phase, SimConfig, TelemetrySample, WindConfig, WindModel,
    channel_sink, clamp_speed_multiplier,
};
use crate::common::{
    GeoPoint,
    geo::{METERS_PER_DEG_LAT, meters_per_deg_lon},
};
use itertools::Itertools;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strum::IntoEnumIterator;

const MAX_TICKS: usize = 1_000_000;

fn seeded_model(seed: u64, multiplier: f64) -> FlightModel<StdRng> {
    let mut model = FlightModel::new(SimConfig::default(), StdRng::seed_from_u64(seed));
    model.set_speed_multiplier(multiplier);
    model.launch();
    model
}

fn fly_to_landing(model: &mut FlightModel<StdRng>) -> Vec<TelemetrySample> {
    let mut samples = Vec::new();
    while let Some(sample) = model.tick() {
        samples.push(sample);
        assert!(samples.len() < MAX_TICKS, "mission did not land");
    }
    samples
}

fn assert_full_mission(samples: &[TelemetrySample], config: &SimConfig) {
    let phases = samples.iter().map(TelemetrySample::phase).dedup().collect::<Vec<_>>();
    assert_eq!(
        phases,
        vec![Phase::Launch, Phase::Ascent, Phase::Burst, Phase::Descent, Phase::Landed]
    );
    assert!(samples.iter().tuple_windows().all(|(a, b)| b.mission_time() > a.mission_time()));
    assert!(samples.iter().tuple_windows().all(|(a, b)| b.phase() >= a.phase()));
    assert!(samples.iter().all(|s| s.altitude() >= config.ground_altitude));
    assert_eq!(samples.iter().filter(|s| s.phase() == Phase::Burst).count(), 1);
    assert_eq!(samples.iter().filter(|s| s.phase() == Phase::Landed).count(), 1);
    let landed = samples.last().unwrap();
    assert_eq!(landed.phase(), Phase::Landed);
    assert!((landed.altitude() - config.ground_altitude).abs() < f64::EPSILON);
    assert!(landed.vertical_speed().abs() < f64::EPSILON);
}

#[test]
fn test_phase_order() {
    let chain = std::iter::successors(Some(Phase::Prelaunch), |p| p.next()).collect::<Vec<_>>();
    assert_eq!(chain, Phase::iter().collect::<Vec<_>>());
    assert!(chain.iter().tuple_windows().all(|(a, b)| a < b));
    assert_eq!(Phase::Descent.to_string(), "DESCENT");
    assert!(Phase::Landed.is_terminal());
    assert!(!Phase::Prelaunch.is_active());
}

#[test]
fn test_single_launch_tick() {
    let mut model = seeded_model(1, 1.0);
    let sample = model.tick().unwrap();
    assert_eq!(sample.phase(), Phase::Launch);
    assert!((sample.mission_time() - 0.2).abs() < 1e-12);
    assert!((sample.vertical_speed() - 5.0).abs() < 1e-12);
    assert!((sample.altitude() - 6.0).abs() < 1e-9);
    assert_eq!(sample.position(), SimConfig::default().launch_site);
}

#[test]
fn test_full_mission_at_unit_speed() {
    let mut model = seeded_model(42, 1.0);
    let samples = fly_to_landing(&mut model);
    assert_full_mission(&samples, model.config());
}

#[test]
fn test_full_mission_at_max_speed() {
    let mut model = seeded_model(42, 20.0);
    let samples = fly_to_landing(&mut model);
    assert_full_mission(&samples, model.config());
    assert!(samples.iter().tuple_windows().all(|(a, b)| {
        (b.mission_time() - a.mission_time() - 4.0).abs() < 1e-9
    }));
}

#[test]
fn test_burst_is_reported_once_then_descent() {
    let mut model = seeded_model(3, 10.0);
    let samples = fly_to_landing(&mut model);
    let burst_i = samples.iter().position(|s| s.phase() == Phase::Burst).unwrap();
    let burst = samples[burst_i];
    let after = samples[burst_i + 1];
    assert!(burst.altitude() >= model.config().burst_altitude);
    assert_eq!(after.phase(), Phase::Descent);
    assert!(after.vertical_speed().abs() < f64::EPSILON);
    assert!((after.altitude() - burst.altitude()).abs() < f64::EPSILON);
    assert!(samples[burst_i + 2].vertical_speed() < 0.0);
}

#[test]
fn test_no_frames_after_landing() {
    let mut model = seeded_model(5, 20.0);
    let samples = fly_to_landing(&mut model);
    let frozen = *model.state();
    assert_eq!(frozen.phase(), Phase::Landed);
    assert!(!frozen.is_running());
    for _ in 0..10 {
        assert!(model.tick().is_none());
    }
    assert_eq!(*model.state(), frozen);
    assert_eq!(samples.last().map(TelemetrySample::phase), Some(Phase::Landed));
}

#[test]
fn test_tick_before_launch_and_after_halt() {
    let mut model = FlightModel::new(SimConfig::default(), StdRng::seed_from_u64(9));
    let initial = *model.state();
    assert_eq!(initial.phase(), Phase::Prelaunch);
    assert!(model.tick().is_none());
    assert_eq!(*model.state(), initial);

    model.launch();
    assert!(model.tick().is_some());
    model.halt();
    let halted = *model.state();
    assert!(model.tick().is_none());
    assert_eq!(*model.state(), halted);
}

#[test]
fn test_time_step_follows_multiplier() {
    let mut model = seeded_model(11, 1.0);
    let t0 = model.tick().unwrap().mission_time();
    model.set_speed_multiplier(7.0);
    let t1 = model.tick().unwrap().mission_time();
    assert!((t1 - t0 - 1.4).abs() < 1e-12);
    assert!((model.state().vertical_speed() - 35.0).abs() < 1e-12);
}

#[test]
fn test_speed_multiplier_clamping() {
    assert_eq!(clamp_speed_multiplier(0.0), Some(1.0));
    assert_eq!(clamp_speed_multiplier(50.0), Some(20.0));
    assert_eq!(clamp_speed_multiplier(7.0), Some(7.0));
    assert_eq!(clamp_speed_multiplier(f64::NAN), None);

    let mut model = seeded_model(0, 1.0);
    assert!((model.set_speed_multiplier(0.0) - 1.0).abs() < f64::EPSILON);
    assert!((model.set_speed_multiplier(50.0) - 20.0).abs() < f64::EPSILON);
    assert!((model.set_speed_multiplier(7.0) - 7.0).abs() < f64::EPSILON);
    assert!((model.set_speed_multiplier(f64::INFINITY) - 7.0).abs() < f64::EPSILON);
}

#[test]
fn test_launch_resets_flight_but_keeps_multiplier() {
    let mut model = seeded_model(13, 4.0);
    for _ in 0..500 {
        model.tick();
    }
    assert!(model.state().altitude() > 500.0);
    model.launch();
    let state = model.state();
    assert_eq!(state.phase(), Phase::Launch);
    assert!(state.mission_time().abs() < f64::EPSILON);
    assert!((state.altitude() - 5.0).abs() < f64::EPSILON);
    assert_eq!(state.drift(), (0.0, 0.0));
    assert!((state.speed_multiplier() - 4.0).abs() < f64::EPSILON);
}

#[test]
fn test_same_seed_same_flight() {
    let first = fly_to_landing(&mut seeded_model(77, 20.0));
    let second = fly_to_landing(&mut seeded_model(77, 20.0));
    assert_eq!(first, second);
}

#[test]
fn test_drift_only_while_ascending_or_descending() {
    let mut model = seeded_model(21, 20.0);
    let samples = fly_to_landing(&mut model);
    let launch_site = model.config().launch_site;
    assert!(samples
        .iter()
        .filter(|s| s.phase() == Phase::Launch)
        .all(|s| s.position() == launch_site));
    let landed = samples.last().unwrap();
    assert!(landed.longitude() > launch_site.lon());
}

#[test]
fn test_wind_without_noise_is_deterministic() {
    let wind_config = WindConfig { noise_std: 0.0, ..WindConfig::default() };
    let config = SimConfig { wind: wind_config, ..SimConfig::default() };
    let wind = WindModel::new(wind_config);
    let mut model = FlightModel::new(config, StdRng::seed_from_u64(0));
    model.launch();
    for _ in 0..50 {
        let sample = model.tick().unwrap();
        assert_eq!(sample.wind(), wind.mean_at(sample.mission_time()));
    }
    let at_zero = wind.mean_at(0.0);
    assert!((at_zero.x() - 3.0).abs() < 1e-12);
    assert!((at_zero.y() - 0.5).abs() < 1e-12);
}

#[test]
fn test_telemetry_read_outs() {
    let sample = TelemetrySample::new(
        754.9,
        SimConfig::default().launch_site,
        17_500.0,
        6.5,
        (3.0, 4.0).into(),
        Phase::Ascent,
    );
    assert_eq!(sample.mission_elapsed_label(), "T+12:34");
    assert!((sample.wind_speed() - 5.0).abs() < 1e-12);
    assert!((sample.wind_heading_deg() - 36.869_897_645_844_02).abs() < 1e-9);
    assert!((sample.altitude_fraction(35_000.0) - 0.5).abs() < 1e-12);
    assert!((sample.altitude_fraction(10_000.0) - 1.0).abs() < 1e-12);
}

#[test]
fn test_wind_jitter_spread() {
    let wind = WindModel::new(WindConfig::default());
    let mut rng = StdRng::seed_from_u64(31);
    let t = 12.5;
    let mean = wind.mean_at(t);
    let n = 20_000;
    let count = f64::from(n);
    let deviations = (0..n).map(|_| wind.sample(t, &mut rng) - mean).collect::<Vec<_>>();

    let avg_east = deviations.iter().map(|d| d.x()).sum::<f64>() / count;
    let avg_north = deviations.iter().map(|d| d.y()).sum::<f64>() / count;
    assert!(avg_east.abs() < 0.02, "east bias {avg_east}");
    assert!(avg_north.abs() < 0.02, "north bias {avg_north}");

    let std_east = (deviations.iter().map(|d| d.x().powi(2)).sum::<f64>() / count).sqrt();
    let std_north = (deviations.iter().map(|d| d.y().powi(2)).sum::<f64>() / count).sqrt();
    assert!((std_east - 0.5).abs() < 0.015, "east std {std_east}");
    assert!((std_north - 0.5).abs() < 0.015, "north std {std_north}");
}

#[test]
fn test_drift_uses_current_latitude() {
    let wind = WindConfig {
        east_mean: 50.0,
        east_amplitude: 0.0,
        north_mean: 50.0,
        north_amplitude: 0.0,
        noise_std: 0.0,
        ..WindConfig::default()
    };
    let config = SimConfig {
        launch_site: GeoPoint::new(60.0, 10.0),
        ascent_altitude: 0.0,
        wind,
        ..SimConfig::default()
    };
    let mut model = FlightModel::new(config, StdRng::seed_from_u64(0));
    model.set_speed_multiplier(20.0);
    model.launch();

    let launch = model.tick().unwrap();
    assert_eq!(launch.phase(), Phase::Ascent);
    assert_eq!(launch.position(), GeoPoint::new(60.0, 10.0));

    // 50 m/s over dt = 4 s with the ascent coupling of 0.3
    let step_m = 60.0;
    let first = model.tick().unwrap();
    assert!((first.latitude() - (60.0 + step_m / METERS_PER_DEG_LAT)).abs() < 1e-12);
    assert!((first.longitude() - (10.0 + step_m / meters_per_deg_lon(60.0))).abs() < 1e-12);

    let second = model.tick().unwrap();
    let lon_step = second.longitude() - first.longitude();
    assert!((lon_step - step_m / meters_per_deg_lon(first.latitude())).abs() < 1e-12);
    assert!((lon_step - step_m / meters_per_deg_lon(60.0)).abs() > 1e-9);
}

#[test]
fn test_telemetry_wire_format() {
    let sample = TelemetrySample::new(
        1.0,
        GeoPoint::new(12.2253, 79.0747),
        6.0,
        5.0,
        (3.0, -1.0).into(),
        Phase::Launch,
    );
    let value = serde_json::to_value(sample).unwrap();
    let keys = value.as_object().unwrap().keys().map(String::as_str).sorted().collect::<Vec<_>>();
    assert_eq!(
        keys,
        vec!["alt", "lat", "lon", "phase", "time", "verticalSpeed", "wind_east", "wind_north"]
    );
    assert_eq!(value["phase"], "LAUNCH");
    assert_eq!(value["verticalSpeed"], 5.0);

    let frame = r#"{"time":1.0,"lat":12.2253,"lon":79.0747,"alt":6.0,"verticalSpeed":5.0,"wind_east":3.0,"wind_north":-1.0,"phase":"LAUNCH"}"#;
    let parsed: TelemetrySample = serde_json::from_str(frame).unwrap();
    assert_eq!(parsed, sample);
    assert!(serde_json::from_str::<TelemetrySample>(&frame.replace("LAUNCH", "launch")).is_err());
}

#[tokio::test(start_paused = true)]
async fn test_simulator_runs_mission_to_landing() {
    let mut sim = FlightSimulator::new(SimConfig::default().with_seed(8));
    sim.set_speed_multiplier(20.0);
    let (sink, mut rx) = channel_sink();
    sim.start(sink);
    assert!(sim.is_running());

    let mut samples = Vec::new();
    while let Some(sample) = rx.recv().await {
        samples.push(sample);
    }
    assert_full_mission(&samples, sim.config());
    assert!(!sim.is_running());
    let state = sim.snapshot().await;
    assert_eq!(state.phase(), Phase::Landed);
    assert!(!state.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_simulator_speed_change_applies_on_next_tick() {
    let mut sim = FlightSimulator::new(SimConfig::default().with_seed(2));
    sim.set_speed_multiplier(0.0);
    assert!((sim.speed_multiplier() - 1.0).abs() < f64::EPSILON);
    let (sink, mut rx) = channel_sink();
    sim.start(sink);

    let first = rx.recv().await.unwrap();
    assert!((first.mission_time() - 0.2).abs() < 1e-12);
    sim.set_speed_multiplier(7.0);
    let second = rx.recv().await.unwrap();
    assert!((second.mission_time() - first.mission_time() - 1.4).abs() < 1e-12);
    sim.set_speed_multiplier(50.0);
    let third = rx.recv().await.unwrap();
    assert!((third.mission_time() - second.mission_time() - 4.0).abs() < 1e-12);
    sim.stop();
}

#[tokio::test(start_paused = true)]
async fn test_simulator_stop_ends_stream() {
    let mut sim = FlightSimulator::new(SimConfig::default().with_seed(4));
    let (sink, mut rx) = channel_sink();
    sim.start(sink);
    for _ in 0..3 {
        assert!(rx.recv().await.is_some());
    }
    sim.stop();
    assert!(!sim.is_running());
    assert!(rx.recv().await.is_none());
    let state = sim.snapshot().await;
    assert!(!state.is_running());
    assert!((state.mission_time() - 0.6).abs() < 1e-9);

    sim.stop();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(sim.snapshot().await, state);
}

#[tokio::test(start_paused = true)]
async fn test_stop_before_start_is_noop() {
    let mut sim = FlightSimulator::new(SimConfig::default());
    let before = sim.snapshot().await;
    sim.stop();
    assert!(!sim.is_running());
    assert_eq!(sim.snapshot().await, before);
    assert_eq!(before.phase(), Phase::Prelaunch);
}

#[tokio::test(start_paused = true)]
async fn test_restart_discards_progress() {
    let mut sim = FlightSimulator::new(SimConfig::default().with_seed(6));
    sim.set_speed_multiplier(5.0);
    let (first_sink, mut first_rx) = channel_sink();
    sim.start(first_sink);
    for _ in 0..5 {
        first_rx.recv().await.unwrap();
    }

    let frames = Arc::new(Mutex::new(Vec::new()));
    let frames_clone = Arc::clone(&frames);
    sim.start(move |sample: TelemetrySample| frames_clone.lock().unwrap().push(sample));
    assert!(first_rx.recv().await.is_none());

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    sim.stop();
    let frames = frames.lock().unwrap();
    assert!(!frames.is_empty());
    assert!((frames[0].mission_time() - 1.0).abs() < 1e-12);
    assert_eq!(frames[0].phase(), Phase::Launch);
}
