use lane_traffic_sim::simulation::{LightState, Roadway, TrafficLight};

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_red_phase_countdown() {
    let light = TrafficLight::new(300.0, 4.0, 6.0);
    let phase = light.phase_at(3.0);
    assert_eq!(phase.state, LightState::Red);
    assert_close(phase.time_remain, 1.0);
}

#[test]
fn test_green_phase_countdown() {
    let light = TrafficLight::new(300.0, 4.0, 6.0);
    let phase = light.phase_at(5.0);
    assert_eq!(phase.state, LightState::Green);
    assert_close(phase.time_remain, 5.0);
}

#[test]
fn test_phase_repeats_every_cycle() {
    let light = TrafficLight::new(300.0, 4.0, 6.0);
    assert_eq!(light.phase_at(13.0), light.phase_at(3.0));
    assert_eq!(light.phase_at(13.0).state, LightState::Red);
    assert_eq!(light.phase_at(4.0).state, LightState::Green);
}

#[test]
fn test_phase_is_pure() {
    let mut light = TrafficLight::new(300.0, 4.0, 6.0);
    let first = light.phase_at(123.456);
    let second = light.phase_at(123.456);
    assert_eq!(first, second);

    // Jumping around in time leaves no trace
    light.update(7.0);
    light.update(1.0);
    light.update(123.456);
    assert_eq!(light.state, first.state);
    assert_close(light.time_remain, first.time_remain);
}

#[test]
fn test_red_iff_phase_below_red_duration_for_fractional_ticks() {
    let light = TrafficLight::new(0.0, 2.5, 3.5);
    for tick in 0..600 {
        let elapsed = tick as f64 / 30.0;
        let expect_red = elapsed.rem_euclid(6.0) < 2.5;
        assert_eq!(
            light.phase_at(elapsed).state == LightState::Red,
            expect_red,
            "mismatch at t={}",
            elapsed
        );
    }
}

#[test]
fn test_countdown_seconds_truncates() {
    let mut light = TrafficLight::new(0.0, 4.0, 6.0);
    light.update(2.5);
    assert_eq!(light.countdown_seconds(), 1);
    light.update(3.5);
    assert_eq!(light.countdown_seconds(), 0);
}

#[test]
fn test_roadway_sorts_lights_and_finds_next_ahead() {
    let mut road = Roadway::new(
        1000.0,
        2,
        vec![
            TrafficLight::new(700.0, 4.0, 6.0),
            TrafficLight::new(200.0, 4.0, 6.0),
        ],
    );

    let positions: Vec<f32> = road.lights().iter().map(|l| l.position).collect();
    assert_eq!(positions, vec![200.0, 700.0]);

    assert_eq!(road.next_light_ahead(0.0).map(|l| l.position), Some(200.0));
    assert_eq!(road.next_light_ahead(200.0).map(|l| l.position), Some(700.0));
    assert!(road.next_light_ahead(800.0).is_none());

    road.update_traffic_lights(5.0);
    assert!(road.lights().iter().all(|l| l.state == LightState::Green));

    assert!(road.contains_lane(1));
    assert!(!road.contains_lane(2));
}
