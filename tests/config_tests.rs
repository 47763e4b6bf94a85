use rand::rngs::StdRng;
use rand::SeedableRng;

use lane_traffic_sim::simulation::{
    generate_lane_positions, random_gap, random_kinematics, spawn_position, LanePartition,
    SimConfig, SimWorld, TrafficLightConfig, ACCELERATION_RANGE, VEHICLE_LENGTH_RANGE,
};

#[test]
fn test_default_config_is_valid() {
    let config = SimConfig::default();
    assert!(config.validate().is_ok());
    assert!((config.dt() - 1.0 / 30.0).abs() < 1e-6);
}

#[test]
fn test_parse_config_with_original_keys() {
    let json = r#"{
        "speed_limit": 35,
        "road_length": 1000,
        "lane_count": 2,
        "vehicle_count": 10,
        "reaction_time_range": [1.0, 2.0],
        "traffic_lights": [
            {"position": 300, "red_duration": 4, "green_duration": 6}
        ]
    }"#;

    let config = SimConfig::from_json_str(json).unwrap();
    assert_eq!(config.target_vehicle_count, 10);
    assert_eq!(config.lane_count, 2);
    assert_eq!(config.traffic_lights.len(), 1);
    assert_eq!(config.tick_rate, 30.0);
    assert_eq!(config.speed_scale_range, [0.9, 1.2]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_malformed_json_is_an_error() {
    assert!(SimConfig::from_json_str("{ \"speed_limit\": ").is_err());
    assert!(SimConfig::from_json_file("/definitely/not/here.json").is_err());
}

#[test]
fn test_validation_failures() {
    let mut config = SimConfig::default();
    config.lane_count = 0;
    assert!(config.validate().is_err());

    let mut config = SimConfig::default();
    config.road_length = 0.0;
    assert!(config.validate().is_err());

    let mut config = SimConfig::default();
    config.tick_rate = 0.0;
    assert!(config.validate().is_err());

    let mut config = SimConfig::default();
    config.reaction_time_range = [2.0, 1.0];
    assert!(config.validate().is_err());

    let mut config = SimConfig::default();
    config.speed_scale_range = [-0.5, 1.0];
    assert!(config.validate().is_err());

    let mut config = SimConfig::default();
    config.traffic_lights.push(TrafficLightConfig {
        position: 10.0,
        red_duration: 0.0,
        green_duration: 5.0,
    });
    assert!(config.validate().is_err());
}

#[test]
fn test_light_off_the_road_is_only_a_warning() {
    let mut config = SimConfig::default();
    config.traffic_lights.push(TrafficLightConfig {
        position: config.road_length + 50.0,
        red_duration: 3.0,
        green_duration: 3.0,
    });
    assert!(config.validate().is_ok());
    assert!(SimWorld::new_with_seed(config, 1).is_ok());
}

#[test]
fn test_lane_positions_respect_spacing_and_road_end() {
    let mut rng = StdRng::seed_from_u64(4);
    let positions = generate_lane_positions(&mut rng, 1200.0, 8);

    assert!(!positions.is_empty());
    assert!(positions[0] <= 300.0);
    for pair in positions.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((103.0..=156.0 + 1e-3).contains(&gap), "gap {}", gap);
    }
    assert!(positions.iter().all(|p| p + 6.0 < 1200.0));
}

#[test]
fn test_short_road_holds_fewer_vehicles() {
    let mut rng = StdRng::seed_from_u64(8);
    let positions = generate_lane_positions(&mut rng, 200.0, 10);
    assert!(positions.len() <= 2);
}

#[test]
fn test_random_kinematics_ranges() {
    let config = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(21);

    for _ in 0..200 {
        let k = random_kinematics(&mut rng, &config);
        assert!((10.0..=config.speed_limit).contains(&k.speed));
        assert!((ACCELERATION_RANGE.0..=ACCELERATION_RANGE.1).contains(&k.max_acceleration));
        assert!((ACCELERATION_RANGE.0..=ACCELERATION_RANGE.1).contains(&k.max_deceleration));
        assert!((1.0..=2.5).contains(&k.reaction_time));
        assert!((0.9..=1.2).contains(&k.speed_scale_preference));
        assert!(
            (VEHICLE_LENGTH_RANGE.0 as f32..=VEHICLE_LENGTH_RANGE.1 as f32).contains(&k.length)
        );
        assert_eq!(k.length.fract(), 0.0);
    }
}

#[test]
fn test_slow_speed_limit_collapses_initial_speed() {
    let mut config = SimConfig::default();
    config.speed_limit = 8.0;
    let mut rng = StdRng::seed_from_u64(2);
    assert_eq!(random_kinematics(&mut rng, &config).speed, 8.0);
}

#[test]
fn test_spawn_position_rules() {
    let mut rng = StdRng::seed_from_u64(6);
    assert_eq!(spawn_position(&mut rng, None), 0.0);
    assert_eq!(spawn_position(&mut rng, Some(20.0)), 0.0);

    let behind = spawn_position(&mut rng, Some(800.0));
    assert!((800.0 - 156.0..=800.0 - 103.0).contains(&behind));

    let gap = random_gap(&mut rng);
    assert!((103.0..=156.0).contains(&gap));
}

#[test]
fn test_lane_partition_groups_in_population_order() {
    let mut config = SimConfig::default();
    config.target_vehicle_count = 0;
    let mut world = SimWorld::empty_with_seed(config, 0).unwrap();
    let k = random_kinematics(&mut StdRng::seed_from_u64(1), world.config());

    world.add_vehicle(1, 300.0, k).unwrap();
    world.add_vehicle(0, 100.0, k).unwrap();
    world.add_vehicle(1, 50.0, k).unwrap();
    world.add_vehicle(1, 700.0, k).unwrap();

    let partition = LanePartition::build(world.vehicles(), 3);
    assert_eq!(partition.lane_count(), 3);
    assert_eq!(partition.lane(0), &[1]);
    assert_eq!(partition.lane(1), &[0, 2, 3]);
    assert!(partition.lane(2).is_empty());
    assert!(partition.lane(7).is_empty());

    assert_eq!(partition.rearmost(world.vehicles(), 1), Some(2));
    assert_eq!(partition.rearmost(world.vehicles(), 2), None);
    assert_eq!(partition.front_of(world.vehicles(), 0), Some(3));
    assert_eq!(partition.front_of(world.vehicles(), 3), None);
}
