use dynamics::{DynamicsError, IntegratorConfig, Pose, Vec3, VehicleConfig, VehicleDynamics};

#[test]
fn partial_json_keeps_legacy_defaults() {
    let config: VehicleConfig = serde_json::from_str(r#"{ "max_speed_kph": 12 }"#).unwrap();
    assert_eq!(config.max_speed_kph, 12.0);
    assert_eq!(config.motor_torque, 400.0);
    assert_eq!(config.max_steer_angle, 25.0);
    assert_eq!(config.torque_per_wheel(), 500.0);

    let vehicle = VehicleDynamics::new(config).unwrap();
    assert_eq!(vehicle.state().speed_cap_kph, 12.0);
}

#[test]
fn integrator_config_round_trips_through_json() {
    let config = IntegratorConfig {
        mass: 900.0,
        ..IntegratorConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: IntegratorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn empty_wheel_groups_are_rejected() {
    let config: VehicleConfig = serde_json::from_str(r#"{ "steered_wheels": 0 }"#).unwrap();
    assert_eq!(config.validate(), Err(DynamicsError::NoWheels("steered")));
    assert!(VehicleDynamics::new(config).is_err());
}

#[test]
fn poses_read_from_json_with_named_fields() {
    let pose: Pose = serde_json::from_str(
        r#"{ "position": { "x": 7.5, "y": 0.0, "z": 10.0 }, "heading": 0.5 }"#,
    )
    .unwrap();
    assert_eq!(pose, Pose::new(Vec3::new(7.5, 0.0, 10.0), 0.5));
}
