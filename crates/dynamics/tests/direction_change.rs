use dynamics::{DriveCommand, TravelDirection, Vec3, VehicleConfig, VehicleDynamics};

fn model() -> VehicleDynamics {
    VehicleDynamics::new(VehicleConfig::default()).unwrap()
}

#[test]
fn reverse_throttle_while_moving_forward_brakes() {
    let mut vehicle = model();
    let actuation = vehicle.step(DriveCommand::new(0.0, -0.5), Vec3::new(0.0, 0.0, 2.0));
    assert_eq!(vehicle.state().direction, TravelDirection::Forward);
    assert!(actuation.total_brake_torque() > 0.0);
    assert!((actuation.driven[0].brake_torque - 200.0).abs() < 1e-4);
}

#[test]
fn direction_change_braking_ignores_speed() {
    // Slow enough that the governor never triggers, fast enough to register direction.
    for speed in [1.1_f32, 3.0, 5.5] {
        let mut vehicle = model();
        let actuation = vehicle.step(DriveCommand::new(0.0, -0.5), Vec3::new(0.0, 0.0, speed));
        assert!(actuation.total_brake_torque() > 0.0, "speed {speed}");
    }
}

#[test]
fn forward_throttle_while_reversing_brakes() {
    let mut vehicle = model();
    let actuation = vehicle.step(DriveCommand::new(0.0, 0.3), Vec3::new(0.0, 0.0, -1.5));
    assert_eq!(vehicle.state().direction, TravelDirection::Reverse);
    assert!(actuation.total_brake_torque() > 0.0);
}

#[test]
fn stationary_vehicle_never_direction_brakes() {
    let mut vehicle = model();
    // |v| < 1 truncates to zero: stationary.
    let actuation = vehicle.step(DriveCommand::new(0.0, -1.0), Vec3::new(0.0, 0.0, 0.8));
    assert_eq!(vehicle.state().direction, TravelDirection::Stationary);
    assert_eq!(actuation.total_brake_torque(), 0.0);
    assert!(actuation.total_motor_torque() < 0.0);
}

#[test]
fn zero_throttle_is_not_a_direction_change() {
    let mut vehicle = model();
    let actuation = vehicle.step(DriveCommand::IDLE, Vec3::new(0.0, 0.0, 3.0));
    assert_eq!(actuation.total_brake_torque(), 0.0);
    assert!(!vehicle.direction_change(0.0));
}

#[test]
fn signed_speed_follows_direction() {
    let mut vehicle = model();
    vehicle.step(DriveCommand::IDLE, Vec3::new(0.0, 0.0, -2.0));
    assert!(vehicle.state().signed_speed_kph() < 0.0);
}
