use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dynamics::{
    DriveCommand, IntegratorConfig, KinematicIntegrator, MotionIntegrator, Pose, VehicleConfig,
    VehicleDynamics,
};

fn bench_vehicle_step(c: &mut Criterion) {
    let mut vehicle = VehicleDynamics::new(VehicleConfig::default()).unwrap();
    let mut body = KinematicIntegrator::new(IntegratorConfig::default(), Pose::default());
    c.bench_function("vehicle_step", |b| {
        b.iter(|| {
            let command = black_box(DriveCommand::new(0.2, 0.4));
            let actuation = vehicle.step(command, body.local_velocity());
            body.actuate(&actuation);
            body.integrate(0.02);
        });
    });
}

criterion_group!(benches, bench_vehicle_step);
criterion_main!(benches);
