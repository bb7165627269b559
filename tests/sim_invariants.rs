//! End-to-end simulator invariants: simulate a frame, publish it into a
//! table, read it back through a camera handle.

use anyhow::{Context, Result};
use approx::assert_relative_eq;
use sightline::geometry::{Pose2d, Transform2d};
use sightline::sim::{PublishOutcome, SimCameraConfig, SimVisionSystem, SimVisionTarget, SimulatedPublisher};
use sightline::{CameraConfig, MemoryTable, TableHandle, VisionCamera};

fn camera_config(diagonal_fov_deg: f64, camera_height_m: f64, min_target_area_px: f64) -> SimCameraConfig {
    SimCameraConfig {
        camera_name: "Test".to_string(),
        diagonal_fov_deg,
        camera_pitch_deg: 0.0,
        robot_to_camera: Transform2d::default(),
        camera_height_m,
        max_led_range_m: 99_999.0,
        resolution_px: (320, 240),
        min_target_area_px,
    }
}

fn setup(config: SimCameraConfig) -> Result<(SimVisionSystem, VisionCamera, TableHandle)> {
    let table = MemoryTable::shared();
    let location = CameraConfig::new(config.camera_name.clone());
    let publisher = SimulatedPublisher::new(table.clone(), &location);
    let system = SimVisionSystem::new(config, publisher)?;
    let camera = VisionCamera::new(table.clone(), &location);
    Ok((system, camera, table))
}

fn target_at(x: f64, y: f64, height_above_ground_m: f64) -> SimVisionTarget {
    SimVisionTarget::new(Pose2d::from_xy_degrees(x, y, 0.0), height_above_ground_m, 0.5, 0.5)
}

#[test]
fn empty_scene_never_fails() -> Result<()> {
    let (mut system, mut camera, _) = setup(camera_config(80.0, 1.0, 0.0))?;
    system.add_target(SimVisionTarget::new(Pose2d::default(), 0.0, 1.0, 1.0));

    for _ in 0..100 {
        system.process_frame(Pose2d::default())?;
    }
    assert!(!camera.has_targets()?);
    Ok(())
}

#[test]
fn reported_distance_matches_ground_distance() -> Result<()> {
    for distance in [5.0, 10.0, 15.0, 20.0, 25.0, 30.0] {
        let (mut system, mut camera, _) = setup(camera_config(80.0, 1.0, 0.0))?;
        system.add_target(target_at(35.0, 0.0, 0.0));

        system.process_frame(Pose2d::from_xy_degrees(35.0 - distance, 0.0, 0.0))?;

        let target = camera.best_target()?.context("target should be visible")?;
        assert_relative_eq!(target.camera_to_target().translation.norm(), distance, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn rotating_robot_shifts_yaw() -> Result<()> {
    for theta in [-10.0, -5.0, 0.0, 5.0, 10.23] {
        let (mut system, mut camera, _) = setup(camera_config(80.0, 1.0, 0.0))?;
        system.add_target(target_at(35.0, 0.0, 0.0));

        system.process_frame(Pose2d::from_xy_degrees(10.0, 0.0, theta))?;

        let yaw = camera.best_target_yaw()?.context("target should be visible")?;
        assert_relative_eq!(yaw, theta, epsilon = 1e-4);
    }
    Ok(())
}

#[test]
fn pitching_camera_shifts_pitch() -> Result<()> {
    for pitch in [-10.0, -5.0, 0.0, 1.0, 5.0, 10.23, 20.21, -19.999] {
        let (mut system, mut camera, _) = setup(camera_config(120.0, 0.0, 0.0))?;
        system.add_target(target_at(35.0, 0.0, 0.0));

        system.move_camera(Transform2d::default(), 0.0, pitch);
        system.process_frame(Pose2d::from_xy_degrees(30.0, 0.0, 0.0))?;

        let reported = camera.best_target_pitch()?.context("target should be visible")?;
        assert_relative_eq!(reported, -pitch, epsilon = 1e-4);
    }
    Ok(())
}

#[test]
fn target_disappears_below_minimum_area() -> Result<()> {
    let (mut system, mut camera, _) = setup(camera_config(80.0, 1.0, 10.0))?;
    system.add_target(target_at(35.0, 0.0, 0.0));

    let mut seen = false;
    let mut lost_at = None;
    for step in 0..120 {
        let distance = 5.0 + f64::from(step) * 0.5;
        let robot = Pose2d::from_xy_degrees(35.0 - distance, 0.0, 0.0);
        system.process_frame(robot)?;

        if camera.has_targets()? {
            assert!(lost_at.is_none(), "target reappeared at {distance} m");
            seen = true;
        } else if lost_at.is_none() {
            let observation = system.observe(&system.targets()[0], robot);
            assert!(observation.area_px <= 10.0);
            lost_at = Some(distance);
        }
    }

    assert!(seen);
    assert!(lost_at.is_some());
    Ok(())
}

#[test]
fn area_exactly_at_threshold_is_excluded() -> Result<()> {
    let target = target_at(8.0, 0.0, 0.0);
    let (probe, _, _) = setup(camera_config(80.0, 1.0, 0.0))?;
    let area = probe.observe(&target, Pose2d::default()).area_px;

    let (mut system, mut camera, _) = setup(camera_config(80.0, 1.0, area))?;
    system.add_target(target);
    system.process_frame(Pose2d::default())?;
    assert!(!camera.has_targets()?);
    Ok(())
}

#[test]
fn wide_camera_sees_every_target() -> Result<()> {
    let mut config = camera_config(160.0, 0.5, 0.0);
    config.max_led_range_m = 20.0;
    let (mut system, mut camera, _) = setup(config)?;

    let offsets = [-1.0, -0.8, -0.6, -0.4, -0.2, 0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
    for (i, y) in offsets.iter().enumerate() {
        system.add_target(target_at(15.98, *y, 0.25 * i as f64));
    }

    system.process_frame(Pose2d::from_xy_degrees(5.0, 0.0, 0.0))?;

    let result = camera.latest_result()?;
    assert_eq!(result.target_count(), 11);
    // Registration order is kept; targets further left report smaller yaw
    let yaws: Vec<f64> = result.targets().iter().map(|t| t.yaw()).collect();
    assert!(yaws.windows(2).all(|pair| pair[0] > pair[1]));
    Ok(())
}

#[test]
fn driver_mode_suppresses_publishing() -> Result<()> {
    let (mut system, mut camera, _) = setup(camera_config(80.0, 1.0, 0.0))?;
    system.add_target(target_at(5.0, 0.0, 0.0));

    assert!(matches!(system.process_frame(Pose2d::default())?, PublishOutcome::Published { .. }));
    let published = camera.latest_result()?;

    camera.set_driver_mode(true)?;
    // Facing away would publish an empty result if publishing were enabled
    let away = Pose2d::from_xy_degrees(0.0, 0.0, 180.0);
    assert_eq!(system.process_frame(away)?, PublishOutcome::SkippedDriverMode);
    assert_eq!(camera.latest_result()?, published);

    camera.set_driver_mode(false)?;
    system.process_frame(away)?;
    assert!(!camera.has_targets()?);
    Ok(())
}

#[test]
fn caller_latency_is_published() -> Result<()> {
    let (mut system, mut camera, _) = setup(camera_config(80.0, 1.0, 0.0))?;
    system.add_target(target_at(5.0, 0.0, 0.0));

    system.process_frame_with_latency(Pose2d::default(), 23.5)?;
    assert_eq!(camera.latency_millis()?, 23.5);

    system.process_frame(Pose2d::default())?;
    assert_eq!(camera.latency_millis()?, 0.0);
    Ok(())
}
