//! Geometric visibility simulation.
//!
//! Each frame projects every registered target into the camera and keeps the
//! ones that fall inside its field of view, LED range and minimum pixel area.
//! Frames are independent: the result depends only on the robot pose passed
//! in, the current camera configuration and the target list.
//!
//! ## Projection
//!
//! ```text
//! camera     = robot ∘ robot_to_camera
//! cam→target = inverse(camera) ∘ target
//! ground     = |cam→target.translation|
//! vertical   = target_height - camera_height
//! distance   = hypot(ground, vertical)
//! area_px    = area_m2 / (mpp_x · mpp_y),  mpp = 2·ground·tan(fov/2) / res
//! yaw        = -atan2(cam→target.y, cam→target.x)
//! pitch      = atan2(vertical, ground) - camera_pitch
//! ```
//!
//! Yaw is positive to the right of the optical axis, so turning the robot
//! left by θ moves a fixed target to yaw θ. The target's own heading is
//! carried unchanged in the reported camera-to-target transform.

use tracing::{debug, info, trace};

use super::config::{SimCameraConfig, SimScenario};
use super::publisher::{PublishOutcome, SimulatedPublisher};
use super::target::SimVisionTarget;
use crate::geometry::{Pose2d, Transform2d, wrap_angle_deg};
use crate::source::ResultSink;
use crate::sources::TableSource;
use crate::table::TableHandle;
use crate::types::TrackedTarget;
use crate::Result;

/// Projection of one target for one robot pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetObservation {
    pub camera_to_target: Transform2d,
    pub dist_along_ground_m: f64,
    pub dist_vertical_m: f64,
    pub distance_m: f64,
    pub area_px: f64,
    pub yaw_deg: f64,
    pub pitch_deg: f64,
    pub visible: bool,
}

impl TargetObservation {
    /// The target as the vision process would report it. Skew is always 0.
    pub fn to_tracked_target(&self) -> TrackedTarget {
        TrackedTarget::new(self.yaw_deg, self.pitch_deg, self.area_px, 0.0, self.camera_to_target)
    }
}

/// Simulated camera that turns robot poses into published pipeline results.
///
/// ```rust
/// use sightline::geometry::Pose2d;
/// use sightline::sim::{SimCameraConfig, SimVisionSystem, SimVisionTarget, SimulatedPublisher};
/// use sightline::{CameraConfig, MemoryTable, VisionCamera};
///
/// let table = MemoryTable::shared();
/// let config = SimCameraConfig {
///     camera_name: "front".to_string(),
///     diagonal_fov_deg: 80.0,
///     camera_pitch_deg: 0.0,
///     robot_to_camera: Default::default(),
///     camera_height_m: 0.0,
///     max_led_range_m: 20.0,
///     resolution_px: (320, 240),
///     min_target_area_px: 0.0,
/// };
/// let publisher = SimulatedPublisher::new(table.clone(), &CameraConfig::new("front"));
/// let mut sim = SimVisionSystem::new(config, publisher).unwrap();
/// sim.add_target(SimVisionTarget::new(Pose2d::from_xy_degrees(5.0, 0.0, 0.0), 0.0, 0.5, 0.5));
///
/// sim.process_frame(Pose2d::default()).unwrap();
///
/// let mut camera = VisionCamera::new(table, &CameraConfig::new("front"));
/// assert!(camera.has_targets().unwrap());
/// ```
pub struct SimVisionSystem<K: ResultSink = TableSource> {
    config: SimCameraConfig,
    horizontal_fov_deg: f64,
    vertical_fov_deg: f64,
    targets: Vec<SimVisionTarget>,
    publisher: SimulatedPublisher<K>,
}

impl SimVisionSystem<TableSource> {
    /// Build a system and its table publisher from a loaded scenario.
    pub fn from_scenario(scenario: &SimScenario, table: TableHandle) -> Result<Self> {
        scenario.validate()?;
        let publisher = SimulatedPublisher::new(table, &scenario.camera_config());
        let mut system = Self::new(scenario.camera.clone(), publisher)?;
        for target in &scenario.targets {
            system.add_target((*target).into());
        }
        info!(
            camera = %scenario.camera.camera_name,
            targets = system.targets.len(),
            "Simulated camera ready"
        );
        Ok(system)
    }
}

impl<K: ResultSink> SimVisionSystem<K> {
    /// Fails with [`VisionError::Config`](crate::VisionError::Config) for an
    /// impossible camera.
    pub fn new(config: SimCameraConfig, publisher: SimulatedPublisher<K>) -> Result<Self> {
        config.validate()?;
        let (horizontal_fov_deg, vertical_fov_deg) = config.split_fov_deg();
        debug!(
            camera = %config.camera_name,
            horizontal_fov_deg,
            vertical_fov_deg,
            "Created simulated vision system"
        );
        Ok(Self { config, horizontal_fov_deg, vertical_fov_deg, targets: Vec::new(), publisher })
    }

    pub fn add_target(&mut self, target: SimVisionTarget) {
        trace!(camera = %self.config.camera_name, pose = ?target.pose(), "Added target");
        self.targets.push(target);
    }

    pub fn targets(&self) -> &[SimVisionTarget] {
        &self.targets
    }

    pub fn config(&self) -> &SimCameraConfig {
        &self.config
    }

    pub fn publisher(&self) -> &SimulatedPublisher<K> {
        &self.publisher
    }

    pub fn horizontal_fov_deg(&self) -> f64 {
        self.horizontal_fov_deg
    }

    pub fn vertical_fov_deg(&self) -> f64 {
        self.vertical_fov_deg
    }

    /// Reposition the camera for subsequent frames.
    pub fn move_camera(&mut self, robot_to_camera: Transform2d, camera_height_m: f64, camera_pitch_deg: f64) {
        debug!(
            camera = %self.config.camera_name,
            ?robot_to_camera,
            camera_height_m,
            camera_pitch_deg,
            "Moving camera"
        );
        self.config.robot_to_camera = robot_to_camera;
        self.config.camera_height_m = camera_height_m;
        self.config.camera_pitch_deg = camera_pitch_deg;
    }

    /// Project `target` into the camera with the robot at `robot_pose`.
    ///
    /// A target coincident with the camera yields a non-finite area and is
    /// never visible.
    pub fn observe(&self, target: &SimVisionTarget, robot_pose: Pose2d) -> TargetObservation {
        let camera_pose = robot_pose.transform_by(self.config.robot_to_camera);
        let camera_to_target = Transform2d::between(camera_pose, target.pose());

        let dist_along_ground_m = camera_to_target.translation.norm();
        let dist_vertical_m = target.height_above_ground_m() - self.config.camera_height_m;
        let distance_m = dist_along_ground_m.hypot(dist_vertical_m);

        let area_px = target.area_m2() / self.m2_per_px(dist_along_ground_m);
        let yaw_deg = wrap_angle_deg(
            -camera_to_target.translation.y.atan2(camera_to_target.translation.x).to_degrees(),
        );
        let pitch_deg =
            dist_vertical_m.atan2(dist_along_ground_m).to_degrees() - self.config.camera_pitch_deg;

        let visible = distance_m < self.config.max_led_range_m
            && yaw_deg.abs() < self.horizontal_fov_deg / 2.0
            && pitch_deg.abs() < self.vertical_fov_deg / 2.0
            && area_px.is_finite()
            && area_px > self.config.min_target_area_px;

        TargetObservation {
            camera_to_target,
            dist_along_ground_m,
            dist_vertical_m,
            distance_m,
            area_px,
            yaw_deg,
            pitch_deg,
            visible,
        }
    }

    /// Targets visible from `robot_pose`, in registration order.
    pub fn visible_targets(&self, robot_pose: Pose2d) -> Vec<TrackedTarget> {
        self.targets
            .iter()
            .map(|target| self.observe(target, robot_pose))
            .filter(|observation| observation.visible)
            .map(|observation| observation.to_tracked_target())
            .collect()
    }

    /// Simulate one frame and publish it with zero latency.
    pub fn process_frame(&self, robot_pose: Pose2d) -> Result<PublishOutcome> {
        self.process_frame_with_latency(robot_pose, 0.0)
    }

    pub fn process_frame_with_latency(&self, robot_pose: Pose2d, latency_millis: f64) -> Result<PublishOutcome> {
        let visible = self.visible_targets(robot_pose);
        trace!(
            camera = %self.config.camera_name,
            visible = visible.len(),
            total = self.targets.len(),
            "Processed frame"
        );
        self.publisher.publish(latency_millis, &visible)
    }

    /// Square meters covered by one pixel at `distance_m`.
    fn m2_per_px(&self, distance_m: f64) -> f64 {
        let (width, height) = self.config.resolution_px;
        let width_m_per_px =
            2.0 * distance_m * (self.horizontal_fov_deg / 2.0).to_radians().tan() / f64::from(width);
        let height_m_per_px =
            2.0 * distance_m * (self.vertical_fov_deg / 2.0).to_radians().tan() / f64::from(height);
        width_m_per_px * height_m_per_px
    }
}

impl<K: ResultSink> std::fmt::Debug for SimVisionSystem<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimVisionSystem")
            .field("config", &self.config)
            .field("horizontal_fov_deg", &self.horizontal_fov_deg)
            .field("vertical_fov_deg", &self.vertical_fov_deg)
            .field("targets", &self.targets.len())
            .finish_non_exhaustive()
    }
}
