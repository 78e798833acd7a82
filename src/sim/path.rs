use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::Duration;

use crate::geo::{distance_meters, GeoPoint};

use super::config::{MotionConfig, MotionType};

/// Degrees of latitude/longitude per kilometer, the coarse conversion the
/// generators use for start offsets and circle radii.
const DEGREES_PER_KM: f64 = 0.009;

/// Meters per degree at the equator, used to express metric step sizes in
/// coordinate space.
const METERS_PER_DEGREE: f64 = 111_195.0;

/// A run is considered arrived once within this radius of the target.
pub const CONVERGENCE_RADIUS_METERS: f64 = 10.0;

/// One generated position plus the pause before the next one.
pub struct Sample {
    pub point: GeoPoint,
    pub delay: Duration,
}

/// Lazily generated trajectory toward a target. Each call to
/// [`MotionPath::next_sample`] advances the model one step; `None` marks
/// natural termination.
pub struct MotionPath {
    kind: PathKind,
}

enum PathKind {
    Linear(LinearPath),
    Curved(CurvedPath),
    RandomWalk(RandomWalkPath),
    Circular(CircularPath),
    Realistic(RealisticPath),
}

impl MotionPath {
    pub fn new(target: GeoPoint, config: &MotionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let kind = match config.motion_type {
            MotionType::Linear => PathKind::Linear(LinearPath::new(target, config, rng)),
            MotionType::Curved => PathKind::Curved(CurvedPath::new(target, config)),
            MotionType::RandomWalk => {
                PathKind::RandomWalk(RandomWalkPath::new(target, config, rng))
            }
            MotionType::Circular => PathKind::Circular(CircularPath::new(target, config, rng)),
            MotionType::Realistic => {
                PathKind::Realistic(RealisticPath::new(target, config, rng))
            }
        };

        Self { kind }
    }

    pub fn next_sample(&mut self) -> Option<Sample> {
        match &mut self.kind {
            PathKind::Linear(path) => path.next_sample(),
            PathKind::Curved(path) => path.next_sample(),
            PathKind::RandomWalk(path) => path.next_sample(),
            PathKind::Circular(path) => path.next_sample(),
            PathKind::Realistic(path) => path.next_sample(),
        }
    }
}

/// Start point offset from the target by `start_distance_km` along both
/// axes, shared by the linear and walk-style models.
fn offset_start(target: GeoPoint, start_distance_km: f64) -> GeoPoint {
    let offset_deg = start_distance_km * DEGREES_PER_KM;
    GeoPoint::new(target.lat + offset_deg, target.lon + offset_deg)
}

fn axis_noise(rng: &mut StdRng, noise_level: f64) -> f64 {
    symmetric_noise(rng, noise_level / 2.0)
}

fn symmetric_noise(rng: &mut StdRng, amplitude: f64) -> f64 {
    if amplitude == 0.0 {
        return 0.0;
    }
    rng.gen_range(-amplitude..=amplitude)
}

struct LinearPath {
    start: GeoPoint,
    target: GeoPoint,
    step: u32,
    step_count: u32,
    total_samples: u32,
    base_delay_ms: u64,
    noise_level: f64,
    has_stops: bool,
    stop_probability: f64,
    rng: StdRng,
}

impl LinearPath {
    fn new(target: GeoPoint, config: &MotionConfig, rng: StdRng) -> Self {
        let step_count = config.step_count.max(1);
        Self {
            start: offset_start(target, config.start_distance_km),
            target,
            step: 0,
            step_count,
            total_samples: step_count + 5,
            base_delay_ms: config.update_interval_ms,
            noise_level: config.noise_level,
            has_stops: config.has_stops,
            stop_probability: config.stop_probability,
            rng,
        }
    }

    fn next_sample(&mut self) -> Option<Sample> {
        if self.step >= self.total_samples {
            return None;
        }

        // Progress saturates at 1.0: the trailing samples hover at the
        // target with only noise applied.
        let progress = (f64::from(self.step) / f64::from(self.step_count)).min(1.0);
        let point = GeoPoint::new(
            self.start.lat
                + (self.target.lat - self.start.lat) * progress
                + axis_noise(&mut self.rng, self.noise_level),
            self.start.lon
                + (self.target.lon - self.start.lon) * progress
                + axis_noise(&mut self.rng, self.noise_level),
        );

        let mut delay_ms = self.base_delay_ms;
        if self.has_stops && self.rng.gen::<f64>() < self.stop_probability {
            delay_ms *= 2;
        }

        self.step += 1;
        Some(Sample {
            point,
            delay: Duration::from_millis(delay_ms),
        })
    }
}

struct CurvedPath {
    start: GeoPoint,
    control: GeoPoint,
    target: GeoPoint,
    step: u32,
    step_count: u32,
    total_samples: u32,
    base_delay_ms: u64,
}

impl CurvedPath {
    fn new(target: GeoPoint, config: &MotionConfig) -> Self {
        let offset_deg = config.start_distance_km * DEGREES_PER_KM;
        // Side-offset start so the approach sweeps in rather than heading
        // straight at the target.
        let start = GeoPoint::new(target.lat + offset_deg, target.lon - offset_deg);
        let mid = GeoPoint::new(
            (start.lat + target.lat) / 2.0,
            (start.lon + target.lon) / 2.0,
        );
        let control = GeoPoint::new(mid.lat + offset_deg / 2.0, mid.lon + offset_deg / 2.0);

        let step_count = config.step_count.max(1);
        Self {
            start,
            control,
            target,
            step: 0,
            step_count,
            total_samples: step_count + 5,
            base_delay_ms: config.update_interval_ms,
        }
    }

    fn next_sample(&mut self) -> Option<Sample> {
        if self.step >= self.total_samples {
            return None;
        }

        let t = (f64::from(self.step) / f64::from(self.step_count)).min(1.0);
        let point = GeoPoint::new(
            quadratic_bezier(self.start.lat, self.control.lat, self.target.lat, t),
            quadratic_bezier(self.start.lon, self.control.lon, self.target.lon, t),
        );

        self.step += 1;
        Some(Sample {
            point,
            delay: Duration::from_millis(self.base_delay_ms),
        })
    }
}

fn quadratic_bezier(start: f64, control: f64, end: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * start + 2.0 * u * t * control + t * t * end
}

struct RandomWalkPath {
    position: GeoPoint,
    target: GeoPoint,
    step: u32,
    max_samples: u32,
    base_delay_ms: u64,
    noise_level: f64,
    rng: StdRng,
}

impl RandomWalkPath {
    fn new(target: GeoPoint, config: &MotionConfig, rng: StdRng) -> Self {
        let step_count = config.step_count.max(1);
        Self {
            position: offset_start(target, config.start_distance_km),
            target,
            step: 0,
            max_samples: step_count * 2,
            base_delay_ms: config.update_interval_ms,
            noise_level: config.noise_level,
            rng,
        }
    }

    fn next_sample(&mut self) -> Option<Sample> {
        if self.step >= self.max_samples {
            return None;
        }
        if distance_meters(self.position, self.target) <= CONVERGENCE_RADIUS_METERS {
            return None;
        }

        // 70% of the remaining vector, then a bounded perturbation.
        self.position = GeoPoint::new(
            self.position.lat
                + 0.7 * (self.target.lat - self.position.lat)
                + symmetric_noise(&mut self.rng, self.noise_level),
            self.position.lon
                + 0.7 * (self.target.lon - self.position.lon)
                + symmetric_noise(&mut self.rng, self.noise_level),
        );

        self.step += 1;
        Some(Sample {
            point: self.position,
            delay: Duration::from_millis(self.base_delay_ms),
        })
    }
}

struct CircularPath {
    target: GeoPoint,
    radius_deg: f64,
    step: u32,
    circle_samples: u32,
    closeout_samples: u32,
    closeout_from: GeoPoint,
    base_delay_ms: u64,
    noise_level: f64,
    rng: StdRng,
}

impl CircularPath {
    fn new(target: GeoPoint, config: &MotionConfig, rng: StdRng) -> Self {
        let radius_deg = config.start_distance_km / 2.0 * DEGREES_PER_KM;
        let step_count = config.step_count.max(1);
        let circle_samples = step_count + 10;
        Self {
            target,
            radius_deg,
            step: 0,
            circle_samples,
            closeout_samples: 5,
            // Overwritten with the real hand-off point when the sweep ends.
            closeout_from: target,
            base_delay_ms: config.update_interval_ms,
            noise_level: config.noise_level,
            rng,
        }
    }

    fn circle_point(&self, index: u32) -> GeoPoint {
        let angle =
            std::f64::consts::TAU * f64::from(index) / f64::from(self.circle_samples);
        GeoPoint::new(
            self.target.lat + self.radius_deg * angle.cos(),
            self.target.lon + self.radius_deg * angle.sin(),
        )
    }

    fn next_sample(&mut self) -> Option<Sample> {
        let total = self.circle_samples + self.closeout_samples;
        if self.step >= total {
            return None;
        }

        let point = if self.step < self.circle_samples {
            let point = self.circle_point(self.step);
            if self.step + 1 == self.circle_samples {
                self.closeout_from = point;
            }
            point
        } else {
            // Short linear run from the last circle point to the target.
            let closeout_step = self.step - self.circle_samples + 1;
            let t = f64::from(closeout_step) / f64::from(self.closeout_samples);
            GeoPoint::new(
                self.closeout_from.lat
                    + (self.target.lat - self.closeout_from.lat) * t
                    + axis_noise(&mut self.rng, self.noise_level),
                self.closeout_from.lon
                    + (self.target.lon - self.closeout_from.lon) * t
                    + axis_noise(&mut self.rng, self.noise_level),
            )
        };

        self.step += 1;
        Some(Sample {
            point,
            delay: Duration::from_millis(self.base_delay_ms),
        })
    }
}

struct RealisticPath {
    position: GeoPoint,
    target: GeoPoint,
    step: u32,
    max_samples: u32,
    base_delay_ms: u64,
    rng: StdRng,
}

/// GPS-like jitter of roughly five meters, in degrees.
const GPS_NOISE_DEG: f64 = 5.0 / METERS_PER_DEGREE;

impl RealisticPath {
    fn new(target: GeoPoint, config: &MotionConfig, rng: StdRng) -> Self {
        let step_count = config.step_count.max(1);
        Self {
            position: offset_start(target, config.start_distance_km),
            target,
            step: 0,
            max_samples: step_count + 10,
            base_delay_ms: config.update_interval_ms,
            rng,
        }
    }

    /// Step size shrinks as the target gets closer, walking-pace bands.
    fn step_size_meters(remaining_meters: f64) -> f64 {
        if remaining_meters > 1000.0 {
            250.0
        } else if remaining_meters > 200.0 {
            60.0
        } else {
            15.0
        }
    }

    fn next_delay_ms(&mut self) -> u64 {
        // 10% long stop, 20% short stop, 30% hurried, 40% steady.
        let roll = self.rng.gen::<f64>();
        if roll < 0.10 {
            self.base_delay_ms * 3
        } else if roll < 0.30 {
            self.base_delay_ms * 2
        } else if roll < 0.60 {
            self.base_delay_ms / 2
        } else {
            self.base_delay_ms
        }
    }

    fn next_sample(&mut self) -> Option<Sample> {
        if self.step >= self.max_samples {
            return None;
        }

        let remaining = distance_meters(self.position, self.target);
        if remaining <= CONVERGENCE_RADIUS_METERS {
            return None;
        }

        let fraction = (Self::step_size_meters(remaining) / remaining).min(1.0);
        self.position = GeoPoint::new(
            self.position.lat
                + (self.target.lat - self.position.lat) * fraction
                + self.rng.gen_range(-GPS_NOISE_DEG..=GPS_NOISE_DEG),
            self.position.lon
                + (self.target.lon - self.position.lon) * fraction
                + self.rng.gen_range(-GPS_NOISE_DEG..=GPS_NOISE_DEG),
        );

        self.step += 1;
        let delay_ms = self.next_delay_ms();
        Some(Sample {
            point: self.position,
            delay: Duration::from_millis(delay_ms),
        })
    }
}
