//! Spring-driven animation.
//!
//! Springs are integrated in fixed 1 ms steps so the motion does not depend
//! on the frame rate that drives them.

const STEP_MS: f64 = 1.0;

/// Physical parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Stiffness.
    pub tension: f64,
    /// Damping.
    pub friction: f64,
    /// Mass of the animated value.
    pub mass: f64,
    /// Distance from the target under which the spring may settle.
    pub precision: f64,
}

impl SpringConfig {
    /// Create a config with unit mass.
    pub const fn new(tension: f64, friction: f64) -> Self {
        Self {
            tension,
            friction,
            mass: 1.0,
            precision: 0.001,
        }
    }

    /// Quick, heavily damped motion used for data transitions.
    pub const GENTLE: Self = Self::new(200.0, 50.0);
    /// Slow motion used for the line-drawing reveal.
    pub const SLOW: Self = Self::new(20.0, 10.0);
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(170.0, 26.0)
    }
}

/// A damped spring moving a scalar towards a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
    delay_ms: f64,
    settled: bool,
}

impl Spring {
    /// Create a spring resting at `from` that will move towards `to`.
    pub fn new(config: SpringConfig, from: f64, to: f64) -> Self {
        Self {
            config,
            position: from,
            velocity: 0.0,
            target: to,
            delay_ms: 0.0,
            settled: from == to,
        }
    }

    /// Hold the spring still for `delay_ms` before it starts moving.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.position
    }

    /// Whether the spring has come to rest on its target.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Jump to the target and stop.
    pub fn finish(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.delay_ms = 0.0;
        self.settled = true;
    }

    /// Advance the simulation by `dt_ms` milliseconds.
    ///
    /// Returns `true` while the spring is still waiting or moving.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.settled {
            return false;
        }
        let mut remaining = dt_ms.max(0.0);
        if self.delay_ms > 0.0 {
            let waited = self.delay_ms.min(remaining);
            self.delay_ms -= waited;
            remaining -= waited;
            if self.delay_ms > 0.0 {
                return true;
            }
        }

        let SpringConfig {
            tension,
            friction,
            mass,
            precision,
        } = self.config;
        let rest_velocity = precision / 10.0;
        let steps = (remaining / STEP_MS).ceil() as usize;
        for _ in 0..steps {
            if self.velocity.abs() <= rest_velocity
                && (self.target - self.position).abs() <= precision
            {
                self.finish();
                return false;
            }
            let spring_force = -tension * 0.000_001 * (self.position - self.target);
            let damping_force = -friction * 0.001 * self.velocity;
            let acceleration = (spring_force + damping_force) / mass;
            self.velocity += acceleration * STEP_MS;
            self.position += self.velocity * STEP_MS;
        }
        true
    }
}

/// Normalized 0 to 1 progress driven by a spring.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    config: SpringConfig,
    delay_ms: f64,
    spring: Spring,
}

impl Tween {
    /// Create a tween that starts at 0 and springs towards 1.
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            delay_ms: 0.0,
            spring: Spring::new(config, 0.0, 1.0),
        }
    }

    /// Delay the start of the tween.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self.spring = self.spring.with_delay(delay_ms);
        self
    }

    /// A tween that has already completed.
    pub fn finished(config: SpringConfig) -> Self {
        let mut tween = Self::new(config);
        tween.finish();
        tween
    }

    /// Progress clamped to `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.spring.value().clamp(0.0, 1.0) as f32
    }

    /// Whether the tween reached its end.
    pub fn is_finished(&self) -> bool {
        self.spring.is_settled()
    }

    /// Start again from 0, including the initial delay.
    pub fn restart(&mut self) {
        self.spring = Spring::new(self.config, 0.0, 1.0).with_delay(self.delay_ms);
    }

    /// Jump to the end.
    pub fn finish(&mut self) {
        self.spring.finish();
    }

    /// Advance by `dt_ms` milliseconds. Returns `true` while running.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.spring.advance(dt_ms)
    }
}
