//! The frame driver: owns every category pool, the trail budget, rockets
//! in flight and the packed draw data.

use crate::category::Category;
use crate::config::SimulationConfig;
use crate::emission;
use crate::particle::{ParticleInstance, ParticlePool, ParticleSpawn};
use crate::rand::ParticleRng;
use crate::recipe::{FireworkComponent, Recipe};
use crate::rocket::Rocket;
use crate::trail::Trail;
use log::{debug, info, trace};
use sparkle_core::{Result, SparkleError, Vec3};
use sparkle_runtime::RuntimeSystem;
use std::ops::Range;

/// Summary of one `update` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Live particles per category, indexed by `Category::index`
    pub active: [usize; Category::COUNT],
    pub expired: usize,
    pub trails_released: usize,
    pub rockets_exploded: usize,
    /// Particles added by rocket explosions this frame
    pub particles_emitted: usize,
}

impl FrameReport {
    pub fn total_active(&self) -> usize {
        self.active.iter().sum()
    }

    pub fn active_in(&self, category: Category) -> usize {
        self.active[category.index()]
    }
}

/// Draw data for one category, consumed by the renderer
pub struct DrawBatch<'a> {
    pub category: Category,
    pub instances: &'a [ParticleInstance],
}

/// A live trail together with the particle it follows
pub struct TrailView<'a> {
    pub category: Category,
    /// Slot of the owning particle in its pool
    pub slot: usize,
    /// Current position of the owning particle
    pub head: Vec3,
    pub trail: &'a Trail,
}

/// Pooled firework simulation. Implements `RuntimeSystem` so a frame loop
/// can drive it alongside other systems.
pub struct ParticleSystem {
    config: SimulationConfig,
    pools: Vec<ParticlePool>,
    rng: ParticleRng,
    /// Accumulated simulation time in seconds; drives trail updates
    now: f64,
    live_trails: usize,
    rockets: Vec<Rocket>,
    /// Pre-allocated instance buffer for packing live particles
    instance_buffer: Vec<ParticleInstance>,
    instance_ranges: [Range<usize>; Category::COUNT],
    /// Sparks behind every rocket in flight, packed alongside the particles
    ascent_buffer: Vec<ParticleInstance>,
    disposed: bool,
}

impl ParticleSystem {
    /// Validate `config` and allocate every pool up front
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        let pools = Category::ALL
            .iter()
            .map(|&category| ParticlePool::new(category, config.max_particles))
            .collect();
        info!(
            "particle system created: {} categories x {} slots, trail budget {}",
            Category::COUNT,
            config.max_particles,
            config.trail_budget()
        );
        Self {
            rng: ParticleRng::new(config.seed),
            instance_buffer: Vec::with_capacity(config.max_particles),
            config,
            pools,
            now: 0.0,
            live_trails: 0,
            rockets: Vec::new(),
            instance_ranges: std::array::from_fn(|_| 0..0),
            ascent_buffer: Vec::new(),
            disposed: false,
        }
    }

    /// Emit one particle into its category pool.
    ///
    /// Returns the slot index, or `None` when the spawn is invalid, the pool
    /// is full, or the system has been disposed. A trail is attached only
    /// while the system-wide trail budget has room.
    pub fn add_particle(&mut self, spawn: &ParticleSpawn) -> Option<usize> {
        if self.disposed {
            trace!("spawn after dispose dropped");
            return None;
        }
        if !spawn.is_valid() {
            trace!("invalid spawn dropped: {spawn:?}");
            return None;
        }
        let index = spawn.category.index();
        if self.pools[index].is_full() {
            trace!("{} pool full, spawn dropped", spawn.category);
            return None;
        }

        let trail = (spawn.trail && self.live_trails < self.config.trail_budget())
            .then(|| Trail::new(spawn.position, self.now, &self.config.trail));
        let attached = trail.is_some();

        let slot = self.pools[index].add(spawn, trail)?;
        if attached {
            self.live_trails += 1;
        }
        Some(slot)
    }

    /// Explode one component at `origin`. Returns the number of particles
    /// actually added; rejected spawns are dropped.
    pub fn explode(&mut self, origin: Vec3, component: &FireworkComponent) -> usize {
        let spawns = emission::burst_spawns(origin, component, &self.config, &mut self.rng);
        let requested = spawns.len();
        let added = spawns
            .iter()
            .filter(|spawn| self.add_particle(spawn).is_some())
            .count();
        debug!(
            "{} burst at ({:.1}, {:.1}): {added}/{requested} particles into {}",
            component.pattern, origin.x, origin.y, component.shape
        );
        added
    }

    /// Launch a rocket carrying `recipe` from `(x, y)`.
    ///
    /// The explosion height is drawn from the configured range.
    pub fn launch(&mut self, x: f32, y: f32, recipe: &Recipe) -> Result<()> {
        if recipe.components.is_empty() {
            return Err(SparkleError::EmptyRecipe(recipe.name.clone()));
        }
        if self.disposed {
            trace!("launch after dispose dropped");
            return Ok(());
        }
        let target_y = self
            .rng
            .range(self.config.min_explosion_y, self.config.max_explosion_y);
        debug!(
            "launched '{}' from ({x:.1}, {y:.1}) with {} trail, bursts at y={target_y:.1}",
            recipe.name, recipe.trail_effect
        );
        self.rockets.push(Rocket::new(
            x,
            y,
            target_y,
            recipe.components.clone(),
            recipe.trail_effect,
        ));
        Ok(())
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Rockets move first, so particles from this frame's explosions are
    /// integrated in the same frame. Draw data is repacked at the end.
    pub fn update(&mut self, dt: f32) -> FrameReport {
        let mut report = FrameReport::default();
        if self.disposed {
            return report;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.now += f64::from(dt);

        self.advance_rockets(dt, &mut report);

        let trail_config = &self.config.trail;
        for pool in &mut self.pools {
            let step = pool.update(dt, self.now, trail_config);
            report.expired += step.expired;
            report.trails_released += step.trails_released;
            report.active[pool.category().index()] = pool.active_count();
        }
        self.live_trails = self.live_trails.saturating_sub(report.trails_released);

        if report.expired > 0 {
            debug!(
                "{} particles expired, {} trails released, {} live",
                report.expired,
                report.trails_released,
                report.total_active()
            );
        }

        self.pack_instances();
        report
    }

    fn advance_rockets(&mut self, dt: f32, report: &mut FrameReport) {
        let speed = self.config.ascent_speed;
        for mut rocket in std::mem::take(&mut self.rockets) {
            if !rocket.ascend(dt, speed, self.now, &mut self.rng) {
                self.rockets.push(rocket);
                continue;
            }
            let (position, components) = rocket.into_payload();
            for component in &components {
                report.particles_emitted += self.explode(position, component);
            }
            report.rockets_exploded += 1;
        }
    }

    /// Pack live particles of every category into one contiguous buffer
    fn pack_instances(&mut self) {
        self.instance_buffer.clear();
        for pool in &self.pools {
            let start = self.instance_buffer.len();
            self.instance_buffer
                .extend(pool.live().iter().map(ParticleInstance::from_particle));
            self.instance_ranges[pool.category().index()] = start..self.instance_buffer.len();
        }

        self.ascent_buffer.clear();
        self.ascent_buffer.extend(
            self.rockets
                .iter()
                .flat_map(|rocket| rocket.trail().sparks())
                .map(ParticleInstance::from_spark),
        );
    }

    /// Drop every particle, trail and rocket. The system stays usable.
    pub fn clear(&mut self) {
        let released: usize = self.pools.iter_mut().map(ParticlePool::clear).sum();
        self.live_trails = 0;
        self.rockets.clear();
        self.instance_buffer.clear();
        self.instance_ranges = std::array::from_fn(|_| 0..0);
        self.ascent_buffer.clear();
        debug!("cleared, {released} trails released");
    }

    /// Release all storage. Afterwards every emission is rejected and
    /// `update` does nothing. Calling it again is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.clear();
        for pool in &mut self.pools {
            pool.release_storage();
        }
        self.rockets = Vec::new();
        self.instance_buffer = Vec::new();
        self.ascent_buffer = Vec::new();
        self.disposed = true;
        info!("particle system disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulation time accumulated by `update`
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn active_count(&self, category: Category) -> usize {
        self.pools[category.index()].active_count()
    }

    pub fn total_active(&self) -> usize {
        self.pools.iter().map(ParticlePool::active_count).sum()
    }

    pub fn pool(&self, category: Category) -> &ParticlePool {
        &self.pools[category.index()]
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    /// Trails currently attached to live particles
    pub fn live_trail_count(&self) -> usize {
        self.live_trails
    }

    /// Packed instance data as of the last `update`
    pub fn instance_data(&self) -> &[ParticleInstance] {
        &self.instance_buffer
    }

    /// Ascent sparks of every rocket in flight, as of the last `update`
    pub fn ascent_instances(&self) -> &[ParticleInstance] {
        &self.ascent_buffer
    }

    /// Ascent sparks currently alive
    pub fn live_spark_count(&self) -> usize {
        self.rockets.iter().map(|rocket| rocket.trail().len()).sum()
    }

    /// One batch per category with live particles, as of the last `update`
    pub fn draw_batches(&self) -> Vec<DrawBatch<'_>> {
        Category::ALL
            .iter()
            .filter_map(|&category| {
                let range = self.instance_ranges[category.index()].clone();
                (!range.is_empty()).then(|| DrawBatch {
                    category,
                    instances: &self.instance_buffer[range],
                })
            })
            .collect()
    }

    /// Every live trail in pool order
    pub fn trails(&self) -> impl Iterator<Item = TrailView<'_>> {
        self.pools.iter().flat_map(|pool| {
            pool.live().iter().enumerate().filter_map(move |(slot, p)| {
                p.trail.as_deref().map(|trail| TrailView {
                    category: pool.category(),
                    slot,
                    head: p.position,
                    trail,
                })
            })
        })
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::build(SimulationConfig::default())
    }
}

impl RuntimeSystem for ParticleSystem {
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        ParticleSystem::update(self, dt as f32);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.dispose();
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
