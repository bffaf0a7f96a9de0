//! Fluent builder for constructing a [`Sim`].

use rtc_capacity::CapacityPool;
use rtc_core::{CenterConfig, Day, SimClock, SimRng};
use rtc_disruption::{BreakdownGenerator, ClosureGenerator, DisruptionCalendar, DisruptionGenerator};
use rtc_patient::{Backlog, PatientIntake};

use crate::sim::DisruptionTotals;
use crate::{OvertimeController, Phase, Sim, SimResult, TreatmentScheduler, WakeQueue};

/// Seed offsets for the per-concern RNG streams.
const INTAKE_STREAM:     u64 = 1;
const DISRUPTION_STREAM: u64 = 2;

/// Fluent builder for [`Sim`].
///
/// # Generators
///
/// | Source                          | Added when                               |
/// |---------------------------------|------------------------------------------|
/// | [`BreakdownGenerator`]          | probability and duration both positive   |
/// | [`ClosureGenerator`]            | `config.closure` is `Some`               |
/// | `.generator(g)`                 | always, after the two above              |
///
/// `.without_default_generators()` drops the first two rows.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .generator(Box::new(MyOutageSource::new()))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:     CenterConfig,
    defaults:   bool,
    generators: Vec<Box<dyn DisruptionGenerator>>,
}

impl SimBuilder {
    pub fn new(config: CenterConfig) -> Self {
        Self {
            config,
            defaults:   true,
            generators: Vec::new(),
        }
    }

    /// Add a disruption generator on top of the configured ones.
    pub fn generator(mut self, generator: Box<dyn DisruptionGenerator>) -> Self {
        self.generators.push(generator);
        self
    }

    /// Do not derive breakdown and closure generators from the config.
    pub fn without_default_generators(mut self) -> Self {
        self.defaults = false;
        self
    }

    /// Validate the configuration, seed the wake queue and return a
    /// ready-to-run [`Sim`].
    ///
    /// Nothing is simulated when validation fails.
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        config.validate()?;
        let intake = PatientIntake::new(config.weekly_new_patients, &config.case_mix)?;

        // ── Generators ────────────────────────────────────────────────────
        let mut generators: Vec<Box<dyn DisruptionGenerator>> = Vec::new();
        if self.defaults {
            let breakdowns = BreakdownGenerator::from_config(&config);
            if breakdowns.is_active() {
                generators.push(Box::new(breakdowns));
            }
            if let Some(policy) = config.closure {
                generators.push(Box::new(ClosureGenerator::new(policy)));
            }
        }
        generators.extend(self.generators);

        // ── Initial wake queue ────────────────────────────────────────────
        let mut wake_queue = WakeQueue::new();
        for (index, generator) in generators.iter().enumerate() {
            if let Some(day) = generator.first_wake() {
                wake_queue.push(day, Phase::Generator(index));
            }
        }
        for phase in Phase::DAILY {
            wake_queue.push(Day::ZERO, phase);
        }
        wake_queue.push(Day::ZERO, Phase::Intake);

        let mut root = SimRng::new(config.seed);
        let intake_rng = root.child(INTAKE_STREAM);
        let disruption_rng = root.child(DISRUPTION_STREAM);

        log::info!(
            "center: {} LINACs × {} slot-units (+{} overtime), {} patients/week over {} weeks, {} disruption generators",
            config.linac_count,
            config.base_slots_per_linac(),
            config.overtime_slots_per_linac(),
            config.weekly_new_patients,
            config.sim_weeks,
            generators.len(),
        );

        Ok(Sim {
            clock:     SimClock::new(config.sim_weeks),
            pool:      CapacityPool::from_config(&config),
            backlog:   Backlog::new(),
            active:    Vec::new(),
            completed: Vec::new(),
            intake,
            scheduler: TreatmentScheduler::new(),
            overtime:  OvertimeController::new(config.backlog_overtime_threshold),
            generators,
            calendar:  DisruptionCalendar::new(),
            wake_queue,
            intake_rng,
            disruption_rng,
            disruptions: DisruptionTotals::default(),
            max_backlog: 0,
            config,
        })
    }
}
