//! Run configuration.
//!
//! `CenterConfig` is an immutable value handed to the simulation builder.  The
//! builder calls [`CenterConfig::validate`] before the first day advances, so
//! a malformed configuration never produces a partial run.
//!
//! The defaults mirror a four-LINAC center treating four patients per hour
//! per machine over a ten-hour day, with a two-hour extended day as the
//! overtime unit and two-hour breakdowns.

use crate::{RtcError, RtcResult};

/// Longest course length the case mix covers, in weeks.
pub const MAX_COURSE_WEEKS: usize = 6;

/// Allowed deviation of the case-mix total from 100 %.
pub const CASE_MIX_TOLERANCE: f64 = 0.01;

// ── CaseMix ───────────────────────────────────────────────────────────────────

/// Percentage of new patients assigned a 1, 2, … 6 week course.
///
/// Index 0 holds the 1-week share.  The configuration UI renormalises its
/// sliders before handing the mix over; the core only checks that the total
/// is 100 within [`CASE_MIX_TOLERANCE`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseMix(pub [f64; MAX_COURSE_WEEKS]);

impl CaseMix {
    /// Every patient gets a course of exactly `weeks` weeks.
    ///
    /// Fails with `InvalidConfiguration` unless `1 <= weeks <= MAX_COURSE_WEEKS`.
    pub fn single(weeks: usize) -> RtcResult<Self> {
        if !(1..=MAX_COURSE_WEEKS).contains(&weeks) {
            return Err(RtcError::invalid(
                "case_mix",
                format!("course length {weeks} is outside 1..={MAX_COURSE_WEEKS} weeks"),
            ));
        }
        let mut mix = [0.0; MAX_COURSE_WEEKS];
        mix[weeks - 1] = 100.0;
        Ok(CaseMix(mix))
    }

    pub fn weights(&self) -> &[f64; MAX_COURSE_WEEKS] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Expected course length in weeks.
    pub fn mean_weeks(&self) -> f64 {
        self.0
            .iter()
            .enumerate()
            .map(|(i, pct)| (i + 1) as f64 * pct / 100.0)
            .sum()
    }

    fn validate(&self) -> RtcResult<()> {
        if let Some((i, w)) = self.0.iter().enumerate().find(|(_, w)| !w.is_finite() || **w < 0.0) {
            return Err(RtcError::invalid(
                "case_mix",
                format!("weight for {} week(s) is {w}, expected a finite value >= 0", i + 1),
            ));
        }
        let total = self.total();
        if (total - 100.0).abs() > CASE_MIX_TOLERANCE {
            return Err(RtcError::invalid(
                "case_mix",
                format!("weights sum to {total}, expected 100 (±{CASE_MIX_TOLERANCE})"),
            ));
        }
        Ok(())
    }
}

impl Default for CaseMix {
    fn default() -> Self {
        CaseMix([10.0, 15.0, 20.0, 25.0, 20.0, 10.0])
    }
}

// ── ClosurePolicy ─────────────────────────────────────────────────────────────

/// Periodic center-wide closure: one working day every `interval_weeks`.
///
/// The closure falls on `weekday` of every week `w` with
/// `(w + 1) % interval_weeks == 0`, i.e. the last week of each block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClosurePolicy {
    pub interval_weeks: u64,
    /// 0 = first working day of the week, 4 = last.
    pub weekday: u64,
}

impl Default for ClosurePolicy {
    fn default() -> Self {
        Self { interval_weeks: 4, weekday: 4 }
    }
}

// ── CenterConfig ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CenterConfig {
    /// Number of treatment machines.  Must be ≥ 1.
    pub linac_count: u16,

    /// Throughput of one LINAC; converts hours into slot-units.  Must be > 0.
    pub patients_per_hour_per_linac: f64,

    /// Regular opening hours per LINAC per day.  Must be > 0.
    pub treatment_day_hours: f64,

    /// Extra hours one LINAC runs when overtime is enabled on it.
    pub overtime_hours_per_linac: f64,

    /// Run horizon in working weeks.  Must be ≥ 1.
    pub sim_weeks: u64,

    /// Intake batch size, delivered on the first day of every week.
    pub weekly_new_patients: u32,

    /// Length of one breakdown, spread over consecutive working days.
    pub breakdown_duration_hours: f64,

    /// Chance that a given LINAC breaks down during a given week.
    pub weekly_breakdown_probability: f64,

    /// Course-length distribution for new patients.
    pub case_mix: CaseMix,

    /// Backlog size above which the overtime controller adds capacity.
    pub backlog_overtime_threshold: usize,

    /// `None` disables periodic closures.
    pub closure: Option<ClosurePolicy>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            linac_count:                  4,
            patients_per_hour_per_linac:  4.0,
            treatment_day_hours:          10.0,
            overtime_hours_per_linac:     2.0,
            sim_weeks:                    52,
            weekly_new_patients:          40,
            breakdown_duration_hours:     2.0,
            weekly_breakdown_probability: 0.1,
            case_mix:                     CaseMix::default(),
            backlog_overtime_threshold:   10,
            closure:                      Some(ClosurePolicy::default()),
            seed:                         42,
        }
    }
}

impl CenterConfig {
    /// Check every field, reporting the first one that fails.
    pub fn validate(&self) -> RtcResult<()> {
        if self.linac_count < 1 {
            return Err(RtcError::invalid("linac_count", "must be at least 1"));
        }
        require_positive("patients_per_hour_per_linac", self.patients_per_hour_per_linac)?;
        require_positive("treatment_day_hours", self.treatment_day_hours)?;
        require_non_negative("overtime_hours_per_linac", self.overtime_hours_per_linac)?;
        if self.sim_weeks < 1 {
            return Err(RtcError::invalid("sim_weeks", "must be at least 1"));
        }
        require_non_negative("breakdown_duration_hours", self.breakdown_duration_hours)?;
        let p = self.weekly_breakdown_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(RtcError::invalid(
                "weekly_breakdown_probability",
                format!("is {p}, expected a probability in [0, 1]"),
            ));
        }
        self.case_mix.validate()?;
        if let Some(closure) = &self.closure {
            if closure.interval_weeks < 1 {
                return Err(RtcError::invalid("closure.interval_weeks", "must be at least 1"));
            }
            if closure.weekday >= crate::DAYS_PER_WEEK {
                return Err(RtcError::invalid(
                    "closure.weekday",
                    format!("is {}, expected 0..{}", closure.weekday, crate::DAYS_PER_WEEK),
                ));
            }
        }
        if self.base_slots_per_linac() == 0 {
            return Err(RtcError::invalid(
                "treatment_day_hours",
                "yields zero slot-units per LINAC at the configured patients per hour",
            ));
        }
        // Daily capacity is counted in u32 slot-units across the whole center.
        let pph = self.patients_per_hour_per_linac;
        let per_linac = (self.treatment_day_hours * pph).floor()
            + (self.overtime_hours_per_linac * pph).floor();
        let center = per_linac * f64::from(self.linac_count);
        if center > f64::from(u32::MAX) {
            return Err(RtcError::invalid(
                "patients_per_hour_per_linac",
                format!("gives {center} slot-units per day, more than {} fit", u32::MAX),
            ));
        }
        Ok(())
    }

    /// Regular slot-units one LINAC offers per day.
    pub fn base_slots_per_linac(&self) -> u32 {
        hours_to_slots(self.treatment_day_hours, self.patients_per_hour_per_linac)
    }

    /// Slot-units one LINAC adds when its overtime is enabled.
    pub fn overtime_slots_per_linac(&self) -> u32 {
        hours_to_slots(self.overtime_hours_per_linac, self.patients_per_hour_per_linac)
    }

    /// Upper bound on the pool's overtime slot-units.
    pub fn max_overtime_slots(&self) -> u32 {
        self.overtime_slots_per_linac().saturating_mul(u32::from(self.linac_count))
    }

    /// Total simulated days.
    pub fn horizon_days(&self) -> u64 {
        self.sim_weeks * crate::DAYS_PER_WEEK
    }
}

/// Whole slot-units that fit in `hours` at `per_hour` patients per hour.
fn hours_to_slots(hours: f64, per_hour: f64) -> u32 {
    let slots = (hours * per_hour).floor();
    if slots.is_finite() && slots > 0.0 { slots as u32 } else { 0 }
}

fn require_positive(field: &'static str, value: f64) -> RtcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RtcError::invalid(field, format!("is {value}, expected a finite value > 0")))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> RtcResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RtcError::invalid(field, format!("is {value}, expected a finite value >= 0")))
    }
}
