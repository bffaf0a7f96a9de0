//! `CapacityPool` — every LINAC in the center and their combined capacity.
//!
//! The pool is mutated by exactly two parties: the overtime controller
//! (overtime flags, one LINAC per call) and the disruption phase
//! (suspensions, cleared and re-applied every day).

use rtc_core::{CenterConfig, LinacId};

use crate::{Linac, Suspension};

#[derive(Clone, Debug)]
pub struct CapacityPool {
    linacs: Vec<Linac>,
}

impl CapacityPool {
    /// `count` identical LINACs.
    pub fn new(count: u16, base_slots: u32, overtime_slots: u32) -> Self {
        let linacs = (0..count)
            .map(|i| Linac::new(LinacId(i), base_slots, overtime_slots))
            .collect();
        Self { linacs }
    }

    /// Build the pool described by a (validated) configuration.
    pub fn from_config(config: &CenterConfig) -> Self {
        Self::new(
            config.linac_count,
            config.base_slots_per_linac(),
            config.overtime_slots_per_linac(),
        )
    }

    pub fn linacs(&self) -> &[Linac] {
        &self.linacs
    }

    pub fn linac(&self, id: LinacId) -> Option<&Linac> {
        self.linacs.get(id.index())
    }

    pub fn linac_count(&self) -> usize {
        self.linacs.len()
    }

    // ── Totals ────────────────────────────────────────────────────────────

    /// Slot-units usable today (base + overtime − suspensions).
    pub fn total_slots(&self) -> u32 {
        self.linacs
            .iter()
            .fold(0, |total: u32, l| total.saturating_add(l.available_slots()))
    }

    /// Overtime slot-units currently enabled, ignoring suspensions.
    ///
    /// Always a multiple of the per-LINAC contribution and never above
    /// `linac_count × contribution`.
    pub fn overtime_slots(&self) -> u32 {
        self.linacs
            .iter()
            .filter(|l| l.overtime_enabled)
            .fold(0, |total: u32, l| total.saturating_add(l.overtime_slots))
    }

    pub fn overtime_linac_count(&self) -> usize {
        self.linacs.iter().filter(|l| l.overtime_enabled).count()
    }

    pub fn all_overtime_enabled(&self) -> bool {
        self.linacs.iter().all(|l| l.overtime_enabled)
    }

    pub fn suspended_linac_count(&self) -> usize {
        self.linacs.iter().filter(|l| l.suspension.is_some()).count()
    }

    // ── Overtime ──────────────────────────────────────────────────────────

    /// Turn overtime on for the lowest-numbered LINAC that lacks it.
    ///
    /// Returns the LINAC changed, or `None` if every LINAC already has it.
    pub fn enable_overtime_on_next(&mut self) -> Option<LinacId> {
        let linac = self.linacs.iter_mut().find(|l| !l.overtime_enabled)?;
        linac.overtime_enabled = true;
        Some(linac.id)
    }

    /// Turn overtime off for the highest-numbered LINAC that has it.
    pub fn disable_overtime_on_last(&mut self) -> Option<LinacId> {
        let linac = self.linacs.iter_mut().rev().find(|l| l.overtime_enabled)?;
        linac.overtime_enabled = false;
        Some(linac.id)
    }

    // ── Suspensions ───────────────────────────────────────────────────────

    /// Suspend `id` for today, merging with any suspension already applied.
    ///
    /// Returns the effective suspension, or `None` for an unknown LINAC.
    pub fn suspend(&mut self, id: LinacId, suspension: Suspension) -> Option<Suspension> {
        let linac = self.linacs.get_mut(id.index())?;
        let merged = match linac.suspension {
            Some(existing) => existing.merge(suspension),
            None => suspension,
        };
        linac.suspension = Some(merged);
        Some(merged)
    }

    /// Suspend every LINAC for today, e.g. for a center-wide closure.
    pub fn suspend_all(&mut self, suspension: Suspension) {
        for linac in &mut self.linacs {
            linac.suspension = Some(match linac.suspension {
                Some(existing) => existing.merge(suspension),
                None => suspension,
            });
        }
    }

    pub fn clear_suspensions(&mut self) {
        for linac in &mut self.linacs {
            linac.suspension = None;
        }
    }
}
