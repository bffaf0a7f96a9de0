//! Unit tests for rtc-capacity.

#[cfg(test)]
mod linac_tests {
    use rtc_core::LinacId;

    use crate::{Linac, Suspension};

    #[test]
    fn overtime_adds_slots() {
        let mut l = Linac::new(LinacId(0), 8, 2);
        assert_eq!(l.available_slots(), 8);
        l.overtime_enabled = true;
        assert_eq!(l.available_slots(), 10);
        assert!(!l.is_overtime_slot(7));
        assert!(l.is_overtime_slot(8));
    }

    #[test]
    fn partial_suspension_caps_at_offered() {
        let mut l = Linac::new(LinacId(0), 8, 2);
        l.suspension = Some(Suspension::Partial(3));
        assert_eq!(l.lost_slots(), 3);
        assert_eq!(l.available_slots(), 5);
        assert!(!l.is_fully_suspended());

        l.suspension = Some(Suspension::Partial(50));
        assert_eq!(l.available_slots(), 0);
        assert!(l.is_fully_suspended());
    }

    #[test]
    fn overlapping_suspensions_collapse() {
        assert_eq!(Suspension::Partial(2).merge(Suspension::Partial(5)), Suspension::Partial(5));
        assert_eq!(Suspension::Partial(2).merge(Suspension::Full), Suspension::Full);
        assert_eq!(Suspension::Full.merge(Suspension::Partial(1)), Suspension::Full);
    }
}

#[cfg(test)]
mod pool_tests {
    use rtc_core::{CenterConfig, LinacId};

    use crate::{CapacityPool, Suspension};

    #[test]
    fn built_from_config() {
        let cfg = CenterConfig {
            linac_count: 2,
            patients_per_hour_per_linac: 1.0,
            treatment_day_hours: 8.0,
            ..CenterConfig::default()
        };
        let pool = CapacityPool::from_config(&cfg);
        assert_eq!(pool.linac_count(), 2);
        assert_eq!(pool.total_slots(), 16);
        assert_eq!(pool.overtime_slots(), 0);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let mut pool = CapacityPool::new(2, u32::MAX, 4);
        assert_eq!(pool.total_slots(), u32::MAX);
        pool.enable_overtime_on_next();
        pool.enable_overtime_on_next();
        assert_eq!(pool.linac(LinacId(0)).unwrap().available_slots(), u32::MAX);
        assert_eq!(pool.overtime_slots(), 8);
        assert_eq!(pool.total_slots(), u32::MAX);
    }

    #[test]
    fn closure_suspends_every_linac() {
        let mut pool = CapacityPool::new(3, 8, 2);
        pool.suspend(LinacId(1), Suspension::Partial(3));
        pool.suspend_all(Suspension::Full);
        assert_eq!(pool.total_slots(), 0);
        assert_eq!(pool.suspended_linac_count(), 3);
        pool.clear_suspensions();
        assert_eq!(pool.total_slots(), 24);
    }

    #[test]
    fn overtime_toggles_one_linac_at_a_time() {
        let mut pool = CapacityPool::new(3, 8, 2);
        assert_eq!(pool.enable_overtime_on_next(), Some(LinacId(0)));
        assert_eq!(pool.overtime_slots(), 2);
        assert_eq!(pool.enable_overtime_on_next(), Some(LinacId(1)));
        assert_eq!(pool.enable_overtime_on_next(), Some(LinacId(2)));
        assert!(pool.all_overtime_enabled());
        assert_eq!(pool.enable_overtime_on_next(), None);
        assert_eq!(pool.overtime_slots(), 6);

        assert_eq!(pool.disable_overtime_on_last(), Some(LinacId(2)));
        assert_eq!(pool.overtime_linac_count(), 2);
        assert_eq!(pool.total_slots(), 28);
    }

    #[test]
    fn disable_without_overtime_is_noop() {
        let mut pool = CapacityPool::new(2, 8, 2);
        assert_eq!(pool.disable_overtime_on_last(), None);
        assert_eq!(pool.overtime_slots(), 0);
    }

    #[test]
    fn suspensions_merge_and_clear() {
        let mut pool = CapacityPool::new(2, 8, 2);
        assert_eq!(pool.suspend(LinacId(1), Suspension::Partial(3)), Some(Suspension::Partial(3)));
        assert_eq!(pool.suspend(LinacId(1), Suspension::Partial(2)), Some(Suspension::Partial(3)));
        assert_eq!(pool.total_slots(), 13);
        assert_eq!(pool.suspended_linac_count(), 1);

        assert_eq!(pool.suspend(LinacId(0), Suspension::Full), Some(Suspension::Full));
        assert_eq!(pool.total_slots(), 5);

        pool.clear_suspensions();
        assert_eq!(pool.total_slots(), 16);
        assert_eq!(pool.suspended_linac_count(), 0);
    }

    #[test]
    fn unknown_linac_not_suspended() {
        let mut pool = CapacityPool::new(1, 8, 2);
        assert_eq!(pool.suspend(LinacId(5), Suspension::Full), None);
    }
}

#[cfg(test)]
mod allocator_tests {
    use rtc_core::LinacId;

    use crate::{CapacityPool, SlotAllocator, Suspension};

    #[test]
    fn fills_linacs_in_order() {
        let pool = CapacityPool::new(2, 2, 1);
        let mut alloc = SlotAllocator::new(&pool);
        let linacs: Vec<_> = (0..4).map(|_| alloc.assign(None).unwrap().linac).collect();
        assert_eq!(linacs, [LinacId(0), LinacId(0), LinacId(1), LinacId(1)]);
        assert_eq!(alloc.assign(None), None);
        assert_eq!(alloc.free_slots(), 0);
        assert_eq!(alloc.used_slots(), 4);
    }

    #[test]
    fn preferred_linac_kept_when_free() {
        let pool = CapacityPool::new(2, 2, 1);
        let mut alloc = SlotAllocator::new(&pool);
        assert_eq!(alloc.assign(Some(LinacId(1))).unwrap().linac, LinacId(1));
        assert_eq!(alloc.assign(Some(LinacId(1))).unwrap().linac, LinacId(1));
        // LINAC 1 is full: fall back to the first LINAC with room.
        assert_eq!(alloc.assign(Some(LinacId(1))).unwrap().linac, LinacId(0));
    }

    #[test]
    fn overtime_slots_flagged() {
        let mut pool = CapacityPool::new(1, 2, 1);
        pool.enable_overtime_on_next();
        let mut alloc = SlotAllocator::new(&pool);
        let flags: Vec<bool> = (0..3).map(|_| alloc.assign(None).unwrap().overtime).collect();
        assert_eq!(flags, [false, false, true]);
    }

    #[test]
    fn suspended_linac_gets_nothing() {
        let mut pool = CapacityPool::new(2, 2, 1);
        pool.suspend(LinacId(0), Suspension::Full);
        let mut alloc = SlotAllocator::new(&pool);
        assert_eq!(alloc.free_slots(), 2);
        assert_eq!(alloc.assign(Some(LinacId(0))).unwrap().linac, LinacId(1));
    }
}
