use bevy::prelude::*;
use std::fmt;

/// Eight named lunar phases, new moon first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    #[default]
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Phases in cycle order.
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Classify `day_progress` into one of eight equal slices of the cycle.
    ///
    /// Expects `day_progress` already wrapped into `[0, cycle_period)`. Values outside
    /// that range are not rejected; the slice index is reduced modulo 8.
    pub fn from_day_progress(day_progress: f32, cycle_period: f32) -> Self {
        let index = ((day_progress / cycle_period) * 8.0).floor() as i64;
        Self::ALL[index.rem_euclid(8) as usize]
    }

    /// English display name.
    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Traditional Japanese name of the phase.
    pub fn traditional_name(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "新月",
            MoonPhase::WaxingCrescent => "三日月",
            MoonPhase::FirstQuarter => "上弦の月",
            MoonPhase::WaxingGibbous => "十日夜の月",
            MoonPhase::FullMoon => "満月",
            MoonPhase::WaningGibbous => "寝待月",
            MoonPhase::LastQuarter => "下弦の月",
            MoonPhase::WaningCrescent => "有明月",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Resource, Debug, Default)]
/// Phase label most recently published by the from-observer view for display.
pub struct PhaseReadout {
    current: MoonPhase,
}

impl PhaseReadout {
    /// Currently displayed phase.
    pub fn current(&self) -> MoonPhase {
        self.current
    }

    /// Store `phase` and return whether it differs from the previous label.
    pub fn publish(&mut self, phase: MoonPhase) -> bool {
        let changed = self.current != phase;
        self.current = phase;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MOON_ORBITAL_PERIOD_DAYS;

    /// Verify the labelled anchor days of the cycle.
    #[test]
    fn classifies_anchor_days() {
        let phase = |day| MoonPhase::from_day_progress(day, MOON_ORBITAL_PERIOD_DAYS);
        assert_eq!(phase(0.0), MoonPhase::NewMoon);
        assert_eq!(phase(14.75), MoonPhase::FullMoon);
        assert_eq!(phase(14.75), MoonPhase::ALL[4]);
        assert_eq!(phase(29.4), MoonPhase::WaningCrescent);
        assert_eq!(phase(29.4), MoonPhase::ALL[7]);
    }

    /// Verify every slice boundary maps to the next phase in order.
    #[test]
    fn slice_boundaries_step_through_all_phases() {
        for (index, expected) in MoonPhase::ALL.iter().enumerate() {
            let start = MOON_ORBITAL_PERIOD_DAYS * index as f32 / 8.0 + 0.01;
            assert_eq!(
                MoonPhase::from_day_progress(start, MOON_ORBITAL_PERIOD_DAYS),
                *expected
            );
        }
    }

    /// Unwrapped full cycle lands back on new moon through the modulo.
    #[test]
    fn unwrapped_cycle_end_reduces_to_new_moon() {
        assert_eq!(
            MoonPhase::from_day_progress(MOON_ORBITAL_PERIOD_DAYS, MOON_ORBITAL_PERIOD_DAYS),
            MoonPhase::NewMoon
        );
    }

    /// Verify publish reports only real label changes.
    #[test]
    fn readout_reports_changes() {
        let mut readout = PhaseReadout::default();
        assert!(!readout.publish(MoonPhase::NewMoon));
        assert!(readout.publish(MoonPhase::FullMoon));
        assert_eq!(readout.current(), MoonPhase::FullMoon);
        assert_eq!(readout.current().traditional_name(), "満月");
    }
}
