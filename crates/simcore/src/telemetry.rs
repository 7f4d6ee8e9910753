//! Sliding-window telemetry trace
//!
//! Keeps the last `window_s` seconds of samples, one deque per series so the
//! plotting layer can zip any series against the shared time axis.

use std::collections::VecDeque;

use crate::DeckState;

/// One row of telemetry, taken after a simulation tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub t: f64,
    pub rpm_setpoint: f64,
    pub rpm: f64,
    pub pwm: f64,
    pub err: f64,
    pub tension: f64,
}

impl TelemetrySample {
    pub fn from_state(t: f64, state: &DeckState) -> Self {
        TelemetrySample {
            t,
            rpm_setpoint: state.rpm_setpoint,
            rpm: state.rpm,
            pwm: state.pwm,
            err: state.err,
            tension: state.tension,
        }
    }
}

/// Plotted series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    RpmSetpoint,
    Rpm,
    Pwm,
    Err,
    Tension,
}

#[derive(Debug, Clone)]
pub struct Trace {
    t: VecDeque<f64>,
    rpm_setpoint: VecDeque<f64>,
    rpm: VecDeque<f64>,
    pwm: VecDeque<f64>,
    err: VecDeque<f64>,
    tension: VecDeque<f64>,
    window_s: f64,
}

impl Trace {
    pub fn new(window_s: f64) -> Self {
        Self {
            t: VecDeque::new(),
            rpm_setpoint: VecDeque::new(),
            rpm: VecDeque::new(),
            pwm: VecDeque::new(),
            err: VecDeque::new(),
            tension: VecDeque::new(),
            window_s: window_s.max(0.0),
        }
    }

    pub fn window_seconds(&self) -> f64 {
        self.window_s
    }

    pub fn set_window_seconds(&mut self, window_s: f64) {
        self.window_s = window_s.max(0.0);
        self.trim_to_window();
    }

    pub fn push(&mut self, sample: TelemetrySample) {
        self.t.push_back(sample.t);
        self.rpm_setpoint.push_back(sample.rpm_setpoint);
        self.rpm.push_back(sample.rpm);
        self.pwm.push_back(sample.pwm);
        self.err.push_back(sample.err);
        self.tension.push_back(sample.tension);
        self.trim_to_window();
    }

    /// Drop samples from the front until the trace spans at most `window_s`.
    fn trim_to_window(&mut self) {
        while let (Some(first), Some(last)) = (self.t.front().copied(), self.t.back().copied()) {
            if last - first <= self.window_s {
                break;
            }
            self.t.pop_front();
            self.rpm_setpoint.pop_front();
            self.rpm.pop_front();
            self.pwm.pop_front();
            self.err.pop_front();
            self.tension.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.t.clear();
        self.rpm_setpoint.clear();
        self.rpm.clear();
        self.pwm.clear();
        self.err.clear();
        self.tension.clear();
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Time covered between the oldest and newest sample
    pub fn span_seconds(&self) -> f64 {
        match (self.t.front(), self.t.back()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    pub fn latest(&self) -> Option<TelemetrySample> {
        let last = self.t.len().checked_sub(1)?;
        Some(TelemetrySample {
            t: self.t[last],
            rpm_setpoint: self.rpm_setpoint[last],
            rpm: self.rpm[last],
            pwm: self.pwm[last],
            err: self.err[last],
            tension: self.tension[last],
        })
    }

    /// Time axis and values of one series
    pub fn series(&self, series: Series) -> (&VecDeque<f64>, &VecDeque<f64>) {
        let values = match series {
            Series::RpmSetpoint => &self.rpm_setpoint,
            Series::Rpm => &self.rpm,
            Series::Pwm => &self.pwm,
            Series::Err => &self.err,
            Series::Tension => &self.tension,
        };
        (&self.t, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f64) -> TelemetrySample {
        TelemetrySample {
            t,
            rpm_setpoint: 1800.0,
            rpm: t * 10.0,
            pwm: 0.5,
            err: 1800.0 - t * 10.0,
            tension: 0.1,
        }
    }

    #[test]
    fn test_trace_keeps_window() {
        let mut trace = Trace::new(2.0);
        for i in 0..100 {
            trace.push(sample(i as f64 * 0.1));
        }
        assert!(trace.span_seconds() <= 2.0 + 1e-9);
        let (t, rpm) = trace.series(Series::Rpm);
        assert_eq!(t.len(), rpm.len());
        assert_eq!(trace.latest().map(|s| s.t), Some(99.0 * 0.1));
        // 7.9..=9.9 in 0.1 steps, give or take rounding at the edge
        assert!((20..=21).contains(&trace.len()), "len = {}", trace.len());
    }

    #[test]
    fn test_all_series_stay_aligned() {
        let mut trace = Trace::new(0.5);
        for i in 0..50 {
            trace.push(sample(i as f64 * 0.05));
        }
        for series in [Series::RpmSetpoint, Series::Rpm, Series::Pwm, Series::Err, Series::Tension] {
            let (t, values) = trace.series(series);
            assert_eq!(t.len(), values.len());
        }
        let (t, err) = trace.series(Series::Err);
        let first_t = t[0];
        assert!((err[0] - (1800.0 - first_t * 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_shrinking_window_trims_immediately() {
        let mut trace = Trace::new(20.0);
        for i in 0..=100 {
            trace.push(sample(i as f64 * 0.1));
        }
        assert_eq!(trace.len(), 101);

        trace.set_window_seconds(1.0);
        assert_eq!(trace.window_seconds(), 1.0);
        assert!(trace.span_seconds() <= 1.0 + 1e-9);
        assert!(trace.len() < 101);
    }

    #[test]
    fn test_single_large_gap_keeps_newest() {
        let mut trace = Trace::new(1.0);
        trace.push(sample(0.0));
        trace.push(sample(0.5));
        trace.push(sample(10.0));
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.latest().map(|s| s.t), Some(10.0));
    }

    #[test]
    fn test_clear_and_empty() {
        let mut trace = Trace::new(5.0);
        assert!(trace.is_empty());
        assert!(trace.latest().is_none());
        assert_eq!(trace.span_seconds(), 0.0);

        trace.push(sample(1.0));
        assert!(!trace.is_empty());
        trace.clear();
        assert!(trace.is_empty());
    }

    #[test]
    fn test_sample_from_state() {
        let state = DeckState {
            rpm_setpoint: 300.0,
            rpm: 120.0,
            pwm: 1.0,
            err: 180.0,
            tension: 0.25,
            ..Default::default()
        };
        let s = TelemetrySample::from_state(3.5, &state);
        assert_eq!(s.t, 3.5);
        assert_eq!(s.rpm_setpoint, 300.0);
        assert_eq!(s.err, 180.0);
        assert_eq!(s.tension, 0.25);
    }
}
