use std::fmt;

use simcore::DeckState;

/// Multi-line telemetry text for the front panel.
pub struct Readout<'a>(pub &'a DeckState);

impl fmt::Display for Readout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "Transport: {}", s.transport)?;
        writeln!(f, "RPM: {:7.1} | Set: {:7.1}", s.rpm, s.rpm_setpoint)?;
        writeln!(f, "PWM: {:+.3} | Err: {:+.1}", s.pwm, s.err)?;
        writeln!(f, "Friction: {:.2} | Jitter: {:.2}", s.tape_friction, s.encoder_jitter)?;
        write!(f, "Tension: {:.3}", s.tension)
    }
}
