//! Calibration state machine.
//!
//! Tracks whether the glove is currently being calibrated and by which
//! method. At most one session is active at a time; redundant transitions
//! are no-ops. Entering and leaving `Calibrating` are the only points where
//! pose-frame recalibration may touch calibration data.

/// How a calibration session was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationMethod {
    /// Software-initiated gesture.
    Software,
    /// Hardware calibration button/gesture on the glove.
    Hardware,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Calibrating(CalibrationMethod),
}

/// Cycles Idle -> Calibrating -> Idle for the lifetime of the driver;
/// there is no terminal state.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationSession {
    state: State,
}

impl CalibrationSession {
    pub fn new() -> CalibrationSession {
        CalibrationSession { state: State::Idle }
    }

    /// Start a session. No-op if one is already active; returns whether the
    /// transition happened.
    pub fn start(&mut self, method: CalibrationMethod) -> bool {
        match self.state {
            State::Idle => {
                self.state = State::Calibrating(method);
                true
            }
            State::Calibrating(_) => false,
        }
    }

    /// Complete the active session. The method argument is informational and
    /// does not need to match the one used to start. No-op when idle;
    /// returns whether the transition happened.
    pub fn complete(&mut self, _method: CalibrationMethod) -> bool {
        match self.state {
            State::Calibrating(_) => {
                self.state = State::Idle;
                true
            }
            State::Idle => false,
        }
    }

    pub fn is_calibrating(&self) -> bool {
        matches!(self.state, State::Calibrating(_))
    }

    /// The method of the active session, if any.
    pub fn method(&self) -> Option<CalibrationMethod> {
        match self.state {
            State::Calibrating(method) => Some(method),
            State::Idle => None,
        }
    }
}

impl Default for CalibrationSession {
    fn default() -> Self {
        CalibrationSession::new()
    }
}
