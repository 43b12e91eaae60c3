//! # Host collaborator interface
//!
//! The orbit editor never talks to the physics engine or the user interface directly.
//! Everything it needs from the surrounding simulation goes through [`Host`]:
//!
//! - the **simulation clock** used for default epochs and state evaluation;
//! - the **best-effort physics calls** made before a vessel is teleported
//!   (`hold_vessel_unpack`, `go_on_rails`), whose failures are logged and ignored;
//! - the **error popup** used to show a rejected commit to the player.
//!
//! [`RecordingHost`] is a simple in-memory implementation that stores every popup
//! message and call, handy for tests and headless tools.
use crate::{
    constants::Seconds,
    editor_errors::HostError,
    vessel::{Vessel, VesselId},
};

pub trait Host {
    /// Current simulation (universal) time in seconds.
    fn universal_time(&self) -> Seconds;

    /// Ask the physics engine to keep vessels packed for the next `frames` physics frames.
    fn hold_vessel_unpack(&mut self, _frames: u32) -> Result<(), HostError> {
        Ok(())
    }

    /// Switch `vessel` to the low-fidelity "on rails" mode.
    fn go_on_rails(&mut self, vessel: &mut Vessel) -> Result<(), HostError> {
        vessel.packed = true;
        Ok(())
    }

    /// Show a modal, dismissible error message to the player.
    fn error_popup(&mut self, message: &str);
}

/// In-memory [`Host`] with a settable clock.
///
/// Every popup message is stored in `popups`, and vessels sent on rails are recorded in
/// `railed`. Failures can be injected with `fail_hold_unpack` and `fail_go_on_rails`.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub time: Seconds,
    pub popups: Vec<String>,
    pub held_frames: Vec<u32>,
    pub railed: Vec<VesselId>,
    pub fail_hold_unpack: bool,
    pub fail_go_on_rails: bool,
}

impl RecordingHost {
    pub fn at(time: Seconds) -> Self {
        RecordingHost {
            time,
            ..Default::default()
        }
    }
}

impl Host for RecordingHost {
    fn universal_time(&self) -> Seconds {
        self.time
    }

    fn hold_vessel_unpack(&mut self, frames: u32) -> Result<(), HostError> {
        if self.fail_hold_unpack {
            return Err(HostError::new("hold_vessel_unpack: physics manager unavailable"));
        }
        self.held_frames.push(frames);
        Ok(())
    }

    fn go_on_rails(&mut self, vessel: &mut Vessel) -> Result<(), HostError> {
        if self.fail_go_on_rails {
            return Err(HostError::new(format!(
                "go_on_rails: vessel '{}' has no rigid bodies",
                vessel.name
            )));
        }
        vessel.packed = true;
        self.railed.push(vessel.id);
        Ok(())
    }

    fn error_popup(&mut self, message: &str) {
        self.popups.push(message.to_string());
    }
}
