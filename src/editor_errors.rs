use thiserror::Error;

/// Failure reported by a host collaborator (physics engine, scene manager).
///
/// Calls that may fail with a [`HostError`] are best-effort: the committer logs them
/// and carries on.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        HostError(message.into())
    }
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Destination position ({distance} m) was above the sphere of influence ({soi} m)")]
    OutsideSphereOfInfluence { distance: f64, soi: f64 },

    #[error("Orbit state is not finite at the current time; refusing to apply it")]
    NonFiniteState,

    #[error("Unknown celestial body: {0}")]
    UnknownBody(String),

    #[error("Unknown orbiting entity: {0}")]
    UnknownEntity(String),

    #[error("A body cannot orbit itself or one of its satellites: {0}")]
    ReferenceBodyCycle(String),

    #[error("Unknown velocity change direction: {0}")]
    UnknownVelocityDirection(String),

    #[error("Invalid editor parameter: {0}")]
    InvalidEditorParameter(String),
}

impl PartialEq for EditorError {
    fn eq(&self, other: &Self) -> bool {
        use EditorError::*;
        match (self, other) {
            (
                OutsideSphereOfInfluence {
                    distance: d1,
                    soi: s1,
                },
                OutsideSphereOfInfluence {
                    distance: d2,
                    soi: s2,
                },
            ) => d1 == d2 && s1 == s2,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (UnknownEntity(a), UnknownEntity(b)) => a == b,
            (ReferenceBodyCycle(a), ReferenceBodyCycle(b)) => a == b,
            (UnknownVelocityDirection(a), UnknownVelocityDirection(b)) => a == b,
            (InvalidEditorParameter(a), InvalidEditorParameter(b)) => a == b,

            // Unit variants
            (NonFiniteState, NonFiniteState) => true,

            _ => false,
        }
    }
}
