use serde::Serialize;

/// Body of the liveness check.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
