//! Fleet Management API seam
//!
//! Defines the domain model for autoscaling groups and the `FleetApi` trait
//! the scale controller runs against. The trait keeps client construction
//! explicit (a configured implementation is passed in, never ambient state)
//! so the controller can be driven by fakes in tests and by
//! `autoscaling::AwsFleetApi` in production.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A named autoscaling group as reported by the Fleet Management API.
///
/// Owned by the remote API; this tool only reads it and updates its desired
/// capacity by name. Instances keep the order the API returned them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingGroup {
    pub name: String,
    pub desired_capacity: i32,
    pub instances: Vec<Instance>,
}

impl ScalingGroup {
    /// First instance whose health is not `Healthy`, if any.
    pub fn first_unhealthy(&self) -> Option<&Instance> {
        self.instances.iter().find(|i| !i.health.is_healthy())
    }
}

/// A single instance belonging to an autoscaling group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub health: HealthStatus,
}

/// Per-instance health classification used to gate scaling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Unknown,
}

impl HealthStatus {
    pub fn is_healthy(self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Helper to convert provider-specific health strings to HealthStatus
///
/// Anything unrecognized maps to `Unknown`, which blocks downscale the same
/// as `Unhealthy`.
pub fn normalize_health(status: &str) -> HealthStatus {
    match status.to_lowercase().as_str() {
        "healthy" => HealthStatus::Healthy,
        "unhealthy" => HealthStatus::Unhealthy,
        _ => HealthStatus::Unknown,
    }
}

/// Trait for the operations the scale controller needs from the Fleet
/// Management API.
#[async_trait]
pub trait FleetApi: Send + Sync {
    /// All autoscaling groups, in the order the API returns them.
    async fn list_groups(&self) -> Result<Vec<ScalingGroup>>;

    /// A single group by name, or `None` if the API has no group with
    /// that name.
    async fn describe_group(&self, name: &str) -> Result<Option<ScalingGroup>>;

    /// Set the desired capacity of the named group.
    async fn set_desired_capacity(&self, name: &str, capacity: i32) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_health() {
        assert_eq!(normalize_health("Healthy"), HealthStatus::Healthy);
        assert_eq!(normalize_health("healthy"), HealthStatus::Healthy);
        assert_eq!(normalize_health("HEALTHY"), HealthStatus::Healthy);

        assert_eq!(normalize_health("Unhealthy"), HealthStatus::Unhealthy);
        assert_eq!(normalize_health("unhealthy"), HealthStatus::Unhealthy);

        assert_eq!(normalize_health(""), HealthStatus::Unknown);
        assert_eq!(normalize_health("Initializing"), HealthStatus::Unknown);
        assert_eq!(normalize_health("degraded"), HealthStatus::Unknown);
    }

    #[test]
    fn test_only_healthy_passes_the_gate() {
        assert!(HealthStatus::Healthy.is_healthy());
        assert!(!HealthStatus::Unhealthy.is_healthy());
        assert!(!HealthStatus::Unknown.is_healthy());
    }

    #[test]
    fn test_first_unhealthy() {
        let group = ScalingGroup {
            name: "web-1".to_string(),
            desired_capacity: 3,
            instances: vec![
                Instance {
                    id: "i-0aaaaaaaaaaaaaaaa".to_string(),
                    health: HealthStatus::Healthy,
                },
                Instance {
                    id: "i-0bbbbbbbbbbbbbbbb".to_string(),
                    health: HealthStatus::Unhealthy,
                },
                Instance {
                    id: "i-0cccccccccccccccc".to_string(),
                    health: HealthStatus::Unknown,
                },
            ],
        };

        let first = group.first_unhealthy().expect("one instance is unhealthy");
        assert_eq!(first.id, "i-0bbbbbbbbbbbbbbbb");

        let all_healthy = ScalingGroup {
            name: "web-2".to_string(),
            desired_capacity: 2,
            instances: vec![
                Instance {
                    id: "i-0aaaaaaaaaaaaaaaa".to_string(),
                    health: HealthStatus::Healthy,
                },
                Instance {
                    id: "i-0bbbbbbbbbbbbbbbb".to_string(),
                    health: HealthStatus::Healthy,
                },
            ],
        };
        assert!(all_healthy.first_unhealthy().is_none());
    }
}
