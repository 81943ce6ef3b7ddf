//! Scale controller
//!
//! Orchestrates the three capacity operations over any `FleetApi`
//! implementation: list groups, upscale a group to a fixed target, and
//! downscale a group to one instance once a readiness gate holds.
//!
//! The downscale gate is the one stateful piece of this crate: poll the
//! group, and only issue the capacity update once it has more than one
//! instance and every instance reports healthy. A group that cannot be
//! found is terminal and never retried.

use crate::error::{AsgctlError, Result};
use crate::fleet::{FleetApi, ScalingGroup};
use std::time::Duration;
use tracing::{debug, info};

/// Capacity every upscale requests, regardless of the group's current size.
pub const UPSCALE_CAPACITY: i32 = 2;

/// Capacity a downscale settles the group at once the gate holds.
pub const DOWNSCALE_CAPACITY: i32 = 1;

/// Poll policy for the downscale readiness gate.
///
/// The interval and the optional attempt cap are injectable so tests can run
/// the loop without real delays. `max_attempts: None` polls until the gate
/// holds or the group disappears — an operator who wants a bounded wait sets
/// the cap via config or `--max-attempts`.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: None,
        }
    }
}

/// Orchestrates list/upscale/downscale against the Fleet Management API.
pub struct ScaleController<F: FleetApi> {
    fleet: F,
    policy: PollPolicy,
}

impl<F: FleetApi> ScaleController<F> {
    pub fn new(fleet: F) -> Self {
        Self {
            fleet,
            policy: PollPolicy::default(),
        }
    }

    pub fn with_policy(fleet: F, policy: PollPolicy) -> Self {
        Self { fleet, policy }
    }

    /// All groups, in the order the Fleet Management API returns them.
    pub async fn list(&self) -> Result<Vec<ScalingGroup>> {
        self.fleet.list_groups().await
    }

    /// Set the desired capacity of `name` to [`UPSCALE_CAPACITY`].
    ///
    /// No gating: the update is issued immediately, exactly once.
    pub async fn scale_up(&self, name: &str) -> Result<i32> {
        println!(
            "Setting desired capacity of {} to {}",
            name, UPSCALE_CAPACITY
        );
        self.fleet
            .set_desired_capacity(name, UPSCALE_CAPACITY)
            .await?;
        Ok(UPSCALE_CAPACITY)
    }

    /// Wait until `name` has more than one instance, all healthy, then set
    /// its desired capacity to [`DOWNSCALE_CAPACITY`].
    ///
    /// Polls on the configured interval. Exactly one update is issued, the
    /// first time the gate holds.
    ///
    /// # Errors
    ///
    /// - [`AsgctlError::GroupNotFound`] if the group is absent from a query
    ///   result. Terminal: the wait ends without an update.
    /// - [`AsgctlError::FleetQuery`] if a poll query fails. The wait ends
    ///   rather than masking a failing API behind silent retries.
    /// - [`AsgctlError::WaitTimeout`] once the configured attempt cap (if
    ///   any) is exhausted.
    pub async fn scale_down(&self, name: &str) -> Result<()> {
        let mut attempts: u32 = 0;
        loop {
            let group = self
                .fleet
                .describe_group(name)
                .await?
                .ok_or_else(|| AsgctlError::GroupNotFound(name.to_string()))?;

            if gate_holds(&group) {
                info!("Group {} ready, downscaling", name);
                println!(
                    "Setting desired capacity of {} to {}",
                    name, DOWNSCALE_CAPACITY
                );
                return self
                    .fleet
                    .set_desired_capacity(name, DOWNSCALE_CAPACITY)
                    .await;
            }

            attempts += 1;
            if let Some(max) = self.policy.max_attempts {
                if attempts >= max {
                    return Err(AsgctlError::WaitTimeout {
                        group: name.to_string(),
                        attempts,
                    });
                }
            }
            tokio::time::sleep(self.policy.interval).await;
        }
    }
}

/// Readiness gate for downscaling: more than one instance, all healthy.
fn gate_holds(group: &ScalingGroup) -> bool {
    let count = group.instances.len();
    if count <= 1 {
        println!("Only {} instances, waiting...", count);
        return false;
    }

    println!("Enough instances found to downscale");
    if let Some(instance) = group.first_unhealthy() {
        println!("At least one instance is not healthy, waiting to downscale");
        debug!(
            "Instance {} in group {} is {:?}",
            instance.id, group.name, instance.health
        );
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::{HealthStatus, Instance};

    fn group_with(healths: &[HealthStatus]) -> ScalingGroup {
        ScalingGroup {
            name: "web-1".to_string(),
            desired_capacity: healths.len() as i32,
            instances: healths
                .iter()
                .enumerate()
                .map(|(i, h)| Instance {
                    id: format!("i-{:017x}", i),
                    health: *h,
                })
                .collect(),
        }
    }

    #[test]
    fn test_gate_blocks_single_instance() {
        assert!(!gate_holds(&group_with(&[HealthStatus::Healthy])));
        assert!(!gate_holds(&group_with(&[])));
    }

    #[test]
    fn test_gate_blocks_unhealthy_instance() {
        assert!(!gate_holds(&group_with(&[
            HealthStatus::Healthy,
            HealthStatus::Unhealthy,
            HealthStatus::Healthy,
        ])));
        // Unknown health is not healthy
        assert!(!gate_holds(&group_with(&[
            HealthStatus::Healthy,
            HealthStatus::Unknown,
        ])));
    }

    #[test]
    fn test_gate_holds_for_multiple_healthy_instances() {
        assert!(gate_holds(&group_with(&[
            HealthStatus::Healthy,
            HealthStatus::Healthy,
        ])));
        assert!(gate_holds(&group_with(&[
            HealthStatus::Healthy,
            HealthStatus::Healthy,
            HealthStatus::Healthy,
        ])));
    }
}
