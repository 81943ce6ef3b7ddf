//! AWS Auto Scaling implementation of the Fleet Management API seam
//!
//! Maps the `FleetApi` operations onto `DescribeAutoScalingGroups` and
//! `UpdateAutoScalingGroup`. Listing pages through results with the SDK's
//! `next_token`; a single-group describe filters by name server-side.

use crate::error::{AsgctlError, Result};
use crate::fleet::{normalize_health, FleetApi, Instance, ScalingGroup};
use async_trait::async_trait;
use aws_sdk_autoscaling::types::AutoScalingGroup as SdkGroup;
use aws_sdk_autoscaling::Client;
use tracing::debug;

/// `FleetApi` backed by the AWS Auto Scaling API.
pub struct AwsFleetApi {
    client: Client,
}

impl AwsFleetApi {
    /// Build from an explicitly loaded SDK config (region, credentials).
    pub fn new(aws_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(aws_config),
        }
    }
}

/// Convert an SDK group to the domain model.
///
/// The SDK models required response fields as `Option`; absent values fall
/// back to empty/zero rather than failing the whole describe.
fn to_scaling_group(group: &SdkGroup) -> ScalingGroup {
    let instances = group
        .instances()
        .iter()
        .map(|instance| Instance {
            id: instance.instance_id().unwrap_or_default().to_string(),
            health: normalize_health(instance.health_status().unwrap_or("unknown")),
        })
        .collect();

    ScalingGroup {
        name: group
            .auto_scaling_group_name()
            .unwrap_or_default()
            .to_string(),
        desired_capacity: group.desired_capacity().unwrap_or(0),
        instances,
    }
}

#[async_trait]
impl FleetApi for AwsFleetApi {
    async fn list_groups(&self) -> Result<Vec<ScalingGroup>> {
        let mut groups = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .describe_auto_scaling_groups()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| {
                    AsgctlError::FleetQuery(format!("Failed to describe autoscaling groups: {}", e))
                })?;

            groups.extend(response.auto_scaling_groups().iter().map(to_scaling_group));

            next_token = response.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        debug!("Fleet query returned {} groups", groups.len());
        Ok(groups)
    }

    async fn describe_group(&self, name: &str) -> Result<Option<ScalingGroup>> {
        let response = self
            .client
            .describe_auto_scaling_groups()
            .auto_scaling_group_names(name)
            .send()
            .await
            .map_err(|e| {
                AsgctlError::FleetQuery(format!(
                    "Failed to describe autoscaling group {}: {}",
                    name, e
                ))
            })?;

        Ok(response.auto_scaling_groups().first().map(to_scaling_group))
    }

    async fn set_desired_capacity(&self, name: &str, capacity: i32) -> Result<()> {
        debug!("Updating desired capacity of {} to {}", name, capacity);
        self.client
            .update_auto_scaling_group()
            .auto_scaling_group_name(name)
            .desired_capacity(capacity)
            .send()
            .await
            .map_err(|e| {
                AsgctlError::Update(format!(
                    "Failed to set desired capacity of {} to {}: {}",
                    name, capacity, e
                ))
            })?;
        Ok(())
    }
}
