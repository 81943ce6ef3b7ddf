//! Autoscaling group operations module
//!
//! Command surface for the `autoscaling` (alias `as`) command tree and the
//! AWS-backed implementation of the Fleet Management API seam.
//!
//! ## Module Organization
//!
//! - `client`: `AwsFleetApi`, the `FleetApi` implementation over the AWS
//!   Auto Scaling SDK
//!
//! The handlers here construct the SDK client from an explicitly loaded
//! AWS config, wrap it in the seam, and drive `ScaleController`. All
//! operator-facing results are printed, as text or as a JSON block when
//! `--output json` is set.

mod client;

pub use client::AwsFleetApi;

use crate::config::Config;
use crate::error::{AsgctlError, Result};
use crate::scale::{PollPolicy, ScaleController, DOWNSCALE_CAPACITY};
use aws_config::BehaviorVersion;
use clap::Subcommand;
use std::time::Duration;
use tracing::debug;

#[derive(Subcommand, Clone)]
pub enum AutoscalingCommands {
    /// Print all available autoscaling groups
    ///
    /// Examples:
    ///   asgctl autoscaling list
    ///   asgctl as list --output json
    #[command(alias = "ls")]
    List,
    /// Set the desired capacity of a group to 2
    ///
    /// The update is issued immediately, with no readiness gating.
    ///
    /// Examples:
    ///   asgctl autoscaling upscale web-prod
    #[command(alias = "up")]
    Upscale {
        /// Autoscaling group name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Downscale a group to 1 once every instance reports healthy
    ///
    /// Polls the group until it has more than one instance and all of them
    /// are healthy, then sets the desired capacity to 1. By default the
    /// wait is unbounded; use --max-attempts for a bounded wait.
    ///
    /// Examples:
    ///   asgctl autoscaling downscale web-prod
    ///   asgctl as downscale web-prod --interval-secs 5 --max-attempts 60
    #[command(alias = "down")]
    Downscale {
        /// Autoscaling group name
        #[arg(value_name = "NAME")]
        name: String,

        /// Seconds to wait between readiness checks
        #[arg(long, value_name = "SECONDS")]
        interval_secs: Option<u64>,

        /// Give up after this many readiness checks (default: poll until ready)
        #[arg(long, value_name = "COUNT")]
        max_attempts: Option<u32>,
    },
}

pub async fn handle_command(
    cmd: Option<AutoscalingCommands>,
    config: &Config,
    output_format: &str,
) -> Result<()> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = config.aws.as_ref().and_then(|aws| aws.region.clone()) {
        debug!("Using configured region {}", region);
        loader = loader.region(aws_config::Region::new(region));
    }
    let aws_config = loader.load().await;
    let fleet = AwsFleetApi::new(&aws_config);

    // Bare `asgctl autoscaling` falls back to listing the groups.
    match cmd.unwrap_or(AutoscalingCommands::List) {
        AutoscalingCommands::List => {
            let controller = ScaleController::new(fleet);
            let groups = controller.list().await?;

            if output_format == "json" {
                let result: Vec<_> = groups
                    .iter()
                    .map(|group| {
                        serde_json::json!({
                            "name": group.name,
                            "desired_capacity": group.desired_capacity,
                            "instance_count": group.instances.len(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Available autoscaling groups:");
                println!();
                for group in &groups {
                    println!("{}", group.name);
                }
            }
            Ok(())
        }
        AutoscalingCommands::Upscale { name } => {
            crate::validation::validate_group_name(&name)?;
            let controller = ScaleController::new(fleet);

            match controller.scale_up(&name).await {
                Ok(capacity) => {
                    if output_format == "json" {
                        let result = serde_json::json!({
                            "success": true,
                            "group": name,
                            "desired_capacity": capacity,
                        });
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        println!("Desired capacity of {} is now {}", name, capacity);
                    }
                    Ok(())
                }
                Err(e) => {
                    if output_format == "json" {
                        let result = serde_json::json!({
                            "success": false,
                            "group": name,
                            "error": e.to_string(),
                        });
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    }
                    Err(e)
                }
            }
        }
        AutoscalingCommands::Downscale {
            name,
            interval_secs,
            max_attempts,
        } => {
            crate::validation::validate_group_name(&name)?;
            let policy = PollPolicy {
                interval: Duration::from_secs(
                    interval_secs.unwrap_or(config.scaling.poll_interval_secs),
                ),
                max_attempts: max_attempts.or(config.scaling.max_attempts),
            };
            let controller = ScaleController::with_policy(fleet, policy);

            if output_format != "json" {
                println!("Waiting for {} to be ready to downscale...", name);
            }

            match controller.scale_down(&name).await {
                Ok(()) => {
                    if output_format == "json" {
                        let result = serde_json::json!({
                            "success": true,
                            "group": name,
                            "desired_capacity": DOWNSCALE_CAPACITY,
                        });
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        println!("Desired capacity of {} is now {}", name, DOWNSCALE_CAPACITY);
                    }
                    Ok(())
                }
                // Report-and-stop: a missing group is an operator-facing
                // message, not a process failure.
                Err(AsgctlError::GroupNotFound(_)) => {
                    if output_format == "json" {
                        let result = serde_json::json!({
                            "success": false,
                            "group": name,
                            "error": "not found",
                        });
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        println!("Unable to find autoscaling group {}", name);
                    }
                    Ok(())
                }
                Err(e) => {
                    if output_format == "json" {
                        let result = serde_json::json!({
                            "success": false,
                            "group": name,
                            "error": e.to_string(),
                        });
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    }
                    Err(e)
                }
            }
        }
    }
}
