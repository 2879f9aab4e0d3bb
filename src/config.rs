use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::balancing::spectrum::DEFAULT_EIGENVALUE_DIGITS;

#[derive(Error,Debug,PartialEq)]
pub enum ConfigError {
    #[error("unknown policy {0:?}, expected one of: disc, cont, cont-mod")]
    UnknownPolicy(String)
}

// which kind of load the nodes hold
#[derive(Clone,Copy,Debug,Default,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    // atomic tasks
    #[default]
    Discrete,
    // arbitrary load can be sent any time, the optimal scheme
    Continuous,
    // divisible load, but never more than the node holds
    ContinuousModified
}

impl FromStr for Policy {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disc" | "discrete" => Ok(Self::Discrete),
            "cont" | "continuous" => Ok(Self::Continuous),
            "cont-mod" | "continuous-modified" => Ok(Self::ContinuousModified),
            _ => Err(ConfigError::UnknownPolicy(s.to_string()))
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Discrete => "disc",
            Self::Continuous => "cont",
            Self::ContinuousModified => "cont-mod"
        };
        write!(f,"{name}")
    }
}

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub policy:Policy,
    // eigenvalues equal after rounding to this many decimals drive a single round
    pub eigenvalue_digits:i32,
    // None runs the error correction until it converges
    // Some(n) turns round n+1 into an error instead of looping forever
    pub max_correction_rounds:Option<usize>
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy:Policy::default(),
            eigenvalue_digits:DEFAULT_EIGENVALUE_DIGITS,
            max_correction_rounds:None
        }
    }
}

impl SimulationConfig {
    pub fn with_policy(policy:Policy) -> Self {
        Self { policy, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Policy, SimulationConfig};

    #[test]
    fn test_policy_names() {
        assert_eq!("cont".parse::<Policy>(),Ok(Policy::Continuous));
        assert_eq!(" Cont-Mod ".parse::<Policy>(),Ok(Policy::ContinuousModified));
        assert_eq!("discrete".parse::<Policy>(),Ok(Policy::Discrete));
        assert_eq!("fast".parse::<Policy>(),Err(ConfigError::UnknownPolicy("fast".to_string())));
        for policy in [Policy::Discrete,Policy::Continuous,Policy::ContinuousModified] {
            assert_eq!(policy.to_string().parse::<Policy>(),Ok(policy));
        }
    }
    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.policy,Policy::Discrete);
        assert_eq!(config.eigenvalue_digits,9);
        assert_eq!(config.max_correction_rounds,None);
    }
    #[test]
    fn test_partial_json() {
        let config:SimulationConfig = serde_json::from_str(r#"{"policy":"continuous-modified"}"#).unwrap();
        assert_eq!(config,SimulationConfig::with_policy(Policy::ContinuousModified));
    }
}
