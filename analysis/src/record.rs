use serde::{Deserialize, Serialize};
use std::fmt;

/// marker stored in every metric of a placeholder until the sentinel is substituted
pub const PENDING: f64 = -1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// one application's outcome for one algorithm and repeat
pub struct ResultRecord {
    pub app_name: String,
    pub priority: u32,
    pub resp_time: f64,
    pub resp_time_in_clouds: f64,
    #[serde(alias = "pri_wei_resp_time")]
    pub pri_weighted_resp_time: f64,
    #[serde(alias = "pri_wei_resp_time_in_clouds")]
    pub pri_weighted_resp_time_in_clouds: f64,
}

impl ResultRecord {
    pub fn new(
        app_name: impl Into<String>,
        priority: u32,
        resp_time: f64,
        resp_time_in_clouds: f64,
        pri_weighted_resp_time: f64,
        pri_weighted_resp_time_in_clouds: f64,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            priority,
            resp_time,
            resp_time_in_clouds,
            pri_weighted_resp_time,
            pri_weighted_resp_time_in_clouds,
        }
    }

    /// a measured record whose priority-weighted metrics derive from its priority
    pub fn measured(
        app_name: impl Into<String>,
        priority: u32,
        resp_time: f64,
        resp_time_in_clouds: f64,
    ) -> Self {
        let weight = f64::from(priority);

        Self::new(
            app_name,
            priority,
            resp_time,
            resp_time_in_clouds,
            resp_time * weight,
            resp_time_in_clouds * weight,
        )
    }

    /// placeholder for an application the algorithm rejected
    pub fn placeholder(app_name: impl Into<String>, priority: u32) -> Self {
        Self::new(app_name, priority, PENDING, PENDING, PENDING, PENDING)
    }

    /// true if any metric still carries the pending marker
    pub fn is_pending(&self) -> bool {
        Metric::ALL
            .iter()
            .any(|metric| metric.value(self) == PENDING)
    }
}

/// Selector for one of the four metrics of a [`ResultRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "resp_time")]
    ResponseTime,
    #[serde(rename = "resp_time_in_clouds")]
    ResponseTimeInClouds,
    #[serde(rename = "pri_weighted_resp_time", alias = "pri_wei_resp_time")]
    PriorityWeightedResponseTime,
    #[serde(
        rename = "pri_weighted_resp_time_in_clouds",
        alias = "pri_wei_resp_time_in_clouds"
    )]
    PriorityWeightedResponseTimeInClouds,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::ResponseTime,
        Metric::ResponseTimeInClouds,
        Metric::PriorityWeightedResponseTime,
        Metric::PriorityWeightedResponseTimeInClouds,
    ];

    /// metrics that carry no priority weighting
    pub const NON_PRIORITY: [Metric; 2] = [Metric::ResponseTime, Metric::ResponseTimeInClouds];

    pub fn value(self, record: &ResultRecord) -> f64 {
        match self {
            Self::ResponseTime => record.resp_time,
            Self::ResponseTimeInClouds => record.resp_time_in_clouds,
            Self::PriorityWeightedResponseTime => record.pri_weighted_resp_time,
            Self::PriorityWeightedResponseTimeInClouds => record.pri_weighted_resp_time_in_clouds,
        }
    }

    pub fn value_mut(self, record: &mut ResultRecord) -> &mut f64 {
        match self {
            Self::ResponseTime => &mut record.resp_time,
            Self::ResponseTimeInClouds => &mut record.resp_time_in_clouds,
            Self::PriorityWeightedResponseTime => &mut record.pri_weighted_resp_time,
            Self::PriorityWeightedResponseTimeInClouds => {
                &mut record.pri_weighted_resp_time_in_clouds
            }
        }
    }

    /// CSV column holding this metric
    pub fn column(self) -> &'static str {
        match self {
            Self::ResponseTime => "resp_time",
            Self::ResponseTimeInClouds => "resp_time_in_clouds",
            Self::PriorityWeightedResponseTime => "pri_weighted_resp_time",
            Self::PriorityWeightedResponseTimeInClouds => "pri_weighted_resp_time_in_clouds",
        }
    }

    /// axis label handed to the chart layer
    pub fn label(self) -> &'static str {
        match self {
            Self::ResponseTime => "response time (ms)",
            Self::ResponseTimeInClouds => "response time in clouds (ms)",
            Self::PriorityWeightedResponseTime => "priority-weighted response time (ms)",
            Self::PriorityWeightedResponseTimeInClouds => {
                "priority-weighted response time in clouds (ms)"
            }
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Anything that identifies an application inside an aligned sequence
pub trait Keyed {
    fn app_name(&self) -> &str;
    fn priority(&self) -> u32;
}

impl Keyed for ResultRecord {
    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn priority(&self) -> u32 {
        self.priority
    }
}
