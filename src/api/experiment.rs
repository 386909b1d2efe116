use serde::{Deserialize, Serialize};

use crate::{ExperimentId, VariantId};

/// An A/B experiment as configured on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: ExperimentId,
    pub name: String,
    pub status: ExperimentStatus,
    pub traffic_allocation: f64,
    pub traffic_proportion: TrafficProportion,
    #[serde(default)]
    pub scheduling: Option<Scheduling>,
    #[serde(default)]
    pub goals: Option<Goals>,
}

impl Experiment {
    /// Merge a server-returned experiment into this one.
    ///
    /// Required fields are overwritten; optional fields that the response
    /// left out keep their current value.
    pub fn merge_from(&mut self, other: Experiment) {
        let Experiment {
            id,
            name,
            status,
            traffic_allocation,
            traffic_proportion,
            scheduling,
            goals,
        } = other;
        self.id = id;
        self.name = name;
        self.status = status;
        self.traffic_allocation = traffic_allocation;
        self.traffic_proportion = traffic_proportion;
        if scheduling.is_some() {
            self.scheduling = scheduling;
        }
        if goals.is_some() {
            self.goals = goals;
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExperimentStatus {
    Draft,
    Scheduled,
    Running,
    Ended,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficProportion {
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub promoted: bool,
}

/// Scheduling window, epoch milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheduling {
    pub start_date: i64,
    pub end_date: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goals {
    pub primary: Goal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    ReachPage,
    BounceRate,
    ClickOnElement,
}
