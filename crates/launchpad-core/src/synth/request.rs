//! The request handed to a plan synthesizer, and the plans it returns.

use serde::Serialize;

use crate::answers::AnswerRecord;

use super::SynthesisError;

/// Number of plans every successful synthesis produces.
pub const PLAN_COUNT: usize = 3;

/// Synthesizer input, derived once from a finished [`AnswerRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub business: Business,
    pub campaign: Campaign,
    pub brand: Brand,
    pub delivery: Delivery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub name_and_offer: String,
    pub customers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub goal: String,
    pub offer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub tone: String,
    pub unique: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub channels: Vec<String>,
    pub budget: String,
    pub timeframe: String,
}

impl From<&AnswerRecord> for PlanRequest {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            business: Business {
                name_and_offer: record.business_name.clone(),
                customers: record.effective_customers(),
            },
            campaign: Campaign {
                goal: record.effective_goal().to_string(),
                offer: record.special_offer.clone(),
            },
            brand: Brand {
                tone: record
                    .tone
                    .map(|t| t.label().to_string())
                    .unwrap_or_default(),
                unique: record.unique.clone(),
            },
            delivery: Delivery {
                channels: record
                    .channels
                    .iter()
                    .map(|c| c.label().to_string())
                    .collect(),
                budget: record.budget.clone(),
                timeframe: record.timeframe.clone(),
            },
        }
    }
}

/// Exactly [`PLAN_COUNT`] plan texts. There is no way to hold fewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlanSet([String; PLAN_COUNT]);

impl PlanSet {
    pub fn new(plans: [String; PLAN_COUNT]) -> Self {
        Self(plans)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for PlanSet {
    type Error = SynthesisError;

    /// Accept a backend's plan list only if it has exactly [`PLAN_COUNT`]
    /// entries.
    fn try_from(plans: Vec<String>) -> Result<Self, Self::Error> {
        let got = plans.len();
        let plans: [String; PLAN_COUNT] = plans
            .try_into()
            .map_err(|_| SynthesisError::WrongPlanCount {
                expected: PLAN_COUNT,
                got,
            })?;
        Ok(Self(plans))
    }
}
