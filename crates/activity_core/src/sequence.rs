//! Reference ordering of the activity steps and shuffled working copies.

use std::sync::Arc;

use rand::Rng;
use shared::{
    domain::{validate_steps, Step, StepId},
    error::ValidationError,
};

const REGISTRATION_FLOW: [(u32, &str); 9] = [
    (
        1,
        "Apply for NMC eligibility with valid passport and nursing qualification",
    ),
    (
        2,
        "Upload documents (passport, qualification, registration) and pay £140 application fee",
    ),
    (3, "Contact home council"),
    (4, "Receive email from NMC after Third party verification"),
    (
        5,
        "Submit Health and Character declarations (PCC + Medical fitness)",
    ),
    (
        6,
        "Upload proof of English Language proficiency (OET or IELTS or SIFE route)",
    ),
    (7, "Pay £153 final registration fee"),
    (8, "ID check and document verification"),
    (9, "Receive NMC PIN after successfully clearing CBT and OSCE"),
];

/// Immutable catalogue of steps in their correct order.
///
/// Cloning is cheap; every clone shares the same step list.
#[derive(Debug, Clone)]
pub struct SequenceModel {
    steps: Arc<[Step]>,
}

impl SequenceModel {
    pub fn new(steps: Vec<Step>) -> Result<Self, ValidationError> {
        validate_steps(&steps)?;
        Ok(Self {
            steps: steps.into(),
        })
    }

    /// The nine-step registration flow used when no catalogue is configured.
    pub fn registration_flow() -> Self {
        Self {
            steps: REGISTRATION_FLOW
                .iter()
                .map(|(id, label)| Step::new(*id, *label))
                .collect(),
        }
    }

    pub fn canonical_order(&self) -> &[Step] {
        &self.steps
    }

    pub fn canonical_ids(&self) -> Vec<StepId> {
        self.steps.iter().map(|step| step.id).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn shuffled_copy(&self) -> Vec<Step> {
        self.shuffled_copy_with(&mut rand::rng())
    }

    /// Fisher–Yates over a copy of the canonical order.
    pub fn shuffled_copy_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Step> {
        let mut working = self.steps.to_vec();
        for i in (1..working.len()).rev() {
            let j = rng.random_range(0..=i);
            working.swap(i, j);
        }
        working
    }
}

impl Default for SequenceModel {
    fn default() -> Self {
        Self::registration_flow()
    }
}

#[cfg(test)]
#[path = "tests/sequence_tests.rs"]
mod tests;
