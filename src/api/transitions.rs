//! Workflow transitions.

use tracing::{info, instrument};

use super::client::{decode, JiraClient};
use super::error::{ApiError, Result};
use super::query::segment;
use super::types::{Transition, TransitionId, TransitionRequest, TransitionsResponse};

impl JiraClient {
    fn transitions_url(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(ApiError::MissingIdentifier("issue key"));
        }
        Ok(self.api_url(&format!("issue/{}/transitions", segment(key))))
    }

    /// List the transitions currently available on an issue, in server order.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let body = self.get(&self.transitions_url(key)?).await?;
        let response: TransitionsResponse = decode(&body, "transitions")?;
        Ok(response.transitions)
    }

    /// Perform the transition with the given ID.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn do_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        if transition_id.is_empty() {
            return Err(ApiError::MissingIdentifier("transition"));
        }
        let request = TransitionRequest {
            transition: TransitionId {
                id: transition_id.to_string(),
            },
        };
        self.post(&self.transitions_url(key)?, &request).await?;
        Ok(())
    }

    /// Resolve `name_or_id` against the issue's transitions and perform it.
    ///
    /// Returns the transition that was applied. When nothing matches, the
    /// error carries the available transitions and no change is made.
    pub async fn transition_issue(&self, key: &str, name_or_id: &str) -> Result<Transition> {
        let transitions = self.get_transitions(key).await?;
        let transition = resolve_transition(&transitions, name_or_id)?.clone();
        self.do_transition(key, &transition.id).await?;
        info!(issue_key = %key, transition = %transition.name, "Transitioned issue");
        Ok(transition)
    }
}

/// Find a transition by exact ID, then by case-insensitive name.
///
/// Names must match in full; partial matches are not accepted.
pub fn resolve_transition<'a>(
    transitions: &'a [Transition],
    name_or_id: &str,
) -> Result<&'a Transition> {
    let wanted = name_or_id.trim();

    transitions
        .iter()
        .find(|t| t.id == wanted)
        .or_else(|| {
            let lowered = wanted.to_lowercase();
            transitions.iter().find(|t| t.name.to_lowercase() == lowered)
        })
        .ok_or_else(|| ApiError::TransitionNotFound {
            requested: name_or_id.to_string(),
            available: transitions.to_vec(),
        })
}
