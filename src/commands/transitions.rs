use std::io::{self, Write};

use crate::api::types::Transition;
use crate::api::{ApiError, JiraClient};
use crate::error::Result;
use crate::output::{or_dash, View};

const HEADERS: &[&str] = &["ID", "NAME", "TO STATUS"];

fn rows(transitions: &[Transition]) -> Vec<Vec<String>> {
    transitions
        .iter()
        .map(|t| vec![t.id.clone(), t.name.clone(), or_dash(t.to_status())])
        .collect()
}

pub async fn list(client: &JiraClient, view: &mut View, key: &str) -> Result<()> {
    let transitions = client.get_transitions(key).await?;
    if transitions.is_empty() {
        view.info(&format!("No transitions available for {key}"))?;
        return Ok(());
    }
    view.render(HEADERS, rows(&transitions), &transitions)?;
    Ok(())
}

/// Apply a transition by ID or name.
///
/// On a miss the available transitions are listed before the error is
/// returned, so the user can pick a valid one.
pub async fn run(client: &JiraClient, view: &mut View, key: &str, name_or_id: &str) -> Result<()> {
    match client.transition_issue(key, name_or_id).await {
        Ok(transition) => {
            view.success(&format!(
                "Transitioned {key} via '{}' to {}",
                transition.name,
                or_dash(transition.to_status())
            ))?;
            Ok(())
        }
        Err(ApiError::TransitionNotFound { requested, available }) => {
            report_missing(view, &requested, &available)?;
            Err(ApiError::TransitionNotFound { requested, available }.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn report_missing<W: Write, E: Write>(
    view: &mut View<W, E>,
    requested: &str,
    available: &[Transition],
) -> io::Result<()> {
    view.error(&format!("Transition '{requested}' not found"))?;
    view.note("Available transitions:")?;
    for t in available {
        view.note(&format!("  {}: {} -> {}", t.id, t.name, or_dash(t.to_status())))?;
    }
    Ok(())
}
