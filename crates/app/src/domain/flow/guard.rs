//! Step entry guards.

use thiserror::Error;

use crate::domain::{drafts::models::OrderDraft, flow::steps::FlowStep};

/// Shown when checkout is attempted before the box is complete.
pub const INCOMPLETE_SELECTION_MESSAGE: &str =
    "You must select a card, book, and treat before checkout.";

/// A refused step entry and where to send the shopper instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{requested} is not available yet, go back to {redirect}")]
pub struct StepRedirect {
    pub requested: FlowStep,
    pub redirect: FlowStep,
}

impl StepRedirect {
    const fn to(requested: FlowStep, redirect: FlowStep) -> Self {
        Self {
            requested,
            redirect,
        }
    }

    /// Message to show alongside the redirect. Only a refused checkout
    /// carries one; other steps are simply skipped back.
    pub const fn message(&self) -> Option<&'static str> {
        match self.requested {
            FlowStep::Checkout => Some(INCOMPLETE_SELECTION_MESSAGE),
            _ => None,
        }
    }
}

/// Decide whether `step` may be entered with `draft`.
///
/// Guards only ever send the shopper backward, to the earliest prerequisite
/// that is not met, so revisiting an earlier step is always allowed.
///
/// # Errors
///
/// Returns the redirect when a prerequisite of `step` is missing.
pub fn guard(step: FlowStep, draft: &OrderDraft) -> Result<(), StepRedirect> {
    let redirect = match step {
        FlowStep::SelectAgency | FlowStep::ThankYou => None,
        FlowStep::DemographicIntake | FlowStep::SelectCard => {
            (!draft.has_agency()).then_some(FlowStep::SelectAgency)
        }
        FlowStep::GetReadyToShop => {
            if !draft.has_agency() {
                Some(FlowStep::SelectAgency)
            } else if !draft.has_child_details() {
                Some(FlowStep::DemographicIntake)
            } else {
                None
            }
        }
        FlowStep::SelectBook => (!draft.has_card()).then_some(FlowStep::SelectCard),
        FlowStep::SelectTreat => (!draft.has_book()).then_some(FlowStep::SelectBook),
        FlowStep::SelectGifts => (!draft.can_select_gifts()).then_some(FlowStep::SelectTreat),
        FlowStep::Review => {
            if !draft.has_agency() {
                Some(FlowStep::SelectAgency)
            } else if !draft.can_select_gifts() {
                Some(FlowStep::SelectCard)
            } else {
                None
            }
        }
        FlowStep::Checkout => {
            let complete =
                draft.has_agency() && !draft.items().is_empty() && draft.can_select_gifts();

            (!complete).then_some(FlowStep::Review)
        }
    };

    match redirect {
        Some(redirect) => Err(StepRedirect::to(step, redirect)),
        None => Ok(()),
    }
}
