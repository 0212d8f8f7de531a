//! Pure wizard state machine.
//!
//! `transition` is a total function over (state, draft, event). It never
//! performs I/O and never mutates the draft; everything with a side effect
//! comes back as a [`WizardAction`] for the caller to run.

use chrono::NaiveDate;

use crate::geo::GeoResource;
use crate::orgs;
use crate::registration::{validate, FieldErrors, RegistrationDraft};
use crate::wizard::action::WizardAction;
use crate::wizard::event::{GeoScope, SubmitFailure, WizardEvent};
use crate::wizard::state::{FormError, WizardPhase, WizardState};
use crate::wizard::step::WizardStep;

pub struct WizardMachine;

impl WizardMachine {
    /// Validators for one step, keyed errors on failure.
    pub fn validate_step(
        step: WizardStep,
        draft: &RegistrationDraft,
        today: NaiveDate,
    ) -> FieldErrors {
        match step {
            WizardStep::Account => validate::validate_account(draft),
            WizardStep::Personal => validate::validate_personal(draft, today),
            WizardStep::Service => validate::validate_service(draft),
            WizardStep::Nominees => validate::validate_nominees(draft),
        }
    }

    /// True when `step` would let the member move forward right now.
    pub fn can_advance(step: WizardStep, draft: &RegistrationDraft, today: NaiveDate) -> bool {
        Self::validate_step(step, draft, today).is_empty()
    }

    pub fn transition(
        mut state: WizardState,
        draft: &RegistrationDraft,
        event: WizardEvent,
        today: NaiveDate,
    ) -> (WizardState, Vec<WizardAction>) {
        match event {
            WizardEvent::Next => {
                if !state.is_editing() {
                    return (state, Vec::new());
                }
                let errors = Self::validate_step(state.step, draft, today);
                let clean = errors.is_empty();
                state.field_errors = errors;
                if clean {
                    if let Some(next) = state.step.next() {
                        state.step = next;
                    }
                }
                (state, Vec::new())
            }
            WizardEvent::Back => {
                if state.is_editing() {
                    if let Some(prev) = state.step.prev() {
                        state.step = prev;
                    }
                }
                (state, Vec::new())
            }
            WizardEvent::JumpTo { index } => {
                // Step indicators navigate freely; validation only gates
                // forward movement via Next and Submit.
                if state.is_editing() {
                    if let Some(step) = WizardStep::from_index(index) {
                        state.step = step;
                    }
                }
                (state, Vec::new())
            }

            WizardEvent::StatesRequested => {
                state.geo.states = GeoResource::Loading;
                (state, vec![WizardAction::LoadStates])
            }
            WizardEvent::StatesLoaded { states } => {
                state.geo.states = GeoResource::Loaded(states);
                (state, Vec::new())
            }
            WizardEvent::StateChanged { code } => {
                if code.is_empty() {
                    state.geo.selected_state = None;
                    state.geo.cities = GeoResource::Loaded(Vec::new());
                    return (state, vec![WizardAction::ClearDistrict]);
                }
                state.geo.selected_state = Some(code.clone());
                state.geo.cities = GeoResource::Loading;
                (
                    state,
                    vec![
                        WizardAction::ClearDistrict,
                        WizardAction::LoadCities { state_code: code },
                    ],
                )
            }
            WizardEvent::CitiesLoaded { state_code, cities } => {
                if state.geo.is_current_state(&state_code) {
                    state.geo.cities = GeoResource::Loaded(cities);
                } else {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(%state_code, "dropping city results for a superseded state");
                }
                (state, Vec::new())
            }
            WizardEvent::GeoUnavailable { scope } => {
                match scope {
                    GeoScope::States => state.geo.states = GeoResource::Unavailable,
                    GeoScope::Cities { state_code } => {
                        if state.geo.is_current_state(&state_code) {
                            state.geo.cities = GeoResource::Unavailable;
                        }
                    }
                }
                (state, Vec::new())
            }

            WizardEvent::DepartmentChanged { department } => {
                // The organisation reset is unconditional, re-picking the
                // same department clears it too.
                state.org_options = orgs::options_for_department(&department);
                (state, vec![WizardAction::ClearOrganisation])
            }

            WizardEvent::Submit => {
                if !state.is_editing() || state.step != WizardStep::Nominees {
                    return (state, Vec::new());
                }
                let mut errors = validate::validate_nominees(draft);
                errors.extend(validate::validate_submission_gate(draft));
                let clean = errors.is_empty();
                state.field_errors = errors;
                if clean {
                    state.form_error = None;
                    state.phase = WizardPhase::Submitting;
                    (state, vec![WizardAction::AssembleAndSubmit])
                } else {
                    (state, Vec::new())
                }
            }
            WizardEvent::SubmissionSucceeded { token } => {
                if state.is_submitting() {
                    state.phase = WizardPhase::Completed { token };
                    state.field_errors.clear();
                    state.form_error = None;
                    (state, vec![WizardAction::DiscardDraft])
                } else {
                    (state, Vec::new())
                }
            }
            WizardEvent::SubmissionFailed { failure } => {
                if state.is_submitting() {
                    state.phase = WizardPhase::Editing;
                    match failure {
                        SubmitFailure::Rejected {
                            message,
                            field_errors,
                        } => {
                            for (key, msg) in field_errors {
                                state
                                    .field_errors
                                    .insert(key, validate::ValidationError::Server { message: msg });
                            }
                            state.form_error = Some(FormError::Rejected { message });
                        }
                        SubmitFailure::Unreachable => {
                            state.form_error = Some(FormError::Unreachable);
                        }
                    }
                }
                (state, Vec::new())
            }
            WizardEvent::DismissFormError => {
                state.form_error = None;
                (state, Vec::new())
            }
        }
    }
}
