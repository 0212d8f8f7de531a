//! Wizard orchestrator.
//!
//! This module coordinates the wizard state machine and side effects.
//! Every member intent becomes a [`WizardEvent`] dispatched through the
//! pure machine; the actions the machine returns are executed against the
//! ports and their results fed back in as follow-up events.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, info_span, warn, Instrument};

use sn_core::ports::{
    GeoDirectoryPort, RegistrationError, RegistrationGatewayPort, TokenStorePort, WizardEventPort,
};
use sn_core::registration::{DraftEdit, RegistrationDraft, MAX_NOMINEES};
use sn_core::submission;
use sn_core::wizard::{GeoScope, SubmitFailure, WizardAction, WizardEvent, WizardMachine, WizardState};

use crate::usecases::wizard::context::WizardContext;
use crate::usecases::wizard::dto::{NomineeSlotView, WizardSnapshot};

/// Orchestrator that drives the enrolment wizard and its side effects.
///
/// Event dispatches are serialized behind the context's dispatch lock,
/// so the control state has a single logical writer. Draft edits go
/// through [`WizardOrchestrator::edit`] and serialize on the draft
/// mutex alone.
pub struct WizardOrchestrator {
    context: Arc<WizardContext>,

    geo: Arc<dyn GeoDirectoryPort>,
    registry: Arc<dyn RegistrationGatewayPort>,
    token_store: Arc<dyn TokenStorePort>,
    wizard_events: Arc<dyn WizardEventPort>,
}

impl WizardOrchestrator {
    pub fn new(
        geo: Arc<dyn GeoDirectoryPort>,
        registry: Arc<dyn RegistrationGatewayPort>,
        token_store: Arc<dyn TokenStorePort>,
        wizard_events: Arc<dyn WizardEventPort>,
    ) -> Self {
        Self {
            context: WizardContext::default().arc(),
            geo,
            registry,
            token_store,
            wizard_events,
        }
    }

    /// Kicks off the state directory load for the account step.
    pub async fn start(&self) -> WizardState {
        self.dispatch(WizardEvent::StatesRequested).await
    }

    /// Validates the current step and advances when it is clean.
    pub async fn next(&self) -> WizardState {
        self.dispatch(WizardEvent::Next).await
    }

    /// Steps back without validating.
    pub async fn back(&self) -> WizardState {
        self.dispatch(WizardEvent::Back).await
    }

    /// Jumps straight to a step indicator.
    pub async fn go_to_step(&self, index: usize) -> WizardState {
        self.dispatch(WizardEvent::JumpTo { index }).await
    }

    /// Records a state selection and reloads the dependent city options.
    pub async fn change_state(&self, code: String) -> WizardState {
        self.dispatch(WizardEvent::StateChanged { code }).await
    }

    /// Records a department selection and rebuilds the organisation options.
    pub async fn change_department(&self, department: String) -> WizardState {
        self.dispatch(WizardEvent::DepartmentChanged { department }).await
    }

    /// Validates the final step and submits the enrolment.
    pub async fn submit(&self) -> WizardState {
        self.dispatch(WizardEvent::Submit).await
    }

    /// Clears the top-level submission failure banner.
    pub async fn dismiss_form_error(&self) -> WizardState {
        self.dispatch(WizardEvent::DismissFormError).await
    }

    /// Applies one field edit to the draft.
    ///
    /// Edits never trigger validation or navigation, so no event goes
    /// through the machine. They serialize on the draft mutex alone and
    /// are not held up by a dispatch awaiting a port call.
    pub async fn edit(&self, edit: DraftEdit) {
        self.context.with_draft_mut(|draft| draft.apply(edit)).await;
    }

    /// Returns a copy of the current control state.
    pub async fn get_state(&self) -> WizardState {
        self.context.get_state().await
    }

    /// Reports whether the current step's validators pass, without
    /// advancing or touching the recorded errors.
    pub async fn can_advance(&self) -> bool {
        let state = self.context.get_state().await;
        let today = Local::now().date_naive();
        self.context
            .with_draft(|draft| WizardMachine::can_advance(state.step, draft, today))
            .await
    }

    /// Builds the serializable projection a surface renders from.
    pub async fn snapshot(&self) -> WizardSnapshot {
        let state = self.context.get_state().await;
        self.context
            .with_draft(|draft| WizardSnapshot {
                state,
                membership: draft.membership(),
                nominees: draft
                    .nominees
                    .iter()
                    .map(|nominee| NomineeSlotView {
                        id: nominee.id.clone(),
                        is_primary: nominee.is_primary,
                        dirty: nominee.is_dirty(),
                    })
                    .collect(),
                can_add_nominee: draft.nominees.len() < MAX_NOMINEES,
            })
            .await
    }

    async fn dispatch(&self, event: WizardEvent) -> WizardState {
        // Acquire dispatch lock to serialize concurrent dispatch calls.
        // This prevents race conditions where multiple calls read the same
        // state and execute duplicate actions.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.capture_selection(&event).await;

        let span = info_span!("usecase.wizard_orchestrator.dispatch", event = ?event);
        async {
            let today = Local::now().date_naive();
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = current.step;
                let event_name = format!("{:?}", event);
                let (next, actions) = self
                    .context
                    .with_draft(|draft| WizardMachine::transition(current, draft, event, today))
                    .await;
                info!(
                    from = ?from,
                    to = ?next.step,
                    phase = ?next.phase,
                    event = %event_name,
                    "wizard transition"
                );
                // The new state is published before its actions run, so
                // transient phases (states Loading, Submitting) are
                // observable while the port call is in flight.
                self.set_state_and_emit(next.clone()).await;
                current = next;
                let follow_up_events = self.execute_actions(actions, today).await;
                pending_events.extend(follow_up_events);
            }

            current
        }
        .instrument(span)
        .await
    }

    /// Mirrors the selection carried by a cascade event into the draft
    /// before it reaches the machine.
    async fn capture_selection(&self, event: &WizardEvent) {
        match event {
            WizardEvent::StateChanged { code } => {
                self.context
                    .with_draft_mut(|draft| draft.service.set_state(code.clone()))
                    .await;
            }
            WizardEvent::DepartmentChanged { department } => {
                self.context
                    .with_draft_mut(|draft| draft.set_department(department.clone()))
                    .await;
            }
            _ => {}
        }
    }

    async fn execute_actions(
        &self,
        actions: Vec<WizardAction>,
        today: NaiveDate,
    ) -> Vec<WizardEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "wizard executing action");
            match action {
                WizardAction::LoadStates => match self.geo.load_states().await {
                    Ok(states) => follow_up_events.push(WizardEvent::StatesLoaded { states }),
                    Err(err) => {
                        warn!(error = %err, "state directory load failed");
                        follow_up_events.push(WizardEvent::GeoUnavailable {
                            scope: GeoScope::States,
                        });
                    }
                },
                WizardAction::LoadCities { state_code } => {
                    match self.geo.load_cities(&state_code).await {
                        Ok(cities) => follow_up_events.push(WizardEvent::CitiesLoaded {
                            state_code,
                            cities,
                        }),
                        Err(err) => {
                            warn!(error = %err, state_code = %state_code, "city directory load failed");
                            follow_up_events.push(WizardEvent::GeoUnavailable {
                                scope: GeoScope::Cities { state_code },
                            });
                        }
                    }
                }
                WizardAction::ClearDistrict => {
                    self.context
                        .with_draft_mut(|draft| draft.apply(DraftEdit::District(String::new())))
                        .await;
                }
                WizardAction::ClearOrganisation => {
                    self.context
                        .with_draft_mut(|draft| {
                            draft.apply(DraftEdit::Organisation(String::new()))
                        })
                        .await;
                }
                WizardAction::AssembleAndSubmit => {
                    follow_up_events.push(self.assemble_and_submit(today).await);
                }
                WizardAction::DiscardDraft => {
                    self.context
                        .with_draft_mut(|draft| *draft = RegistrationDraft::default())
                        .await;
                }
            }
        }

        follow_up_events
    }

    /// Flattens the draft, performs the registration call and converts the
    /// outcome into the event the machine resolves the Submitting phase with.
    async fn assemble_and_submit(&self, today: NaiveDate) -> WizardEvent {
        let payload = self
            .context
            .with_draft(|draft| submission::assemble(draft, today))
            .await;
        let payload = match payload {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, "enrolment payload assembly failed");
                return WizardEvent::SubmissionFailed {
                    failure: SubmitFailure::Unreachable,
                };
            }
        };

        match self.registry.register(payload).await {
            Ok(token) => {
                if let Err(err) = self.token_store.set(&token).await {
                    warn!(error = %err, "failed to store the issued session token");
                }
                WizardEvent::SubmissionSucceeded { token }
            }
            Err(RegistrationError::Rejected {
                message,
                field_errors,
            }) => {
                info!(
                    rejected_fields = field_errors.len(),
                    "registration rejected by the registry"
                );
                WizardEvent::SubmissionFailed {
                    failure: SubmitFailure::Rejected {
                        message,
                        field_errors,
                    },
                }
            }
            Err(RegistrationError::Unreachable { reason }) => {
                warn!(reason = %reason, "registry unreachable during submission");
                WizardEvent::SubmissionFailed {
                    failure: SubmitFailure::Unreachable,
                }
            }
        }
    }

    async fn set_state_and_emit(&self, state: WizardState) {
        self.context.set_state(state.clone()).await;
        if let Err(err) = self.wizard_events.wizard_state_changed(&state).await {
            warn!(error = %err, "wizard state change emit failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};
    use std::time::Duration;

    use tokio::sync::Notify;

    use sn_core::geo::{CityOption, GeoResource, StateOption};
    use sn_core::ports::GeoDirectoryError;
    use sn_core::registration::{
        FileAttachment, MembershipKind, NomineeEdit, Relation, ValidationError,
    };
    use sn_core::session::SessionToken;
    use sn_core::submission::RegistrationPayload;
    use sn_core::wizard::{FormError, WizardStep};

    fn build_states() -> Vec<StateOption> {
        vec![
            StateOption {
                code: "MH".to_string(),
                name: "Maharashtra".to_string(),
            },
            StateOption {
                code: "UP".to_string(),
                name: "Uttar Pradesh".to_string(),
            },
        ]
    }

    fn build_cities(state_code: &str) -> Vec<CityOption> {
        match state_code {
            "UP" => vec![
                CityOption {
                    id: 1,
                    name: "Agra".to_string(),
                },
                CityOption {
                    id: 2,
                    name: "Lucknow".to_string(),
                },
            ],
            "MH" => vec![
                CityOption {
                    id: 3,
                    name: "Mumbai".to_string(),
                },
                CityOption {
                    id: 4,
                    name: "Pune".to_string(),
                },
            ],
            _ => Vec::new(),
        }
    }

    struct StubGeoPort;

    #[async_trait]
    impl GeoDirectoryPort for StubGeoPort {
        async fn load_states(&self) -> Result<Vec<StateOption>, GeoDirectoryError> {
            Ok(build_states())
        }

        async fn load_cities(
            &self,
            state_code: &str,
        ) -> Result<Vec<CityOption>, GeoDirectoryError> {
            Ok(build_cities(state_code))
        }
    }

    struct UnconfiguredGeoPort;

    #[async_trait]
    impl GeoDirectoryPort for UnconfiguredGeoPort {
        async fn load_states(&self) -> Result<Vec<StateOption>, GeoDirectoryError> {
            Err(GeoDirectoryError::Unconfigured)
        }

        async fn load_cities(
            &self,
            _state_code: &str,
        ) -> Result<Vec<CityOption>, GeoDirectoryError> {
            Err(GeoDirectoryError::Unconfigured)
        }
    }

    /// Geo port whose city lookup parks until the test releases it.
    struct GatedGeoPort {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl GeoDirectoryPort for GatedGeoPort {
        async fn load_states(&self) -> Result<Vec<StateOption>, GeoDirectoryError> {
            Ok(build_states())
        }

        async fn load_cities(
            &self,
            state_code: &str,
        ) -> Result<Vec<CityOption>, GeoDirectoryError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(build_cities(state_code))
        }
    }

    enum RegistryBehavior {
        Succeed(&'static str),
        Reject {
            message: Option<&'static str>,
            fields: &'static [(&'static str, &'static str)],
        },
        Unreachable,
    }

    struct MockRegistryPort {
        behavior: RegistryBehavior,
        calls: AtomicUsize,
        last_payload: StdMutex<Option<RegistrationPayload>>,
    }

    impl MockRegistryPort {
        fn succeeding(token: &'static str) -> Self {
            Self::with_behavior(RegistryBehavior::Succeed(token))
        }

        fn rejecting(
            message: Option<&'static str>,
            fields: &'static [(&'static str, &'static str)],
        ) -> Self {
            Self::with_behavior(RegistryBehavior::Reject { message, fields })
        }

        fn unreachable() -> Self {
            Self::with_behavior(RegistryBehavior::Unreachable)
        }

        fn with_behavior(behavior: RegistryBehavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
                last_payload: StdMutex::new(None),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn taken_payload(&self) -> Option<RegistrationPayload> {
            self.last_payload.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RegistrationGatewayPort for MockRegistryPort {
        async fn register(
            &self,
            payload: RegistrationPayload,
        ) -> Result<SessionToken, RegistrationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(payload);
            match &self.behavior {
                RegistryBehavior::Succeed(token) => Ok(SessionToken::new(*token)),
                RegistryBehavior::Reject { message, fields } => Err(RegistrationError::Rejected {
                    message: message.map(str::to_string),
                    field_errors: fields
                        .iter()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect(),
                }),
                RegistryBehavior::Unreachable => Err(RegistrationError::Unreachable {
                    reason: "connection refused".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct MockTokenStore {
        token: StdMutex<Option<SessionToken>>,
    }

    impl MockTokenStore {
        fn stored(&self) -> Option<SessionToken> {
            self.token.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenStorePort for MockTokenStore {
        async fn get(&self) -> anyhow::Result<Option<SessionToken>> {
            Ok(self.token.lock().unwrap().clone())
        }

        async fn set(&self, token: &SessionToken) -> anyhow::Result<()> {
            *self.token.lock().unwrap() = Some(token.clone());
            Ok(())
        }

        async fn clear(&self) -> anyhow::Result<()> {
            *self.token.lock().unwrap() = None;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockEventPort {
        emitted: tokio::sync::Mutex<Vec<WizardState>>,
    }

    impl MockEventPort {
        async fn snapshot(&self) -> Vec<WizardState> {
            self.emitted.lock().await.clone()
        }
    }

    #[async_trait]
    impl WizardEventPort for MockEventPort {
        async fn wizard_state_changed(&self, state: &WizardState) -> anyhow::Result<()> {
            self.emitted.lock().await.push(state.clone());
            Ok(())
        }
    }

    fn build_orchestrator(
        geo: Arc<dyn GeoDirectoryPort>,
        registry: Arc<MockRegistryPort>,
        token_store: Arc<MockTokenStore>,
        wizard_events: Arc<MockEventPort>,
    ) -> WizardOrchestrator {
        WizardOrchestrator::new(geo, registry, token_store, wizard_events)
    }

    fn build_default_orchestrator() -> WizardOrchestrator {
        build_orchestrator(
            Arc::new(StubGeoPort),
            Arc::new(MockRegistryPort::succeeding("token-unused")),
            Arc::new(MockTokenStore::default()),
            Arc::new(MockEventPort::default()),
        )
    }

    async fn fill_account_step(orchestrator: &WizardOrchestrator) {
        orchestrator.change_state("UP".to_string()).await;
        orchestrator
            .edit(DraftEdit::IdentifierCode("UP123456".to_string()))
            .await;
        orchestrator
            .edit(DraftEdit::Password("secret123".to_string()))
            .await;
        orchestrator
            .edit(DraftEdit::PasswordConfirmation("secret123".to_string()))
            .await;
    }

    async fn fill_submittable_draft(orchestrator: &WizardOrchestrator) {
        fill_account_step(orchestrator).await;
        orchestrator
            .edit(DraftEdit::FullName("Asha Verma".to_string()))
            .await;
        orchestrator
            .edit(DraftEdit::DateOfBirth("1990-01-15".to_string()))
            .await;
        orchestrator
            .edit(DraftEdit::AccountNumber("12345678901".to_string()))
            .await;
        orchestrator
            .edit(DraftEdit::AccountNumberConfirmation("12345678901".to_string()))
            .await;
        orchestrator
            .edit(DraftEdit::IfscCode("sbin0001234".to_string()))
            .await;
        orchestrator
            .edit(DraftEdit::BankName("State Bank of India".to_string()))
            .await;
    }

    #[tokio::test]
    async fn start_loads_states_into_the_cache() {
        let wizard_events = Arc::new(MockEventPort::default());
        let orchestrator = build_orchestrator(
            Arc::new(StubGeoPort),
            Arc::new(MockRegistryPort::succeeding("token-unused")),
            Arc::new(MockTokenStore::default()),
            wizard_events.clone(),
        );

        let state = orchestrator.start().await;

        match &state.geo.states {
            GeoResource::Loaded(states) => {
                assert_eq!(states.len(), 2);
                assert_eq!(states[0].name, "Maharashtra");
            }
            other => panic!("states not loaded: {other:?}"),
        }

        // The Loading phase was published before the directory answered.
        let emitted = wizard_events.snapshot().await;
        assert!(emitted[0].geo.states.is_loading());
        assert!(matches!(
            emitted.last().map(|state| &state.geo.states),
            Some(GeoResource::Loaded(_))
        ));
    }

    #[tokio::test]
    async fn unconfigured_directory_marks_states_unavailable() {
        let orchestrator = build_orchestrator(
            Arc::new(UnconfiguredGeoPort),
            Arc::new(MockRegistryPort::succeeding("token-unused")),
            Arc::new(MockTokenStore::default()),
            Arc::new(MockEventPort::default()),
        );

        let state = orchestrator.start().await;

        assert!(state.geo.states.is_unavailable());
    }

    #[tokio::test]
    async fn next_blocks_on_an_incomplete_account_step() {
        let orchestrator = build_default_orchestrator();

        let state = orchestrator.next().await;

        assert_eq!(state.step, WizardStep::Account);
        assert!(state.field_errors.contains_key("state"));
        assert!(state.field_errors.contains_key("identifierCode"));
        assert!(state.field_errors.contains_key("password"));
    }

    #[tokio::test]
    async fn next_advances_once_the_account_step_is_complete() {
        let orchestrator = build_default_orchestrator();
        fill_account_step(&orchestrator).await;

        let state = orchestrator.next().await;

        assert_eq!(state.step, WizardStep::Personal);
        assert!(state.field_errors.is_empty());
    }

    #[tokio::test]
    async fn change_state_reloads_cities_and_clears_the_district() {
        let orchestrator = build_default_orchestrator();
        orchestrator.change_state("UP".to_string()).await;
        orchestrator
            .edit(DraftEdit::District("Lucknow".to_string()))
            .await;

        let state = orchestrator.change_state("MH".to_string()).await;

        assert_eq!(state.geo.selected_state.as_deref(), Some("MH"));
        match &state.geo.cities {
            GeoResource::Loaded(cities) => assert_eq!(cities[0].name, "Mumbai"),
            other => panic!("cities not loaded: {other:?}"),
        }

        let district = orchestrator
            .context
            .with_draft(|draft| draft.service.as_employee().unwrap().district.clone())
            .await;
        assert_eq!(district, "");
    }

    #[tokio::test]
    async fn stale_city_results_are_dropped() {
        let orchestrator = build_default_orchestrator();
        orchestrator.change_state("MH".to_string()).await;

        // A late answer for a state the member has moved away from.
        let state = orchestrator
            .dispatch(WizardEvent::CitiesLoaded {
                state_code: "UP".to_string(),
                cities: build_cities("UP"),
            })
            .await;

        match &state.geo.cities {
            GeoResource::Loaded(cities) => assert_eq!(cities[0].name, "Mumbai"),
            other => panic!("cities not loaded: {other:?}"),
        }
    }

    #[tokio::test]
    async fn edits_land_while_a_city_lookup_is_in_flight() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let orchestrator = Arc::new(build_orchestrator(
            Arc::new(GatedGeoPort {
                entered: entered.clone(),
                release: release.clone(),
            }),
            Arc::new(MockRegistryPort::succeeding("token-unused")),
            Arc::new(MockTokenStore::default()),
            Arc::new(MockEventPort::default()),
        ));

        let dispatch = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.change_state("UP".to_string()).await }
        });
        entered.notified().await;

        // The lookup is parked inside the port with the dispatch lock held.
        tokio::time::timeout(
            Duration::from_secs(1),
            orchestrator.edit(DraftEdit::FullName("Asha Verma".to_string())),
        )
        .await
        .expect("edit queued behind the in-flight lookup");

        release.notify_one();
        let state = dispatch.await.unwrap();
        assert!(matches!(state.geo.cities, GeoResource::Loaded(_)));

        let full_name = orchestrator
            .context
            .with_draft(|draft| draft.personal.full_name.clone())
            .await;
        assert_eq!(full_name, "Asha Verma");
    }

    #[tokio::test]
    async fn department_change_rebuilds_options_and_clears_the_organisation() {
        let orchestrator = build_default_orchestrator();
        orchestrator
            .edit(DraftEdit::Organisation("Basic_Shiksha_Parishad".to_string()))
            .await;

        let state = orchestrator
            .change_department("Basic_Education".to_string())
            .await;

        assert!(!state.org_options.is_empty());
        let (department, organisation) = orchestrator
            .context
            .with_draft(|draft| {
                let employee = draft.service.as_employee().unwrap();
                (employee.department.clone(), employee.organisation.clone())
            })
            .await;
        assert_eq!(department, "Basic_Education");
        assert_eq!(organisation, "");
    }

    #[tokio::test]
    async fn jump_back_to_the_first_step_is_always_allowed() {
        let orchestrator = build_default_orchestrator();
        orchestrator.go_to_step(3).await;

        let state = orchestrator.go_to_step(0).await;

        assert_eq!(state.step, WizardStep::Account);
        assert!(state.field_errors.is_empty());
    }

    #[tokio::test]
    async fn submit_happy_path_stores_the_token_and_completes() {
        let registry = Arc::new(MockRegistryPort::succeeding("member-token-1"));
        let token_store = Arc::new(MockTokenStore::default());
        let orchestrator = build_orchestrator(
            Arc::new(StubGeoPort),
            registry.clone(),
            token_store.clone(),
            Arc::new(MockEventPort::default()),
        );
        fill_submittable_draft(&orchestrator).await;
        orchestrator.go_to_step(3).await;

        let state = orchestrator.submit().await;

        assert_eq!(
            state.completed_token().map(|token| token.as_str()),
            Some("member-token-1")
        );
        assert_eq!(registry.call_count(), 1);
        assert_eq!(
            token_store.stored().map(|token| token.as_str().to_string()),
            Some("member-token-1".to_string())
        );

        let payload = registry.taken_payload().unwrap();
        assert_eq!(payload.field("userType"), Some("EMPLOYEE"));
        assert_eq!(payload.field("ehrmsCode"), Some("UP123456"));
    }

    #[tokio::test]
    async fn successful_submission_discards_the_draft() {
        let orchestrator = build_orchestrator(
            Arc::new(StubGeoPort),
            Arc::new(MockRegistryPort::succeeding("member-token-3")),
            Arc::new(MockTokenStore::default()),
            Arc::new(MockEventPort::default()),
        );
        fill_submittable_draft(&orchestrator).await;
        orchestrator.edit(DraftEdit::AddNominee).await;
        for edit in [
            NomineeEdit::Name("Ravi Verma".to_string()),
            NomineeEdit::Relation(Relation::Spouse),
            NomineeEdit::DateOfBirth("1986-04-19".to_string()),
            NomineeEdit::AadhaarNumber("456789012345".to_string()),
            NomineeEdit::AccountNumber("99887766".to_string()),
            NomineeEdit::BankName("Bank of Baroda".to_string()),
            NomineeEdit::IfscCode("BARB0HAZRAT".to_string()),
        ] {
            orchestrator.edit(DraftEdit::Nominee(0, edit)).await;
        }
        orchestrator.go_to_step(3).await;

        let state = orchestrator.submit().await;
        assert!(state.completed_token().is_some());

        // Only the token survives the acceptance; the draft is gone.
        let snapshot = orchestrator.snapshot().await;
        assert!(snapshot.nominees.is_empty());
        assert!(snapshot.can_add_nominee);
        let identifier = orchestrator
            .context
            .with_draft(|draft| draft.credentials.identifier_code.clone())
            .await;
        assert_eq!(identifier, "");
    }

    #[tokio::test]
    async fn mismatched_account_confirmation_blocks_before_any_network_call() {
        let registry = Arc::new(MockRegistryPort::succeeding("token-unused"));
        let orchestrator = build_orchestrator(
            Arc::new(StubGeoPort),
            registry.clone(),
            Arc::new(MockTokenStore::default()),
            Arc::new(MockEventPort::default()),
        );
        fill_submittable_draft(&orchestrator).await;
        orchestrator
            .edit(DraftEdit::AccountNumberConfirmation("99988877766".to_string()))
            .await;
        orchestrator.go_to_step(3).await;

        let state = orchestrator.submit().await;

        assert!(state.is_editing());
        assert!(state.field_errors.contains_key("confirmAccountNumber"));
        assert_eq!(registry.call_count(), 0);
    }

    #[tokio::test]
    async fn rejected_submission_surfaces_server_field_errors() {
        let registry = Arc::new(MockRegistryPort::rejecting(
            Some("duplicate registration"),
            &[("email", "already registered")],
        ));
        let orchestrator = build_orchestrator(
            Arc::new(StubGeoPort),
            registry.clone(),
            Arc::new(MockTokenStore::default()),
            Arc::new(MockEventPort::default()),
        );
        fill_submittable_draft(&orchestrator).await;
        orchestrator.go_to_step(3).await;

        let state = orchestrator.submit().await;

        assert!(state.is_editing());
        assert!(matches!(state.form_error, Some(FormError::Rejected { .. })));
        assert!(matches!(
            state.field_errors.get("email"),
            Some(ValidationError::Server { .. })
        ));

        // The draft survives the rejection for a retry.
        let identifier = orchestrator
            .context
            .with_draft(|draft| draft.credentials.identifier_code.clone())
            .await;
        assert_eq!(identifier, "UP123456");
    }

    #[tokio::test]
    async fn unreachable_registry_sets_a_dismissable_form_error() {
        let orchestrator = build_orchestrator(
            Arc::new(StubGeoPort),
            Arc::new(MockRegistryPort::unreachable()),
            Arc::new(MockTokenStore::default()),
            Arc::new(MockEventPort::default()),
        );
        fill_submittable_draft(&orchestrator).await;
        orchestrator.go_to_step(3).await;

        let state = orchestrator.submit().await;
        assert!(state.is_editing());
        assert!(matches!(state.form_error, Some(FormError::Unreachable)));

        let state = orchestrator.dismiss_form_error().await;
        assert!(state.form_error.is_none());
    }

    #[tokio::test]
    async fn submitting_phase_is_emitted_before_the_gateway_answers() {
        let wizard_events = Arc::new(MockEventPort::default());
        let orchestrator = build_orchestrator(
            Arc::new(StubGeoPort),
            Arc::new(MockRegistryPort::succeeding("member-token-2")),
            Arc::new(MockTokenStore::default()),
            wizard_events.clone(),
        );
        fill_submittable_draft(&orchestrator).await;
        orchestrator.go_to_step(3).await;
        orchestrator.submit().await;

        let emitted = wizard_events.snapshot().await;
        let submitting = emitted.iter().position(|state| state.is_submitting());
        let completed = emitted
            .iter()
            .position(|state| state.completed_token().is_some());
        assert!(submitting.is_some());
        assert!(completed.is_some());
        assert!(submitting < completed);
    }

    #[tokio::test]
    async fn pensioner_service_step_requires_retirement_details() {
        let orchestrator = build_default_orchestrator();
        orchestrator
            .edit(DraftEdit::Membership(MembershipKind::Pensioner))
            .await;
        fill_account_step(&orchestrator).await;
        orchestrator.go_to_step(2).await;

        let state = orchestrator.next().await;
        assert_eq!(state.step, WizardStep::Service);
        assert!(state.field_errors.contains_key("dateOfRetirement"));
        assert!(state.field_errors.contains_key("retirementDocument"));

        orchestrator
            .edit(DraftEdit::DateOfRetirement("2020-06-30".to_string()))
            .await;
        orchestrator
            .edit(DraftEdit::RetirementDocument(Some(FileAttachment::new(
                "ppo.pdf",
                "application/pdf",
                vec![1, 2, 3],
            ))))
            .await;

        let state = orchestrator.next().await;
        assert_eq!(state.step, WizardStep::Nominees);
    }

    #[tokio::test]
    async fn snapshot_reflects_the_roster_structure() {
        let orchestrator = build_default_orchestrator();
        orchestrator.edit(DraftEdit::AddNominee).await;
        orchestrator.edit(DraftEdit::AddNominee).await;
        orchestrator
            .edit(DraftEdit::Nominee(1, NomineeEdit::Name("Asha".to_string())))
            .await;

        let snapshot = orchestrator.snapshot().await;

        assert_eq!(snapshot.membership, MembershipKind::Employee);
        assert_eq!(snapshot.nominees.len(), 2);
        assert!(snapshot.nominees[0].is_primary);
        assert!(!snapshot.nominees[0].dirty);
        assert!(!snapshot.nominees[1].is_primary);
        assert!(snapshot.nominees[1].dirty);
        assert!(!snapshot.can_add_nominee);

        let encoded = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(encoded["state"]["step"], "account");
        assert_eq!(encoded["membership"], "EMPLOYEE");
    }
}
