//! Use cases accessor.
//!
//! [`AppRuntime`] holds the wired ports and hands out use case instances
//! with their dependencies pre-wired. Surfaces call
//! `runtime.usecases().xxx()` per operation instead of constructing use
//! cases themselves.
//!
//! ## Adding new use cases
//!
//! 1. Ensure the use case has a `from_ports()` constructor in `sn-app`
//! 2. Add a method to [`UseCases`] that calls it with the runtime's deps

use std::sync::Arc;

use sn_app::usecases::completion_prompt::{GetCompletionPrompt, MarkCompletionPromptShown};
use sn_app::usecases::landing::ResolveLanding;
use sn_app::WizardOrchestrator;
use sn_core::ports::LocalizerPort;

use crate::bootstrap::wiring::AppDeps;

/// Application runtime with dependencies.
///
/// The central point for accessing all application dependencies and use
/// cases. It wraps [`AppDeps`] and provides a [`AppRuntime::usecases`]
/// accessor.
pub struct AppRuntime {
    /// Application dependencies
    pub deps: AppDeps,
    /// Cached wizard orchestrator. Shared across all callers so the
    /// in-memory wizard state machine is not reset on every call.
    wizard_orchestrator: Arc<WizardOrchestrator>,
}

impl AppRuntime {
    /// Create a new AppRuntime from wired dependencies.
    pub fn new(deps: AppDeps) -> Self {
        let wizard_orchestrator = Arc::new(WizardOrchestrator::new(
            deps.geo.clone(),
            deps.registry.clone(),
            deps.token_store.clone(),
            deps.wizard_events.clone(),
        ));
        Self {
            deps,
            wizard_orchestrator,
        }
    }

    /// Get use cases accessor.
    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }
}

/// Use cases accessor for AppRuntime.
///
/// A factory for use case instances: callers do not need to know which
/// ports a use case takes, and all port-to-use-case wiring sits in one
/// place while the use cases themselves stay free of [`AppDeps`].
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    /// Create a new UseCases accessor from AppRuntime.
    pub fn new(runtime: &'a AppRuntime) -> Self {
        Self { runtime }
    }

    /// The enrolment wizard orchestrator.
    ///
    /// Always the same instance, so the draft and the step the member is
    /// on survive across calls.
    pub fn wizard(&self) -> Arc<WizardOrchestrator> {
        self.runtime.wizard_orchestrator.clone()
    }

    /// Read whether the profile-completion prompt was already shown.
    pub fn get_completion_prompt(&self) -> GetCompletionPrompt {
        GetCompletionPrompt::from_ports(self.runtime.deps.prompt_state.clone())
    }

    /// Record that the profile-completion prompt has been shown.
    pub fn mark_completion_prompt_shown(&self) -> MarkCompletionPromptShown {
        MarkCompletionPromptShown::from_ports(self.runtime.deps.prompt_state.clone())
    }

    /// Resolve the landing route for the stored session.
    pub fn resolve_landing(&self) -> ResolveLanding {
        ResolveLanding::from_ports(
            self.runtime.deps.sessions.clone(),
            self.runtime.deps.token_store.clone(),
        )
    }

    /// Direct access to the localizer for surface strings.
    pub fn localizer(&self) -> Arc<dyn LocalizerPort> {
        self.runtime.deps.localizer.clone()
    }
}
