//! Serializable wizard projection for a UI surface.

use serde::Serialize;

use sn_core::registration::{MembershipKind, NomineeId};
use sn_core::wizard::WizardState;

/// Point-in-time view of the wizard: the control state plus the pieces of
/// draft structure a surface cannot derive on its own.
#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
    pub state: WizardState,
    pub membership: MembershipKind,
    pub nominees: Vec<NomineeSlotView>,
    pub can_add_nominee: bool,
}

/// One nominee slot as the surface sees it.
#[derive(Debug, Clone, Serialize)]
pub struct NomineeSlotView {
    /// Stable identity of the slot; survives removals of other slots.
    pub id: NomineeId,
    pub is_primary: bool,
    /// Whether the member has started filling this slot in.
    pub dirty: bool,
}
