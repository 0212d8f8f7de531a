//! Registration domain module.
//!
//! Holds the accumulated enrolment draft, the edits that mutate it, the
//! nominee roster and the field validators the wizard runs per step.

pub mod draft;
pub mod edit;
pub mod nominee;
pub mod validate;

pub use draft::{
    BankDetails, Credentials, EmployeeService, FileAttachment, MembershipKind, PensionerService,
    PersonalDetails, RegistrationDraft, ServiceDetails, Sex,
};
pub use edit::{DraftEdit, NomineeEdit};
pub use nominee::{NomineeBank, NomineeDraft, NomineeId, NomineeRoster, Relation, MAX_NOMINEES};
pub use validate::{FieldErrors, ValidationError};
