//! Registration draft models.
//!
//! The draft is the full accumulated, not-yet-submitted enrolment form.
//! Text inputs are kept as the raw strings the member typed (empty string
//! means "not filled in"); parsing and format checks happen in the
//! validators, not here.

use serde::{Deserialize, Serialize};

use crate::registration::nominee::NomineeRoster;

/// Membership category. Decides which service sub-schema applies and which
/// identifier the account step asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipKind {
    Employee,
    Pensioner,
}

impl MembershipKind {
    /// Value transmitted in the submission payload.
    pub fn wire_value(&self) -> &'static str {
        match self {
            MembershipKind::Employee => "EMPLOYEE",
            MembershipKind::Pensioner => "PENSIONER",
        }
    }

    /// Payload field name carrying the member identifier for this kind.
    pub fn identifier_field(&self) -> &'static str {
        match self {
            MembershipKind::Employee => "ehrmsCode",
            MembershipKind::Pensioner => "pensionerNumber",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Male,
    Female,
    Other,
}

/// An uploaded document held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for FileAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep file bodies out of logs.
        f.debug_struct("FileAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Login credentials collected on the account step.
///
/// `identifier_code` holds the EHRMS code for employees and the pensioner
/// number for pensioners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub identifier_code: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Personal details collected on the second step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalDetails {
    pub full_name: String,
    /// ISO date string as entered, e.g. `"1980-04-21"`.
    pub date_of_birth: String,
    pub sex: Option<Sex>,
    pub aadhaar_number: String,
    pub phone: String,
    pub email: String,
    pub profile_photo: Option<FileAttachment>,
    pub aadhaar_front: Option<FileAttachment>,
    pub aadhaar_back: Option<FileAttachment>,
}

/// Service record of a serving employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeService {
    pub state_code: String,
    pub district: String,
    pub department: String,
    pub organisation: String,
    pub designation: String,
    pub date_of_joining: String,
}

/// Service record of a pensioner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PensionerService {
    pub state_code: String,
    pub date_of_retirement: String,
    pub retirement_document: Option<FileAttachment>,
}

/// Kind-specific service details.
///
/// Exactly one sub-schema exists at a time; switching the membership kind
/// replaces it while carrying the shared state selection over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceDetails {
    Employee(EmployeeService),
    Pensioner(PensionerService),
}

impl ServiceDetails {
    pub fn kind(&self) -> MembershipKind {
        match self {
            ServiceDetails::Employee(_) => MembershipKind::Employee,
            ServiceDetails::Pensioner(_) => MembershipKind::Pensioner,
        }
    }

    /// The state selection shared by both kinds.
    pub fn state_code(&self) -> &str {
        match self {
            ServiceDetails::Employee(e) => &e.state_code,
            ServiceDetails::Pensioner(p) => &p.state_code,
        }
    }

    pub fn set_state(&mut self, state_code: impl Into<String>) {
        match self {
            ServiceDetails::Employee(e) => e.state_code = state_code.into(),
            ServiceDetails::Pensioner(p) => p.state_code = state_code.into(),
        }
    }

    pub fn as_employee(&self) -> Option<&EmployeeService> {
        match self {
            ServiceDetails::Employee(e) => Some(e),
            ServiceDetails::Pensioner(_) => None,
        }
    }

    pub fn as_employee_mut(&mut self) -> Option<&mut EmployeeService> {
        match self {
            ServiceDetails::Employee(e) => Some(e),
            ServiceDetails::Pensioner(_) => None,
        }
    }

    pub fn as_pensioner(&self) -> Option<&PensionerService> {
        match self {
            ServiceDetails::Employee(_) => None,
            ServiceDetails::Pensioner(p) => Some(p),
        }
    }

    pub fn as_pensioner_mut(&mut self) -> Option<&mut PensionerService> {
        match self {
            ServiceDetails::Employee(_) => None,
            ServiceDetails::Pensioner(p) => Some(p),
        }
    }
}

/// Bank account of the member themselves.
///
/// `account_number_confirmation` is a client-side re-entry check and never
/// leaves the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankDetails {
    pub account_number: String,
    pub account_number_confirmation: String,
    pub ifsc_code: String,
    pub bank_name: String,
}

/// The full accumulated enrolment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub credentials: Credentials,
    pub personal: PersonalDetails,
    pub service: ServiceDetails,
    pub bank: BankDetails,
    pub nominees: NomineeRoster,
}

impl RegistrationDraft {
    /// Creates an empty draft for the given membership kind.
    pub fn new(kind: MembershipKind) -> Self {
        let service = match kind {
            MembershipKind::Employee => ServiceDetails::Employee(EmployeeService::default()),
            MembershipKind::Pensioner => ServiceDetails::Pensioner(PensionerService::default()),
        };
        Self {
            credentials: Credentials::default(),
            personal: PersonalDetails::default(),
            service,
            bank: BankDetails::default(),
            nominees: NomineeRoster::default(),
        }
    }

    pub fn membership(&self) -> MembershipKind {
        self.service.kind()
    }

    /// Switches the membership kind.
    ///
    /// Kind-specific service fields are discarded, but the state selection
    /// survives since the account step asks for it before the kind-specific
    /// fields appear. Switching to the current kind is a no-op.
    pub fn set_membership(&mut self, kind: MembershipKind) {
        if self.membership() == kind {
            return;
        }
        let state_code = self.service.state_code().to_string();
        self.service = match kind {
            MembershipKind::Employee => ServiceDetails::Employee(EmployeeService {
                state_code,
                ..EmployeeService::default()
            }),
            MembershipKind::Pensioner => ServiceDetails::Pensioner(PensionerService {
                state_code,
                ..PensionerService::default()
            }),
        };
    }

    /// Sets the department of an employee draft. No-op for pensioners, who
    /// have no department field.
    pub fn set_department(&mut self, department: impl Into<String>) {
        if let Some(employee) = self.service.as_employee_mut() {
            employee.department = department.into();
        }
    }
}

impl Default for RegistrationDraft {
    fn default() -> Self {
        Self::new(MembershipKind::Employee)
    }
}
