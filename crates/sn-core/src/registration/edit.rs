//! Draft edits.
//!
//! Every field mutation the surface can make is expressed as one of these
//! values and funnelled through [`RegistrationDraft::apply`]. Edits that do
//! not apply to the draft's current shape (employee fields on a pensioner
//! draft, nominee indexes that no longer exist) are dropped silently.
//!
//! State and department selection are deliberately absent here: both have
//! cascade effects (city reload, organisation reset) and go through the
//! wizard machine instead.

use crate::registration::draft::{FileAttachment, MembershipKind, RegistrationDraft, Sex};
use crate::registration::nominee::Relation;
use crate::registration::validate::normalize_ifsc;

/// A single mutation of the registration draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    Membership(MembershipKind),

    // Account step
    IdentifierCode(String),
    Password(String),
    PasswordConfirmation(String),

    // Personal step
    FullName(String),
    DateOfBirth(String),
    Sex(Sex),
    AadhaarNumber(String),
    Phone(String),
    Email(String),
    ProfilePhoto(Option<FileAttachment>),
    AadhaarFront(Option<FileAttachment>),
    AadhaarBack(Option<FileAttachment>),

    // Service step, employee shape
    District(String),
    Organisation(String),
    Designation(String),
    DateOfJoining(String),

    // Service step, pensioner shape
    DateOfRetirement(String),
    RetirementDocument(Option<FileAttachment>),

    // Bank details
    AccountNumber(String),
    AccountNumberConfirmation(String),
    IfscCode(String),
    BankName(String),

    // Nominee roster
    AddNominee,
    RemoveNominee(usize),
    SetNomineePrimary(usize),
    Nominee(usize, NomineeEdit),
}

/// A mutation of one nominee slot.
#[derive(Debug, Clone, PartialEq)]
pub enum NomineeEdit {
    Name(String),
    Relation(Relation),
    DateOfBirth(String),
    AadhaarNumber(String),
    AccountNumber(String),
    AccountNumberConfirmation(String),
    IfscCode(String),
    BankName(String),
    BranchName(String),
    AadhaarFront(Option<FileAttachment>),
    AadhaarBack(Option<FileAttachment>),
}

impl RegistrationDraft {
    /// Applies one edit to the draft.
    ///
    /// IFSC codes are normalized to uppercase as they are stored.
    pub fn apply(&mut self, edit: DraftEdit) {
        match edit {
            DraftEdit::Membership(kind) => self.set_membership(kind),

            DraftEdit::IdentifierCode(value) => self.credentials.identifier_code = value,
            DraftEdit::Password(value) => self.credentials.password = value,
            DraftEdit::PasswordConfirmation(value) => {
                self.credentials.password_confirmation = value
            }

            DraftEdit::FullName(value) => self.personal.full_name = value,
            DraftEdit::DateOfBirth(value) => self.personal.date_of_birth = value,
            DraftEdit::Sex(value) => self.personal.sex = Some(value),
            DraftEdit::AadhaarNumber(value) => self.personal.aadhaar_number = value,
            DraftEdit::Phone(value) => self.personal.phone = value,
            DraftEdit::Email(value) => self.personal.email = value,
            DraftEdit::ProfilePhoto(file) => self.personal.profile_photo = file,
            DraftEdit::AadhaarFront(file) => self.personal.aadhaar_front = file,
            DraftEdit::AadhaarBack(file) => self.personal.aadhaar_back = file,

            DraftEdit::District(value) => {
                if let Some(employee) = self.service.as_employee_mut() {
                    employee.district = value;
                }
            }
            DraftEdit::Organisation(value) => {
                if let Some(employee) = self.service.as_employee_mut() {
                    employee.organisation = value;
                }
            }
            DraftEdit::Designation(value) => {
                if let Some(employee) = self.service.as_employee_mut() {
                    employee.designation = value;
                }
            }
            DraftEdit::DateOfJoining(value) => {
                if let Some(employee) = self.service.as_employee_mut() {
                    employee.date_of_joining = value;
                }
            }

            DraftEdit::DateOfRetirement(value) => {
                if let Some(pensioner) = self.service.as_pensioner_mut() {
                    pensioner.date_of_retirement = value;
                }
            }
            DraftEdit::RetirementDocument(file) => {
                if let Some(pensioner) = self.service.as_pensioner_mut() {
                    pensioner.retirement_document = file;
                }
            }

            DraftEdit::AccountNumber(value) => self.bank.account_number = value,
            DraftEdit::AccountNumberConfirmation(value) => {
                self.bank.account_number_confirmation = value
            }
            DraftEdit::IfscCode(value) => self.bank.ifsc_code = normalize_ifsc(&value),
            DraftEdit::BankName(value) => self.bank.bank_name = value,

            DraftEdit::AddNominee => {
                self.nominees.add();
            }
            DraftEdit::RemoveNominee(index) => self.nominees.remove(index),
            DraftEdit::SetNomineePrimary(index) => self.nominees.set_primary(index),
            DraftEdit::Nominee(index, edit) => {
                if let Some(nominee) = self.nominees.get_mut(index) {
                    match edit {
                        NomineeEdit::Name(value) => nominee.name = value,
                        NomineeEdit::Relation(value) => nominee.relation = Some(value),
                        NomineeEdit::DateOfBirth(value) => nominee.date_of_birth = value,
                        NomineeEdit::AadhaarNumber(value) => nominee.aadhaar_number = value,
                        NomineeEdit::AccountNumber(value) => nominee.bank.account_number = value,
                        NomineeEdit::AccountNumberConfirmation(value) => {
                            nominee.bank.account_number_confirmation = value
                        }
                        NomineeEdit::IfscCode(value) => {
                            nominee.bank.ifsc_code = normalize_ifsc(&value)
                        }
                        NomineeEdit::BankName(value) => nominee.bank.bank_name = value,
                        NomineeEdit::BranchName(value) => nominee.bank.branch_name = value,
                        NomineeEdit::AadhaarFront(file) => nominee.aadhaar_front = file,
                        NomineeEdit::AadhaarBack(file) => nominee.aadhaar_back = file,
                    }
                }
            }
        }
    }
}
