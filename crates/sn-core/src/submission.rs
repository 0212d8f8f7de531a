//! Submission assembler.
//!
//! Converts a registration draft into the flat multipart contract the
//! registry expects: scalar form fields, three JSON-encoded detail
//! sections, a JSON nominee array and the file attachments. Pure, no I/O;
//! the gateway adapter turns the result into an actual multipart request.
//!
//! Client-side-only values never leave here: neither re-entry
//! confirmation field is part of any encoded section.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::registration::draft::{FileAttachment, RegistrationDraft, ServiceDetails, Sex};
use crate::registration::nominee::{NomineeDraft, Relation};
use crate::registration::validate::age_on;

/// One text field of the multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadField {
    pub name: String,
    pub value: String,
}

impl PayloadField {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One file part of the multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub name: String,
    pub attachment: FileAttachment,
}

/// The assembled submission, ready for the registration gateway.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationPayload {
    pub fields: Vec<PayloadField>,
    pub files: Vec<FilePart>,
}

impl RegistrationPayload {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    pub fn file(&self, name: &str) -> Option<&FilePart> {
        self.files.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("failed to encode payload section: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersonalDetailsWire<'a> {
    full_name: &'a str,
    date_of_birth: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sex: Option<Sex>,
    /// Derived at submission time, not stored in the draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<i32>,
    aadhaar_number: &'a str,
    phone: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BankDetailsWire<'a> {
    account_number: &'a str,
    ifsc_code: &'a str,
    bank_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeDetailsWire<'a> {
    state: &'a str,
    district: &'a str,
    organisation: &'a str,
    department: &'a str,
    designation: &'a str,
    date_of_joining: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PensionerDetailsWire<'a> {
    state: &'a str,
    date_of_retirement: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NomineeBankWire<'a> {
    account_number: &'a str,
    ifsc_code: &'a str,
    bank_name: &'a str,
    branch_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NomineeWire<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    relation: Option<Relation>,
    date_of_birth: &'a str,
    aadhaar_number: &'a str,
    is_primary: bool,
    bank: NomineeBankWire<'a>,
}

impl<'a> NomineeWire<'a> {
    fn from_draft(nominee: &'a NomineeDraft) -> Self {
        Self {
            name: &nominee.name,
            relation: nominee.relation,
            date_of_birth: &nominee.date_of_birth,
            aadhaar_number: &nominee.aadhaar_number,
            is_primary: nominee.is_primary,
            bank: NomineeBankWire {
                account_number: &nominee.bank.account_number,
                ifsc_code: &nominee.bank.ifsc_code,
                bank_name: &nominee.bank.bank_name,
                branch_name: &nominee.bank.branch_name,
            },
        }
    }
}

fn push_file(files: &mut Vec<FilePart>, name: impl Into<String>, file: &Option<FileAttachment>) {
    if let Some(attachment) = file {
        files.push(FilePart {
            name: name.into(),
            attachment: attachment.clone(),
        });
    }
}

/// Flattens the draft into the registry's multipart contract.
///
/// Untouched nominee slots are dropped; file keys for the remaining
/// nominees are numbered by their position in the submitted array.
pub fn assemble(
    draft: &RegistrationDraft,
    today: NaiveDate,
) -> Result<RegistrationPayload, AssembleError> {
    let mut fields = Vec::new();
    let mut files = Vec::new();

    let kind = draft.membership();
    fields.push(PayloadField::new("userType", kind.wire_value()));
    fields.push(PayloadField::new(
        kind.identifier_field(),
        &draft.credentials.identifier_code,
    ));
    fields.push(PayloadField::new("password", &draft.credentials.password));

    let personal = PersonalDetailsWire {
        full_name: &draft.personal.full_name,
        date_of_birth: &draft.personal.date_of_birth,
        sex: draft.personal.sex,
        age: age_on(&draft.personal.date_of_birth, today),
        aadhaar_number: &draft.personal.aadhaar_number,
        phone: &draft.personal.phone,
        email: &draft.personal.email,
    };
    fields.push(PayloadField::new(
        "personalDetails",
        serde_json::to_string(&personal)?,
    ));

    let bank = BankDetailsWire {
        account_number: &draft.bank.account_number,
        ifsc_code: &draft.bank.ifsc_code,
        bank_name: &draft.bank.bank_name,
    };
    fields.push(PayloadField::new(
        "bankDetails",
        serde_json::to_string(&bank)?,
    ));

    let employment = match &draft.service {
        ServiceDetails::Employee(employee) => serde_json::to_string(&EmployeeDetailsWire {
            state: &employee.state_code,
            district: &employee.district,
            organisation: &employee.organisation,
            department: &employee.department,
            designation: &employee.designation,
            date_of_joining: &employee.date_of_joining,
        })?,
        ServiceDetails::Pensioner(pensioner) => serde_json::to_string(&PensionerDetailsWire {
            state: &pensioner.state_code,
            date_of_retirement: &pensioner.date_of_retirement,
        })?,
    };
    fields.push(PayloadField::new("employmentDetails", employment));

    let submitted: Vec<&NomineeDraft> = draft.nominees.iter().filter(|n| n.is_dirty()).collect();
    let nominee_wire: Vec<NomineeWire<'_>> = submitted
        .iter()
        .map(|nominee| NomineeWire::from_draft(nominee))
        .collect();
    fields.push(PayloadField::new(
        "nominees",
        serde_json::to_string(&nominee_wire)?,
    ));

    push_file(&mut files, "profilePhoto", &draft.personal.profile_photo);
    push_file(&mut files, "aadhaarFront", &draft.personal.aadhaar_front);
    push_file(&mut files, "aadhaarBack", &draft.personal.aadhaar_back);
    if let Some(pensioner) = draft.service.as_pensioner() {
        push_file(
            &mut files,
            "retirementDocument",
            &pensioner.retirement_document,
        );
    }
    for (index, nominee) in submitted.iter().enumerate() {
        push_file(
            &mut files,
            format!("nomineeAadhaarFront_{index}"),
            &nominee.aadhaar_front,
        );
        push_file(
            &mut files,
            format!("nomineeAadhaarBack_{index}"),
            &nominee.aadhaar_back,
        );
    }

    Ok(RegistrationPayload { fields, files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{DraftEdit, MembershipKind, NomineeEdit};
    use serde_json::Value;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn attachment(name: &str) -> FileAttachment {
        FileAttachment::new(name, "image/jpeg", vec![0xff, 0xd8])
    }

    fn employee_draft() -> RegistrationDraft {
        let mut draft = RegistrationDraft::new(MembershipKind::Employee);
        draft.service.set_state("UP");
        draft.apply(DraftEdit::IdentifierCode("EHRMS-441".into()));
        draft.apply(DraftEdit::Password("secret12".into()));
        draft.apply(DraftEdit::PasswordConfirmation("secret12".into()));
        draft.apply(DraftEdit::FullName("Ram Prasad".into()));
        draft.apply(DraftEdit::DateOfBirth("1980-03-20".into()));
        draft.apply(DraftEdit::District("Lucknow".into()));
        draft.apply(DraftEdit::AccountNumber("11223344".into()));
        draft.apply(DraftEdit::AccountNumberConfirmation("11223344".into()));
        draft.apply(DraftEdit::IfscCode("SBIN0001234".into()));
        draft
    }

    fn json_field(payload: &RegistrationPayload, name: &str) -> Value {
        serde_json::from_str(payload.field(name).unwrap()).unwrap()
    }

    #[test]
    fn employee_scalars_use_the_ehrms_key() {
        let payload = assemble(&employee_draft(), today()).unwrap();
        assert_eq!(payload.field("userType"), Some("EMPLOYEE"));
        assert_eq!(payload.field("ehrmsCode"), Some("EHRMS-441"));
        assert_eq!(payload.field("password"), Some("secret12"));
        assert_eq!(payload.field("pensionerNumber"), None);
    }

    #[test]
    fn confirmation_values_never_appear_anywhere_in_the_payload() {
        let mut draft = employee_draft();
        draft.apply(DraftEdit::AddNominee);
        draft.apply(DraftEdit::Nominee(0, NomineeEdit::Name("Asha".into())));
        draft.apply(DraftEdit::Nominee(
            0,
            NomineeEdit::AccountNumberConfirmation("99999999".into()),
        ));

        let payload = assemble(&draft, today()).unwrap();
        for field in &payload.fields {
            assert!(
                !field.value.contains("confirmAccountNumber")
                    && !field.value.contains("accountNumberConfirmation"),
                "{} leaks a confirmation value",
                field.name
            );
        }
        assert_eq!(payload.field("passwordConfirmation"), None);
    }

    #[test]
    fn age_is_derived_from_the_date_of_birth() {
        let payload = assemble(&employee_draft(), today()).unwrap();
        let personal = json_field(&payload, "personalDetails");
        assert_eq!(personal["age"], Value::from(45));
        assert_eq!(personal["fullName"], Value::from("Ram Prasad"));
    }

    #[test]
    fn employee_details_carry_the_full_service_record() {
        let payload = assemble(&employee_draft(), today()).unwrap();
        let employment = json_field(&payload, "employmentDetails");
        assert_eq!(employment["state"], Value::from("UP"));
        assert_eq!(employment["district"], Value::from("Lucknow"));
        assert!(employment.get("dateOfJoining").is_some());
        assert!(employment.get("dateOfRetirement").is_none());
    }

    #[test]
    fn pensioner_details_carry_only_state_and_retirement_date() {
        let mut draft = RegistrationDraft::new(MembershipKind::Pensioner);
        draft.service.set_state("UP");
        draft.apply(DraftEdit::IdentifierCode("PEN-102".into()));
        draft.apply(DraftEdit::DateOfRetirement("2019-06-30".into()));
        draft.apply(DraftEdit::RetirementDocument(Some(attachment("ppo.pdf"))));

        let payload = assemble(&draft, today()).unwrap();
        assert_eq!(payload.field("userType"), Some("PENSIONER"));
        assert_eq!(payload.field("pensionerNumber"), Some("PEN-102"));

        let employment = json_field(&payload, "employmentDetails");
        assert_eq!(
            employment,
            serde_json::json!({"state": "UP", "dateOfRetirement": "2019-06-30"})
        );
        assert!(payload.file("retirementDocument").is_some());
    }

    #[test]
    fn zero_nominees_assemble_to_an_empty_array_and_no_nominee_files() {
        let payload = assemble(&employee_draft(), today()).unwrap();
        assert_eq!(payload.field("nominees"), Some("[]"));
        assert!(payload
            .files
            .iter()
            .all(|f| !f.name.starts_with("nomineeAadhaar")));
    }

    #[test]
    fn untouched_slots_are_dropped_and_files_renumber_positionally() {
        let mut draft = employee_draft();
        // Slot 0 stays untouched; slot 1 is filled in and carries a file.
        draft.apply(DraftEdit::AddNominee);
        draft.apply(DraftEdit::AddNominee);
        draft.apply(DraftEdit::Nominee(1, NomineeEdit::Name("Mohan".into())));
        draft.apply(DraftEdit::Nominee(
            1,
            NomineeEdit::AadhaarFront(Some(attachment("aadhaar.jpg"))),
        ));

        let payload = assemble(&draft, today()).unwrap();
        let nominees = json_field(&payload, "nominees");
        assert_eq!(nominees.as_array().unwrap().len(), 1);
        assert_eq!(nominees[0]["name"], Value::from("Mohan"));

        // The surviving nominee is position 0 of the submitted array.
        assert!(payload.file("nomineeAadhaarFront_0").is_some());
        assert!(payload.file("nomineeAadhaarFront_1").is_none());
    }

    #[test]
    fn nominee_bank_includes_branch_and_relation_on_the_wire() {
        let mut draft = employee_draft();
        draft.apply(DraftEdit::AddNominee);
        for edit in [
            NomineeEdit::Name("Asha Devi".into()),
            NomineeEdit::Relation(Relation::Spouse),
            NomineeEdit::DateOfBirth("1985-02-11".into()),
            NomineeEdit::AadhaarNumber("234567890123".into()),
            NomineeEdit::AccountNumber("55667788".into()),
            NomineeEdit::BankName("State Bank of India".into()),
            NomineeEdit::BranchName("Hazratganj".into()),
            NomineeEdit::IfscCode("SBIN0001234".into()),
        ] {
            draft.apply(DraftEdit::Nominee(0, edit));
        }

        let payload = assemble(&draft, today()).unwrap();
        let nominees = json_field(&payload, "nominees");
        assert_eq!(nominees[0]["relation"], Value::from("SPOUSE"));
        assert_eq!(nominees[0]["isPrimary"], Value::from(true));
        assert_eq!(nominees[0]["bank"]["branchName"], Value::from("Hazratganj"));
        assert_eq!(
            nominees[0]["bank"]["accountNumber"],
            Value::from("55667788")
        );
    }

    #[test]
    fn personal_files_are_keyed_by_role() {
        let mut draft = employee_draft();
        draft.apply(DraftEdit::ProfilePhoto(Some(attachment("me.jpg"))));
        draft.apply(DraftEdit::AadhaarBack(Some(attachment("back.jpg"))));

        let payload = assemble(&draft, today()).unwrap();
        assert!(payload.file("profilePhoto").is_some());
        assert!(payload.file("aadhaarBack").is_some());
        assert!(payload.file("aadhaarFront").is_none());
    }
}
