use chrono::Utc;

use super::common::*;
use crate::jobs::draft::{ImportantDateDraft, ImportantDateField, JobDraft, JobField};
use crate::jobs::validation::{validate, FieldKey};

#[test]
fn valid_draft_has_no_errors() {
    let errors = validate(&valid_draft(), Utc::now());
    assert!(errors.is_valid(), "unexpected errors: {errors:?}");
}

#[test]
fn empty_draft_reports_every_required_field_at_once() {
    let errors = validate(&JobDraft::default(), Utc::now());

    let expected = [
        (JobField::Title, "Title is required"),
        (JobField::Slug, "Slug is required"),
        (JobField::HtmlContent, "Content must be at least 100 characters"),
        (JobField::Organization, "Organization is required"),
        (JobField::Location, "Location is required"),
        (JobField::Salary, "Salary is required"),
        (JobField::LastDate, "Last date is required"),
        (JobField::ApplyLink, "Apply link is required"),
        (JobField::Description, "Description must be at least 100 characters"),
        (JobField::Eligibility, "Eligibility must be at least 50 characters"),
        (JobField::TotalVacancy, "Total vacancy is required"),
    ];
    for (field, message) in expected {
        assert_eq!(errors.get(field), Some(message), "field {field}");
    }
    assert_eq!(errors.len(), expected.len());
    assert!(!errors.contains(JobField::AgeLimit));
    assert!(!errors.contains(JobField::SourceUrl));
}

#[test]
fn salary_accepts_amount_with_currency_code() {
    for salary in ["50000 USD", "50000USD", "1234.50 INR", "7 EUR", "99.9   GBP"] {
        let mut draft = valid_draft();
        draft.salary = salary.to_string();
        let errors = validate(&draft, Utc::now());
        assert!(!errors.contains(JobField::Salary), "{salary} should pass");
    }
}

#[test]
fn salary_rejects_malformed_values() {
    for salary in ["50000", "50000 usd", "50000 US", "50000 USDT", "USD 50000", "5,000 USD", ".5 USD"] {
        let mut draft = valid_draft();
        draft.salary = salary.to_string();
        let errors = validate(&draft, Utc::now());
        assert_eq!(
            errors.get(JobField::Salary),
            Some("Salary must be a number followed by currency code (e.g., \"50000 USD\")"),
            "{salary} should fail"
        );
    }
}

#[test]
fn slug_must_be_lowercase_hyphenated() {
    for slug in ["ssc-cgl-2030", "upsc", "a1-b2-c3"] {
        let mut draft = valid_draft();
        draft.slug = slug.to_string();
        assert!(!validate(&draft, Utc::now()).contains(JobField::Slug), "{slug}");
    }

    for slug in ["SSC-cgl", "ssc cgl", "-ssc", "ssc-", "ssc--cgl", "ssc_cgl"] {
        let mut draft = valid_draft();
        draft.slug = slug.to_string();
        assert_eq!(
            validate(&draft, Utc::now()).get(JobField::Slug),
            Some("Slug must be URL-friendly (lowercase letters, numbers, and hyphens)"),
            "{slug}"
        );
    }
}

#[test]
fn link_vacancy_and_age_limit_formats_are_checked() {
    let mut draft = valid_draft();
    draft.apply_link = "ssc.gov.in".to_string();
    draft.source_url = "ftp://ssc.gov.in".to_string();
    draft.total_vacancy = "12 posts".to_string();
    draft.age_limit = "18 to 32".to_string();

    let errors = validate(&draft, Utc::now());
    assert_eq!(errors.get(JobField::ApplyLink), Some("Must be a valid URL"));
    assert_eq!(errors.get(JobField::SourceUrl), Some("Must be a valid URL"));
    assert_eq!(
        errors.get(JobField::TotalVacancy),
        Some("Total vacancy must be a number")
    );
    assert_eq!(
        errors.get(JobField::AgeLimit),
        Some("Age limit must be in format \"min-max\" (e.g., \"18-35\")")
    );
    assert_eq!(errors.len(), 4);
}

#[test]
fn optional_fields_may_be_blank() {
    let mut draft = valid_draft();
    draft.age_limit.clear();
    draft.source_url.clear();
    draft.meta_title.clear();
    draft.meta_description.clear();
    assert!(validate(&draft, Utc::now()).is_valid());
}

#[test]
fn minimum_lengths_count_characters() {
    let mut draft = valid_draft();
    draft.eligibility = "é".repeat(50);
    assert!(!validate(&draft, Utc::now()).contains(JobField::Eligibility));

    draft.eligibility = "x".repeat(49);
    assert!(validate(&draft, Utc::now()).contains(JobField::Eligibility));
}

#[test]
fn past_last_date_is_flagged_until_moved_forward() {
    let mut draft = valid_draft();
    draft.title.clear();
    draft.last_date = input_in(-1);

    let now = Utc::now();
    let errors = validate(&draft, now);
    assert_eq!(
        errors.get(JobField::LastDate),
        Some("Last date must be in the future")
    );
    assert_eq!(errors.get(JobField::Title), Some("Title is required"));

    draft.last_date = input_in(7);
    let errors = validate(&draft, now);
    assert!(!errors.contains(JobField::LastDate));
    assert_eq!(errors.get(JobField::Title), Some("Title is required"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn unparseable_dates_are_reported() {
    let mut draft = valid_draft();
    draft.last_date = "next friday".to_string();
    let errors = validate(&draft, Utc::now());
    assert_eq!(
        errors.get(JobField::LastDate),
        Some("Last date must be a valid date and time")
    );
}

#[test]
fn important_dates_are_checked_per_row() {
    let mut draft = valid_draft();
    draft.important_dates = vec![
        ImportantDateDraft {
            label: "Admit card".to_string(),
            date: input_in(10),
        },
        ImportantDateDraft {
            label: String::new(),
            date: String::new(),
        },
        ImportantDateDraft {
            label: "Result".to_string(),
            date: input_in(-3),
        },
    ];

    let errors = validate(&draft, Utc::now());
    assert_eq!(errors.important_date(0, ImportantDateField::Label), None);
    assert_eq!(errors.important_date(0, ImportantDateField::Date), None);
    assert_eq!(
        errors.important_date(1, ImportantDateField::Label),
        Some("Label is required")
    );
    assert_eq!(
        errors.important_date(1, ImportantDateField::Date),
        Some("Date is required")
    );
    assert_eq!(
        errors.important_date(2, ImportantDateField::Date),
        Some("Date must be in the future")
    );
    assert_eq!(errors.len(), 3);

    let keys: Vec<String> = errors.iter().map(|(key, _)| key.to_string()).collect();
    assert_eq!(
        keys,
        vec![
            "importantDates[1].label",
            "importantDates[1].date",
            "importantDates[2].date",
        ]
    );
}

#[test]
fn validation_is_idempotent_for_a_fixed_instant() {
    let mut draft = JobDraft::default();
    draft.slug = "Bad Slug".to_string();
    draft.important_dates.push(ImportantDateDraft::default());

    let now = Utc::now();
    let first = validate(&draft, now);
    let second = validate(&draft, now);
    assert_eq!(first, second);
    assert!(first.contains(FieldKey::ImportantDate {
        index: 0,
        field: ImportantDateField::Label,
    }));
}

#[test]
fn errors_serialize_with_display_keys() {
    let mut draft = valid_draft();
    draft.title.clear();
    draft.important_dates[0].label.clear();

    let json = serde_json::to_value(validate(&draft, Utc::now())).expect("serializes");
    assert_eq!(json["title"], "Title is required");
    assert_eq!(json["importantDates[0].label"], "Label is required");
}
