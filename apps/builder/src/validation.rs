//! Form-boundary validation.
//!
//! Forms call these before handing input to the document mutations. The
//! repository never does: an incomplete resume is still a valid draft.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{Certification, Education, Experience, PersonalInfo, Project, Skill};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub passed: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Collects field errors in form order.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn required(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, message);
        }
        self
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    fn finish(self) -> ValidationReport {
        ValidationReport {
            passed: self.errors.is_empty(),
            errors: self.errors,
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn validate_personal_info(info: &PersonalInfo) -> ValidationReport {
    let mut c = Checker::default();
    c.required("firstName", &info.first_name, "First name is required")
        .required("lastName", &info.last_name, "Last name is required");
    if info.email.trim().is_empty() {
        c.fail("email", "Email is required");
    } else if !is_valid_email(info.email.trim()) {
        c.fail("email", "Invalid email address");
    }
    c.required("phone", &info.phone, "Phone is required")
        .required("location", &info.location, "Location is required")
        .required("summary", &info.summary, "Summary is required");
    c.finish()
}

pub fn validate_experience(exp: &Experience) -> ValidationReport {
    let mut c = Checker::default();
    c.required("position", &exp.position, "Position is required")
        .required("company", &exp.company, "Company is required")
        .required("location", &exp.location, "Location is required")
        .required("startDate", &exp.start_date, "Start date is required")
        .required("description", &exp.description, "Description is required");
    check_date_order(&mut c, &exp.start_date, &exp.end_date, exp.current);
    c.finish()
}

pub fn validate_education(edu: &Education) -> ValidationReport {
    let mut c = Checker::default();
    c.required("degree", &edu.degree, "Degree is required")
        .required("field", &edu.field, "Field of study is required")
        .required("institution", &edu.institution, "Institution is required")
        .required("location", &edu.location, "Location is required")
        .required("startDate", &edu.start_date, "Start date is required");
    check_date_order(&mut c, &edu.start_date, &edu.end_date, edu.current);
    c.finish()
}

pub fn validate_skill(skill: &Skill) -> ValidationReport {
    let mut c = Checker::default();
    c.required("name", &skill.name, "Skill name is required");
    c.finish()
}

pub fn validate_project(project: &Project) -> ValidationReport {
    let mut c = Checker::default();
    c.required("name", &project.name, "Project name is required")
        .required("description", &project.description, "Description is required");
    c.finish()
}

pub fn validate_certification(cert: &Certification) -> ValidationReport {
    let mut c = Checker::default();
    c.required("name", &cert.name, "Certification name is required")
        .required("issuer", &cert.issuer, "Issuer is required")
        .required("issueDate", cert.issued_on(), "Issue date is required");
    c.finish()
}

/// Splits comma-separated form input, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ISO dates compare correctly as strings.
fn check_date_order(c: &mut Checker, start: &str, end: &str, current: bool) {
    if current || start.is_empty() || end.is_empty() {
        return;
    }
    if end < start {
        c.fail("endDate", "End date must not be before start date");
    }
}
