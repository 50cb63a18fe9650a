use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque platform record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

#[cfg(test)]
impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A job record as returned by `JobController.queryJobs`.
///
/// Owned by the remote job service: this layer only displays rows and
/// deletes them by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Title__c", default)]
    pub title: Option<String>,
    #[serde(rename = "Company__c", default)]
    pub company: Option<String>,
    #[serde(rename = "Location__c", default)]
    pub location: Option<String>,
    #[serde(rename = "Type__c", default)]
    pub job_type: Option<String>,
    #[serde(rename = "Salary__c", default)]
    pub salary: Option<Salary>,
    #[serde(rename = "Link__c", default)]
    pub link: Option<String>,
}

/// Job boards return either a bare number or free text ("$50k - $70k").
/// The value is kept as sent so it goes back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Salary {
    Number(serde_json::Number),
    Text(String),
}

impl Salary {
    fn value(&self) -> FieldValue<'_> {
        match self {
            // Any JSON number fits an f64, possibly rounded.
            Salary::Number(n) => FieldValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Salary::Text(s) => FieldValue::Text(s),
        }
    }
}

/// A cell value as the comparator sees it. Numbers compare by value and
/// order before text.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl Job {
    /// Extracts the value displayed in the given column.
    pub fn field(&self, field: JobField) -> Option<FieldValue<'_>> {
        fn text(value: &Option<String>) -> Option<FieldValue<'_>> {
            value.as_deref().map(FieldValue::Text)
        }

        match field {
            JobField::Title => text(&self.title),
            JobField::Company => text(&self.company),
            JobField::Location => text(&self.location),
            JobField::Type => text(&self.job_type),
            JobField::Salary => self.salary.as_ref().map(Salary::value),
            JobField::Link => text(&self.link),
        }
    }
}

/// The displayed (and sortable) columns of a job row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobField {
    #[serde(rename = "Title__c")]
    Title,
    #[serde(rename = "Company__c")]
    Company,
    #[serde(rename = "Location__c")]
    Location,
    #[serde(rename = "Type__c")]
    Type,
    #[serde(rename = "Salary__c")]
    Salary,
    #[serde(rename = "Link__c")]
    Link,
}

impl JobField {
    pub const ALL: [JobField; 6] = [
        JobField::Title,
        JobField::Company,
        JobField::Location,
        JobField::Type,
        JobField::Salary,
        JobField::Link,
    ];

    /// Field name as used by the platform record schema.
    pub fn api_name(self) -> &'static str {
        match self {
            JobField::Title => "Title__c",
            JobField::Company => "Company__c",
            JobField::Location => "Location__c",
            JobField::Type => "Type__c",
            JobField::Salary => "Salary__c",
            JobField::Link => "Link__c",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobField::Title => "Title",
            JobField::Company => "Company",
            JobField::Location => "Location",
            JobField::Type => "Type",
            JobField::Salary => "Salary",
            JobField::Link => "Link",
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown job field '{0}'")]
pub struct UnknownJobField(pub String);

impl FromStr for JobField {
    type Err = UnknownJobField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobField::ALL
            .into_iter()
            .find(|f| f.api_name() == s)
            .ok_or_else(|| UnknownJobField(s.to_string()))
    }
}
