use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::notify::Toast;
use crate::platform::SearchRequest;

pub const KM_PER_MILE: f64 = 1.609344;
pub const DEFAULT_RADIUS_MILES: f64 = 25.0;
pub const DEFAULT_SALARY: f64 = 50_000.0;
/// Results requested per job-board page.
pub const PAGE_SIZE: u32 = 100;
const LOOKBACK_DAYS: u64 = 7;

pub fn to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

/// One week before `today`.
pub fn last_week(today: NaiveDate) -> NaiveDate {
    today - Days::new(LOOKBACK_DAYS)
}

/// "Oct 12, 2026" style label shown as the date field's placeholder.
pub fn last_week_label(today: NaiveDate) -> String {
    last_week(today).format("%b %-d, %Y").to_string()
}

/// A single field edit on the search form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FormChange {
    Keywords(Option<String>),
    Location(Option<String>),
    Radius(f64),
    Salary(Option<f64>),
    DateCreatedFrom(Option<NaiveDate>),
    Page(Option<u32>),
}

/// Field values of the job search form.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub miles: f64,
    pub salary: Option<f64>,
    pub date_created_from: Option<NaiveDate>,
    pub page: Option<u32>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            keywords: None,
            location: None,
            miles: DEFAULT_RADIUS_MILES,
            salary: Some(DEFAULT_SALARY),
            date_created_from: None,
            page: Some(1),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFormView {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub miles: f64,
    pub kilometers: f64,
    pub salary: Option<f64>,
    pub date_created_from: Option<NaiveDate>,
    pub page: Option<u32>,
    pub last_week: String,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl SearchForm {
    pub fn apply(&mut self, change: FormChange) {
        match change {
            FormChange::Keywords(v) => self.keywords = v,
            FormChange::Location(v) => self.location = v,
            FormChange::Radius(miles) => self.miles = miles,
            FormChange::Salary(v) => self.salary = v,
            FormChange::DateCreatedFrom(v) => self.date_created_from = v,
            FormChange::Page(v) => self.page = v,
        }
    }

    pub fn kilometers(&self) -> f64 {
        to_km(self.miles)
    }

    /// Start of the posting window sent to the job board.
    ///
    /// Without a picked date this is one week ago. A picked date is advanced
    /// by one day: the job board treats `datecreatedfrom` as exclusive.
    pub fn posted_since(&self, today: NaiveDate) -> NaiveDate {
        match self.date_created_from {
            None => last_week(today),
            Some(picked) => picked + Days::new(1),
        }
    }

    /// Local checks run before any remote call. The error is the toast to show.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Toast> {
        if is_blank(&self.keywords) && is_blank(&self.location) {
            return Err(Toast::error(
                "Keywords and Location cannot both be blank",
                "Enter keywords or location before searching for jobs",
            ));
        }

        if self.date_created_from.is_some_and(|picked| picked > today) {
            return Err(Toast::error(
                "Date cannot be after today",
                "Select today's date or an earlier date",
            ));
        }

        Ok(())
    }

    pub fn to_request(&self, today: NaiveDate) -> SearchRequest {
        SearchRequest {
            keywords: self.keywords.as_deref().map(|k| k.trim().to_string()),
            location: self.location.as_deref().map(|l| l.trim().to_string()),
            radius_km: self.kilometers(),
            salary: self.salary.unwrap_or(0.0),
            posted_since: self.posted_since(today),
            page: self.page.filter(|p| *p > 0).unwrap_or(1),
            page_size: PAGE_SIZE,
        }
    }

    pub fn view(&self, today: NaiveDate) -> SearchFormView {
        SearchFormView {
            keywords: self.keywords.clone(),
            location: self.location.clone(),
            miles: self.miles,
            kilometers: self.kilometers(),
            salary: self.salary,
            date_created_from: self.date_created_from,
            page: self.page,
            last_week: last_week_label(today),
        }
    }
}
