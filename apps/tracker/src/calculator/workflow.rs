//! Take-home pay calculator.
//!
//! `Idle` → `Submitted` after a successful calculation, back to `Idle` on a
//! salary edit or reset. The three tax figures come from remote calls issued
//! together and joined; if any one fails nothing on screen changes.

use serde::Serialize;
use tracing::{error, info};

use crate::calculator::currency::format_usd;
use crate::notify::Toast;
use crate::platform::{PlatformError, TaxService};

const MONTHS_PER_YEAR: f64 = 12.0;
const PAY_PERIODS_PER_YEAR: f64 = 26.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorState {
    #[default]
    Idle,
    Submitted,
}

/// The salary field as typed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SalaryInput {
    Blank,
    Invalid,
    Amount(f64),
}

impl SalaryInput {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return SalaryInput::Blank;
        }
        match raw.parse::<f64>() {
            Ok(amount) if amount.is_finite() => SalaryInput::Amount(amount),
            _ => SalaryInput::Invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxBreakdown {
    pub federal: f64,
    pub social_security: f64,
    pub medicare: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TakeHomePay {
    pub yearly: f64,
    pub six_months: f64,
    pub monthly: f64,
    pub bi_weekly: f64,
}

impl TakeHomePay {
    pub fn derive(salary: f64, taxes: &TaxBreakdown) -> Self {
        let yearly = salary - taxes.federal - taxes.medicare - taxes.social_security;
        Self {
            yearly,
            six_months: yearly / 2.0,
            monthly: yearly / MONTHS_PER_YEAR,
            bi_weekly: yearly / PAY_PERIODS_PER_YEAR,
        }
    }
}

/// Every figure the calculator displays. `None` renders as an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedFigures {
    pub federal_tax: Option<f64>,
    pub social_security_tax: Option<f64>,
    pub medicare_tax: Option<f64>,
    pub yearly: Option<f64>,
    pub six_months: Option<f64>,
    pub monthly: Option<f64>,
    pub bi_weekly: Option<f64>,
}

impl DerivedFigures {
    fn zeroed() -> Self {
        Self {
            federal_tax: Some(0.0),
            social_security_tax: Some(0.0),
            medicare_tax: Some(0.0),
            yearly: Some(0.0),
            six_months: Some(0.0),
            monthly: Some(0.0),
            bi_weekly: Some(0.0),
        }
    }

    fn cleared() -> Self {
        Self {
            federal_tax: None,
            social_security_tax: None,
            medicare_tax: None,
            yearly: None,
            six_months: None,
            monthly: None,
            bi_weekly: None,
        }
    }

    fn formatted(&self) -> FormattedFigures {
        let fmt = |v: Option<f64>| v.map(format_usd);
        FormattedFigures {
            federal_tax: fmt(self.federal_tax),
            social_security_tax: fmt(self.social_security_tax),
            medicare_tax: fmt(self.medicare_tax),
            yearly: fmt(self.yearly),
            six_months: fmt(self.six_months),
            monthly: fmt(self.monthly),
            bi_weekly: fmt(self.bi_weekly),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedFigures {
    pub federal_tax: Option<String>,
    pub social_security_tax: Option<String>,
    pub medicare_tax: Option<String>,
    pub yearly: Option<String>,
    pub six_months: Option<String>,
    pub monthly: Option<String>,
    pub bi_weekly: Option<String>,
}

/// Result of one press of the calculate button.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Submission {
    Calculated,
    /// Input was not a number; derived figures were cleared.
    Cleared,
    /// Input was blank; derived figures were cleared.
    Rejected { toast: Toast },
    /// A remote tax call failed; displayed figures are unchanged.
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculatorView {
    pub salary: String,
    pub state: CalculatorState,
    pub is_submitted: bool,
    pub figures: DerivedFigures,
    pub formatted: FormattedFigures,
}

#[derive(Debug, Clone)]
pub struct TakeHomeCalculator {
    salary: String,
    state: CalculatorState,
    figures: DerivedFigures,
}

impl Default for TakeHomeCalculator {
    fn default() -> Self {
        Self {
            salary: String::new(),
            state: CalculatorState::Idle,
            // federal tax starts undefined, everything else at zero
            figures: DerivedFigures {
                federal_tax: None,
                ..DerivedFigures::zeroed()
            },
        }
    }
}

impl TakeHomeCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A salary edit hides the previous results.
    pub fn edit_salary(&mut self, salary: String) {
        self.salary = salary;
        self.state = CalculatorState::Idle;
    }

    pub fn reset(&mut self) {
        self.figures = DerivedFigures::zeroed();
        self.salary.clear();
        self.state = CalculatorState::Idle;
    }

    pub async fn submit(&mut self, taxes: &dyn TaxService) -> Submission {
        let salary = match SalaryInput::parse(&self.salary) {
            SalaryInput::Amount(amount) => amount,
            SalaryInput::Invalid => {
                self.figures = DerivedFigures::cleared();
                return Submission::Cleared;
            }
            SalaryInput::Blank => {
                self.figures = DerivedFigures::cleared();
                return Submission::Rejected {
                    toast: Toast::error("Salary is required", "Enter a yearly salary to calculate"),
                };
            }
        };

        let breakdown = match fetch_taxes(taxes, salary).await {
            Ok(breakdown) => breakdown,
            Err(e) => {
                error!("Error calculating taxes: {e}");
                return Submission::Failed {
                    message: e.message(),
                };
            }
        };

        self.figures.federal_tax = Some(breakdown.federal);
        self.figures.social_security_tax = Some(breakdown.social_security);
        self.figures.medicare_tax = Some(breakdown.medicare);

        // A negative salary still shows its taxes but leaves take-home untouched.
        if salary >= 0.0 {
            let pay = TakeHomePay::derive(salary, &breakdown);
            self.figures.yearly = Some(pay.yearly);
            self.figures.six_months = Some(pay.six_months);
            self.figures.monthly = Some(pay.monthly);
            self.figures.bi_weekly = Some(pay.bi_weekly);
        }

        info!("Take-home pay calculated for salary {salary}");
        self.state = CalculatorState::Submitted;
        Submission::Calculated
    }

    pub fn view(&self) -> CalculatorView {
        CalculatorView {
            salary: self.salary.clone(),
            state: self.state,
            is_submitted: self.state == CalculatorState::Submitted,
            figures: self.figures,
            formatted: self.figures.formatted(),
        }
    }
}

/// Issues the three tax calls concurrently; fails as soon as any one fails.
async fn fetch_taxes(taxes: &dyn TaxService, salary: f64) -> Result<TaxBreakdown, PlatformError> {
    let (federal, social_security, medicare) = tokio::try_join!(
        taxes.federal_tax(salary),
        taxes.social_security_tax(salary),
        taxes.medicare_tax(salary),
    )?;

    Ok(TaxBreakdown {
        federal,
        social_security,
        medicare,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;
    use crate::platform::fake::FakePlatform;

    /// Every call waits until all three are in flight, so the calls only
    /// complete when they are issued together.
    struct RendezvousTaxes {
        barrier: Barrier,
    }

    impl RendezvousTaxes {
        fn new() -> Self {
            Self {
                barrier: Barrier::new(3),
            }
        }
    }

    #[async_trait]
    impl TaxService for RendezvousTaxes {
        async fn federal_tax(&self, _salary: f64) -> Result<f64, PlatformError> {
            self.barrier.wait().await;
            Ok(20000.0)
        }

        async fn social_security_tax(&self, _salary: f64) -> Result<f64, PlatformError> {
            self.barrier.wait().await;
            Ok(6200.0)
        }

        async fn medicare_tax(&self, _salary: f64) -> Result<f64, PlatformError> {
            self.barrier.wait().await;
            Ok(1450.0)
        }
    }

    fn approx(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("figure should be set");
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_salary_input_parse() {
        assert_eq!(SalaryInput::parse(" 100000 "), SalaryInput::Amount(100000.0));
        assert_eq!(SalaryInput::parse(""), SalaryInput::Blank);
        assert_eq!(SalaryInput::parse("abc"), SalaryInput::Invalid);
        assert_eq!(SalaryInput::parse("NaN"), SalaryInput::Invalid);
    }

    #[test]
    fn test_take_home_derivation() {
        let taxes = TaxBreakdown {
            federal: 20000.0,
            social_security: 6200.0,
            medicare: 1450.0,
        };
        let pay = TakeHomePay::derive(100000.0, &taxes);
        assert_eq!(pay.yearly, 72350.0);
        assert_eq!(pay.six_months, 36175.0);
        assert!((pay.monthly - 6029.166666).abs() < 1e-3);
        assert!((pay.bi_weekly - 2782.692307).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_submit_computes_all_figures() {
        let fake = FakePlatform::with_jobs(vec![]);
        fake.set_taxes(20000.0, 6200.0, 1450.0);
        let mut calculator = TakeHomeCalculator::new();
        calculator.edit_salary("100000".to_string());

        let outcome = calculator.submit(&fake).await;

        assert_eq!(outcome, Submission::Calculated);
        assert_eq!(calculator.view().state, CalculatorState::Submitted);
        let figures = calculator.view().figures;
        approx(figures.yearly, 72350.0);
        approx(figures.six_months, 36175.0);
        approx(figures.monthly, 6029.1666666);
        approx(figures.bi_weekly, 2782.6923076);
        assert_eq!(calculator.view().formatted.yearly.as_deref(), Some("$72,350.00"));

        let mut calls = fake.calls();
        calls.sort();
        assert_eq!(calls, vec!["federal_tax", "medicare_tax", "social_security_tax"]);
    }

    #[tokio::test]
    async fn test_tax_calls_run_concurrently() {
        let taxes = RendezvousTaxes::new();
        let mut calculator = TakeHomeCalculator::new();
        calculator.edit_salary("100000".to_string());

        let outcome = tokio::time::timeout(Duration::from_secs(5), calculator.submit(&taxes))
            .await
            .expect("tax calls were issued one after another");

        assert_eq!(outcome, Submission::Calculated);
        approx(calculator.view().figures.yearly, 72350.0);
    }

    #[tokio::test]
    async fn test_non_numeric_salary_clears_without_remote_calls() {
        let fake = FakePlatform::with_jobs(vec![]);
        let mut calculator = TakeHomeCalculator::new();
        calculator.edit_salary("abc".to_string());

        let outcome = calculator.submit(&fake).await;

        assert_eq!(outcome, Submission::Cleared);
        assert_eq!(calculator.view().figures, DerivedFigures::cleared());
        assert_eq!(calculator.view().state, CalculatorState::Idle);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_salary_rejected() {
        let fake = FakePlatform::with_jobs(vec![]);
        let mut calculator = TakeHomeCalculator::new();

        let outcome = calculator.submit(&fake).await;

        assert!(matches!(outcome, Submission::Rejected { .. }));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_leaves_figures_unchanged() {
        let fake = FakePlatform::with_jobs(vec![]);
        fake.set_taxes(20000.0, 6200.0, 1450.0);
        let mut calculator = TakeHomeCalculator::new();
        calculator.edit_salary("100000".to_string());
        calculator.submit(&fake).await;
        let before = calculator.view().figures;

        fake.fail_on("medicare_tax");
        calculator.edit_salary("50000".to_string());
        let outcome = calculator.submit(&fake).await;

        assert_eq!(
            outcome,
            Submission::Failed {
                message: "medicare_tax failed".to_string()
            }
        );
        assert_eq!(calculator.view().figures, before);
        assert_eq!(calculator.view().state, CalculatorState::Idle);
    }

    #[tokio::test]
    async fn test_negative_salary_keeps_take_home() {
        let fake = FakePlatform::with_jobs(vec![]);
        fake.set_taxes(0.0, 0.0, 0.0);
        let mut calculator = TakeHomeCalculator::new();
        calculator.edit_salary("-10".to_string());

        let outcome = calculator.submit(&fake).await;

        assert_eq!(outcome, Submission::Calculated);
        assert_eq!(calculator.view().figures.federal_tax, Some(0.0));
        assert_eq!(calculator.view().figures.yearly, Some(0.0));
    }

    #[tokio::test]
    async fn test_reset_zeroes_everything() {
        let fake = FakePlatform::with_jobs(vec![]);
        fake.set_taxes(20000.0, 6200.0, 1450.0);
        let mut calculator = TakeHomeCalculator::new();
        calculator.edit_salary("100000".to_string());
        calculator.submit(&fake).await;

        calculator.reset();

        assert_eq!(calculator.view().figures, DerivedFigures::zeroed());
        assert_eq!(calculator.view().salary, "");
        assert_eq!(calculator.view().state, CalculatorState::Idle);
    }

    #[test]
    fn test_initial_federal_tax_undefined() {
        let view = TakeHomeCalculator::new().view();
        assert_eq!(view.figures.federal_tax, None);
        assert_eq!(view.figures.medicare_tax, Some(0.0));
        assert!(!view.is_submitted);
    }
}
