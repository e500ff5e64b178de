//! Two-sample hypothesis tests and descriptive statistics for yearly counts

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

/// How the two samples' variances are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceAssumption {
    /// Pooled variance (Student's t-test)
    #[default]
    Equal,
    /// Separate variances with Welch-Satterthwaite degrees of freedom
    Welch,
}

/// Outcome of a two-tailed independent t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TTest {
    Computed {
        t_statistic: f64,
        p_value: f64,
        degrees_of_freedom: f64,
    },
    /// Too few observations or no variance to test against
    InsufficientData,
}

impl TTest {
    pub fn p_value(&self) -> Option<f64> {
        match self {
            TTest::Computed { p_value, .. } => Some(*p_value),
            TTest::InsufficientData => None,
        }
    }

    pub fn t_statistic(&self) -> Option<f64> {
        match self {
            TTest::Computed { t_statistic, .. } => Some(*t_statistic),
            TTest::InsufficientData => None,
        }
    }
}

/// Two-tailed independent two-sample t-test of `a` against `b`
pub fn t_test(a: &[f64], b: &[f64], assumption: VarianceAssumption) -> TTest {
    if a.len() < 2 || b.len() < 2 {
        return TTest::InsufficientData;
    }

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (mean1, mean2) = (a.iter().mean(), b.iter().mean());
    let (var1, var2) = (a.iter().variance(), b.iter().variance());

    let (std_err, df) = match assumption {
        VarianceAssumption::Equal => {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        }
        VarianceAssumption::Welch => {
            let (s1, s2) = (var1 / n1, var2 / n2);
            let df = (s1 + s2).powi(2) / (s1.powi(2) / (n1 - 1.0) + s2.powi(2) / (n2 - 1.0));
            ((s1 + s2).sqrt(), df)
        }
    };

    if !std_err.is_finite() || std_err <= 0.0 || !df.is_finite() {
        return TTest::InsufficientData;
    }

    let t_statistic = (mean1 - mean2) / std_err;
    if !t_statistic.is_finite() {
        return TTest::InsufficientData;
    }

    let Ok(dist) = StudentsT::new(0.0, 1.0, df) else {
        return TTest::InsufficientData;
    };
    let p_value = (2.0 * dist.cdf(-t_statistic.abs())).min(1.0);

    TTest::Computed {
        t_statistic,
        p_value,
        degrees_of_freedom: df,
    }
}

/// t-test over two series of yearly counts
pub fn compare(a: &[usize], b: &[usize], assumption: VarianceAssumption) -> TTest {
    t_test(&as_f64(a), &as_f64(b), assumption)
}

pub fn as_f64(counts: &[usize]) -> Vec<f64> {
    counts.iter().map(|&c| c as f64).collect()
}

/// Which of the two compared series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// Decision drawn from a t-test at a significance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Verdict {
    /// Equal means rejected; `higher` has the larger mean
    Significant { higher: Side },
    NotSignificant,
    InsufficientData,
}

/// Reject equal means when `p < significance_level`. Equal means report `B`
/// as the higher side.
pub fn verdict(test: &TTest, mean_a: f64, mean_b: f64, significance_level: f64) -> Verdict {
    match test.p_value() {
        None => Verdict::InsufficientData,
        Some(p) if p < significance_level => Verdict::Significant {
            higher: if mean_a > mean_b { Side::A } else { Side::B },
        },
        Some(_) => Verdict::NotSignificant,
    }
}

/// Absolute skewness and excess kurtosis bounds for a "roughly normal" shape
const NORMAL_SKEW_LIMIT: f64 = 2.0;
const NORMAL_KURTOSIS_LIMIT: f64 = 2.0;

/// Descriptive statistics of one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Population skewness, `None` for fewer than 3 values or no spread
    pub skewness: Option<f64>,
    /// Population excess kurtosis, `None` for fewer than 4 values or no spread
    pub excess_kurtosis: Option<f64>,
}

impl SeriesSummary {
    /// Empty series summarize to zeros
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                n: 0,
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                skewness: None,
                excess_kurtosis: None,
            };
        }

        let n = values.len();
        let mean = values.iter().mean();
        let std_dev = if n > 1 { values.iter().std_dev() } else { 0.0 };

        let moment = |k: i32| values.iter().map(|v| (v - mean).powi(k)).sum::<f64>() / n as f64;
        let m2 = moment(2);
        let spread = m2 > f64::EPSILON;
        let skewness = (spread && n >= 3).then(|| moment(3) / m2.powf(1.5));
        let excess_kurtosis = (spread && n >= 4).then(|| moment(4) / (m2 * m2) - 3.0);

        Self {
            n,
            mean,
            std_dev,
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
            skewness,
            excess_kurtosis,
        }
    }

    /// Rough shape check before trusting a t-test on this series
    pub fn looks_normal(&self) -> bool {
        match (self.skewness, self.excess_kurtosis) {
            (Some(skew), Some(kurt)) => {
                skew.abs() <= NORMAL_SKEW_LIMIT && kurt.abs() <= NORMAL_KURTOSIS_LIMIT
            }
            _ => false,
        }
    }
}
