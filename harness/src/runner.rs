//! Comparison runner.
//!
//! A [`Profile`] is a strategy capability set: which strategies exist and
//! which types the precompiled context knows about. The runner drives every
//! case of a battery through each available strategy, strictly in order, and
//! returns structured results. It never prints; see `report` for that.

use crate::battery::Case;
use serde::Serialize;
use skipcheck_engine::{
    contains_key, has_null_marker, outputs_equal, presence_diff, AnnotatedPerson, Error,
    FormatVersion, Person, PresenceDiff, Serializer, SerializerContext, SerializerOptions,
    SkipPolicy, Strategy,
};
use tracing::{debug, info, warn};

/// Strategies and precompiled metadata available to one run.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub strategies: Vec<Strategy>,
    pub serializer: Serializer,
}

impl Profile {
    /// Names accepted by [`Profile::by_name`].
    pub const NAMES: [&'static str; 3] = ["current", "legacy", "reflective-only"];

    pub fn new(
        name: impl Into<String>,
        strategies: Vec<Strategy>,
        context: SerializerContext,
    ) -> Self {
        Self {
            name: name.into(),
            strategies,
            serializer: Serializer::new(context),
        }
    }

    /// Both strategies; both record shapes registered.
    pub fn current() -> Self {
        Self::new(
            "current",
            Strategy::ALL.to_vec(),
            SerializerContext::new()
                .with_type(Person::description())
                .with_type(AnnotatedPerson::description()),
        )
    }

    /// Both strategies, but the context predates the annotated record.
    pub fn legacy() -> Self {
        Self::new(
            "legacy",
            Strategy::ALL.to_vec(),
            SerializerContext::new().with_type(Person::description()),
        )
    }

    /// No precompiled strategy at all.
    pub fn reflective_only() -> Self {
        Self::new(
            "reflective-only",
            vec![Strategy::Reflective],
            SerializerContext::new(),
        )
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "current" => Some(Self::current()),
            "legacy" => Some(Self::legacy()),
            "reflective-only" => Some(Self::reflective_only()),
            _ => None,
        }
    }

    pub fn supports(&self, strategy: Strategy) -> bool {
        self.strategies.contains(&strategy)
    }
}

fn display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// What one strategy produced for one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    Output {
        text: String,
        length: usize,
    },
    /// The adapter failed; reported as a warning
    Failed {
        #[serde(serialize_with = "display")]
        error: Error,
    },
    /// The profile lacks this strategy
    Unavailable,
}

impl Outcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Output { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Whether the two strategies agreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Identical,
    Different,
    /// At least one strategy produced no output
    Incomplete,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Identical => write!(f, "identical"),
            Verdict::Different => write!(f, "different"),
            Verdict::Incomplete => write!(f, "incomplete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Expected {
    Present,
    Absent,
    NullMarker,
}

/// A key-level expectation an output did not meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectationFailure {
    pub strategy: Strategy,
    pub key: String,
    pub expected: Expected,
}

impl std::fmt::Display for ExpectationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.expected {
            Expected::Present => "to be present",
            Expected::Absent => "to be absent",
            Expected::NullMarker => "to be written as null",
        };
        write!(f, "{}: expected \"{}\" {}", self.strategy, self.key, what)
    }
}

/// Result of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseReport {
    pub id: String,
    pub title: String,
    pub type_name: String,
    pub skip: SkipPolicy,
    pub pretty: bool,
    pub reflective: Outcome,
    pub precompiled: Outcome,
    pub verdict: Verdict,
    /// Keys whose presence differs between the two outputs
    pub divergence: Vec<PresenceDiff>,
    pub expectation_failures: Vec<ExpectationFailure>,
    /// Keys holding a present zero-equivalent value (`0`, `false`, `""`)
    pub zero_valued_keys: Vec<String>,
}

impl CaseReport {
    pub fn outcome(&self, strategy: Strategy) -> &Outcome {
        match strategy {
            Strategy::Reflective => &self.reflective,
            Strategy::Precompiled => &self.precompiled,
        }
    }

    pub fn warnings(&self) -> impl Iterator<Item = (Strategy, &Error)> {
        Strategy::ALL
            .into_iter()
            .filter_map(|s| self.outcome(s).error().map(|e| (s, e)))
    }
}

/// Result of running a battery under one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub profile: String,
    pub strategies: Vec<Strategy>,
    pub context_version: FormatVersion,
    pub registered_types: Vec<String>,
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    fn count(&self, verdict: Verdict) -> usize {
        self.cases.iter().filter(|c| c.verdict == verdict).count()
    }

    pub fn identical_count(&self) -> usize {
        self.count(Verdict::Identical)
    }

    pub fn divergent_count(&self) -> usize {
        self.count(Verdict::Different)
    }

    pub fn incomplete_count(&self) -> usize {
        self.count(Verdict::Incomplete)
    }

    pub fn warning_count(&self) -> usize {
        self.cases.iter().map(|c| c.warnings().count()).sum()
    }

    pub fn expectation_failure_count(&self) -> usize {
        self.cases.iter().map(|c| c.expectation_failures.len()).sum()
    }
}

/// Drives a battery through a profile's strategies.
pub struct Runner {
    profile: Profile,
    pretty_override: Option<bool>,
}

impl Runner {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            pretty_override: None,
        }
    }

    /// Force the pretty flag for every case.
    pub fn with_pretty(mut self, pretty: Option<bool>) -> Self {
        self.pretty_override = pretty;
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn run(&self, battery: &[Case]) -> RunReport {
        let context = self.profile.serializer.context();
        info!(
            profile = %self.profile.name,
            cases = battery.len(),
            "Running comparison battery"
        );

        let cases: Vec<CaseReport> = battery.iter().map(|case| self.run_case(case)).collect();

        let report = RunReport {
            profile: self.profile.name.clone(),
            strategies: self.profile.strategies.clone(),
            context_version: context.format_version,
            registered_types: context.type_names().map(String::from).collect(),
            cases,
        };

        info!(
            profile = %report.profile,
            identical = report.identical_count(),
            different = report.divergent_count(),
            warnings = report.warning_count(),
            "Battery finished"
        );
        report
    }

    pub fn run_case(&self, case: &Case) -> CaseReport {
        let mut options = case.options;
        if let Some(pretty) = self.pretty_override {
            options.pretty = pretty;
        }

        let reflective = self.invoke(case, &options, Strategy::Reflective);
        let precompiled = self.invoke(case, &options, Strategy::Precompiled);
        let description = case.record.describe();

        let (verdict, divergence) = match (reflective.text(), precompiled.text()) {
            (Some(a), Some(b)) if outputs_equal(a, b) => (Verdict::Identical, Vec::new()),
            (Some(a), Some(b)) => (Verdict::Different, presence_diff(a, b, description.keys())),
            _ => (Verdict::Incomplete, Vec::new()),
        };

        if verdict == Verdict::Different {
            warn!(case = case.id, ?divergence, "Strategies diverged");
        }

        let mut expectation_failures = Vec::new();
        for strategy in Strategy::ALL {
            let outcome = if strategy == Strategy::Reflective {
                &reflective
            } else {
                &precompiled
            };
            if let Some(text) = outcome.text() {
                check_expectations(case, strategy, text, &mut expectation_failures);
            }
        }

        let zero_valued_keys = description
            .fields
            .iter()
            .zip(case.record.field_values())
            .filter(|(_, value)| value.as_ref().is_some_and(|v| v.is_zero_value()))
            .map(|(field, _)| field.name.clone())
            .collect();

        CaseReport {
            id: case.id.to_string(),
            title: case.title.to_string(),
            type_name: case.record.type_name().to_string(),
            skip: options.skip,
            pretty: options.pretty,
            reflective,
            precompiled,
            verdict,
            divergence,
            expectation_failures,
            zero_valued_keys,
        }
    }

    fn invoke(&self, case: &Case, options: &SerializerOptions, strategy: Strategy) -> Outcome {
        if !self.profile.supports(strategy) {
            return Outcome::Unavailable;
        }

        match self
            .profile
            .serializer
            .serialize(case.record.as_ref(), options, strategy)
        {
            Ok(text) => {
                debug!(case = case.id, %strategy, output = %text, "Serialized");
                Outcome::Output {
                    length: text.len(),
                    text,
                }
            }
            Err(error) => {
                warn!(case = case.id, %strategy, %error, "Serialization failed, continuing");
                Outcome::Failed { error }
            }
        }
    }
}

fn check_expectations(
    case: &Case,
    strategy: Strategy,
    text: &str,
    failures: &mut Vec<ExpectationFailure>,
) {
    let mut fail = |key: &str, expected: Expected| {
        failures.push(ExpectationFailure {
            strategy,
            key: key.to_string(),
            expected,
        })
    };

    for key in &case.expect.present {
        if !contains_key(text, key) {
            fail(key, Expected::Present);
        }
    }
    for key in &case.expect.absent {
        if contains_key(text, key) {
            fail(key, Expected::Absent);
        }
    }
    for key in &case.expect.null_markers {
        if !has_null_marker(text, key) {
            fail(key, Expected::NullMarker);
        }
    }
}
