//! Reporters render run results. They never change a verdict.

use crate::runner::{CaseReport, Outcome, RunReport, Verdict};
use skipcheck_engine::Strategy;
use std::io::{self, Write};

/// Renders a finished run.
pub trait Reporter {
    fn report(&mut self, run: &RunReport) -> io::Result<()>;
}

/// Human-readable transcript.
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn header(&mut self, run: &RunReport) -> io::Result<()> {
        let strategies: Vec<String> = run.strategies.iter().map(|s| s.to_string()).collect();
        writeln!(self.out, "=== Profile: {} ===", run.profile)?;
        writeln!(self.out, "Strategies: {}", strategies.join(", "))?;
        if run.registered_types.is_empty() {
            writeln!(
                self.out,
                "Precompiled context v{}: no registered types",
                run.context_version
            )?;
        } else {
            writeln!(
                self.out,
                "Precompiled context v{}: {}",
                run.context_version,
                run.registered_types.join(", ")
            )?;
        }
        writeln!(self.out)
    }

    fn outcome(&mut self, strategy: Strategy, outcome: &Outcome) -> io::Result<()> {
        match outcome {
            Outcome::Output { text, .. } => {
                writeln!(self.out, "{strategy}:")?;
                writeln!(self.out, "{text}")
            }
            Outcome::Failed { error } => {
                writeln!(self.out, "{strategy}: ❌ failed: {error}")
            }
            Outcome::Unavailable => writeln!(self.out, "{strategy}: not available in this profile"),
        }
    }

    fn case(&mut self, case: &CaseReport) -> io::Result<()> {
        writeln!(self.out, "--- [{}] {} ---", case.id, case.title)?;
        writeln!(
            self.out,
            "Type: {}, skip: {}, pretty: {}",
            case.type_name, case.skip, case.pretty
        )?;

        self.outcome(Strategy::Reflective, &case.reflective)?;
        self.outcome(Strategy::Precompiled, &case.precompiled)?;

        if let (Outcome::Output { length: a, .. }, Outcome::Output { length: b, .. }) =
            (&case.reflective, &case.precompiled)
        {
            writeln!(self.out, "Lengths: reflective {a}, precompiled {b}")?;
        }
        if !case.zero_valued_keys.is_empty() {
            writeln!(
                self.out,
                "Present zero values: {}",
                case.zero_valued_keys.join(", ")
            )?;
        }

        match case.verdict {
            Verdict::Identical => writeln!(self.out, "Outputs equal: true")?,
            Verdict::Different => {
                writeln!(self.out, "Outputs equal: false")?;
                writeln!(self.out, "⚠️  BEHAVIORAL DIFFERENCE DETECTED")?;
                for diff in &case.divergence {
                    writeln!(
                        self.out,
                        "   \"{}\": reflective {}, precompiled {}",
                        diff.key,
                        presence(diff.in_first),
                        presence(diff.in_second)
                    )?;
                }
            }
            Verdict::Incomplete => writeln!(self.out, "Outputs equal: n/a (incomplete)")?,
        }

        for failure in &case.expectation_failures {
            writeln!(self.out, "Expectation failed: {failure}")?;
        }
        writeln!(self.out)
    }

    fn summary(&mut self, run: &RunReport) -> io::Result<()> {
        writeln!(self.out, "=== Summary: {} ===", run.profile)?;
        writeln!(
            self.out,
            "Cases: {}, identical: {}, different: {}, incomplete: {}",
            run.cases.len(),
            run.identical_count(),
            run.divergent_count(),
            run.incomplete_count()
        )?;
        writeln!(
            self.out,
            "Warnings: {}, expectation failures: {}",
            run.warning_count(),
            run.expectation_failure_count()
        )?;

        if run.divergent_count() > 0 {
            writeln!(self.out, "CONCLUSION: ⚠️  strategies diverge in this profile.")?;
        } else if run.identical_count() == 0 {
            writeln!(self.out, "CONCLUSION: no case could be compared.")?;
        } else {
            writeln!(
                self.out,
                "CONCLUSION: ✅ no behavioral difference between strategies."
            )?;
        }
        writeln!(self.out)
    }
}

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "absent"
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, run: &RunReport) -> io::Result<()> {
        self.header(run)?;
        for case in &run.cases {
            self.case(case)?;
        }
        self.summary(run)?;
        self.out.flush()
    }
}

/// Structured summary: one pretty JSON document per run.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, run: &RunReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, run)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::standard_battery;
    use crate::runner::{Profile, Runner};
    use skipcheck_engine::PresenceDiff;

    fn render_text(run: &RunReport) -> String {
        let mut reporter = TextReporter::new(Vec::new());
        reporter.report(run).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn text_transcript_for_current_profile() {
        let run = Runner::new(Profile::current()).run(&standard_battery());
        let text = render_text(&run);

        assert!(text.starts_with("=== Profile: current ==="));
        assert!(text.contains("--- [when-null] Global WhenNull drops absent fields ---"));
        assert!(text.contains("{\"Name\":\"Test User\",\"IsActive\":true}"));
        assert!(text.contains("Present zero values: Age, IsActive"));
        assert!(text.contains("CONCLUSION: ✅"));
        assert!(!text.contains("Outputs equal: false"));
    }

    #[test]
    fn text_transcript_shows_warnings() {
        let run = Runner::new(Profile::legacy()).run(&standard_battery());
        let text = render_text(&run);

        assert!(text.contains(
            "Precompiled: ❌ failed: no precompiled metadata registered for type: AnnotatedPerson"
        ));
        assert!(text.contains("Warnings: 3"));
    }

    #[test]
    fn text_transcript_shows_divergence() {
        let mut run = Runner::new(Profile::current()).run(&standard_battery()[2..3]);
        let before = run.cases[0].verdict;
        assert_eq!(before, Verdict::Identical);

        // A hand-made divergent result, as a broken strategy would produce
        let case = &mut run.cases[0];
        case.precompiled = Outcome::Output {
            text: r#"{"Name":"Test User","Age":null,"IsActive":true}"#.into(),
            length: 47,
        };
        case.verdict = Verdict::Different;
        case.divergence = vec![PresenceDiff {
            key: "Age".into(),
            in_first: false,
            in_second: true,
        }];

        let text = render_text(&run);
        assert!(text.contains("Outputs equal: false"));
        assert!(text.contains("\"Age\": reflective absent, precompiled present"));
        assert!(text.contains("CONCLUSION: ⚠️"));
        assert_eq!(run.cases[0].verdict, Verdict::Different);
    }

    #[test]
    fn reflective_only_transcript() {
        let run = Runner::new(Profile::reflective_only()).run(&standard_battery()[..1]);
        let text = render_text(&run);

        assert!(text.contains("Precompiled context v1: no registered types"));
        assert!(text.contains("Precompiled: not available in this profile"));
        assert!(text.contains("CONCLUSION: no case could be compared."));
    }

    #[test]
    fn json_summary_parses() {
        let run = Runner::new(Profile::legacy()).run(&standard_battery());
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.report(&run).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(parsed["profile"], "legacy");
        assert_eq!(parsed["registeredTypes"], serde_json::json!(["Person"]));
        let statuses: Vec<_> = parsed["cases"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["precompiled"]["status"].as_str().unwrap().to_string())
            .collect();
        assert!(statuses.iter().any(|s| s == "failed"));
        assert!(statuses.iter().any(|s| s == "output"));
    }
}
