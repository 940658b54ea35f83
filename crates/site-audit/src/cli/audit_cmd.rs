//! `site-audit <domain>`: run one audit and render the report.

use crate::audit::AuditService;
use crate::checks::Status;
use crate::cli::output::{self, Styled};
use crate::report::AuditReport;
use crate::scoring::Grade;

/// Exit status for an input error.
pub const EXIT_INPUT_ERROR: u8 = 1;
/// Exit status when the score is below `--fail-under`.
pub const EXIT_BELOW_THRESHOLD: u8 = 2;

/// Run the audit command and return the process exit status.
pub async fn run(service: &dyn AuditService, domain: &str, fail_under: Option<u8>) -> u8 {
    let report = service.run_audit(domain).await;

    if output::is_json() {
        output::print_json(&report.to_json());
    } else {
        print_report(&Styled::new(), &report);
    }

    exit_code(&report, fail_under)
}

/// `0` on success, [`EXIT_INPUT_ERROR`] or [`EXIT_BELOW_THRESHOLD`] otherwise.
pub fn exit_code(report: &AuditReport, fail_under: Option<u8>) -> u8 {
    if report.is_error() {
        return EXIT_INPUT_ERROR;
    }
    match fail_under {
        Some(min) if report.score < min => EXIT_BELOW_THRESHOLD,
        _ => 0,
    }
}

fn status_sym(s: &Styled, status: Status) -> &str {
    match status {
        Status::Pass => s.ok_sym(),
        Status::Warn => s.warn_sym(),
        Status::Fail => s.fail_sym(),
    }
}

fn grade_styled(s: &Styled, grade: Grade) -> String {
    match grade {
        Grade::A | Grade::B => s.green(grade.as_str()),
        Grade::C => s.yellow(grade.as_str()),
        Grade::D | Grade::F => s.red(grade.as_str()),
    }
}

/// Count of checks per status across all sections: (pass, warn, fail).
pub fn tally(report: &AuditReport) -> (usize, usize, usize) {
    report
        .sections
        .iter()
        .flat_map(|s| s.iter())
        .fold((0, 0, 0), |(p, w, f), (_, c)| match c.status {
            Status::Pass => (p + 1, w, f),
            Status::Warn => (p, w + 1, f),
            Status::Fail => (p, w, f + 1),
        })
}

fn print_report(s: &Styled, report: &AuditReport) {
    if let Some(err) = &report.error {
        eprintln!("  {} {err}", s.fail_sym());
        return;
    }

    let quiet = output::is_quiet();
    if !quiet {
        output::print_header(s, &report.domain);

        for section in report.sections.iter() {
            output::print_section(s, section.name.title());
            for (_, check) in section.iter() {
                output::print_check(status_sym(s, check.status), &check.label, &check.value);
                if let Some(fix) = &check.fix {
                    output::print_detail(&s.dim(fix));
                }
            }
            println!();
        }
    }

    let (pass, warn, fail) = tally(report);
    output::print_status(
        s,
        &format!("{}/100, grade {}", report.score, grade_styled(s, report.grade)),
        &format!("{pass} passed, {warn} warnings, {fail} failed"),
    );

    if quiet || report.recommendations.is_empty() {
        return;
    }
    println!();
    println!("  {}", s.bold("Recommendations"));
    for (i, rec) in report.recommendations.iter().enumerate() {
        println!("    {:>2}. {rec}", i + 1);
    }
}
