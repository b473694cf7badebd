use std::collections::BTreeMap;
use std::fs;
use std::process;

use serde::{Deserialize, Serialize};

use tib_core::iast::convert;
use tib_core::normalize::NormalForm;

use super::resolve_form;

#[derive(Debug, Deserialize)]
struct AccuracyCorpus {
    cases: Vec<AccuracyCase>,
}

#[derive(Debug, Deserialize)]
struct AccuracyCase {
    input: String,
    expected: String,
    #[serde(default = "default_category")]
    category: String,
    #[serde(default)]
    skip: bool,
    #[serde(default)]
    note: Option<String>,
}

fn default_category() -> String {
    "general".to_string()
}

#[derive(Debug, Serialize)]
struct AccuracyResult {
    input: String,
    expected: String,
    actual: String,
    status: AccuracyStatus,
    category: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
struct AccuracySummary {
    total: usize,
    pass: usize,
    fail: usize,
    skip: usize,
    pass_rate: String,
}

#[derive(Debug, Serialize)]
struct AccuracyReport {
    form: NormalForm,
    results: Vec<AccuracyResult>,
    summary: AccuracySummary,
}

fn run_case(case: &AccuracyCase, form: NormalForm) -> AccuracyResult {
    if case.skip {
        return AccuracyResult {
            input: case.input.clone(),
            expected: case.expected.clone(),
            actual: String::new(),
            status: AccuracyStatus::Skip,
            category: case.category.clone(),
            diagnostics: Vec::new(),
            note: case.note.clone(),
        };
    }

    let conversion = convert(&case.input, form);
    let status = if conversion.text == case.expected {
        AccuracyStatus::Pass
    } else {
        AccuracyStatus::Fail
    };
    AccuracyResult {
        input: case.input.clone(),
        expected: case.expected.clone(),
        actual: conversion.text,
        status,
        category: case.category.clone(),
        diagnostics: conversion.diagnostics.iter().map(|d| d.to_string()).collect(),
        note: case.note.clone(),
    }
}

fn summarize(results: &[AccuracyResult]) -> AccuracySummary {
    let count = |status| results.iter().filter(|r| r.status == status).count();
    let pass = count(AccuracyStatus::Pass);
    let fail = count(AccuracyStatus::Fail);
    let skip = count(AccuracyStatus::Skip);
    let tested = pass + fail;
    let rate = if tested > 0 {
        pass as f64 / tested as f64 * 100.0
    } else {
        0.0
    };
    AccuracySummary {
        total: results.len(),
        pass,
        fail,
        skip,
        pass_rate: format!("{:.1}%", rate),
    }
}

fn print_text(results: &[AccuracyResult], summary: &AccuracySummary, verbose: bool) {
    let mut grouped: BTreeMap<&str, Vec<&AccuracyResult>> = BTreeMap::new();
    for r in results {
        grouped.entry(&r.category).or_default().push(r);
    }

    for (cat, group) in &grouped {
        println!("\n=== {} ({} cases) ===", cat, group.len());
        for r in group {
            match r.status {
                AccuracyStatus::Pass => {
                    if verbose {
                        println!("  \u{2713} {} \u{2192} {}", r.input, r.expected);
                    }
                }
                AccuracyStatus::Fail => {
                    println!(
                        "  \u{2717} {} \u{2192} {} (got: {})",
                        r.input, r.expected, r.actual
                    );
                    for d in &r.diagnostics {
                        println!("      {d}");
                    }
                }
                AccuracyStatus::Skip => {
                    let reason = r.note.as_deref().unwrap_or("known failure");
                    println!("  - {} [skip: {}]", r.input, reason);
                }
            }
        }
    }

    println!();
    println!("=== Summary ===");
    println!("  Total:     {}", summary.total);
    println!("  Pass:      {:>3}", summary.pass);
    println!("  Fail:      {:>3}", summary.fail);
    println!("  Skip:      {:>3}", summary.skip);
    println!(
        "  Pass rate: {} ({}/{})",
        summary.pass_rate,
        summary.pass,
        summary.pass + summary.fail
    );
}

pub fn accuracy_cmd(corpus_file: &str, form: Option<NormalForm>, verbose: bool, json: bool) {
    let form = resolve_form(form);

    let content = die!(
        fs::read_to_string(corpus_file),
        "Failed to read corpus file {corpus_file}: {}"
    );
    let corpus: AccuracyCorpus = die!(toml::from_str(&content), "Failed to parse corpus TOML: {}");
    if corpus.cases.is_empty() {
        eprintln!("Corpus {corpus_file} has no cases");
        process::exit(1);
    }

    let results: Vec<AccuracyResult> = corpus.cases.iter().map(|c| run_case(c, form)).collect();
    let summary = summarize(&results);
    let failed = summary.fail > 0;

    if json {
        let report = AccuracyReport {
            form,
            results,
            summary,
        };
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "JSON serialization failed: {}")
        );
    } else {
        print_text(&results, &summary, verbose);
    }

    if failed {
        process::exit(1);
    }
}
