use serde::Serialize;

use tib_core::iast::{convert, Conversion};
use tib_core::normalize::{canonicalize, NormalForm};
use tib_core::unicode::codepoint_label;

use super::{load_settings, read_inputs, resolve_form};

#[derive(Debug, Serialize)]
struct FileReport {
    source: String,
    form: NormalForm,
    #[serde(flatten)]
    conversion: Conversion,
}

pub fn convert_cmd(files: &[String], form: Option<NormalForm>, settings: Option<&str>, json: bool) {
    load_settings(settings);
    let form = resolve_form(form);

    let mut reports = Vec::new();
    for (source, text) in read_inputs(files) {
        let conversion = convert(&text, form);
        if !conversion.valid {
            eprintln!("warning: {source}: malformed combining-mark cluster");
        }
        if json {
            reports.push(FileReport {
                source,
                form,
                conversion,
            });
        } else {
            print!("{}", conversion.text);
        }
    }

    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&reports), "JSON serialization failed: {}")
        );
    }
}

pub fn normalize_cmd(files: &[String], form: Option<NormalForm>, codepoints: bool) {
    let form = resolve_form(form);

    for (source, text) in read_inputs(files) {
        let canonical = canonicalize(&text, form);
        if !canonical.valid {
            eprintln!("warning: {source}: malformed combining-mark cluster");
        }
        if codepoints {
            for c in canonical.text.chars() {
                println!("{}", codepoint_label(c));
            }
        } else {
            print!("{}", canonical.text);
        }
    }
}
