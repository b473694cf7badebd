use std::fs;
use std::io;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod accuracy_ops;
pub mod config_ops;
pub mod convert_ops;

use tib_core::normalize::NormalForm;
use tib_core::settings;

/// Name shown for standard input in reports.
pub const STDIN_NAME: &str = "<stdin>";

/// Read every named file, or standard input when `files` is empty.
/// Returns `(name, content)` pairs in argument order.
pub fn read_inputs(files: &[String]) -> Vec<(String, String)> {
    if files.is_empty() {
        let text = die!(io::read_to_string(io::stdin()), "Error reading stdin: {}");
        return vec![(STDIN_NAME.to_string(), text)];
    }
    files
        .iter()
        .map(|file| {
            let text = die!(fs::read_to_string(file), "Error reading {file}: {}");
            (file.clone(), text)
        })
        .collect()
}

/// Register a custom settings file. Must run before anything reads the
/// global settings.
pub fn load_settings(file: Option<&str>) {
    let Some(file) = file else {
        return;
    };
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    if let Err(e) = settings::init_custom(content) {
        eprintln!("Error in {file}: {e}");
        process::exit(1);
    }
}

/// The form given on the command line, else the configured default.
pub fn resolve_form(form: Option<NormalForm>) -> NormalForm {
    form.unwrap_or_else(|| settings::settings().input.form)
}
