const OUTPUT_KEYS: &[&str] = &[
    "tsheg",
    "shad",
    "double_shad",
    "avagraha",
    "nyi_zla",
    "sna_ldan",
];

fn main() {
    println!("cargo:rerun-if-changed=src/default_settings.toml");
    check_settings(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
}

/// The embedded settings must parse and carry every `[output]` key, since
/// `settings()` has no fallback for them.
fn check_settings(path: &str, content: &str) {
    let value: toml::Value = match content.parse() {
        Ok(v) => v,
        Err(e) => panic!("{path} contains invalid TOML: {e}"),
    };
    let Some(output) = value.get("output").and_then(|o| o.as_table()) else {
        panic!("{path} has no [output] table");
    };
    for key in OUTPUT_KEYS {
        if !output.get(*key).is_some_and(|v| v.is_str()) {
            panic!("{path}: output.{key} must be a string");
        }
    }
}
