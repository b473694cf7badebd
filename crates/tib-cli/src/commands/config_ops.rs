use std::fs;

pub fn settings_export() {
    print!("{}", tib_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        tib_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: input.form={}, output.tsheg={:?}, output.shad={:?}, output.double_shad={:?}",
        s.input.form, s.output.tsheg, s.output.shad, s.output.double_shad
    );
}
