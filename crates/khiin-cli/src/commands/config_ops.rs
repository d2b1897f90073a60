use std::fs;

pub fn settings_export() {
    print!("{}", khiin_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        khiin_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: weights.hanji={}, weights.lomaji={}, tones.priority_id={}, collation.kind={:?}",
        s.weights.hanji, s.weights.lomaji, s.tones.priority_id, s.collation.kind
    );
}
