// build.rs
use std::{env, fs, path::PathBuf};

const CATALOG: &str = "assets/stations/catalog.json";
const SINGLE_STATIONS: [&str; 6] = ["herb", "logpile", "garden", "cart", "fishing", "memorial"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={CATALOG}");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let raw = fs::read_to_string(manifest_dir.join(CATALOG))
        .unwrap_or_else(|e| panic!("Failed to read {CATALOG}: {e}"));
    let catalog: serde_json::Value =
        serde_json::from_str(&raw).unwrap_or_else(|e| panic!("{CATALOG} is not valid JSON: {e}"));

    let elders = catalog["elders"].as_array().map_or(0, Vec::len);
    let fires = catalog["fires"].as_array().map_or(0, Vec::len);
    if elders != 6 || fires != 6 {
        panic!("{CATALOG} needs 6 elders and 6 fires, found {elders} and {fires}");
    }

    for station in SINGLE_STATIONS {
        if !catalog[station].is_object() {
            panic!("{CATALOG} is missing the '{station}' descriptor");
        }
    }

    for elder in catalog["elders"].as_array().into_iter().flatten() {
        let correct = elder["challenge"]["options"]
            .as_array()
            .into_iter()
            .flatten()
            .filter(|option| option["correct"].as_bool() == Some(true))
            .count();
        if correct == 0 {
            panic!(
                "elder '{}' has no correct answer",
                elder["id"].as_str().unwrap_or("?")
            );
        }
    }
}
