//! Runs canned documents through the generator under both conventions and
//! checks that every referenced model is declared before it is used.

use jsonmodel_gen::{Generator, ModuleConvention};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

static DECLARATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"const (\w+) = new JsonModel\.define").unwrap());
static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"type: \[?(\w+Model)\]?").unwrap());

fn samples() -> Vec<(&'static str, Value)> {
    vec![
        ("flat", json!({"id": 1, "name": "Acme", "active": true, "created": "2024-05-01 09:30:00"})),
        ("empty", json!({})),
        ("nulls-and-empties", json!({"gone": null, "tags": [], "pads": [null, 1]})),
        ("nested", json!({
            "store": {
                "location": { "lat": 37.42, "lng": -122.08 },
                "categories": ["hardware", "tools"]
            },
            "reviews": [{ "author": { "name": "A" }, "stars": 4 }]
        })),
        ("matrix", json!({"grid": [[{"cell": 0}]], "rows": [[1, 2], [3]]})),
        // same key in two branches: the second `itemModel` shadows the first
        ("collision", json!({"left": {"item": {"a": 1}}, "right": {"item": {"b": "x"}}})),
    ]
}

fn check_order(src: &str) -> Result<usize, String> {
    let mut declared: Vec<&str> = Vec::new();
    for line in src.lines() {
        for cap in REFERENCE.captures_iter(line) {
            let name = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
            if !declared.contains(&name) {
                return Err(format!("`{name}` referenced before declaration"));
            }
        }
        if let Some(m) = DECLARATION.captures(line).and_then(|cap| cap.get(1)) {
            declared.push(m.as_str());
        }
    }
    Ok(declared.len())
}

fn main() {
    let mut failures = 0;
    for (label, doc) in samples() {
        for convention in [ModuleConvention::Cjs, ModuleConvention::Esm] {
            let src = Generator::new(convention).import().define("Root", &doc).execute();
            match check_order(&src) {
                Ok(count) => eprintln!("✅ {label} ({convention:?}): {count} declarations"),
                Err(error) => {
                    failures += 1;
                    eprintln!("❌ {label} ({convention:?}): {error}\n{src}");
                }
            }
        }
    }
    if failures > 0 {
        std::process::exit(1);
    }
}
