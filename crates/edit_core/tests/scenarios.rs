use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use edit_test_support::{load_scenario, run_scenario};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_paths() -> Vec<PathBuf> {
    let dir = fixtures_dir();
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap_or_else(|err| panic!("failed to read fixtures dir {dir:?}: {err}"))
        .map(|entry| entry.unwrap_or_else(|err| panic!("bad entry in {dir:?}: {err}")).path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    paths
}

#[test]
fn editing_scenarios() {
    let filter = env::var("EDITKIT_SCENARIO_FILTER").ok();
    let mut ran = 0usize;
    for path in fixture_paths() {
        let scenario = load_scenario(&path);
        if let Some(filter) = &filter
            && !scenario.name.contains(filter.as_str())
        {
            continue;
        }
        let outcome = run_scenario(&scenario);
        outcome.check(&scenario.name, &scenario.expect);
        ran += 1;
    }
    assert!(ran > 0, "no scenarios matched filter");
}
