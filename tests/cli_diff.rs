mod common;

use common::TestEnv;

fn env_with_asset() -> TestEnv {
    let env = TestEnv::new();
    env.write_file("app.js", "let x = 1;\n");
    env.write_file("flashpack.toml", "[[asset]]\nsource = \"app.js\"\n");
    env
}

#[test]
fn test_diff_reports_new_before_build() {
    let env = env_with_asset();

    let result = env.run(&["diff"]);

    assert!(result.success);
    assert!(
        result.stdout.contains("1 new, 0 modified, 0 unchanged"),
        "got:\n{}",
        result.stdout
    );
}

#[test]
fn test_diff_reports_unchanged_after_build() {
    let env = env_with_asset();
    env.run(&["build"]);

    let result = env.run(&["diff"]);

    assert!(result.success);
    assert!(result.stdout.contains("0 new, 0 modified, 1 unchanged"));
}

#[test]
fn test_diff_reports_modified_after_source_change() {
    let env = env_with_asset();
    env.run(&["build"]);
    env.write_file("app.js", "let x = 2;\n");

    let result = env.run(&["diff"]);

    assert!(result.success);
    assert!(result.stdout.contains("0 new, 1 modified, 0 unchanged"));
}

#[test]
fn test_diff_verbose_shows_unified_diff() {
    let env = env_with_asset();
    env.run(&["build"]);
    env.write_file("app.js", "let x = 2;\n");

    let result = env.run(&["diff", "-v"]);

    assert!(result.success);
    // similar's unified output marks removed/added lines
    assert!(
        result.stdout.contains("on disk") && result.stdout.contains("generated"),
        "expected unified diff headers; got:\n{}",
        result.stdout
    );
}

#[test]
fn test_diff_writes_nothing() {
    let env = env_with_asset();

    let result = env.run(&["diff"]);

    assert!(result.success);
    assert!(!env.path("app.js.gz.h").exists());
}

#[test]
fn test_diff_json_output() {
    let env = env_with_asset();

    let result = env.run(&["--json", "diff"]);

    assert!(result.success);
    assert!(result.stdout.contains("\"event\":\"diff\""));
    assert!(result.stdout.contains("\"new\":1"));
}
