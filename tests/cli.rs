//! The pxpaint binary, run against scripts in a temporary directory.

use std::fs;
use std::process::Command;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn pxpaint() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pxpaint"))
}

#[test]
fn test_replay_directory_with_config() {
    let dir = tempdir().unwrap();
    let scripts = dir.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    fs::write(
        scripts.join("bar.paint.yaml"),
        r##"
canvas: { width: 4, height: 2, background: white }
steps:
  - { op: tip, tip: pen }
  - { op: stroke, points: [[0, 0], [3, 0]] }
"##,
    )
    .unwrap();
    fs::write(
        scripts.join("undone.paint.json"),
        r##"{
            "canvas": { "width": 2, "height": 2, "background": "white" },
            "steps": [
                { "op": "stroke", "points": [[0, 0], [1, 1]] },
                { "op": "undo" }
            ]
        }"##,
    )
    .unwrap();
    let config = dir.path().join("engine.yaml");
    fs::write(&config, "primary: \"#0000ff\"\n").unwrap();
    let out = dir.path().join("out");

    let status = pxpaint()
        .arg("replay")
        .arg(&scripts)
        .arg("--output")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .status()
        .unwrap();
    assert!(status.success());

    let bar = image::open(out.join("bar.png")).unwrap().to_rgba8();
    assert_eq!(bar.get_pixel(3, 0).0, [0, 0, 255, 255]);
    assert_eq!(bar.get_pixel(3, 1).0, [255, 255, 255, 255]);

    let undone = image::open(out.join("undone.png")).unwrap().to_rgba8();
    assert!(undone.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn test_replay_bad_script_fails() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("broken.paint.json");
    fs::write(&script, "{ not json").unwrap();

    let output = pxpaint()
        .arg("replay")
        .arg(&script)
        .arg("-o")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid script"));
}

#[test]
fn test_shape_prints_ascii() {
    let output = pxpaint()
        .args(["shape", "rect-fill", "0,0", "2,1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "###\n###\n");
}

#[test]
fn test_shape_rejects_unknown_kind() {
    let output = pxpaint()
        .args(["shape", "triangle", "0,0", "2,1"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
