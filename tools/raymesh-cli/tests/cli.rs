//! End-to-end tests for the raymesh binary

use std::path::Path;
use std::process::{Command, Output};

use glam::Vec3;
use tempfile::tempdir;

/// Run the binary with an empty config file so user settings don't leak in
fn raymesh(config_dir: &Path, args: &[&str]) -> Output {
    let config = config_dir.join("config.toml");
    if !config.exists() {
        std::fs::write(&config, "").expect("Failed to write config");
    }
    Command::new(env!("CARGO_BIN_EXE_raymesh"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("Failed to run raymesh")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "raymesh failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

/// Binary STL with `faces` (normal zeroed)
fn write_stl(path: &Path, faces: &[[Vec3; 3]]) {
    let mut data = vec![0u8; 80];
    data.extend_from_slice(&(faces.len() as u32).to_le_bytes());
    for face in faces {
        for v in std::iter::once(&Vec3::ZERO).chain(face.iter()) {
            for c in v.to_array() {
                data.extend_from_slice(&c.to_le_bytes());
            }
        }
        data.extend_from_slice(&[0, 0]);
    }
    std::fs::write(path, data).expect("Failed to write STL");
}

#[test]
fn test_sphere_writes_obj() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj = dir.path().join("sphere.obj");

    let output = raymesh(
        dir.path(),
        &["sphere", "--lat", "3", "--lon", "8", "--up", "z", "-o", obj.to_str().unwrap()],
    );
    let text = stdout(&output);
    // (2 * 3 - 1) * 8 + 2
    assert!(text.contains("vertices: 42"), "{text}");
    // 2 * 8 + (2 * 3 - 2) * 2 * 8
    assert!(text.contains("triangles: 80"), "{text}");

    let obj_text = std::fs::read_to_string(&obj).expect("OBJ not written");
    assert_eq!(obj_text.lines().filter(|l| l.starts_with("v ")).count(), 42);
    assert_eq!(obj_text.lines().filter(|l| l.starts_with("f ")).count(), 80);
}

#[test]
fn test_import_reports_weld() {
    let dir = tempdir().expect("Failed to create temp dir");
    let stl = dir.path().join("quad.stl");
    let (a, b, c, d) = (
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 2.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
    );
    write_stl(&stl, &[[a, b, c], [a, c, d]]);

    let text = stdout(&raymesh(dir.path(), &["import", stl.to_str().unwrap()]));
    assert!(text.contains("input vertices: 6"), "{text}");
    assert!(text.contains("welded vertices: 4"), "{text}");
    assert!(text.contains("triangles: 2"), "{text}");
    assert!(text.contains("scale: 0.5"), "{text}");
}

#[test]
fn test_import_missing_file_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.stl");
    let output = raymesh(dir.path(), &["import", missing.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_camera_replay() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("config.toml"), "[camera]\ninitial_distance = 10.0\n")
        .expect("Failed to write config");

    let text = stdout(&raymesh(
        dir.path(),
        &["camera", "wheel:1000", "wheel:-2000", "move:0,50,50"],
    ));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "0.000000 0.000000 20.000000",
            "0.000000 0.000000 1.000000",
            "0.000000 0.000000 1.000000",
            "pitch=0.000000 yaw=0.000000 distance=1.000000",
        ]
    );
}

#[test]
fn test_camera_rejects_bad_event() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = raymesh(dir.path(), &["camera", "spin:1"]);
    assert!(!output.status.success());
}
