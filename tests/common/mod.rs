use assert_cmd::Command;

pub fn mtags_cmd() -> Command {
    Command::cargo_bin("mtags").unwrap()
}

/// Run `mtags encode` and capture the emitted code
#[allow(dead_code)]
pub fn encode(id: &str, data: &str) -> String {
    let output = mtags_cmd()
        .args(["encode", id, data])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}
