use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let output = Command::cargo_bin("shelf")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for command in ["serve", "migrate", "list", "add", "edit", "delete"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn edit_requires_an_id() {
    Command::cargo_bin("shelf")
        .unwrap()
        .args(["edit", "--title", "Dune"])
        .assert()
        .failure();
}
