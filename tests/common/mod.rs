use assert_cmd::Command;

pub fn bursar_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bursar").unwrap();
    cmd.env_remove("BURSAR_DATA_FILE");
    cmd.env_remove("BURSAR_RECEIPT_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
}
