use assert_cmd::Command;
use predicates::prelude::*;

/// Test that the help text documents the runner-facing flags
#[test]
fn test_help_mentions_channel_parameter() {
    Command::cargo_bin("chanstat")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("canais"))
        .stdout(predicate::str::contains("--server"))
        .stdout(predicate::str::contains("--task-id"));
}

#[test]
fn test_version_flag_works() {
    Command::cargo_bin("chanstat")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chanstat"));
}

/// A run with no channel parameter anywhere must abort at startup, before
/// any browser work and before the run log is created
#[test]
fn test_missing_channels_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("chanstat")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("CHANSTAT_SERVER")
        .env_remove("CHANSTAT_TASK_ID")
        .env_remove("CHANSTAT_TOKEN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("canais"));

    assert!(!dir.path().join("log_canais_youtube.txt").exists());
}

/// When no Chrome can be launched every channel fails, but the run still
/// runs to completion: the FAILED summary is printed and the log artifact
/// exists with one error line per channel
#[test]
fn test_failed_channels_still_finish_the_run() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("chanstat")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("CHANSTAT_SERVER")
        .env_remove("CHANSTAT_TASK_ID")
        .env_remove("CHANSTAT_TOKEN")
        .args([
            "--canais",
            "canal_a,canal_b",
            "--chrome-path",
            "/definitely/missing/chrome",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Todos os 2 canais foram processados com erro.",
        ));

    let log = std::fs::read_to_string(dir.path().join("log_canais_youtube.txt")).unwrap();
    assert!(log.contains("Iniciando coleta de dados do canal: canal_a"));
    assert!(log.contains("Erro ao coletar dados do canal canal_a"));
    assert!(log.contains("Erro ao coletar dados do canal canal_b"));
    assert!(log.contains("Execução finalizada."));
}

/// A malformed server URL is a startup error as well
#[test]
fn test_invalid_server_url_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("chanstat")
        .unwrap()
        .current_dir(dir.path())
        .args(["--server", "not a url", "--canais", "a,b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("server URL"));
}
