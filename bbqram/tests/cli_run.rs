#[cfg(test)]
mod test {
    use assert_cmd::Command;
    use predicates::str::contains;
    use rstest::{fixture, rstest};
    use tempfile::tempdir;

    #[fixture]
    fn cmd() -> Command {
        Command::cargo_bin("bbqram").unwrap()
    }

    #[rstest]
    fn run_small_sweep(mut cmd: Command) {
        let dir = tempdir().unwrap();
        cmd.arg("run")
            .args([
                "--scenario",
                "2",
                "--percentage",
                "0.5",
                "--repetitions",
                "50",
                "--min-qubits",
                "2",
                "--max-qubits",
                "2",
                "--seed",
                "7",
            ])
            .arg("--out-dir")
            .arg(dir.path())
            .assert()
            .success()
            .stdout(contains("remove_t_2q_p50.csv"));

        let body = std::fs::read_to_string(dir.path().join("remove_t_2q_p50.csv")).unwrap();
        assert!(body.starts_with("input,original,modified\n"));
        assert_eq!(body.lines().count(), 5);
    }

    #[rstest]
    fn rerun_overwrites(mut cmd: Command) {
        let dir = tempdir().unwrap();
        let args = [
            "run",
            "--scenario",
            "2",
            "--percentage",
            "0.2",
            "--repetitions",
            "20",
            "--min-qubits",
            "2",
            "--max-qubits",
            "2",
            "--seed",
            "1",
        ];
        cmd.args(args).arg("--out-dir").arg(dir.path()).assert().success();

        let mut again = Command::cargo_bin("bbqram").unwrap();
        again.args(args).arg("--out-dir").arg(dir.path()).assert().success();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[rstest]
    fn parallel_sweep(mut cmd: Command) {
        let dir = tempdir().unwrap();
        cmd.arg("run")
            .args([
                "--scenario",
                "2",
                "--repetitions",
                "20",
                "--min-qubits",
                "2",
                "--max-qubits",
                "2",
                "--seed",
                "3",
                "--parallel",
            ])
            .arg("--out-dir")
            .arg(dir.path())
            .assert()
            .success();

        assert!(dir.path().join("remove_t_2q_p20.csv").exists());
    }

    #[rstest]
    fn show_circuit(mut cmd: Command) {
        cmd.args(["show", "-n", "2", "--scenario", "2"])
            .assert()
            .success()
            .stdout(contains("qreg q[11];"))
            .stdout(contains("t-count:"));
    }

    #[rstest]
    fn show_writes_file(mut cmd: Command) {
        let dir = tempdir().unwrap();
        let out = dir.path().join("circuit.qasm");
        cmd.args(["show", "-n", "2", "--scenario", "1"])
            .arg("--out")
            .arg(&out)
            .assert()
            .success();
        let body = std::fs::read_to_string(&out).unwrap();
        assert!(body.contains("OPENQASM 2.0;"));
    }

    #[rstest]
    fn unknown_scenario(mut cmd: Command) {
        cmd.args(["run", "--scenario", "9"])
            .assert()
            .failure()
            .stderr(contains("unknown decomposition scenario '9'"));
    }

    #[rstest]
    fn percentage_out_of_range(mut cmd: Command) {
        cmd.args(["run", "--percentage", "1.5"])
            .assert()
            .failure()
            .stderr(contains("removal fraction must lie in [0, 1]"));
    }

    #[rstest]
    fn initial_state_length_mismatch(mut cmd: Command) {
        cmd.args(["show", "-n", "2", "--initial-state", "101"])
            .assert()
            .failure()
            .stderr(contains("one bit per address qubit"));
    }
}
