use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn rankgen(args: &[&str], rng_seed: Option<&str>, stdin: &str) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_rankgen"));
    command
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    match rng_seed {
        Some(seed) => command.env("RNG_SEED", seed),
        None => command.env_remove("RNG_SEED"),
    };

    let mut child = command.spawn().expect("spawn rankgen");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for rankgen")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "rankgen failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn finals_ignores_unparsable_rng_seed() {
    let input = "{\"algorithm\":\"a\",\"time\":1}\n{\"algorithm\":\"a\",\"time\":2}\n";
    let output = rankgen(&["finals"], Some("not-a-seed"), input);
    assert_eq!(stdout_of(&output), "{\"algorithm\":\"a\",\"time\":2}\n");
}

#[test]
fn sequential_patterns_ignore_rng_seed() {
    let output = rankgen(&["sawtooth", "2", "4"], Some("not-a-seed"), "");
    assert_eq!(stdout_of(&output), "0\n1\n2\n0\n");
}

#[test]
fn random_generators_reject_unparsable_rng_seed() {
    let output = rankgen(&["uniform", "3", "5"], Some("not-a-seed"), "");
    assert!(!output.status.success());
}

#[test]
fn negative_rng_seed_is_reproducible() {
    let first = stdout_of(&rankgen(&["geometric", "70", "200"], Some("-17"), ""));
    let second = stdout_of(&rankgen(&["geometric", "70", "200", "--seed", "-17"], None, ""));
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 200);

    let other = stdout_of(&rankgen(&["geometric", "70", "200", "--seed", "17"], None, ""));
    assert_ne!(first, other);
}

#[cfg(unix)]
#[test]
fn generate_cases_keeps_stdout_clean() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let model = tmp.path().join("offline-model");
    fs::write(
        &model,
        "#!/bin/sh\necho \"{\\\"name\\\": \\\"greedy\\\", \\\"bounds\\\": [$2]}\"\n",
    )
    .expect("write model stub");
    fs::set_permissions(&model, fs::Permissions::from_mode(0o755)).expect("chmod model stub");

    let config = tmp.path().join("cases.toml");
    fs::write(&config, "queue_counts = [2]\nrank_counts = [4, 64]\n").expect("write config");

    let out_dir = tmp.path().join("cases");
    let output = rankgen(
        &[
            "generate-cases",
            "-d",
            "geometric",
            "-c",
            config.to_str().expect("utf-8 path"),
            "-o",
            out_dir.to_str().expect("utf-8 path"),
            "-m",
            model.to_str().expect("utf-8 path"),
        ],
        Some("not-a-seed"),
        "",
    );

    assert_eq!(stdout_of(&output), "");
    assert_eq!(
        fs::read_to_string(out_dir.join("bench_2q-64r.txt")).expect("read case file"),
        "pupd-2q-64r:pupd\nstatic-greedy-2q-64r:static:2\n"
    );
}
