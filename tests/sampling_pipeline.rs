use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use lazy_static::lazy_static;
use ping_tester_lib::{
    ConfigError, ConsoleVisualizer, LatencyProbe, PingConfig, PingProbe, Platform,
    ProbeOutcome, SampleScheduler, CONFIG_ENV_VAR,
};
use tempfile::TempDir;

lazy_static! {
    static ref TEST_ENV_GUARD: Mutex<()> = Mutex::new(());
    // Stub scripts are written then exec'd; keep that out of each other's way.
    static ref STUB_GUARD: tokio::sync::Mutex<()> = tokio::sync::Mutex::new(());
}

struct ConfigEnv {
    dir: TempDir,
    prev_override: Option<String>,
}

impl ConfigEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp config dir");
        let prev_override = std::env::var(CONFIG_ENV_VAR).ok();
        std::env::remove_var(CONFIG_ENV_VAR);
        ConfigEnv { dir, prev_override }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write config");
        path
    }
}

impl Drop for ConfigEnv {
    fn drop(&mut self) {
        match &self.prev_override {
            Some(value) => std::env::set_var(CONFIG_ENV_VAR, value),
            None => std::env::remove_var(CONFIG_ENV_VAR),
        }
    }
}

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    TEST_ENV_GUARD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn env_override_points_at_config_file() {
    let _guard = lock_env();
    let env = ConfigEnv::new();
    let path = env.write(
        "ping.json",
        r#"{ "host": "127.0.0.1", "window_capacity": 5, "tick_interval_ms": 250 }"#,
    );
    std::env::set_var(CONFIG_ENV_VAR, &path);

    let config = PingConfig::load(None).expect("load from env override");
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.window_capacity, 5);
    assert_eq!(config.tick_interval(), Duration::from_millis(250));
    assert_eq!(config.program, "ping");
}

#[test]
fn explicit_path_beats_env_override() {
    let _guard = lock_env();
    let env = ConfigEnv::new();
    let from_env = env.write("env.json", r#"{ "host": "env.example" }"#);
    let explicit = env.write("cli.json", r#"{ "host": "cli.example" }"#);
    std::env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = PingConfig::load(Some(explicit.as_path())).expect("load explicit");
    assert_eq!(config.host, "cli.example");
}

#[test]
fn broken_config_files_are_reported() {
    let _guard = lock_env();
    let env = ConfigEnv::new();

    let garbage = env.write("bad.json", "{ host: nope");
    assert!(matches!(
        PingConfig::load(Some(garbage.as_path())),
        Err(ConfigError::Parse { .. })
    ));

    let missing = env.dir.path().join("missing.json");
    match PingConfig::load(Some(missing.as_path())) {
        Err(ConfigError::Io { path, source }) => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn scheduler_takes_settings_from_config() {
    let config = PingConfig {
        window_capacity: 3,
        tick_interval_ms: 40,
        ..PingConfig::default()
    };
    let probe = PingProbe::new(Platform::Linux, &config.host, &config.program);
    let scheduler = SampleScheduler::from_config(probe, ConsoleVisualizer::new(io::sink()), &config);
    assert_eq!(scheduler.window().capacity(), 3);
    assert_eq!(scheduler.tick_interval(), Duration::from_millis(40));
}

#[cfg(unix)]
mod stub_ping {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const LINUX_OK: &str = r#"#!/bin/sh
echo "PING $4 (127.0.0.1) 56(84) bytes of data."
echo "64 bytes from 127.0.0.1: icmp_seq=1 ttl=64 time=0.042 ms"
echo ""
echo "--- $4 ping statistics ---"
echo "1 packets transmitted, 1 received, 0% packet loss, time 0ms"
echo "args: $*"
"#;

    const LINUX_LOSS: &str = r#"#!/bin/sh
echo "1 packets transmitted, 0 received, 100% packet loss, time 0ms"
exit 1
"#;

    const NOT_UTF8: &str = "#!/bin/sh\nprintf '\\377\\376'\n";

    fn install(dir: &TempDir, name: &str, body: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, body).expect("write stub");
        let mut perms = fs::metadata(&path).expect("stub metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod stub");
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn invoker_passes_linux_arguments_and_host() {
        let _guard = STUB_GUARD.lock().await;
        let dir = TempDir::new().expect("stub dir");
        let program = install(&dir, "ping-ok", LINUX_OK);

        let probe = PingProbe::new(Platform::Linux, "localhost", &program);
        let raw = probe.invoker().invoke().await.expect("stub output");
        assert!(raw.contains("args: -4 -c 1 localhost"));
    }

    #[tokio::test]
    async fn stub_reply_becomes_a_sample() {
        let _guard = STUB_GUARD.lock().await;
        let dir = TempDir::new().expect("stub dir");
        let program = install(&dir, "ping-ok", LINUX_OK);

        let mut probe = PingProbe::new(Platform::Linux, "localhost", &program);
        assert_eq!(probe.probe().await.latency(), Some(0.042));
    }

    #[tokio::test]
    async fn loss_and_garbage_are_absorbed_by_the_scheduler() {
        let _guard = STUB_GUARD.lock().await;
        let dir = TempDir::new().expect("stub dir");
        let lossy = install(&dir, "ping-loss", LINUX_LOSS);
        let garbled = install(&dir, "ping-garbled", NOT_UTF8);

        let mut probe = PingProbe::new(Platform::Linux, "localhost", &lossy);
        assert!(matches!(probe.probe().await, ProbeOutcome::NoData));

        let probe = PingProbe::new(Platform::Linux, "localhost", &garbled);
        let mut scheduler =
            SampleScheduler::new(probe, ConsoleVisualizer::new(io::sink()), 4, Duration::from_millis(1));
        scheduler.tick().await;
        scheduler.tick().await;

        assert!(scheduler.window().is_empty());
        assert_eq!(scheduler.telemetry().probe_failures, 2);
    }

    #[tokio::test]
    async fn stub_pipeline_fills_window() {
        let _guard = STUB_GUARD.lock().await;
        let dir = TempDir::new().expect("stub dir");
        let program = install(&dir, "ping-ok", LINUX_OK);

        let probe = PingProbe::new(Platform::Linux, "localhost", &program);
        let mut scheduler =
            SampleScheduler::new(probe, ConsoleVisualizer::new(io::sink()), 2, Duration::from_millis(1));
        for _ in 0..3 {
            scheduler.tick().await;
        }

        let indices: Vec<u64> = scheduler.window().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![2, 3]);
        let stats = scheduler.window().stats().expect("stats");
        assert_eq!(stats.average, 0.042);
    }
}
