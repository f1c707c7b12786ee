use std::{
    env,
    fs,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    panic,
    str::FromStr,
    thread,
    time::{Duration, SystemTime},
};
use tokio::net::TcpListener;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

pub struct TracingGuards {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber: stdout always, plus a daily rolling file under
/// `LOG_DIR/<service_name>` when that directory is writable.
pub fn init_tracing(service_name: &str) -> TracingGuards {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "/var/log/classhub".to_string());
    let log_root = PathBuf::from(log_dir).join(service_name);

    let (file_layer, file_guard) = match open_log_writer(&log_root, service_name) {
        Some((writer, guard)) => (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(file_layer);
    let _ = tracing::subscriber::set_global_default(subscriber);

    if file_guard.is_some() {
        let retention_days = env_or("LOG_RETENTION_DAYS", 14u64);
        let cleanup_interval = env_or("LOG_CLEANUP_INTERVAL_MINUTES", 360u64);
        spawn_log_cleanup(log_root, retention_days, cleanup_interval);
    }

    TracingGuards {
        _file_guard: file_guard,
    }
}

fn open_log_writer(log_root: &Path, service_name: &str) -> Option<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(log_root).ok()?;
    // The rolling appender panics if the file cannot be created.
    let appender = panic::catch_unwind(|| {
        tracing_appender::rolling::daily(log_root, format!("{service_name}.log"))
    })
    .ok()?;
    Some(tracing_appender::non_blocking(appender))
}

/// Loads a `.env` file from the working directory or its parents, if one exists.
///
/// Values already present in the process environment win over the file. Runs
/// before tracing is installed, so the outcome is returned for the caller to log.
pub fn load_env_file() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    // Parse typed environment values with a fallback.
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}

fn spawn_log_cleanup(log_root: PathBuf, retention_days: u64, cleanup_interval_minutes: u64) {
    if retention_days == 0 || cleanup_interval_minutes == 0 {
        return;
    }

    let retention = Duration::from_secs(retention_days * 24 * 60 * 60);
    let interval = Duration::from_secs(cleanup_interval_minutes * 60);

    thread::spawn(move || loop {
        let cutoff = SystemTime::now().checked_sub(retention);
        if let Some(cutoff) = cutoff {
            cleanup_old_logs(&log_root, cutoff);
        }
        thread::sleep(interval);
    });
}

fn cleanup_old_logs(root: &Path, cutoff: SystemTime) {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            cleanup_old_logs(&path, cutoff);
            continue;
        }
        let modified = match fs::metadata(&path).and_then(|metadata| metadata.modified()) {
            Ok(modified) => modified,
            Err(_) => continue,
        };
        if modified < cutoff {
            let _ = fs::remove_file(&path);
        }
    }
}

pub async fn bind_listener(host: IpAddr, port: u16) -> std::io::Result<TcpListener> {
    let addr = SocketAddr::from((host, port));
    TcpListener::bind(addr).await
}

pub async fn shutdown_signal() {
    // Handle ctrl-c and SIGTERM to allow graceful shutdown.
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "sigterm handler unavailable");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_missing_or_invalid() {
        assert_eq!(env_or("CLASSHUB_TEST_UNSET_VAR", 8080u16), 8080);

        env::set_var("CLASSHUB_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_or("CLASSHUB_TEST_BAD_PORT", 8080u16), 8080);

        env::set_var("CLASSHUB_TEST_GOOD_PORT", "9090");
        assert_eq!(env_or("CLASSHUB_TEST_GOOD_PORT", 8080u16), 9090);
    }

    #[test]
    fn cleanup_removes_only_expired_files() {
        let root = env::temp_dir().join(format!("classhub-log-test-{}", std::process::id()));
        let nested = root.join("nested");
        fs::create_dir_all(&nested).expect("create dirs");
        let stale = nested.join("old.log");
        fs::write(&stale, b"old").expect("write log");

        // Nothing is older than a cutoff in the past.
        cleanup_old_logs(&root, SystemTime::UNIX_EPOCH);
        assert!(stale.exists());

        cleanup_old_logs(&root, SystemTime::now() + Duration::from_secs(60));
        assert!(!stale.exists());
        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn binds_ephemeral_port() {
        let listener = bind_listener(IpAddr::from([127, 0, 0, 1]), 0)
            .await
            .expect("bind");
        assert_ne!(listener.local_addr().expect("addr").port(), 0);
    }
}
