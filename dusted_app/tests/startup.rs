use dusted_app::{global_env, App, AppError, DustedEnv};

// Logging installs process-wide state, so it gets a test binary of its own.
#[test]
fn start_initializes_logging_once() {
    let dir = tempfile::tempdir().unwrap();
    let env = DustedEnv::with_root(dir.path());

    *global_env().lock().unwrap() = env.clone();

    let app = App::start_default().unwrap();
    assert!(app.inputs().is_empty());
    tracing::info!("startup test");

    let log = std::fs::read_to_string(env.log_file_path()).unwrap();
    assert!(log.contains(&format!("Dusted {}", env.dusted_version())));
    assert!(log.contains("startup test"));

    assert!(matches!(
        App::start(&env),
        Err(AppError::LoggingAlreadyInitialized)
    ));
}
