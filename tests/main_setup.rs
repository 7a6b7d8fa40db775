use contacts_shell::{AppConfig, config::Env};
use serial_test::serial;
use std::{env, panic, path::PathBuf};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: [&str; 4] = ["APP_ENV", "APP_BIND_ADDR", "APP_BASE_URL", "APP_DIST_DIR"];

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T, cleanup_vars: &[&'static str]) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(
        || {
            panic::catch_unwind(|| {
                unsafe {
                    env::set_var("APP_ENV", "production");
                    env::remove_var("APP_DIST_DIR");
                }
                AppConfig::load()
            })
        },
        &CONFIG_VARS,
    );

    assert!(
        result.is_err(),
        "Production config loading should panic without APP_DIST_DIR"
    );
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                for var in &CONFIG_VARS[1..] {
                    env::remove_var(var);
                }
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    );

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.base_url, "/");
    assert_eq!(config.dist_dir, PathBuf::from("dist"));
    assert_eq!(config.shell_path(), PathBuf::from("dist/index.html"));
}

#[test]
#[serial]
fn test_app_config_production_reads_overrides() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("APP_DIST_DIR", "/srv/contacts");
                env::set_var("APP_BASE_URL", "app");
                env::set_var("APP_BIND_ADDR", "127.0.0.1:8080");
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    );

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.base_url, "/app/");
    assert_eq!(config.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.assets_dir(), PathBuf::from("/srv/contacts/assets"));
}
