//! Integration tests for AgrowMart

mod backend;

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Binary with every per-user directory redirected into `home`
    fn agrowmart(home: &TempDir) -> Command {
        let root = home.path();
        let mut cmd = cargo_bin_cmd!("agrowmart");
        cmd.env("HOME", root)
            .env("XDG_CONFIG_HOME", root.join("config"))
            .env("XDG_STATE_HOME", root.join("state"))
            .env("XDG_RUNTIME_DIR", root.join("runtime"))
            .env("AGROWMART_NON_INTERACTIVE", "1")
            .env_remove("AGROWMART_CONFIG")
            .env_remove("AGROWMART_API_URL")
            .env_remove("AGROWMART_PASSWORD");
        cmd
    }

    #[test]
    fn help_displays() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Account and session client"));
    }

    #[test]
    fn version_displays() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("agrowmart"));
    }

    #[test]
    fn config_path() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("agrowmart").and(predicate::str::contains("config.toml")));
    }

    #[test]
    fn config_show() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[api]").and(predicate::str::contains("base_url")));
    }

    #[test]
    fn config_set_then_show() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args(["config", "set", "account.default_country_code", "+977"])
            .assert()
            .success();
        agrowmart(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("+977"));
    }

    #[test]
    fn config_set_unknown_key() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn status_without_login() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("unauthenticated"));
    }

    #[test]
    fn profile_requires_login() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args(["profile", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"))
            .stderr(predicate::str::contains("agrowmart login"));
    }

    #[test]
    fn open_profile_redirects_to_login() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args(["open", "/profile"])
            .assert()
            .success()
            .stdout(predicate::str::contains("/login"));
    }

    #[test]
    fn open_lists_pages() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .arg("open")
            .assert()
            .success()
            .stdout(predicate::str::contains("/forgot-password"))
            .stdout(predicate::str::contains("/getappsoon"));
    }

    #[test]
    fn open_unknown_page() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args(["open", "/cart"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No page at /cart"));
    }

    #[test]
    fn login_rejects_bad_phone_before_sending() {
        let home = TempDir::new().unwrap();
        // Nothing listens on port 9; validation must fail first
        agrowmart(&home)
            .args(["--api-url", "http://127.0.0.1:9", "login", "--phone", "123", "--password", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Please enter a valid phone number."));
    }

    #[test]
    fn signup_password_mismatch() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args([
                "--api-url",
                "http://127.0.0.1:9",
                "signup",
                "--first-name",
                "Avi",
                "--phone",
                "9876543210",
                "--password",
                "secret1",
                "--confirm-password",
                "secret2",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Passwords do not match!"));
    }

    #[test]
    fn reset_password_short_code() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args([
                "--api-url",
                "http://127.0.0.1:9",
                "reset-password",
                "--phone",
                "9876543210",
                "--code",
                "12",
                "--new-password",
                "secret1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Enter the code you received"));
    }

    #[test]
    fn profile_cities() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args(["profile", "cities", "pa"])
            .assert()
            .success()
            .stdout(predicate::str::diff("Patna\n"));
    }

    #[test]
    fn completions_generate() {
        let home = TempDir::new().unwrap();
        agrowmart(&home)
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("agrowmart"));
    }
}

mod session_tests {
    use super::backend::Backend;
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn agrowmart(home: &Path, runtime: &str, api: &str) -> Command {
        let mut cmd = cargo_bin_cmd!("agrowmart");
        cmd.env("HOME", home)
            .env("XDG_CONFIG_HOME", home.join("config"))
            .env("XDG_STATE_HOME", home.join("state"))
            .env("XDG_RUNTIME_DIR", home.join(runtime))
            .env("AGROWMART_NON_INTERACTIVE", "1")
            .env("AGROWMART_API_URL", api)
            .env_remove("AGROWMART_CONFIG")
            .env_remove("AGROWMART_PASSWORD");
        cmd
    }

    #[test]
    fn login_then_profile() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["login", "--phone", "9876543210", "--password", "secret1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Login Successful!"))
            .stdout(predicate::str::contains("Avi"));

        agrowmart(home.path(), "run1", &backend.url())
            .args(["profile", "show", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"firstName\": \"Avi\""));
    }

    #[test]
    fn wrong_password_shows_backend_message() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["login", "--phone", "9876543210", "--password", "nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid credentials"));
    }

    #[test]
    fn remembered_login_survives_new_session() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["login", "--email", "avi@farm.in", "--password", "secret1", "--remember"])
            .assert()
            .success();

        // A fresh runtime dir is a new OS session: only the refresh credential remains
        agrowmart(home.path(), "run2", &backend.url())
            .args(["status", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"state\": \"authenticated\""))
            .stdout(predicate::str::contains("\"restored\": \"refreshed\""))
            .stdout(predicate::str::contains("avi@farm.in"));
    }

    #[test]
    fn unremembered_login_ends_with_session() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["login", "--phone", "9876543210", "--password", "secret1"])
            .assert()
            .success();

        agrowmart(home.path(), "run2", &backend.url())
            .args(["status", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"state\": \"unauthenticated\""));
    }

    #[test]
    fn logout_forgets_remembered_login() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["login", "--phone", "9876543210", "--password", "secret1", "--remember"])
            .assert()
            .success();
        agrowmart(home.path(), "run1", &backend.url())
            .arg("logout")
            .assert()
            .success();

        agrowmart(home.path(), "run2", &backend.url())
            .args(["status", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"state\": \"unauthenticated\""))
            .stdout(predicate::str::contains("\"remembered\": null"));
    }

    #[test]
    fn forgot_password_sends_international_phone() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["forgot-password", "--phone", "98765 43210"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Reset code sent to your phone"));

        let sent = backend.requests_to("POST", "/auth/forgot-password");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body["phone"], "+919876543210");
    }

    /// Durable store with a refresh credential the backend will not accept
    fn write_refresh_token(home: &Path, token: &str) -> PathBuf {
        let dir = home.join("state").join("agrowmart").join("credentials");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("refresh-token.json");
        std::fs::write(
            &path,
            format!(r#"{{"value":"{}","stored_at":"2026-01-01T00:00:00Z"}}"#, token),
        )
        .unwrap();
        path
    }

    #[test]
    fn rejected_refresh_token_is_kept_and_reported() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();
        let stored = write_refresh_token(home.path(), "bogus");

        agrowmart(home.path(), "run1", &backend.url())
            .args(["status", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"state\": \"unauthenticated\""))
            .stdout(predicate::str::contains("\"restored\": \"failed\""));

        let refreshes = backend.requests_to("POST", "/auth/token/refresh");
        assert_eq!(refreshes.len(), 1);
        assert_eq!(refreshes[0].body["refreshToken"], "bogus");
        assert!(stored.exists());
    }

    #[test]
    fn local_commands_do_not_restore_the_session() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();
        write_refresh_token(home.path(), "R");

        agrowmart(home.path(), "run1", &backend.url())
            .args(["completions", "zsh"])
            .assert()
            .success();
        agrowmart(home.path(), "run1", &backend.url())
            .args(["config", "show"])
            .assert()
            .success();

        assert!(backend.requests().is_empty());
    }

    #[test]
    fn wrong_password_is_not_an_expired_session() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["login", "--phone", "9876543210", "--password", "nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid credentials"))
            .stderr(predicate::str::contains("expired").not());
    }

    #[test]
    fn stale_access_token_suggests_login() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();
        let dir = home.path().join("run1").join("agrowmart");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("access-token.json"),
            r#"{"value":"stale","stored_at":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["profile", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Your session has expired"))
            .stderr(predicate::str::contains("agrowmart login"));
    }

    #[test]
    fn profile_update_is_saved() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["login", "--phone", "9876543210", "--password", "secret1"])
            .assert()
            .success();
        agrowmart(home.path(), "run1", &backend.url())
            .args(["profile", "update", "--location", "Nagpur"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Profile updated successfully!"));

        let puts = backend.requests_to("PUT", "/auth/me");
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].body["location"], "Nagpur");
        // Untouched fields are sent back unchanged
        assert_eq!(puts[0].body["firstName"], "Avi");

        agrowmart(home.path(), "run1", &backend.url())
            .args(["profile", "show", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"location\": \"Nagpur\""));
    }

    #[test]
    fn profile_delete_with_wrong_phone_keeps_account() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["login", "--phone", "9876543210", "--password", "secret1"])
            .assert()
            .success();
        agrowmart(home.path(), "run1", &backend.url())
            .args(["profile", "delete", "--phone", "9000000000", "--yes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Phone number does not match"));

        agrowmart(home.path(), "run1", &backend.url())
            .args(["status", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"state\": \"authenticated\""));
    }

    #[test]
    fn profile_delete_ends_session() {
        let backend = Backend::start();
        let home = TempDir::new().unwrap();

        agrowmart(home.path(), "run1", &backend.url())
            .args(["login", "--phone", "9876543210", "--password", "secret1", "--remember"])
            .assert()
            .success();
        agrowmart(home.path(), "run1", &backend.url())
            .args(["profile", "delete", "--phone", "9876543210", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Account deleted successfully."));

        let deletes = backend.requests_to("DELETE", "/auth/me");
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[0].body["phone"], "9876543210");

        // Neither this session nor a new one is signed in afterwards
        agrowmart(home.path(), "run1", &backend.url())
            .args(["status", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"state\": \"unauthenticated\""));
        agrowmart(home.path(), "run2", &backend.url())
            .args(["status", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"state\": \"unauthenticated\""))
            .stdout(predicate::str::contains("\"remembered\": null"));
    }
}
