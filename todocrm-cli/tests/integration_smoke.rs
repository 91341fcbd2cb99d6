//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn todocrm() -> Command {
    let mut cmd = Command::cargo_bin("todocrm").unwrap();
    cmd.env_remove("APP_ENV")
        .env_remove("VERCEL")
        .env_remove("RUST_LOG");
    cmd
}

// === Help Output ===

#[test]
fn test_serve_help() {
    todocrm()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cors-permissive"))
        .stdout(predicate::str::contains("127.0.0.1:3030"));
}

#[test]
fn test_todos_update_help() {
    todocrm()
        .args(["todos", "update", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--show-on-front"));
}

#[test]
fn test_contacts_add_help() {
    todocrm()
        .args(["contacts", "add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--email"))
        .stdout(predicate::str::contains("--company"));
}

// === Startup Configuration ===

#[test]
fn test_missing_database_url_fails() {
    todocrm()
        .env_remove("DATABASE_URL")
        .args(["todos", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL is not set"));
}

#[test]
fn test_loopback_rejected_in_production() {
    todocrm()
        .env("APP_ENV", "production")
        .env("DATABASE_URL", "postgres://localhost:5432/app")
        .args(["contacts", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("local machine"));
}

#[test]
fn test_unsupported_scheme_fails_check() {
    todocrm()
        .env("DATABASE_URL", "mongodb://cluster.example.net/app")
        .arg("check-db")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme `mongodb`"));
}

#[test]
fn test_serve_refuses_unsupported_scheme() {
    todocrm()
        .env("DATABASE_URL", "nonsense")
        .args(["serve", "--bind", "127.0.0.1:0"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme"));
}

// === Operations Against memory:// ===

#[test]
fn test_check_db_memory() {
    todocrm()
        .env("DATABASE_URL", "memory://")
        .arg("check-db")
        .assert()
        .success()
        .stdout(predicate::str::contains("todos: 0"));
}

#[test]
fn test_todos_list_memory() {
    todocrm()
        .env("DATABASE_URL", "memory://")
        .args(["todos", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"));
}

#[test]
fn test_todos_add_prints_defaults() {
    todocrm()
        .args(["todos", "--database-url", "memory://", "add", "Buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"showOnFront\": true"))
        .stdout(predicate::str::contains("\"completed\": false"));
}

#[test]
fn test_blank_title_exits_nonzero() {
    todocrm()
        .env("DATABASE_URL", "memory://")
        .args(["todos", "add", "   "])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Todo title cannot be empty"));
}

#[test]
fn test_contact_missing_email_reported() {
    todocrm()
        .env("DATABASE_URL", "memory://")
        .args(["contacts", "add", "--name", "Jo", "--email", ""])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Contact email is required"));
}

#[test]
fn test_delete_unknown_id_not_found() {
    todocrm()
        .env("DATABASE_URL", "memory://")
        .args(["contacts", "delete", "3f2b8c1e-0000-4000-8000-000000000000"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Contact not found"));
}
