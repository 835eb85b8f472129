//! Integration tests for the TS Prisma CLI

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const USER_DECLARATIONS: &str = r#"
import { Decimal } from './runtime/library';

export namespace Prisma {
    export type UserFindFirstArgs = {
        include?: UserInclude | null;
        select?: UserSelect | null;
        where?: UserWhereInput;
    };
    export type UserSelect = { id?: boolean; posts?: boolean };
    export type UserInclude = {
        posts?: boolean | PostFindManyArgs;
    };
    export type PostFindManyArgs = {
        include?: PostInclude | null;
        take?: number;
    };
    export type PostInclude = {
        author?: boolean | UserFindFirstArgs;
        comments?: boolean | CommentFindManyArgs;
    };
    export type CommentFindManyArgs = {
        select?: { id?: boolean } | null;
    };
    export interface UserWhereInput { id?: number }
}

export namespace TSPrisma {
    export type TSPrismaModels = {
        User: { FindFirst: Prisma.UserFindFirstArgs };
        Post: { FindMany: Prisma.PostFindManyArgs };
    };
}
"#;

const NO_ENTRY_POINT: &str = r#"
export namespace Prisma {
    export type UserArgs = { include?: { posts: boolean } };
}
"#;

/// Get the tsprisma binary
#[allow(deprecated)]
fn tsprisma_cmd() -> Command {
    Command::cargo_bin("tsprisma").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_command() {
    tsprisma_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("TS Prisma"))
        .stdout(predicate::str::contains("Usage: tsprisma"))
        .stdout(predicate::str::contains("includes"))
        .stdout(predicate::str::contains("aliases"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_command() {
    tsprisma_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version"))
        .stdout(predicate::str::contains("0.3.0"));
}

#[test]
fn test_includes_help() {
    tsprisma_cmd()
        .args(["includes", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolve the include table"))
        .stdout(predicate::str::contains("--lowercase"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_includes_prints_table() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "index.d.ts", USER_DECLARATIONS);

    let value = stdout_json(tsprisma_cmd().current_dir(dir.path()).arg("includes").arg(&file));

    assert_eq!(
        value,
        serde_json::json!({
            "User": {
                "FindFirst": {
                    "posts": { "include": { "author": true, "comments": true } }
                }
            },
            "Post": {
                "FindMany": {
                    "author": { "include": { "posts": { "include": { "comments": true } } } },
                    "comments": true
                }
            }
        })
    );
}

#[test]
fn test_includes_compact_and_lowercase() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "index.d.ts", USER_DECLARATIONS);

    tsprisma_cmd()
        .current_dir(dir.path())
        .args(["includes", "--compact", "--lowercase"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"user":{"findFirst":"#))
        .stdout(predicate::str::contains("\n  ").not());
}

#[test]
fn test_includes_multiple_files_keyed_by_path() {
    let dir = TempDir::new().unwrap();
    let first = write(&dir, "a.d.ts", USER_DECLARATIONS);
    let second = write(
        &dir,
        "b.d.ts",
        "export namespace TSPrisma { export type TSPrismaModels = { Tag: {} }; }",
    );

    let value = stdout_json(
        tsprisma_cmd()
            .current_dir(dir.path())
            .arg("includes")
            .arg(&first)
            .arg(&second),
    );

    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(
        object[&second.display().to_string()],
        serde_json::json!({ "Tag": {} })
    );
    assert!(object[&first.display().to_string()]["User"].is_object());
}

#[test]
fn test_includes_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "index.d.ts", USER_DECLARATIONS);
    let out = dir.path().join("includes.json");

    tsprisma_cmd()
        .current_dir(dir.path())
        .arg("includes")
        .arg(&file)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["Post"]["FindMany"]["comments"], serde_json::json!(true));
}

#[test]
fn test_includes_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "index.d.ts",
        r#"
        declare namespace Db {
            type PostArgs = { include?: { author: boolean | AuthorArgs } };
            type AuthorArgs = { select?: { id?: boolean } };
            type AllModels = { Post: { FindMany: PostArgs } };
        }
        "#,
    );
    write(
        &dir,
        "tsprisma.toml",
        "namespaces = [\"Db\"]\nentry_point = \"AllModels\"\n\n[output]\nlowercase_models = true\n",
    );

    let value = stdout_json(tsprisma_cmd().current_dir(dir.path()).arg("includes").arg(&file));
    assert_eq!(
        value,
        serde_json::json!({ "post": { "FindMany": { "author": true } } })
    );
}

#[test]
fn test_includes_missing_entry_point_fails() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "index.d.ts", NO_ENTRY_POINT);

    tsprisma_cmd()
        .current_dir(dir.path())
        .arg("includes")
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("TSPrismaModels"));
}

#[test]
fn test_includes_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    tsprisma_cmd()
        .current_dir(dir.path())
        .args(["includes", "does-not-exist.d.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_includes_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "index.d.ts", USER_DECLARATIONS);
    let config = write(&dir, "custom.toml", "unknown_key = 1\n");

    tsprisma_cmd()
        .current_dir(dir.path())
        .arg("includes")
        .arg(&file)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_aliases_lists_registered_aliases() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "index.d.ts", USER_DECLARATIONS);

    tsprisma_cmd()
        .current_dir(dir.path())
        .arg("aliases")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("UserFindFirstArgs"))
        .stdout(predicate::str::contains("CommentFindManyArgs"))
        .stdout(predicate::str::contains("TSPrismaModels"))
        .stdout(predicate::str::contains("found"))
        .stdout(predicate::str::contains("UserWhereInput").not());
}

#[test]
fn test_aliases_warns_without_entry_point() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "index.d.ts", NO_ENTRY_POINT);

    tsprisma_cmd()
        .current_dir(dir.path())
        .arg("aliases")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}
