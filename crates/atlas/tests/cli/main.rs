//! Offline tests of the `atlas` binary.

use snapbox::{cmd::Command, str};
use tempfile::TempDir;

/// Runs `atlas` in an empty directory, without any configuration from the environment.
fn atlas(dir: &TempDir) -> Command {
    Command::new(snapbox::cmd::cargo_bin!("atlas"))
        .current_dir(dir.path())
        .env_remove("ETH_RPC_URL")
        .env_remove("ATLAS_CONFIG")
        .env_remove("ATLAS_ETH_RPC_URL")
        .env_remove("ATLAS_PRIVATE_KEY")
        .env_remove("ATLAS_CHAIN_ID")
        .env_remove("ATLAS_DEBUG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
}

#[test]
fn print_help() {
    let dir = TempDir::new().unwrap();
    atlas(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout_eq(str![[r#"
...
A CLI for exploring ENS
...
Usage: atlas[EXE] [OPTIONS] <COMMAND>

Commands:
  profile      Print the profile of an ENS name or address
  resolve      Resolve an ENS name to an address or vice versa
  namehash     Get the namehash of an ENS name
  labelhash    Get the labelhash of a label
  resolver     Get the current resolver of an ENS name
  deployments  Print the known ENS contract deployments
  edit         Edit the records of an ENS name
  help         Print this message or the help of the given subcommand(s)
...
"#]]);
}

#[test]
fn namehash() {
    let dir = TempDir::new().unwrap();
    atlas(&dir).args(["namehash", "vitalik.eth"]).assert().success().stdout_eq(str![[r#"
0xee6c4522aab0003e8d14cd40a6af439055fd2577951148c14b6cea9a53475835

"#]]);
}

#[test]
fn labelhash() {
    let dir = TempDir::new().unwrap();
    atlas(&dir).args(["labelhash", "vitalik"]).assert().success().stdout_eq(str![[r#"
0xaf2caa1c2ca1d027f1ac823b529d0a67cd144264b2789fa2ea4d63a67c7103cc

"#]]);
}

#[test]
fn deployments() {
    let dir = TempDir::new().unwrap();
    atlas(&dir).arg("deployments").assert().success().stdout_eq(str![[r#"
Chain ID: 1
  ensBaseRegistrarImplementation: [..]
...
  ensRegistry: 0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e
...
Chain ID: 11155111
...
"#]]);
}

#[test]
fn edit_without_wallet() {
    let dir = TempDir::new().unwrap();
    atlas(&dir)
        .args(["edit", "txt", "vitalik.eth", "com.twitter", "atlas"])
        .assert()
        .success()
        .stdout_eq(str![""])
        .stderr_eq(str![[r#"
Error: Wallet not configured. Please set ATLAS_PRIVATE_KEY environment variable.

"#]]);
}

#[test]
fn invalid_name_is_not_found() {
    let dir = TempDir::new().unwrap();
    atlas(&dir)
        .args(["resolve", "a..eth", "--txt", "url"])
        .assert()
        .success()
        .stdout_eq(str![[r#"
404: Name not found

"#]])
        .stderr_eq(str![[r#"
Failed to resolve: a..eth

"#]]);
}

#[test]
fn malformed_address_is_not_found() {
    let dir = TempDir::new().unwrap();
    atlas(&dir).args(["resolve", "0xdeadbeef"]).assert().success().stdout_eq(str![[r#"
404: Name not found

"#]]);
}

#[test]
fn resolver_override_is_not_printed_for_unknown_names() {
    let dir = TempDir::new().unwrap();
    atlas(&dir)
        .args(["resolve", "a..eth", "-r", "not-an-address"])
        .assert()
        .success()
        .stdout_eq(str![[r#"
404: Name not found

"#]])
        .stderr_eq(str![[r#"
Failed to resolve: a..eth

"#]]);
}

#[test]
fn invalid_write_resolver() {
    let dir = TempDir::new().unwrap();
    atlas(&dir)
        .args(["edit", "txt", "vitalik.eth", "url", "x", "-r", "not-an-address"])
        .assert()
        .code(2);
}

#[test]
fn invalid_abi_encoding() {
    let dir = TempDir::new().unwrap();
    atlas(&dir).args(["edit", "abi", "vitalik.eth", "null", "--encode", "yaml"]).assert().failure();
}

#[test]
fn unsupported_chain() {
    let dir = TempDir::new().unwrap();
    atlas(&dir)
        .args(["resolve", "vitalik.eth"])
        .env("ATLAS_CHAIN_ID", "10")
        .assert()
        .code(1)
        .stderr_eq(str![[r#"
Error: unsupported `chain_id` 10

Context:
- no ENS deployment known for chain 10

"#]]);
}
