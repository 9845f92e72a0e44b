#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ESM_ENTRY: &str = "deb https://esm.ubuntu.com/ubuntu precise main\n\
                             # deb-src https://esm.ubuntu.com/ubuntu precise main\n";
pub const ESM_AUTH: &str = "machine esm.ubuntu.com/ubuntu/ login user password pass\n";
pub const OTHER_AUTH: &str = "machine example.com login user password pass\n";

/// Records apt-get arguments and environment next to the fake binaries.
pub const APT_GET_LOG_WRAPPER: &str = "echo \"$@\" >> \"$(dirname \"$0\")/../apt_get.args\"\n\
                                       env >> \"$(dirname \"$0\")/../apt_get.env\"";

/// Isolated filesystem tree with fake APT tools, mirroring what the tool
/// expects to find on a precise host.
pub struct TestEnv {
    tmp: TempDir,
    pub series: String,
    pub bin_dir: PathBuf,
    pub keyrings_dir: PathBuf,
    pub trusted_gpg_dir: PathBuf,
    pub repo_list: PathBuf,
    pub auth_file: PathBuf,
    pub apt_helper: PathBuf,
    pub apt_method_https: PathBuf,
    pub ca_certificates: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path();
        let bin_dir = root.join("bin");
        let keyrings_dir = root.join("keyrings");
        let trusted_gpg_dir = root.join("trusted.gpg.d");
        fs::create_dir_all(&bin_dir).expect("create bin dir");
        fs::create_dir_all(&keyrings_dir).expect("create keyrings dir");
        fs::create_dir_all(&trusted_gpg_dir).expect("create trusted.gpg.d");
        fs::write(keyrings_dir.join("ubuntu-esm-keyring.gpg"), "GPG key").expect("write keyring");

        let env = Self {
            series: "precise".to_string(),
            repo_list: root.join("esm-repo.list"),
            auth_file: root.join("auth.conf"),
            apt_helper: bin_dir.join("apt-helper"),
            apt_method_https: bin_dir.join("apt-method-https"),
            ca_certificates: bin_dir.join("update-ca-certificates"),
            bin_dir,
            keyrings_dir,
            trusted_gpg_dir,
            tmp,
        };

        for binary in ["apt-get", "apt-helper", "apt-method-https", "update-ca-certificates"] {
            env.fake_binary(binary, "true");
        }
        env.fake_binary("id", "echo 0");
        env
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Write an executable shell script standing in for `binary`.
    pub fn fake_binary(&self, binary: &str, command: &str) {
        let path = self.bin_dir.join(binary);
        fs::write(&path, format!("#!/bin/sh\n{}\n", command)).expect("write fake binary");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake binary");
    }

    pub fn keyring_file(&self) -> PathBuf {
        self.trusted_gpg_dir.join("ubuntu-esm-keyring.gpg")
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root().join(name)).expect("read file")
    }

    pub fn mode(path: &Path) -> u32 {
        fs::metadata(path).expect("stat").permissions().mode() & 0o7777
    }

    pub fn cmd(&self) -> Command {
        let path = match std::env::var_os("PATH") {
            Some(orig) => {
                let mut dirs = vec![self.bin_dir.clone()];
                dirs.extend(std::env::split_paths(&orig));
                std::env::join_paths(dirs).expect("join PATH")
            }
            None => self.bin_dir.clone().into_os_string(),
        };

        let mut cmd = cargo_bin_cmd!("ubuntu-esm");
        cmd.env_clear()
            .env("PATH", path)
            .env("SERIES", &self.series)
            .env("ESM_REPO_LIST", &self.repo_list)
            .env("APT_AUTH_FILE", &self.auth_file)
            .env("KEYRINGS_DIR", &self.keyrings_dir)
            .env("APT_KEYS_DIR", &self.trusted_gpg_dir)
            .env("APT_HELPER", &self.apt_helper)
            .env("APT_METHOD_HTTPS", &self.apt_method_https)
            .env("CA_CERTIFICATES", &self.ca_certificates);
        cmd
    }

    /// Leave the tree as a successful `enable-esm user:pass` would.
    pub fn enable(&self) {
        self.cmd().args(["enable-esm", "user:pass"]).assert().success();
    }
}
