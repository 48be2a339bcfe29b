#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;

pub fn command() -> Command {
    Command::cargo_bin("unused-images").expect("binary exists")
}

pub const IMAGES: &str = "\
REPOSITORY   TAG       IMAGE ID       CREATED        SIZE
app          latest    aaa111aaa111   2 days ago     150MB
base         bookworm  bbb222bbb222   3 weeks ago    74.8MB
orphan       1.0       ddd444ddd444   2 months ago   12MB
";

pub const CONTAINERS: &str = "\
CONTAINER ID   IMAGE          COMMAND                  CREATED       STATUS                     PORTS     NAMES
c1c1c1c1c1c1   app            \"/entrypoint.sh\"         2 days ago    Up 2 days                  80/tcp    web
c2c2c2c2c2c2   ghost:latest   \"sh\"                     5 weeks ago   Exited (0) 5 weeks ago               stale
";

pub const APP_HISTORY: &str = "\
IMAGE          CREATED       CREATED BY                                      SIZE      COMMENT
aaa111aaa111   2 days ago    /bin/sh -c #(nop)  CMD [\"/entrypoint.sh\"]     0B
<missing>      2 days ago    /bin/sh -c apt-get install -y curl              75MB
bbb222bbb222   3 weeks ago   /bin/sh -c #(nop)  CMD [\"bash\"]               0B
<missing>      3 weeks ago   /bin/sh -c #(nop) ADD file:0a1b2c in /          74.8MB
";

/// A stand-in for the docker CLI that replays canned listings from files.
pub struct FakeRuntime {
    pub temp: TempDir,
}

impl FakeRuntime {
    pub fn new(images: &str, containers: &str, histories: &[(&str, &str)]) -> Self {
        let temp = TempDir::new().unwrap();
        let dir = temp.child("runtime");
        dir.create_dir_all().unwrap();
        dir.child("images.txt").write_str(images).unwrap();
        dir.child("ps.txt").write_str(containers).unwrap();
        for (id, history) in histories {
            dir.child(format!("history-{id}.txt")).write_str(history).unwrap();
        }

        let script = dir.child("docker");
        script
            .write_str(
                r#"#!/bin/sh
here=$(dirname "$0")
case "$1" in
  images) cat "$here/images.txt" ;;
  ps) cat "$here/ps.txt" ;;
  history)
    if [ -f "$here/history-$2.txt" ]; then
      cat "$here/history-$2.txt"
    else
      echo "Error: No such image: $2" >&2
      exit 1
    fi
    ;;
  *) exit 2 ;;
esac
"#,
            )
            .unwrap();
        make_executable(script.path());

        FakeRuntime { temp }
    }

    /// A runtime whose every invocation runs `body` instead.
    pub fn scripted(body: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let dir = temp.child("runtime");
        dir.create_dir_all().unwrap();
        let script = dir.child("docker");
        script.write_str(&format!("#!/bin/sh\n{body}\n")).unwrap();
        make_executable(script.path());
        FakeRuntime { temp }
    }

    pub fn binary(&self) -> String {
        self.temp.child("runtime/docker").path().display().to_string()
    }

    pub fn config_home(&self) -> std::path::PathBuf {
        self.temp.child("config").path().to_path_buf()
    }

    pub fn command(&self) -> Command {
        let mut cmd = command();
        cmd.env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.config_home())
            .env_remove("RUST_LOG");
        cmd
    }
}

fn make_executable(path: &std::path::Path) {
    let mut permissions = std::fs::metadata(path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions).unwrap();
}
