use crate::error::AppError;
use crate::shell::CommandRunner;

/// The three listing commands of a docker-compatible CLI.
pub struct DockerCli<R> {
    binary: String,
    runner: R,
}

impl<R: CommandRunner> DockerCli<R> {
    pub fn new(binary: impl Into<String>, runner: R) -> Self {
        Self { binary: binary.into(), runner }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn images(&self) -> Result<String, AppError> {
        self.runner.run(&format!("{} images", self.binary))
    }

    pub fn containers(&self) -> Result<String, AppError> {
        self.runner.run(&format!("{} ps -a", self.binary))
    }

    /// Callers must pass an ID accepted by [`is_shell_safe_id`]; it is interpolated as-is.
    pub fn history(&self, image_id: &str) -> Result<String, AppError> {
        self.runner.run(&format!("{} history {}", self.binary, image_id))
    }
}

/// True when `id` can be placed on a shell command line without quoting.
pub fn is_shell_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<String>>,
    }

    impl CommandRunner for Recorder {
        fn run(&self, command: &str) -> Result<String, AppError> {
            self.seen.borrow_mut().push(command.to_string());
            Ok(String::new())
        }
    }

    #[test]
    fn builds_command_lines_from_binary() {
        let recorder = Recorder::default();
        let cli = DockerCli::new("sudo podman", &recorder);
        cli.images().unwrap();
        cli.containers().unwrap();
        cli.history("sha256:abc").unwrap();
        assert_eq!(
            *recorder.seen.borrow(),
            vec!["sudo podman images", "sudo podman ps -a", "sudo podman history sha256:abc"]
        );
    }

    #[test]
    fn shell_safe_ids() {
        assert!(is_shell_safe_id("605c77e624dd"));
        assert!(is_shell_safe_id("sha256:605c77e624dd"));
        assert!(!is_shell_safe_id(""));
        assert!(!is_shell_safe_id("abc; rm -rf /"));
        assert!(!is_shell_safe_id("$(id)"));
    }
}
