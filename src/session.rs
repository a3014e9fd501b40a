//! @ai:module:intent Ordered command sequence sharing one shell environment
//! @ai:module:layer infrastructure
//! @ai:module:public_api CommandSession, SessionError
//! @ai:module:stateless false

use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::process::Command;

/// @ai:intent Failure of a command session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to spawn session shell: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    #[error("session command failed with exit code {code}")]
    CommandFailed { code: i32 },

    #[error("session terminated by signal")]
    Terminated,
}

/// @ai:intent Accumulates external commands and runs them in order inside one
///            shell invocation, so an environment-initialization command
///            (e.g. a toolchain setup script) affects the commands after it.
///            Policy: commands are chained with the shell's and-operator, so
///            execution aborts at the first non-zero exit and that exit code
///            is the one propagated.
#[derive(Debug, Default)]
pub struct CommandSession {
    commands: Vec<Vec<String>>,
    env: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
}

impl CommandSession {
    /// @ai:intent Create an empty session
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Append one command (argument token list). No execution and
    ///            no validation of the tokens
    /// @ai:effects pure
    pub fn add_command<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(args.into_iter().map(Into::into).collect());
    }

    /// @ai:intent Set an environment variable for every command in this
    ///            session. Scoped to the session instance; never leaks to the
    ///            harness process or to sibling sessions
    /// @ai:effects pure
    pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env.insert(key.into(), value.into());
    }

    /// @ai:intent Set the working directory for the session
    /// @ai:effects pure
    pub fn current_dir(&mut self, dir: impl Into<PathBuf>) {
        self.cwd = Some(dir.into());
    }

    /// @ai:intent Number of accumulated commands
    /// @ai:effects pure
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// @ai:intent True when no commands have been added
    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// @ai:intent Render the accumulated commands as a single shell script
    /// @ai:effects pure
    fn script(&self) -> String {
        self.commands
            .iter()
            .map(|command| {
                command
                    .iter()
                    .map(|token| shell_quote(token))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(" && ")
    }

    /// @ai:intent Execute the accumulated commands in the order added, within
    ///            one persistent shell environment. An empty session is a
    ///            successful no-op
    /// @ai:post on Ok, every command exited with status zero
    /// @ai:effects io
    pub async fn run(&self) -> Result<(), SessionError> {
        if self.commands.is_empty() {
            return Ok(());
        }

        let script = self.script();
        tracing::debug!("session: {}", script);

        let mut command = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&script);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&script);
            c
        };

        command.envs(&self.env);

        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .await
            .map_err(|source| SessionError::Spawn { source })?;

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(SessionError::CommandFailed { code }),
            None => Err(SessionError::Terminated),
        }
    }
}

/// @ai:intent Quote one token for the platform shell
/// @ai:effects pure
fn shell_quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:+,@".contains(c));

    if plain {
        token.to_string()
    } else if cfg!(windows) {
        format!("\"{}\"", token)
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_session_is_noop() {
        let session = CommandSession::new();
        assert!(session.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_commands_run_in_order() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("log");

        let first = format!("echo first >> {}", log.display());
        let second = format!("echo second >> {}", log.display());

        let mut session = CommandSession::new();
        session.add_command(["sh", "-c", first.as_str()]);
        session.add_command(["sh", "-c", second.as_str()]);
        session.run().await.unwrap();

        let content = std::fs::read_to_string(&log).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[tokio::test]
    async fn test_aborts_on_first_failure_and_propagates_code() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("marker");

        let marker_path = marker.display().to_string();

        let mut session = CommandSession::new();
        session.add_command(["sh", "-c", "exit 3"]);
        session.add_command(["touch", marker_path.as_str()]);

        let err = session.run().await.unwrap_err();
        assert!(matches!(err, SessionError::CommandFailed { code: 3 }));
        assert!(!marker.exists(), "command after the failure must not run");
    }

    #[tokio::test]
    async fn test_init_command_affects_later_commands() {
        // The init/compile pattern: a variable exported by the first command
        // is visible to the second because both share one shell.
        let mut session = CommandSession::new();
        session.add_command(["export", "LANGBENCH_TEST_VAR=ready"]);
        session.add_command(["sh", "-c", "test \"$LANGBENCH_TEST_VAR\" = ready"]);

        session.run().await.unwrap();
    }

    #[tokio::test]
    async fn test_session_env_applies_to_commands() {
        let mut session = CommandSession::new();
        session.env("LANGBENCH_OVERLAY", "42");
        session.add_command(["sh", "-c", "test \"$LANGBENCH_OVERLAY\" = 42"]);

        session.run().await.unwrap();
        // The overlay is scoped to the session, not the harness process.
        assert!(std::env::var("LANGBENCH_OVERLAY").is_err());
    }

    #[test]
    fn test_shell_quote_passes_plain_tokens_through() {
        assert_eq!(shell_quote("g++"), "g++");
        assert_eq!(shell_quote("-std=c++11"), "-std=c++11");
        assert_eq!(shell_quote("build/out.o"), "build/out.o");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_quote_wraps_tokens_with_spaces() {
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
