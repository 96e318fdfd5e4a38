//! Detecting whether output goes to a person or a pipe

use std::io::IsTerminal;

/// Environment variables set by common CI providers
const CI_VARS: [&str; 9] = [
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
];

/// Decides between cliclack widgets and plain lines
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,

    /// Confirmations resolve to yes without asking (`--yes`)
    auto_yes: bool,
}

impl UiContext {
    /// Inspect the terminal and environment
    pub fn detect() -> Self {
        Self {
            interactive: Self::attached_to_terminal(),
            auto_yes: false,
        }
    }

    /// Plain output regardless of environment
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Spinners, boxes and colours
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }

    fn attached_to_terminal() -> bool {
        std::io::stdout().is_terminal()
            && std::io::stdin().is_terminal()
            && !CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
    }
}
