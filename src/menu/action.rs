use std::fmt;
use std::str::FromStr;

/// Actions reachable from the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    OpenPackage,
    SaveCurrentWord,
    CompileProgram,
    LoadProgram,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::OpenPackage,
        MenuAction::SaveCurrentWord,
        MenuAction::CompileProgram,
        MenuAction::LoadProgram,
    ];

    /// Name used in link fragments, e.g. `#open-package`
    pub fn name(&self) -> &'static str {
        match self {
            MenuAction::OpenPackage => "open-package",
            MenuAction::SaveCurrentWord => "save-current-word",
            MenuAction::CompileProgram => "compile-program",
            MenuAction::LoadProgram => "load-program",
        }
    }

    /// `href` that routes to this action
    pub fn href(&self) -> String {
        format!("#{}", self.name())
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown menu action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for MenuAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuAction::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
