use anyhow::{Context as AnyhowContext, Result, bail};
use cheetah_core::config::SettingsError;
use cheetah_core::{SessionManager, Settings, SheetRegistry};
use std::path::PathBuf;
use tracing::info;

use crate::output;
use crate::stdin::Prompt;

/// Label shown at the prompt when no sheet is selected
const NO_SHEET_LABEL: &str = "cheetah";

/// Application context that gets passed to command handlers
///
/// Owns the session manager for the whole run; handlers borrow it for
/// one operation at a time.
pub struct Context {
    pub session: SessionManager,
}

impl Context {
    /// Resolve the vault and set up the session manager
    ///
    /// Vault precedence: `--vault` / CHEETAH_VAULT, then the settings file.
    /// A missing settings file starts the first-run setup on `prompt`.
    pub fn new(
        vault: Option<PathBuf>,
        settings_path: Option<PathBuf>,
        prompt: &mut Prompt,
    ) -> Result<Self> {
        let vault_path = match vault {
            Some(path) => path,
            None => {
                let settings_path = match settings_path {
                    Some(path) => path,
                    None => Settings::default_path()?,
                };
                load_or_bootstrap(settings_path, prompt)?.vault_path
            }
        };

        let registry = SheetRegistry::open(vault_path.clone())
            .with_context(|| format!("Invalid vault path: {}", vault_path.display()))?;
        info!(vault = %vault_path.display(), "using vault");

        Ok(Self {
            session: SessionManager::new(registry),
        })
    }

    /// Active sheet name, or the program name when none is selected
    pub fn prompt_label(&self) -> String {
        self.session
            .is_active()
            .map(ToString::to_string)
            .unwrap_or_else(|| NO_SHEET_LABEL.to_string())
    }
}

fn load_or_bootstrap(settings_path: PathBuf, prompt: &mut Prompt) -> Result<Settings> {
    match Settings::load(&settings_path) {
        Ok(settings) => Ok(settings),
        Err(SettingsError::FileNotFound(_)) => {
            output::plain(format!(
                "\nNo settings file found in '{}'. You will proceed with the setup.",
                settings_path.display()
            ));
            let Some(answer) = prompt.read_path("\nWhere is your vault located?")? else {
                bail!("Setup cancelled");
            };

            let vault = PathBuf::from(cheetah_core::config::expand_env(&answer));
            let settings = Settings::bootstrap(&settings_path, &vault)?;
            output::success(format!("Vault set to {}", settings.vault_path.display()));
            Ok(settings)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn prompt(script: &str) -> Prompt {
        Prompt::scripted(Cursor::new(script.as_bytes().to_vec()), false)
    }

    #[test]
    fn test_explicit_vault_wins() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::new(Some(temp.path().to_path_buf()), None, &mut prompt("")).unwrap();
        assert_eq!(ctx.session.registry().vault_path(), temp.path());
        assert_eq!(ctx.prompt_label(), "cheetah");
    }

    #[test]
    fn test_missing_vault_is_fatal() {
        let temp = TempDir::new().unwrap();
        let result = Context::new(Some(temp.path().join("nope")), None, &mut prompt(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_first_run_writes_settings() {
        let temp = TempDir::new().unwrap();
        let settings = temp.path().join("cfg").join("settings");
        let vault = temp.path().join("vault");

        let script = format!("{}\n", vault.display());
        let ctx = Context::new(None, Some(settings.clone()), &mut prompt(&script)).unwrap();

        assert!(vault.is_dir());
        assert!(std::fs::read_to_string(&settings).unwrap().starts_with("VAULT "));
        assert_eq!(ctx.session.registry().vault_path(), vault);
    }

    #[test]
    fn test_malformed_settings_is_fatal() {
        let temp = TempDir::new().unwrap();
        let settings = temp.path().join("settings");
        std::fs::write(&settings, "VAULT_WITHOUT_VALUE\n").unwrap();

        let err = Context::new(None, Some(settings), &mut prompt("")).err().unwrap();
        assert!(err.to_string().contains("Malformed"));
    }
}
