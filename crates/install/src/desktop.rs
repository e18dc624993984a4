//! Desktop integration
//!
//! Three independent steps run after the binary is validated. None of them
//! can fail the install; each failure becomes an [`IntegrationWarning`].
//!
//! | step | source | policy |
//! |---|---|---|
//! | launcher | `dist/linux/app.desktop.in` | rendered, always overwritten |
//! | service menu | `dist/linux/ghostty_dolphin.desktop` | copied, always overwritten |
//! | default config | built in | created only if absent |

use ghostup_config::constants::{
    APP_DISPLAY_NAME, APP_ID, DEFAULT_APP_CONFIG, LAUNCHER_TEMPLATE, SERVICE_MENU_SOURCE,
};
use ghostup_config::InstallLayout;
use ghostup_events::{AppEvent, EventEmitter, EventSender, IntegrationEvent};
use ghostup_platform::fs;
use ghostup_types::{IntegrationStep, IntegrationWarning};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Writes launcher, service menu and default config for an installed binary
#[derive(Debug, Clone)]
pub struct DesktopIntegrator {
    launcher_path: PathBuf,
    service_menu_path: PathBuf,
    app_config_path: PathBuf,
}

impl DesktopIntegrator {
    #[must_use]
    pub fn new(layout: &InstallLayout) -> Self {
        Self {
            launcher_path: layout.launcher_path(),
            service_menu_path: layout.service_menu_path(),
            app_config_path: layout.app_config_path.clone(),
        }
    }

    /// Substitute the launcher placeholders in `template`
    #[must_use]
    pub fn render_launcher(template: &str, binary_path: &Path) -> String {
        template
            .replace("@GHOSTTY@", &binary_path.display().to_string())
            .replace("@NAME@", APP_DISPLAY_NAME)
            .replace("@APPID@", APP_ID)
    }

    /// Run every step against the staged tree and report what went wrong
    pub async fn integrate(
        &self,
        staged_dir: &Path,
        binary_path: &Path,
        tx: &EventSender,
    ) -> Vec<IntegrationWarning> {
        let mut warnings = Vec::new();

        match self.write_launcher(staged_dir, binary_path).await {
            Ok(()) => tx.emit(AppEvent::Integration(IntegrationEvent::LauncherWritten {
                path: self.launcher_path.clone(),
            })),
            Err(message) => warnings.push(warn(tx, IntegrationStep::Launcher, message)),
        }

        match self.install_service_menu(staged_dir).await {
            Ok(()) => tx.emit(AppEvent::Integration(
                IntegrationEvent::ServiceMenuInstalled {
                    path: self.service_menu_path.clone(),
                },
            )),
            Err(message) => warnings.push(warn(tx, IntegrationStep::ServiceMenu, message)),
        }

        match self.ensure_default_config().await {
            Ok(true) => tx.emit(AppEvent::Integration(IntegrationEvent::ConfigCreated {
                path: self.app_config_path.clone(),
            })),
            Ok(false) => tx.emit(AppEvent::Integration(IntegrationEvent::ConfigPreserved {
                path: self.app_config_path.clone(),
            })),
            Err(message) => warnings.push(warn(tx, IntegrationStep::DefaultConfig, message)),
        }

        warnings
    }

    async fn write_launcher(&self, staged_dir: &Path, binary_path: &Path) -> Result<(), String> {
        let template_path = staged_dir.join(LAUNCHER_TEMPLATE);
        let template = tokio::fs::read_to_string(&template_path)
            .await
            .map_err(|e| format!("cannot read {}: {e}", template_path.display()))?;

        let rendered = Self::render_launcher(&template, binary_path);
        fs::write_atomic(&self.launcher_path, rendered.as_bytes())
            .await
            .map_err(|e| e.to_string())
    }

    async fn install_service_menu(&self, staged_dir: &Path) -> Result<(), String> {
        let source = staged_dir.join(SERVICE_MENU_SOURCE);
        let contents = tokio::fs::read(&source)
            .await
            .map_err(|e| format!("cannot read {}: {e}", source.display()))?;

        fs::write_atomic(&self.service_menu_path, &contents)
            .await
            .map_err(|e| e.to_string())
    }

    /// `Ok(true)` when the file was created, `Ok(false)` when one already existed
    async fn ensure_default_config(&self) -> Result<bool, String> {
        let path = &self.app_config_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| e.to_string())?;
        }

        // create_new keeps an existing file byte-for-byte intact
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(format!("cannot create {}: {e}", path.display())),
        };

        file.write_all(DEFAULT_APP_CONFIG.as_bytes())
            .await
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        file.flush()
            .await
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        Ok(true)
    }
}

fn warn(tx: &EventSender, step: IntegrationStep, message: String) -> IntegrationWarning {
    let warning = IntegrationWarning { step, message };
    tx.emit_integration_warning(warning.clone());
    warning
}
