use std::future::Future;
use std::sync::Arc;

use braillevoice_api::preview::{Preview, render_preview};
use braillevoice_core::history::HistoryEntry;
use braillevoice_core::settings::Settings;
use braillevoice_core::types::{Page, UserAccount};
use braillevoice_core::upload::{SelectedFile, UploadError};
use braillevoice_engine::traits::BrailleConverter;
use braillevoice_engine::workflow::{
    ConversionReport, ConversionWorkflow, WorkflowError, WorkflowStage,
};
use braillevoice_runtime::history_store::{HistoryExport, HistoryStore};
use braillevoice_runtime::kv::KvStore;
use braillevoice_runtime::router::{Navigation, ViewRouter};
use braillevoice_runtime::session::{AuthError, AuthGateway, SessionManager};
use braillevoice_runtime::settings_store::SettingsStore;

pub const TRANSCRIPT_FILE_NAME: &str = "bangla-braille-text.txt";
pub const AUDIO_FILE_NAME: &str = "bangla-speech.wav";

/// One façade over the session, router, workflow, and stores. A UI shell
/// translates its events into these operations and renders the returned
/// state; nothing here depends on a presentation layer.
pub struct AppService {
    session: tokio::sync::Mutex<SessionManager>,
    workflow: tokio::sync::Mutex<ConversionWorkflow>,
    router: tokio::sync::Mutex<ViewRouter>,
    settings: SettingsStore,
    history: HistoryStore,
    converter: Arc<dyn BrailleConverter>,
}

impl AppService {
    pub fn new(
        store: Arc<dyn KvStore>,
        gateway: Arc<dyn AuthGateway>,
        converter: Arc<dyn BrailleConverter>,
        startup_fragment: Option<&str>,
    ) -> Self {
        let history = HistoryStore::new(store.clone());
        Self {
            session: tokio::sync::Mutex::new(SessionManager::new(store.clone(), gateway)),
            workflow: tokio::sync::Mutex::new(ConversionWorkflow::new()),
            router: tokio::sync::Mutex::new(ViewRouter::new(startup_fragment, history.clone())),
            settings: SettingsStore::new(store),
            history,
            converter,
        }
    }

    // --- session ---

    /// Single-flight: a login attempted while another auth call is pending
    /// is refused instead of overlapping it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let mut session = self.session.try_lock().map_err(|_| AuthError::InFlight)?;
        session.login(username, password).await
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        let mut session = self.session.try_lock().map_err(|_| AuthError::InFlight)?;
        session
            .register(username, email, password, confirm_password)
            .await
    }

    pub async fn logout(&self) -> anyhow::Result<()> {
        self.session.lock().await.logout().await
    }

    /// Startup revalidation of a restored session.
    pub async fn validate_session(&self) -> bool {
        self.session.lock().await.validate_token().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_authenticated()
    }

    pub async fn current_user(&self) -> Option<UserAccount> {
        self.session.lock().await.current_user().cloned()
    }

    pub async fn auth_headers(&self) -> Vec<(String, String)> {
        self.session.lock().await.auth_headers()
    }

    // --- conversion workflow ---

    pub async fn select_file(&self, file: SelectedFile) -> Result<(), UploadError> {
        self.workflow.lock().await.select_file(file)
    }

    /// The inline preview for the currently selected file. Computed on
    /// demand so it never gates the selection itself.
    pub async fn preview(&self) -> Option<Preview> {
        self.workflow.lock().await.selected_file().map(render_preview)
    }

    pub async fn workflow_stage(&self) -> WorkflowStage {
        self.workflow.lock().await.stage()
    }

    pub async fn reset_converter(&self) {
        self.workflow.lock().await.reset();
    }

    pub async fn convert(&self) -> anyhow::Result<ConversionReport> {
        self.convert_with_progress(|_stage, _pct| async {}).await
    }

    /// Runs one conversion; a second submission while one is in flight is
    /// refused. A completed conversion is recorded in the history.
    pub async fn convert_with_progress<F, Fut>(
        &self,
        on_progress: F,
    ) -> anyhow::Result<ConversionReport>
    where
        F: Fn(&'static str, u8) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut workflow = self
            .workflow
            .try_lock()
            .map_err(|_| WorkflowError::InFlight)?;

        let report = workflow
            .run_with_hook(self.converter.as_ref(), on_progress)
            .await?;

        if let Some(outcome) = report.outcome.as_ref() {
            self.history.append(HistoryEntry {
                timestamp: chrono::Utc::now().to_rfc3339(),
                text: outcome.text.clone(),
                confidence: outcome.confidence,
                duration: outcome.duration.unwrap_or(0.0),
            })?;
        }

        Ok(report)
    }

    // --- router ---

    pub async fn navigate(&self, page: Page) -> anyhow::Result<Navigation> {
        self.router.lock().await.navigate_to_page(page)
    }

    pub async fn handle_fragment_change(&self, raw: &str) -> anyhow::Result<Option<Navigation>> {
        self.router.lock().await.handle_fragment_change(raw)
    }

    pub async fn current_page(&self) -> Page {
        self.router.lock().await.current_page()
    }

    pub async fn toggle_overlay(&self) {
        self.router.lock().await.toggle_overlay();
    }

    // --- settings & history ---

    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        self.settings.load()
    }

    pub fn save_setting(&self, key: &str, value: serde_json::Value) -> anyhow::Result<()> {
        self.settings.save_setting(key, value)
    }

    /// Destructive; the shell passes `confirmed` only after an explicit
    /// user confirmation. Returns whether anything was cleared.
    pub fn clear_history(&self, confirmed: bool) -> anyhow::Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.history.clear()?;
        log::info!("conversion history cleared");
        Ok(true)
    }

    /// `None` when there is no history to export; the shell shows a notice.
    pub fn export_history(&self) -> anyhow::Result<Option<HistoryExport>> {
        self.history.export()
    }
}

/// The plain-text transcript download, generated client-side.
pub fn transcript_artifact(text: &str) -> (String, Vec<u8>) {
    (TRANSCRIPT_FILE_NAME.to_string(), text.as_bytes().to_vec())
}

/// The speech download. The audio lives on the server, so the artifact is
/// a save-as name paired with the URL to fetch.
pub fn audio_artifact(audio_url: &str) -> (String, String) {
    (AUDIO_FILE_NAME.to_string(), audio_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_artifact_carries_the_text() {
        let (name, bytes) = transcript_artifact("আমার");
        assert_eq!(name, "bangla-braille-text.txt");
        assert_eq!(bytes, "আমার".as_bytes());
    }

    #[test]
    fn audio_artifact_pairs_the_name_with_the_url() {
        let (name, url) = audio_artifact("http://127.0.0.1:8000/static/audio/out.wav");
        assert_eq!(name, "bangla-speech.wav");
        assert_eq!(url, "http://127.0.0.1:8000/static/audio/out.wav");
    }
}
