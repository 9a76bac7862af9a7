use std::sync::Arc;

use async_trait::async_trait;
use braillevoice_appcore::AppService;
use braillevoice_core::stats::format_audio_duration;
use braillevoice_core::types::{ConversionOutcome, Page, UserAccount};
use braillevoice_core::upload::SelectedFile;
use braillevoice_engine::traits::{BrailleConverter, ConvertReply};
use braillevoice_runtime::kv::MemoryKvStore;
use braillevoice_runtime::router::PageLoad;
use braillevoice_runtime::session::{AuthGateway, AuthReply};

// Demo doubles so the walk-through runs without a backend. Point the
// runtime gateways (braillevoice_runtime::remote) at a real server instead.

struct DemoAuthGateway;

#[async_trait]
impl AuthGateway for DemoAuthGateway {
    async fn login(&self, username: &str, _password: &str) -> anyhow::Result<AuthReply> {
        Ok(AuthReply::Granted {
            token: "demo-token".into(),
            user: UserAccount {
                username: username.into(),
                email: format!("{username}@example.com"),
            },
        })
    }

    async fn register(&self, username: &str, email: &str, _password: &str)
    -> anyhow::Result<AuthReply> {
        Ok(AuthReply::Granted {
            token: "demo-token".into(),
            user: UserAccount { username: username.into(), email: email.into() },
        })
    }

    async fn logout(&self, _token: &str) -> anyhow::Result<()> {
        Ok(())
    }

    async fn check(&self, _token: &str) -> anyhow::Result<bool> {
        Ok(true)
    }
}

struct DemoConverter;

#[async_trait]
impl BrailleConverter for DemoConverter {
    async fn convert(&self, _file: &SelectedFile) -> anyhow::Result<ConvertReply> {
        Ok(ConvertReply::Recognized(ConversionOutcome {
            text: "আমার সোনার বাংলা".into(),
            confidence: 0.93,
            audio_url: Some("/static/audio/demo.wav".into()),
            duration: Some(4.2),
        }))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let store = Arc::new(MemoryKvStore::new());
    let app = AppService::new(store, Arc::new(DemoAuthGateway), Arc::new(DemoConverter), None);

    app.login("amina", "secret").await?;
    if let Some(user) = app.current_user().await {
        println!("signed in as {} <{}>", user.username, user.email);
    }

    app.select_file(SelectedFile {
        file_name: "braille-scan.png".into(),
        mime_type: "image/png".into(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    })
    .await
    .map_err(anyhow::Error::new)?;

    if let Some(preview) = app.preview().await {
        println!("preview ready: {}", preview.info_line);
    }

    let report = app
        .convert_with_progress(|stage, pct| {
            println!("  [{pct:>3}%] {stage}");
            async {}
        })
        .await?;

    if let Some(outcome) = report.outcome {
        println!("recognized: {}", outcome.text);
        println!("confidence: {:.0}%", outcome.confidence * 100.0);
        if let Some(duration) = outcome.duration {
            println!("audio: {}", format_audio_duration(duration));
        }
    } else if let Some(error) = report.error {
        println!("conversion failed: {error}");
    }

    let nav = app.navigate(Page::History).await?;
    println!("\n{}", nav.title);
    match nav.load {
        PageLoad::History(rows) if rows.is_empty() => {
            println!("No conversion history yet. Start by converting some Braille images!");
        }
        PageLoad::History(rows) => {
            for row in rows {
                println!(
                    "  Conversion #{}: {} ({}, {})",
                    row.ordinal, row.text, row.confidence_label, row.duration_label
                );
            }
        }
        _ => {}
    }

    let nav = app.navigate(Page::Converter).await?;
    if let PageLoad::ConverterSummary(summary) = nav.load {
        println!(
            "\ntotals: {} conversions, accuracy {}, avg time {}",
            summary.count, summary.avg_accuracy, summary.avg_time
        );
    }

    app.logout().await?;
    println!("signed out");
    Ok(())
}
