//! `locamail` - Locaweb mail demo backend
//!
//! Loads settings, initializes logging and opens the local email store once,
//! then hands that store to the inbox.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod settings;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use locamail_core::{EmailStore, Inbox, NewEmail};

/// Emails stored on first start so the inbox is not empty.
const SAMPLE_MAIL: &[(&str, &str, &str)] = &[
    (
        "boasvindas@locaweb.com.br",
        "Bem-vindo ao Locaweb Mail",
        "Sua caixa de entrada está pronta. Use a busca para encontrar emails por remetente ou assunto.",
    ),
    (
        "agenda@locaweb.com.br",
        "Reunião de alinhamento",
        "A reunião de alinhamento foi marcada para amanhã às 10h.",
    ),
    (
        "suporte@locaweb.com.br",
        "Dicas de segurança",
        "Nunca compartilhe sua senha. A equipe de suporte jamais irá solicitá-la.",
    ),
];

/// Maximum body characters shown per inbox line.
const SNIPPET_CHARS: usize = 48;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings_path = settings::settings_path();
    let first_run = !settings_path.exists();
    let app_settings = settings::load_settings(&settings_path).await?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| app_settings.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting locamail");

    if first_run && let Err(e) = settings::save_settings(&settings_path, &app_settings).await {
        warn!("Could not write default settings: {e:#}");
    }

    let database_path = app_settings.database_path();
    let store = EmailStore::new(&database_path)
        .await
        .with_context(|| format!("open email store at {}", database_path.display()))?;
    info!("Email store ready at {}", database_path.display());

    if app_settings.seed_sample_mail {
        seed_sample_mail(&store).await?;
    }

    show_inbox(Inbox::new(store)).await
}

/// Store the sample emails if the store is empty.
async fn seed_sample_mail(store: &EmailStore) -> anyhow::Result<()> {
    if store.count().await? > 0 {
        return Ok(());
    }

    for (sender, subject, content) in SAMPLE_MAIL {
        store
            .insert(&NewEmail::new(*sender, *subject, *content))
            .await
            .context("store sample email")?;
    }

    info!("Stored {} sample emails", SAMPLE_MAIL.len());
    Ok(())
}

/// Log the inbox contents, one line per email.
async fn show_inbox(mut inbox: Inbox) -> anyhow::Result<()> {
    inbox.load().await.context("load inbox")?;

    if inbox.is_empty() {
        info!("Inbox is empty");
        return Ok(());
    }

    info!("Inbox has {} email(s)", inbox.len());
    for email in inbox.emails() {
        info!(
            "#{} {} - {} | {}",
            email.id,
            email.sender,
            email.subject,
            email.snippet(SNIPPET_CHARS)
        );
    }

    Ok(())
}
