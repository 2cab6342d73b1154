use std::sync::Arc;

use dayroute::calendar::GoogleCalendar;
use dayroute::channels::email::{MailerConfig, SmtpMailer};
use dayroute::channels::sms::JustSendGateway;
use dayroute::config::DispatchConfig;
use dayroute::pipeline::DispatchPipeline;
use dayroute::server;
use dayroute::shortlink::TinyUrlShortener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = DispatchConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    eprintln!("Dayroute v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Depot: {}", config.depot_address);
    eprintln!("   Calendar: {}", config.calendar_id);
    eprintln!("   SMS recipients: {}", config.sms_recipients.join(", "));
    eprintln!("   Report mail: {}", config.email_receiver);
    eprintln!("   Trigger: http://0.0.0.0:{}/generate-route\n", config.http_port);

    let calendar = Arc::new(GoogleCalendar::new(
        config.calendar_id.clone(),
        config.google_token.clone(),
    ));
    let shortener = Arc::new(TinyUrlShortener::new());
    let sms = Arc::new(JustSendGateway::new(
        config.sms_app_key.clone(),
        config.sms_sender.clone(),
        config.sms_variant.clone(),
    ));
    let mailer = Arc::new(SmtpMailer::new(MailerConfig {
        smtp_host: config.smtp_host.clone(),
        smtp_port: config.smtp_port,
        username: config.email_login.clone(),
        password: config.email_password.clone(),
        from_address: config.email_from.clone(),
        receiver: config.email_receiver.clone(),
    }));

    let port = config.http_port;
    let pipeline = Arc::new(DispatchPipeline::new(
        config, calendar, shortener, sms, mailer,
    ));

    let app = server::routes(pipeline);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(port, "Dispatch service started");
    axum::serve(listener, app).await?;

    Ok(())
}
