//! SMTP invitation mailer.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{PoolConfig, authentication::Credentials, client::Tls},
};
use tracing::info;

use cuaderno_core::config::MailConfig;
use cuaderno_core::error::{AppError, ErrorKind};
use cuaderno_core::result::AppResult;
use cuaderno_core::traits::email::{InvitationEmail, Mailer};

/// Mailer that delivers invitations over an SMTP relay.
pub struct SmtpMailer {
    config: MailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("smtp_host", &self.config.smtp_host)
            .field("smtp_port", &self.config.smtp_port)
            .finish()
    }
}

impl SmtpMailer {
    /// Build a mailer from the mail configuration.
    ///
    /// Port 465 selects implicit TLS; anything else uses STARTTLS.
    pub fn new(config: MailConfig) -> AppResult<Self> {
        if config.smtp_host.is_empty() {
            return Err(AppError::configuration("SMTP host is not configured"));
        }

        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| smtp_error("Failed to configure SMTP relay", e))?
                .port(config.smtp_port)
                .tls(Tls::Wrapper(
                    lettre::transport::smtp::client::TlsParameters::new(config.smtp_host.clone())
                        .map_err(|e| smtp_error("Failed to configure TLS", e))?,
                ))
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| smtp_error("Failed to configure SMTP relay", e))?
                .port(config.smtp_port)
        };

        let transport = builder
            .credentials(credentials)
            .pool_config(PoolConfig::new().max_size(5))
            .build();

        info!(host = %config.smtp_host, port = config.smtp_port, "SMTP mailer configured");
        Ok(Self { config, transport })
    }

    fn build_body(email: &InvitationEmail) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Invitación a {title}</title>
</head>
<body style="font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #4E443A; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1 style="color: #D97746;">Cuaderno</h1>
    <div style="background-color: #FAF8F1; border-radius: 8px; padding: 30px;">
        <h2 style="margin-top: 0;">{inviter} te ha invitado a "{title}"</h2>
        <p>Te han invitado como <strong>{role}</strong>. La invitación vence el {expires}.</p>
        <div style="text-align: center; margin: 30px 0;">
            <a href="{link}" style="display: inline-block; background-color: #D97746; color: white; text-decoration: none; padding: 14px 28px; border-radius: 6px;">
                Abrir el diario
            </a>
        </div>
        <p style="color: #9A9B73; font-size: 14px;">
            Si el botón no funciona, copia este enlace en tu navegador:<br>
            <a href="{link}" style="color: #D97746; word-break: break-all;">{link}</a>
        </p>
    </div>
    <p style="color: #9A9B73; font-size: 12px; text-align: center;">
        Si no esperabas esta invitación, puedes ignorar este correo.
    </p>
</body>
</html>"#,
            title = email.diary_title,
            inviter = email.inviter_name,
            role = email.role_label,
            expires = email.expires_on.format("%d/%m/%Y"),
            link = email.invitation_link,
        )
    }
}

fn smtp_error(message: &str, err: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::with_source(ErrorKind::Transient, message.to_string(), err)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_invitation(&self, email: &InvitationEmail) -> AppResult<()> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);
        let subject = format!("Invitación a \"{}\"", email.diary_title);

        let message = Message::builder()
            .from(from.parse().map_err(|e| {
                AppError::validation(format!("Invalid From address '{from}': {e}"))
            })?)
            .to(email.to_email.parse().map_err(|e| {
                AppError::validation(format!(
                    "Invalid recipient address '{}': {e}",
                    email.to_email
                ))
            })?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(Self::build_body(email))
            .map_err(|e| smtp_error("Failed to build invitation email", e))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| smtp_error("Failed to send invitation email", e))?;

        info!(to = %email.to_email, "Invitation email sent");
        Ok(())
    }
}
