use std::io::Write;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::{
    VERSION,
    certificate::{self, CertificateError, Identity},
    cli::{Cli, Command},
    error::AppError,
    notifications::{
        entities::{AlertPayload, PushResponse},
        gateway::{Environment, NotificationError, NotificationGateway, apns::ApnsNotificationGateway},
        service::NotificationService,
    },
    settings::{Configuration, Settings},
};

/// Runs whatever the command line asked for, writing the result to `out`.
pub async fn execute<W: Write>(cli: Cli, out: &mut W) -> Result<(), AppError> {
    if let Some(Command::Version) = cli.command {
        writeln!(out, "{VERSION}")?;
        return Ok(());
    }

    let settings = Settings::load(&cli.push)?;
    let configuration = Configuration::try_from(settings)?;

    dispatch(configuration, ApnsNotificationGateway::new, out).await?;
    Ok(())
}

/// Writes `err` for the user and returns the process exit code. Missing
/// configuration also gets the usage line.
pub fn report<W: Write>(err: &AppError, out: &mut W) -> u8 {
    // a failing stderr leaves nowhere to report to
    let _ = writeln!(out, "{err}");
    if let AppError::Configuration(_) = err {
        let _ = writeln!(out, "\n{}", Cli::command().render_usage());
    }

    err.exit_code()
}

/// Loads the certificate, connects through `connect` and sends a single
/// alert built from `configuration`.
#[instrument(skip_all, fields(topic = %configuration.topic, mode = %configuration.mode))]
pub async fn dispatch<C, G, W>(
    configuration: Configuration,
    connect: C,
    out: &mut W,
) -> Result<PushResponse, AppError>
where
    C: FnOnce(&Identity, Environment) -> Result<G, NotificationError>,
    G: NotificationGateway,
    W: Write,
{
    let identity = certificate::from_pem_file(&configuration.certificate_path)?;
    let environment = Environment::from_mode(&configuration.mode);

    let gateway = connect(&identity, environment).map_err(|err| match err {
        NotificationError::InitializationFailed(reason) => {
            AppError::Certificate(CertificateError::Rejected {
                path: configuration.certificate_path.clone(),
                reason,
            })
        }
        other => AppError::Delivery(other),
    })?;
    debug!(?environment, "notification client ready");

    let payload = AlertPayload::new(configuration.title, configuration.body);
    let service = NotificationService::new(gateway);
    let response = service
        .send_alert(&configuration.token, &configuration.topic, payload)
        .await?;

    writeln!(out, "{response}")?;
    Ok(response)
}
