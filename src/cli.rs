use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "apns2",
    about = "A tool for sending APNS notifications",
    long_about = "APNS2 is a CLI tool that helps with sending APNS notifications."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub push: PushArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the version number of APNS2
    Version,
}

/// Flags of the root command. Everything is optional at the parser level,
/// required fields are checked once the settings file has been merged in.
#[derive(Debug, Clone, Default, Args)]
pub struct PushArgs {
    /// Path to certificate file.
    #[arg(short = 'c', long, global = true)]
    pub certificate_path: Option<String>,

    /// The topic of the remote notification, which is typically the bundle ID for your app
    #[arg(short = 't', long, global = true)]
    pub topic: Option<String>,

    /// APNS server to send notifications to. `production` or `development` [default: production]
    #[arg(short = 'm', long, global = true)]
    pub mode: Option<String>,

    /// The device token to send notifications to
    #[arg(short = 'd', long, global = true)]
    pub token: Option<String>,

    /// The title of the APNS notification [default: APNS Test]
    #[arg(short = 'e', long, global = true)]
    pub title: Option<String>,

    /// The body of the APNS notification [default: APNS Test]
    #[arg(short = 'b', long, global = true)]
    pub body: Option<String>,

    /// Optional TOML file providing values for any of the flags above, the
    /// required ones included. Flags given on the command line take precedence
    #[arg(short = 's', long, global = true)]
    pub settings: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from([
            "apns2", "-c", "cert.pem", "-t", "com.example.app", "-d", "abcdef", "-m",
            "development", "-e", "Hello", "-b", "World",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.push.certificate_path.as_deref(), Some("cert.pem"));
        assert_eq!(cli.push.topic.as_deref(), Some("com.example.app"));
        assert_eq!(cli.push.token.as_deref(), Some("abcdef"));
        assert_eq!(cli.push.mode.as_deref(), Some("development"));
        assert_eq!(cli.push.title.as_deref(), Some("Hello"));
        assert_eq!(cli.push.body.as_deref(), Some("World"));
        assert!(cli.push.settings.is_none());
    }

    #[test]
    fn test_parse_long_flags() {
        let cli = Cli::try_parse_from([
            "apns2",
            "--certificate-path",
            "cert.pem",
            "--topic",
            "com.example.app",
            "--token",
            "abcdef",
            "--settings",
            "apns2.toml",
        ])
        .unwrap();

        assert_eq!(cli.push.certificate_path.as_deref(), Some("cert.pem"));
        assert_eq!(cli.push.topic.as_deref(), Some("com.example.app"));
        assert_eq!(cli.push.token.as_deref(), Some("abcdef"));
        assert_eq!(cli.push.settings.as_deref(), Some("apns2.toml"));
        assert!(cli.push.mode.is_none());
    }

    #[test]
    fn test_parse_version_ignores_push_flags() {
        let cli = Cli::try_parse_from(["apns2", "version", "-c", "cert.pem"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Version)));

        let cli = Cli::try_parse_from(["apns2", "-t", "com.example.app", "version"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Version)));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let result = Cli::try_parse_from(["apns2", "--sound", "default"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_help_mentions_required_flags() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("required ones included"));
    }
}
