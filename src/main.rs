use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use solar_advisor::devices::StillImageCamera;
use solar_advisor::domain::CoordinateInput;
use solar_advisor::intake::UploadCollector;
use solar_advisor::session::FormFields;
use solar_advisor::{Advisor, AdvisorError, Configuration, Session};
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solar panel placement advisor", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides configuration)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory reports are saved to (overrides configuration)
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    report_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the current location and print it
    Locate,
    /// Analyze one or more roof photos
    Analyze(AnalyzeArgs),
    /// Snap one frame from a camera device and analyze it
    Camera(CameraArgs),
}

#[derive(Args, Debug)]
struct SubmissionArgs {
    /// Latitude (falls back to the configured location)
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<String>,

    /// Longitude (falls back to the configured location)
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<String>,

    /// Local time as YYYY-MM-DDTHH:MM, defaults to now
    #[arg(long)]
    time: Option<String>,

    /// Ask for AI recommendations on the best result
    #[arg(long, action = ArgAction::SetTrue)]
    recommend: bool,

    /// Download the PDF report afterwards
    #[arg(long, action = ArgAction::SetTrue)]
    report: bool,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Image files to analyze
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    submission: SubmissionArgs,
}

#[derive(Args, Debug)]
struct CameraArgs {
    /// Still image standing in for the camera feed
    #[arg(long, value_hint = ValueHint::FilePath)]
    device: PathBuf,

    #[command(flatten)]
    submission: SubmissionArgs,
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

/// Explicit coordinates win; otherwise the location provider fills the form.
async fn prepare_form(
    advisor: &Advisor,
    session: &mut Session,
    args: &SubmissionArgs,
    form: fn(&mut Session) -> &mut FormFields,
) {
    match (&args.lat, &args.lon) {
        (Some(lat), Some(lon)) => {
            form(session).coordinates = CoordinateInput::new(lat, lon);
        }
        _ => {
            // a failed lookup leaves the fields blank for validation to catch
            if let Err(err) = advisor.locate(session).await {
                debug!("No location fallback: {}", err);
            }
        }
    }
    if let Some(time) = &args.time {
        form(session).time = time.clone();
    }
}

async fn follow_up(
    advisor: &Advisor,
    session: &mut Session,
    args: &SubmissionArgs,
) -> Result<(), AdvisorError> {
    if args.recommend {
        advisor.recommend(session).await?;
    }
    if args.report {
        advisor.download_report(session).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AdvisorError> {
    let cli = Cli::parse();
    let configuration = Configuration::load(cli.config.as_deref())?;
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        configuration.logging.max_level()
    };
    init_logging(level);

    let mut builder = Advisor::builder(configuration);
    if let Some(base_url) = cli.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(report_dir) = cli.report_dir {
        builder = builder.report_dir(report_dir);
    }
    let advisor = builder.build()?;
    let mut session = Session::new();

    match cli.command {
        Command::Locate => {
            advisor.locate(&mut session).await?;
        }
        Command::Analyze(args) => {
            prepare_form(&advisor, &mut session, &args.submission, |s| &mut s.upload_form).await;
            let collector = UploadCollector::new().select(args.files);
            let report = advisor.submit_upload(&mut session, collector).await?;
            if report.best.is_some() {
                follow_up(&advisor, &mut session, &args.submission).await?;
            }
        }
        Command::Camera(args) => {
            prepare_form(&advisor, &mut session, &args.submission, |s| &mut s.camera_form).await;
            let device = StillImageCamera::new(args.device);
            advisor.open_camera(&mut session, &device).await?;
            advisor.snap(&mut session)?;
            advisor.submit_capture(&mut session).await?;
            follow_up(&advisor, &mut session, &args.submission).await?;
        }
    }
    Ok(())
}
