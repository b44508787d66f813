use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use resqit::export::HtmlFilePrintSink;
use resqit::{GeneratorConfig, PayloadFormat, RawFields};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "resqit", version, about = "Emergency contact QR code generator")]
struct Cli {
    /// JSON config file (defaults are used for missing keys)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the QR code to PNG, optionally with a printable card
    Generate {
        #[command(flatten)]
        form: FormArgs,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Also write `emergency-card.html` for printing
        #[arg(long)]
        print: bool,
    },
    /// Print the payload text that would be encoded
    Payload {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Format a phone number the way the form does while typing
    Phone { text: String },
}

#[derive(Args)]
struct FormArgs {
    /// Read the form from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["full_name", "contact_name", "contact_phone", "blood_type", "notes"])]
    from_json: Option<PathBuf>,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    contact_name: Option<String>,
    #[arg(long)]
    contact_phone: Option<String>,
    /// O+, O-, A+, A-, B+, B-, AB+, AB- or Unknown
    #[arg(long)]
    blood_type: Option<String>,
    /// Allergies and medical conditions
    #[arg(long)]
    notes: Option<String>,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Readable,
    Vcard,
}

impl FormArgs {
    fn raw_fields(&self) -> Result<RawFields> {
        if let Some(path) = &self.from_json {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read form from {}", path.display()))?;
            return Ok(RawFields::from_json(&s)?);
        }
        Ok(RawFields {
            full_name: self.full_name.clone().unwrap_or_default(),
            emergency_contact_name: self.contact_name.clone().unwrap_or_default(),
            emergency_contact_phone: self.contact_phone.clone().unwrap_or_default(),
            blood_type: self.blood_type.clone().unwrap_or_default(),
            allergies: self.notes.clone(),
        })
    }

    fn apply_format(&self, config: &mut GeneratorConfig) {
        if let Some(f) = self.format {
            config.payload_format = match f {
                FormatArg::Readable => PayloadFormat::Readable,
                FormatArg::Vcard => PayloadFormat::ContactCard,
            };
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<GeneratorConfig> {
    match path {
        Some(p) => Ok(GeneratorConfig::from_json_file(p)?),
        None => Ok(GeneratorConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default level.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Phone { text } => {
            println!("{}", resqit::format_phone_display(&text));
        }
        Command::Payload { form } => {
            form.apply_format(&mut config);
            let record = resqit::validate(&form.raw_fields()?)?;
            println!("{}", resqit::format_payload(&record, config.payload_format));
        }
        Command::Generate { form, out, print } => {
            form.apply_format(&mut config);
            let raw = form.raw_fields()?;
            let mut app = resqit::new_app(config)?;

            let digest = {
                let code = app.submit(&raw)?;
                println!("{}", code.payload);
                code.raster.digest()
            };
            let png = app.download(&out)?;
            log::info!("wrote {} (sha256 {})", png.display(), digest);

            if print {
                let sink = Arc::new(HtmlFilePrintSink::new(out.join("emergency-card.html")));
                let task = app.print(sink.clone())?;
                // The process must outlive the deferred print trigger.
                if task.join().await {
                    println!("print card: {}", sink.path().display());
                }
            }
        }
    }
    Ok(())
}
