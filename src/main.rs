use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use signature_gal::contact::{self, Captcha, ContactForm, OutboxNotifier};
use signature_gal::fonts::FontCatalog;
use signature_gal::render::SignatureRenderer;
use signature_gal::{config, gallery, output};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Shared flag for commands that draw random values.
#[derive(clap::Args, Clone)]
struct SeedArgs {
    /// Seed the random source for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

impl SeedArgs {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[derive(Parser)]
#[command(name = "signature-gal")]
#[command(about = "Render a name as a gallery of signature images")]
#[command(long_about = "\
Render a name as a gallery of signature images

Each run picks 10 fonts at random (repeats allowed) from the fonts directory
and renders the name in each, twice: a 400x100 preview and a 3840x2160
download, both transparent PNGs with the name centered in black.

Layout:

  static/
  ├── fonts/                       # .ttf / .otf catalog
  └── signatures/
      └── k3v9q0xz7m2a/            # One directory per run
          ├── index.html           # Gallery page
          ├── gallery.json         # Manifest
          ├── signature_display_0.png
          └── signature_hd_0.png

Run 'signature-gal gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (defaults apply when missing)
    #[arg(long, default_value = "signature-gal.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a gallery of signatures for a name
    Generate {
        /// Name to render, e.g. "sachin kumar"
        name: String,
        #[command(flatten)]
        seed: SeedArgs,
    },
    /// List the font catalog
    Fonts,
    /// Copy a generated file out of the output directory
    Download {
        /// Path relative to the output directory, e.g. k3v9q0xz7m2a/signature_hd_0.png
        path: PathBuf,
        /// Destination file or directory
        #[arg(long, default_value = ".")]
        to: PathBuf,
    },
    /// Submit the contact form (captcha answer is read from stdin)
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
        #[command(flatten)]
        seed: SeedArgs,
    },
    /// Create the output and outbox directories
    Init,
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let load_config = || -> Result<config::AppConfig, Box<dyn std::error::Error>> {
        let config = config::load_config(&cli.config)?;
        config.ensure_directories()?;
        Ok(config)
    };

    match cli.command {
        Command::Generate { name, seed } => {
            let config = load_config()?;
            let mut rng = seed.rng();
            let manifest =
                gallery::generate_gallery(&SignatureRenderer::new(), &config, &name, &mut rng)?;
            output::print_generate_output(&manifest, &config.output_dir);
        }
        Command::Fonts => {
            let config = load_config()?;
            let catalog = FontCatalog::discover(&config.fonts_dir)?;
            output::print_font_catalog(&catalog, &config.fonts_dir);
        }
        Command::Download { path, to } => {
            let config = load_config()?;
            let target = gallery::export(&config.output_dir, &path, &to)?;
            println!("Saved {}", target.display());
        }
        Command::Contact {
            name,
            surname,
            email,
            phone,
            message,
            seed,
        } => {
            let config = load_config()?;
            let form = ContactForm {
                name,
                surname,
                email,
                phone,
                message,
            };
            let captcha = Captcha::generate(&mut seed.rng());
            print!("Captcha: {}\nEnter the captcha: ", captcha.code());
            io::stdout().flush()?;
            let mut answer = String::new();
            io::stdin().lock().read_line(&mut answer)?;
            let answer = answer.trim_end_matches(['\r', '\n']);

            let notifier = OutboxNotifier::new(&config.contact.outbox_dir);
            let notification =
                contact::submit(&form, &captcha, answer, &notifier, &config.contact)?;
            output::print_contact_output(&notification, &config.contact.outbox_dir);
        }
        Command::Init => {
            let config = load_config()?;
            println!("Output: {}", config.output_dir.display());
            println!("Outbox: {}", config.contact.outbox_dir.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
