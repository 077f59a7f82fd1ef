use clap::{Parser, Subcommand};
use idsheet::arrangement::{self, Arrangement};
use idsheet::config::{self, ConfigError, Overrides, SheetConfig};
use idsheet::imaging::{ExportSettings, RustBackend, export_sheet};
use idsheet::output;
use idsheet::pages::{PageSizeDescriptor, PhotoPreset, PhysicalSize};
use idsheet::preview;
use idsheet::units::Resolution;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "idsheet")]
#[command(about = "Lay out ID photos on printable sheets")]
#[command(long_about = "\
Lay out ID photos on printable sheets

Given a page size and a photo size in millimetres, idsheet works out how
many copies fit, where each one goes, and writes the sheet as PNG, JPEG,
or PDF.

Page presets: A3, A4, A5, Letter, 4x6, 5x7, Custom
Photo presets: passport, visa, one-inch, two-inch, id-card

Sizes are WIDTHxHEIGHT in millimetres, e.g. --photo 35x45 --custom 89x127.
4x6 inch photo paper gets a fixed 3-column layout; every other page is
packed as a dense grid.

Settings are read from config.toml in the --config directory. Command-line
flags override it. Run 'idsheet gen-config' for a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Photo size selection.
#[derive(clap::Args, Clone)]
struct PhotoArgs {
    /// Photo size in millimetres
    #[arg(long, value_name = "WxH", conflicts_with = "preset")]
    photo: Option<PhysicalSize>,

    /// Named photo size (passport, visa, one-inch, two-inch, id-card)
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,
}

/// Page and photo selection shared by the layout commands.
#[derive(clap::Args, Clone)]
struct SheetArgs {
    /// Page preset (A3, A4, A5, Letter, 4x6, 5x7, Custom)
    #[arg(long)]
    page: Option<String>,

    /// Custom page size in millimetres; selects the Custom page unless --page is given
    #[arg(long, value_name = "WxH")]
    custom: Option<PhysicalSize>,

    #[command(flatten)]
    photo: PhotoArgs,
}

#[derive(Subcommand)]
enum Command {
    /// List page presets and photo sizes
    Pages,
    /// Show where every copy goes on one page
    Layout {
        #[command(flatten)]
        sheet: SheetArgs,

        /// Print JSON with pixel cells, document rects, and normalized rects
        #[arg(long)]
        json: bool,
    },
    /// Compare how many copies fit on every page preset
    Fit {
        #[command(flatten)]
        photo: PhotoArgs,

        /// Custom page size in millimetres
        #[arg(long, value_name = "WxH")]
        custom: Option<PhysicalSize>,
    },
    /// Write an HTML preview of the sheet
    Preview {
        #[command(flatten)]
        sheet: SheetArgs,

        /// Output HTML file
        #[arg(long)]
        out: PathBuf,

        /// Image URL or path shown in every cell
        #[arg(long)]
        image: Option<String>,

        /// Sheet width in CSS pixels
        #[arg(long, default_value_t = 800)]
        width: u32,
    },
    /// Render the print-ready sheet as PNG, JPEG, or PDF
    Export {
        /// Background-removed photo to place on the sheet
        #[arg(value_name = "PHOTO")]
        source: PathBuf,

        #[command(flatten)]
        sheet: SheetArgs,

        /// Output file; the extension picks the format
        #[arg(long)]
        out: PathBuf,

        /// Colour behind the subject, e.g. #ffffff
        #[arg(long)]
        background: Option<String>,

        /// Identical pages in a PDF export
        #[arg(long)]
        sheets: Option<u32>,

        /// JPEG quality (1-100)
        #[arg(long)]
        quality: Option<u32>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let res = Resolution::default();

    match cli.command {
        Command::Pages => {
            let config = config::load_config(&cli.config)?;
            output::print_pages(&config.registry(), &res);
        }
        Command::Layout { sheet, json } => {
            let config = config::load_config_with(&cli.config, &sheet.overrides()?)?;
            let (page, arrangement) = arrange(&config, &res)?;
            if json {
                let report = output::LayoutReport::new(&page, config.photo, &arrangement);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_layout(&page, config.photo, &arrangement);
            }
        }
        Command::Fit { photo, custom } => {
            let overrides = Overrides {
                custom_page: custom,
                photo: photo.size()?,
                ..Overrides::default()
            };
            let config = config::load_config_with(&cli.config, &overrides)?;
            let results = arrangement::rank_by_capacity(arrangement::compare_pages(
                &config.registry(),
                config.photo,
                &res,
            ));
            output::print_fit(config.photo, &results);
        }
        Command::Preview {
            sheet,
            out,
            image,
            width,
        } => {
            let config = config::load_config_with(&cli.config, &sheet.overrides()?)?;
            let (page, arrangement) = arrange(&config, &res)?;
            let html = preview::render_preview(&page, &arrangement, image.as_deref(), width);
            create_parent_dir(&out)?;
            std::fs::write(&out, html.into_string())?;
            output::print_layout(&page, config.photo, &arrangement);
            println!("==> Preview written to {}", out.display());
        }
        Command::Export {
            source,
            sheet,
            out,
            background,
            sheets,
            quality,
        } => {
            let overrides = Overrides {
                background,
                sheets,
                quality,
                ..sheet.overrides()?
            };
            let config = config::load_config_with(&cli.config, &overrides)?;
            let (page, arrangement) = arrange(&config, &res)?;
            let settings: ExportSettings = config.export_settings()?;
            output::print_layout(&page, config.photo, &arrangement);
            create_parent_dir(&out)?;
            export_sheet(&RustBackend::new(), &source, &out, &page, &arrangement, &settings)?;
            println!("==> Sheet written to {}", out.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

impl PhotoArgs {
    /// Explicit size, or the size of the named preset.
    fn size(&self) -> Result<Option<PhysicalSize>, ConfigError> {
        match (&self.photo, &self.preset) {
            (Some(size), _) => Ok(Some(*size)),
            (None, Some(name)) => PhotoPreset::find(name)
                .map(|preset| Some(preset.size()))
                .ok_or_else(|| ConfigError::Validation(format!("unknown photo preset '{name}'"))),
            (None, None) => Ok(None),
        }
    }
}

impl SheetArgs {
    fn overrides(&self) -> Result<Overrides, ConfigError> {
        Ok(Overrides {
            page: self.page.clone(),
            custom_page: self.custom,
            photo: self.photo.size()?,
            ..Overrides::default()
        })
    }
}

/// Resolve the configured page and lay the configured photo out on it.
fn arrange(
    config: &SheetConfig,
    res: &Resolution,
) -> Result<(PageSizeDescriptor, Arrangement), Box<dyn std::error::Error>> {
    let page = config.registry().resolve_name(&config.page.preset, res)?;
    let arrangement = arrangement::compute_arrangement(&page, config.photo, res);
    Ok((page, arrangement))
}

fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
