use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cardkit::{
    AspectRatio, AssetRole, BuilderConfig, CardBuilder, CropSession, CropShape, FileTemplateStore,
    NewElement, ResvgBackend, TextKind,
};

#[derive(Parser, Debug)]
#[command(name = "cardkit", version)]
struct Cli {
    /// Builder configuration JSON (defaults apply when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crop an image to a fixed-size JPEG.
    Crop(CropArgs),
    /// Render a saved template to PNG.
    Export(ExportArgs),
    /// Create a template from an optional background and placeholders.
    NewTemplate(NewTemplateArgs),
}

#[derive(Parser, Debug)]
struct CropArgs {
    /// Source image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// Guide shape; circle and square produce square output.
    #[arg(long, value_enum, default_value_t = ShapeChoice::Rectangle)]
    shape: ShapeChoice,

    /// Fixed crop aspect (width / height) for rectangle crops.
    #[arg(long)]
    aspect: Option<f64>,

    /// Zoom to apply after loading, overriding auto-zoom.
    #[arg(long)]
    zoom: Option<f64>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Template store directory.
    #[arg(long)]
    store: PathBuf,

    /// Template name.
    #[arg(long)]
    name: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the intermediate SVG next to the PNG.
    #[arg(long)]
    svg: bool,
}

#[derive(Parser, Debug)]
struct NewTemplateArgs {
    /// Template store directory.
    #[arg(long)]
    store: PathBuf,

    /// Template name.
    #[arg(long)]
    name: String,

    /// Background image; the canvas takes its size.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Text placeholders to place, in order.
    #[arg(long, value_enum, value_delimiter = ',')]
    placeholders: Vec<PlaceholderChoice>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeChoice {
    Circle,
    Square,
    Rectangle,
}

impl From<ShapeChoice> for CropShape {
    fn from(c: ShapeChoice) -> Self {
        match c {
            ShapeChoice::Circle => CropShape::Circle,
            ShapeChoice::Square => CropShape::Square,
            ShapeChoice::Rectangle => CropShape::Rectangle,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlaceholderChoice {
    Name,
    Title,
    Company,
}

impl From<PlaceholderChoice> for TextKind {
    fn from(c: PlaceholderChoice) -> Self {
        match c {
            PlaceholderChoice::Name => TextKind::Name,
            PlaceholderChoice::Title => TextKind::Title,
            PlaceholderChoice::Company => TextKind::Company,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => BuilderConfig::from_path(path)?,
        None => BuilderConfig::default(),
    };
    match cli.cmd {
        Command::Crop(args) => cmd_crop(args, config),
        Command::Export(args) => cmd_export(args, config),
        Command::NewTemplate(args) => cmd_new_template(args, config),
    }
}

fn cmd_crop(args: CropArgs, config: BuilderConfig) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let image = cardkit::assets::decode::decode_image(&bytes)?;

    let aspect = match args.aspect {
        Some(a) => AspectRatio::from_f64(a)?,
        None => AspectRatio::Free,
    };
    let viewport = config.crop.viewport();
    let mut session = CropSession::new(config.crop);
    session.open(args.in_path.display().to_string(), aspect, args.shape.into())?;
    session.finish_loading(image, viewport)?;
    if let Some(zoom) = session.layout_settled(viewport)? {
        eprintln!("auto-zoom {zoom}");
    }
    if let Some(zoom) = args.zoom {
        session.set_zoom(zoom)?;
    }

    let blob = session.commit()?;
    write_output(&args.out, blob.bytes())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs, config: BuilderConfig) -> anyhow::Result<()> {
    let mut store = FileTemplateStore::new(&args.store)?;
    let mut builder = CardBuilder::new(config)?;
    if !builder.load(&mut store, &args.name)? {
        anyhow::bail!(
            "no template named '{}' in '{}'",
            args.name,
            args.store.display()
        );
    }

    let png = builder.export_png(&mut ResvgBackend::new())?;
    write_output(&args.out, png.bytes())?;
    eprintln!("wrote {}", args.out.display());

    if args.svg {
        let svg_path = args.out.with_extension("svg");
        write_output(&svg_path, builder.export_svg()?.as_bytes())?;
        eprintln!("wrote {}", svg_path.display());
    }
    Ok(())
}

fn cmd_new_template(args: NewTemplateArgs, config: BuilderConfig) -> anyhow::Result<()> {
    let mut store = FileTemplateStore::new(&args.store)?;
    let mut builder = CardBuilder::new(config)?;

    if let Some(path) = &args.background {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        let mime = cardkit::assets::decode::sniff_mime(&bytes)
            .with_context(|| format!("'{}' is not a recognised image", path.display()))?;
        builder.commit_blob(AssetRole::Background, cardkit::Blob::new(mime, bytes))?;
    }
    for kind in &args.placeholders {
        builder.add_element(NewElement::Text((*kind).into()))?;
    }

    builder.save(&mut store, &args.name)?;
    let canvas = builder.document().canvas();
    eprintln!(
        "saved '{}' ({}x{}, {} elements)",
        args.name,
        canvas.width,
        canvas.height,
        builder.document().elements().len()
    );
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
